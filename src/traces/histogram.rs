//! Histogram bars from precomputed bins.

use crate::error::{Error, Result};
use crate::resolve::fixed_color;
use crate::schema::{ColorSpec, Marker, MarkerLine, TraceKind, TraceSpec};
use crate::state::{LayerState, ViewerState};
use crate::traces::layer_name;

/// Bin edges and counts computed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    counts: Vec<f64>,
}

impl Histogram {
    /// Wrap `n + 1` edges and `n` counts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the lengths do not pair up and
    /// [`Error::EmptyData`] when there are no bins.
    pub fn new(edges: Vec<f64>, counts: Vec<f64>) -> Result<Self> {
        if counts.is_empty() {
            return Err(Error::EmptyData);
        }
        if edges.len() != counts.len() + 1 {
            return Err(Error::ShapeMismatch { expected: vec![counts.len() + 1], found: vec![edges.len()] });
        }
        Ok(Self { edges, counts })
    }

    /// Bin edges.
    #[must_use]
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Per-bin counts.
    #[must_use]
    pub fn counts(&self) -> &[f64] {
        &self.counts
    }

    /// Number of bins.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false; construction rejects empty histograms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bin midpoints.
    #[must_use]
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    /// Bin widths.
    #[must_use]
    pub fn widths(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

/// Bar marker in the layer's fixed color with no outline.
fn bar_marker(layer: &LayerState) -> Marker {
    Marker {
        color: Some(ColorSpec::Single(fixed_color(&layer.color))),
        opacity: Some(layer.alpha),
        line: Some(MarkerLine { width: 0.0, color: None }),
        ..Marker::default()
    }
}

/// Bar traces for one histogram layer.
///
/// A log x axis gets one bar trace per bin with an explicit width, since
/// bar widths on a log axis are not uniform; only the first carries the
/// legend entry. A linear axis gets a single trace at the bin centers.
#[must_use]
pub fn traces_for_layer(
    viewer: &ViewerState,
    layer: &LayerState,
    histogram: &Histogram,
    add_data_label: bool,
) -> Vec<TraceSpec> {
    let name = layer_name(layer, add_data_label);
    let group = layer.legend_group();
    let bar = |x: Vec<f64>, y: Vec<f64>, show: bool| {
        TraceSpec::new(TraceKind::Bar)
            .xy(x, y)
            .name(name.clone())
            .marker(bar_marker(layer))
            .legend(&group, show)
            .skip_hover()
    };

    let centers = histogram.centers();
    if viewer.axes.x.log {
        centers
            .iter()
            .zip(histogram.counts())
            .zip(histogram.widths())
            .enumerate()
            .map(|(i, ((&x, &count), width))| TraceSpec { width: Some(vec![width]), ..bar(vec![x], vec![count], i == 0) })
            .collect()
    } else {
        vec![bar(centers, histogram.counts().to_vec(), true)]
    }
}
