//! Dot plots: histogram bins drawn as stacks of unit markers.

use crate::layout::MARGIN;
use crate::resolve::{fixed_color, linear_colors};
use crate::schema::{ColorSpec, Marker, SizeSpec, TraceKind, TraceSpec};
use crate::state::{CanvasSize, ColorMode, LayerState, ViewerState};
use crate::traces::histogram::Histogram;
use crate::traces::layer_name;

/// Gap between neighbouring dots, as a fraction of the diameter.
const DOT_SHRINK: f64 = 0.95;

/// Marker positions: one dot per unit count, stacked from 1 at each bin
/// center.
#[must_use]
pub fn dot_positions(histogram: &Histogram) -> (Vec<f64>, Vec<f64>) {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (center, &count) in histogram.centers().into_iter().zip(histogram.counts()) {
        // Saturating cast: negative and NaN counts stack nothing.
        let n = count as usize;
        x.extend(std::iter::repeat(center).take(n));
        y.extend((1..=n).map(|k| k as f64));
    }
    (x, y)
}

/// Dot diameter in pixels.
///
/// The narrowest bin is converted to pixels through the plot area's
/// horizontal data-to-pixel ratio, then capped by the height of one count
/// when the y range is finite and non-empty. A non-finite result falls
/// back to one pixel.
#[must_use]
pub fn dot_size(viewer: &ViewerState, canvas: CanvasSize, histogram: &Histogram) -> f64 {
    let bin_width = histogram.widths().into_iter().fold(f64::INFINITY, f64::min);
    let width_px = canvas.width - 2.0 * MARGIN;
    let height_px = canvas.height - 2.0 * MARGIN;

    let mut diameter = bin_width * width_px / viewer.axes.x.span();
    let y_span = viewer.axes.y.span();
    if y_span.is_finite() && y_span > 0.0 {
        diameter = diameter.min(height_px / y_span);
    }
    if !diameter.is_finite() {
        tracing::warn!(diameter, "non-finite dot size, using 1px");
        diameter = 1.0;
    }
    diameter * DOT_SHRINK
}

/// Dot colors for `x` positions from [`dot_positions`].
///
/// Dots are bins, not rows, so linear mode colors each dot by its bin
/// center through the layer colormap and bounds. Fixed mode shares the
/// layer color.
#[must_use]
pub fn dot_colors(layer: &LayerState, x: &[f64]) -> ColorSpec {
    match &layer.color_mode {
        ColorMode::Fixed => ColorSpec::Single(fixed_color(&layer.color)),
        ColorMode::Linear(linear) => {
            ColorSpec::PerPoint(linear_colors(x, &linear.cmap, linear.vmin, linear.vmax))
        }
    }
}

/// The marker trace of one dot-plot layer.
#[must_use]
pub fn traces_for_layer(
    viewer: &ViewerState,
    layer: &LayerState,
    histogram: &Histogram,
    canvas: CanvasSize,
    add_data_label: bool,
) -> Vec<TraceSpec> {
    let (x, y) = dot_positions(histogram);
    let marker = Marker {
        color: Some(dot_colors(layer, &x)),
        size: Some(SizeSpec::Single(dot_size(viewer, canvas, histogram))),
        opacity: Some(layer.alpha),
        ..Marker::default()
    };
    vec![TraceSpec::new(TraceKind::Scatter)
        .xy(x, y)
        .mode("markers")
        .name(layer_name(layer, add_data_label))
        .marker(marker)
        .legend(&layer.legend_group(), true)
        .skip_hover()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::scale::Colormap;
    use crate::state::AxisState;
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn histogram() -> Histogram {
        Histogram::new(vec![0.0, 10.0, 20.0], vec![3.0, 2.0]).unwrap()
    }

    #[test]
    fn test_positions_stack_per_bin() {
        let (x, y) = dot_positions(&histogram());
        assert_eq!(x, vec![5.0, 5.0, 5.0, 15.0, 15.0]);
        assert_eq!(y, vec![1.0, 2.0, 3.0, 1.0, 2.0]);
    }

    #[test]
    fn test_size_from_width() {
        let viewer = ViewerState::rectilinear(AxisState::new("x", 0.0, 20.0), AxisState::new("y", 0.0, 0.0));
        // 540px across 20 units: one 10-unit bin spans 270px.
        let size = dot_size(&viewer, CanvasSize::new(640.0, 480.0), &histogram());
        assert_relative_eq!(size, 270.0 * 0.95);
    }

    #[test]
    fn test_size_capped_by_height() {
        let viewer = ViewerState::rectilinear(AxisState::new("x", 0.0, 20.0), AxisState::new("y", 0.0, 4.0));
        let size = dot_size(&viewer, CanvasSize::new(640.0, 480.0), &histogram());
        assert_relative_eq!(size, 95.0 * 0.95);
    }

    #[test]
    fn test_size_fallback() {
        let viewer = ViewerState::rectilinear(AxisState::new("x", 1.0, 1.0), AxisState::new("y", 0.0, 0.0));
        let size = dot_size(&viewer, CanvasSize::new(640.0, 480.0), &histogram());
        assert_relative_eq!(size, 0.95);
    }

    #[test]
    fn test_trace() {
        let viewer = ViewerState::rectilinear(AxisState::new("x", 0.0, 20.0), AxisState::new("y", 0.0, 4.0));
        let layer = LayerState::new(1, Arc::new(DataTable::new("dots")));
        let traces = traces_for_layer(&viewer, &layer, &histogram(), CanvasSize::default(), false);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].mode.as_deref(), Some("markers"));
        assert_eq!(traces[0].point_count(), 5);
        assert!(matches!(traces[0].marker.as_ref().unwrap().size, Some(SizeSpec::Single(_))));
        assert!(matches!(traces[0].marker.as_ref().unwrap().color, Some(ColorSpec::Single(_))));
    }

    #[test]
    fn test_linear_color_per_bin() {
        let viewer = ViewerState::rectilinear(AxisState::new("x", 0.0, 20.0), AxisState::new("y", 0.0, 4.0));
        let cmap = Colormap::viridis();
        let layer = LayerState::new(1, Arc::new(DataTable::new("dots")))
            .with_color_mode(ColorMode::linear("x", cmap.clone(), 0.0, 20.0));
        let traces = traces_for_layer(&viewer, &layer, &histogram(), CanvasSize::default(), false);
        let Some(ColorSpec::PerPoint(colors)) = &traces[0].marker.as_ref().unwrap().color else {
            panic!("expected per-dot colors")
        };
        assert_eq!(colors.len(), 5);
        assert_eq!(colors[0], colors[2]);
        assert_eq!(colors[3], colors[4]);
        assert_ne!(colors[0], colors[3]);
        assert_eq!(colors[0], linear_colors(&[5.0], &cmap, 0.0, 20.0)[0]);
    }
}
