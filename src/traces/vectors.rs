//! 2D vector fields drawn as quiver polylines.
//!
//! A quiver is two line traces: the barbs (one segment per vector) and the
//! arrowheads (two short strokes meeting at each barb's end). Segments of
//! one trace are separated by NaN gaps.

use std::f64::consts::PI;

use crate::error::Result;
use crate::sanitize::Mask;
use crate::schema::{ColorSpec, LineSpec, TraceKind, TraceSpec};
use crate::state::{CanvasSize, ColoringStrategy, LayerState, VectorConfig, VectorMode, ViewerState};

/// Longest arrow as a fraction of the plot diagonal, at a pixel ratio of 1.
pub const DIAGONAL_FRACTION: f64 = 0.05;
/// Arrowhead length as a fraction of the barb length.
pub const ARROW_SCALE: f64 = 0.2;
/// Stroke width of arrows, in pixels.
pub const ARROW_WIDTH: f64 = 5.0;
/// Vectors are not drawn at or below this scaling.
pub const MIN_SCALING: f64 = 0.1;

/// Barb and arrowhead polylines of a quiver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Quiver {
    /// Barb x positions: `[x0, end0, NaN, x1, end1, NaN, ...]`.
    pub barb_x: Vec<f64>,
    /// Barb y positions.
    pub barb_y: Vec<f64>,
    /// Arrowhead x positions: `[left0, end0, right0, NaN, ...]`.
    pub head_x: Vec<f64>,
    /// Arrowhead y positions.
    pub head_y: Vec<f64>,
}

impl Quiver {
    /// Build the polylines for vectors `(u, v)` rooted at `(x, y)`.
    ///
    /// `scale` multiplies every vector; arrowhead strokes are
    /// `arrow_scale × barb length` long and open by `angle` radians on
    /// either side of the barb.
    #[must_use]
    pub fn new(x: &[f64], y: &[f64], u: &[f64], v: &[f64], scale: f64, arrow_scale: f64, angle: f64) -> Self {
        let n = x.len().min(y.len()).min(u.len()).min(v.len());
        let mut quiver = Self {
            barb_x: Vec::with_capacity(3 * n),
            barb_y: Vec::with_capacity(3 * n),
            head_x: Vec::with_capacity(4 * n),
            head_y: Vec::with_capacity(4 * n),
        };
        for i in 0..n {
            let end_x = x[i] + u[i] * scale;
            let end_y = y[i] + v[i] * scale;
            quiver.barb_x.extend([x[i], end_x, f64::NAN]);
            quiver.barb_y.extend([y[i], end_y, f64::NAN]);

            let (dx, dy) = (end_x - x[i], end_y - y[i]);
            let head = dx.hypot(dy) * arrow_scale;
            let barb_angle = dy.atan2(dx);
            let (a1, a2) = (barb_angle + angle, barb_angle - angle);
            quiver.head_x.extend([end_x - head * a1.cos(), end_x, end_x - head * a2.cos(), f64::NAN]);
            quiver.head_y.extend([end_y - head * a1.sin(), end_y, end_y - head * a2.sin(), f64::NAN]);
        }
        quiver
    }

    /// Barb and arrowhead traces sharing one line style.
    #[must_use]
    pub fn into_traces(self, line: LineSpec, group: &str) -> Vec<TraceSpec> {
        let trace = |x, y| {
            TraceSpec::new(TraceKind::Scatter)
                .xy(x, y)
                .mode("lines")
                .name("quiver")
                .line(line.clone())
                .legend(group, false)
                .skip_hover()
        };
        vec![trace(self.barb_x, self.barb_y), trace(self.head_x, self.head_y)]
    }
}

/// Cartesian components of the configured vectors.
///
/// In polar mode `vx` holds angles in degrees and `vy` magnitudes.
#[must_use]
pub fn cartesian_components(mode: VectorMode, vx: &[f64], vy: &[f64]) -> (Vec<f64>, Vec<f64>) {
    match mode {
        VectorMode::Cartesian => (vx.to_vec(), vy.to_vec()),
        VectorMode::Polar => vx
            .iter()
            .zip(vy)
            .map(|(&angle, &r)| {
                let theta = angle.to_radians();
                (r * theta.cos(), r * theta.sin())
            })
            .unzip(),
    }
}

/// Arrowhead half-opening: a third of π scaled by the narrower axis' share
/// of the diagonal, or zero without arrowheads.
#[must_use]
pub fn arrowhead_angle(viewer: &ViewerState, arrowhead: bool) -> f64 {
    if !arrowhead {
        return 0.0;
    }
    let diag = viewer.diagonal();
    let xfrac = (viewer.axes.x.max - viewer.axes.x.min) / diag;
    let yfrac = (viewer.axes.y.max - viewer.axes.y.min) / diag;
    PI * xfrac.min(yfrac) / 3.0
}

/// Whether a layer's vectors are drawn on this viewer.
#[must_use]
pub fn draws_vectors(viewer: &ViewerState, config: &VectorConfig) -> bool {
    config.visible && viewer.is_rectilinear() && config.scaling > MIN_SCALING
}

/// Quiver traces for a layer's vector field.
///
/// `x`/`y` are the sanitized positions and `colors` the resolved point
/// colors; `mask` selects the same rows from the component attributes.
/// Batch coloring yields one quiver; per-point coloring one quiver per
/// vector. The longest vector spans [`DIAGONAL_FRACTION`] of the plot
/// diagonal times the scaling and the canvas pixel ratio.
///
/// # Errors
///
/// Returns [`crate::Error::IncompatibleAttribute`] when a component
/// attribute is missing or not numeric.
pub fn quiver_traces(
    viewer: &ViewerState,
    canvas: CanvasSize,
    layer: &LayerState,
    config: &VectorConfig,
    mask: &Mask,
    (x, y): (&[f64], &[f64]),
    colors: &ColorSpec,
) -> Result<Vec<TraceSpec>> {
    let vx = mask.apply(layer.data.numeric(&config.vx)?)?;
    let vy = mask.apply(layer.data.numeric(&config.vy)?)?;
    let (u, v) = cartesian_components(config.mode, &vx, &vy);

    let vmax = u.iter().zip(&v).map(|(a, b)| a.hypot(*b)).filter(|m| m.is_finite()).fold(0.0_f64, f64::max);
    if vmax <= 0.0 {
        tracing::warn!(layer = layer.label(), "vector field has no finite nonzero vector");
        return Ok(Vec::new());
    }
    let scale = DIAGONAL_FRACTION * config.scaling * viewer.diagonal() / vmax * canvas.pixel_ratio;
    let angle = arrowhead_angle(viewer, config.arrowhead);

    let shift = config.anchor.shift() * scale;
    let xs: Vec<f64> = x.iter().zip(&u).map(|(p, d)| p + shift * d).collect();
    let ys: Vec<f64> = y.iter().zip(&v).map(|(p, d)| p + shift * d).collect();

    let group = layer.legend_group();
    let line = |color: Option<&str>| LineSpec {
        color: color.map(str::to_string),
        width: Some(ARROW_WIDTH),
        ..LineSpec::default()
    };

    match layer.coloring() {
        ColoringStrategy::Batch => {
            Ok(Quiver::new(&xs, &ys, &u, &v, scale, ARROW_SCALE, angle).into_traces(line(colors.at(0)), &group))
        }
        ColoringStrategy::PerPoint => {
            let mut traces = Vec::with_capacity(2 * xs.len());
            for i in 0..xs.len() {
                let quiver = Quiver::new(&xs[i..=i], &ys[i..=i], &u[i..=i], &v[i..=i], scale, ARROW_SCALE, angle);
                traces.extend(quiver.into_traces(line(colors.at(i)), &group));
            }
            Ok(traces)
        }
    }
}
