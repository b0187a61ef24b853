//! Profile lines from precomputed `(x, y)` pairs.

use crate::error::{Error, Result};
use crate::resolve::fixed_color;
use crate::schema::{LineSpec, TraceKind, TraceSpec};
use crate::state::{LayerState, ViewerState};
use crate::traces::layer_name;

/// Collapsed profile of one layer, computed by the host.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Profile {
    /// Pair up positions and values.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] when the lengths differ.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::ShapeMismatch { expected: vec![x.len()], found: vec![y.len()] });
        }
        Ok(Self { x, y })
    }

    /// Positions.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Values.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

/// Rescale to `[0, 1]` over the finite range; a flat or empty profile maps
/// to zeros. NaN stays NaN.
#[must_use]
pub fn normalize(values: &[f64]) -> Vec<f64> {
    let (lo, hi) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return values.iter().map(|v| if v.is_nan() { *v } else { 0.0 }).collect();
    }
    values.iter().map(|v| (v - lo) / span).collect()
}

/// The line trace of one profile layer.
#[must_use]
pub fn traces_for_layer(
    viewer: &ViewerState,
    layer: &LayerState,
    profile: &Profile,
    add_data_label: bool,
) -> Vec<TraceSpec> {
    let y = if viewer.normalize { normalize(profile.y()) } else { profile.y().to_vec() };
    let line = LineSpec {
        color: Some(fixed_color(&layer.color)),
        width: Some(2.0 * layer.line.width),
        shape: Some(if layer.line.as_steps { "hvh" } else { "linear" }.to_string()),
        ..LineSpec::default()
    };
    let trace = TraceSpec::new(TraceKind::Scatter)
        .xy(profile.x().to_vec(), y)
        .mode("lines")
        .name(layer_name(layer, add_data_label))
        .line(line)
        .legend(&layer.legend_group(), true)
        .skip_hover();
    vec![TraceSpec { opacity: Some(layer.alpha), ..trace }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::state::{AxisState, LineConfig};
    use std::sync::Arc;

    fn viewer() -> ViewerState {
        ViewerState::rectilinear(AxisState::new("x", 0.0, 4.0), AxisState::new("y", 0.0, 8.0))
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(&[2.0, 4.0, 6.0]), vec![0.0, 0.5, 1.0]);
        assert_eq!(normalize(&[3.0, 3.0]), vec![0.0, 0.0]);
        let with_gap = normalize(&[0.0, f64::NAN, 2.0]);
        assert!(with_gap[1].is_nan());
        assert_eq!(with_gap[2], 1.0);
    }

    #[test]
    fn test_profile_lengths() {
        assert!(Profile::new(vec![1.0], vec![]).is_err());
    }

    #[test]
    fn test_step_line() {
        let layer = LayerState::new(1, Arc::new(DataTable::new("p")))
            .with_line(LineConfig { as_steps: true, width: 1.5, ..LineConfig::default() });
        let profile = Profile::new(vec![0.0, 1.0], vec![2.0, 4.0]).unwrap();
        let mut viewer = viewer();
        viewer.normalize = true;
        let traces = traces_for_layer(&viewer, &layer, &profile, false);
        let line = traces[0].line.as_ref().unwrap();
        assert_eq!(line.shape.as_deref(), Some("hvh"));
        assert_eq!(line.width, Some(3.0));
        assert_eq!(traces[0].y.as_ref().unwrap(), &vec![0.0, 1.0]);
        assert_eq!(traces[0].hoverinfo.as_deref(), Some("skip"));
    }

    #[test]
    fn test_linear_line_keeps_values() {
        let layer = LayerState::new(1, Arc::new(DataTable::new("p")));
        let profile = Profile::new(vec![0.0, 1.0], vec![2.0, 4.0]).unwrap();
        let traces = traces_for_layer(&viewer(), &layer, &profile, false);
        assert_eq!(traces[0].line.as_ref().unwrap().shape.as_deref(), Some("linear"));
        assert_eq!(traces[0].y.as_ref().unwrap(), &vec![2.0, 4.0]);
    }
}
