//! Dendrogram polylines.

use crate::error::{Error, Result};
use crate::resolve::fixed_color;
use crate::schema::{LineSpec, TraceKind, TraceSpec};
use crate::state::LayerState;
use crate::traces::layer_name;

/// Tree layout coordinates: one polyline with NaN between branches.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeLayout {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TreeLayout {
    /// Wrap layout coordinates.
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
}

/// The line trace of one dendrogram layer.
#[must_use]
pub fn traces_for_layer(layer: &LayerState, tree: &TreeLayout, add_data_label: bool) -> Vec<TraceSpec> {
    let line = LineSpec {
        color: Some(fixed_color(&layer.color)),
        width: Some(layer.line.width),
        ..LineSpec::default()
    };
    let trace = TraceSpec::new(TraceKind::Scatter)
        .xy(tree.x.clone(), tree.y.clone())
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
    use std::sync::Arc;

    #[test]
    fn test_single_polyline() {
        let layer = LayerState::new(1, Arc::new(DataTable::new("tree"))).with_color("0.35").with_alpha(0.8);
        let tree = TreeLayout::new(vec![0.0, 0.0, 1.0, f64::NAN], vec![0.0, 1.0, 1.0, f64::NAN]).unwrap();
        let traces = traces_for_layer(&layer, &tree, false);
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].mode.as_deref(), Some("lines"));
        assert_eq!(traces[0].line.as_ref().unwrap().color.as_deref(), Some("gray"));
        assert_eq!(traces[0].opacity, Some(0.8));
        assert_eq!(traces[0].point_count(), 4);
    }

    #[test]
    fn test_layout_lengths() {
        assert!(TreeLayout::new(vec![0.0], vec![]).is_err());
    }
}
