//! Trace builders, one module per chart family.
//!
//! Every builder is a pure function of the viewer snapshot, one layer and
//! (where the chart needs it) precomputed data such as histogram bins. All
//! traces derived from one layer carry the layer's legend group so the
//! legend shows a single entry per layer.

pub mod dendrogram;
pub mod dotplot;
pub mod histogram;
pub mod image;
pub mod profile;
pub mod scatter2d;
pub mod scatter3d;
pub mod vectors;
pub mod volume;

use crate::error::Result;
use crate::schema::TraceSpec;
use crate::state::LayerState;

/// Trace name of a layer, suffixed with `" (parent)"` for subsets when the
/// figure shows more than one dataset.
#[must_use]
pub fn layer_name(layer: &LayerState, add_data_label: bool) -> String {
    match layer.data.parent_label() {
        Some(parent) if add_data_label => format!("{} ({parent})", layer.label()),
        _ => layer.label().to_string(),
    }
}

/// Swallow a layer-local build failure so the layer contributes no traces.
///
/// # Errors
///
/// Propagates every error that is not layer-local.
pub fn skip_layer_local(layer: &LayerState, built: Result<Vec<TraceSpec>>) -> Result<Vec<TraceSpec>> {
    match built {
        Ok(traces) => {
            tracing::debug!(layer = layer.label(), traces = traces.len(), "built layer traces");
            Ok(traces)
        }
        Err(err) if err.is_layer_local() => {
            tracing::warn!(layer = layer.label(), error = %err, "skipping layer");
            Ok(Vec::new())
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::error::Error;
    use std::sync::Arc;

    #[test]
    fn test_layer_name_suffix_only_for_subsets() {
        let subset = LayerState::new(1, Arc::new(DataTable::subset("bright", "stars")));
        assert_eq!(layer_name(&subset, true), "bright (stars)");
        assert_eq!(layer_name(&subset, false), "bright");
        let data = LayerState::new(2, Arc::new(DataTable::new("stars")));
        assert_eq!(layer_name(&data, true), "stars");
    }

    #[test]
    fn test_skip_layer_local() {
        let layer = LayerState::new(1, Arc::new(DataTable::new("d")));
        assert!(skip_layer_local(&layer, Err(Error::EmptyData)).unwrap().is_empty());
        assert!(skip_layer_local(&layer, Err(Error::IncompatibleAttribute("q".into()))).unwrap().is_empty());
        let shape = Error::ShapeMismatch { expected: vec![1], found: vec![2] };
        assert!(skip_layer_local(&layer, Err(shape)).is_err());
    }
}
