//! Figure assembly: every exported layer's traces plus the matching layout.
//!
//! Each `*_figure` function selects the layers to export (visible, enabled,
//! in zorder), runs the chart family's trace builder on each, and pairs the
//! result with the layout for the viewer. A layer the builder rejects as
//! incompatible or empty is logged and left out; it never aborts the figure.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::Result;
use crate::layout::{graticule_traces, LayoutBuilder};
use crate::sampling::VolumeSampler;
use crate::schema::{LayoutSpec, TraceSpec};
use crate::state::{CanvasSize, LayerState, Projection, ViewerState};
use crate::style::StyleContext;
use crate::traces::dendrogram::{self, TreeLayout};
use crate::traces::histogram::{self, Histogram};
use crate::traces::image::{self, ImageScene};
use crate::traces::profile::{self, Profile};
use crate::traces::volume::{self, VolumeLayer, VolumeOptions};
use crate::traces::{dotplot, scatter2d, scatter3d, skip_layer_local};

/// A complete chart document.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Figure {
    /// Traces in draw order.
    pub data: Vec<TraceSpec>,
    /// Chart-wide layout.
    pub layout: LayoutSpec,
}

impl Figure {
    /// Pair traces with a layout.
    #[must_use]
    pub fn new(data: Vec<TraceSpec>, layout: LayoutSpec) -> Self {
        Self { data, layout }
    }

    /// Compact JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Serialize`] if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Items whose layer is visible and enabled, sorted by zorder.
///
/// The sort is stable, so layers sharing a zorder keep their input order.
pub fn exported<'a, T>(items: &'a [T], layer: impl Fn(&T) -> &LayerState) -> Vec<&'a T> {
    let mut kept: Vec<&T> = items.iter().filter(|item| layer(item).is_exported()).collect();
    kept.sort_by_key(|item| layer(item).zorder);
    kept
}

/// Visible, enabled layers in zorder.
#[must_use]
pub fn layers_to_export(layers: &[LayerState]) -> Vec<&LayerState> {
    exported(layers, |l| l)
}

/// Number of distinct datasets among `layers`; a subset counts as its
/// parent.
pub fn data_count<'a>(layers: impl IntoIterator<Item = &'a LayerState>) -> usize {
    layers.into_iter().map(|l| l.data.dataset_label()).collect::<BTreeSet<_>>().len()
}

/// Whether subset names need their parent's label: true once more than one
/// dataset is on show.
pub fn add_data_label<'a>(layers: impl IntoIterator<Item = &'a LayerState>) -> bool {
    data_count(layers) > 1
}

/// 2D scatter chart in the viewer's projection.
///
/// Geographic viewers also get the synthesized graticule labels.
///
/// # Errors
///
/// Propagates errors that are not local to one layer.
pub fn scatter2d_figure(
    viewer: &ViewerState,
    layers: &[LayerState],
    style: &StyleContext,
    canvas: CanvasSize,
) -> Result<Figure> {
    let layers = layers_to_export(layers);
    let add = add_data_label(layers.iter().copied());
    let mut data = Vec::new();
    for layer in layers {
        data.extend(skip_layer_local(layer, scatter2d::traces_for_layer(viewer, layer, canvas, add))?);
    }
    if matches!(viewer.projection, Projection::Geographic(_)) {
        data.extend(graticule_traces(viewer));
    }
    Ok(Figure::new(data, LayoutBuilder::new(viewer, style, canvas).for_viewer()))
}

/// 3D scatter chart.
///
/// # Errors
///
/// Propagates errors that are not local to one layer.
pub fn scatter3d_figure(
    viewer: &ViewerState,
    layers: &[LayerState],
    style: &StyleContext,
    canvas: CanvasSize,
) -> Result<Figure> {
    let layers = layers_to_export(layers);
    let add = add_data_label(layers.iter().copied());
    let mut data = Vec::new();
    for layer in layers {
        data.extend(skip_layer_local(layer, scatter3d::traces_for_layer(viewer, layer, style, add))?);
    }
    Ok(Figure::new(data, LayoutBuilder::new(viewer, style, canvas).scene()))
}

/// Overlaid histogram bars.
#[must_use]
pub fn histogram_figure(
    viewer: &ViewerState,
    layers: &[(LayerState, Histogram)],
    style: &StyleContext,
    canvas: CanvasSize,
) -> Figure {
    let layers = exported(layers, |(l, _)| l);
    let add = add_data_label(layers.iter().map(|(l, _)| l));
    let data = layers
        .into_iter()
        .flat_map(|(layer, hist)| histogram::traces_for_layer(viewer, layer, hist, add))
        .collect();
    Figure::new(data, LayoutBuilder::new(viewer, style, canvas).histogram())
}

/// Stacked-dot histogram.
#[must_use]
pub fn dotplot_figure(
    viewer: &ViewerState,
    layers: &[(LayerState, Histogram)],
    style: &StyleContext,
    canvas: CanvasSize,
) -> Figure {
    let layers = exported(layers, |(l, _)| l);
    let add = add_data_label(layers.iter().map(|(l, _)| l));
    let data = layers
        .into_iter()
        .flat_map(|(layer, hist)| dotplot::traces_for_layer(viewer, layer, hist, canvas, add))
        .collect();
    Figure::new(data, LayoutBuilder::new(viewer, style, canvas).rectilinear())
}

/// Profile lines.
#[must_use]
pub fn profile_figure(
    viewer: &ViewerState,
    layers: &[(LayerState, Profile)],
    style: &StyleContext,
    canvas: CanvasSize,
) -> Figure {
    let layers = exported(layers, |(l, _)| l);
    let add = add_data_label(layers.iter().map(|(l, _)| l));
    let data = layers
        .into_iter()
        .flat_map(|(layer, p)| profile::traces_for_layer(viewer, layer, p, add))
        .collect();
    Figure::new(data, LayoutBuilder::new(viewer, style, canvas).rectilinear())
}

/// Dendrogram polylines with a hidden x axis.
#[must_use]
pub fn dendrogram_figure(
    viewer: &ViewerState,
    layers: &[(LayerState, TreeLayout)],
    style: &StyleContext,
    canvas: CanvasSize,
) -> Figure {
    let layers = exported(layers, |(l, _)| l);
    let add = add_data_label(layers.iter().map(|(l, _)| l));
    let data = layers
        .into_iter()
        .flat_map(|(layer, tree)| dendrogram::traces_for_layer(layer, tree, add))
        .collect();
    Figure::new(data, LayoutBuilder::new(viewer, style, canvas).dendrogram())
}

/// Image viewer: images, subset overlays, scatter overlays and secondary
/// axes.
///
/// # Errors
///
/// Propagates errors that are not local to one layer.
pub fn image_figure(
    viewer: &ViewerState,
    scene: &ImageScene,
    style: &StyleContext,
    canvas: CanvasSize,
) -> Result<Figure> {
    let all = scene
        .images
        .iter()
        .map(|i| &i.layer)
        .chain(scene.subsets.iter().map(image::SubsetOverlay::layer))
        .chain(scene.scatters.iter())
        .filter(|l| l.is_exported());
    let data = image::traces(viewer, scene, add_data_label(all))?;
    let layout = LayoutBuilder::new(viewer, style, canvas).image(
        scene.background_color(),
        scene.secondary_x.as_ref(),
        scene.secondary_y.as_ref(),
    );
    Ok(Figure::new(data, layout))
}

/// Isosurface rendering of volume layers on the viewer's sampling grid.
///
/// # Errors
///
/// Propagates errors that are not local to one layer, such as a cube
/// rasterized on a different grid.
pub fn volume_figure(
    viewer: &ViewerState,
    layers: &[VolumeLayer],
    style: &StyleContext,
    canvas: CanvasSize,
    options: VolumeOptions,
) -> Result<Figure> {
    let sampler = VolumeSampler::new(viewer);
    let layers = exported(layers, |v| &v.layer);
    let add = add_data_label(layers.iter().map(|v| &v.layer));
    let mut data = Vec::new();
    for vol in layers {
        let built = volume::traces_for_layer(viewer, vol, &sampler, style, options, add);
        data.extend(skip_layer_local(&vol.layer, built)?);
    }
    Ok(Figure::new(data, LayoutBuilder::new(viewer, style, canvas).scene()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;
    use crate::schema::TraceKind;
    use crate::state::{AxisState, GeoProjection};
    use std::sync::Arc;

    fn table() -> Arc<DataTable> {
        Arc::new(DataTable::new("stars").with_numeric("x", &[1.0, 2.0]).with_numeric("y", &[3.0, 4.0]))
    }

    fn viewer() -> ViewerState {
        ViewerState::rectilinear(AxisState::new("x", 0.0, 5.0), AxisState::new("y", 0.0, 5.0))
    }

    #[test]
    fn test_layers_to_export_filters_and_sorts() {
        let mut hidden = LayerState::new(3, table()).with_zorder(0);
        hidden.visible = false;
        let mut disabled = LayerState::new(4, table()).with_zorder(0);
        disabled.enabled = false;
        let layers = vec![
            LayerState::new(1, table()).with_zorder(2),
            hidden,
            LayerState::new(2, table()).with_zorder(1),
            disabled,
        ];
        let ids: Vec<u64> = layers_to_export(&layers).iter().map(|l| l.id.0).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_data_count_folds_subsets() {
        let layers = vec![
            LayerState::new(1, table()),
            LayerState::new(2, Arc::new(DataTable::subset("bright", "stars"))),
        ];
        assert_eq!(data_count(&layers), 1);
        assert!(!add_data_label(&layers));

        let more = vec![LayerState::new(1, table()), LayerState::new(2, Arc::new(DataTable::new("gas")))];
        assert!(add_data_label(&more));
    }

    #[test]
    fn test_incompatible_layer_is_skipped() {
        let layers = vec![
            LayerState::new(1, table()),
            LayerState::new(2, Arc::new(DataTable::new("empty"))),
        ];
        let fig = scatter2d_figure(&viewer(), &layers, &StyleContext::light(), CanvasSize::default()).unwrap();
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.data[0].name.as_deref(), Some("stars"));
        assert!(fig.layout.xaxis.is_some());
    }

    #[test]
    fn test_geographic_figure_appends_graticule() {
        let viewer = viewer().with_projection(Projection::Geographic(GeoProjection::Mollweide));
        let layers = vec![LayerState::new(1, table())];
        let fig = scatter2d_figure(&viewer, &layers, &StyleContext::light(), CanvasSize::default()).unwrap();
        assert_eq!(fig.data[0].kind, TraceKind::Scattergeo);
        assert!(fig.data.len() > 1);
        assert!(fig.layout.geo.is_some());
    }

    #[test]
    fn test_histogram_figure() {
        let layers = vec![(LayerState::new(1, table()), Histogram::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0]).unwrap())];
        let fig = histogram_figure(&viewer(), &layers, &StyleContext::light(), CanvasSize::default());
        assert_eq!(fig.data.len(), 1);
        assert_eq!(fig.layout.barmode.as_deref(), Some("overlay"));
    }

    #[test]
    fn test_figure_json_has_data_and_layout() {
        let fig = Figure::new(vec![TraceSpec::new(TraceKind::Scatter).xy(vec![f64::NAN], vec![1.0])], LayoutSpec::default());
        let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
        assert_eq!(json["data"][0]["type"], "scatter");
        assert!(json["data"][0]["x"][0].is_null());
        assert_eq!(json["layout"], serde_json::json!({}));
        assert!(fig.to_json_pretty().unwrap().contains('\n'));
    }
}
