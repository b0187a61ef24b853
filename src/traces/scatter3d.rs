//! 3D scatter with error bars and cone vector fields.
//!
//! 3D markers are not clipped by the scene, so points outside the
//! displayed box are masked out together with every co-dependent channel.

use std::str::FromStr;

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::resolve::{color_info, hover_info, size_info, HoverInfo, SCATTER_BASE_SIZE};
use crate::sanitize::{sanitize_values, Mask};
use crate::schema::{ColorSpec, ErrorBar, Marker, MarkerLine, TraceKind, TraceSpec};
use crate::state::{Axis, ColorMode, ColoringStrategy, LayerState, SizeMode, VectorConfig, ViewerState};
use crate::style::StyleContext;
use crate::traces::layer_name;

/// Mask of rows with finite positions (and color/size values) inside the
/// viewer's bounding box.
///
/// # Errors
///
/// Returns [`Error::IncompatibleAttribute`] when an attribute is missing.
pub fn visible_mask(viewer: &ViewerState, layer: &LayerState) -> Result<Mask> {
    let mut arrays = Vec::with_capacity(5);
    for axis in Axis::ALL {
        arrays.push(layer.data.numeric(&viewer.axis(axis).attribute)?);
    }
    if let ColorMode::Linear(linear) = &layer.color_mode {
        arrays.push(layer.data.numeric(&linear.attribute)?);
    }
    if let SizeMode::Linear(linear) = &layer.size.mode {
        arrays.push(layer.data.numeric(&linear.attribute)?);
    }
    let (mut mask, _) = sanitize_values(&arrays)?;
    let clip = viewer.bounding_box().mask(arrays[0], arrays[1], arrays[2])?;
    mask.and(&clip)?;
    Ok(mask)
}

/// Traces for one layer of a 3D scatter viewer: the marker trace followed
/// by its cones, if any.
///
/// # Errors
///
/// Returns [`Error::IncompatibleAttribute`] when an attribute is missing
/// (including a vector field without a third component) and
/// [`Error::EmptyData`] when no point lies inside the box.
pub fn traces_for_layer(
    viewer: &ViewerState,
    layer: &LayerState,
    style: &StyleContext,
    add_data_label: bool,
) -> Result<Vec<TraceSpec>> {
    let mask = visible_mask(viewer, layer)?;
    if mask.count() == 0 {
        return Err(Error::EmptyData);
    }
    let x = mask.apply(layer.data.numeric(&viewer.axes.x.attribute)?)?;
    let y = mask.apply(layer.data.numeric(&viewer.axes.y.attribute)?)?;
    let z = mask.apply(layer.data.numeric(&viewer.axes.z.attribute)?)?;

    let colors = color_info(layer, &mask)?;
    let marker = Marker {
        color: Some(colors.clone()),
        size: Some(size_info(layer, &mask, SCATTER_BASE_SIZE)?),
        opacity: Some(layer.alpha),
        symbol: Some(layer.geometry.symbol().to_string()),
        line: Some(MarkerLine { width: 0.0, color: None }),
    };
    let hover = hover_info(layer, &mask)?;
    let group = layer.legend_group();

    let error_color = (!layer.color_mode.is_fixed()).then(|| style.foreground.clone());
    let mut bars = [None, None, None];
    for (slot, axis) in bars.iter_mut().zip(Axis::ALL) {
        if let Some(attribute) = layer.errors[axis].active() {
            let values = mask.apply(layer.data.numeric(attribute)?)?;
            let magnitudes = values.into_iter().map(f64::abs).collect();
            *slot = Some(ErrorBar::data(magnitudes, error_color.clone().or_else(|| colors.at(0).map(str::to_string))));
        }
    }
    let [error_x, error_y, error_z] = bars;

    let mut scatter = TraceSpec::new(TraceKind::Scatter3d)
        .xyz(x.clone(), y.clone(), z.clone())
        .mode("markers")
        .name(layer_name(layer, add_data_label))
        .marker(marker)
        .legend(&group, true);
    scatter.hoverinfo = Some(hover.hoverinfo.clone());
    scatter.hovertext = hover.hovertext.clone();
    let mut traces = vec![TraceSpec { error_x, error_y, error_z, ..scatter }];

    if let Some(config) = layer.active_vectors() {
        traces.extend(cone_traces(layer, config, &mask, [&x, &y, &z], &colors, &hover)?);
    }
    Ok(traces)
}

/// Cone traces for a layer's 3D vector field.
///
/// Batch coloring yields one cone trace with a flat colorscale in the
/// layer color; per-point coloring one cone trace per point.
///
/// # Errors
///
/// Returns [`Error::IncompatibleAttribute`] when a component attribute is
/// missing or the field has no third component.
pub fn cone_traces(
    layer: &LayerState,
    config: &VectorConfig,
    mask: &Mask,
    positions: [&[f64]; 3],
    colors: &ColorSpec,
    hover: &HoverInfo,
) -> Result<Vec<TraceSpec>> {
    let vz = config
        .vz
        .as_deref()
        .ok_or_else(|| Error::IncompatibleAttribute("vector field has no z component".to_string()))?;
    let component = |attribute: &str| -> Result<Vec<f64>> {
        Ok(mask.apply(layer.data.numeric(attribute)?)?.into_iter().map(|v| v * config.scaling).collect())
    };
    let (u, v, w) = (component(&config.vx)?, component(&config.vy)?, component(vz)?);
    let [x, y, z] = positions;

    let name = format!("{} cones", layer.label());
    let group = layer.legend_group();
    let cone = |range: std::ops::Range<usize>, color: &str, sizemode: &str| {
        let flat = rgb_color(color);
        TraceSpec {
            u: Some(u[range.clone()].to_vec()),
            v: Some(v[range.clone()].to_vec()),
            w: Some(w[range.clone()].to_vec()),
            colorscale: Some(vec![(0.0, flat.clone()), (1.0, flat)]),
            showscale: Some(false),
            anchor: Some(config.anchor.cone_anchor().to_string()),
            sizemode: Some(sizemode.to_string()),
            sizeref: Some(1.0),
            hoverinfo: Some(hover.hoverinfo.clone()),
            hovertext: hover.hovertext.as_ref().map(|t| t[range.clone()].to_vec()),
            ..TraceSpec::new(TraceKind::Cone)
                .xyz(x[range.clone()].to_vec(), y[range.clone()].to_vec(), z[range.clone()].to_vec())
                .name(name.clone())
                .legend(&group, false)
        }
    };

    match layer.coloring() {
        ColoringStrategy::Batch => Ok(vec![cone(0..x.len(), colors.at(0).unwrap_or("gray"), "absolute")]),
        ColoringStrategy::PerPoint => {
            Ok((0..x.len()).map(|i| cone(i..i + 1, colors.at(i).unwrap_or("gray"), "scaled")).collect())
        }
    }
}

/// `rgb(...)` form of a color the cone colorscale can interpolate; named
/// colors pass through untouched.
fn rgb_color(color: &str) -> String {
    Rgba::from_str(color).map_or_else(|_| color.to_string(), Rgba::to_css_rgb)
}
