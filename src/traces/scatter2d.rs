//! 2D scatter: markers, connecting lines, error bars and vector fields.
//!
//! Rectilinear viewers get `scatter` traces; polar and geographic viewers
//! get `scatterpolar` and `scattergeo` traces over the same sanitized
//! positions. Secondary primitives follow the layer's
//! [`ColoringStrategy`]: a batch primitive when the color is fixed, one
//! primitive per point (or per segment) otherwise.

use crate::error::Result;
use crate::resolve::{color_info, hover_info, size_info, HoverInfo, SCATTER_BASE_SIZE};
use crate::sanitize::{sanitize_values, Mask};
use crate::schema::{ColorSpec, ErrorBar, LineSpec, Marker, MarkerLine, TraceKind, TraceSpec};
use crate::state::{Axis, CanvasSize, ColoringStrategy, LayerState, Projection, ViewerState};
use crate::traces::layer_name;
use crate::traces::vectors::{draws_vectors, quiver_traces};

/// Transparent fill of hollow markers.
const HOLLOW_FILL: &str = "rgba(0,0,0,0)";

/// Marker for the selected points of `layer`.
///
/// Filled markers have no outline; hollow markers are transparent with a
/// 1px outline in the resolved color.
///
/// # Errors
///
/// Propagates color and size resolution failures.
pub fn marker(layer: &LayerState, mask: &Mask, colors: &ColorSpec, base_size: f64) -> Result<Marker> {
    let size = size_info(layer, mask, base_size)?;
    let (color, line) = if layer.fill {
        (colors.clone(), MarkerLine { width: 0.0, color: None })
    } else {
        (ColorSpec::from(HOLLOW_FILL), MarkerLine { width: 1.0, color: Some(colors.clone()) })
    };
    Ok(Marker {
        color: Some(color),
        size: Some(size),
        opacity: Some(layer.alpha),
        symbol: None,
        line: Some(line),
    })
}

/// Traces for one layer of a 2D scatter viewer.
///
/// Order: vectors, line segments, per-point error bars, then the main
/// marker trace, so markers draw on top.
///
/// # Errors
///
/// Returns [`crate::Error::IncompatibleAttribute`] when a position, color,
/// size, error or vector attribute is missing, and
/// [`crate::Error::EmptyData`] when no point survives sanitization.
pub fn traces_for_layer(
    viewer: &ViewerState,
    layer: &LayerState,
    canvas: CanvasSize,
    add_data_label: bool,
) -> Result<Vec<TraceSpec>> {
    let x_raw = layer.data.numeric(&viewer.axes.x.attribute)?;
    let y_raw = layer.data.numeric(&viewer.axes.y.attribute)?;
    let (mask, mut xy) = sanitize_values(&[x_raw, y_raw])?;
    if mask.count() == 0 {
        return Err(crate::Error::EmptyData);
    }
    let (y, x) = (xy.pop().unwrap_or_default(), xy.pop().unwrap_or_default());

    let colors = color_info(layer, &mask)?;
    let marker = marker(layer, &mask, &colors, SCATTER_BASE_SIZE)?;
    let hover = hover_info(layer, &mask)?;
    let group = layer.legend_group();
    let strategy = layer.coloring();
    let rectilinear = viewer.is_rectilinear();

    let mut traces = Vec::new();

    if let Some(config) = layer.active_vectors().filter(|c| draws_vectors(viewer, c)) {
        traces.extend(quiver_traces(viewer, canvas, layer, config, &mask, (&x, &y), &colors)?);
    }

    let line = layer.line.visible.then(|| LineSpec {
        dash: Some(layer.line.style.dash().to_string()),
        width: Some(layer.line.width),
        ..LineSpec::default()
    });
    if let (Some(line), ColoringStrategy::PerPoint) = (&line, strategy) {
        traces.extend(line_segments(&x, &y, line, &colors, &group));
    }

    let mut errors = [None, None];
    if rectilinear {
        for (slot, axis) in errors.iter_mut().zip([Axis::X, Axis::Y]) {
            if let Some(attribute) = layer.errors[axis].active() {
                *slot = Some(mask.apply(layer.data.numeric(attribute)?)?);
            }
        }
        if strategy == ColoringStrategy::PerPoint {
            for (values, axis) in errors.iter().zip([Axis::X, Axis::Y]) {
                if let Some(values) = values {
                    traces.extend(per_point_error_bars(&x, &y, axis, values, &colors, &group));
                }
            }
        }
    }

    let mut main = TraceSpec::new(TraceKind::Scatter).name(layer_name(layer, add_data_label)).marker(marker);
    main.legendgroup = Some(group);
    main = with_hover(main, hover);
    main = match (line, strategy) {
        (Some(mut line), ColoringStrategy::Batch) => {
            line.color = colors.at(0).map(str::to_string);
            main.mode("lines+markers").line(line)
        }
        _ => main.mode("markers"),
    };

    let main = match viewer.projection {
        Projection::Polar => TraceSpec {
            kind: TraceKind::Scatterpolar,
            theta: Some(x),
            r: Some(y),
            thetaunit: Some(viewer.angle_unit.schema_name().to_string()),
            ..main
        },
        Projection::Geographic(_) => {
            let degrees = viewer.using_degrees();
            let to_degrees = |v: Vec<f64>| if degrees { v } else { v.into_iter().map(f64::to_degrees).collect() };
            TraceSpec { kind: TraceKind::Scattergeo, lon: Some(to_degrees(x)), lat: Some(to_degrees(y)), ..main }
        }
        Projection::Rectilinear | Projection::Scene3d => {
            let [error_x, error_y] = errors;
            let batch_bar = |values: Option<Vec<f64>>| {
                values.filter(|_| strategy == ColoringStrategy::Batch).map(|v| ErrorBar::data(v, colors.at(0).map(str::to_string)))
            };
            TraceSpec { error_x: batch_bar(error_x), error_y: batch_bar(error_y), ..main.xy(x, y) }
        }
    };
    traces.push(main);
    Ok(traces)
}

fn with_hover(mut trace: TraceSpec, hover: HoverInfo) -> TraceSpec {
    trace.hoverinfo = Some(hover.hoverinfo);
    trace.hovertext = hover.hovertext;
    trace
}

/// Two-point segments between consecutive points, segment `i` colored like
/// point `i`.
#[must_use]
pub fn line_segments(x: &[f64], y: &[f64], line: &LineSpec, colors: &ColorSpec, group: &str) -> Vec<TraceSpec> {
    (1..x.len().min(y.len()))
        .map(|i| {
            let line = LineSpec { color: colors.at(i - 1).map(str::to_string), ..line.clone() };
            TraceSpec::new(TraceKind::Scatter)
                .xy(vec![x[i - 1], x[i]], vec![y[i - 1], y[i]])
                .mode("lines")
                .line(line)
                .legend(group, false)
                .skip_hover()
        })
        .collect()
}

/// One single-point trace per error bar, each in its point's color.
#[must_use]
pub fn per_point_error_bars(
    x: &[f64],
    y: &[f64],
    axis: Axis,
    values: &[f64],
    colors: &ColorSpec,
    group: &str,
) -> Vec<TraceSpec> {
    x.iter()
        .zip(y)
        .zip(values)
        .enumerate()
        .map(|(i, ((&px, &py), &err))| {
            let color = colors.at(i).map(str::to_string);
            let bar = Some(ErrorBar::data(vec![err], color.clone()));
            let marker = Marker { color: color.map(ColorSpec::Single), ..Marker::default() };
            let trace = TraceSpec::new(TraceKind::Scatter)
                .xy(vec![px], vec![py])
                .mode("markers")
                .marker(marker)
                .legend(group, false)
                .skip_hover();
            match axis {
                Axis::X => TraceSpec { error_x: bar, ..trace },
                _ => TraceSpec { error_y: bar, ..trace },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Column, DataTable};
    use crate::error::Error;
    use crate::scale::Colormap;
    use crate::schema::SizeSpec;
    use crate::state::{AngleUnit, AxisState, ColorMode, GeoProjection, LineConfig, VectorConfig};
    use approx::assert_relative_eq;
    use std::sync::Arc;

    fn viewer() -> ViewerState {
        ViewerState::rectilinear(AxisState::new("x", 0.0, 10.0), AxisState::new("y", 0.0, 10.0))
    }

    fn data() -> DataTable {
        DataTable::new("points")
            .with_numeric("x", &[1.0, f64::NAN, 3.0])
            .with_numeric("y", &[4.0, 5.0, 6.0])
            .with_numeric("c", &[0.0, 0.5, 1.0])
            .with_numeric("e", &[0.1, 0.2, 0.3])
            .with_column("name", Column::text(["a", "b", "c"]))
    }

    fn layer() -> LayerState {
        LayerState::new(3, Arc::new(data())).with_color("#ff0000")
    }

    #[test]
    fn test_nan_row_dropped_from_every_channel() {
        let layer = layer()
            .with_color_mode(ColorMode::linear("c", Colormap::gray(), 0.0, 1.0))
            .with_hover(["name"]);
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        let main = traces.last().unwrap();
        assert_eq!(main.x.as_ref().unwrap(), &vec![1.0, 3.0]);
        let marker = main.marker.as_ref().unwrap();
        assert_eq!(marker.color.as_ref().unwrap().per_point_len(), Some(2));
        assert_eq!(marker.color.as_ref().unwrap().at(1), Some("rgba(255,255,255,1)"));
        assert_eq!(main.hovertext.as_ref().unwrap(), &vec!["name: a<br>", "name: c<br>"]);
    }

    #[test]
    fn test_fixed_marker() {
        let traces = traces_for_layer(&viewer(), &layer(), CanvasSize::default(), false).unwrap();
        assert_eq!(traces.len(), 1);
        let main = &traces[0];
        assert_eq!(main.mode.as_deref(), Some("markers"));
        assert_eq!(main.name.as_deref(), Some("points"));
        assert_eq!(main.hoverinfo.as_deref(), Some("skip"));
        let marker = main.marker.as_ref().unwrap();
        assert_eq!(marker.size, Some(SizeSpec::Single(5.0)));
        assert_eq!(marker.line.as_ref().unwrap().width, 0.0);
    }

    #[test]
    fn test_hollow_marker_outline_carries_color() {
        let mut layer = layer();
        layer.fill = false;
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        let marker = traces[0].marker.as_ref().unwrap();
        assert_eq!(marker.color, Some(ColorSpec::from(HOLLOW_FILL)));
        let outline = marker.line.as_ref().unwrap();
        assert_relative_eq!(outline.width, 1.0);
        assert_eq!(outline.color, Some(ColorSpec::from("#ff0000")));
    }

    #[test]
    fn test_fixed_line_joins_markers() {
        let layer = layer().with_line(LineConfig { visible: true, ..LineConfig::default() });
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        assert_eq!(traces.len(), 1);
        assert_eq!(traces[0].mode.as_deref(), Some("lines+markers"));
        assert_eq!(traces[0].line.as_ref().unwrap().color.as_deref(), Some("#ff0000"));
    }

    #[test]
    fn test_per_point_line_fragments() {
        let layer = layer()
            .with_color_mode(ColorMode::linear("c", Colormap::gray(), 0.0, 1.0))
            .with_line(LineConfig { visible: true, ..LineConfig::default() });
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        // One segment for the two surviving points, then the markers.
        assert_eq!(traces.len(), 2);
        assert_eq!(traces[0].x.as_ref().unwrap(), &vec![1.0, 3.0]);
        assert_eq!(traces[0].showlegend, Some(false));
        assert_eq!(traces[0].legendgroup, traces[1].legendgroup);
        assert_eq!(traces[1].mode.as_deref(), Some("markers"));
    }

    #[test]
    fn test_batch_error_bars_on_main_trace() {
        let layer = layer().with_errors(Axis::Y, "e");
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        let bar = traces[0].error_y.as_ref().unwrap();
        assert_eq!(bar.array, vec![0.1, 0.3]);
        assert!(traces[0].error_x.is_none());
    }

    #[test]
    fn test_per_point_error_bars() {
        let layer = layer()
            .with_color_mode(ColorMode::linear("c", Colormap::gray(), 0.0, 1.0))
            .with_errors(Axis::X, "e");
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        assert_eq!(traces.len(), 3);
        assert_eq!(traces[1].error_x.as_ref().unwrap().array, vec![0.3]);
        assert_eq!(traces[1].error_x.as_ref().unwrap().color.as_deref(), Some("rgba(255,255,255,1)"));
        assert!(traces[2].error_x.is_none());
    }

    #[test]
    fn test_vectors_precede_markers() {
        let data = data().with_numeric("vx", &[1.0, 1.0, 1.0]).with_numeric("vy", &[0.0, 0.0, 0.0]);
        let layer = LayerState::new(1, Arc::new(data)).with_vectors(VectorConfig::new("vx", "vy"));
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), false).unwrap();
        assert_eq!(traces.len(), 3);
        assert_eq!(traces[0].name.as_deref(), Some("quiver"));
        assert_eq!(traces[2].kind, TraceKind::Scatter);
    }

    #[test]
    fn test_polar_trace() {
        let viewer = viewer().with_projection(Projection::Polar).with_angle_unit(AngleUnit::Radians);
        let traces = traces_for_layer(&viewer, &layer(), CanvasSize::default(), false).unwrap();
        let main = &traces[0];
        assert_eq!(main.kind, TraceKind::Scatterpolar);
        assert_eq!(main.theta.as_ref().unwrap(), &vec![1.0, 3.0]);
        assert_eq!(main.thetaunit.as_deref(), Some("radians"));
        assert!(main.x.is_none());
    }

    #[test]
    fn test_geographic_trace_converts_radians() {
        let viewer = viewer()
            .with_projection(Projection::Geographic(GeoProjection::Mollweide))
            .with_angle_unit(AngleUnit::Radians);
        let traces = traces_for_layer(&viewer, &layer(), CanvasSize::default(), false).unwrap();
        assert_eq!(traces[0].kind, TraceKind::Scattergeo);
        assert_relative_eq!(traces[0].lon.as_ref().unwrap()[0], 1.0_f64.to_degrees());
    }

    #[test]
    fn test_missing_attribute_and_empty_data() {
        let mut viewer = viewer();
        viewer.axes.x = AxisState::new("missing", 0.0, 1.0);
        assert!(matches!(traces_for_layer(&viewer, &layer(), CanvasSize::default(), false), Err(Error::IncompatibleAttribute(_))));

        let empty = DataTable::new("e").with_numeric("x", &[f64::NAN]).with_numeric("y", &[1.0]);
        let layer = LayerState::new(1, Arc::new(empty));
        assert!(matches!(traces_for_layer(&self::viewer(), &layer, CanvasSize::default(), false), Err(Error::EmptyData)));
    }

    #[test]
    fn test_subset_name_suffix() {
        let subset = DataTable::subset("bright", "points").with_numeric("x", &[1.0]).with_numeric("y", &[2.0]);
        let layer = LayerState::new(9, Arc::new(subset));
        let traces = traces_for_layer(&viewer(), &layer, CanvasSize::default(), true).unwrap();
        assert_eq!(traces[0].name.as_deref(), Some("bright (points)"));
    }
}
