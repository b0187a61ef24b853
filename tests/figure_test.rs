//! End-to-end figure synthesis through the public API.
//!
//! Run: cargo test --test figure_test

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use approx::assert_relative_eq;

use trueno_plotspec::axis::AxisBuilder;
use trueno_plotspec::layout::angle_ticks_text;
use trueno_plotspec::prelude::*;
use trueno_plotspec::schema::{ColorSpec, SizeSpec};
use trueno_plotspec::state::{Axis, LinearSize, SizeMode};

// ============================================================================
// Fixtures
// ============================================================================

fn stars() -> Arc<DataTable> {
    Arc::new(
        DataTable::new("stars")
            .with_numeric("x", &[1.0, f64::NAN, 3.0])
            .with_numeric("y", &[1.0, 2.0, 3.0])
            .with_numeric("mass", &[0.0, 5.0, 10.0]),
    )
}

fn viewer() -> ViewerState {
    ViewerState::rectilinear(AxisState::new("x", 0.0, 4.0), AxisState::new("y", 0.0, 4.0))
}

fn linear_layer() -> LayerState {
    LayerState::new(1, stars())
        .with_color_mode(ColorMode::linear("mass", Colormap::viridis(), 0.0, 10.0))
        .with_size(SizeConfig {
            mode: SizeMode::Linear(LinearSize { attribute: "mass".into(), vmin: 0.0, vmax: 10.0 }),
            ..SizeConfig::default()
        })
}

// ============================================================================
// Scatter
// ============================================================================

#[test]
fn test_nan_row_is_dropped_everywhere() {
    let fig = scatter2d_figure(&viewer(), &[linear_layer()], &StyleContext::light(), CanvasSize::default())
        .unwrap();
    let main = fig.data.last().unwrap();
    assert_eq!(main.x.as_ref().unwrap(), &vec![1.0, 3.0]);
    assert_eq!(main.y.as_ref().unwrap(), &vec![1.0, 3.0]);

    let marker = main.marker.as_ref().unwrap();
    let Some(ColorSpec::PerPoint(colors)) = &marker.color else { panic!("expected per-point colors") };
    assert_eq!(colors.len(), 2);
    let Some(SizeSpec::PerPoint(sizes)) = &marker.size else { panic!("expected per-point sizes") };
    assert_eq!(sizes.len(), 2);
    // Survivors are rows 0 and 2: the lightest and heaviest.
    assert!(sizes[0] < sizes[1]);
    assert_relative_eq!(sizes[1], 30.0);
}

#[test]
fn test_hidden_layers_are_not_exported() {
    let mut hidden = linear_layer();
    hidden.visible = false;
    let fig = scatter2d_figure(&viewer(), &[hidden], &StyleContext::light(), CanvasSize::default()).unwrap();
    assert!(fig.data.is_empty());
    assert!(fig.layout.xaxis.is_some());
}

#[test]
fn test_subset_names_carry_parent_with_two_datasets() {
    let subset = Arc::new(
        DataTable::subset("bright", "stars").with_numeric("x", &[1.0]).with_numeric("y", &[1.0]),
    );
    let gas = Arc::new(DataTable::new("gas").with_numeric("x", &[2.0]).with_numeric("y", &[2.0]));
    let layers = vec![LayerState::new(1, subset), LayerState::new(2, gas).with_zorder(1)];
    let fig = scatter2d_figure(&viewer(), &layers, &StyleContext::light(), CanvasSize::default()).unwrap();
    let names: Vec<_> = fig.data.iter().filter_map(|t| t.name.as_deref()).collect();
    assert_eq!(names, vec!["bright (stars)", "gas"]);
}

// ============================================================================
// Histogram / Dotplot
// ============================================================================

#[test]
fn test_histogram_log_and_linear() {
    let hist = Histogram::new(vec![0.0, 1.0, 2.0, 3.0], vec![2.0, 5.0, 1.0]).unwrap();
    let layers = vec![(LayerState::new(1, stars()), hist)];
    let style = StyleContext::light();

    let mut log_viewer = viewer();
    log_viewer.axes.x = AxisState::new("x", 1.0, 3.0).log(true);
    let log = histogram_figure(&log_viewer, &layers, &style, CanvasSize::default());
    assert_eq!(log.data.len(), 3);
    for (i, trace) in log.data.iter().enumerate() {
        assert_eq!(trace.width.as_ref().unwrap(), &vec![1.0]);
        assert_eq!(trace.showlegend, Some(i == 0));
        assert_eq!(trace.legendgroup, log.data[0].legendgroup);
    }

    let linear = histogram_figure(&viewer(), &layers, &style, CanvasSize::default());
    assert_eq!(linear.data.len(), 1);
    assert_eq!(linear.data[0].x.as_ref().unwrap(), &vec![0.5, 1.5, 2.5]);
    assert_eq!(linear.data[0].y.as_ref().unwrap(), &vec![2.0, 5.0, 1.0]);
    assert_eq!(linear.layout.bargap, Some(0.0));
}

#[test]
fn test_dotplot_stacks_per_bin() {
    let hist = Histogram::new(vec![0.0, 10.0, 20.0], vec![3.0, 2.0]).unwrap();
    let layers = vec![(LayerState::new(1, stars()), hist)];
    let mut v = viewer();
    v.axes.x = AxisState::new("x", 0.0, 20.0);
    let fig = dotplot_figure(&v, &layers, &StyleContext::light(), CanvasSize::new(800.0, 600.0));
    let trace = &fig.data[0];
    assert_eq!(trace.y.as_ref().unwrap(), &vec![1.0, 2.0, 3.0, 1.0, 2.0]);
    assert_eq!(trace.x.as_ref().unwrap(), &vec![5.0, 5.0, 5.0, 15.0, 15.0]);
}

// ============================================================================
// Axes
// ============================================================================

#[test]
fn test_log_axis_range_and_decade_ticks() {
    let mut v = viewer();
    v.axes.x = AxisState::new("x", 10.0, 1000.0).log(true);
    let style = StyleContext::light();
    let spec = AxisBuilder::new(&v, &style).rectilinear(Axis::X);
    let range = spec.range.unwrap();
    assert_relative_eq!(range[0], 1.0);
    assert_relative_eq!(range[1], 3.0);
    assert_eq!(spec.dtick, Some(1.0));
    assert_eq!(spec.axis_type.as_deref(), Some("log"));
}

#[test]
fn test_geo_tick_text_in_radians() {
    assert_eq!(
        angle_ticks_text(&[-30.0, -15.0, 0.0, 45.0, 90.0], false),
        vec!["-π/6", "-π/12", "0", "π/4", "π/2"]
    );
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn test_json_document() {
    let fig = scatter2d_figure(&viewer(), &[linear_layer()], &StyleContext::dark(), CanvasSize::new(600.0, 300.0))
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&fig.to_json().unwrap()).unwrap();
    assert_eq!(json["data"][0]["type"], "scatter");
    assert_eq!(json["layout"]["width"], 1200.0);
    assert_eq!(json["layout"]["height"], 600.0);
    assert!(json["layout"].get("scene").is_none());
}
