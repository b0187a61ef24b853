//! Graticule for map projections.
//!
//! The map subplot has no native angle axes, so tick labels are emitted
//! as text traces along the equator and the prime meridian, and the axis
//! titles become paper annotations.

use crate::schema::{Annotation, Font, TraceKind, TraceSpec};
use crate::state::{Axis, ViewerState};
use crate::style::StyleContext;

/// Number of longitude and latitude tick labels.
pub const GRATICULE_TICKS: usize = 12;
/// Spacing of longitude ticks along the equator, in degrees.
pub const LON_TICK_STEP: f64 = 30.0;
/// Spacing of latitude ticks along the prime meridian, in degrees.
pub const LAT_TICK_STEP: f64 = 15.0;

fn gcd(mut a: i64, mut b: i64) -> i64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a.abs()
}

/// Largest power of ten tried when clearing decimals from a degree value.
const MAX_DECIMALS: i32 = 6;

/// `v` as an integer numerator over `180 * 10^k`, for the smallest `k` that
/// makes it whole.
fn degree_fraction(v: f64) -> Option<(i64, i64)> {
    (0..=MAX_DECIMALS).find_map(|k| {
        let scale = 10f64.powi(k);
        let scaled = v * scale;
        let num = scaled.round();
        ((scaled - num).abs() < 1e-9 * scale && num.abs() < 1e15).then(|| (num as i64, 180 * scale as i64))
    })
}

/// Tick text for angles given in degrees.
///
/// With `degrees` the text is `"v°"`; otherwise `v/180` is reduced to a
/// fraction of π (`-30` → `"-π/6"`, `90` → `"π/2"`, `22.5` → `"π/8"`,
/// `0` → `"0"`). Values with no short decimal form print as `"{v/180}π"`.
#[must_use]
pub fn angle_ticks_text(values: &[f64], degrees: bool) -> Vec<String> {
    values
        .iter()
        .map(|&v| {
            if degrees {
                return format!("{}°", crate::color::format_number(v));
            }
            let Some((num, den)) = degree_fraction(v) else {
                return format!("{}π", crate::color::format_number(v / 180.0));
            };
            if num == 0 {
                return "0".to_string();
            }
            let g = gcd(num, den);
            let (n, d) = (num / g, den / g);
            let head = match n {
                1 => "π".to_string(),
                -1 => "-π".to_string(),
                n => format!("{n}π"),
            };
            if d == 1 {
                head
            } else {
                format!("{head}/{d}")
            }
        })
        .collect()
}

/// Longitudes of the equator ticks.
#[must_use]
pub fn lon_ticks() -> Vec<f64> {
    (0..GRATICULE_TICKS).map(|i| -180.0 + LON_TICK_STEP * i as f64).collect()
}

/// Latitudes of the meridian ticks, centered on the equator
/// (`-82.5..=82.5`).
#[must_use]
pub fn lat_ticks() -> Vec<f64> {
    let first = -LAT_TICK_STEP * (GRATICULE_TICKS - 1) as f64 / 2.0;
    (0..GRATICULE_TICKS).map(|i| first + LAT_TICK_STEP * i as f64).collect()
}

fn text_trace(lon: Vec<f64>, lat: Vec<f64>, text: Vec<String>) -> TraceSpec {
    TraceSpec {
        lon: Some(lon),
        lat: Some(lat),
        text: Some(text),
        showlegend: Some(false),
        ..TraceSpec::new(TraceKind::Scattergeo)
    }
    .mode("text")
    .skip_hover()
}

/// Tick-label traces for the equator and the prime meridian.
#[must_use]
pub fn graticule_traces(viewer: &ViewerState) -> Vec<TraceSpec> {
    let degrees = viewer.using_degrees();
    let lons = lon_ticks();
    let lats = lat_ticks();
    let lon_text = angle_ticks_text(&lons, degrees);
    let lat_text = angle_ticks_text(&lats, degrees);
    vec![
        text_trace(lons, vec![0.0; GRATICULE_TICKS], lon_text),
        text_trace(vec![0.0; GRATICULE_TICKS], lats, lat_text),
    ]
}

/// Axis titles placed below and left of the map.
#[must_use]
pub fn axis_label_annotations(viewer: &ViewerState, style: &StyleContext) -> Vec<Annotation> {
    let font = |axis: Axis| {
        Font::new(style.font_family.clone(), 2.0 * viewer.axis(axis).label_size, style.foreground.clone())
    };
    let mut out = Vec::new();
    let x = viewer.axis(Axis::X);
    if !x.label.is_empty() {
        out.push(Annotation { font: Some(font(Axis::X)), ..Annotation::paper(x.label.clone(), 0.5, -0.05) });
    }
    let y = viewer.axis(Axis::Y);
    if !y.label.is_empty() {
        out.push(Annotation {
            font: Some(font(Axis::Y)),
            textangle: Some(-90.0),
            ..Annotation::paper(y.label.clone(), -0.05, 0.5)
        });
    }
    out
}
