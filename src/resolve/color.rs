//! Per-layer color resolution.

use crate::color::{css_rgba, is_rgba_hex, strip_hex_alpha, Rgba};
use crate::error::Result;
use crate::sanitize::Mask;
use crate::scale::{Colormap, LinearScale, Scale};
use crate::schema::ColorSpec;
use crate::state::{ColorMode, LayerState};

/// Gray level the source renderer uses as its default layer color.
const NEUTRAL_GRAY_SENTINEL: &str = "0.35";

/// Layer color in a form the charting schema accepts.
///
/// The neutral-gray sentinel becomes `"gray"` and 8-digit hex colors lose
/// their alpha channel (opacity is carried separately).
#[must_use]
pub fn fixed_color(color: &str) -> String {
    if color == NEUTRAL_GRAY_SENTINEL {
        "gray".to_string()
    } else if is_rgba_hex(color) {
        strip_hex_alpha(color).to_string()
    } else {
        color.to_string()
    }
}

/// Color of every selected point of `layer`.
///
/// Fixed mode yields one shared color; linear mode yields one `rgba(...)`
/// string per selected row.
///
/// # Errors
///
/// Returns [`crate::Error::IncompatibleAttribute`] when the color attribute
/// is missing, or [`crate::Error::ShapeMismatch`] when the mask does not
/// cover it.
pub fn color_info(layer: &LayerState, mask: &Mask) -> Result<ColorSpec> {
    match &layer.color_mode {
        ColorMode::Fixed => Ok(ColorSpec::Single(fixed_color(&layer.color))),
        ColorMode::Linear(linear) => {
            let values = mask.apply(layer.data.numeric(&linear.attribute)?)?;
            Ok(ColorSpec::PerPoint(linear_colors(&values, &linear.cmap, linear.vmin, linear.vmax)))
        }
    }
}

/// Map values through a colormap between `vmin` and `vmax`.
///
/// `vmin > vmax` selects the reversed colormap over the swapped bounds. A
/// zero-width interval maps every finite value to the start of the
/// gradient; NaN maps to transparent.
#[must_use]
pub fn linear_colors(values: &[f64], cmap: &Colormap, vmin: f64, vmax: f64) -> Vec<String> {
    let (cmap, lo, hi) = if vmin > vmax {
        (cmap.reversed(), vmax, vmin)
    } else {
        (cmap.clone(), vmin, vmax)
    };
    let norm = LinearScale::unit(lo, hi);
    values
        .iter()
        .map(|&v| {
            let t = if norm.is_degenerate() && !v.is_nan() { 0.0 } else { norm.scale(v) };
            rgba_string(cmap.map(t))
        })
        .collect()
}

/// `rgba(r,g,b,a)` from RGBA fractions: 0-255 integer channels, alpha as a
/// fraction without a trailing `.0`.
#[must_use]
pub fn rgba_string(rgba: [f64; 4]) -> String {
    let [r, g, b, a] = rgba;
    with_opacity(Rgba::from_fractions(r, g, b, 1.0), a)
}

/// `rgb(r,g,b)` from RGB fractions.
#[must_use]
pub fn rgb_string(rgba: [f64; 4]) -> String {
    let [r, g, b, _] = rgba;
    Rgba::from_fractions(r, g, b, 1.0).to_css_rgb()
}

/// `rgba(r,g,b,a)` for a parsed layer color with an explicit opacity.
#[must_use]
pub fn with_opacity(rgba: Rgba, alpha: f64) -> String {
    css_rgba(rgba.r, rgba.g, rgba.b, alpha)
}
