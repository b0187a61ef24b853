//! Scale functions for data-to-visual mappings.
//!
//! Scales transform data values to visual properties (normalized position,
//! color). Colormaps are piecewise-linear gradients over evenly spaced
//! stops; image stretches follow the interval → contrast/bias → stretch
//! pipeline of the source renderer.

use std::str::FromStr;

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Trait for scale functions that map domain values to range values.
pub trait Scale<D, R> {
    /// Transform a domain value to a range value.
    fn scale(&self, value: D) -> R;

    /// Get the domain extent.
    fn domain(&self) -> (D, D);

    /// Get the range extent.
    fn range(&self) -> (R, R);
}

/// Linear scale for continuous-to-continuous mapping.
///
/// No validation is performed on the domain: a degenerate domain yields
/// non-finite output, which callers resolve to their own sentinels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_min: f64,
    domain_max: f64,
    range_min: f64,
    range_max: f64,
}

impl LinearScale {
    /// Create a new linear scale.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain_min: domain.0, domain_max: domain.1, range_min: range.0, range_max: range.1 }
    }

    /// Scale mapping `[vmin, vmax]` onto the unit interval.
    #[must_use]
    pub fn unit(vmin: f64, vmax: f64) -> Self {
        Self::new((vmin, vmax), (0.0, 1.0))
    }

    /// Whether the domain has zero width.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain_min == self.domain_max
    }
}

impl Scale<f64, f64> for LinearScale {
    fn scale(&self, value: f64) -> f64 {
        let t = (value - self.domain_min) / (self.domain_max - self.domain_min);
        self.range_min + t * (self.range_max - self.range_min)
    }

    fn domain(&self) -> (f64, f64) {
        (self.domain_min, self.domain_max)
    }

    fn range(&self) -> (f64, f64) {
        (self.range_min, self.range_max)
    }
}

/// A named gradient over the unit interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Colormap {
    name: String,
    colors: Vec<Rgba>,
    bad: Rgba,
}

impl Colormap {
    /// Create a colormap from evenly spaced stops.
    ///
    /// # Errors
    ///
    /// Returns an error if `colors` is empty.
    pub fn new(name: impl Into<String>, colors: Vec<Rgba>) -> Result<Self> {
        let name = name.into();
        if colors.is_empty() {
            return Err(Error::UnknownColormap(format!("{name} (no color stops)")));
        }
        Ok(Self { name, colors, bad: Rgba::TRANSPARENT })
    }

    fn builtin(name: &str, colors: &[Rgba]) -> Self {
        Self { name: name.to_string(), colors: colors.to_vec(), bad: Rgba::TRANSPARENT }
    }

    /// Perceptually uniform viridis.
    #[must_use]
    pub fn viridis() -> Self {
        Self::builtin(
            "viridis",
            &[
                Rgba::rgb(68, 1, 84),
                Rgba::rgb(59, 82, 139),
                Rgba::rgb(33, 145, 140),
                Rgba::rgb(94, 201, 98),
                Rgba::rgb(253, 231, 37),
            ],
        )
    }

    /// Sequential magma.
    #[must_use]
    pub fn magma() -> Self {
        Self::builtin(
            "magma",
            &[
                Rgba::rgb(0, 0, 4),
                Rgba::rgb(81, 18, 124),
                Rgba::rgb(183, 55, 121),
                Rgba::rgb(252, 137, 97),
                Rgba::rgb(252, 253, 191),
            ],
        )
    }

    /// Black to white.
    #[must_use]
    pub fn gray() -> Self {
        Self::builtin("gray", &[Rgba::BLACK, Rgba::WHITE])
    }

    /// Sequential blues.
    #[must_use]
    pub fn blues() -> Self {
        Self::builtin(
            "Blues",
            &[
                Rgba::rgb(247, 251, 255),
                Rgba::rgb(198, 219, 239),
                Rgba::rgb(107, 174, 214),
                Rgba::rgb(33, 113, 181),
                Rgba::rgb(8, 48, 107),
            ],
        )
    }

    /// Diverging red-blue.
    #[must_use]
    pub fn red_blue() -> Self {
        Self::builtin(
            "RdBu",
            &[
                Rgba::rgb(178, 24, 43),
                Rgba::rgb(239, 138, 98),
                Rgba::rgb(247, 247, 247),
                Rgba::rgb(103, 169, 207),
                Rgba::rgb(33, 102, 172),
            ],
        )
    }

    /// Black-red-yellow-white.
    #[must_use]
    pub fn hot() -> Self {
        Self::builtin(
            "hot",
            &[
                Rgba::rgb(0, 0, 0),
                Rgba::rgb(128, 0, 0),
                Rgba::rgb(255, 0, 0),
                Rgba::rgb(255, 128, 0),
                Rgba::rgb(255, 255, 0),
                Rgba::rgb(255, 255, 255),
            ],
        )
    }

    /// Colormap name (`_r` suffix when reversed).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The same gradient traversed from the other end.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let name = match self.name.strip_suffix("_r") {
            Some(base) => base.to_string(),
            None => format!("{}_r", self.name),
        };
        let mut colors = self.colors.clone();
        colors.reverse();
        Self { name, colors, bad: self.bad }
    }

    /// Map a normalized value to RGBA fractions.
    ///
    /// Values outside `[0, 1]` clamp to the end colors; NaN maps to the
    /// transparent "bad" color.
    #[must_use]
    pub fn map(&self, t: f64) -> [f64; 4] {
        if t.is_nan() {
            return self.bad.to_fractions();
        }
        let t = t.clamp(0.0, 1.0);
        if self.colors.len() == 1 {
            return self.colors[0].to_fractions();
        }

        let segment_count = self.colors.len() - 1;
        let segment = ((t * segment_count as f64).floor() as usize).min(segment_count - 1);
        let local_t = t * segment_count as f64 - segment as f64;

        let lo = self.colors[segment].to_fractions();
        let hi = self.colors[segment + 1].to_fractions();
        let mut out = [0.0; 4];
        for i in 0..4 {
            out[i] = lo[i] + (hi[i] - lo[i]) * local_t;
        }
        out
    }
}

impl Default for Colormap {
    fn default() -> Self {
        Self::gray()
    }
}

impl Scale<f64, [f64; 4]> for Colormap {
    fn scale(&self, value: f64) -> [f64; 4] {
        self.map(value)
    }

    fn domain(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn range(&self) -> ([f64; 4], [f64; 4]) {
        (self.map(0.0), self.map(1.0))
    }
}

impl FromStr for Colormap {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (base, reversed) = match s.strip_suffix("_r") {
            Some(base) => (base, true),
            None => (s, false),
        };
        let cmap = match base.to_ascii_lowercase().as_str() {
            "viridis" => Self::viridis(),
            "magma" => Self::magma(),
            "gray" | "grey" => Self::gray(),
            "greys" => Self::gray().reversed(),
            "blues" => Self::blues(),
            "rdbu" => Self::red_blue(),
            "hot" => Self::hot(),
            _ => return Err(Error::UnknownColormap(s.to_string())),
        };
        Ok(if reversed { cmap.reversed() } else { cmap })
    }
}

/// Nonlinear stretch applied to normalized image values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stretch {
    /// Identity.
    #[default]
    Linear,
    /// Square root.
    Sqrt,
    /// `log(a·x + 1) / log(a + 1)` with `a = 1000`.
    Log,
    /// `asinh(x / a) / asinh(1 / a)` with `a = 0.1`.
    Arcsinh,
}

impl Stretch {
    /// Apply the stretch; input and output are clipped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        let x = clip_unit(x);
        let y = match self {
            Stretch::Linear => x,
            Stretch::Sqrt => x.sqrt(),
            Stretch::Log => {
                let a = 1000.0_f64;
                (a * x + 1.0).ln() / (a + 1.0).ln()
            }
            Stretch::Arcsinh => {
                let a = 0.1_f64;
                (x / a).asinh() / (1.0 / a).asinh()
            }
        };
        clip_unit(y)
    }
}

impl FromStr for Stretch {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "linear" => Ok(Stretch::Linear),
            "sqrt" => Ok(Stretch::Sqrt),
            "log" => Ok(Stretch::Log),
            "arcsinh" | "asinh" => Ok(Stretch::Arcsinh),
            other => Err(Error::UnknownStretch(other.to_string())),
        }
    }
}

/// NaN-preserving clip to the unit interval.
fn clip_unit(x: f64) -> f64 {
    if x.is_nan() {
        x
    } else {
        x.clamp(0.0, 1.0)
    }
}

/// Interval → contrast/bias → stretch, the image value pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageStretch {
    interval: LinearScale,
    contrast: f64,
    bias: f64,
    stretch: Stretch,
}

impl ImageStretch {
    /// Build the pipeline for a manual `[vmin, vmax]` interval.
    #[must_use]
    pub fn new(vmin: f64, vmax: f64, contrast: f64, bias: f64, stretch: Stretch) -> Self {
        Self { interval: LinearScale::unit(vmin, vmax), contrast, bias, stretch }
    }

    /// Map a raw image value into `[0, 1]` (NaN stays NaN).
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let normalized = clip_unit(self.interval.scale(value));
        let biased = clip_unit((normalized - self.bias) * self.contrast + 0.5);
        self.stretch.apply(biased)
    }
}
