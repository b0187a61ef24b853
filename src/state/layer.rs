//! Per-layer style and attribute bindings.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::data::DataSource;
use crate::error::{Error, Result};
use crate::scale::Colormap;
use crate::state::viewer::{Axis, PerAxis};

/// Stable identity of a layer, used to derive its legend-group key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LayerId(pub u64);

impl LayerId {
    /// Legend group shared by every trace fragment of this layer.
    #[must_use]
    pub fn legend_group(self) -> String {
        format!("layer-{:016x}", self.0)
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Attribute-driven color configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearColor {
    /// Attribute mapped through the colormap.
    pub attribute: String,
    /// Gradient.
    pub cmap: Colormap,
    /// Value mapped to the start of the gradient.
    pub vmin: f64,
    /// Value mapped to the end of the gradient. May be below `vmin`.
    pub vmax: f64,
}

/// How a layer colors its points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ColorMode {
    /// Every point takes the layer color.
    #[default]
    Fixed,
    /// Per-point color from an attribute.
    Linear(LinearColor),
}

impl ColorMode {
    /// Linear mode over `attribute`.
    #[must_use]
    pub fn linear(attribute: impl Into<String>, cmap: Colormap, vmin: f64, vmax: f64) -> Self {
        ColorMode::Linear(LinearColor { attribute: attribute.into(), cmap, vmin, vmax })
    }

    /// Whether every point shares one color.
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        matches!(self, ColorMode::Fixed)
    }
}

/// How color reaches the secondary primitives of one trace family
/// (line segments, arrows, cones, error bars).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColoringStrategy {
    /// One primitive carries one color for the whole batch.
    Batch,
    /// One primitive per point, each with its own color.
    PerPoint,
}

impl ColoringStrategy {
    /// Strategy implied by a color mode.
    #[must_use]
    pub fn for_mode(mode: &ColorMode) -> Self {
        if mode.is_fixed() {
            ColoringStrategy::Batch
        } else {
            ColoringStrategy::PerPoint
        }
    }
}

/// Attribute-driven size configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearSize {
    /// Attribute mapped onto marker size.
    pub attribute: String,
    /// Value mapped to the smallest marker.
    pub vmin: f64,
    /// Value mapped to the largest marker.
    pub vmax: f64,
}

/// How a layer sizes its points.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SizeMode {
    /// Every point takes the layer size.
    #[default]
    Fixed,
    /// Per-point size from an attribute.
    Linear(LinearSize),
}

/// Marker size configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SizeConfig {
    /// Fixed marker size.
    pub size: f64,
    /// Global size multiplier.
    pub scaling: f64,
    /// Fixed or attribute-driven.
    pub mode: SizeMode,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self { size: 5.0, scaling: 1.0, mode: SizeMode::Fixed }
    }
}

/// Line dash pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    /// Continuous.
    #[default]
    Solid,
    /// Dots.
    Dotted,
    /// Dashes.
    Dashed,
    /// Alternating dashes and dots.
    DashDot,
}

impl LineStyle {
    /// Dash name in the charting schema.
    #[must_use]
    pub const fn dash(self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dotted => "dot",
            LineStyle::Dashed => "dash",
            LineStyle::DashDot => "dashdot",
        }
    }
}

impl FromStr for LineStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "solid" => Ok(LineStyle::Solid),
            "dotted" => Ok(LineStyle::Dotted),
            "dashed" => Ok(LineStyle::Dashed),
            "dashdot" => Ok(LineStyle::DashDot),
            other => Err(Error::UnknownLineStyle(other.to_string())),
        }
    }
}

/// Connecting-line configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LineConfig {
    /// Draw a line through the points.
    pub visible: bool,
    /// Dash pattern.
    pub style: LineStyle,
    /// Width in pixels.
    pub width: f64,
    /// Profiles: draw as steps.
    pub as_steps: bool,
}

impl Default for LineConfig {
    fn default() -> Self {
        Self { visible: false, style: LineStyle::Solid, width: 1.0, as_steps: false }
    }
}

/// Error bars along one axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ErrorBarConfig {
    /// Draw the bars.
    pub visible: bool,
    /// Attribute holding the error magnitudes.
    pub attribute: Option<String>,
}

impl ErrorBarConfig {
    /// Visible error bars from `attribute`.
    #[must_use]
    pub fn from_attribute(attribute: impl Into<String>) -> Self {
        Self { visible: true, attribute: Some(attribute.into()) }
    }

    /// The attribute to draw, if the bars are on.
    #[must_use]
    pub fn active(&self) -> Option<&str> {
        if self.visible {
            self.attribute.as_deref()
        } else {
            None
        }
    }
}

/// Point of an arrow that sits on the data point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorAnchor {
    /// Arrow starts at the point.
    #[default]
    Tail,
    /// Arrow is centred on the point.
    Middle,
    /// Arrow ends at the point.
    Tip,
}

impl VectorAnchor {
    /// Offset of the arrow start, in units of the (scaled) vector.
    #[must_use]
    pub const fn shift(self) -> f64 {
        match self {
            VectorAnchor::Tail => 0.0,
            VectorAnchor::Middle => -0.5,
            VectorAnchor::Tip => -1.0,
        }
    }

    /// Cone anchor name in the charting schema.
    #[must_use]
    pub const fn cone_anchor(self) -> &'static str {
        match self {
            VectorAnchor::Tail => "tail",
            VectorAnchor::Middle => "center",
            VectorAnchor::Tip => "tip",
        }
    }
}

impl FromStr for VectorAnchor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tail" => Ok(VectorAnchor::Tail),
            "middle" => Ok(VectorAnchor::Middle),
            "tip" => Ok(VectorAnchor::Tip),
            other => Err(Error::UnknownVectorAnchor(other.to_string())),
        }
    }
}

/// Interpretation of 2D vector components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VectorMode {
    /// `(vx, vy)` are Cartesian components.
    #[default]
    Cartesian,
    /// `vx` is an angle in degrees and `vy` a magnitude.
    Polar,
}

/// Vector-field overlay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorConfig {
    /// Draw the vectors.
    pub visible: bool,
    /// Attribute of the first component.
    pub vx: String,
    /// Attribute of the second component.
    pub vy: String,
    /// Attribute of the third component (3D only).
    pub vz: Option<String>,
    /// Length multiplier.
    pub scaling: f64,
    /// Which point of the arrow sits on the data point.
    pub anchor: VectorAnchor,
    /// Component interpretation.
    pub mode: VectorMode,
    /// Draw arrowheads.
    pub arrowhead: bool,
}

impl VectorConfig {
    /// Visible Cartesian vectors from two component attributes.
    #[must_use]
    pub fn new(vx: impl Into<String>, vy: impl Into<String>) -> Self {
        Self {
            visible: true,
            vx: vx.into(),
            vy: vy.into(),
            vz: None,
            scaling: 1.0,
            anchor: VectorAnchor::Tail,
            mode: VectorMode::Cartesian,
            arrowhead: true,
        }
    }

    /// Add a third component.
    #[must_use]
    pub fn with_vz(mut self, vz: impl Into<String>) -> Self {
        self.vz = Some(vz.into());
        self
    }

    /// Set the anchor.
    #[must_use]
    pub fn with_anchor(mut self, anchor: VectorAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    /// Set the length multiplier.
    #[must_use]
    pub fn with_scaling(mut self, scaling: f64) -> Self {
        self.scaling = scaling;
        self
    }
}

/// Marker shape for 3D scatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MarkerGeometry {
    /// Sphere.
    #[default]
    Sphere,
    /// Cube.
    Box,
    /// Diamond.
    Diamond,
    /// Flat disc.
    Circle2d,
}

impl MarkerGeometry {
    /// Marker symbol in the charting schema.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            MarkerGeometry::Sphere | MarkerGeometry::Circle2d => "circle",
            MarkerGeometry::Box => "square",
            MarkerGeometry::Diamond => "diamond",
        }
    }
}

impl FromStr for MarkerGeometry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sphere" => Ok(MarkerGeometry::Sphere),
            "box" => Ok(MarkerGeometry::Box),
            "diamond" => Ok(MarkerGeometry::Diamond),
            "circle2d" => Ok(MarkerGeometry::Circle2d),
            other => Err(Error::UnknownGeometry(other.to_string())),
        }
    }
}

/// Everything a builder needs to know about one layer.
#[derive(Debug, Clone)]
pub struct LayerState {
    /// Identity.
    pub id: LayerId,
    /// Dataset or subset.
    pub data: Arc<dyn DataSource>,
    /// Shown in the viewer.
    pub visible: bool,
    /// Able to render (attributes compatible with the viewer).
    pub enabled: bool,
    /// Draw order; higher is on top.
    pub zorder: i32,
    /// Opacity in `[0, 1]`.
    pub alpha: f64,
    /// Layer color (hex, name, or gray level).
    pub color: String,
    /// Fixed or attribute-driven color.
    pub color_mode: ColorMode,
    /// Marker size.
    pub size: SizeConfig,
    /// Filled (true) or hollow markers.
    pub fill: bool,
    /// Connecting line.
    pub line: LineConfig,
    /// Error bars per axis.
    pub errors: PerAxis<ErrorBarConfig>,
    /// Vector-field overlay.
    pub vectors: Option<VectorConfig>,
    /// 3D marker shape.
    pub geometry: MarkerGeometry,
    /// Attributes listed in hover text.
    pub hover_attributes: Vec<String>,
}

impl LayerState {
    /// Visible, enabled layer with default style.
    #[must_use]
    pub fn new(id: u64, data: Arc<dyn DataSource>) -> Self {
        Self {
            id: LayerId(id),
            data,
            visible: true,
            enabled: true,
            zorder: 0,
            alpha: 1.0,
            color: "#595959".to_string(),
            color_mode: ColorMode::Fixed,
            size: SizeConfig::default(),
            fill: true,
            line: LineConfig::default(),
            errors: PerAxis::default(),
            vectors: None,
            geometry: MarkerGeometry::Sphere,
            hover_attributes: Vec::new(),
        }
    }

    /// Set the layer color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the color mode.
    #[must_use]
    pub fn with_color_mode(mut self, mode: ColorMode) -> Self {
        self.color_mode = mode;
        self
    }

    /// Set the opacity.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set the size configuration.
    #[must_use]
    pub fn with_size(mut self, size: SizeConfig) -> Self {
        self.size = size;
        self
    }

    /// Set the draw order.
    #[must_use]
    pub fn with_zorder(mut self, zorder: i32) -> Self {
        self.zorder = zorder;
        self
    }

    /// Set the connecting line.
    #[must_use]
    pub fn with_line(mut self, line: LineConfig) -> Self {
        self.line = line;
        self
    }

    /// Turn on error bars along `axis`.
    #[must_use]
    pub fn with_errors(mut self, axis: Axis, attribute: impl Into<String>) -> Self {
        self.errors[axis] = ErrorBarConfig::from_attribute(attribute);
        self
    }

    /// Attach a vector field.
    #[must_use]
    pub fn with_vectors(mut self, vectors: VectorConfig) -> Self {
        self.vectors = Some(vectors);
        self
    }

    /// Flag attributes for hover text.
    #[must_use]
    pub fn with_hover<S: Into<String>>(mut self, attributes: impl IntoIterator<Item = S>) -> Self {
        self.hover_attributes = attributes.into_iter().map(Into::into).collect();
        self
    }

    /// Display label of the layer's data.
    #[must_use]
    pub fn label(&self) -> &str {
        self.data.label()
    }

    /// Legend group key shared by all of this layer's traces.
    #[must_use]
    pub fn legend_group(&self) -> String {
        self.id.legend_group()
    }

    /// Coloring strategy for this layer's secondary primitives.
    #[must_use]
    pub fn coloring(&self) -> ColoringStrategy {
        ColoringStrategy::for_mode(&self.color_mode)
    }

    /// Whether the layer takes part in an export.
    #[must_use]
    pub fn is_exported(&self) -> bool {
        self.visible && self.enabled
    }

    /// Active vector configuration, if any.
    #[must_use]
    pub fn active_vectors(&self) -> Option<&VectorConfig> {
        self.vectors.as_ref().filter(|v| v.visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataTable;

    fn layer() -> LayerState {
        LayerState::new(7, Arc::new(DataTable::new("d1")))
    }

    #[test]
    fn test_legend_group_is_deterministic() {
        assert_eq!(layer().legend_group(), layer().legend_group());
        assert_eq!(LayerId(255).legend_group(), "layer-00000000000000ff");
        assert_ne!(LayerId(1).legend_group(), LayerId(2).legend_group());
    }

    #[test]
    fn test_enum_parsing_fails_fast() {
        assert_eq!("middle".parse::<VectorAnchor>().unwrap(), VectorAnchor::Middle);
        assert!(matches!("centre".parse::<VectorAnchor>(), Err(Error::UnknownVectorAnchor(_))));
        assert_eq!("box".parse::<MarkerGeometry>().unwrap().symbol(), "square");
        let err = "cylinder".parse::<MarkerGeometry>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid geometry: cylinder");
        assert_eq!("dashdot".parse::<LineStyle>().unwrap().dash(), "dashdot");
        assert_eq!("dotted".parse::<LineStyle>().unwrap().dash(), "dot");
        assert!("wavy".parse::<LineStyle>().is_err());
    }

    #[test]
    fn test_anchor_shift_and_cone_names() {
        assert!((VectorAnchor::Middle.shift() + 0.5).abs() < f64::EPSILON);
        assert_eq!(VectorAnchor::Middle.cone_anchor(), "center");
        assert_eq!(VectorAnchor::Tip.cone_anchor(), "tip");
    }

    #[test]
    fn test_coloring_strategy() {
        let l = layer();
        assert_eq!(l.coloring(), ColoringStrategy::Batch);
        let l = l.with_color_mode(ColorMode::linear("x", Colormap::viridis(), 0.0, 1.0));
        assert_eq!(l.coloring(), ColoringStrategy::PerPoint);
    }

    #[test]
    fn test_error_bar_activity() {
        let l = layer().with_errors(Axis::Y, "dy");
        assert_eq!(l.errors[Axis::Y].active(), Some("dy"));
        assert_eq!(l.errors[Axis::X].active(), None);
    }

    #[test]
    fn test_export_flags() {
        let mut l = layer();
        assert!(l.is_exported());
        l.enabled = false;
        assert!(!l.is_exported());
    }
}
