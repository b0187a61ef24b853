//! Viewer-level configuration shared by all layers of one chart.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Extent};

/// One of the three data axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis (longitude, angle).
    X,
    /// Vertical axis (latitude, radius).
    Y,
    /// Depth axis (3D only).
    Z,
}

impl Axis {
    /// All axes in x, y, z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Lowercase axis letter, as used in schema keys (`error_x`, `xaxis`).
    #[must_use]
    pub const fn letter(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.letter())
    }
}

/// A value per axis, indexed by [`Axis`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PerAxis<T> {
    /// X entry.
    pub x: T,
    /// Y entry.
    pub y: T,
    /// Z entry.
    pub z: T,
}

impl<T> PerAxis<T> {
    /// Build from explicit entries.
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }
}

impl<T> Index<Axis> for PerAxis<T> {
    type Output = T;

    fn index(&self, axis: Axis) -> &T {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }
}

impl<T> IndexMut<Axis> for PerAxis<T> {
    fn index_mut(&mut self, axis: Axis) -> &mut T {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        }
    }
}

/// Tick positions and labels already computed by the reference renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TickOverride {
    /// Tick positions in data units.
    pub values: Vec<f64>,
    /// Tick labels, index-aligned with `values`.
    pub labels: Vec<String>,
}

impl TickOverride {
    /// Create an override from parallel arrays.
    #[must_use]
    pub fn new(values: Vec<f64>, labels: Vec<String>) -> Self {
        Self { values, labels }
    }

    /// Whether there is anything to copy.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() || self.labels.is_empty()
    }
}

/// Configuration of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisState {
    /// Data attribute plotted along this axis.
    pub attribute: String,
    /// Axis title.
    pub label: String,
    /// Lower bound of the displayed range.
    pub min: f64,
    /// Upper bound of the displayed range.
    pub max: f64,
    /// Logarithmic scaling.
    pub log: bool,
    /// Axis title font size in the source renderer (points).
    pub label_size: f64,
    /// Tick label font size in the source renderer (points).
    pub ticklabel_size: f64,
    /// 3D aspect stretch factor.
    pub stretch: f64,
    /// Number of volume samples along this axis.
    pub resolution: usize,
    /// Ticks computed by the reference renderer, copied verbatim when present.
    pub reference_ticks: Option<TickOverride>,
    /// Category names for a categorical axis (tick `i` is category `i`).
    pub categories: Option<Vec<String>>,
}

impl Default for AxisState {
    fn default() -> Self {
        Self {
            attribute: String::new(),
            label: String::new(),
            min: 0.0,
            max: 1.0,
            log: false,
            label_size: 10.0,
            ticklabel_size: 8.0,
            stretch: 1.0,
            resolution: 256,
            reference_ticks: None,
            categories: None,
        }
    }
}

impl AxisState {
    /// Axis bound to `attribute` spanning `[min, max]`.
    #[must_use]
    pub fn new(attribute: impl Into<String>, min: f64, max: f64) -> Self {
        let attribute = attribute.into();
        Self { label: attribute.clone(), attribute, min, max, ..Self::default() }
    }

    /// Set the axis title.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Enable or disable log scaling.
    #[must_use]
    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    /// Set title and tick label font sizes.
    #[must_use]
    pub fn font_sizes(mut self, label_size: f64, ticklabel_size: f64) -> Self {
        self.label_size = label_size;
        self.ticklabel_size = ticklabel_size;
        self
    }

    /// Attach reference-renderer ticks.
    #[must_use]
    pub fn reference_ticks(mut self, ticks: TickOverride) -> Self {
        self.reference_ticks = Some(ticks);
        self
    }

    /// Set the volume resolution.
    #[must_use]
    pub fn resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the 3D stretch factor.
    #[must_use]
    pub fn stretch(mut self, stretch: f64) -> Self {
        self.stretch = stretch;
        self
    }

    /// Displayed range as an [`Extent`].
    #[must_use]
    pub fn extent(&self) -> Extent {
        Extent::new(self.min, self.max)
    }

    /// Absolute width of the displayed range.
    #[must_use]
    pub fn span(&self) -> f64 {
        (self.max - self.min).abs()
    }
}

/// Map projections supported by geographic scatter viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoProjection {
    /// Aitoff.
    Aitoff,
    /// Hammer.
    Hammer,
    /// Lambert azimuthal equal-area.
    Lambert,
    /// Mollweide.
    Mollweide,
}

impl GeoProjection {
    /// Projection name in the charting schema.
    #[must_use]
    pub const fn schema_name(self) -> &'static str {
        match self {
            GeoProjection::Aitoff => "aitoff",
            GeoProjection::Hammer => "hammer",
            GeoProjection::Lambert => "azimuthal equal area",
            GeoProjection::Mollweide => "mollweide",
        }
    }
}

/// How the viewer projects its axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Projection {
    /// Cartesian x/y.
    #[default]
    Rectilinear,
    /// Angle/radius.
    Polar,
    /// Longitude/latitude on a map projection.
    Geographic(GeoProjection),
    /// Three-dimensional scene.
    Scene3d,
}

impl FromStr for Projection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "rectilinear" => Ok(Projection::Rectilinear),
            "polar" => Ok(Projection::Polar),
            "aitoff" => Ok(Projection::Geographic(GeoProjection::Aitoff)),
            "hammer" => Ok(Projection::Geographic(GeoProjection::Hammer)),
            "lambert" => Ok(Projection::Geographic(GeoProjection::Lambert)),
            "mollweide" => Ok(Projection::Geographic(GeoProjection::Mollweide)),
            "3d" => Ok(Projection::Scene3d),
            other => Err(Error::UnknownProjection(other.to_string())),
        }
    }
}

/// Unit of angular coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnit {
    /// Degrees.
    #[default]
    Degrees,
    /// Radians.
    Radians,
}

impl AngleUnit {
    /// Unit name in the charting schema.
    #[must_use]
    pub const fn schema_name(self) -> &'static str {
        match self {
            AngleUnit::Degrees => "degrees",
            AngleUnit::Radians => "radians",
        }
    }
}

/// Source canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSize {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
    /// Figure pixels per on-screen widget pixel (above 1 on HiDPI screens).
    pub pixel_ratio: f64,
}

impl CanvasSize {
    /// Create a canvas size at a pixel ratio of 1.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height, pixel_ratio: 1.0 }
    }

    /// Set the figure-to-widget pixel ratio.
    #[must_use]
    pub const fn with_pixel_ratio(mut self, pixel_ratio: f64) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}

/// Axis and view configuration of one viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerState {
    /// Per-axis configuration.
    pub axes: PerAxis<AxisState>,
    /// Projection mode.
    pub projection: Projection,
    /// Unit of angular coordinates (polar and geographic projections).
    pub angle_unit: AngleUnit,
    /// 3D: size axes by data extent rather than as an equal cube.
    pub native_aspect: bool,
    /// 3D: perspective (true) or orthographic camera.
    pub perspective: bool,
    /// 3D: show axes.
    pub visible_axes: bool,
    /// Profile viewers: normalize each profile to `[0, 1]`.
    pub normalize: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            axes: PerAxis::new(
                AxisState::new("x", 0.0, 1.0),
                AxisState::new("y", 0.0, 1.0),
                AxisState::new("z", 0.0, 1.0),
            ),
            projection: Projection::default(),
            angle_unit: AngleUnit::default(),
            native_aspect: false,
            perspective: true,
            visible_axes: true,
            normalize: false,
        }
    }
}

impl ViewerState {
    /// Rectilinear viewer with the given x and y axes.
    #[must_use]
    pub fn rectilinear(x: AxisState, y: AxisState) -> Self {
        Self { axes: PerAxis::new(x, y, AxisState::new("z", 0.0, 1.0)), ..Self::default() }
    }

    /// 3D viewer with the given axes.
    #[must_use]
    pub fn scene(x: AxisState, y: AxisState, z: AxisState) -> Self {
        Self { axes: PerAxis::new(x, y, z), projection: Projection::Scene3d, ..Self::default() }
    }

    /// Set the projection.
    #[must_use]
    pub fn with_projection(mut self, projection: Projection) -> Self {
        self.projection = projection;
        self
    }

    /// Set the angle unit.
    #[must_use]
    pub fn with_angle_unit(mut self, unit: AngleUnit) -> Self {
        self.angle_unit = unit;
        self
    }

    /// Configuration of one axis.
    #[must_use]
    pub fn axis(&self, axis: Axis) -> &AxisState {
        &self.axes[axis]
    }

    /// Whether positions are Cartesian x/y.
    #[must_use]
    pub fn is_rectilinear(&self) -> bool {
        matches!(self.projection, Projection::Rectilinear)
    }

    /// Whether angles are in degrees.
    #[must_use]
    pub fn using_degrees(&self) -> bool {
        self.angle_unit == AngleUnit::Degrees
    }

    /// Displayed 3D region.
    #[must_use]
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(self.axes.x.extent(), self.axes.y.extent(), self.axes.z.extent())
    }

    /// Diagonal of the displayed x/y region in data units.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        (self.axes.x.max - self.axes.x.min).hypot(self.axes.y.max - self.axes.y.min)
    }
}
