//! Trace records: one renderable series per record.

use serde::Serialize;

/// Chart primitive of a trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TraceKind {
    /// 2D markers and lines.
    #[default]
    Scatter,
    /// Markers on polar axes.
    Scatterpolar,
    /// Markers on a map projection.
    Scattergeo,
    /// 3D markers and lines.
    Scatter3d,
    /// 3D vector cones.
    Cone,
    /// Bars.
    Bar,
    /// Scalar grid mapped through a colorscale.
    Heatmap,
    /// RGBA pixel grid.
    Image,
    /// Volumetric isosurfaces.
    Volume,
}

/// One color for the whole trace or one per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Shared color.
    Single(String),
    /// Per-point colors, index-aligned with the positions.
    PerPoint(Vec<String>),
}

impl ColorSpec {
    /// Color of point `i`.
    #[must_use]
    pub fn at(&self, i: usize) -> Option<&str> {
        match self {
            ColorSpec::Single(c) => Some(c),
            ColorSpec::PerPoint(colors) => colors.get(i).map(String::as_str),
        }
    }

    /// Number of per-point entries (`None` for a shared color).
    #[must_use]
    pub fn per_point_len(&self) -> Option<usize> {
        match self {
            ColorSpec::Single(_) => None,
            ColorSpec::PerPoint(colors) => Some(colors.len()),
        }
    }
}

impl From<&str> for ColorSpec {
    fn from(color: &str) -> Self {
        ColorSpec::Single(color.to_string())
    }
}

/// One size for the whole trace or one per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SizeSpec {
    /// Shared size.
    Single(f64),
    /// Per-point sizes.
    PerPoint(Vec<f64>),
}

impl SizeSpec {
    /// Size of point `i`.
    #[must_use]
    pub fn at(&self, i: usize) -> Option<f64> {
        match self {
            SizeSpec::Single(s) => Some(*s),
            SizeSpec::PerPoint(sizes) => sizes.get(i).copied(),
        }
    }
}

/// `z` channel: point depths, a scalar grid, or RGBA pixels.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ZData {
    /// One depth per point.
    Points(Vec<f64>),
    /// Row-major scalar grid.
    Grid(Vec<Vec<f64>>),
    /// Row-major pixels: 0-255 RGB channels and a fractional alpha.
    Rgba(Vec<Vec<[f64; 4]>>),
}

/// Marker outline.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MarkerLine {
    pub width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
}

/// Marker appearance.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<SizeSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

/// Line appearance.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
    /// Interpolation (`"linear"`, `"hvh"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

/// Error bars along one axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBar {
    /// Always `"data"`: magnitudes come from `array`.
    #[serde(rename = "type")]
    pub kind: String,
    pub array: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub visible: bool,
}

impl ErrorBar {
    /// Visible data-driven error bars.
    #[must_use]
    pub fn data(array: Vec<f64>, color: Option<String>) -> Self {
        Self { kind: "data".to_string(), array, color, visible: true }
    }
}

/// Isosurface count of a volume trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Surface {
    pub count: usize,
}

/// Volume cap configuration (caps hidden on every axis).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Caps {
    pub x: CapShow,
    pub y: CapShow,
    pub z: CapShow,
}

/// Per-axis cap visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CapShow {
    pub show: bool,
}

impl Caps {
    /// No caps on any axis.
    #[must_use]
    pub const fn hidden() -> Self {
        let off = CapShow { show: false };
        Self { x: off, y: off, z: off }
    }
}

/// Colorscale stops `(position, color)` with positions in `[0, 1]`.
pub type ColorScale = Vec<(f64, String)>;

/// One renderable series.
///
/// Positions use NaN as a polyline gap; NaN serializes as `null`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct TraceSpec {
    #[serde(rename = "type")]
    pub kind: TraceKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<ZData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thetaunit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub u: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub v: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub w: Option<Vec<f64>>,
    /// Volume samples, index-aligned with `x`/`y`/`z`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_x: Option<ErrorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_z: Option<ErrorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hoverinfo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hovertext: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legendgroup: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Bar widths.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<ColorScale>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zmax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isomin: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isomax: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacityscale: Option<Vec<(f64, f64)>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surface: Option<Surface>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caps: Option<Caps>,
    /// Cone anchor (`"tail"`, `"center"`, `"tip"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizemode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizeref: Option<f64>,
}

impl TraceSpec {
    /// Empty trace of the given kind.
    #[must_use]
    pub fn new(kind: TraceKind) -> Self {
        Self { kind, ..Self::default() }
    }

    /// Set the x/y positions.
    #[must_use]
    pub fn xy(mut self, x: Vec<f64>, y: Vec<f64>) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Set the x/y/z positions of a 3D trace.
    #[must_use]
    pub fn xyz(mut self, x: Vec<f64>, y: Vec<f64>, z: Vec<f64>) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self.z = Some(ZData::Points(z));
        self
    }

    /// Set the drawing mode (`"markers"`, `"lines"`, `"lines+markers"`).
    #[must_use]
    pub fn mode(mut self, mode: &str) -> Self {
        self.mode = Some(mode.to_string());
        self
    }

    /// Set the trace name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Join a legend group, optionally showing the legend entry.
    #[must_use]
    pub fn legend(mut self, group: &str, show: bool) -> Self {
        self.legendgroup = Some(group.to_string());
        self.showlegend = Some(show);
        self
    }

    /// Exclude the trace from hover.
    #[must_use]
    pub fn skip_hover(mut self) -> Self {
        self.hoverinfo = Some("skip".to_string());
        self
    }

    /// Set the marker.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Set the line.
    #[must_use]
    pub fn line(mut self, line: LineSpec) -> Self {
        self.line = Some(line);
        self
    }

    /// Number of positions on the x channel.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.x.as_ref().map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_value(TraceSpec::new(TraceKind::Scatter3d)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "scatter3d"}));
    }

    #[test]
    fn test_nan_serializes_as_null() {
        let trace = TraceSpec::new(TraceKind::Scatter).xy(vec![1.0, f64::NAN], vec![2.0, f64::NAN]);
        let json = serde_json::to_string(&trace).unwrap();
        assert!(json.contains("\"x\":[1.0,null]"));
    }

    #[test]
    fn test_untagged_channels() {
        let marker = Marker {
            color: Some(ColorSpec::PerPoint(vec!["red".into(), "blue".into()])),
            size: Some(SizeSpec::Single(4.0)),
            ..Marker::default()
        };
        let json = serde_json::to_value(&marker).unwrap();
        assert_eq!(json["color"][1], "blue");
        assert_eq!(json["size"], 4.0);
    }

    #[test]
    fn test_colorscale_and_error_bar_shape() {
        let trace = TraceSpec {
            colorscale: Some(vec![(0.0, "white".into()), (1.0, "black".into())]),
            error_y: Some(ErrorBar::data(vec![0.5], None)),
            ..TraceSpec::new(TraceKind::Heatmap)
        };
        let json = serde_json::to_value(&trace).unwrap();
        assert_eq!(json["colorscale"][1][1], "black");
        assert_eq!(json["error_y"]["type"], "data");
        assert_eq!(json["error_y"]["visible"], true);
    }

    #[test]
    fn test_color_and_size_lookup() {
        let c = ColorSpec::PerPoint(vec!["a".into(), "b".into()]);
        assert_eq!(c.at(1), Some("b"));
        assert_eq!(c.per_point_len(), Some(2));
        assert_eq!(ColorSpec::from("red").at(9), Some("red"));
        assert_eq!(SizeSpec::PerPoint(vec![1.0]).at(1), None);
    }
}
