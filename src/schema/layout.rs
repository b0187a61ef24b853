//! Chart-wide layout record.

use serde::Serialize;

use super::axis::{AxisSpec, Font};

/// Outer margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    pub l: f64,
    pub r: f64,
    pub b: f64,
    pub t: f64,
}

impl Margin {
    /// Equal margins on every side.
    #[must_use]
    pub const fn uniform(px: f64) -> Self {
        Self { l: px, r: px, b: px, t: px }
    }
}

/// Polar subplot.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PolarSpec {
    pub angularaxis: AxisSpec,
    pub radialaxis: AxisSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
}

/// Map projection name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeoProjectionSpec {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Graticule grid of a map axis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoAxisSpec {
    pub showgrid: bool,
    pub dtick: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
}

/// Map subplot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoSpec {
    pub projection: GeoProjectionSpec,
    pub showland: bool,
    pub showcoastlines: bool,
    pub showlakes: bool,
    pub lonaxis: GeoAxisSpec,
    pub lataxis: GeoAxisSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub framecolor: Option<String>,
}

/// A 3-vector for camera and aspect settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    /// Create a vector.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Camera projection type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CameraProjection {
    #[serde(rename = "type")]
    pub kind: String,
}

/// Scene camera.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    pub projection: CameraProjection,
    pub up: Vec3,
}

/// 3D scene.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSpec {
    pub xaxis: AxisSpec,
    pub yaxis: AxisSpec,
    pub zaxis: AxisSpec,
    pub camera: Camera,
    pub aspectmode: String,
    pub aspectratio: Vec3,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bgcolor: Option<String>,
}

/// Free-floating text placed in paper coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub xref: String,
    pub yref: String,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textangle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

impl Annotation {
    /// Arrow-less annotation at paper position `(x, y)`.
    #[must_use]
    pub fn paper(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            xref: "paper".to_string(),
            yref: "paper".to_string(),
            showarrow: false,
            textangle: None,
            font: None,
        }
    }
}

/// Chart-wide configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LayoutSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<Margin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paper_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plot_bgcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis2: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis2: Option<AxisSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polar: Option<PolarSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geo: Option<GeoSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bargap: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_layout_is_empty_object() {
        let json = serde_json::to_value(LayoutSpec::default()).unwrap();
        assert_eq!(json, serde_json::json!({}));
    }

    #[test]
    fn test_margin_and_annotation() {
        let layout = LayoutSpec {
            margin: Some(Margin::uniform(50.0)),
            annotations: vec![Annotation::paper("lon", 0.5, -0.05)],
            ..LayoutSpec::default()
        };
        let json = serde_json::to_value(&layout).unwrap();
        assert_eq!(json["margin"]["l"], 50.0);
        assert_eq!(json["annotations"][0]["xref"], "paper");
        assert_eq!(json["annotations"][0]["showarrow"], false);
    }

    #[test]
    fn test_scene_camera_type_key() {
        let camera = Camera {
            projection: CameraProjection { kind: "orthographic".into() },
            up: Vec3::new(0.0, 0.0, 1.0),
        };
        let json = serde_json::to_value(&camera).unwrap();
        assert_eq!(json["projection"]["type"], "orthographic");
        assert_eq!(json["up"]["z"], 1.0);
    }
}
