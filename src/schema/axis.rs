//! Axis records for cartesian, polar, and scene axes.

use serde::Serialize;

/// Font specification.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Font {
    /// Font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    /// Size in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// CSS color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Font {
    /// Font with every field set.
    #[must_use]
    pub fn new(family: impl Into<String>, size: f64, color: impl Into<String>) -> Self {
        Self { family: Some(family.into()), size: Some(size), color: Some(color.into()) }
    }
}

/// Axis title.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Title {
    /// Title text.
    pub text: String,
    /// Title font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Font>,
}

/// Minor tick configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MinorTicks {
    /// Tick placement (`"outside"`).
    pub ticks: String,
}

/// One axis of a layout.
///
/// Used for `xaxis`/`yaxis`, the polar `angularaxis`/`radialaxis`, and
/// the scene axes; keys irrelevant to an axis family stay unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AxisSpec {
    /// Axis title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Tick label font.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickfont: Option<Font>,
    /// Visible range, in axis units (decades on log axes).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<[f64; 2]>,
    /// Scale type (`"linear"`, `"log"`, `"category"`).
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub axis_type: Option<String>,
    /// Range rule (`"normal"`, `"tozero"`) when `range` is unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rangemode: Option<String>,
    /// `"array"` when `tickvals`/`ticktext` are set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickmode: Option<String>,
    /// Explicit tick positions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickvals: Option<Vec<f64>>,
    /// Labels for `tickvals`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticktext: Option<Vec<String>>,
    /// Tick spacing; `1` on a log axis means one per decade.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dtick: Option<f64>,
    /// Minor tick placement.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minor: Option<MinorTicks>,
    /// Major tick placement (`"outside"`, `"inside"`, `""`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<String>,
    /// Draw the axis line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showline: Option<bool>,
    /// Repeat the axis line on the opposite side.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mirror: Option<bool>,
    /// Draw grid lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showgrid: Option<bool>,
    /// Draw a line at zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zeroline: Option<bool>,
    /// Scene axes: hover spike lines.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showspikes: Option<bool>,
    /// Show tick labels.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
    /// Axis line color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linecolor: Option<String>,
    /// Tick mark color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickcolor: Option<String>,
    /// Grid line color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gridcolor: Option<String>,
    /// Secondary axes: the primary axis this one overlays.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overlaying: Option<String>,
    /// Secondary axes: `"top"` or `"right"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side: Option<String>,
    /// `false` hides the axis entirely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    /// Scene axes: wall color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backgroundcolor: Option<String>,
    /// Scene axes: paint the wall.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showbackground: Option<bool>,
    /// Angular axis: `"degrees"` or `"radians"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thetaunit: Option<String>,
    /// Angular axis: which ticks get `tickprefix`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showtickprefix: Option<String>,
    /// Angular axis: text placed before each tick label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickprefix: Option<String>,
    /// Radial axis: angle of the axis line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    /// Tick label rotation, in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<f64>,
}

impl AxisSpec {
    /// Copy explicit tick positions and labels onto the axis.
    pub fn set_ticks(&mut self, values: Vec<f64>, labels: Vec<String>) {
        self.tickmode = Some("array".to_string());
        self.tickvals = Some(values);
        self.ticktext = Some(labels);
    }

    /// Title text, if any.
    #[must_use]
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(|t| t.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_keys_are_omitted() {
        let axis = AxisSpec { range: Some([0.0, 1.0]), ..AxisSpec::default() };
        let json = serde_json::to_value(&axis).unwrap();
        assert_eq!(json, serde_json::json!({"range": [0.0, 1.0]}));
    }

    #[test]
    fn test_type_key_and_ticks() {
        let mut axis = AxisSpec { axis_type: Some("log".into()), ..AxisSpec::default() };
        axis.set_ticks(vec![1.0, 2.0], vec!["a".into(), "b".into()]);
        let json = serde_json::to_value(&axis).unwrap();
        assert_eq!(json["type"], "log");
        assert_eq!(json["tickmode"], "array");
        assert_eq!(json["ticktext"][1], "b");
    }

    #[test]
    fn test_minor_ticks_nesting() {
        let axis = AxisSpec { minor: Some(MinorTicks { ticks: "outside".into() }), ..AxisSpec::default() };
        let json = serde_json::to_value(&axis).unwrap();
        assert_eq!(json["minor"]["ticks"], "outside");
    }
}
