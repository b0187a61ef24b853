//! Axis specifications derived from viewer state.
//!
//! [`AxisBuilder`] turns one [`AxisState`] into an [`AxisSpec`] for each
//! axis family (cartesian, scene, polar, image). Log axes carry their
//! range in decades; this is the only place the log10 transform happens.

use crate::schema::{AxisSpec, Font, MinorTicks, Title};
use crate::state::{Axis, AxisState, TickOverride, ViewerState};
use crate::style::StyleContext;

/// Title font multiplier relative to the source renderer.
const TITLE_FONT_SCALE: f64 = 2.0;
/// Tick label font multiplier relative to the source renderer.
const TICK_FONT_SCALE: f64 = 1.5;
/// Scene axes use fixed font sizes.
const SCENE_TITLE_SIZE: f64 = 20.0;
const SCENE_TICK_SIZE: f64 = 12.0;
/// Radial axis line and tick label angle, in degrees.
const RADIAL_ANGLE: f64 = 22.5;

/// Rewrite renderer math markup in tick labels.
///
/// `\mathdefault` and `\mathregular` become `\mathrm`; a label containing
/// `$` is re-wrapped as a single `$...$` expression.
#[must_use]
pub fn clean_tick_labels(labels: &[String]) -> Vec<String> {
    labels
        .iter()
        .map(|label| {
            let cleaned = label.replace("\\mathdefault", "\\mathrm").replace("\\mathregular", "\\mathrm");
            if cleaned.contains('$') {
                format!("${}$", cleaned.replace('$', ""))
            } else {
                cleaned
            }
        })
        .collect()
}

/// Builds axis specifications for one viewer.
#[derive(Debug, Clone, Copy)]
pub struct AxisBuilder<'a> {
    viewer: &'a ViewerState,
    style: &'a StyleContext,
}

impl<'a> AxisBuilder<'a> {
    /// Create a builder over a viewer snapshot.
    #[must_use]
    pub fn new(viewer: &'a ViewerState, style: &'a StyleContext) -> Self {
        Self { viewer, style }
    }

    fn font(&self, size: f64) -> Font {
        Font::new(self.style.font_family.clone(), size, self.style.foreground.clone())
    }

    fn title(&self, text: &str, size: f64) -> Title {
        Title { text: text.to_string(), font: Some(self.font(size)) }
    }

    /// Cartesian axis with outside ticks, mirrored frame, no grid.
    ///
    /// Reference-renderer ticks replace the automatic ones when present;
    /// category names pass through as tick text unchanged.
    #[must_use]
    pub fn rectilinear(&self, axis: Axis) -> AxisSpec {
        let state = self.viewer.axis(axis);
        let fg = Some(self.style.foreground.clone());
        let mut spec = AxisSpec {
            title: Some(self.title(&state.label, TITLE_FONT_SCALE * state.label_size)),
            tickfont: Some(self.font(TICK_FONT_SCALE * state.ticklabel_size)),
            range: Some([state.min, state.max]),
            axis_type: Some(if state.log { "log" } else { "linear" }.to_string()),
            rangemode: Some("normal".to_string()),
            ticks: Some("outside".to_string()),
            showline: Some(true),
            mirror: Some(true),
            showgrid: Some(false),
            zeroline: Some(false),
            showspikes: Some(false),
            showticklabels: Some(true),
            linecolor: fg.clone(),
            tickcolor: fg,
            ..AxisSpec::default()
        };
        if state.log {
            spec.range = Some([state.min.log10(), state.max.log10()]);
            spec.dtick = Some(1.0);
            spec.minor = Some(MinorTicks { ticks: "outside".to_string() });
        }
        apply_tick_sources(&mut spec, state);
        spec
    }

    /// Axis with no ticks, line, or grid (dendrogram leaves).
    #[must_use]
    pub fn hidden(&self, axis: Axis) -> AxisSpec {
        let state = self.viewer.axis(axis);
        AxisSpec {
            range: Some([state.min, state.max]),
            showticklabels: Some(false),
            showline: Some(false),
            showgrid: Some(false),
            ..AxisSpec::default()
        }
    }

    /// Scene axis: fixed font sizes, wall colored with the background.
    #[must_use]
    pub fn scene(&self, axis: Axis) -> AxisSpec {
        let state = self.viewer.axis(axis);
        let fg = Some(self.style.foreground.clone());
        AxisSpec {
            title: Some(self.title(&state.label, SCENE_TITLE_SIZE)),
            tickfont: Some(self.font(SCENE_TICK_SIZE)),
            range: Some([state.min, state.max]),
            axis_type: Some("linear".to_string()),
            rangemode: Some("normal".to_string()),
            ticks: Some("outside".to_string()),
            showline: Some(true),
            mirror: Some(true),
            showgrid: Some(false),
            zeroline: Some(false),
            showspikes: Some(false),
            showticklabels: Some(true),
            linecolor: fg.clone(),
            tickcolor: fg,
            backgroundcolor: Some(self.style.background.clone()),
            visible: Some(self.viewer.visible_axes),
            ..AxisSpec::default()
        }
    }

    /// Polar angle axis, prefixed with `"label="` on the first tick.
    #[must_use]
    pub fn angular(&self) -> AxisSpec {
        let state = self.viewer.axis(Axis::X);
        let fg = Some(self.style.foreground.clone());
        let prefix = if state.label.is_empty() { String::new() } else { format!("{}=", state.label) };
        AxisSpec {
            axis_type: Some("linear".to_string()),
            thetaunit: Some(self.viewer.angle_unit.schema_name().to_string()),
            showticklabels: Some(true),
            showtickprefix: Some("first".to_string()),
            tickprefix: Some(prefix),
            tickfont: Some(self.font(TICK_FONT_SCALE * state.ticklabel_size)),
            linecolor: fg.clone(),
            gridcolor: fg,
            ..AxisSpec::default()
        }
    }

    /// Polar radius axis over the y bounds, with italic reference ticks.
    #[must_use]
    pub fn radial(&self) -> AxisSpec {
        let state = self.viewer.axis(Axis::Y);
        let fg = Some(self.style.foreground.clone());
        let mut spec = AxisSpec {
            axis_type: Some("linear".to_string()),
            range: Some([state.min, state.max]),
            showticklabels: Some(true),
            tickmode: Some("array".to_string()),
            angle: Some(RADIAL_ANGLE),
            tickangle: Some(RADIAL_ANGLE),
            showline: Some(false),
            tickfont: Some(self.font(TICK_FONT_SCALE * state.ticklabel_size)),
            linecolor: fg.clone(),
            gridcolor: fg,
            ..AxisSpec::default()
        };
        if let Some(ticks) = state.reference_ticks.as_ref().filter(|t| !t.is_empty()) {
            let labels = ticks.labels.iter().map(|t| format!("<i>{t}</i>")).collect();
            spec.set_ticks(ticks.values.clone(), labels);
        }
        spec
    }

    /// Image axis: frame-less, ticks taken from the reference renderer.
    ///
    /// Primary axes carry the axis title; secondary axes overlay the
    /// primary one on the opposite side and take `ticks` instead.
    #[must_use]
    pub fn image(&self, axis: Axis, secondary: Option<&TickOverride>) -> AxisSpec {
        let state = self.viewer.axis(axis);
        let fg = Some(self.style.foreground.clone());
        let mut spec = AxisSpec {
            range: Some([state.min, state.max]),
            ticks: Some("outside".to_string()),
            showline: Some(false),
            showgrid: Some(false),
            zeroline: Some(false),
            showspikes: Some(false),
            showticklabels: Some(true),
            linecolor: fg.clone(),
            tickcolor: fg,
            tickfont: Some(self.font(TICK_FONT_SCALE * state.ticklabel_size)),
            ..AxisSpec::default()
        };
        match secondary {
            None => {
                spec.title = Some(self.title(&state.label, TITLE_FONT_SCALE * state.label_size));
                apply_tick_sources(&mut spec, state);
            }
            Some(ticks) => {
                spec.overlaying = Some(axis.letter().to_string());
                spec.side = Some(if axis == Axis::X { "top" } else { "right" }.to_string());
                spec.set_ticks(ticks.values.clone(), clean_tick_labels(&ticks.labels));
            }
        }
        spec
    }
}

fn apply_tick_sources(spec: &mut AxisSpec, state: &AxisState) {
    if let Some(ticks) = state.reference_ticks.as_ref().filter(|t| !t.is_empty()) {
        spec.set_ticks(ticks.values.clone(), clean_tick_labels(&ticks.labels));
    } else if let Some(categories) = &state.categories {
        let values = (0..categories.len()).map(|i| i as f64).collect();
        spec.set_ticks(values, categories.clone());
    }
}
