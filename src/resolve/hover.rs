//! Hover text assembly.

use crate::error::Result;
use crate::sanitize::Mask;
use crate::state::LayerState;

/// Hover configuration of one trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverInfo {
    /// `"skip"` or `"text"`.
    pub hoverinfo: String,
    /// One entry per selected point when any attribute is flagged.
    pub hovertext: Option<Vec<String>>,
}

impl HoverInfo {
    /// No hover at all.
    #[must_use]
    pub fn skip() -> Self {
        Self { hoverinfo: "skip".to_string(), hovertext: None }
    }

    /// Hover text for the point at position `i`, if any.
    #[must_use]
    pub fn text_at(&self, i: usize) -> Option<&str> {
        self.hovertext.as_ref().and_then(|t| t.get(i)).map(String::as_str)
    }
}

/// Concatenate `"label: value<br>"` for each flagged attribute, per point.
///
/// Attributes are listed in the dataset's component order. With no flagged
/// attribute hover is skipped entirely.
///
/// # Errors
///
/// Returns [`crate::Error::IncompatibleAttribute`] when a flagged attribute
/// is missing, or [`crate::Error::ShapeMismatch`] when the mask does not
/// cover it.
pub fn hover_info(layer: &LayerState, mask: &Mask) -> Result<HoverInfo> {
    if layer.hover_attributes.is_empty() {
        return Ok(HoverInfo::skip());
    }

    let components = layer.data.components();
    let mut ordered: Vec<&str> = components
        .iter()
        .copied()
        .filter(|c| layer.hover_attributes.iter().any(|h| h == c))
        .collect();
    for flagged in &layer.hover_attributes {
        if !ordered.contains(&flagged.as_str()) {
            ordered.push(flagged);
        }
    }

    let mut text = vec![String::new(); mask.count()];
    for label in ordered {
        let column = mask.apply_column(layer.data.column(label)?)?;
        for (k, entry) in text.iter_mut().enumerate() {
            entry.push_str(label);
            entry.push_str(": ");
            entry.push_str(&column.display_value(k));
            entry.push_str("<br>");
        }
    }

    Ok(HoverInfo { hoverinfo: "text".to_string(), hovertext: Some(text) })
}
