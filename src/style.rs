//! Global style shared by every builder call.
//!
//! Background/foreground colors and the font family come from the host
//! application. They are passed explicitly to each builder as a
//! [`StyleContext`] value.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::{Error, Result};

/// Font family used for titles and tick labels.
pub const DEFAULT_FONT: &str = "Arial, sans-serif";

/// Host-wide style defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleContext {
    /// Paper and plot background color.
    #[serde(default = "default_background")]
    pub background: String,

    /// Axis line, tick and text color.
    #[serde(default = "default_foreground")]
    pub foreground: String,

    /// Font family for all text.
    #[serde(default = "default_font")]
    pub font_family: String,
}

fn default_background() -> String {
    "#ffffff".to_string()
}
fn default_foreground() -> String {
    "#000000".to_string()
}
fn default_font() -> String {
    DEFAULT_FONT.to_string()
}

impl Default for StyleContext {
    fn default() -> Self {
        Self::light()
    }
}

impl StyleContext {
    /// Black on white.
    #[must_use]
    pub fn light() -> Self {
        Self {
            background: default_background(),
            foreground: default_foreground(),
            font_family: default_font(),
        }
    }

    /// Light gray on near-black.
    #[must_use]
    pub fn dark() -> Self {
        Self {
            background: "#1e1e1e".to_string(),
            foreground: "#b4b4b4".to_string(),
            font_family: default_font(),
        }
    }

    /// Parsed background color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the configured string is not a color.
    pub fn background_rgba(&self) -> Result<Rgba> {
        self.background.parse()
    }

    /// Parsed foreground color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the configured string is not a color.
    pub fn foreground_rgba(&self) -> Result<Rgba> {
        self.foreground.parse()
    }

    /// Check that both colors parse.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the offending field.
    pub fn validate(&self) -> Result<()> {
        self.background_rgba()
            .map_err(|e| Error::Config(format!("background: {e}")))?;
        self.foreground_rgba()
            .map_err(|e| Error::Config(format!("foreground: {e}")))?;
        Ok(())
    }

    /// Load from a YAML document; missing fields take the light defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] on malformed YAML or invalid colors.
    #[cfg(feature = "yaml")]
    #[cfg_attr(docsrs, doc(cfg(feature = "yaml")))]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let style: Self = serde_yaml_ng::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        style.validate()?;
        Ok(style)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_light() {
        let style = StyleContext::default();
        assert_eq!(style, StyleContext::light());
        assert_eq!(style.background_rgba().unwrap(), Rgba::WHITE);
        assert_eq!(style.foreground_rgba().unwrap(), Rgba::BLACK);
        assert_eq!(style.font_family, DEFAULT_FONT);
    }

    #[test]
    fn test_dark_validates() {
        assert!(StyleContext::dark().validate().is_ok());
    }

    #[test]
    fn test_invalid_color_fails_validation() {
        let style = StyleContext { background: "nope".into(), ..StyleContext::light() };
        assert!(matches!(style.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let style: StyleContext = serde_json::from_str(r#"{"foreground": "red"}"#).unwrap();
        assert_eq!(style.foreground, "red");
        assert_eq!(style.background, "#ffffff");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn test_from_yaml() {
        let style = StyleContext::from_yaml_str("background: black\nfont_family: Helvetica\n").unwrap();
        assert_eq!(style.background, "black");
        assert_eq!(style.foreground, "#000000");
        assert_eq!(style.font_family, "Helvetica");
        assert!(StyleContext::from_yaml_str("background: [").is_err());
    }
}
