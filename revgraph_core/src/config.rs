//! Geometry and palette settings shared by every render pass.

use std::path::Path;

use revgraph_api::Palette;
use serde::{Deserialize, Serialize};

use crate::validate::MAX_STROKE_WIDTH;
use crate::{Error, Result};

/// Settings for a [`crate::GraphRenderer`].
///
/// Every field has a default, so a config file only needs the values it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RenderConfig {
    /// Horizontal space reserved per track.
    pub track_width: f64,
    /// Blank margin left and right of the tracks.
    pub padding: f64,
    /// Row height used when anchors are built without explicit heights.
    pub row_height: f64,
    /// Default edge stroke width.
    pub line_width: f64,
    /// Radius of vertex glyphs.
    pub vertex_radius: f64,
    /// Colors selected by integer color references.
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            track_width: 16.0,
            padding: 4.0,
            row_height: 28.0,
            line_width: 1.5,
            vertex_radius: 4.0,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Parse and validate a JSON config document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed documents and
    /// [`Error::InvalidConfig`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, otherwise as
    /// [`RenderConfig::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Check that every dimension is usable and the palette is well formed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("trackWidth", self.track_width),
            ("rowHeight", self.row_height),
            ("lineWidth", self.line_width),
            ("vertexRadius", self.vertex_radius),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        if self.line_width > MAX_STROKE_WIDTH {
            return Err(invalid(format!(
                "lineWidth must not exceed {MAX_STROKE_WIDTH}, got {}",
                self.line_width
            )));
        }

        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(invalid(format!(
                "padding must not be negative, got {}",
                self.padding
            )));
        }

        if !self.palette.is_valid() {
            return Err(invalid(
                "palette must be a non-empty list of hex colors".to_owned(),
            ));
        }

        Ok(())
    }
}

fn invalid(reason: String) -> Error {
    Error::InvalidConfig { reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() -> Result<()> {
        let config = RenderConfig::from_json_str(r#"{ "trackWidth": 20, "padding": 0 }"#)?;
        assert!((config.track_width - 20.0).abs() < f64::EPSILON);
        assert!(config.padding.abs() < f64::EPSILON);
        assert_eq!(config.palette, Palette::default());
        assert!((config.row_height - RenderConfig::default().row_height).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn custom_palette_is_accepted() -> Result<()> {
        let config = RenderConfig::from_json_str(r##"{ "palette": ["#000", "#ffffff"] }"##)?;
        assert_eq!(config.palette.len(), 2);
        assert_eq!(config.palette.get(3), "#ffffff");
        Ok(())
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let err = RenderConfig::from_json_str(r#"{ "trackWidth": 0 }"#);
        assert!(matches!(err, Err(Error::InvalidConfig { .. })));

        let err = RenderConfig::from_json_str(r#"{ "padding": -1 }"#);
        assert!(matches!(err, Err(Error::InvalidConfig { .. })));

        let err = RenderConfig::from_json_str(r#"{ "lineWidth": 1e300 }"#);
        assert!(matches!(err, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn rejects_bad_palettes() {
        let err = RenderConfig::from_json_str(r#"{ "palette": [] }"#);
        assert!(matches!(err, Err(Error::InvalidConfig { .. })));

        let err = RenderConfig::from_json_str(r#"{ "palette": ["crimson"] }"#);
        assert!(matches!(err, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = RenderConfig::from_json_str("{ trackWidth: 3 }");
        assert!(matches!(err, Err(Error::Json { .. })));
    }

    #[test]
    fn load_reports_missing_file() {
        let temp = tempfile::TempDir::new().expect("tempdir");
        let err = RenderConfig::load(temp.path().join("missing.json"));
        assert!(matches!(err, Err(Error::Io { .. })));
    }
}
