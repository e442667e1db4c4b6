//! Stylesheet system for the map colour palette
//!
//! The renderer refers to colours through CSS custom properties
//! (`var(--occupied)`), and the stylesheet supplies their values. A custom
//! TOML stylesheet only needs the tokens it overrides.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or parsing stylesheets
#[derive(Error, Debug)]
pub enum StylesheetError {
    #[error("Failed to read stylesheet file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse stylesheet TOML: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// A stylesheet mapping colour tokens to concrete values
#[derive(Debug, Clone, PartialEq)]
pub struct Stylesheet {
    /// Optional name for the stylesheet
    pub name: Option<String>,
    /// Colour mappings: token name -> CSS colour, kept sorted for stable output
    pub colors: BTreeMap<String, String>,
}

/// TOML structure for deserializing stylesheets
#[derive(Deserialize)]
struct TomlStylesheet {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

/// Default palette matching the directory site
const DEFAULT_PALETTE: &str = r##"
[colors]
# Stall fills
occupied = "#4a90e2"
vacant = "#95a5a6"
alleyway = "#d5c4a1"
stairway = "#b48ead"
hover = "#f39c12"
stall-stroke = "#2c3e50"

# Streets
street = "#34495e"
main-street = "#2c3e50"

# Map furniture
background = "#ffffff"
grid = "#ecf0f1"
label = "#2c3e50"
stall-number = "#ffffff"
"##;

impl Stylesheet {
    /// Load stylesheet from TOML file
    pub fn from_file(path: &Path) -> Result<Self, StylesheetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load stylesheet from TOML string
    pub fn from_str(content: &str) -> Result<Self, StylesheetError> {
        let parsed: TomlStylesheet = toml::from_str(content)?;

        Ok(Stylesheet {
            name: parsed.metadata.and_then(|m| m.name),
            colors: parsed.colors,
        })
    }

    /// Resolve a colour token to a concrete value
    ///
    /// Returns None if the token is not defined in this stylesheet.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        self.colors.get(token).map(|s| s.as_str())
    }

    /// This stylesheet layered over the default palette
    pub fn merged_with_defaults(&self) -> Stylesheet {
        let mut merged = Self::default();
        merged.name = self.name.clone();
        merged
            .colors
            .extend(self.colors.iter().map(|(k, v)| (k.clone(), v.clone())));
        merged
    }
}

impl Default for Stylesheet {
    fn default() -> Self {
        Self::from_str(DEFAULT_PALETTE).expect("Default palette should be valid TOML")
    }
}
