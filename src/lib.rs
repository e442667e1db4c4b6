//! Mall Map - floor maps for a mall directory
//!
//! This library turns the mall directory's stall list into a top-down map of
//! one floor: stall numbers are decoded into floor and position, stalls are
//! packed along their street west or east of Main Street, and the result is
//! projected into pixel rectangles and rendered as SVG.
//!
//! # Example
//!
//! ```rust
//! use mall_map::render;
//!
//! let svg = render(r#"{"shops": [{"StallNumber": 101, "StreetName": "Wall Street"}]}"#, 1).unwrap();
//! assert!(svg.contains("<svg"));
//! assert!(svg.contains("stall-101"));
//! ```

pub mod error;
pub mod layout;
pub mod renderer;
pub mod stall;
pub mod stylesheet;

pub use error::LoadError;
pub use layout::{compute_floor, map_geometry, FloorLayout, LayoutError, LayoutRect, MapConfig};
pub use renderer::{render_svg, render_svg_with_stylesheet, SvgConfig};
pub use stall::{MallDirectory, StallNumber, StallRecord};

use std::path::Path;

use thiserror::Error;

// Re-export Stylesheet for public API
pub use stylesheet::{Stylesheet, StylesheetError};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error reading the directory document
    #[error("load error: {0}")]
    Load(#[from] LoadError),

    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error reading or parsing a stylesheet
    #[error("stylesheet error: {0}")]
    Stylesheet(#[from] StylesheetError),

    /// Error serializing layout output
    #[error("failed to serialize layout: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Floor to lay out
    pub floor: u8,
    /// Map layout configuration
    pub map: MapConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
    /// Stylesheet for colour resolution
    pub stylesheet: Stylesheet,
    /// Debug mode: grid lines, skipped-stall comments, layout dump on stderr
    pub debug: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            floor: 1,
            map: MapConfig::default(),
            svg: SvgConfig::default(),
            stylesheet: Stylesheet::default(),
            debug: false,
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the floor to render
    pub fn with_floor(mut self, floor: u8) -> Self {
        self.floor = floor;
        self
    }

    /// Set the map configuration
    pub fn with_map(mut self, config: MapConfig) -> Self {
        self.map = config;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, config: SvgConfig) -> Self {
        self.svg = config;
        self
    }

    /// Set the stylesheet for colour resolution
    pub fn with_stylesheet(mut self, stylesheet: Stylesheet) -> Self {
        self.stylesheet = stylesheet;
        self
    }

    /// Load the stylesheet from a TOML file
    pub fn with_stylesheet_file(self, path: &Path) -> Result<Self, RenderError> {
        let stylesheet = Stylesheet::from_file(path)?;
        Ok(self.with_stylesheet(stylesheet))
    }

    /// Enable or disable debug mode
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// Render one floor of a directory JSON document to SVG with default configuration
pub fn render(source: &str, floor: u8) -> Result<String, RenderError> {
    render_with_config(source, &RenderConfig::default().with_floor(floor))
}

/// Render one floor of a directory JSON document to SVG
///
/// # Example
///
/// ```rust
/// use mall_map::{render_with_config, RenderConfig, SvgConfig};
///
/// let config = RenderConfig::new()
///     .with_floor(2)
///     .with_svg(SvgConfig::default().with_street_labels(false));
///
/// let json = r#"{"shops": [{"StallNumber": 204, "StreetName": "Woke Ave", "IGN": "Fox"}]}"#;
/// let svg = render_with_config(json, &config).unwrap();
/// assert!(svg.contains("stall-204"));
/// ```
pub fn render_with_config(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    let directory = MallDirectory::from_json(source)?;
    render_directory(&directory, config)
}

/// Render one floor of an already loaded directory to SVG
pub fn render_directory(
    directory: &MallDirectory,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let layout = compute_floor(&directory.shops, config.floor, &config.map)?;
    let geometry = map_geometry(&config.map);

    if config.debug {
        dump_layout(&layout);
    }

    Ok(render_svg_with_stylesheet(
        &layout,
        &geometry,
        &config.svg,
        &config.stylesheet,
        config.debug,
    ))
}

/// Lay out one floor of a directory JSON document and serialize it as JSON
pub fn layout_json(source: &str, config: &RenderConfig) -> Result<String, RenderError> {
    let directory = MallDirectory::from_json(source)?;
    layout_directory_json(&directory, config)
}

/// Lay out one floor of an already loaded directory and serialize it as JSON
pub fn layout_directory_json(
    directory: &MallDirectory,
    config: &RenderConfig,
) -> Result<String, RenderError> {
    let layout = compute_floor(&directory.shops, config.floor, &config.map)?;

    if config.debug {
        dump_layout(&layout);
    }

    Ok(serde_json::to_string_pretty(&layout)?)
}

fn dump_layout(layout: &FloorLayout) {
    eprintln!("=== Layout Debug: {} ===", layout.label);
    for stall in &layout.stalls {
        eprintln!(
            "[{}] {} {:?}/{:?} grid=({}, {}) x={:.1} y={:.1} w={:.1} h={:.1}",
            stall.stall_number,
            stall.street_name,
            stall.side_of_street,
            stall.side_of_divider,
            stall.grid.x,
            stall.grid.y,
            stall.bounds.x,
            stall.bounds.y,
            stall.bounds.width,
            stall.bounds.height
        );
    }
    for skipped in &layout.skipped {
        eprintln!(
            "[{}] {} skipped: {:?}",
            skipped.stall_number, skipped.street_name, skipped.reason
        );
    }
    eprintln!("====================");
}

#[cfg(test)]
mod tests {
    use super::*;

    const MALL: &str = r#"{
        "shops": [
            {"StallNumber": 101, "StreetName": "Wall Street", "IGN": "Birb", "StallName": "Feathers"},
            {"StallNumber": 102, "StreetName": "Wall Street"},
            {"StallNumber": 103, "StreetName": "Five"},
            {"StallNumber": 201, "StreetName": "Artist Alley", "ItemsSold": "stairway"}
        ]
    }"#;

    #[test]
    fn test_render_simple_floor() {
        let svg = render(MALL, 1).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert!(svg.contains(r#"id="stall-101""#));
        assert!(svg.contains(r#"id="stall-102""#));
        assert!(!svg.contains(r#"id="stall-103""#));
        assert!(!svg.contains(r#"id="stall-201""#));
    }

    #[test]
    fn test_render_other_floor() {
        let svg = render(MALL, 2).unwrap();
        assert!(svg.contains(r#"id="stall-201""#));
        assert!(svg.contains("mall-stairway"));
    }

    #[test]
    fn test_render_invalid_json_error() {
        let result = render("{\"shops\": [", 1);
        assert!(matches!(result, Err(RenderError::Load(_))));
    }

    #[test]
    fn test_render_unknown_floor_error() {
        let result = render(MALL, 9);
        assert!(matches!(result, Err(RenderError::Layout(_))));
    }

    #[test]
    fn test_stylesheet_file_errors() {
        let demos = Path::new(env!("CARGO_MANIFEST_DIR")).join("demos");

        let config = RenderConfig::new()
            .with_stylesheet_file(&demos.join("night.toml"))
            .unwrap();
        assert_eq!(config.stylesheet.name.as_deref(), Some("Night Market"));

        let missing = RenderConfig::new().with_stylesheet_file(&demos.join("missing.toml"));
        assert!(matches!(
            missing,
            Err(RenderError::Stylesheet(StylesheetError::IoError(_)))
        ));

        let malformed = RenderConfig::new().with_stylesheet_file(&demos.join("the-mall.json"));
        match malformed {
            Err(e @ RenderError::Stylesheet(StylesheetError::ParseError(_))) => {
                assert!(e.to_string().starts_with("stylesheet error: "));
            }
            other => panic!("expected stylesheet parse error, got {:?}", other.map(|c| c.floor)),
        }
    }

    #[test]
    fn test_layout_json() {
        let json = layout_json(MALL, &RenderConfig::default()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["floor"], 1);
        assert_eq!(value["stalls"][0]["stall_number"], "101");
        assert_eq!(value["stalls"][0]["x"], 120.0);
        assert_eq!(value["stalls"][0]["y"], 224.0);
        assert_eq!(value["stalls"][0]["side_of_street"], "south");
        assert_eq!(value["stalls"][0]["display_name"], "Feathers");
        assert_eq!(value["skipped"][0]["reason"], "hidden_street");
    }

    #[test]
    fn test_render_with_debug() {
        let config = RenderConfig::new().with_debug(true);
        let svg = render_with_config(MALL, &config).unwrap();
        assert!(svg.contains("<line"));
        assert!(svg.contains("skipped 103"));
    }
}
