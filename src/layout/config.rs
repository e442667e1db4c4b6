//! Configuration for the map layout
//!
//! Defaults reproduce the reference mall: four displayed streets plus one
//! hidden street, a 117x102 block grid, Main Street dividing west from east
//! at block 55, and a 54-block budget on the west side.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

use super::error::LayoutError;
use super::types::{SideOfDivider, SideOfStreet};

/// A horizontal street stalls line up along
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreetDefinition {
    pub name: String,
    /// Display/ordering index; `None` marks a street that is not drawn
    #[serde(default)]
    pub index: Option<u32>,
    /// Top edge of the street in blocks from the top of the map
    #[serde(default)]
    pub y_block: i32,
}

impl StreetDefinition {
    pub fn new(name: impl Into<String>, index: u32, y_block: i32) -> Self {
        Self {
            name: name.into(),
            index: Some(index),
            y_block,
        }
    }

    /// A street that exists in the data but is never drawn
    pub fn hidden(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            index: None,
            y_block: -1,
        }
    }

    pub fn is_displayed(&self) -> bool {
        self.index.is_some()
    }
}

/// The vertical street splitting each floor into west and east sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividerStreet {
    pub name: String,
    /// Left edge in blocks
    pub x_block: u32,
    /// Width in blocks
    pub width: u32,
}

impl Default for DividerStreet {
    fn default() -> Self {
        Self {
            name: "Main Street".to_string(),
            x_block: 55,
            width: 9,
        }
    }
}

/// Parity of stall positions that face north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    #[default]
    Even,
    Odd,
}

/// Stall-count limit for one section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLimit {
    pub street: String,
    pub side_of_street: SideOfStreet,
    pub side_of_divider: SideOfDivider,
    pub stalls: u32,
}

/// How much each side of the divider may hold
///
/// A deployment uses exactly one mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CapacityMode {
    /// Uniform block budget per divider side
    ///
    /// `east = None` leaves the east side unbounded.
    BlockBudget { west: u32, east: Option<u32> },
    /// Explicit stall counts per (street, side of street, side of divider)
    ///
    /// Sections without an entry hold no stalls.
    StallCount { limits: Vec<SectionLimit> },
}

impl Default for CapacityMode {
    fn default() -> Self {
        CapacityMode::BlockBudget {
            west: 54,
            east: None,
        }
    }
}

impl CapacityMode {
    /// Look up a stall-count limit; 0 when absent or in block-budget mode
    pub fn stall_limit(&self, street: &str, side: SideOfStreet, divider: SideOfDivider) -> u32 {
        match self {
            CapacityMode::BlockBudget { .. } => 0,
            CapacityMode::StallCount { limits } => limits
                .iter()
                .find(|l| {
                    l.street == street && l.side_of_street == side && l.side_of_divider == divider
                })
                .map_or(0, |l| l.stalls),
        }
    }
}

/// A floor the map can show
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorDefinition {
    pub number: u8,
    pub label: String,
}

impl FloorDefinition {
    pub fn new(number: u8, label: impl Into<String>) -> Self {
        Self {
            number,
            label: label.into(),
        }
    }
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Map width in blocks
    pub grid_width: u32,

    /// Map height in blocks
    pub grid_height: u32,

    /// Pixels per block
    pub block_size: f64,

    /// Pixel margin around the grid, leaving room for labels
    pub map_margin: f64,

    /// Length of horizontal streets in blocks
    pub street_length: u32,

    /// Visual width of horizontal streets in blocks
    pub street_width: u32,

    pub divider: DividerStreet,

    pub streets: Vec<StreetDefinition>,

    pub default_stall_width: u32,

    pub default_stall_depth: u32,

    /// Which position parity sits on the north side of a street
    pub north_parity: Parity,

    pub capacity: CapacityMode,

    pub floors: Vec<FloorDefinition>,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            grid_width: 117,
            grid_height: 102,
            block_size: 8.0,
            map_margin: 120.0,
            street_length: 117,
            street_width: 3,
            divider: DividerStreet::default(),
            streets: vec![
                StreetDefinition::new("Wall Street", 0, 10),
                StreetDefinition::new("Artist Alley", 1, 30),
                StreetDefinition::new("Woke Ave", 2, 50),
                StreetDefinition::new("Poland Street", 3, 70),
                StreetDefinition::hidden("Five"),
            ],
            default_stall_width: 4,
            default_stall_depth: 8,
            north_parity: Parity::Even,
            capacity: CapacityMode::default(),
            floors: vec![
                FloorDefinition::new(1, "First Floor"),
                FloorDefinition::new(2, "Second Floor"),
                FloorDefinition::new(3, "Third Floor"),
                FloorDefinition::new(4, "Fourth Floor"),
                FloorDefinition::new(5, "Fifth Floor"),
            ],
        }
    }
}

impl MapConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_str(&content)
    }

    /// Load configuration from TOML text; missing keys keep their defaults
    pub fn from_str(content: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(content)?)
    }

    /// Set the pixel size of one block
    pub fn with_block_size(mut self, block_size: f64) -> Self {
        self.block_size = block_size;
        self
    }

    /// Set the pixel margin around the grid
    pub fn with_map_margin(mut self, margin: f64) -> Self {
        self.map_margin = margin;
        self
    }

    /// Set the visual street width in blocks
    pub fn with_street_width(mut self, width: u32) -> Self {
        self.street_width = width;
        self
    }

    /// Replace the street table
    pub fn with_streets(mut self, streets: Vec<StreetDefinition>) -> Self {
        self.streets = streets;
        self
    }

    /// Set the default stall dimensions in blocks
    pub fn with_default_stall_size(mut self, width: u32, depth: u32) -> Self {
        self.default_stall_width = width;
        self.default_stall_depth = depth;
        self
    }

    pub fn with_capacity(mut self, capacity: CapacityMode) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_north_parity(mut self, parity: Parity) -> Self {
        self.north_parity = parity;
        self
    }

    /// Find a street by exact name
    pub fn street(&self, name: &str) -> Option<&StreetDefinition> {
        self.streets.iter().find(|s| s.name == name)
    }

    /// Streets that are drawn, in table order
    pub fn displayed_streets(&self) -> impl Iterator<Item = &StreetDefinition> {
        self.streets.iter().filter(|s| s.is_displayed())
    }

    pub fn floor(&self, number: u8) -> Option<&FloorDefinition> {
        self.floors.iter().find(|f| f.number == number)
    }

    /// Check the configuration is usable for layout
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.block_size.is_finite() && self.block_size > 0.0) {
            return Err(LayoutError::invalid_config(format!(
                "block size must be positive, got {}",
                self.block_size
            )));
        }
        if !(self.map_margin.is_finite() && self.map_margin >= 0.0) {
            return Err(LayoutError::invalid_config(format!(
                "map margin must be non-negative, got {}",
                self.map_margin
            )));
        }
        if self.default_stall_width == 0 || self.default_stall_depth == 0 {
            return Err(LayoutError::invalid_config(
                "default stall dimensions must be positive",
            ));
        }
        let divider_end = u64::from(self.divider.x_block) + u64::from(self.divider.width);
        if divider_end > u64::from(self.grid_width) {
            return Err(LayoutError::invalid_config(format!(
                "divider street ends at block {} beyond grid width {}",
                divider_end, self.grid_width
            )));
        }

        let mut seen = HashSet::new();
        for street in &self.streets {
            if !seen.insert(street.name.as_str()) {
                return Err(LayoutError::DuplicateStreet {
                    name: street.name.clone(),
                });
            }
        }

        Ok(())
    }
}
