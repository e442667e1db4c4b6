//! The per-shop record and its derived properties

use serde::{Deserialize, Serialize};

use super::number::{ParsedIdentifier, StallNumber};

/// What occupies a stall slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StallKind {
    /// A leasable stall
    Normal,
    /// A passage between stalls; takes space but carries no number
    Alleyway,
    /// A stairway between floors; takes space but carries no number
    Stairway,
}

impl StallKind {
    /// Classify from the free-text "items sold" field
    pub fn from_items_sold(items_sold: Option<&str>) -> Self {
        let Some(items) = items_sold else {
            return StallKind::Normal;
        };
        match items.trim().to_lowercase().as_str() {
            "alleyway" => StallKind::Alleyway,
            "stairway" => StallKind::Stairway,
            _ => StallKind::Normal,
        }
    }

    /// CSS class name used by the renderer
    pub fn css_class(self) -> &'static str {
        match self {
            StallKind::Normal => "normal",
            StallKind::Alleyway => "alleyway",
            StallKind::Stairway => "stairway",
        }
    }

    /// Whether the stall number is drawn on the map
    pub fn shows_number(self) -> bool {
        self == StallKind::Normal
    }
}

/// One entry of the directory's `shops` list
///
/// Field names follow the directory endpoint's JSON. Everything but the
/// stall number is optional; absent descriptive fields mean a vacant or
/// unlisted stall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StallRecord {
    #[serde(rename = "StallNumber")]
    pub stall_number: StallNumber,

    #[serde(rename = "StreetName", default)]
    pub street_name: String,

    /// Width along the street in blocks
    #[serde(rename = "stall_width", default)]
    pub width: Option<u32>,

    /// Depth away from the street in blocks
    #[serde(rename = "stall_depth", default)]
    pub depth: Option<u32>,

    /// In-game name of the occupant
    #[serde(rename = "IGN", default)]
    pub occupant_name: Option<String>,

    #[serde(rename = "ItemsSold", default)]
    pub items_sold: Option<String>,

    #[serde(rename = "StallName", default)]
    pub display_name: Option<String>,
}

impl StallRecord {
    /// Create a vacant stall on a street with default dimensions
    pub fn new(stall_number: StallNumber, street_name: impl Into<String>) -> Self {
        Self {
            stall_number,
            street_name: street_name.into(),
            width: None,
            depth: None,
            occupant_name: None,
            items_sold: None,
            display_name: None,
        }
    }

    pub fn with_width(mut self, width: u32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = Some(depth);
        self
    }

    pub fn with_occupant(mut self, name: impl Into<String>) -> Self {
        self.occupant_name = Some(name.into());
        self
    }

    pub fn with_items_sold(mut self, items: impl Into<String>) -> Self {
        self.items_sold = Some(items.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn parsed(&self) -> ParsedIdentifier {
        self.stall_number.parse()
    }

    /// Width in blocks, falling back when absent or zero
    pub fn width_or(&self, default: u32) -> u32 {
        self.width.filter(|w| *w > 0).unwrap_or(default)
    }

    /// Depth in blocks, falling back when absent or zero
    pub fn depth_or(&self, default: u32) -> u32 {
        self.depth.filter(|d| *d > 0).unwrap_or(default)
    }

    pub fn kind(&self) -> StallKind {
        StallKind::from_items_sold(self.items_sold.as_deref())
    }

    /// Occupied when an occupant name is present and not blank
    pub fn is_occupied(&self) -> bool {
        self.occupant_name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty())
    }
}
