//! Core types for the layout engine

use serde::{Deserialize, Serialize};

use crate::stall::{StallKind, StallNumber};

use super::config::Parity;

/// A 2D point in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A rectangle in pixel space
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Check if this bounding box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// A rectangle in grid blocks, before pixel conversion
///
/// `y` can be negative for north-side stalls on a street near the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridRect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl GridRect {
    /// Convert to pixels: `margin + block * size` for the origin, `block * size` for extents
    pub fn to_pixels(&self, block_size: f64, margin: f64) -> BoundingBox {
        BoundingBox::new(
            margin + self.x as f64 * block_size,
            margin + self.y as f64 * block_size,
            f64::from(self.width) * block_size,
            f64::from(self.height) * block_size,
        )
    }
}

/// Which side of its street a stall faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideOfStreet {
    North,
    South,
}

impl SideOfStreet {
    /// Derive the side from position parity
    pub fn from_position(position: u32, north_parity: Parity) -> Self {
        let even = position % 2 == 0;
        match (north_parity, even) {
            (Parity::Even, true) | (Parity::Odd, false) => SideOfStreet::North,
            _ => SideOfStreet::South,
        }
    }
}

/// Which side of the divider street a stall is packed into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideOfDivider {
    West,
    East,
}

/// Result of packing a stall into its section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionAssignment {
    pub side_of_street: SideOfStreet,
    pub side_of_divider: SideOfDivider,
    /// Blocks from the start of the section (map edge for west, divider edge for east)
    pub offset_in_section: u32,
}

/// Why a stall was left off the map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The street name has no configuration entry
    UnknownStreet,
    /// The street is configured but not displayed
    HiddenStreet,
    /// Neither side of the divider had room
    CapacityExhausted,
    /// The stall is not part of the list being packed
    Unlisted,
}

/// A placed stall, ready for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRect {
    #[serde(flatten)]
    pub bounds: BoundingBox,
    pub grid: GridRect,
    pub side_of_street: SideOfStreet,
    pub side_of_divider: SideOfDivider,
    pub street_name: String,
    pub stall_number: StallNumber,
    pub kind: StallKind,
    pub occupied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

/// A stall that produced no rectangle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedStall {
    pub stall_number: StallNumber,
    pub street_name: String,
    pub reason: SkipReason,
}

/// Everything computed for one floor in a single layout pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorLayout {
    pub floor: u8,
    pub label: String,
    /// Placed stalls in input order
    pub stalls: Vec<LayoutRect>,
    pub skipped: Vec<SkippedStall>,
}

impl FloorLayout {
    /// Look up a placed stall by its number text
    pub fn stall(&self, number: &str) -> Option<&LayoutRect> {
        self.stalls.iter().find(|s| s.stall_number.as_str() == number)
    }
}

/// A drawn street: its rectangle and where its label goes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreetGeometry {
    pub name: String,
    pub bounds: BoundingBox,
    pub label: Point,
}

/// Static map geometry derived from configuration alone
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapGeometry {
    /// Total width in pixels including margins
    pub width: f64,
    /// Total height in pixels including margins
    pub height: f64,
    /// Pixels per block
    pub block_size: f64,
    /// The block grid area, excluding margins
    pub grid_bounds: BoundingBox,
    pub streets: Vec<StreetGeometry>,
    pub divider: StreetGeometry,
}
