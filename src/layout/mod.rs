//! Layout engine for computing stall positions on the map
//!
//! Three stages run in sequence for every stall of a floor:
//!
//! 1. The stall number is decoded into floor and position ([`crate::stall::number`]).
//! 2. The stall is packed into its section west or east of the divider ([`section`]).
//! 3. The section offset is projected into grid and pixel space ([`projector`]).
//!
//! [`compute_floor`] runs all three for a floor and collects the result.

pub mod config;
pub mod engine;
pub mod error;
pub mod projector;
pub mod section;
pub mod types;

pub use config::{
    CapacityMode, DividerStreet, FloorDefinition, MapConfig, Parity, SectionLimit,
    StreetDefinition,
};
pub use engine::{compute_floor, map_geometry};
pub use error::LayoutError;
pub use projector::{project, project_grid};
pub use section::{assign_section, resolve_street, SectionKey, SectionTable};
pub use types::*;
