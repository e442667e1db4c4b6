//! Stall records as delivered by the directory endpoint
//!
//! This module owns everything about the input side of the map: decoding
//! stall numbers into floor and position, the per-shop record model, and the
//! directory document that groups them.

pub mod directory;
pub mod number;
pub mod record;

pub use directory::{FloorSummary, MallDirectory};
pub use number::{InvalidStallNumber, ParsedIdentifier, StallNumber};
pub use record::{StallKind, StallRecord};
