//! Error types for the layout engine
//!
//! Stalls that cannot be placed are not errors; they come back as skipped
//! entries in the floor layout. These errors cover configuration the engine
//! cannot work with at all.

use thiserror::Error;

/// Errors that can occur during layout computation
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Configuration values the engine cannot lay out with
    #[error("invalid map configuration: {reason}")]
    InvalidConfig { reason: String },

    /// Two street definitions share a name
    #[error("duplicate street definition '{name}'")]
    DuplicateStreet { name: String },

    /// Requested floor is not in the floor table
    #[error("unknown floor {floor} (configured floors: {configured})")]
    UnknownFloor { floor: u8, configured: String },
}

impl LayoutError {
    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an unknown floor error listing the configured floors
    pub fn unknown_floor(floor: u8, configured: impl IntoIterator<Item = u8>) -> Self {
        Self::UnknownFloor {
            floor,
            configured: configured
                .into_iter()
                .map(|f| f.to_string())
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}
