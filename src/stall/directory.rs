//! The directory document: every stall in the mall

use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::LoadError;

use super::record::StallRecord;

/// The `{ "shops": [...] }` document served by the directory endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MallDirectory {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub shops: Vec<StallRecord>,
}

/// Stall counts for one floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FloorSummary {
    pub floor: u8,
    pub total: usize,
    pub occupied: usize,
    pub vacant: usize,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StallRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<StallRecord>>::deserialize(deserializer)?.unwrap_or_default())
}

impl MallDirectory {
    pub fn new(shops: Vec<StallRecord>) -> Self {
        Self { shops }
    }

    /// Parse a directory document from JSON text
    pub fn from_json(source: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Read and parse a directory document from a file
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        Self::from_json(&content)
    }

    /// Stalls whose number places them on `floor`, in document order
    pub fn floor_stalls(&self, floor: u8) -> impl Iterator<Item = &StallRecord> {
        self.shops
            .iter()
            .filter(move |stall| stall.parsed().floor == floor)
    }

    /// Count stalls on a floor, split by occupancy
    pub fn floor_summary(&self, floor: u8) -> FloorSummary {
        let (total, occupied) = self
            .floor_stalls(floor)
            .fold((0, 0), |(total, occupied), stall| {
                (total + 1, occupied + usize::from(stall.is_occupied()))
            });

        FloorSummary {
            floor,
            total,
            occupied,
            vacant: total - occupied,
        }
    }
}

impl FloorSummary {
    /// Human-readable counter line, e.g. "12 stalls (5 occupied, 7 vacant)"
    pub fn describe(&self) -> String {
        format!(
            "{} stalls ({} occupied, {} vacant)",
            self.total, self.occupied, self.vacant
        )
    }
}
