//! Section assignment and packing
//!
//! Stalls sharing a floor, street and side of street form one list. Walking
//! that list in position order, each stall goes to the west side of the
//! divider while the west budget allows, otherwise to the east side, and its
//! offset is the running width already used on that side.
//!
//! Two entry points compute the same answer:
//!
//! - [`assign_section`] replays the walk for a single target stall.
//! - [`SectionTable`] walks every section once and answers lookups.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::stall::{ParsedIdentifier, StallNumber, StallRecord};

use super::config::{CapacityMode, MapConfig, StreetDefinition};
use super::types::{SectionAssignment, SideOfDivider, SideOfStreet, SkipReason};

/// Identifies one packing list: floor, street and side of street
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectionKey {
    pub floor: u8,
    pub street: String,
    pub side_of_street: SideOfStreet,
}

impl SectionKey {
    fn new(parsed: &ParsedIdentifier, street: &StreetDefinition, config: &MapConfig) -> Self {
        Self {
            floor: parsed.floor,
            street: street.name.clone(),
            side_of_street: SideOfStreet::from_position(parsed.position, config.north_parity),
        }
    }
}

/// Resolve a stall's street, rejecting unknown and hidden streets
pub fn resolve_street<'c>(
    config: &'c MapConfig,
    name: &str,
) -> Result<&'c StreetDefinition, SkipReason> {
    match config.street(name) {
        None => Err(SkipReason::UnknownStreet),
        Some(street) if !street.is_displayed() => Err(SkipReason::HiddenStreet),
        Some(street) => Ok(street),
    }
}

/// Pack one stall against the full list by replaying its section's walk
///
/// `stalls` is the full list the target belongs to; records on other floors,
/// streets or sides are ignored. When several records share the target's
/// number, the first one reached in position order decides the placement.
pub fn assign_section(
    target: &StallRecord,
    stalls: &[StallRecord],
    config: &MapConfig,
) -> Result<SectionAssignment, SkipReason> {
    let street = resolve_street(config, &target.street_name)?;
    let key = SectionKey::new(&target.parsed(), street, config);

    let mut members: Vec<Member<'_>> = stalls
        .iter()
        .filter(|record| record.street_name == target.street_name)
        .map(Member::new)
        .filter(|member| SectionKey::new(&member.parsed, street, config) == key)
        .collect();
    sort_members(&mut members);

    let mut packer = SectionPacker::new(config, &key);
    for member in &members {
        let placed = packer.place(member.record.width_or(config.default_stall_width));
        if member.record.stall_number == target.stall_number {
            return placed.ok_or(SkipReason::CapacityExhausted);
        }
    }

    Err(SkipReason::Unlisted)
}

/// Section assignments for a whole stall list, computed in one pass
#[derive(Debug, Clone, Default)]
pub struct SectionTable {
    sections: BTreeMap<SectionKey, HashMap<StallNumber, Option<SectionAssignment>>>,
}

impl SectionTable {
    /// Group stalls by section, sort each section, and pack it once
    pub fn build<'a>(stalls: impl IntoIterator<Item = &'a StallRecord>, config: &MapConfig) -> Self {
        let mut grouped: BTreeMap<SectionKey, Vec<Member<'a>>> = BTreeMap::new();
        for record in stalls {
            let Ok(street) = resolve_street(config, &record.street_name) else {
                continue;
            };
            let member = Member::new(record);
            let key = SectionKey::new(&member.parsed, street, config);
            grouped.entry(key).or_default().push(member);
        }

        let mut sections = BTreeMap::new();
        for (key, mut members) in grouped {
            sort_members(&mut members);

            let mut packer = SectionPacker::new(config, &key);
            let mut placements = HashMap::with_capacity(members.len());
            for member in &members {
                let placed = packer.place(member.record.width_or(config.default_stall_width));
                placements
                    .entry(member.record.stall_number.clone())
                    .or_insert(placed);
            }
            sections.insert(key, placements);
        }

        Self { sections }
    }

    /// Look up the assignment computed for a stall
    pub fn lookup(
        &self,
        record: &StallRecord,
        config: &MapConfig,
    ) -> Result<SectionAssignment, SkipReason> {
        let street = resolve_street(config, &record.street_name)?;
        let key = SectionKey::new(&record.parsed(), street, config);

        match self
            .sections
            .get(&key)
            .and_then(|placements| placements.get(&record.stall_number))
        {
            Some(Some(assignment)) => Ok(*assignment),
            Some(None) => Err(SkipReason::CapacityExhausted),
            None => Err(SkipReason::Unlisted),
        }
    }

    /// Number of distinct sections seen
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }
}

/// A stall with its decoded number, as sorted within a section
struct Member<'a> {
    record: &'a StallRecord,
    parsed: ParsedIdentifier,
}

impl<'a> Member<'a> {
    fn new(record: &'a StallRecord) -> Self {
        Self {
            record,
            parsed: record.parsed(),
        }
    }
}

/// Position ascending; at equal positions the base stall precedes its
/// fractional companions, which keep ascending fractional order
fn sort_members(members: &mut [Member<'_>]) {
    members.sort_by(|a, b| compare_identifiers(&a.parsed, &b.parsed));
}

fn compare_identifiers(a: &ParsedIdentifier, b: &ParsedIdentifier) -> Ordering {
    a.position
        .cmp(&b.position)
        .then(a.is_fractional.cmp(&b.is_fractional))
        .then_with(|| {
            let fa = a.fractional_value.unwrap_or(0.0);
            let fb = b.fractional_value.unwrap_or(0.0);
            fa.total_cmp(&fb)
        })
}

#[derive(Debug, Default, Clone, Copy)]
struct SideFill {
    used_blocks: u32,
    stalls: u32,
}

/// Running fill state for one section's walk
struct SectionPacker<'c> {
    capacity: &'c CapacityMode,
    key: &'c SectionKey,
    west: SideFill,
    east: SideFill,
}

impl<'c> SectionPacker<'c> {
    fn new(config: &'c MapConfig, key: &'c SectionKey) -> Self {
        Self {
            capacity: &config.capacity,
            key,
            west: SideFill::default(),
            east: SideFill::default(),
        }
    }

    fn choose_side(&self, width: u32) -> Option<SideOfDivider> {
        match self.capacity {
            CapacityMode::BlockBudget { west, east } => {
                if self.west.used_blocks.saturating_add(width) <= *west {
                    Some(SideOfDivider::West)
                } else if east.map_or(true, |limit| {
                    self.east.used_blocks.saturating_add(width) <= limit
                }) {
                    Some(SideOfDivider::East)
                } else {
                    None
                }
            }
            CapacityMode::StallCount { .. } => {
                let limit = |side| {
                    self.capacity
                        .stall_limit(&self.key.street, self.key.side_of_street, side)
                };
                if self.west.stalls < limit(SideOfDivider::West) {
                    Some(SideOfDivider::West)
                } else if self.east.stalls < limit(SideOfDivider::East) {
                    Some(SideOfDivider::East)
                } else {
                    None
                }
            }
        }
    }

    /// Place the next stall in sequence; `None` leaves the fill untouched
    fn place(&mut self, width: u32) -> Option<SectionAssignment> {
        let side = self.choose_side(width)?;
        let fill = match side {
            SideOfDivider::West => &mut self.west,
            SideOfDivider::East => &mut self.east,
        };

        let offset = fill.used_blocks;
        fill.used_blocks = fill.used_blocks.saturating_add(width);
        fill.stalls += 1;

        tracing::trace!(
            street = %self.key.street,
            side_of_street = ?self.key.side_of_street,
            side_of_divider = ?side,
            offset,
            width,
            "packed stall"
        );

        Some(SectionAssignment {
            side_of_street: self.key.side_of_street,
            side_of_divider: side,
            offset_in_section: offset,
        })
    }
}
