//! Layout computation engine
//!
//! A layout pass takes the full stall list, keeps the stalls on the requested
//! floor, packs every section once through a [`SectionTable`], and projects
//! each placed stall into pixel space. Nothing is cached between passes: the
//! same list and configuration always produce the same [`FloorLayout`].

use crate::stall::StallRecord;

use super::config::MapConfig;
use super::error::LayoutError;
use super::projector::project;
use super::section::{resolve_street, SectionTable};
use super::types::*;

/// Horizontal gap between a street label and the map edge, in pixels
const LABEL_GAP: f64 = 15.0;

/// Vertical nudge placing a street label inside its street band
const LABEL_DROP: f64 = 8.0;

/// Compute the layout of one floor
///
/// Stalls on other floors are ignored. Stalls on unknown or hidden streets,
/// and stalls beyond section capacity, are reported in `skipped` rather
/// than failing the pass.
pub fn compute_floor(
    stalls: &[StallRecord],
    floor: u8,
    config: &MapConfig,
) -> Result<FloorLayout, LayoutError> {
    config.validate()?;
    let floor_def = config
        .floor(floor)
        .ok_or_else(|| LayoutError::unknown_floor(floor, config.floors.iter().map(|f| f.number)))?;

    let on_floor: Vec<&StallRecord> = stalls
        .iter()
        .filter(|stall| stall.parsed().floor == floor)
        .collect();
    let table = SectionTable::build(on_floor.iter().copied(), config);

    let mut layout = FloorLayout {
        floor,
        label: floor_def.label.clone(),
        stalls: Vec::with_capacity(on_floor.len()),
        skipped: Vec::new(),
    };

    for record in on_floor {
        let placed = resolve_street(config, &record.street_name).and_then(|street| {
            table
                .lookup(record, config)
                .map(|assignment| project(record, street, &assignment, config))
        });

        match placed {
            Ok(rect) => layout.stalls.push(rect),
            Err(reason) => {
                match reason {
                    SkipReason::CapacityExhausted => tracing::warn!(
                        stall = %record.stall_number,
                        street = %record.street_name,
                        "no room left for stall in its section"
                    ),
                    _ => tracing::debug!(
                        stall = %record.stall_number,
                        street = %record.street_name,
                        ?reason,
                        "stall left off the map"
                    ),
                }
                layout.skipped.push(SkippedStall {
                    stall_number: record.stall_number.clone(),
                    street_name: record.street_name.clone(),
                    reason,
                });
            }
        }
    }

    tracing::debug!(
        floor,
        placed = layout.stalls.len(),
        skipped = layout.skipped.len(),
        sections = table.section_count(),
        "computed floor layout"
    );

    Ok(layout)
}

/// Static geometry of the map: overall size, streets and the divider
pub fn map_geometry(config: &MapConfig) -> MapGeometry {
    let block = config.block_size;
    let margin = config.map_margin;

    let streets = config
        .displayed_streets()
        .map(|street| {
            let y = margin + f64::from(street.y_block) * block;
            StreetGeometry {
                name: street.name.clone(),
                bounds: BoundingBox::new(
                    margin,
                    y,
                    f64::from(config.street_length) * block,
                    f64::from(config.street_width) * block,
                ),
                label: Point::new(margin - LABEL_GAP, y + LABEL_DROP),
            }
        })
        .collect();

    let divider_bounds = BoundingBox::new(
        margin + f64::from(config.divider.x_block) * block,
        margin,
        f64::from(config.divider.width) * block,
        f64::from(config.grid_height) * block,
    );
    let divider = StreetGeometry {
        name: config.divider.name.clone(),
        label: Point::new(divider_bounds.center().x, margin - LABEL_GAP),
        bounds: divider_bounds,
    };

    MapGeometry {
        width: f64::from(config.grid_width) * block + 2.0 * margin,
        height: f64::from(config.grid_height) * block + 2.0 * margin,
        block_size: block,
        grid_bounds: BoundingBox::new(
            margin,
            margin,
            f64::from(config.grid_width) * block,
            f64::from(config.grid_height) * block,
        ),
        streets,
        divider,
    }
}
