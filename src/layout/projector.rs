//! Projection of section assignments into grid and pixel space

use crate::stall::StallRecord;

use super::config::{MapConfig, StreetDefinition};
use super::types::{GridRect, LayoutRect, SectionAssignment, SideOfDivider, SideOfStreet};

/// Grid rectangle for a stall of the given size
///
/// North-side stalls end at the street's top edge; south-side stalls start
/// at its bottom edge. East-side offsets count from the divider's east edge.
pub fn project_grid(
    street: &StreetDefinition,
    width: u32,
    depth: u32,
    assignment: &SectionAssignment,
    config: &MapConfig,
) -> GridRect {
    let street_y = i64::from(street.y_block);
    let y = match assignment.side_of_street {
        SideOfStreet::North => street_y - i64::from(depth),
        SideOfStreet::South => street_y + i64::from(config.street_width),
    };

    let offset = i64::from(assignment.offset_in_section);
    let x = match assignment.side_of_divider {
        SideOfDivider::West => offset,
        SideOfDivider::East => {
            i64::from(config.divider.x_block) + i64::from(config.divider.width) + offset
        }
    };

    GridRect {
        x,
        y,
        width,
        height: depth,
    }
}

/// Full rectangle for a placed stall, with the metadata the renderer needs
pub fn project(
    record: &StallRecord,
    street: &StreetDefinition,
    assignment: &SectionAssignment,
    config: &MapConfig,
) -> LayoutRect {
    let width = record.width_or(config.default_stall_width);
    let depth = record.depth_or(config.default_stall_depth);
    let grid = project_grid(street, width, depth, assignment, config);

    LayoutRect {
        bounds: grid.to_pixels(config.block_size, config.map_margin),
        grid,
        side_of_street: assignment.side_of_street,
        side_of_divider: assignment.side_of_divider,
        street_name: street.name.clone(),
        stall_number: record.stall_number.clone(),
        kind: record.kind(),
        occupied: record.is_occupied(),
        display_name: record.display_name.clone(),
    }
}
