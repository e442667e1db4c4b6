//! SVG renderer for floor layouts
//!
//! This module takes a FloorLayout plus the static map geometry and produces
//! an SVG string with CSS classes for styling.

pub mod config;
pub mod svg;

pub use config::SvgConfig;
pub use svg::{render_svg, render_svg_with_stylesheet};
