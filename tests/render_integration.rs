//! End-to-end rendering of the demo directory

use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use mall_map::{
    layout_json, render, render_with_config, MallDirectory, MapConfig, RenderConfig, RenderError,
    Stylesheet, SvgConfig,
};

fn demo_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

fn demo_source() -> String {
    fs::read_to_string(demo_path("the-mall.json")).expect("demo directory should exist")
}

fn line_containing<'a>(svg: &'a str, needle: &str) -> &'a str {
    svg.lines()
        .find(|line| line.contains(needle))
        .map(str::trim)
        .unwrap_or_else(|| panic!("no line containing {:?}", needle))
}

#[test]
fn test_renders_first_floor_stalls() {
    let svg = render(&demo_source(), 1).unwrap();

    assert!(svg.starts_with("<?xml"));
    assert!(svg.contains(r#"width="1176" height="1056" viewBox="0 0 1176 1056""#));
    assert_eq!(svg.matches(r#"<rect id="stall-"#).count(), 13);
    assert!(!svg.contains("stall-141"));
    assert!(!svg.contains("stall-201"));
}

#[test]
fn test_stall_rect_markup() {
    let svg = render(&demo_source(), 1).unwrap();

    insta::assert_snapshot!(
        line_containing(&svg, r#"id="stall-101""#),
        @r#"<rect id="stall-101" class="mall-stall mall-occupied mall-normal" x="120" y="224" width="32" height="64" data-stall-number="101" data-stall-type="normal" data-street="Wall Street"><title>Feather Emporium (101)</title></rect>"#
    );
}

#[test]
fn test_stall_kinds_and_occupancy_classes() {
    let svg = render(&demo_source(), 1).unwrap();

    assert!(line_containing(&svg, r#"id="stall-105""#).contains("mall-vacant mall-stairway"));
    assert!(line_containing(&svg, r#"id="stall-112""#).contains("mall-vacant mall-alleyway"));
    assert!(line_containing(&svg, r#"id="stall-103""#).contains("<title>Unnamed Stall (103)</title>"));

    // Only normal stalls carry a number label
    assert!(svg.contains(">101</text>"));
    assert!(!svg.contains(">105</text>"));
    assert!(!svg.contains(">112</text>"));
}

#[test]
fn test_draws_streets_before_stalls_and_labels_last() {
    let svg = render(&demo_source(), 1).unwrap();

    let street = svg.find(r#"data-street="Wall Street"/>"#).unwrap();
    let divider = svg.find(r#"class="mall-street mall-main-street""#).unwrap();
    let first_stall = svg.find(r#"id="stall-101""#).unwrap();
    let label = svg.find(">Main Street</text>").unwrap();

    assert!(street < first_stall);
    assert!(divider < first_stall);
    assert!(first_stall < label);
    assert!(svg.contains(r#"transform="rotate(-90 596 105)""#));
}

#[test]
fn test_custom_stylesheet_overrides_palette() {
    let stylesheet = Stylesheet::from_file(&demo_path("night.toml")).unwrap();
    assert_eq!(stylesheet.name.as_deref(), Some("Night Market"));

    let config = RenderConfig::new().with_stylesheet(stylesheet);
    let svg = render_with_config(&demo_source(), &config).unwrap();

    assert!(svg.contains("--background: #1e1e2e;"));
    assert!(svg.contains("--occupied: #89b4fa;"));
    // Tokens the stylesheet leaves out keep their defaults
    assert!(svg.contains("--stairway: #b48ead;"));
}

#[test]
fn test_map_config_changes_geometry() {
    let map = MapConfig::from_file(&demo_path("map.toml")).unwrap();
    let config = RenderConfig::new().with_map(map);
    let svg = render_with_config(&demo_source(), &config).unwrap();

    // 117 * 10 + 2 * 140 by 102 * 10 + 2 * 140
    assert!(svg.contains(r#"width="1450" height="1300""#));
    // Odd parity puts 101 north of Wall Street: y = 140 + (10 - 8) * 10
    assert!(line_containing(&svg, r#"id="stall-101""#).contains(r#"x="140" y="160""#));
}

#[test]
fn test_labels_and_numbers_can_be_switched_off() {
    let svg_config = SvgConfig::default()
        .with_street_labels(false)
        .with_stall_numbers(false)
        .without_class_prefix();
    let config = RenderConfig::new().with_svg(svg_config);
    let svg = render_with_config(&demo_source(), &config).unwrap();

    assert!(!svg.contains("<text"));
    assert!(svg.contains(r#"class="stall occupied normal""#));
}

#[test]
fn test_layout_json_lists_placed_and_skipped() {
    let json = layout_json(&demo_source(), &RenderConfig::new().with_floor(1)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["label"], "First Floor");
    assert_eq!(value["stalls"].as_array().map(Vec::len), Some(13));
    assert_eq!(value["stalls"][6]["stall_number"], "107.5");
    assert_eq!(value["stalls"][6]["grid"]["x"], 18);
    assert_eq!(value["skipped"][0]["stall_number"], "141");
    assert_eq!(value["skipped"][0]["reason"], "hidden_street");
}

#[test]
fn test_floor_summaries() {
    let directory = MallDirectory::from_json(&demo_source()).unwrap();

    insta::assert_snapshot!(directory.floor_summary(1).describe(), @"14 stalls (9 occupied, 5 vacant)");
    insta::assert_snapshot!(directory.floor_summary(2).describe(), @"2 stalls (1 occupied, 1 vacant)");
    insta::assert_snapshot!(directory.floor_summary(4).describe(), @"1 stalls (0 occupied, 1 vacant)");
}

#[test]
fn test_invalid_stall_number_is_a_load_error() {
    let source = r#"{"shops": [{"StallNumber": "12a", "StreetName": "Wall Street"}]}"#;

    match render(source, 1) {
        Err(RenderError::Load(e)) => {
            let report = e.format(source, "bad.json");
            assert!(report.contains("bad.json"));
        }
        other => panic!("expected load error, got {:?}", other.map(|s| s.len())),
    }
}

#[test]
fn test_null_shop_list_renders_empty_map() {
    let svg = render(r#"{"shops": null}"#, 3).unwrap();
    assert!(svg.contains("Third Floor (0 stalls placed, 0 skipped)"));
    assert!(!svg.contains(r#"id="stall-"#));
}
