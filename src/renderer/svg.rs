//! SVG generation from floor layouts

use crate::layout::{BoundingBox, FloorLayout, LayoutRect, MapGeometry, Point};
use crate::stylesheet::Stylesheet;

use super::SvgConfig;

/// Text anchor position for labels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

/// Drawing layer, back to front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Background,
    Grid,
    Streets,
    Stalls,
    Labels,
}

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    styles: Vec<String>,
    comments: Vec<String>,
    background: Vec<String>,
    grid: Vec<String>,
    streets: Vec<String>,
    stalls: Vec<String>,
    labels: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            styles: vec![],
            comments: vec![],
            background: vec![],
            grid: vec![],
            streets: vec![],
            stalls: vec![],
            labels: vec![],
        }
    }

    pub fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.prefix(), name)
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    fn layer_mut(&mut self, layer: Layer) -> &mut Vec<String> {
        match layer {
            Layer::Background => &mut self.background,
            Layer::Grid => &mut self.grid,
            Layer::Streets => &mut self.streets,
            Layer::Stalls => &mut self.stalls,
            Layer::Labels => &mut self.labels,
        }
    }

    /// Add CSS custom properties from a stylesheet plus the class rules using them
    pub fn add_stylesheet(&mut self, stylesheet: &Stylesheet) {
        let mut css = String::from(":root {\n");
        for (token, value) in &stylesheet.colors {
            css.push_str(&format!("      --{}: {};\n", token, value));
        }
        css.push_str("    }");
        self.styles.push(css);

        let p = self.prefix();
        let rules = [
            format!(".{p}background {{ fill: var(--background); }}"),
            format!(".{p}street {{ fill: var(--street); }}"),
            format!(".{p}main-street {{ fill: var(--main-street); }}"),
            format!(".{p}stall {{ stroke: var(--stall-stroke); stroke-width: 1; }}"),
            format!(".{p}stall.{p}occupied {{ fill: var(--occupied); }}"),
            format!(".{p}stall.{p}vacant {{ fill: var(--vacant); }}"),
            format!(".{p}stall.{p}alleyway {{ fill: var(--alleyway); }}"),
            format!(".{p}stall.{p}stairway {{ fill: var(--stairway); }}"),
            format!(".{p}stall:hover {{ fill: var(--hover); }}"),
            format!(".{p}label {{ fill: var(--label); font-family: sans-serif; }}"),
            format!(".{p}stall-number {{ fill: var(--stall-number); pointer-events: none; }}"),
            format!(".{p}grid {{ stroke: var(--grid); stroke-width: 0.5; }}"),
        ];
        self.styles.extend(rules);
    }

    /// Add a rectangle with optional extra attributes and hover title
    pub fn add_rect(
        &mut self,
        layer: Layer,
        id: Option<&str>,
        bounds: &BoundingBox,
        classes: &[String],
        attrs: &[(&str, String)],
        title: Option<&str>,
    ) {
        let id_attr = id
            .map(|i| format!(r#" id="{}""#, escape_xml(i)))
            .unwrap_or_default();
        let extra: String = attrs
            .iter()
            .map(|(name, value)| format!(r#" {}="{}""#, name, escape_xml(value)))
            .collect();

        let head = format!(
            r#"{}<rect{} class="{}" x="{}" y="{}" width="{}" height="{}"{}"#,
            self.indent_str(),
            id_attr,
            classes.join(" "),
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height,
            extra
        );
        let element = match title {
            Some(title) => format!("{}><title>{}</title></rect>", head, escape_xml(title)),
            None => format!("{}/>", head),
        };
        self.layer_mut(layer).push(element);
    }

    /// Add a text element
    pub fn add_text(
        &mut self,
        layer: Layer,
        text: &str,
        at: Point,
        anchor: TextAnchor,
        classes: &[String],
        styles: &str,
    ) {
        let element = format!(
            r#"{}<text class="{}" x="{}" y="{}" text-anchor="{}"{}>{}</text>"#,
            self.indent_str(),
            classes.join(" "),
            at.x,
            at.y,
            anchor.as_str(),
            styles,
            escape_xml(text)
        );
        self.layer_mut(layer).push(element);
    }

    /// Add a line element
    pub fn add_line(&mut self, layer: Layer, from: Point, to: Point, classes: &[String]) {
        let element = format!(
            r#"{}<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}"/>"#,
            self.indent_str(),
            classes.join(" "),
            from.x,
            from.y,
            to.x,
            to.y
        );
        self.layer_mut(layer).push(element);
    }

    /// Add an XML comment ahead of the drawing layers
    pub fn add_comment(&mut self, text: &str) {
        // "--" is not allowed inside XML comments
        let text = text.replace("--", "- -");
        self.comments
            .push(format!("{}<!-- {} -->", self.indent_str(), text));
    }

    /// Build the final SVG string
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        // XML declaration for standalone
        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = width,
            h = height
        ));
        svg.push_str(nl);

        if !self.styles.is_empty() {
            svg.push_str("  <style>");
            svg.push_str(nl);
            for style in &self.styles {
                svg.push_str("    ");
                svg.push_str(style);
                svg.push_str(nl);
            }
            svg.push_str("  </style>");
            svg.push_str(nl);
        }

        for line in self
            .comments
            .iter()
            .chain(&self.background)
            .chain(&self.grid)
            .chain(&self.streets)
            .chain(&self.stalls)
            .chain(&self.labels)
        {
            svg.push_str(line);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a floor layout to an SVG string (with default stylesheet)
pub fn render_svg(layout: &FloorLayout, geometry: &MapGeometry, config: &SvgConfig) -> String {
    render_svg_with_stylesheet(layout, geometry, config, &Stylesheet::default(), false)
}

/// Render a floor layout to an SVG string with a custom stylesheet
///
/// Debug mode adds block grid lines and a comment per skipped stall.
pub fn render_svg_with_stylesheet(
    layout: &FloorLayout,
    geometry: &MapGeometry,
    config: &SvgConfig,
    stylesheet: &Stylesheet,
    debug: bool,
) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    builder.add_stylesheet(&stylesheet.merged_with_defaults());
    builder.add_comment(&format!(
        "{} ({} stalls placed, {} skipped)",
        layout.label,
        layout.stalls.len(),
        layout.skipped.len()
    ));

    if debug {
        for skipped in &layout.skipped {
            builder.add_comment(&format!(
                "skipped {} on {}: {:?}",
                skipped.stall_number, skipped.street_name, skipped.reason
            ));
        }
        render_grid(geometry, &mut builder);
    }

    let background = vec![builder.class("background")];
    builder.add_rect(
        Layer::Background,
        None,
        &BoundingBox::new(0.0, 0.0, geometry.width, geometry.height),
        &background,
        &[],
        None,
    );

    render_streets(geometry, &mut builder);

    for stall in &layout.stalls {
        render_stall(stall, &mut builder);
    }

    if config.show_street_labels {
        render_street_labels(geometry, &mut builder);
    }

    builder.build(geometry.width, geometry.height)
}

/// One line per block across the grid area
fn render_grid(geometry: &MapGeometry, builder: &mut SvgBuilder) {
    let area = geometry.grid_bounds;
    let classes = vec![builder.class("grid")];
    let step = geometry.block_size;

    let columns = (area.width / step).round() as usize;
    for i in 0..=columns {
        let x = area.x + i as f64 * step;
        builder.add_line(
            Layer::Grid,
            Point::new(x, area.y),
            Point::new(x, area.bottom()),
            &classes,
        );
    }

    let rows = (area.height / step).round() as usize;
    for i in 0..=rows {
        let y = area.y + i as f64 * step;
        builder.add_line(
            Layer::Grid,
            Point::new(area.x, y),
            Point::new(area.right(), y),
            &classes,
        );
    }
}

fn render_streets(geometry: &MapGeometry, builder: &mut SvgBuilder) {
    let street_classes = vec![builder.class("street"), builder.class("horizontal-street")];
    for street in &geometry.streets {
        builder.add_rect(
            Layer::Streets,
            None,
            &street.bounds,
            &street_classes,
            &[("data-street", street.name.clone())],
            None,
        );
    }

    let divider_classes = vec![builder.class("street"), builder.class("main-street")];
    builder.add_rect(
        Layer::Streets,
        None,
        &geometry.divider.bounds,
        &divider_classes,
        &[("data-street", geometry.divider.name.clone())],
        None,
    );
}

fn render_stall(stall: &LayoutRect, builder: &mut SvgBuilder) {
    let number = stall.stall_number.as_str();
    let occupancy = if stall.occupied { "occupied" } else { "vacant" };
    let classes = vec![
        builder.class("stall"),
        builder.class(occupancy),
        builder.class(stall.kind.css_class()),
    ];
    let title = format!(
        "{} ({})",
        stall
            .display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or("Unnamed Stall"),
        number
    );

    builder.add_rect(
        Layer::Stalls,
        Some(&format!("stall-{}", number)),
        &stall.bounds,
        &classes,
        &[
            ("data-stall-number", number.to_string()),
            ("data-stall-type", stall.kind.css_class().to_string()),
            ("data-street", stall.street_name.clone()),
        ],
        Some(&title),
    );

    if builder.config.show_stall_numbers && stall.kind.shows_number() {
        let font_size = format!(
            r#" font-size="{}" dominant-baseline="middle""#,
            builder.config.stall_number_font_size
        );
        let classes = vec![builder.class("stall-number")];
        builder.add_text(
            Layer::Stalls,
            number,
            stall.bounds.center(),
            TextAnchor::Middle,
            &classes,
            &font_size,
        );
    }
}

fn render_street_labels(geometry: &MapGeometry, builder: &mut SvgBuilder) {
    let font_size = format!(r#" font-size="{}""#, builder.config.street_label_font_size);
    let classes = vec![builder.class("label"), builder.class("street-label")];

    for street in &geometry.streets {
        builder.add_text(
            Layer::Labels,
            &street.name,
            street.label,
            TextAnchor::End,
            &classes,
            &font_size,
        );
    }

    // Main Street reads bottom-to-top above the divider
    let label = geometry.divider.label;
    let rotated = format!(
        r#"{} transform="rotate(-90 {} {})""#,
        font_size, label.x, label.y
    );
    builder.add_text(
        Layer::Labels,
        &geometry.divider.name,
        label,
        TextAnchor::Start,
        &classes,
        &rotated,
    );
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{
        map_geometry, GridRect, MapConfig, SideOfDivider, SideOfStreet, SkipReason, SkippedStall,
    };
    use crate::stall::{StallKind, StallNumber};

    fn rect(number: u32, kind: StallKind, occupied: bool) -> LayoutRect {
        LayoutRect {
            bounds: BoundingBox::new(120.0, 224.0, 32.0, 64.0),
            grid: GridRect {
                x: 0,
                y: 13,
                width: 4,
                height: 8,
            },
            side_of_street: SideOfStreet::South,
            side_of_divider: SideOfDivider::West,
            street_name: "Wall Street".to_string(),
            stall_number: StallNumber::from(number),
            kind,
            occupied,
            display_name: Some("Birb & Co".to_string()),
        }
    }

    fn floor(stalls: Vec<LayoutRect>) -> FloorLayout {
        FloorLayout {
            floor: 1,
            label: "First Floor".to_string(),
            stalls,
            skipped: vec![],
        }
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a < b"), "a &lt; b");
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("<tag>"), "&lt;tag&gt;");
    }

    #[test]
    fn test_render_single_stall() {
        let geometry = map_geometry(&MapConfig::default());
        let svg = render_svg(
            &floor(vec![rect(101, StallKind::Normal, true)]),
            &geometry,
            &SvgConfig::default(),
        );

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"id="stall-101""#));
        assert!(svg.contains(r#"class="mall-stall mall-occupied mall-normal""#));
        assert!(svg.contains(r#"x="120" y="224" width="32" height="64""#));
        assert!(svg.contains("<title>Birb &amp; Co (101)</title>"));
        assert!(svg.contains(r#"x="136" y="256" text-anchor="middle""#));
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_blank_display_name_is_unnamed() {
        let geometry = map_geometry(&MapConfig::default());
        let mut stall = rect(101, StallKind::Normal, false);
        stall.display_name = Some("  ".to_string());
        let svg = render_svg(&floor(vec![stall]), &geometry, &SvgConfig::default());

        assert!(svg.contains("<title>Unnamed Stall (101)</title>"));
    }

    #[test]
    fn test_background_rect_uses_palette() {
        let geometry = map_geometry(&MapConfig::default());
        let svg = render_svg(&floor(vec![]), &geometry, &SvgConfig::default());

        assert!(svg.contains(".mall-background { fill: var(--background); }"));
        assert!(svg.contains(r#"<rect class="mall-background" x="0" y="0" width="1176" height="1056"/>"#));
        let background = svg.find("mall-background\" x=").unwrap();
        let street = svg.find("mall-horizontal-street").unwrap();
        assert!(background < street);
    }

    #[test]
    fn test_feature_stalls_hide_numbers() {
        let geometry = map_geometry(&MapConfig::default());
        let svg = render_svg(
            &floor(vec![rect(102, StallKind::Stairway, false)]),
            &geometry,
            &SvgConfig::default(),
        );

        assert!(svg.contains("mall-vacant mall-stairway"));
        assert!(!svg.contains(">102</text>"));
    }

    #[test]
    fn test_streets_and_labels() {
        let geometry = map_geometry(&MapConfig::default());
        let svg = render_svg(&floor(vec![]), &geometry, &SvgConfig::default());

        assert_eq!(svg.matches("mall-horizontal-street").count(), 4);
        assert!(svg.contains("mall-main-street"));
        assert!(svg.contains(">Wall Street</text>"));
        assert!(svg.contains(r#"transform="rotate(-90 596 105)""#));
        assert!(!svg.contains(">Five</text>"));
        assert!(svg.contains(r#"width="1176" height="1056""#));
    }

    #[test]
    fn test_labels_can_be_disabled() {
        let geometry = map_geometry(&MapConfig::default());
        let config = SvgConfig::default()
            .with_street_labels(false)
            .with_stall_numbers(false);
        let svg = render_svg(
            &floor(vec![rect(101, StallKind::Normal, true)]),
            &geometry,
            &config,
        );

        assert!(!svg.contains("street-label"));
        assert!(!svg.contains("mall-stall-number\""));
    }

    #[test]
    fn test_debug_adds_grid_and_skips() {
        let geometry = map_geometry(&MapConfig::default());
        let mut layout = floor(vec![]);
        layout.skipped.push(SkippedStall {
            stall_number: StallNumber::from(105),
            street_name: "Five".to_string(),
            reason: SkipReason::HiddenStreet,
        });

        let svg = render_svg_with_stylesheet(
            &layout,
            &geometry,
            &SvgConfig::default(),
            &Stylesheet::default(),
            true,
        );

        // 117 + 1 vertical and 102 + 1 horizontal lines
        assert_eq!(svg.matches("<line").count(), 118 + 103);
        assert!(svg.contains("<!-- skipped 105 on Five: HiddenStreet -->"));
    }

    #[test]
    fn test_stylesheet_variables_present() {
        let geometry = map_geometry(&MapConfig::default());
        let custom = Stylesheet::from_str("[colors]\noccupied = \"#123456\"\n").unwrap();
        let svg = render_svg_with_stylesheet(
            &floor(vec![]),
            &geometry,
            &SvgConfig::default(),
            &custom,
            false,
        );

        assert!(svg.contains("--occupied: #123456;"));
        assert!(svg.contains("--vacant: #95a5a6;"));
        assert!(svg.contains(".mall-stall.mall-occupied { fill: var(--occupied); }"));
    }

    #[test]
    fn test_unprefixed_classes() {
        let geometry = map_geometry(&MapConfig::default());
        let config = SvgConfig::default().without_class_prefix();
        let svg = render_svg(&floor(vec![rect(101, StallKind::Normal, false)]), &geometry, &config);
        assert!(svg.contains(r#"class="stall vacant normal""#));
    }

    #[test]
    fn test_compact_output() {
        let geometry = map_geometry(&MapConfig::default());
        let config = SvgConfig::default()
            .with_pretty_print(false)
            .with_standalone(false);
        let svg = render_svg(&floor(vec![]), &geometry, &config);
        assert!(svg.starts_with("<svg"));
        assert!(!svg.contains("\n  <rect"));
        assert!(svg.contains("<rect class=\"mall-street"));
    }
}
