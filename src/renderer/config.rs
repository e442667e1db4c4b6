//! Configuration for SVG rendering

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include XML declaration and standalone attributes
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "mall-" for "mall-stall")
    pub class_prefix: Option<String>,

    /// Draw the stall number inside normal stalls
    pub show_stall_numbers: bool,

    /// Draw street name labels beside the map
    pub show_street_labels: bool,

    /// Font size for stall numbers, in pixels
    pub stall_number_font_size: f64,

    /// Font size for street labels, in pixels
    pub street_label_font_size: f64,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("mall-".to_string()),
            show_stall_numbers: true,
            show_street_labels: true,
            stall_number_font_size: 10.0,
            street_label_font_size: 14.0,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    pub fn with_stall_numbers(mut self, show: bool) -> Self {
        self.show_stall_numbers = show;
        self
    }

    pub fn with_street_labels(mut self, show: bool) -> Self {
        self.show_street_labels = show;
        self
    }
}
