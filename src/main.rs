//! Mall Map CLI
//!
//! Usage:
//!   mall-map [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --floor <N>          Floor to render (default 1)
//!   -c, --config <FILE>      Map configuration (TOML format)
//!   -s, --stylesheet <FILE>  Stylesheet file for color palette (TOML format)
//!       --format <FORMAT>    Output format: svg or json
//!       --summary            Print the floor's occupancy summary instead of a map
//!   -d, --debug              Debug mode: grid lines and skipped-stall comments
//!   -v, --verbose            Log layout decisions to stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use mall_map::{
    layout_directory_json, render_directory, LoadError, MallDirectory, MapConfig, RenderConfig,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Svg,
    Json,
}

#[derive(Parser)]
#[command(name = "mall-map")]
#[command(about = "Render a floor map from a mall directory")]
struct Cli {
    /// Directory JSON file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Floor to render
    #[arg(short, long, default_value_t = 1)]
    floor: u8,

    /// Map configuration file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stylesheet file for color palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Print the floor's occupancy summary instead of a map
    #[arg(long)]
    summary: bool,

    /// Debug mode: show the block grid and skipped stalls
    #[arg(short, long)]
    debug: bool,

    /// Log layout decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "mall_map=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    // Load map configuration
    let map = match &cli.config {
        Some(path) => match read_file(path) {
            Ok(content) => match MapConfig::from_str(&content) {
                Ok(config) => config,
                Err(e) => exit_with_load_error(&e, &content, path),
            },
            Err(e) => exit_with(&e),
        },
        None => MapConfig::default(),
    };


    // Read input
    let (source, filename) = match &cli.input {
        Some(path) => match read_file(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => exit_with(&e),
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let directory = match MallDirectory::from_json(&source) {
        Ok(directory) => directory,
        Err(e) => exit_with_load_error(&e, &source, Path::new(&filename)),
    };

    if cli.summary {
        let summary = directory.floor_summary(cli.floor);
        println!("Floor {}: {}", summary.floor, summary.describe());
        return;
    }

    let mut config = RenderConfig::new()
        .with_floor(cli.floor)
        .with_map(map)
        .with_debug(cli.debug);

    // Load stylesheet
    if let Some(path) = &cli.stylesheet {
        config = match config.with_stylesheet_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading stylesheet '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        };
    }

    let output = match cli.format {
        OutputFormat::Svg => render_directory(&directory, &config),
        OutputFormat::Json => layout_directory_json(&directory, &config),
    };

    match output {
        Ok(text) => {
            println!("{}", text);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::io(path, e))
}

fn exit_with(error: &LoadError) -> ! {
    eprintln!("Error: {}", error);
    std::process::exit(1);
}

fn exit_with_load_error(error: &LoadError, source: &str, path: &Path) -> ! {
    eprintln!("{}", error.format(source, &path.display().to_string()));
    std::process::exit(1);
}
