//! # svg2topo CLI
//!
//! Usage:
//!   svg2topo map.svg > map.topojson
//!   svg2topo --quantize map.svg -o map.topojson
//!   svg2topo --quantize=10000 map.svg
//!   svg2topo map.svg --options options.json --pretty

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use svg2topo::quantize::DEFAULT_SCALE;
use svg2topo::{ConvertOptions, Extent};

#[derive(Parser)]
#[command(name = "svg2topo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Convert SVG map paths to TopoJSON", long_about = None)]
struct Cli {
    /// SVG file to convert
    input: PathBuf,

    /// Write the topology here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON options file (camelCase keys); flags below override it
    #[arg(long)]
    options: Option<PathBuf>,

    /// Name of the geometry collection under "objects"
    #[arg(long)]
    object: Option<String>,

    /// Canvas size to project against
    #[arg(long, value_enum)]
    extent: Option<ExtentArg>,

    /// Quantize and delta-encode arcs, optionally with a scale factor (--quantize=SCALE)
    #[arg(long, value_name = "SCALE", num_args = 0..=1, require_equals = true)]
    quantize: Option<Option<f64>>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum ExtentArg {
    Document,
    Viewbox,
}

impl From<ExtentArg> for Extent {
    fn from(arg: ExtentArg) -> Self {
        match arg {
            ExtentArg::Document => Extent::Document,
            ExtentArg::Viewbox => Extent::ViewBox,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(message) = run(cli) {
        eprintln!("✗ {}", message);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let options = load_options(&cli)?;

    let input = fs::read_to_string(&cli.input)
        .map_err(|e| format!("Failed to read {}: {}", cli.input.display(), e))?;

    let topology = svg2topo::convert_str(&input, &options).map_err(|e| e.to_string())?;

    let json = if cli.pretty {
        topology.to_json_pretty()
    } else {
        topology.to_json()
    }
    .map_err(|e| format!("Failed to serialize topology: {}", e))?;

    match &cli.output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
            eprintln!(
                "✓ Written {} arcs to {}",
                topology.arcs.len(),
                path.display()
            );
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn load_options(cli: &Cli) -> Result<ConvertOptions, String> {
    let mut options = match &cli.options {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            ConvertOptions::from_json(&text)
                .map_err(|e| format!("Invalid options file {}: {}", path.display(), e))?
        }
        None => ConvertOptions::default(),
    };

    if let Some(name) = &cli.object {
        options.object_name = name.clone();
    }
    if let Some(extent) = cli.extent {
        options.extent = extent.into();
    }
    if let Some(scale) = cli.quantize {
        options.quantize = Some(scale.unwrap_or(DEFAULT_SCALE));
    }
    Ok(options)
}
