//! Block Extract CLI
//!
//! Usage:
//!   block-extract [OPTIONS] <SCENE>
//!
//! Options:
//!   -b, --boundary <ID>      Boundary solid to extract (omit to cancel)
//!   -c, --config <FILE>      Extraction config file (TOML format)
//!   -l, --layer <NAME>       Marker layer holding the block name
//!   -t, --tolerance <TOL>    Label placement tolerance
//!   -s, --summary            Print a readable listing instead of TOML
//!   -v, --verbose            Debug logging
//!   -h, --help               Print help

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use block_extract::{EntityId, ExtractConfig, Extractor, MemoryStore, Outcome, Scene};

#[derive(Parser)]
#[command(name = "block-extract")]
#[command(about = "Turn the contents of a boundary solid into a reusable block")]
struct Cli {
    /// Scene file (TOML format)
    scene: PathBuf,

    /// Id of the boundary solid; omitting it behaves like a cancelled prompt
    #[arg(short, long)]
    boundary: Option<u64>,

    /// Extraction config file (TOML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Marker layer holding the block name (overrides the config file)
    #[arg(short, long)]
    layer: Option<String>,

    /// Label placement tolerance (overrides the config file)
    #[arg(short, long)]
    tolerance: Option<f64>,

    /// Print a readable listing of the result instead of TOML
    #[arg(short, long)]
    summary: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    // Load config
    let mut config = match &cli.config {
        Some(path) => match ExtractConfig::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => ExtractConfig::default(),
    };
    if let Some(layer) = cli.layer {
        config = config.with_marker_layer(layer);
    }
    if let Some(tolerance) = cli.tolerance {
        config = config.with_tolerance(tolerance);
    }
    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    // Load scene
    let mut store = match Scene::from_file(&cli.scene).and_then(|s| MemoryStore::from_scene(&s)) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error loading scene '{}': {}", cli.scene.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let outcome = Extractor::new(config).run(&mut store, cli.boundary.map(EntityId));
    if let Some(message) = outcome.message() {
        eprintln!("{}", message);
    }

    match outcome {
        Outcome::Created(_) => {
            if cli.summary {
                print!("{}", store);
            } else {
                match store.to_scene().to_toml() {
                    Ok(toml) => print!("{}", toml),
                    Err(e) => {
                        eprintln!("Error writing scene: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            }
            ExitCode::SUCCESS
        }
        Outcome::Cancelled => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    }
}
