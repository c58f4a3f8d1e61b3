//! SVG Design Inspector CLI
//!
//! Usage:
//!   svg-design-inspector [OPTIONS] <COMMAND>
//!
//! Commands:
//!   analyze <FILE> [--json]                 Analyze a file without storing it
//!   upload <FILE>                           Store a copy, analyze it and save the record
//!   list                                    List stored designs, newest first
//!   show <ID>                               Show one stored design
//!   preview <ID> [--hover N] [-o FILE]      Render a scaled SVG preview
//!   hit <ID> <X> <Y>                        Which rectangle is under a preview point

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use svg_design_inspector::preview::Point;
use svg_design_inspector::{
    analyze, find_design, ingest, render_preview, report, Config, DesignError, DesignRecord, DesignStore,
    Intake, JsonDirStore, MalformedInputError, Viewport,
};

#[derive(Parser)]
#[command(name = "svg-design-inspector")]
#[command(about = "Check SVG designs for empty canvases and out-of-bounds rectangles")]
struct Cli {
    /// Configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze an SVG file without storing it
    Analyze {
        file: PathBuf,
        /// Print the analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Store an SVG file, analyze it and save the record
    Upload { file: PathBuf },
    /// List stored designs, newest first
    List,
    /// Show one stored design
    Show { id: String },
    /// Render a stored design as a scaled SVG preview
    Preview {
        id: String,
        /// Index of the rectangle to draw as hovered
        #[arg(long)]
        hover: Option<usize>,
        /// Write the preview here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report which rectangle sits under a point on the preview surface
    Hit { id: String, x: f64, y: f64 },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Error loading config '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Config::default(),
    }
    .with_env_overrides();

    if let Err(e) = run(cli.command, &config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(default_level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command, config: &Config) -> Result<(), DesignError> {
    match command {
        Command::Analyze { file, json } => {
            let (source, filename) = read_svg(&file)?;
            let result = match analyze(&source, &filename) {
                Ok(r) => r,
                Err(e) => exit_malformed(&e, &source, &filename),
            };
            if json {
                println!("{}", to_json(&result));
            } else {
                print!("{}", report::summary(&result));
            }
        }
        Command::Upload { file } => {
            let bytes = fs::read(&file).map_err(|source| DesignError::Read {
                path: file.clone(),
                source,
            })?;
            let filename = file_name(&file);
            let intake = Intake::new(&config.storage.uploads_dir);
            let mut store = JsonDirStore::open(&config.storage.data_dir)?;
            match ingest(&intake, &mut store, &bytes, &filename, None) {
                Ok(record) => print!("{}", report::detail(&record)),
                Err(DesignError::Malformed(e)) => {
                    exit_malformed(&e, &String::from_utf8_lossy(&bytes), &filename)
                }
                Err(e) => return Err(e),
            }
        }
        Command::List => {
            let store = JsonDirStore::open(&config.storage.data_dir)?;
            let records = store.list()?;
            if records.is_empty() {
                println!("No designs stored in {}", store.dir().display());
            }
            for record in &records {
                println!("{}", report::list_row(record));
            }
        }
        Command::Show { id } => {
            let record = find_record(config, &id)?;
            print!("{}", report::detail(&record));
        }
        Command::Preview { id, hover, output } => {
            let record = find_record(config, &id)?;
            let svg = render_preview(&record.analysis, &config.preview, hover);
            match output {
                Some(path) => fs::write(&path, svg).map_err(|source| DesignError::Write {
                    path: path.clone(),
                    source,
                })?,
                None => println!("{}", svg),
            }
        }
        Command::Hit { id, x, y } => {
            let record = find_record(config, &id)?;
            let analysis = &record.analysis;
            let viewport = Viewport::fit(analysis.svg_width(), analysis.svg_height(), &config.preview);
            match viewport.hit_test(analysis.items(), Point::new(x, y)) {
                Some(index) => {
                    let item = &analysis.items()[index];
                    println!(
                        "#{} x={} y={} width={} height={} fill={}{}",
                        index,
                        item.x(),
                        item.y(),
                        item.width(),
                        item.height(),
                        item.fill(),
                        item.issue().map(|i| format!(" [{}]", i)).unwrap_or_default()
                    );
                }
                None => println!("No rectangle at ({}, {})", x, y),
            }
        }
    }
    Ok(())
}

fn read_svg(path: &Path) -> Result<(String, String), DesignError> {
    let bytes = fs::read(path).map_err(|source| DesignError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((String::from_utf8_lossy(&bytes).into_owned(), file_name(path)))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn find_record(config: &Config, id: &str) -> Result<DesignRecord, DesignError> {
    let store = JsonDirStore::open(&config.storage.data_dir)?;
    find_design(&store, id)
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    match serde_json::to_string_pretty(value) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to serialize analysis: {}", e);
            std::process::exit(1);
        }
    }
}

fn exit_malformed(error: &MalformedInputError, source: &str, filename: &str) -> ! {
    eprint!("{}", error.format(source, filename));
    std::process::exit(1);
}
