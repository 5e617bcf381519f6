//! Autofill Field Detector CLI
//!
//! Reads a JSON document snapshot and prints the detected fields as JSON.
//!
//! ## Usage
//! ```text
//! autofill-field-detector page.json --pretty
//! autofill-field-detector page.json --mode usernames --vocabulary vocab.json
//! ```

use std::path::PathBuf;

use autofill_field_detector::config::load_vocabulary;
use autofill_field_detector::error::{DetectorError, Result};
use autofill_field_detector::{DocumentSnapshot, FieldDetector, Vocabulary};
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Password fields paired with their username fields
    Forms,
    /// Password fields only
    Passwords,
    /// Username fields only
    Usernames,
}

#[derive(Debug, Parser)]
#[command(name = "autofill-field-detector", version, about = "Detect login fields in a document snapshot")]
struct Cli {
    /// Snapshot JSON file
    snapshot: PathBuf,

    /// Vocabulary override file
    #[arg(long)]
    vocabulary: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "forms")]
    mode: Mode,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Log every field decision
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    FmtSubscriber::builder()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(if e.is_input_error() { 2 } else { 1 });
    }
}

fn run(cli: &Cli) -> Result<()> {
    let vocabulary = match &cli.vocabulary {
        Some(path) => load_vocabulary(path)?,
        None => Vocabulary::default(),
    };
    let detector = FieldDetector::new(&vocabulary);

    let doc = DocumentSnapshot::load(&cli.snapshot)?;
    info!("Scanning {} ({} nodes)", cli.snapshot.display(), doc.nodes.len());

    match cli.mode {
        Mode::Forms => print_json(&detector.get_login_forms(&doc), cli.pretty),
        Mode::Passwords => print_json(&detector.detect_password_fields(&doc), cli.pretty),
        Mode::Usernames => print_json(&detector.detect_username_fields(&doc, None), cli.pretty),
    }
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| DetectorError::SerializationError(e.to_string()))?;

    println!("{}", json);
    Ok(())
}
