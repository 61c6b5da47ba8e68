//! psdskin - layer dump to skin JSON converter

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::{LevelFilter, info};

use psdskin::convert::{ConvertConfig, OutputLayout, convert_to_layout};
use psdskin::decode::LayerDump;
use psdskin::style::{FixedFontPrompt, FontPrompt, LineFontPrompt};

/// Placeholder font used when running without a terminal to ask.
const DEFAULT_FONT: &str = "Arial";

#[derive(Parser)]
#[command(name = "psdskin")]
#[command(version, about = "Convert a layer dump into skin JSON and PNG assets", long_about = None)]
#[command(after_help = "EXAMPLES:
    psdskin assets/banner.json banner          Write result/banner/banner.json
    psdskin -f banner.json banner --font Lato  Overwrite, never ask for fonts")]
struct Cli {
    /// Layer dump of the document (JSON)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Name of the output folder
    #[arg(value_name = "OUTPUT_FOLDER")]
    output: String,

    /// Directory holding output folders
    #[arg(long, value_name = "DIR", default_value = "result")]
    result_dir: PathBuf,

    /// Write into an existing output folder, replacing its JSON file
    #[arg(short, long)]
    force: bool,

    /// Font to use for text layers whose font cannot be found
    #[arg(long, value_name = "NAME")]
    font: Option<String>,

    /// Never ask for fonts on the terminal
    #[arg(long)]
    non_interactive: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// More log output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(quiet: bool, verbose: u8) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, 2) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(cli: &Cli) -> psdskin::Result<()> {
    let document_id = document_id(&cli.input);
    let dump = LayerDump::from_path(&cli.input)?;
    info!(
        "loaded '{}' ({}x{}, {} top-level layers)",
        dump.name,
        dump.width,
        dump.height,
        dump.layers.len()
    );

    let config = ConvertConfig::default();
    let layout = OutputLayout::new(&cli.result_dir, &cli.output, &config);
    layout.prepare(cli.force)?;

    let mut fixed;
    let mut line;
    let prompt: &mut dyn FontPrompt = match (&cli.font, cli.non_interactive) {
        (Some(font), _) => {
            fixed = FixedFontPrompt::new(font.clone());
            &mut fixed
        }
        (None, true) => {
            fixed = FixedFontPrompt::new(DEFAULT_FONT);
            &mut fixed
        }
        (None, false) => {
            line = LineFontPrompt::new(io::stdin().lock(), io::stderr());
            &mut line
        }
    };

    let report = convert_to_layout(&document_id, &dump.layers, &layout, config, prompt)?;

    if !cli.quiet {
        println!("JSON file saved to {}", layout.json_path.display());
        println!(
            "Layers: {} ({} text, {} image), issues: {}",
            report.document.layers.len(),
            report.document.text_layers().count(),
            report.document.image_layers().count(),
            report.issues.len()
        );
    }
    Ok(())
}

/// Input file name without its extension.
fn document_id(input: &Path) -> String {
    input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}
