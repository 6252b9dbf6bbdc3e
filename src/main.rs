//! fb2tex - FictionBook to LaTeX converter

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use log::LevelFilter;

use fb2tex::export::default_output;
use fb2tex::{BookInfo, Error, LatexConfig, LatexExporter, parse_bytes};

#[derive(Parser)]
#[command(name = "fb2tex")]
#[command(version, about = "FictionBook to LaTeX converter", long_about = None)]
#[command(after_help = "EXAMPLES:
    fb2tex book.fb2                 Convert to book.tex
    fb2tex book.fb2 out/book.tex    Convert, images go to out/
    fb2tex -i book.fb2              Show book metadata as JSON")]
struct Cli {
    /// Input FB2 file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output TeX file (defaults to INPUT with a .tex extension)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    /// Show book metadata without converting
    #[arg(short, long)]
    info: bool,

    /// JSON file with LaTeX layout settings
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = if cli.info {
        show_info(&cli.input)
    } else {
        convert(&cli)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (false, 0) => LevelFilter::Warn,
        (false, 1) => LevelFilter::Info,
        (false, _) => LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .parse_default_env()
        .init();
}

fn load_config(path: &Path) -> Result<LatexConfig, Error> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| Error::InvalidConfig(format!("{}: {e}", path.display())))
}

fn show_info(path: &Path) -> Result<(), Error> {
    let bytes = fs::read(path)?;
    let doc = parse_bytes(&bytes)?;
    let info = BookInfo::from_document(&doc)?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn convert(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LatexConfig::default(),
    };
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output(&cli.input));

    LatexExporter::with_config(config).convert_file(&cli.input, &output)
}
