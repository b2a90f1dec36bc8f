//! rowscope - Entry Point

use clap::Parser;
use rowscope::config::CliOverrides;
use rowscope::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// rowscope - scroll and select through very long text files in the terminal
#[derive(Parser, Debug)]
#[command(name = "rowscope")]
#[command(version)]
#[command(about = "Virtualized terminal viewer for long logs and tables")]
pub struct Args {
    /// Path to the file to view (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Start at specific line number (must be positive)
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub line: u32,

    /// Rows materialized above and below the viewport
    #[arg(long)]
    pub buffer_size: Option<usize>,

    /// Virtual pixel height of one terminal line
    #[arg(long)]
    pub row_height: Option<f64>,

    /// Column delimiter used to align copied rows
    #[arg(short, long)]
    pub delimiter: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Print the last copied text to stdout on exit
    #[arg(long)]
    pub print_selection: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            buffer_size: self.buffer_size,
            row_height: self.row_height,
            copy_delimiter: self.delimiter.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = rowscope::config::resolve(args.config.clone(), args.overrides())
        .map_err(AppError::from)?;

    rowscope::logging::init(&config.log_file_path).map_err(AppError::from)?;
    info!(config = ?config, "Configuration loaded and resolved");

    let input_source =
        rowscope::source::detect_input_source(args.file.clone()).map_err(AppError::from)?;

    let initial_row = args.line.saturating_sub(1) as usize;
    let copied = rowscope::view::run_with_source(input_source, &config, initial_row)?;

    if args.print_selection {
        if let Some(text) = copied {
            println!("{text}");
        }
    }

    Ok(())
}
