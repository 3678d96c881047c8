//! slides - Entry Point

use clap::Parser;
use slides::code::ProcessExecutor;
use slides::config::{KeyBindings, ResolvedConfig};
use slides::model::AppError;
use slides::source::{detect_input_source, InputSource};
use slides::state::{Presentation, ReloadMonitor};
use slides::view::ColorConfig;
use std::path::PathBuf;
use tracing::info;

/// slides - present markdown slide decks in the terminal
#[derive(Parser, Debug)]
#[command(name = "slides")]
#[command(version)]
#[command(about = "Terminal-based presentation tool that renders markdown slides")]
pub struct Args {
    /// Path to the markdown file (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Theme name; overrides the theme in the document metadata
    #[arg(long)]
    pub theme: Option<String>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Milliseconds between live-reload checks (file input only)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub reload_interval_ms: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = slides::config::resolve(
        args.config.clone(),
        args.theme.clone(),
        args.reload_interval_ms,
    )?;

    slides::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let key_bindings = KeyBindings::default().with_overrides(&config.keybindings)?;

    present(
        args.file.clone(),
        &config,
        key_bindings,
        ColorConfig::from_env_and_args(args.no_color),
    )?;

    Ok(())
}

/// Acquire the deck and run the presentation. Only acquisition and terminal
/// failures get this far.
fn present(
    file: Option<PathBuf>,
    config: &ResolvedConfig,
    key_bindings: KeyBindings,
    color: ColorConfig,
) -> Result<(), AppError> {
    let input_source = detect_input_source(file)?;

    // Stamp the file before the first read so an edit in between is not lost.
    let monitor = match &input_source {
        InputSource::File(file) => Some(ReloadMonitor::new(
            Box::new(file.clone()),
            config.reload_interval,
        )),
        InputSource::Stdin(_) => None,
    };
    let content = input_source.read()?;

    let mut presentation = Presentation::new(&content, key_bindings, Box::new(ProcessExecutor))
        .with_theme_override(config.theme.clone());
    if let Some(monitor) = monitor {
        presentation = presentation.with_reload(monitor);
    }

    slides::view::run(presentation, color)?;

    Ok(())
}
