//! # modedit
//!
//! Opens a module configuration the same way the editor window does:
//! 1. Reads editor settings (`--settings` or `MODEDIT_SETTINGS`, optional)
//! 2. Loads the configuration and its data dictionary
//! 3. Logs everything the editor would flag (reset values, invalid interfaces)
//! 4. Prints the interface diagram as JSON on stdout

use anyhow::{Context, Result};
use clap::Parser;
use modedit_core::EditorSession;
use modedit_libs::{EditorSettings, load_settings};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "modedit")]
#[command(about = "Open a module configuration and print its interface diagram")]
#[command(version)]
struct Args {
    /// Module configuration file to open
    config: PathBuf,

    /// Editor settings file (vocabulary, layout, dictionary location)
    #[arg(long, env = "MODEDIT_SETTINGS")]
    settings: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "modedit=info,modedit_core=info".into()),
        )
        .init();

    let args = Args::parse();

    let settings = match &args.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("Failed to load editor settings from {:?}", path))?,
        None => EditorSettings::default(),
    };

    let mut session = EditorSession::new(settings);

    let report = session
        .open(&args.config)
        .with_context(|| format!("Module Configuration Load Failed - {:?}", args.config))?;

    info!("Module Configuration Loaded");

    for reset in &report.resets {
        warn!(
            "{} '{}' of '{}' was reset to '{}'",
            reset.field, reset.from, reset.owner, reset.to
        );
    }

    match (&report.dictionary_dir, &report.dictionary_error) {
        (Some(dir), _) => info!("Data Dictionary Loaded from {:?}", dir),
        (None, Some(e)) => error!(
            "Unable to load data dictionary ({}), interfaces cannot be edited",
            e
        ),
        (None, None) => {}
    }

    let description = session.description().to_string();
    info!("Description: {}", description);
    info!("Header paths: {:?}", session.header_paths().list());
    info!("C sources: {:?}", session.c_sources().list());
    info!("C++ sources: {:?}", session.cxx_sources().list());
    info!("Libraries: {:?}", session.libraries().list());
    info!("Library paths: {:?}", session.library_paths().list());
    info!("Parameters: {:?}", session.parameters().list());

    let interfaces = session.interfaces();
    info!("Interfaces: {:?}", interfaces.list());
    if let Ok(invalid) = interfaces.invalid_interfaces() {
        for name in invalid {
            warn!("Interface '{}' is not in the data dictionary", name);
        }
    }

    let diagram = session.diagram();
    println!("{}", diagram.to_json()?);

    if session.has_unsaved_changes() {
        warn!("Configuration was modified while loading; save it from the editor to keep the fixes");
    }

    Ok(())
}
