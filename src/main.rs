//! mdview - A minimal desktop markdown viewer.
//!
//! # Usage
//!
//! ```bash
//! mdview README.md
//! cat notes.md | mdview -
//! mdview            # pick a file from a dialog
//! ```

use anyhow::{Context, Result};
use clap::Parser;

use mdview::app::App;
use mdview::config::{ConfigFlags, DefaultsFile};
use mdview::document::{self, Source};

/// A minimal desktop markdown viewer
#[derive(Parser, Debug)]
#[command(name = "mdview", version, about, long_about = None)]
struct Cli {
    /// Markdown file to view, or `-` to read standard input
    #[arg(value_name = "FILE")]
    files: Vec<String>,

    #[command(flatten)]
    flags: ConfigFlags,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    // Usage errors end the process before any window is shown.
    let source = match Source::from_args(&cli.files) {
        Ok(source) => source,
        Err(err) if err.is_usage() => {
            eprintln!("{err}\nUsage: mdview [OPTIONS] [FILE|-]");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    let global = DefaultsFile::global();
    if cli.clear {
        if let Some(global) = &global {
            global.clear()?;
        }
    }
    if cli.save {
        global
            .as_ref()
            .context("No configuration directory to save defaults in")?
            .save(&cli.flags)?;
    }

    let saved = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = global
            .as_ref()
            .map(DefaultsFile::load)
            .transpose()?
            .unwrap_or_default();
        global_flags.union(&DefaultsFile::local().load()?)
    };
    let effective = saved.union(&cli.flags);
    tracing::debug!(?effective, ?source, "starting");

    // A file given on the command line must load before the window opens.
    let document = source.as_ref().map(document::load).transpose()?;

    App::new(document)
        .with_watch(effective.watch)
        .with_theme(effective.theme.unwrap_or_default())
        .with_maximized(!effective.no_maximize)
        .run()
        .context("Application error")
}
