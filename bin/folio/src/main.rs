//! Folio CLI
//!
//! Reads a content directory of notes, projects, roadmaps and knowledge graphs
//! and prints, checks or exports it as JSON.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;
use folio_core::ContentKind;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Load, check and export personal site content"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: std::path::PathBuf,

    /// Content root, overriding the configuration
    #[arg(long, global = true)]
    content: Option<std::path::PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Print summaries of one kind of content as JSON
    List {
        /// notes, projects, roadmaps or graphs
        kind: ContentKind,
    },
    /// Print one full record as JSON
    Show {
        /// notes, projects, roadmaps or graphs
        kind: ContentKind,
        /// File name without extension
        slug: String,
    },
    /// Print every tag used by notes or projects
    Tags {
        /// notes or projects
        #[arg(default_value = "notes")]
        kind: ContentKind,
    },
    /// Load every record and report problems
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Write summaries and records of every kind as JSON files
    Export {
        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: std::path::PathBuf,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    let content = cli.content.as_deref();
    match cli.command {
        Commands::List { kind } => {
            folio::cmd::list::run(&cli.config, content, kind)?;
        }
        Commands::Show { kind, slug } => {
            folio::cmd::show::run(&cli.config, content, kind, &slug)?;
        }
        Commands::Tags { kind } => {
            folio::cmd::tags::run(&cli.config, content, kind)?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, content, strict)?;
        }
        Commands::Export { output } => {
            folio::cmd::export::run(&cli.config, content, &output)?;
        }
    }

    Ok(())
}
