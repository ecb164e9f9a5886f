//! Folio CLI Library
//!
//! Command implementations behind the `folio` binary: listing, showing,
//! checking and exporting the content of a site.
//!
//! # Modules
//!
//! - [`cmd`] - Command implementations (list, show, tags, check, export)
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! use folio::cmd;
//!
//! // Export every record as JSON
//! cmd::export::run(Path::new("folio.toml"), None, Path::new("dist")).unwrap();
//! ```

pub mod cmd;

pub use folio_content::Site;
pub use folio_core::{Config, ContentKind};

/// Initialize tracing with the specified verbosity level.
///
/// # Arguments
///
/// * `verbose` - Verbosity level (0 = WARN, 1 = INFO, 2 = DEBUG, 3+ = TRACE)
pub fn init_tracing(verbose: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}
