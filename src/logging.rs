//! Diagnostic logging on stderr using tracing

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Filter used when no `-v` flag is given and `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "warn";

/// Filter directive for an explicit verbosity level, if any
pub fn verbosity_filter(verbosity: u8) -> Option<&'static str> {
    match verbosity {
        0 => None,
        1 => Some("listrun=debug"),
        _ => Some("listrun=trace"),
    }
}

/// Initialize the logging system
pub fn init(verbosity: u8) -> anyhow::Result<()> {
    let filter = match verbosity_filter(verbosity) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
