use cc_meta::Settings;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initialize a tracing subscriber.
///
/// `RUST_LOG` takes precedence; `default_level` is used when it is unset.
/// Fails if a global subscriber is already installed.
pub fn init(default_level: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_file(true)
        .with_line_number(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_level))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Initialize logging with the level from settings.
pub fn init_from_settings(
    settings: &Settings,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init(&settings.log_level)
}
