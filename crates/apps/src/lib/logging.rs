//! A module for anything related to logging
use std::env;

use color_eyre::eyre::Result;
use eyre::WrapErr;
use tracing_subscriber::filter::{Directive, EnvFilter};
use tracing_subscriber::fmt::Subscriber;

/// The environment variable with the log filter directives
pub const ENV_KEY: &str = "ZB_LOG";

/// Install the global log subscriber, filtered by [`ENV_KEY`] when it's set
/// or else by the `default` directive.
pub fn init_from_env_or(default: impl Into<Directive>) -> Result<()> {
    set_subscriber(filter_from_env_or(default))
}

pub fn filter_from_env_or(default: impl Into<Directive>) -> EnvFilter {
    env::var(ENV_KEY)
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::default().add_directive(default.into()))
}

/// Install the global log subscriber. Logs go to stderr, stdout is left to
/// the command's output.
pub fn set_subscriber(filter: EnvFilter) -> Result<()> {
    let my_collector = Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(my_collector)
        .wrap_err("Failed to set log subscriber")
}
