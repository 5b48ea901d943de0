//! NC Service
//!
//! Terminal front end of the NC Service marketplace, where particuliers post
//! service requests and artisans answer them. Sessions are simulated and the
//! marketplace lives in memory.

pub mod config;
pub mod error;
pub mod shell;
pub mod state;
pub mod views;

/// Initializes tracing with the given log level.
///
/// Logs go to stderr so they never mix with the shell's output.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
