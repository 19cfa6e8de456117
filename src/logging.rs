//! Tracing setup for the command-line tool.
//!
//! Logs go to stderr so the report on stdout stays clean. `MODSCAN_LOG`
//! (or `RUST_LOG`) takes precedence over the verbosity flags.

use tracing_subscriber::{prelude::*, EnvFilter};

/// Maps `-v`/`-q` to a default filter directive.
pub fn level_for(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "modscan=error";
    }
    match verbose {
        0 => "modscan=warn",
        1 => "modscan=info",
        2 => "modscan=debug",
        _ => "modscan=trace",
    }
}

/// Initialize tracing. Call once at process startup.
pub fn init(verbose: u8, quiet: bool) {
    let filter = EnvFilter::try_from_env("MODSCAN_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbose, quiet)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .without_time(),
        )
        .try_init();
}
