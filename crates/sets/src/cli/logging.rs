//! Diagnostics setup.
//!
//! The library logs through `tracing`; this installs the subscriber. `RUST_LOG`
//! wins when set, otherwise `-v` flags pick the level. Output goes to stderr so
//! it never mixes with rendered results.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    }
}

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    // A second init (e.g. in tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .try_init();
}
