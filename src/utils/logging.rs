//! Tracing subscriber setup for the command-line binary.
//!
//! Output goes to stderr so that command results on stdout stay pipeable.
//! `RUST_LOG` overrides the default filter.

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset
pub const DEFAULT_FILTER: &str = "digit_pad_lib=info,digit_pad=info";

/// Install the global subscriber; `json` switches to one JSON object per line
pub fn init_tracing(json: bool, verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("digit_pad_lib=debug,digit_pad=debug")
        } else {
            EnvFilter::new(DEFAULT_FILTER)
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    // try_init so a second call (tests, embedding) is a no-op
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}
