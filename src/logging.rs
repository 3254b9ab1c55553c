//! Diagnostic logging setup.
//!
//! All log output goes to stderr; stdout is reserved for command output.
//! `RUST_LOG` overrides the verbosity-derived filter when set.

use std::io::IsTerminal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Map a `-v` count to a filter directive for this crate.
pub fn level_for_verbosity(verbosity: u8) -> &'static str {
	match verbosity {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	}
}

/// Initialize the logging subsystem.
///
/// Must be called once at startup before any logging occurs.
pub fn init_logging(verbosity: u8) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(format!("hsv_config={}", level_for_verbosity(verbosity)))
	});

	let fmt_layer = fmt::layer()
		.with_writer(std::io::stderr)
		.with_target(false)
		.with_ansi(std::io::stderr().is_terminal())
		.without_time();

	// Ignore a second initialization
	let _ = tracing_subscriber::registry()
		.with(filter)
		.with(fmt_layer)
		.try_init();
}
