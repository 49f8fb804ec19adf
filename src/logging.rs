//! Tracing setup for the `ltc` binary.
//!
//! All diagnostics go to stderr so stdout stays parseable in robot mode.

use std::io::{self, IsTerminal};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Install the global subscriber.
///
/// `verbose` raises the floor (0 info, 1 debug, 2+ trace) and `quiet`
/// drops it to errors only; an explicit `RUST_LOG` wins over both.
/// Robot mode emits JSON lines; otherwise output is pretty on a
/// terminal and compact without ANSI when piped.
pub fn init_logging(robot_mode: bool, verbose: u8, quiet: bool) {
    let default_directive = if quiet {
        "ltc=error"
    } else {
        match verbose {
            0 => "ltc=info",
            1 => "ltc=debug",
            _ => "ltc=trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    if robot_mode {
        let layer = fmt::layer()
            .json()
            .with_target(true)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);
        tracing_subscriber::registry().with(filter).with(layer).init();
    } else if io::stderr().is_terminal() {
        let layer = fmt::layer()
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .with_writer(io::stderr);
        tracing_subscriber::registry().with(filter).with(layer).init();
    } else {
        let layer = fmt::layer()
            .with_ansi(false)
            .with_target(false)
            .with_file(false)
            .with_line_number(false)
            .with_thread_ids(false)
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_writer(io::stderr);
        tracing_subscriber::registry().with(filter).with(layer).init();
    }
}
