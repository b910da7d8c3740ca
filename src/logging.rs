use tracing_subscriber::EnvFilter;

/// Workspace crates whose spans and events are shown.
const CRATE_TARGETS: &[&str] = &[
    "eflow",
    "eflow_calendar",
    "eflow_indices",
    "eflow_series",
    "eflow_stats",
];

/// Level for `-v` count: none warn, `-v` info, `-vv` debug, more trace.
fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// `target=level` directives for every workspace crate.
fn default_directives(verbosity: u8) -> String {
    let level = level(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the global subscriber, logging to stderr.
///
/// `RUST_LOG` overrides the verbosity flag when set.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
