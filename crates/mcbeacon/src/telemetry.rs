use mcbeacon_config::LoggingConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const CRATES: [&str; 3] = ["mcbeacon", "mcbeacon_status", "mcbeacon_config"];

/// Directive used when `RUST_LOG` is unset: our crates at info (or debug),
/// everything else at warn.
pub fn default_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    let mut directive = String::from("warn");
    for krate in CRATES {
        directive.push_str(&format!(",{}={}", krate, level));
    }
    directive
}

/// Installs the global subscriber. Logs go to stderr so the status output on
/// stdout stays readable.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.debug)));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.show_target)
        .with_ansi(config.use_color);

    let registry = tracing_subscriber::registry().with(filter);
    if config.show_timestamp {
        registry.with(layer).init();
    } else {
        registry.with(layer.without_time()).init();
    }
}
