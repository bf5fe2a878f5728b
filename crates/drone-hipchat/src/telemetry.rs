//! Logging for the plugin binary.
//!
//! Drone captures the plugin's stderr into the build log, so everything is
//! written there. Without `RUST_LOG`, only the plugin's own crates log at the
//! requested level; HTTP internals stay at `warn` so request URLs, which
//! carry the room token, do not show up in `--verbose` output.

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Crates whose events follow the `--verbose` level
const PLUGIN_TARGETS: [&str; 2] = ["drone_hipchat", "hipchat_client"];

/// Filter directives used when `RUST_LOG` is unset
pub fn default_directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    let mut directives = vec!["warn".to_string()];
    directives.extend(PLUGIN_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Install the global subscriber; `json` switches to one JSON object per line.
/// Later calls are no-ops.
pub fn init_tracing(json: bool, level: Level) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry.with(layer.json()).try_init().ok();
    } else {
        registry.with(layer).try_init().ok();
    }
}
