//! drone-hipchat - Drone plugin entry point
//!
//! Drone passes the plugin parameters as one JSON document, either as the
//! first argument or on stdin. The process exits non-zero when the
//! notification could not be delivered.

use anyhow::{Context, Result};
use clap::Parser;
use drone_hipchat::{telemetry, PluginError, PluginInput};
use hipchat_client::HipChatError;
use std::io::Read;
use std::path::PathBuf;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "drone-hipchat")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Send Drone build notifications to a HipChat room", long_about = None)]
struct Cli {
    /// Plugin parameters as JSON (read from --input or stdin when omitted)
    payload: Option<String>,

    /// Read plugin parameters from a file
    #[arg(short, long, conflicts_with = "payload")]
    input: Option<PathBuf>,

    /// HipChat base URL, overrides `vargs.url`
    #[arg(long, env = "HIPCHAT_URL")]
    url: Option<String>,

    /// Room id or name, overrides `vargs.room`
    #[arg(long, env = "HIPCHAT_ROOM")]
    room: Option<String>,

    /// Room notification token, overrides `vargs.token`
    #[arg(long, env = "HIPCHAT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    telemetry::init_tracing(cli.json, level);

    info!("Drone HipChat plugin {}", env!("CARGO_PKG_VERSION"));

    let raw = read_input(cli.payload, cli.input.as_deref())?;
    let input = PluginInput::from_json(&raw).context("Failed to parse plugin parameters")?;
    let (payload, params) = input.into_parts();
    let params = params.with_overrides(cli.url, cli.room, cli.token);

    drone_hipchat::notify(&payload, &params)
        .await
        .map_err(redact_endpoint)
        .context("Failed to deliver HipChat notification")?;

    Ok(())
}

/// Transport errors carry the request URL, which holds the room token.
/// Strip it before the error reaches stderr.
fn redact_endpoint(err: HipChatError) -> HipChatError {
    match err {
        HipChatError::Transport(e) => HipChatError::Transport(e.without_url()),
        other => other,
    }
}

fn read_input(payload: Option<String>, input: Option<&std::path::Path>) -> Result<String> {
    if let Some(payload) = payload {
        return Ok(payload);
    }
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .map_err(PluginError::from)
            .with_context(|| format!("Failed to read {:?}", path));
    }

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .map_err(PluginError::from)
        .context("Failed to read plugin parameters from stdin")?;
    Ok(raw)
}
