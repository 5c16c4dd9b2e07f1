use std::{
    io::Write,
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::Result;
use clap::{Parser, Subcommand};
use dashboard_core::{
    load_settings, ApiConfig, ImageUrlResolver, ToastBus, ToastEmitter, ToastTray,
};
use shared::{
    domain::{ToastPayload, ToastTone},
    protocol::ToastEvent,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "dashboard", about = "POS dashboard presentation helpers")]
struct Args {
    /// Overrides API_BASE / dashboard.toml.
    #[arg(long, global = true)]
    api_base: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the display URL for each stored product image path.
    Resolve {
        paths: Vec<String>,
    },
    /// Publish a toast on the app-toast channel.
    Toast {
        #[arg(long, value_parser = parse_tone)]
        tone: ToastTone,
        #[arg(long)]
        message: String,
        #[arg(long)]
        duration_ms: Option<u64>,
        /// Publish through an emitter with no transport attached.
        #[arg(long)]
        detached: bool,
    },
}

fn parse_tone(raw: &str) -> Result<ToastTone, String> {
    raw.parse::<ToastTone>().map_err(|err| err.to_string())
}

fn api_config(args: &Args) -> ApiConfig {
    match args.api_base.as_deref() {
        Some(base) => ApiConfig::from_base_url(Some(base)),
        None => ApiConfig::from_settings(&load_settings()),
    }
}

fn resolve_all(resolver: &ImageUrlResolver, paths: &[String]) -> Vec<String> {
    if paths.is_empty() {
        return vec![resolver.default_image()];
    }
    paths
        .iter()
        .map(|path| resolver.resolve(Some(path.as_str())))
        .collect()
}

/// Publishes `payload` and returns the JSON lines the listener wrote.
fn publish_toast(payload: ToastPayload, detached: bool) -> Vec<String> {
    let bus = ToastBus::new();
    let (tray, _tray_subscription) = ToastTray::attach(&bus);

    let lines = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&lines);
    let _json_subscription = bus.subscribe(move |payload| {
        match serde_json::to_string(&ToastEvent::new(payload.clone())) {
            Ok(line) => sink.lock().unwrap_or_else(PoisonError::into_inner).push(line),
            Err(err) => warn!("toast: failed to encode event: {err}"),
        }
    });

    let emitter = if detached {
        ToastEmitter::detached()
    } else {
        bus.emitter()
    };
    emitter.toast(payload);

    let visible = tray
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .active()
        .len();
    info!("toast: {visible} toast(s) visible after publish");

    let lines = lines
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    lines
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut stdout = std::io::stdout().lock();
    match &args.command {
        Command::Resolve { paths } => {
            let resolver = ImageUrlResolver::new(api_config(&args));
            info!(
                "resolving {} path(s) against origin={:?}",
                paths.len(),
                resolver.config().origin()
            );
            for url in resolve_all(&resolver, paths) {
                writeln!(stdout, "{url}")?;
            }
        }
        Command::Toast {
            tone,
            message,
            duration_ms,
            detached,
        } => {
            let payload = ToastPayload::new(*tone, message.clone()).with_duration_ms(*duration_ms);
            for line in publish_toast(payload, *detached) {
                writeln!(stdout, "{line}")?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
