//! Wiring & DI. Entry point: load config, build the backend adapter, register
//! actions, then run the action server or the interactive console.
//! No business logic here.

use dotenv::dotenv;
use inquire::Select;
use media_pulse_actions::adapters::backend::RestBackend;
use media_pulse_actions::adapters::clock::SystemClock;
use media_pulse_actions::adapters::ui::ConsoleInputPort;
use media_pulse_actions::adapters::webhook;
use media_pulse_actions::ports::{BackendPort, Clock};
use media_pulse_actions::shared::config::{AppConfig, RunMode};
use media_pulse_actions::usecases::{ActionContext, ActionRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const SERVER_CHOICE: &str = "Action server (webhook)";
const CONSOLE_CHOICE: &str = "Interactive console";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Backend: explicit config, built once ---
    let api = cfg.api();
    let backend = RestBackend::new(&api);
    info!(url = %backend.base_url(), "Using API base URL: {}", backend.base_url());
    let backend: Arc<dyn BackendPort> = Arc::new(backend);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    // --- Actions ---
    let registry = Arc::new(ActionRegistry::with_default_actions(ActionContext::new(
        backend, clock,
    )));
    info!(actions = ?registry.names(), "actions registered");

    let mode = match cfg.run_mode() {
        Some(mode) => mode,
        None => prompt_mode()?,
    };

    match mode {
        RunMode::Server => {
            let addr = cfg.action_server_addr();
            webhook::serve(registry, &addr)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
        RunMode::Console => {
            ConsoleInputPort::new(registry)
                .run()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
        }
    }

    Ok(())
}

/// Ask how to run when MEDIA_PULSE_MODE is not set.
fn prompt_mode() -> anyhow::Result<RunMode> {
    let choice = Select::new("Run mode", vec![SERVER_CHOICE, CONSOLE_CHOICE])
        .prompt()
        .map_err(|e| anyhow::anyhow!("mode prompt: {}", e))?;
    Ok(if choice == SERVER_CHOICE {
        RunMode::Server
    } else {
        RunMode::Console
    })
}
