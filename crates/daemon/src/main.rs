//! Gantry - Container Entrypoint
//!
//! java mode: derive the JVM command line from resource limits and feature
//! flags, then exec-replace this process with the JVM.
//! nginx mode: launch and supervise nginx, rotating logs and normalizing
//! signal-induced exit codes for the orchestrator.

mod settings;

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gantry_core::application::{apply_arguments, default_modificators, ArgumentsContext};
use gantry_core::port::SystemEnv;
use gantry_infra_system::{exec_java, prepare_for_run, LogRotator, Supervisor};

use settings::{Mode, Settings};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    info!("Gantry v{} starting...", VERSION);

    let settings = Settings::from_env().context("Startup configuration failed")?;

    match settings.mode {
        Mode::Java => run_java(settings),
        Mode::Nginx => run_nginx(settings).await,
    }
}

fn init_logging() {
    let log_format = std::env::var("GANTRY_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("gantry=info"))
        .expect("Failed to create env filter");

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty())
                .init();
        }
    }
}

fn run_java(settings: Settings) -> Result<()> {
    let app_jar = settings
        .app_jar
        .clone()
        .context("JAVA_APP_JAR is required in java mode")?;

    let ctx = ArgumentsContext::new(settings.limits, settings.descriptor, Arc::new(SystemEnv));
    let args = apply_arguments(&default_modificators(), &ctx);
    info!(?args, "Derived JVM arguments");

    // Returns only on failure
    let err = exec_java(&args, &app_jar);
    Err(err).context("Exec of the JVM failed")
}

async fn run_nginx(settings: Settings) -> Result<()> {
    let rotator = Arc::new(LogRotator::new(
        settings.log_paths.clone(),
        settings.rotate_threshold_bytes,
    ));
    let supervisor = Supervisor::new(rotator, settings.rotate_interval);

    let command = prepare_for_run(&settings.nginx_config);
    let code = supervisor
        .run(command)
        .await
        .context("Supervision of the server process failed")?;

    info!(code, "Child exited, reporting normalized code");
    std::process::exit(code);
}
