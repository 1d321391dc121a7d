// Daemon Settings - composition-root glue materializing the pre-computed
// inputs (descriptor, resource limits, supervision knobs)
//
// Everything here is tier-1: an unreadable descriptor or a nonsensical
// limit aborts startup before any child is launched.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use gantry_core::domain::{Descriptor, ResourceLimits};

const DEFAULT_MEMORY_LIMIT_BYTES: u64 = 512 * 1024 * 1024;
const DEFAULT_ESTIMATED_CORES: u32 = 1;
const DEFAULT_NGINX_CONFIG: &str = "/tmp/nginx/nginx.conf";
const DEFAULT_ROTATE_THRESHOLD_BYTES: u64 = 100 * 1024 * 1024;
const DEFAULT_ROTATE_INTERVAL_SECONDS: u64 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Java,
    Nginx,
}

pub struct Settings {
    pub mode: Mode,
    pub limits: ResourceLimits,
    pub descriptor: Descriptor,
    /// Required in java mode
    pub app_jar: Option<String>,
    pub nginx_config: String,
    pub log_paths: Vec<PathBuf>,
    pub rotate_threshold_bytes: u64,
    pub rotate_interval: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let mode = match std::env::var("GANTRY_MODE").as_deref() {
            Err(_) | Ok("java") => Mode::Java,
            Ok("nginx") => Mode::Nginx,
            Ok(other) => bail!("Unknown GANTRY_MODE: {other}"),
        };

        let memory_limit_bytes =
            env_parse("GANTRY_MEMORY_LIMIT_BYTES", DEFAULT_MEMORY_LIMIT_BYTES)?;
        let estimated_cores = env_parse("GANTRY_ESTIMATED_CORES", DEFAULT_ESTIMATED_CORES)?;
        let limits = ResourceLimits::new(memory_limit_bytes, estimated_cores)
            .context("Invalid resource limits")?;

        let descriptor = match std::env::var("GANTRY_DESCRIPTOR_PATH") {
            Ok(path) => load_descriptor(&path)?,
            Err(_) => Descriptor::default(),
        };

        let log_paths = std::env::var("GANTRY_NGINX_LOG_PATHS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(PathBuf::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            mode,
            limits,
            descriptor,
            app_jar: std::env::var("JAVA_APP_JAR").ok(),
            nginx_config: std::env::var("GANTRY_NGINX_CONFIG")
                .unwrap_or_else(|_| DEFAULT_NGINX_CONFIG.to_string()),
            log_paths,
            rotate_threshold_bytes: env_parse(
                "GANTRY_LOG_ROTATE_THRESHOLD_BYTES",
                DEFAULT_ROTATE_THRESHOLD_BYTES,
            )?,
            rotate_interval: Duration::from_secs(env_parse(
                "GANTRY_LOG_ROTATE_INTERVAL_SECONDS",
                DEFAULT_ROTATE_INTERVAL_SECONDS,
            )?),
        })
    }
}

fn load_descriptor(path: &str) -> Result<Descriptor> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Unreadable descriptor: {path}"))?;
    serde_json::from_str(&raw).with_context(|| format!("Malformed descriptor: {path}"))
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Malformed {key}: {raw}")),
        Err(_) => Ok(default),
    }
}
