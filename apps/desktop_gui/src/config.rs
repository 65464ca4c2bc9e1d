use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use shared::domain::IngestPolicy;

const CONFIG_FILE_NAME: &str = "gaminator.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StartupConfig {
    /// JSON command log or feed; the built-in demo history when unset.
    pub command_log: Option<PathBuf>,
    pub ingest_policy: IngestPolicy,
    pub log_filter: String,
    /// How often the bridge checks the command log for changes. 0 disables it.
    pub refresh_interval_ms: u64,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            command_log: None,
            ingest_policy: IngestPolicy::Strict,
            log_filter: "info".to_string(),
            refresh_interval_ms: 2000,
            window_width: 1000.0,
            window_height: 700.0,
        }
    }
}

impl StartupConfig {
    pub fn refresh_interval(&self) -> Option<Duration> {
        (self.refresh_interval_ms > 0).then(|| Duration::from_millis(self.refresh_interval_ms))
    }
}

#[derive(Parser, Debug, Default)]
#[command(name = "gaminator", about = "Voice and gesture control dashboard")]
pub struct CliArgs {
    /// Load command history from a JSON log or feed file.
    #[arg(long)]
    pub command_log: Option<PathBuf>,
    /// Show entries with unrecognized kind/outcome instead of rejecting the log.
    #[arg(long)]
    pub lenient: bool,
    /// Read settings from this file instead of the per-user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl CliArgs {
    pub fn apply_to(&self, config: &mut StartupConfig) {
        if let Some(path) = &self.command_log {
            config.command_log = Some(path.clone());
        }
        if self.lenient {
            config.ingest_policy = IngestPolicy::Lenient;
        }
        if let Some(filter) = &self.log_filter {
            config.log_filter = filter.clone();
        }
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("gaminator").join(CONFIG_FILE_NAME))
}

/// Settings read from disk, with the file they came from. `path` is `None`
/// when no file was read and the defaults apply.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: StartupConfig,
    pub path: Option<PathBuf>,
}

/// Defaults overlaid with the TOML file. An explicitly named file must
/// exist; the per-user default is optional.
///
/// Runs before logging is initialised, so nothing here logs; `main` reports
/// the outcome once the subscriber is up.
pub fn load_startup_config(explicit_path: Option<&Path>) -> anyhow::Result<LoadedConfig> {
    let (path, required) = match explicit_path {
        Some(path) => (Some(path.to_path_buf()), true),
        None => (default_config_path(), false),
    };

    let defaults = LoadedConfig {
        config: StartupConfig::default(),
        path: None,
    };
    let Some(path) = path else {
        return Ok(defaults);
    };
    if !required && !path.exists() {
        return Ok(defaults);
    }

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    let config = toml::from_str::<StartupConfig>(&raw)
        .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
    Ok(LoadedConfig {
        config,
        path: Some(path),
    })
}

/// An environment override whose value could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOverride {
    pub var: &'static str,
    pub value: String,
    pub reason: &'static str,
}

/// Applies `GAMINATOR__*` and `RUST_LOG` overrides. Unusable values leave the
/// setting untouched and are returned so the caller can log them.
pub fn apply_env_overrides(
    config: &mut StartupConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Vec<RejectedOverride> {
    let mut rejected = Vec::new();

    if let Some(v) = lookup("GAMINATOR__COMMAND_LOG") {
        config.command_log = Some(PathBuf::from(v));
    }

    if let Some(v) = lookup("GAMINATOR__INGEST_POLICY") {
        match v.trim().to_ascii_lowercase().as_str() {
            "strict" => config.ingest_policy = IngestPolicy::Strict,
            "lenient" => config.ingest_policy = IngestPolicy::Lenient,
            _ => rejected.push(RejectedOverride {
                var: "GAMINATOR__INGEST_POLICY",
                value: v,
                reason: "expected 'strict' or 'lenient'",
            }),
        }
    }

    if let Some(v) = lookup("RUST_LOG") {
        config.log_filter = v;
    }
    if let Some(v) = lookup("GAMINATOR__LOG_FILTER") {
        config.log_filter = v;
    }

    if let Some(v) = lookup("GAMINATOR__REFRESH_INTERVAL_MS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => config.refresh_interval_ms = parsed,
            Err(_) => rejected.push(RejectedOverride {
                var: "GAMINATOR__REFRESH_INTERVAL_MS",
                value: v,
                reason: "expected a whole number of milliseconds",
            }),
        }
    }

    rejected
}
