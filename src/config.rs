use serde::Deserialize;
use std::fs;
use std::path::Path;

// ------------------------------------------------------------
// Root configuration
// ------------------------------------------------------------
//
// This is the top-level configuration structure loaded from
// `config.json`.
//
// It defines:
// - Where the directory document is written
// - HTTP client behavior (timeouts, detail fan-out)
// - Enabled exchanges and their overrides
// - Optional debug configuration
//
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Output document settings
    pub output: OutputConfig,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpConfig,

    /// List of exchange configurations
    pub exchanges: Vec<ExchangeConfig>,

    /// Optional debug configuration
    pub debug: Option<DebugConfig>,
}

// ------------------------------------------------------------
// Output configuration
// ------------------------------------------------------------
//
// The file at `path` is fully overwritten on every run.
//
#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    /// Destination of the JSON directory document
    pub path: String,

    /// Pretty-print the document (default: true)
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

// ------------------------------------------------------------
// HTTP configuration
// ------------------------------------------------------------
//
// Notes:
// - `timeout_secs` applies to every single request, primary
//   listings and per-instrument detail calls alike.
// - `detail_concurrency` bounds parallel detail requests for
//   exchanges that need one call per instrument.
//
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_detail_concurrency")]
    pub detail_concurrency: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            detail_concurrency: default_detail_concurrency(),
            user_agent: default_user_agent(),
        }
    }
}

// ------------------------------------------------------------
// Exchange configuration
// ------------------------------------------------------------
//
// Configuration for a single exchange adapter.
//
#[derive(Debug, Deserialize, Clone)]
pub struct ExchangeConfig {
    /// Adapter identifier (e.g. "gemini", "kraken", "cryptocom")
    pub name: String,

    /// Enables or disables this exchange at runtime
    pub enabled: bool,

    /// Directory key for this exchange; defaults to the adapter label
    pub label: Option<String>,

    /// Overrides the public REST base URL (mirrors, testing)
    pub base_url: Option<String>,
}

impl ExchangeConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            enabled: true,
            label: None,
            base_url: None,
        }
    }
}

// ------------------------------------------------------------
// Debug configuration
// ------------------------------------------------------------
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    /// Enables debug-level logging
    pub log: Option<bool>,
}

fn default_pretty() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_detail_concurrency() -> usize {
    8
}

fn default_user_agent() -> String {
    concat!("symbol-directory/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Reads a JSON configuration file from disk and deserializes
/// it into the strongly typed `Config` structure.
pub fn load_config(path: impl AsRef<Path>) -> anyhow::Result<Config> {
    let data = fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&data)?;
    Ok(cfg)
}
