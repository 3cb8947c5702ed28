// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use std::sync::Arc;

use log::{error, info, warn};
use rustls::crypto::{CryptoProvider, ring};

use symbol_directory::{
    collector::runner::collect,
    config::{Config, load_config},
    exchanges::{adapter::ExchangeAdapter, get_adapter, SUPPORTED},
    http::HttpClient,
    metrics::METRICS,
};

const DEFAULT_CONFIG_PATH: &str = "config.json";

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Builds the cross-exchange symbol directory once and exits.
//
// Responsibilities:
// - Initialize cryptography backend (rustls)
// - Load configuration (path from argv[1], default config.json)
// - Resolve enabled exchange adapters
// - Run the collector and write the directory document
//
// A failing exchange is logged and skipped. Only configuration
// and output errors end the process with a non-zero status.
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // --------------------------------------------------------
    // rustls >= 0.23 requires an explicit CryptoProvider
    // installation, once and before any TLS connection.
    // --------------------------------------------------------
    CryptoProvider::install_default(ring::default_provider())
        .map_err(|_| anyhow::anyhow!("failed to install rustls CryptoProvider"))?;

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config: Config = load_config(&config_path)?;

    init_logging(&config);
    info!("loaded configuration from {config_path}");

    let adapters = build_adapters(&config);
    if adapters.is_empty() {
        warn!("no enabled exchanges; writing an empty directory");
    }

    let http = HttpClient::new(&config.http)?;
    let report = collect(&adapters, &http).await?;

    for outcome in report.failed() {
        if let Err(e) = &outcome.result {
            error!("[{}] excluded from directory: {e}", outcome.exchange);
        }
    }

    report
        .directory
        .write_to(&config.output.path, config.output.pretty)?;

    info!(
        "wrote {} pairs from {}/{} exchanges to {}",
        report.directory.len(),
        report.succeeded().count(),
        report.outcomes.len(),
        config.output.path,
    );
    info!("{}", METRICS.summary());

    Ok(())
}

/// `RUST_LOG` wins; otherwise `debug.log` selects debug or info.
fn init_logging(config: &Config) {
    let verbose = config
        .debug
        .as_ref()
        .is_some_and(|d| d.log.unwrap_or(false));

    let default_level = if verbose { "debug" } else { "info" };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn build_adapters(config: &Config) -> Vec<Arc<dyn ExchangeAdapter>> {
    let mut adapters = Vec::new();

    for exchange_cfg in config.exchanges.iter().filter(|e| e.enabled) {
        let Some(adapter) = get_adapter(exchange_cfg, &config.http) else {
            warn!(
                "Exchange '{}' is not supported (expected one of: {})",
                exchange_cfg.name,
                SUPPORTED.join(", "),
            );
            continue;
        };

        info!("Enabling {} as '{}'", adapter.name(), adapter.label());
        adapters.push(adapter);
    }

    adapters
}
