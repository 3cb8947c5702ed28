use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::Ordering;

use futures_util::stream::{FuturesUnordered, StreamExt};
use log::{info, warn};

use crate::{
    aggregator::Directory,
    error::FetchError,
    exchanges::adapter::ExchangeAdapter,
    http::JsonSource,
    metrics::METRICS,
};

/// Result of one exchange's contribution to a run.
#[derive(Debug)]
pub struct ExchangeOutcome {
    /// Directory label of the exchange
    pub exchange: String,

    /// Number of records merged, or why the exchange contributed nothing
    pub result: Result<usize, FetchError>,
}

/// Everything a run produced: the directory plus one outcome per
/// exchange, in completion order.
#[derive(Debug)]
pub struct RunReport {
    pub directory: Directory,
    pub outcomes: Vec<ExchangeOutcome>,
}

impl RunReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &ExchangeOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failed(&self) -> impl Iterator<Item = &ExchangeOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }
}

/// Builds a fresh directory from all given adapters.
///
/// This function:
/// - Fetches every adapter concurrently
/// - Merges each listing as soon as its fetch completes
/// - Records a failed exchange and keeps going
///
/// DESIGN:
/// - Fetches run as futures on the calling task, not spawned
/// - This task is the only writer of the directory, so no lock
///   is needed and one exchange's merge is never interleaved
///   with another's
///
/// ERRORS:
/// - Duplicate exchange labels (they would share directory keys)
/// - Exchange failures are NOT errors here; they are reported
///   in `RunReport::outcomes`
///
pub async fn collect(
    adapters: &[Arc<dyn ExchangeAdapter>],
    http: &dyn JsonSource,
) -> anyhow::Result<RunReport> {
    let mut seen = HashSet::new();
    for adapter in adapters {
        if !seen.insert(adapter.label()) {
            anyhow::bail!("duplicate exchange label '{}'", adapter.label());
        }
    }

    let mut pending: FuturesUnordered<_> = adapters
        .iter()
        .map(move |adapter| async move {
            info!("[{}] fetching {}", adapter.label(), adapter.listing_url());
            (adapter, adapter.fetch(http).await)
        })
        .collect();

    let mut directory = Directory::new();
    let mut outcomes = Vec::with_capacity(adapters.len());

    while let Some((adapter, fetched)) = pending.next().await {
        let label = adapter.label();

        let result = match fetched {
            Ok(symbols) => {
                directory.merge(&symbols, label);

                info!("[{label}] merged {} symbols", symbols.len());
                METRICS.exchanges_ok.fetch_add(1, Ordering::Relaxed);
                METRICS.symbols_merged.fetch_add(symbols.len(), Ordering::Relaxed);

                Ok(symbols.len())
            }
            Err(e) => {
                warn!("[{label}] failed, contributing nothing: {e}");
                METRICS.exchanges_failed.fetch_add(1, Ordering::Relaxed);

                Err(e)
            }
        };

        outcomes.push(ExchangeOutcome {
            exchange: label.to_string(),
            result,
        });
    }

    Ok(RunReport { directory, outcomes })
}
