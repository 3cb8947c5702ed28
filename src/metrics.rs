use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use once_cell::sync::Lazy;

/// Global runtime metrics for a directory build.
///
/// Purpose:
/// - Track exchange-level outcomes
/// - Track request volume and failures
/// - Track instruments lost to partial data
///
/// Design:
/// - Lock-free (Atomics)
/// - Observational only; no logic reads these back
#[derive(Default)]
pub struct RuntimeMetrics {
    // Exchanges
    pub exchanges_ok: AtomicUsize,
    pub exchanges_failed: AtomicUsize,

    // HTTP
    pub requests_sent: AtomicUsize,
    pub request_failures: AtomicUsize,

    // Instruments
    pub detail_skipped: AtomicUsize,
    pub instruments_dropped: AtomicUsize,
    pub symbols_merged: AtomicUsize,
}

impl RuntimeMetrics {
    /// One-line summary, printed once at the end of a run.
    pub fn summary(&self) -> String {
        format!(
            "[METRICS] ex_ok={} ex_failed={} req={} req_err={} detail_skipped={} dropped={} merged={}",
            self.exchanges_ok.load(Ordering::Relaxed),
            self.exchanges_failed.load(Ordering::Relaxed),
            self.requests_sent.load(Ordering::Relaxed),
            self.request_failures.load(Ordering::Relaxed),
            self.detail_skipped.load(Ordering::Relaxed),
            self.instruments_dropped.load(Ordering::Relaxed),
            self.symbols_merged.load(Ordering::Relaxed),
        )
    }
}

/// Global metrics registry (singleton)
pub static METRICS: Lazy<Arc<RuntimeMetrics>> =
    Lazy::new(|| Arc::new(RuntimeMetrics::default()));
