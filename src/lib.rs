// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - config:      Configuration structs loaded from JSON
// - schema:      Canonical symbol record
// - error:       Fetch and persistence error types
// - util:        Shared helper utilities (pair splitting, JSON access)
// - http:        Transport seam (JsonSource) and the reqwest client
// - exchanges:   Exchange adapters and adapter registry
// - aggregator:  The cross-exchange lookup directory
// - collector:   Run orchestration (concurrent fetch, single-writer merge)
// - metrics:     Process-wide counters
//
pub mod aggregator;
pub mod collector;
pub mod config;
pub mod error;
pub mod exchanges;
pub mod http;
pub mod metrics;
pub mod schema;
pub mod util;

pub use aggregator::Directory;
pub use schema::Symbol;
