/// Collector module
///
/// This module groups the orchestration of a directory build:
/// - Running every configured exchange adapter
/// - Isolating failures per exchange
/// - Handing each successful listing to the aggregator
///
/// Design notes:
/// - Exchange-specific logic MUST NOT live here
/// - This module should remain thin and orchestration-focused
pub mod runner;
