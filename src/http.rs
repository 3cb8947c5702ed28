use std::sync::atomic::Ordering;
use std::time::Duration;

use log::debug;
use serde_json::Value;

use crate::{config::HttpConfig, error::FetchError, metrics::METRICS};

/// JsonSource is the transport seam between adapters and the network.
///
/// Adapters only ever ask for "the JSON body at this URL". Keeping
/// the transport behind a trait lets the whole fetch path run
/// against canned responses in tests.
///
/// CONTRACT:
/// - Non-success status codes are errors (`FetchError::Status`)
/// - Timeouts and connection failures are `FetchError::Transport`
/// - A non-JSON body is `FetchError::Decode`
///
#[async_trait::async_trait]
pub trait JsonSource: Send + Sync {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError>;
}

/// reqwest-backed JsonSource.
///
/// One client is shared by all adapters so connections to the same
/// host are pooled. Retries are intentionally not performed.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(cfg: &HttpConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl JsonSource for HttpClient {
    async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
        METRICS.requests_sent.fetch_add(1, Ordering::Relaxed);
        debug!("GET {url}");

        let result = fetch_body(&self.client, url).await;
        if result.is_err() {
            METRICS.request_failures.fetch_add(1, Ordering::Relaxed);
        }
        result
    }
}

async fn fetch_body(client: &reqwest::Client, url: &str) -> Result<Value, FetchError> {
    let transport = |source| FetchError::Transport {
        url: url.to_string(),
        source,
    };

    let resp = client.get(url).send().await.map_err(transport)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let body = resp.bytes().await.map_err(transport)?;

    serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Canned responses keyed by URL. Unknown URLs answer 404.
    #[derive(Default)]
    pub struct StaticSource {
        responses: HashMap<String, Result<Value, u16>>,
        pub calls: Mutex<Vec<String>>,
    }

    impl StaticSource {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn ok(mut self, url: &str, body: Value) -> Self {
            self.responses.insert(url.to_string(), Ok(body));
            self
        }

        pub fn status(mut self, url: &str, status: u16) -> Self {
            self.responses.insert(url.to_string(), Err(status));
            self
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait::async_trait]
    impl JsonSource for StaticSource {
        async fn get_json(&self, url: &str) -> Result<Value, FetchError> {
            self.calls.lock().unwrap().push(url.to_string());

            match self.responses.get(url) {
                Some(Ok(v)) => Ok(v.clone()),
                Some(Err(status)) => Err(FetchError::Status {
                    url: url.to_string(),
                    status: *status,
                }),
                None => Err(FetchError::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }
}
