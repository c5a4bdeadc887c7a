use std::thread;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::error::{RemoteError, RemoteResult};

/// Default per-request timeout for [`ReqwestTransport`].
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Raw response to a GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Blocking HTTP GET. Implementations return `RemoteError::Transport` when
/// no response was obtained at all.
pub trait HttpTransport: Send + Sync {
    fn get(&self, url: &str) -> RemoteResult<HttpResponse>;
}

/// Production transport over a blocking `reqwest` client.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> RemoteResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn get(&self, url: &str) -> RemoteResult<HttpResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}

/// Delays between successive attempts after a transport failure.
///
/// A policy with `n` delays makes at most `n + 1` attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delays: Vec<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delays: vec![Duration::from_millis(200), Duration::from_millis(500)],
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no retries.
    pub fn none() -> Self {
        Self { delays: Vec::new() }
    }

    pub fn max_attempts(&self) -> usize {
        self.delays.len() + 1
    }
}

/// GET `url` and decode its JSON body.
///
/// Transport failures are retried per `retry`. A non-2xx status or an
/// undecodable body ends the call immediately.
pub fn fetch_json<T: DeserializeOwned>(
    transport: &dyn HttpTransport,
    url: &str,
    retry: &RetryPolicy,
    verbose: bool,
) -> RemoteResult<T> {
    let started = Instant::now();
    if verbose {
        info!(url, "remote request");
    }

    let mut delays = retry.delays.iter();
    let response = loop {
        match transport.get(url) {
            Ok(response) => break response,
            Err(e) if e.is_retryable() => match delays.next() {
                Some(delay) => {
                    warn!(url, error = %e, delay_ms = delay.as_millis() as u64, "retrying remote request");
                    thread::sleep(*delay);
                }
                None => return Err(e),
            },
            Err(e) => return Err(e),
        }
    };

    if !response.is_success() {
        return Err(RemoteError::Status {
            status: response.status,
            body: response.body,
        });
    }
    let decoded =
        serde_json::from_str(&response.body).map_err(|e| RemoteError::Malformed(e.to_string()))?;

    let elapsed_ms = started.elapsed().as_millis() as u64;
    if verbose {
        info!(url, elapsed_ms, "remote request complete");
    } else {
        debug!(elapsed_ms, "remote request complete");
    }
    Ok(decoded)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays scripted outcomes and records every requested URL.
    #[derive(Default)]
    pub struct ScriptedTransport {
        script: Mutex<VecDeque<RemoteResult<HttpResponse>>>,
        pub urls: Mutex<Vec<String>>,
    }

    impl ScriptedTransport {
        pub fn new(script: Vec<RemoteResult<HttpResponse>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                urls: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.urls.lock().unwrap().len()
        }

        pub fn last_url(&self) -> Option<String> {
            self.urls.lock().unwrap().last().cloned()
        }
    }

    impl HttpTransport for ScriptedTransport {
        fn get(&self, url: &str) -> RemoteResult<HttpResponse> {
            self.urls.lock().unwrap().push(url.to_owned());
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(RemoteError::Transport("script exhausted".into())))
        }
    }

    pub fn refused() -> RemoteResult<HttpResponse> {
        Err(RemoteError::Transport("connection refused".into()))
    }
}
