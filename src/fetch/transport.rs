//! GET-and-decode primitive: the [`Transport`] seam and its reqwest implementation.

use anyhow::{Context, Result};
use log::trace;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, HeaderValue};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::HttpOpts;
use crate::error::FetchError;

/// Blocking GET returning the full response body.
///
/// Implementations must release the connection/response before returning, on success and on failure.
pub trait Transport: Send + Sync {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError>;
}

/// GET `url` through `transport` and decode the JSON body into `T`. Unknown fields are ignored.
pub fn fetch_json<T: DeserializeOwned>(
    transport: &dyn Transport,
    url: &str,
) -> std::result::Result<T, FetchError> {
    let body = transport.get(url)?;
    trace!("GET {} -> {} bytes", url, body.len());
    serde_json::from_slice(&body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

/// [`Transport`] over a `reqwest` blocking client. Non-2xx statuses are failures.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(opts: &HttpOpts) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(opts.timeout_secs))
            .user_agent(opts.user_agent.as_str())
            .build()
            .context("build HTTP client")?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> std::result::Result<Vec<u8>, FetchError> {
        let transport_err = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            message: e.to_string(),
        };
        let response = self
            .client
            .get(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .map_err(transport_err)?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        // Reading the body to the end consumes the response and frees the connection.
        let body = response.bytes().map_err(transport_err)?;
        Ok(body.to_vec())
    }
}
