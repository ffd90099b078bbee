use std::fmt;
use std::time::Duration;

use clap::ValueEnum;
use log::debug;

use crate::error::{Error, Result};

/// Sends a JSON body to a URL and hands back the raw response body.
///
/// This is the only place the library touches the network; everything above
/// it works on typed commands and responses.
pub trait Transport {
    fn post(&self, url: &str, body: String) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, url: &str, body: String) -> Result<String> {
        (**self).post(url, body)
    }
}

/// URL scheme used to reach a device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    Http,
    #[default]
    Https,
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scheme::Http => write!(f, "http"),
            Scheme::Https => write!(f, "https"),
        }
    }
}

/// How a client reaches its device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub scheme: Scheme,
    pub port: u16,
    /// Per-request timeout. `None` keeps the HTTP client's default.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            scheme: Scheme::Https,
            port: 80,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// The command endpoint of the device at `host`.
    pub fn device_url(&self, host: &str) -> String {
        format!("{}://{}:{}/post", self.scheme, host, self.port)
    }
}

/// Blocking HTTP transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|source| Error::Network {
            operation: "build HTTP client".to_string(),
            source,
        })?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, body: String) -> Result<String> {
        debug!("POST {} {}", url, body);
        let network = |source| Error::Network {
            operation: format!("POST {}", url),
            source,
        };
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .and_then(|response| response.error_for_status())
            .map_err(network)?;
        response.text().map_err(network)
    }
}
