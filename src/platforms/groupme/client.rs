use reqwest::header::HeaderMap;
use reqwest::{Client, Request, Response};
use url::Url;

use super::config::TransportConfig;
use crate::error::{Error, ErrorCode, Result};
use crate::runtime::BlockingRuntime;

lazy_static::lazy_static! {
    /// Process-wide transport, built from `TransportConfig::from_env()` on first use
    static ref SHARED: Result<Transport> = Transport::new(TransportConfig::from_env());
}

/// Raw outcome of a completed HTTP exchange
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// The single HTTP client used for every outbound GroupMe call
///
/// One transport is meant to be built once and shared by every caller,
/// from any number of threads. It holds the connection pool and the
/// runtime that drives it; its configuration never changes after
/// construction. Each call makes exactly one attempt, with no retries.
#[derive(Debug)]
pub struct Transport {
    /// HTTP client for REST API calls
    pub(crate) http_client: Client,
    /// Runtime the client's connections live on
    runtime: BlockingRuntime,
    /// Base URL resource paths are joined onto (e.g., "https://api.groupme.com/v3")
    base_url: Url,
}

impl Transport {
    /// Create a new transport
    ///
    /// # Arguments
    /// * `config` - Base URL and optional User-Agent
    ///
    /// # Returns
    /// A Result containing the Transport or an Error
    pub fn new(config: TransportConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::invalid_argument(format!("Invalid URL: {e}")))?;

        let mut builder = Client::builder();
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let http_client = builder
            .build()
            .map_err(|e| Error::new(ErrorCode::Unknown, format!("Failed to create HTTP client: {e}")))?;

        let runtime = BlockingRuntime::new()?;

        tracing::debug!(base_url = %base_url, "transport initialized");

        Ok(Self {
            http_client,
            runtime,
            base_url,
        })
    }

    /// Create a transport pointed at the public GroupMe API
    pub fn default_transport() -> Result<Self> {
        Transport::new(TransportConfig::default())
    }

    /// The process-wide transport
    ///
    /// Initialized on first use and never torn down. Operations never reach
    /// for it on their own; callers that want one global client pass this in.
    pub fn shared() -> Result<&'static Transport> {
        SHARED.as_ref().map_err(Clone::clone)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the full URL for a resource path
    ///
    /// # Arguments
    /// * `path` - The resource path (e.g., "/groups")
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let path = path.trim_start_matches('/');
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|e| Error::invalid_argument(format!("Invalid endpoint '{path}': {e}")))
    }

    /// Perform a request, blocking until the response head arrives
    ///
    /// Connection, DNS, TLS and timeout failures come back as
    /// `ErrorCode::NetworkError`.
    pub fn send(&self, request: Request) -> Result<Response> {
        let method = request.method().clone();
        tracing::debug!(%method, path = request.url().path(), "sending request");

        let response = self
            .runtime
            .block_on(self.http_client.execute(request))
            .map_err(|e| Error::network(format!("{method} request failed: {}", e.without_url())))?;

        tracing::debug!(status = response.status().as_u16(), "received response");
        Ok(response)
    }

    /// Read a response body in full
    ///
    /// A broken or truncated stream comes back as `ErrorCode::ReadError`.
    pub fn read_body(&self, response: Response) -> Result<RawResponse> {
        let status = response.status().as_u16();
        let headers = response.headers().clone();

        let body = self.runtime.block_on(response.bytes()).map_err(|e| {
            Error::read(format!("Failed to read response body: {}", e.without_url())).with_http_status(status)
        })?;

        Ok(RawResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}
