//! HTTP access to the font-serving endpoint.

use std::time::Duration;

use ureq::Agent;
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use url::Url;

/// Path of the font API relative to the request host.
pub const FONT_API_PATH: &str = "/api/font";

/// Default timeout for a single font request (10 seconds).
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Default maximum response body size for a font bundle (20 MB).
pub const DEFAULT_MAX_BUNDLE_SIZE: u64 = 20 * 1024 * 1024;

/// Transport-level failures talking to the font endpoint.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request host could not be turned into a font API URL.
    #[error("invalid font host '{host}': {source}")]
    InvalidHost {
        host: String,
        #[source]
        source: url::ParseError,
    },

    /// Only plain HTTP(S) hosts can serve fonts.
    #[error("unsupported font host scheme '{scheme}' in '{host}'; expected http or https")]
    UnsupportedScheme { host: String, scheme: String },

    /// DNS, connect, TLS, or timeout failure.
    #[error("font request to {url} failed: {message}")]
    Transport { url: String, message: String },

    /// The response body could not be read or exceeded the size limit.
    #[error("failed to read font bundle from {url}: {message}")]
    Body { url: String, message: String },
}

/// What the font endpoint answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    /// Successful response carrying an encoded font bundle.
    Bundle(Vec<u8>),
    /// Any non-success status; the endpoint has no coverage for the request.
    Status(u16),
}

/// Build the font API URL for `families` and `text`.
///
/// `host` includes the scheme (e.g. `https://cards.example.com`). Each family
/// becomes its own `fonts` parameter, followed by a single `text` parameter,
/// all form-url-encoded.
pub fn font_request_url(host: &str, families: &[&str], text: &str) -> Result<Url, FetchError> {
    let base = format!("{}{}", host.trim_end_matches('/'), FONT_API_PATH);
    let mut url = Url::parse(&base).map_err(|source| FetchError::InvalidHost {
        host: host.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(FetchError::UnsupportedScheme {
                host: host.to_string(),
                scheme: scheme.to_string(),
            });
        }
    }

    {
        let mut query = url.query_pairs_mut();
        for family in families {
            query.append_pair("fonts", family);
        }
        query.append_pair("text", text);
    }

    Ok(url)
}

/// A source of encoded font bundles.
///
/// Implementations are blocking; the loader runs them on tokio's blocking
/// pool.
pub trait FontEndpoint: Send + Sync {
    /// Fetch the bundle at `url`.
    ///
    /// A non-success HTTP status is a normal answer ([`FetchResponse::Status`]),
    /// not an error.
    fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError>;
}

/// [`FontEndpoint`] backed by a ureq agent with native-tls.
pub struct HttpFontEndpoint {
    agent: Agent,
    max_body: u64,
    user_agent: String,
}

impl std::fmt::Debug for HttpFontEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpFontEndpoint")
            .field("max_body", &self.max_body)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpFontEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_FETCH_TIMEOUT, DEFAULT_MAX_BUNDLE_SIZE)
    }
}

impl HttpFontEndpoint {
    /// Create an endpoint with a global per-request timeout and body size cap.
    pub fn new(timeout: Duration, max_body: u64) -> Self {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        let agent: Agent = Agent::config_builder()
            .tls_config(tls_config)
            .timeout_global(Some(timeout))
            .build()
            .into();

        Self {
            agent,
            max_body,
            user_agent: "stat-card".to_string(),
        }
    }

    /// Override the `User-Agent` header sent with every request.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl FontEndpoint for HttpFontEndpoint {
    fn fetch(&self, url: &Url) -> Result<FetchResponse, FetchError> {
        log::debug!("Requesting font bundle: {}", url);

        let result = self
            .agent
            .get(url.as_str())
            .header("User-Agent", self.user_agent.as_str())
            .call();

        let mut response = match result {
            Ok(response) => response,
            Err(ureq::Error::StatusCode(status)) => return Ok(FetchResponse::Status(status)),
            Err(e) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    message: e.to_string(),
                });
            }
        };

        let status = response.status();
        if !status.is_success() {
            return Ok(FetchResponse::Status(status.as_u16()));
        }

        let body = response
            .body_mut()
            .with_config()
            .limit(self.max_body)
            .read_to_vec()
            .map_err(|e| FetchError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        Ok(FetchResponse::Bundle(body))
    }
}
