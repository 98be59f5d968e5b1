//! AOC HTTP client implementation

use crate::error::AocError;
use reqwest::header::{HeaderValue, USER_AGENT};
use zeroize::Zeroize;

/// User agent sent with every request unless overridden on the builder
pub const DEFAULT_USER_AGENT: &str = concat!(
    "aoc-http-client/",
    env!("CARGO_PKG_VERSION"),
    " (personal Advent of Code runner; fetches each input once)"
);

/// The low-level AOC HTTP client
///
/// Performs a single authenticated GET per call and never caches; see
/// [`PuzzleInputClient`](crate::PuzzleInputClient) for the cached, throttled front end.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new()?;
/// let input = client.get_input(2025, 1, "your_session_cookie")?;
/// println!("Input: {}", input);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    user_agent: HeaderValue,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    ///
    /// # Example
    ///
    /// ```
    /// use aoc_http_client::AocClient;
    ///
    /// let client = AocClient::new().expect("Failed to create client");
    /// assert_eq!(client.base_url().as_str(), "https://adventofcode.com/");
    /// ```
    pub fn new() -> Result<Self, AocError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the AOC client
    pub fn builder() -> AocClientBuilder {
        AocClientBuilder::new()
    }

    /// The base URL requests are built from
    pub fn base_url(&self) -> &reqwest::Url {
        &self.base_url
    }

    /// Create a secure cookie header value from a session string
    ///
    /// The header is flagged sensitive and the temporary string is zeroized.
    fn create_cookie_header(session: &str) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", session);
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }

    /// Fetch puzzle input for a specific year and day
    ///
    /// Issues `GET {base}/{year}/day/{day}/input` with the session cookie attached.
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - Any non-2xx status; the body is kept as diagnostic
    /// * `AocError::Encoding` - Response is not valid UTF-8
    /// * `AocError::InvalidDay` - Day 0, rejected before any request
    pub fn get_input(&self, year: u16, day: u8, session: &str) -> Result<String, AocError> {
        if day == 0 {
            return Err(AocError::InvalidDay(day));
        }
        let cookie_header = Self::create_cookie_header(session)?;

        // Construct URL using path segments
        let (year, day) = (year.to_string(), day.to_string());
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend([year.as_str(), "day", day.as_str(), "input"]);

        tracing::debug!(%url, "requesting puzzle input");

        let response = self
            .client
            .get(url)
            .header("Cookie", cookie_header)
            .header(USER_AGENT, self.user_agent.clone())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            // An unreadable error body must not hide the status
            let body = response.text().unwrap_or_default();
            return Err(AocError::InvalidStatus { status, body });
        }

        response.text().map_err(|_| AocError::Encoding)
    }
}

/// Builder for configuring an AOC HTTP client
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::AocClient;
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder()
///     .base_url("http://localhost:1234")?
///     .user_agent("my-runner/1.0 (me@example.com)")
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    base_url: Option<reqwest::Url>,
    user_agent: Option<String>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            base_url: None,
            user_agent: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// This is useful for testing with mock servers. The URL is parsed and validated
    /// at builder time, catching errors early.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set the user agent sent with every request
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a custom HTTP client builder
    ///
    /// The redirect policy is always overridden to `Policy::none()`, so a redirect
    /// surfaces as a non-success status instead of being followed.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized or
    /// the user agent is not a valid header value.
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse("https://adventofcode.com")
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let user_agent = HeaderValue::from_str(
            self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT),
        )
        .map_err(|_| AocError::ClientInit("Invalid user agent".to_string()))?;

        // Use provided client builder or create default with rustls-tls
        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            user_agent,
        })
    }
}

impl Default for AocClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
