//! Cached, throttled puzzle input fetching

use crate::client::AocClient;
use crate::error::AocError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};
use zeroize::Zeroizing;

/// Minimum spacing between two requests for the same day
pub const DEFAULT_THROTTLE_INTERVAL: Duration = Duration::from_secs(15);

/// Whether a fetch produced the puzzle input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Success,
    Failure,
}

/// Outcome of [`PuzzleInputClient::fetch_input`]
///
/// On success `content` is the puzzle input, otherwise a diagnostic (the
/// response body for HTTP errors, the error message for transport failures).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientResponse {
    pub kind: ResponseKind,
    pub content: String,
}

impl ClientResponse {
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Success,
            content: content.into(),
        }
    }

    pub fn failure(content: impl Into<String>) -> Self {
        Self {
            kind: ResponseKind::Failure,
            content: content.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == ResponseKind::Success
    }
}

#[derive(Default)]
struct FetchState {
    cache: HashMap<u8, ClientResponse>,
    last_request: HashMap<u8, Instant>,
    /// One gate per day; a fetch holds its day's gate from cache check to ledger update
    day_gates: HashMap<u8, Arc<Mutex<()>>>,
}

/// Front end over [`AocClient`] for one puzzle year.
///
/// - Successful responses are cached in memory per day for the lifetime of the client.
/// - Requests for the same day are spaced by at least the throttle interval; the
///   wait only blocks the calling thread, other days are unaffected.
/// - Without a session credential no request is made at all.
///
/// The client can be shared by reference between threads. Fetches of the same day
/// are serialized by a per-day gate, so a concurrent caller waits its throttle turn
/// and then sees the response the previous caller cached. The shared cache and
/// request ledger sit behind a mutex that is never held across the throttle sleep
/// or the network call, so other days are never blocked.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::{AocClient, PuzzleInputClient};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PuzzleInputClient::from_session_file(
///     AocClient::new()?,
///     2025,
///     "puzzles/state/session-cookie.txt",
/// );
///
/// let response = client.fetch_input(1);
/// if response.is_success() {
///     println!("{} bytes of input", response.content.len());
/// }
/// # Ok(())
/// # }
/// ```
pub struct PuzzleInputClient {
    client: AocClient,
    year: u16,
    session: Option<Zeroizing<String>>,
    throttle: Duration,
    state: Mutex<FetchState>,
}

impl PuzzleInputClient {
    /// Create a client for `year` with an optional session credential
    pub fn new(client: AocClient, year: u16, session: Option<Zeroizing<String>>) -> Self {
        Self {
            client,
            year,
            session: session.filter(|s| !s.trim().is_empty()),
            throttle: DEFAULT_THROTTLE_INTERVAL,
            state: Mutex::new(FetchState::default()),
        }
    }

    /// Create a client whose credential is read from `session_file` right now
    pub fn from_session_file(client: AocClient, year: u16, session_file: impl AsRef<Path>) -> Self {
        Self::new(client, year, read_session_file(session_file.as_ref()))
    }

    /// Override the per-day throttle interval
    pub fn with_throttle_interval(mut self, throttle: Duration) -> Self {
        self.throttle = throttle;
        self
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    /// Whether a session credential is configured
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Whether a successful response for `day` is cached
    pub fn is_cached(&self, day: u8) -> bool {
        self.lock_state().cache.contains_key(&day)
    }

    /// Fetch the puzzle input for `day`.
    ///
    /// Never returns an error: every problem is reported as a
    /// [`ResponseKind::Failure`] response.
    pub fn fetch_input(&self, day: u8) -> ClientResponse {
        let gate = self.day_gate(day);
        let _turn = gate.lock().unwrap_or_else(PoisonError::into_inner);

        let wait = {
            let state = self.lock_state();
            if let Some(cached) = state.cache.get(&day) {
                tracing::debug!(day, "puzzle input served from cache");
                return cached.clone();
            }
            state
                .last_request
                .get(&day)
                .and_then(|last| self.throttle.checked_sub(last.elapsed()))
        };

        let Some(session) = self.session.as_deref() else {
            tracing::warn!(day, "no session credential configured, skipping request");
            return ClientResponse::failure("Session cookie not found.");
        };

        if let Some(wait) = wait.filter(|w| !w.is_zero()) {
            tracing::info!(day, wait_ms = wait.as_millis() as u64, "throttling input request");
            std::thread::sleep(wait);
        }

        let response = match self.client.get_input(self.year, day, session) {
            Ok(body) => ClientResponse::success(body),
            Err(AocError::InvalidStatus { status, body }) => {
                tracing::warn!(day, %status, "input request rejected");
                if body.trim().is_empty() {
                    ClientResponse::failure(format!("HTTP {}", status))
                } else {
                    ClientResponse::failure(body)
                }
            }
            Err(e) => {
                tracing::warn!(day, error = %e, "input request failed");
                ClientResponse::failure(e.to_string())
            }
        };

        let mut state = self.lock_state();
        state.last_request.insert(day, Instant::now());
        if response.is_success() {
            state.cache.insert(day, response.clone());
        }
        response
    }

    fn day_gate(&self, day: u8) -> Arc<Mutex<()>> {
        Arc::clone(self.lock_state().day_gates.entry(day).or_default())
    }

    fn lock_state(&self) -> MutexGuard<'_, FetchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Read a session credential file, returning `None` when it is missing or blank
pub fn read_session_file(path: &Path) -> Option<Zeroizing<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let content = Zeroizing::new(content);
            let trimmed = content.trim();
            if trimmed.is_empty() {
                tracing::warn!(path = %path.display(), "session file is empty");
                None
            } else {
                Some(Zeroizing::new(trimmed.to_string()))
            }
        }
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "session file not readable");
            None
        }
    }
}
