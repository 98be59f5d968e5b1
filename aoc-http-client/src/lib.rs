//! AOC HTTP Client Library
//!
//! Fetches puzzle inputs from the Advent of Code website.
//!
//! # Features
//!
//! - [`AocClient`]: one authenticated GET per call, no redirects followed
//! - [`PuzzleInputClient`]: per-day in-memory cache and request throttling on top
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//! - Session cookies are sent as sensitive headers and zeroized after use
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::{AocClient, PuzzleInputClient, ResponseKind};
//! use zeroize::Zeroizing;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let session = Zeroizing::new("your_session_cookie_here".to_string());
//! let client = PuzzleInputClient::new(AocClient::new()?, 2025, Some(session));
//!
//! let response = client.fetch_input(1);
//! match response.kind {
//!     ResponseKind::Success => println!("{}", response.content),
//!     ResponseKind::Failure => eprintln!("Could not fetch input: {}", response.content),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod input_client;

pub use client::{AocClient, AocClientBuilder, DEFAULT_USER_AGENT};
pub use error::AocError;
pub use input_client::{
    ClientResponse, DEFAULT_THROTTLE_INTERVAL, PuzzleInputClient, ResponseKind, read_session_file,
};
