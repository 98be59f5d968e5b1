//! Failures of a puzzle input download

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AocError {
    /// Transport failure before a response arrived
    #[error("Input request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status
    #[error("Input request rejected with {status}")]
    InvalidStatus {
        status: reqwest::StatusCode,
        /// Response body, shown to the user as the reason
        body: String,
    },

    /// Puzzle days start at 1
    #[error("Invalid puzzle day {0}")]
    InvalidDay(u8),

    #[error("Puzzle input is not valid UTF-8")]
    Encoding,

    /// Bad base URL, user agent or session cookie
    #[error("Client initialization failed: {0}")]
    ClientInit(String),
}
