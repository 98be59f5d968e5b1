//! Error types for the CLI

use aoc_solver::Part;
use thiserror::Error;

/// Main CLI error type
#[derive(Error, Debug)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Http(#[from] aoc_http_client::AocError),

    /// Registration error
    #[error("Registration error: {0}")]
    Registration(#[from] aoc_solver::RegistrationError),

    /// Result store error
    #[error("Result store error: {0}")]
    Store(#[from] StoreError),

    /// Test definition error
    #[error("Test file error: {0}")]
    TestFile(#[from] TestFileError),

    /// The requested solution could not be resolved
    #[error("No runnable solution for day {0}")]
    SolutionUnavailable(u8),

    /// No stored input for the day
    #[error("No input stored for day {0}, run `aoc init --day {0}` first")]
    MissingInput(u8),

    /// The requested test is not defined for the day
    #[error("Test #{test_number} not found for day {day}")]
    TestNotFound { day: u8, test_number: u32 },

    /// The test has no expected answer for the requested part
    #[error("Test #{test_number} has no expected answer for part {part}")]
    NoExpectedAnswer { test_number: u32, part: Part },

    /// Nothing to repeat
    #[error("No valid last execution recorded")]
    NoLastExecution,

    /// Puzzle input could not be fetched
    #[error("Unable to fetch input for day {day}: {message}")]
    InputFetch { day: u8, message: String },

    /// Thread pool creation failed
    #[error("Thread pool creation failed: {0}")]
    ThreadPool(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The result file is line oriented, so a value cannot span lines
    #[error("Result for day {day} part {part} spans multiple lines")]
    MultilineValue { day: u8, part: Part },

    /// A stored line is not `day|part|result`
    #[error("Malformed result on line {line_number}: {line:?}")]
    Malformed { line_number: usize, line: String },

    /// Day numbers start at 1
    #[error("Invalid day number {0}")]
    InvalidDay(u8),
}

/// Test definition file errors
#[derive(Error, Debug)]
pub enum TestFileError {
    /// The last record was opened but never closed and has no input
    #[error("Test #{test_number} is not terminated and has an empty input")]
    TruncatedRecord { test_number: u32 },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reasons a stored last execution cannot be used
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// A required key is absent
    #[error("Missing required setting '{0}'")]
    MissingKey(&'static str),

    /// A value does not parse as its expected type
    #[error("Invalid value {value:?} for setting '{key}'")]
    InvalidValue { key: &'static str, value: String },
}
