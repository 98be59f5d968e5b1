//! Error types for the solver library

use crate::solver::Part;
use thiserror::Error;

/// Error raised by a solution while computing a part
#[derive(Debug, Error)]
pub enum SolveError {
    /// The requested part has no implementation yet
    #[error("Part {0} is not implemented")]
    PartNotImplemented(Part),
    /// The puzzle input does not have the expected shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Any other failure, carrying the underlying error's message
    #[error("{0}")]
    Failed(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl SolveError {
    /// Wrap an arbitrary error (including `anyhow::Error`) as a solve failure
    pub fn failed(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SolveError::Failed(error.into())
    }
}

/// Error type for registration failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two solutions were registered for the same day
    #[error("Duplicate solution registration for day {0}")]
    DuplicateSolution(u8),
    /// Day numbers start at 1
    #[error("Invalid day number {0}")]
    InvalidDay(u8),
}

/// Error type for resolving a registered solution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolutionError {
    /// Nothing is registered for the day
    #[error("No solution registered for day {0}")]
    NotRegistered(u8),
    /// The factory panicked while constructing the solution
    #[error("Unable to create solution for day {day}: {message}")]
    Construction { day: u8, message: String },
}

/// Error returned when a part name is neither `A` nor `B`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid part '{0}', expected A or B")]
pub struct ParsePartError(pub String);
