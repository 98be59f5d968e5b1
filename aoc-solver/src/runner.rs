//! Timed, failure-isolated execution of a single solution part

use crate::solver::{Part, Solution};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

/// Outcome of running one part of one day
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    /// The part produced an answer
    Success {
        /// The answer string
        answer: String,
        /// Wall-clock time spent inside the solution call
        elapsed: Duration,
    },
    /// The part returned an error or panicked
    Failure {
        /// Diagnostic message from the error or panic payload
        message: String,
    },
}

impl ExecutionResult {
    /// Check whether the run produced an answer
    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionResult::Success { .. })
    }

    /// The answer on success, the diagnostic message on failure
    pub fn value(&self) -> &str {
        match self {
            ExecutionResult::Success { answer, .. } => answer,
            ExecutionResult::Failure { message } => message,
        }
    }

    /// Elapsed time, only known for successful runs
    pub fn elapsed(&self) -> Option<Duration> {
        match self {
            ExecutionResult::Success { elapsed, .. } => Some(*elapsed),
            ExecutionResult::Failure { .. } => None,
        }
    }

    /// Elapsed whole milliseconds, only known for successful runs
    pub fn elapsed_ms(&self) -> Option<u128> {
        self.elapsed().map(|d| d.as_millis())
    }
}

/// Run `part` of `solution` against `input`.
///
/// Only the solution call itself is timed. Errors returned by the solution and
/// panics raised inside it are both converted into [`ExecutionResult::Failure`],
/// so a broken day can never take down the caller.
///
/// # Example
///
/// ```
/// use aoc_solver::{run, ExecutionResult, Part, Solution, SolveError};
///
/// struct Sum;
///
/// impl Solution for Sum {
///     fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
///         let total: i64 = input.split(',').filter_map(|n| n.parse::<i64>().ok()).sum();
///         Ok(total.to_string())
///     }
/// }
///
/// let result = run(&Sum, 1, Part::A, "1,2,3");
/// assert!(result.is_success());
/// assert_eq!(result.value(), "6");
///
/// let result = run(&Sum, 1, Part::B, "1,2,3");
/// assert!(matches!(result, ExecutionResult::Failure { .. }));
/// ```
pub fn run(solution: &dyn Solution, day: u8, part: Part, input: &str) -> ExecutionResult {
    tracing::debug!(day, %part, input_len = input.len(), "running solution");

    let start = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| solution.run_part(part, input)));
    let elapsed = start.elapsed();

    match outcome {
        Ok(Ok(answer)) => {
            tracing::debug!(day, %part, elapsed_ms = elapsed.as_millis() as u64, "solution finished");
            ExecutionResult::Success { answer, elapsed }
        }
        Ok(Err(e)) => {
            tracing::debug!(day, %part, error = %e, "solution returned an error");
            ExecutionResult::Failure {
                message: e.to_string(),
            }
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::debug!(day, %part, %message, "solution panicked");
            ExecutionResult::Failure { message }
        }
    }
}

/// Extract the message from a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "solution panicked with a non-string payload".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;

    struct Summing;

    impl Solution for Summing {
        fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
            input
                .split(',')
                .map(|n| n.trim().parse::<i64>().map_err(SolveError::failed))
                .sum::<Result<i64, _>>()
                .map(|total| total.to_string())
        }

        fn run_part_b(&self, _input: &str) -> Result<String, SolveError> {
            Err(SolveError::InvalidInput("no part B for this input".into()))
        }
    }

    struct Panicking;

    impl Solution for Panicking {
        fn run_part_a(&self, _input: &str) -> Result<String, SolveError> {
            panic!("index out of range");
        }

        fn run_part_b(&self, input: &str) -> Result<String, SolveError> {
            let n: usize = input.parse().unwrap_or(0);
            panic!("formatted panic {}", n);
        }
    }

    #[test]
    fn test_success_is_timed() {
        let result = run(&Summing, 1, Part::A, "1,2,3");
        assert_eq!(result.value(), "6");
        assert!(result.is_success());
        assert!(result.elapsed_ms().is_some());
    }

    #[test]
    fn test_error_becomes_failure() {
        let result = run(&Summing, 2, Part::B, "1,2,3");
        assert_eq!(
            result,
            ExecutionResult::Failure {
                message: "Invalid input: no part B for this input".to_string()
            }
        );
        assert_eq!(result.elapsed(), None);
    }

    #[test]
    fn test_parse_error_message_is_kept() {
        let result = run(&Summing, 2, Part::A, "1,x");
        assert!(!result.is_success());
        assert_eq!(result.value(), "invalid digit found in string");
    }

    #[test]
    fn test_panics_are_contained() {
        let result = run(&Panicking, 2, Part::A, "");
        assert_eq!(result.value(), "index out of range");

        let result = run(&Panicking, 2, Part::B, "7");
        assert_eq!(result.value(), "formatted panic 7");

        // A fresh instance for another day is unaffected by the earlier panics
        let result = run(&Summing, 3, Part::A, "4,5");
        assert_eq!(result.value(), "9");
    }

    #[test]
    fn test_unimplemented_part() {
        struct OnlyA;
        impl Solution for OnlyA {
            fn run_part_a(&self, _input: &str) -> Result<String, SolveError> {
                Ok("a".into())
            }
        }

        let result = run(&OnlyA, 4, Part::B, "input");
        assert_eq!(result.value(), "Part B is not implemented");
    }
}
