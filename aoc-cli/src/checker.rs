//! Re-run every stored result and compare answers

use crate::error::CliError;
use crate::results::SolutionResult;
use crate::solutions::SolutionManager;
use aoc_solver::{ExecutionResult, Part};
use rayon::prelude::*;
use std::fmt;
use std::time::Duration;

/// Verdict of one re-run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Not run yet
    Pending,
    /// Answer matches the stored result
    Yes,
    /// Answer differs from the stored result
    No { answer: String },
    /// The solution failed
    Error { message: String },
    /// No runnable solution or no input
    Skipped,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            CheckStatus::Pending => "Pending",
            CheckStatus::Yes => "Yes",
            CheckStatus::No { .. } => "No",
            CheckStatus::Error { .. } => "Error",
            CheckStatus::Skipped => "Skipped",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckRow {
    pub day: u8,
    pub part: Part,
    pub expected: String,
    pub status: CheckStatus,
    pub elapsed: Option<Duration>,
}

impl CheckRow {
    fn pending(result: SolutionResult) -> Self {
        Self {
            day: result.day,
            part: result.part,
            expected: result.result,
            status: CheckStatus::Pending,
            elapsed: None,
        }
    }

    /// Resolve, read input and run, writing only into this row
    fn check(&mut self, manager: &SolutionManager) {
        let Some(solution) = manager.create_solution_instance(self.day) else {
            self.status = CheckStatus::Skipped;
            return;
        };
        let input = manager.read_input_file(self.day);
        if input.is_empty() {
            self.status = CheckStatus::Skipped;
            return;
        }

        match aoc_solver::run(solution.as_ref(), self.day, self.part, &input) {
            ExecutionResult::Success { answer, elapsed } => {
                self.elapsed = Some(elapsed);
                self.status = if answer == self.expected {
                    CheckStatus::Yes
                } else {
                    CheckStatus::No { answer }
                };
            }
            ExecutionResult::Failure { message } => {
                self.status = CheckStatus::Error { message };
            }
        }
    }
}

/// Re-run every stored (day, part) on a pool of `threads` workers.
///
/// Rows come back in the order of `results`; one failing day never stops the others.
pub fn check_all(
    manager: &SolutionManager,
    results: Vec<SolutionResult>,
    threads: usize,
) -> Result<Vec<CheckRow>, CliError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| CliError::ThreadPool(e.to_string()))?;

    let mut rows: Vec<CheckRow> = results.into_iter().map(CheckRow::pending).collect();
    pool.install(|| {
        rows.par_iter_mut().for_each(|row| {
            row.check(manager);
            tracing::debug!(day = row.day, part = %row.part, status = %row.status, "checked");
        })
    });
    Ok(rows)
}
