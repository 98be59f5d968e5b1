//! Output formatting for runs, tests and checks

use crate::checker::{CheckRow, CheckStatus};
use aoc_solver::{ExecutionResult, Part};
use itertools::Itertools;
use std::time::Duration;

/// Output formatter for command results
pub struct OutputFormatter {
    quiet: bool,
    start_time: std::time::Instant,
}

impl OutputFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            start_time: std::time::Instant::now(),
        }
    }

    /// Print the outcome of running a part against the real input
    pub fn print_run(&self, day: u8, part: Part, result: &ExecutionResult) {
        match result {
            ExecutionResult::Success { answer, .. } if self.quiet => println!("{}", answer),
            ExecutionResult::Success { answer, elapsed } => {
                println!(
                    "Day {:02} Part {}: {} (solve: {})",
                    day,
                    part,
                    answer,
                    format_duration(*elapsed)
                );
            }
            ExecutionResult::Failure { message } => {
                eprintln!("Day {:02} Part {}: Error - {}", day, part, message);
            }
        }
    }

    /// Print the outcome of running a test case; returns whether it passed
    pub fn print_test(
        &self,
        day: u8,
        part: Part,
        test_number: u32,
        expected: &str,
        result: &ExecutionResult,
    ) -> bool {
        let prefix = format!("Day {:02} Part {} Test #{}", day, part, test_number);
        match result {
            ExecutionResult::Success { answer, elapsed } => {
                let passed = answer == expected;
                if self.quiet {
                    println!("{}", if passed { "passed" } else { "failed" });
                } else {
                    println!(
                        "{}: {} (expected: {}, solve: {})",
                        prefix,
                        if passed { "✓ passed" } else { "✗ failed" },
                        expected,
                        format_duration(*elapsed)
                    );
                    if !passed {
                        println!("  got: {}", answer);
                    }
                }
                passed
            }
            ExecutionResult::Failure { message } => {
                eprintln!("{}: Error - {}", prefix, message);
                false
            }
        }
    }

    /// Print the check table followed by a summary
    pub fn print_check(&self, rows: &[CheckRow]) {
        println!("{}", render_check_table(rows));

        if self.quiet {
            return;
        }

        let count = |f: fn(&CheckStatus) -> bool| rows.iter().filter(|r| f(&r.status)).count();
        let total_solve_time: Duration = rows.iter().filter_map(|r| r.elapsed).sum();
        let elapsed_time = self.start_time.elapsed();

        println!();
        println!("--- Summary ---");
        println!(
            "Checked: {} correct, {} wrong, {} errors, {} skipped",
            count(|s| matches!(s, CheckStatus::Yes)),
            count(|s| matches!(s, CheckStatus::No { .. })),
            count(|s| matches!(s, CheckStatus::Error { .. })),
            count(|s| matches!(s, CheckStatus::Skipped)),
        );
        println!("Total solve time: {}", format_duration(total_solve_time));
        println!("Elapsed wall-clock time: {}", format_duration(elapsed_time));
        if !elapsed_time.is_zero() {
            let speedup = total_solve_time.as_secs_f64() / elapsed_time.as_secs_f64();
            println!("Speedup factor: {:.2}x", speedup);
        }
    }
}

/// `Day | Part | Status | Time (ms)` table, one row per check
pub fn render_check_table(rows: &[CheckRow]) -> String {
    let header = format!("{:>3} | {:<4} | {:<7} | {:>9}", "Day", "Part", "Status", "Time (ms)");
    let rule = "-".repeat(header.chars().count());
    let body = rows.iter().map(|row| {
        let time = row
            .elapsed
            .map(|d| d.as_millis().to_string())
            .unwrap_or_else(|| "-".to_string());
        format!("{:>3} | {:<4} | {:<7} | {:>9}", row.day, row.part, row.status, time)
    });

    std::iter::once(header)
        .chain(std::iter::once(rule))
        .chain(body)
        .join("\n")
}

/// Format a duration for display
pub fn format_duration(d: Duration) -> String {
    let micros = d.as_micros();
    if micros < 1000 {
        format!("{}µs", micros)
    } else if micros < 1_000_000 {
        format!("{:.2}ms", micros as f64 / 1000.0)
    } else {
        format!("{:.2}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(999)), "999µs");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.50s");
    }

    #[test]
    fn test_render_check_table() {
        let rows = vec![
            CheckRow {
                day: 1,
                part: Part::A,
                expected: "3".to_string(),
                status: CheckStatus::Yes,
                elapsed: Some(Duration::from_millis(12)),
            },
            CheckRow {
                day: 12,
                part: Part::B,
                expected: "9".to_string(),
                status: CheckStatus::Skipped,
                elapsed: None,
            },
        ];

        let table = render_check_table(&rows);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Day | Part | Status  | Time (ms)");
        assert_eq!(lines[2], "  1 | A    | Yes     |        12");
        assert_eq!(lines[3], " 12 | B    | Skipped |         -");
    }
}
