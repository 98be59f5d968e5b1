//! CLI argument parsing using clap

use aoc_solver::Part;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Advent of Code solution runner
#[derive(Parser, Debug)]
#[command(name = "aoc", about = "Run Advent of Code solutions", version)]
pub struct Args {
    /// Project root (defaults to the first ancestor directory with a Cargo.lock)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Puzzle year for input downloads (defaults to the latest event)
    #[arg(short, long, global = true)]
    pub year: Option<u16>,

    /// Number of threads for `check`
    #[arg(long, global = true)]
    pub threads: Option<usize>,

    /// Quiet mode - only output answers
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show available solutions, tests and the last execution
    List,

    /// Run a day's part against its stored input and save the answer
    Run {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: u8,

        /// Part to run: A or B
        #[arg(short, long, default_value = "A")]
        part: Part,
    },

    /// Run one test case of a day
    Test {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: u8,

        /// Part to test (defaults to the only part the test has an answer for)
        #[arg(short, long)]
        part: Option<Part>,

        /// Test number
        #[arg(short, long, required_unless_present = "list")]
        test: Option<u32>,

        /// Print the day's parsed test cases instead of running one
        #[arg(long)]
        list: bool,
    },

    /// Replay the last run or test
    Repeat,

    /// Download a day's input and create its solution and test stubs
    Init {
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=25))]
        day: u8,
    },

    /// Re-run every stored result and report whether answers still match
    Check,

    /// Store the adventofcode.com session cookie
    Session,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_run() {
        let args = Args::try_parse_from(["aoc", "run", "-d", "3", "-p", "b", "--year", "2024"]).unwrap();
        assert_eq!(args.year, Some(2024));
        assert!(matches!(args.command, Command::Run { day: 3, part: Part::B }));
    }

    #[test]
    fn test_parse_test_requires_number_unless_listing() {
        assert!(Args::try_parse_from(["aoc", "test", "-d", "1"]).is_err());
        let args = Args::try_parse_from(["aoc", "test", "-d", "1", "--list"]).unwrap();
        assert!(matches!(args.command, Command::Test { day: 1, list: true, test: None, .. }));
    }

    #[test]
    fn test_day_range() {
        assert!(Args::try_parse_from(["aoc", "init", "-d", "0"]).is_err());
        assert!(Args::try_parse_from(["aoc", "init", "-d", "26"]).is_err());
        assert!(Args::try_parse_from(["aoc", "--quiet", "check"]).unwrap().quiet);
    }
}
