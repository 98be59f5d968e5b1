//! Core solution trait and related types

use crate::error::{ParsePartError, SolveError};
use std::fmt;
use std::str::FromStr;

/// One of the two sub-problems of a puzzle day
///
/// Parts are ordered `A < B`, which is the order results are stored and displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Part {
    A,
    B,
}

impl Part {
    /// Both parts, in order
    pub const ALL: [Part; 2] = [Part::A, Part::B];
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Part::A => f.pad("A"),
            Part::B => f.pad("B"),
        }
    }
}

impl FromStr for Part {
    type Err = ParsePartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Part::A),
            "B" | "b" => Ok(Part::B),
            other => Err(ParsePartError(other.to_string())),
        }
    }
}

/// Trait implemented by every puzzle day.
///
/// A solution is stateless across invocations: the registry creates a fresh
/// instance for every run and drops it afterwards.
///
/// # Example
///
/// ```
/// use aoc_solver::{Part, SolveError, Solution};
///
/// struct Sum;
///
/// impl Solution for Sum {
///     fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
///         input
///             .split(',')
///             .map(|n| n.trim().parse::<i64>().map_err(SolveError::failed))
///             .sum::<Result<i64, _>>()
///             .map(|total| total.to_string())
///     }
/// }
///
/// assert_eq!(Sum.run_part(Part::A, "1,2,3").unwrap(), "6");
/// assert!(Sum.run_part(Part::B, "1,2,3").is_err());
/// ```
pub trait Solution {
    /// Solve part A for the given input
    fn run_part_a(&self, input: &str) -> Result<String, SolveError>;

    /// Solve part B for the given input
    fn run_part_b(&self, _input: &str) -> Result<String, SolveError> {
        Err(SolveError::PartNotImplemented(Part::B))
    }

    /// Dispatch to the requested part
    fn run_part(&self, part: Part, input: &str) -> Result<String, SolveError> {
        match part {
            Part::A => self.run_part_a(input),
            Part::B => self.run_part_b(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_part_display_parses_back(
            part in prop_oneof![Just(Part::A), Just(Part::B)],
            lower in any::<bool>(),
            pad in 0usize..4,
        ) {
            let text = part.to_string();
            let text = if lower { text.to_lowercase() } else { text };
            let padded = format!("{}{}{}", " ".repeat(pad), text, " ".repeat(pad));
            prop_assert_eq!(padded.parse::<Part>(), Ok(part));
        }
    }

    #[test]
    fn test_part_parse_and_display() {
        assert_eq!("A".parse::<Part>().unwrap(), Part::A);
        assert_eq!(" b ".parse::<Part>().unwrap(), Part::B);
        assert_eq!(Part::B.to_string(), "B");
        assert_eq!("C".parse::<Part>(), Err(ParsePartError("C".to_string())));
    }

    #[test]
    fn test_part_ordering() {
        assert!(Part::A < Part::B);
        assert_eq!(Part::ALL, [Part::A, Part::B]);
    }
}
