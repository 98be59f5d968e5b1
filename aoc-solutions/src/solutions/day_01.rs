use anyhow::{Context, anyhow, bail};
use aoc_solver::{AutoRegisterSolution, Solution, SolveError};

const DIAL_SIZE: i32 = 100;
const DIAL_START: i32 = 50;

/// Safe dial: count how often the dial rests on, or sweeps past, zero
#[derive(Default, AutoRegisterSolution)]
#[aoc(day = 1)]
pub struct Day01;

#[derive(Debug, Default, PartialEq, Eq)]
struct DialCounts {
    rests_on_zero: u32,
    passes_zero: u32,
}

fn parse_rotations(input: &str) -> anyhow::Result<Vec<i32>> {
    input
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| !line.is_empty())
        .map(|(idx, line)| {
            let (direction, amount) = line.split_at_checked(1).context("empty rotation")?;
            let amount: i32 = amount
                .parse()
                .with_context(|| format!("line {}: bad rotation amount '{}'", idx + 1, amount))?;
            if amount < 0 {
                bail!("line {}: rotation amount must be non negative", idx + 1);
            }
            match direction {
                "L" => Ok(-amount),
                "R" => Ok(amount),
                other => Err(anyhow!("line {}: direction must be 'L' or 'R', got '{}'", idx + 1, other)),
            }
        })
        .collect()
}

fn turn_dial(rotations: &[i32]) -> DialCounts {
    let (_, counts) = rotations.iter().fold(
        (DIAL_START, DialCounts::default()),
        |(dial, mut counts), rotation| {
            let moved = dial + rotation;
            if moved <= 0 && dial != 0 {
                counts.passes_zero += 1;
            }
            counts.passes_zero += (moved / DIAL_SIZE).unsigned_abs();

            let dial = moved.rem_euclid(DIAL_SIZE);
            if dial == 0 {
                counts.rests_on_zero += 1;
            }
            (dial, counts)
        },
    );
    counts
}

impl Solution for Day01 {
    fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
        let rotations = parse_rotations(input).map_err(SolveError::failed)?;
        Ok(turn_dial(&rotations).rests_on_zero.to_string())
    }

    fn run_part_b(&self, input: &str) -> Result<String, SolveError> {
        let rotations = parse_rotations(input).map_err(SolveError::failed)?;
        Ok(turn_dial(&rotations).passes_zero.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aoc_solver::{Part, SolutionRegistry};
    use proptest::prelude::*;

    const SAMPLE: &str = "L68\nL30\nR48\nL5\nR60\nL55\nL1\nL99\nR14\nL82\n";

    #[test]
    fn test_sample() {
        assert_eq!(Day01.run_part_a(SAMPLE).unwrap(), "3");
        assert_eq!(Day01.run_part_b(SAMPLE).unwrap(), "6");
    }

    #[test]
    fn test_full_turns_count_every_pass() {
        assert_eq!(Day01.run_part_b("R1000").unwrap(), "10");
        assert_eq!(Day01.run_part_b("L50\nL100").unwrap(), "2");
    }

    #[test]
    fn test_bad_direction_is_reported() {
        let err = Day01.run_part_a("R10\nX5").unwrap_err();
        assert!(err.to_string().contains("line 2"), "unexpected message: {}", err);
    }

    #[test]
    fn test_registered_as_day_one() {
        let registry = SolutionRegistry::from_plugins().unwrap();
        assert_eq!(registry.name(1), Some("Day01"));
        let solution = registry.create(1).unwrap();
        assert_eq!(solution.run_part(Part::A, SAMPLE).unwrap(), "3");
    }

    proptest! {
        #[test]
        fn prop_passes_at_least_rests(
            rotations in prop::collection::vec((any::<bool>(), 1i32..1000), 0..50)
        ) {
            let input: String = rotations
                .iter()
                .map(|(left, amount)| format!("{}{}\n", if *left { 'L' } else { 'R' }, amount))
                .collect();
            let rests: u32 = Day01.run_part_a(&input).unwrap().parse().unwrap();
            let passes: u32 = Day01.run_part_b(&input).unwrap().parse().unwrap();
            prop_assert!(rests <= rotations.len() as u32);
            prop_assert!(passes >= rests);
        }
    }
}
