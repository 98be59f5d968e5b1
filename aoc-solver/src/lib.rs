//! Advent of Code Solution Library
//!
//! The orchestration substrate shared by every puzzle day: a trait each day
//! implements, a registry that maps day numbers to factories, and an execution
//! wrapper that times a run and turns any failure into a value.
//!
//! # Overview
//!
//! This library provides:
//! - The [`Solution`] trait with one method per [`Part`]
//! - A registry built from self-registered plugins or explicit factories
//! - [`run`], which times a part and isolates errors and panics
//!
//! # Quick Example
//!
//! ```
//! use aoc_solver::{run, Part, RegistryBuilder, Solution, SolveError};
//!
//! struct Day1;
//!
//! impl Solution for Day1 {
//!     fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
//!         let total: i32 = input.lines().filter_map(|l| l.parse::<i32>().ok()).sum();
//!         Ok(total.to_string())
//!     }
//!
//!     fn run_part_b(&self, _input: &str) -> Result<String, SolveError> {
//!         Err(SolveError::InvalidInput("not solved yet".into()))
//!     }
//! }
//!
//! let registry = RegistryBuilder::new()
//!     .register(1, "Day1", || Box::new(Day1))
//!     .unwrap()
//!     .build();
//!
//! let solution = registry.create(1).unwrap();
//! let result = run(solution.as_ref(), 1, Part::A, "1\n2\n3");
//! assert_eq!(result.value(), "6");
//! ```
//!
//! ## Plugin System and Derive Macro
//!
//! Use `#[derive(AutoRegisterSolution)]` to register a day automatically:
//! ```ignore
//! #[derive(Default, AutoRegisterSolution)]
//! #[aoc(day = 1)]
//! pub struct Day01;
//! ```
//! and build the registry with [`SolutionRegistry::from_plugins`].

mod error;
mod registry;
mod runner;
mod solver;

// Re-export public API
pub use error::{ParsePartError, RegistrationError, SolutionError, SolveError};
pub use registry::{
    RegistryBuilder, SolutionFactory, SolutionPlugin, SolutionRegistry, solution_module_name,
};
pub use runner::{ExecutionResult, run};
pub use solver::{Part, Solution};

// Re-export inventory for use by the derive macro
pub use inventory;

// Re-export the derive macro
pub use aoc_solver_macros::AutoRegisterSolution;
