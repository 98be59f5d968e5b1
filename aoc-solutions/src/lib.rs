//! Advent of Code puzzle solutions with automatic registration
//!
//! Every `src/solutions/day_NN.rs` file becomes a module through the build
//! script, and each solution registers itself with `#[derive(AutoRegisterSolution)]`.
//! Linking this crate is enough for `SolutionRegistry::from_plugins()` to see them.

pub mod solutions {
    include!(concat!(env!("OUT_DIR"), "/solutions.rs"));
}
