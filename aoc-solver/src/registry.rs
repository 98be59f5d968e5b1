//! Solution registry for managing and creating solution instances

use crate::error::{RegistrationError, SolutionError};
use crate::solver::Solution;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

/// Factory function stored in a [`SolutionPlugin`]
pub type SolutionFactory = fn() -> Box<dyn Solution>;

/// Boxed factory stored in the registry; plugins and hand-registered closures both end up here
type BoxedFactory = Box<dyn Fn() -> Box<dyn Solution> + Send + Sync>;

/// Plugin information for automatic solution registration
///
/// Submitted through `inventory` by `#[derive(AutoRegisterSolution)]`.
///
/// # Example
///
/// ```no_run
/// use aoc_solver::{Solution, SolutionPlugin, SolveError};
///
/// #[derive(Default)]
/// struct Day01;
///
/// impl Solution for Day01 {
///     fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
///         Ok(input.len().to_string())
///     }
/// }
///
/// fn create_day01() -> Box<dyn Solution> {
///     Box::new(Day01)
/// }
///
/// aoc_solver::inventory::submit! {
///     SolutionPlugin {
///         day: 1,
///         name: "Day01",
///         create: create_day01,
///     }
/// }
/// ```
pub struct SolutionPlugin {
    /// The puzzle day (1-based)
    pub day: u8,
    /// The implementing type's name, used in diagnostics
    pub name: &'static str,
    /// Constructs a fresh solution instance
    pub create: SolutionFactory,
}

inventory::collect!(SolutionPlugin);

/// Module name for a day's solution file, derived from the zero-padded day number
///
/// ```
/// assert_eq!(aoc_solver::solution_module_name(7), "day_07");
/// ```
pub fn solution_module_name(day: u8) -> String {
    format!("day_{:02}", day)
}

struct RegisteredSolution {
    name: String,
    factory: BoxedFactory,
}

/// Builder for constructing a [`SolutionRegistry`] with a fluent API
///
/// Duplicate days are rejected at registration time, so a built registry maps
/// every day to exactly one factory.
pub struct RegistryBuilder {
    solutions: BTreeMap<u8, RegisteredSolution>,
}

impl RegistryBuilder {
    /// Create a new empty registry builder
    pub fn new() -> Self {
        Self {
            solutions: BTreeMap::new(),
        }
    }

    /// Register a factory for a day
    ///
    /// # Errors
    ///
    /// * `RegistrationError::InvalidDay` - `day` is 0
    /// * `RegistrationError::DuplicateSolution` - the day is already registered
    pub fn register<F>(
        mut self,
        day: u8,
        name: impl Into<String>,
        factory: F,
    ) -> Result<Self, RegistrationError>
    where
        F: Fn() -> Box<dyn Solution> + Send + Sync + 'static,
    {
        if day == 0 {
            return Err(RegistrationError::InvalidDay(day));
        }
        if self.solutions.contains_key(&day) {
            return Err(RegistrationError::DuplicateSolution(day));
        }
        self.solutions.insert(
            day,
            RegisteredSolution {
                name: name.into(),
                factory: Box::new(factory),
            },
        );
        Ok(self)
    }

    /// Register every plugin submitted through `inventory`
    pub fn register_all_plugins(self) -> Result<Self, RegistrationError> {
        self.register_plugins(|_| true)
    }

    /// Register the plugins accepted by `filter`
    pub fn register_plugins<F>(mut self, filter: F) -> Result<Self, RegistrationError>
    where
        F: Fn(&SolutionPlugin) -> bool,
    {
        for plugin in inventory::iter::<SolutionPlugin>() {
            if filter(plugin) {
                self = self.register(plugin.day, plugin.name, plugin.create)?;
            }
        }
        Ok(self)
    }

    /// Finalize the builder into an immutable registry
    pub fn build(self) -> SolutionRegistry {
        SolutionRegistry {
            solutions: self.solutions,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Immutable mapping from day number to solution factory
///
/// ```
/// use aoc_solver::{RegistryBuilder, Solution, SolveError};
///
/// struct Echo;
///
/// impl Solution for Echo {
///     fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
///         Ok(input.to_string())
///     }
/// }
///
/// let registry = RegistryBuilder::new()
///     .register(3, "Echo", || Box::new(Echo))
///     .unwrap()
///     .build();
///
/// assert!(registry.contains(3));
/// let solution = registry.create(3).unwrap();
/// assert_eq!(solution.run_part_a("hi").unwrap(), "hi");
/// ```
pub struct SolutionRegistry {
    solutions: BTreeMap<u8, RegisteredSolution>,
}

impl SolutionRegistry {
    /// Registry holding every `inventory` plugin linked into the binary
    pub fn from_plugins() -> Result<Self, RegistrationError> {
        Ok(RegistryBuilder::new().register_all_plugins()?.build())
    }

    /// Registered days in ascending order
    pub fn days(&self) -> impl Iterator<Item = u8> + '_ {
        self.solutions.keys().copied()
    }

    /// Check whether a day has a registered factory
    pub fn contains(&self, day: u8) -> bool {
        self.solutions.contains_key(&day)
    }

    /// Name the day's implementation was registered under
    pub fn name(&self, day: u8) -> Option<&str> {
        self.solutions.get(&day).map(|s| s.name.as_str())
    }

    /// Create a fresh solution instance for a day
    ///
    /// A panicking factory is reported as `SolutionError::Construction` instead of
    /// unwinding into the caller.
    pub fn create(&self, day: u8) -> Result<Box<dyn Solution>, SolutionError> {
        let entry = self
            .solutions
            .get(&day)
            .ok_or(SolutionError::NotRegistered(day))?;

        panic::catch_unwind(AssertUnwindSafe(|| (entry.factory)())).map_err(|payload| {
            SolutionError::Construction {
                day,
                message: crate::runner::panic_message(payload.as_ref()),
            }
        })
    }

    /// Number of registered days
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolveError;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    struct Fixed(&'static str);

    impl Solution for Fixed {
        fn run_part_a(&self, _input: &str) -> Result<String, SolveError> {
            Ok(self.0.to_string())
        }
    }

    proptest! {
        #[test]
        fn prop_first_repeated_day_is_rejected(days in prop::collection::vec(1u8..=30, 0..12)) {
            let mut seen = BTreeSet::new();
            let first_repeat = days.iter().copied().find(|day| !seen.insert(*day));

            let result = days.iter().try_fold(RegistryBuilder::new(), |builder, day| {
                builder.register(*day, "Fixed", || Box::new(Fixed("x")))
            });

            match first_repeat {
                Some(day) => {
                    prop_assert_eq!(result.err(), Some(RegistrationError::DuplicateSolution(day)));
                }
                None => {
                    let registry = result.map(RegistryBuilder::build);
                    prop_assert!(registry.is_ok());
                    let registered: Vec<u8> = registry.iter().flat_map(|r| r.days()).collect();
                    prop_assert_eq!(registered, seen.into_iter().collect::<Vec<_>>());
                }
            }
        }
    }

    #[test]
    fn test_register_and_create() {
        let registry = RegistryBuilder::new()
            .register(1, "One", || Box::new(Fixed("one")))
            .unwrap()
            .register(2, "Two", || Box::new(Fixed("two")))
            .unwrap()
            .build();

        assert_eq!(registry.days().collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(registry.name(2), Some("Two"));
        let solution = registry.create(2).unwrap();
        assert_eq!(solution.run_part_a("").unwrap(), "two");
    }

    #[test]
    fn test_duplicate_day_rejected() {
        let result = RegistryBuilder::new()
            .register(4, "First", || Box::new(Fixed("a")))
            .unwrap()
            .register(4, "Second", || Box::new(Fixed("b")));

        assert!(matches!(result, Err(RegistrationError::DuplicateSolution(4))));
    }

    #[test]
    fn test_day_zero_rejected() {
        let result = RegistryBuilder::new().register(0, "Zero", || Box::new(Fixed("z")));
        assert!(matches!(result, Err(RegistrationError::InvalidDay(0))));
    }

    #[test]
    fn test_missing_day() {
        let registry = RegistryBuilder::new().build();
        assert!(registry.is_empty());
        assert_eq!(
            registry.create(9).err(),
            Some(SolutionError::NotRegistered(9))
        );
    }

    #[test]
    fn test_panicking_factory_is_contained() {
        let registry = RegistryBuilder::new()
            .register(5, "Broken", || panic!("constructor exploded"))
            .unwrap()
            .build();

        match registry.create(5) {
            Err(SolutionError::Construction { day, message }) => {
                assert_eq!(day, 5);
                assert_eq!(message, "constructor exploded");
            }
            _ => panic!("expected a construction error"),
        }
    }

    #[test]
    fn test_solution_module_name_is_zero_padded() {
        assert_eq!(solution_module_name(1), "day_01");
        assert_eq!(solution_module_name(25), "day_25");
    }
}
