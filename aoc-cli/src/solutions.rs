//! Directory half of the solution registry: which days have files, plus day setup

use crate::layout::{ProjectLayout, input_file_name, scan_days, solution_file_name, test_file_name};
use crate::text_store;
use aoc_solver::{Solution, SolutionError, SolutionRegistry};
use std::io;
use std::path::{Path, PathBuf};

const BUILTIN_SOLUTION_TEMPLATE: &str = include_str!("../../templates/solution.rs.tmpl");
const BUILTIN_TEST_TEMPLATE: &str = include_str!("../../templates/test.txt");

/// Combines the on-disk solution files with the compiled-in registry.
///
/// A day is *available* when its `day_NN.rs` file exists. It is *runnable* when
/// it is also registered, i.e. the binary was built after the file was added.
pub struct SolutionManager {
    layout: ProjectLayout,
    registry: SolutionRegistry,
    available: Vec<u8>,
}

impl SolutionManager {
    pub fn new(layout: ProjectLayout, registry: SolutionRegistry) -> Self {
        let available = scan_days(&layout.solutions_dir(), solution_file_name);
        tracing::debug!(?available, registered = registry.len(), "solutions discovered");
        Self {
            layout,
            registry,
            available,
        }
    }

    /// Days with a solution file, descending
    pub fn available_solutions(&self) -> &[u8] {
        &self.available
    }

    pub fn is_day_already_initialized(&self, day: u8) -> bool {
        self.available.contains(&day)
    }

    /// Fresh instance of the day's solution, `None` with a diagnostic when it
    /// cannot be resolved
    pub fn create_solution_instance(&self, day: u8) -> Option<Box<dyn Solution>> {
        if !self.is_day_already_initialized(day) {
            tracing::error!(day, "solution not found");
            return None;
        }

        match self.registry.create(day) {
            Ok(solution) => Some(solution),
            Err(SolutionError::NotRegistered(_)) => {
                tracing::error!(
                    day,
                    file = %self.solution_file(day).display(),
                    "solution file exists but is not compiled in, rebuild the runner"
                );
                None
            }
            Err(e) => {
                tracing::error!(day, error = %e, "unable to create solution");
                None
            }
        }
    }

    /// Set up a day: solution and test stubs when the day is new, and the
    /// input file in every case.
    pub fn create_initial_files(&mut self, day: u8, input_content: &str) -> io::Result<()> {
        if !self.is_day_already_initialized(day) {
            let solution = render_solution_template(&self.solution_template(), day);
            text_store::write_text(&self.solution_file(day), &solution)?;
            tracing::info!(day, path = %self.solution_file(day).display(), "solution stub created");

            let test_file = self.layout.tests_dir().join(test_file_name(day));
            if test_file.exists() {
                tracing::info!(day, "keeping existing test file");
            } else {
                let tests = load_template(&self.layout.test_template(), BUILTIN_TEST_TEMPLATE);
                text_store::write_text(&test_file, &tests)?;
            }
        }

        text_store::write_text(&self.input_file(day), input_content)?;
        self.refresh();
        Ok(())
    }

    /// Stored input of the day, empty when there is none
    pub fn read_input_file(&self, day: u8) -> String {
        let path = self.input_file(day);
        match text_store::read_text(&path) {
            Ok(Some(input)) => input,
            Ok(None) => {
                tracing::error!(day, path = %path.display(), "input file not found");
                String::new()
            }
            Err(e) => {
                tracing::error!(day, path = %path.display(), error = %e, "input file not readable");
                String::new()
            }
        }
    }

    pub fn solution_file(&self, day: u8) -> PathBuf {
        self.layout.solutions_dir().join(solution_file_name(day))
    }

    pub fn input_file(&self, day: u8) -> PathBuf {
        self.layout.inputs_dir().join(input_file_name(day))
    }

    fn solution_template(&self) -> String {
        load_template(&self.layout.solution_template(), BUILTIN_SOLUTION_TEMPLATE)
    }

    fn refresh(&mut self) {
        self.available = scan_days(&self.layout.solutions_dir(), solution_file_name);
    }
}

fn load_template(path: &Path, builtin: &str) -> String {
    match text_store::read_text(path) {
        Ok(Some(template)) => template,
        Ok(None) => builtin.to_string(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "template not readable, using built-in");
            builtin.to_string()
        }
    }
}

fn render_solution_template(template: &str, day: u8) -> String {
    template
        .replace("{{struct_name}}", &format!("Day{:02}", day))
        .replace("{{day}}", &day.to_string())
}
