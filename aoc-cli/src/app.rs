//! Command implementations wiring the stores, managers and input client together

use crate::checker::{self, CheckStatus};
use crate::config::{self, Config};
use crate::error::CliError;
use crate::last_execution::{ExecutionMode, LastExecution};
use crate::output::OutputFormatter;
use crate::results::ResultStore;
use crate::solutions::SolutionManager;
use crate::tests_file::{self, TestManager};
use crate::text_store;
use aoc_http_client::{AocClient, PuzzleInputClient};
use aoc_solver::{Part, SolutionRegistry};
use itertools::Itertools;

pub struct App {
    config: Config,
    solutions: SolutionManager,
    tests: TestManager,
    results: ResultStore,
    last_execution: LastExecution,
    output: OutputFormatter,
}

impl App {
    pub fn new(config: Config, registry: SolutionRegistry) -> Self {
        let layout = config.layout.clone();
        Self {
            solutions: SolutionManager::new(layout.clone(), registry),
            tests: TestManager::new(layout.tests_dir()),
            results: ResultStore::load(layout.results_file()),
            last_execution: LastExecution::load(layout.last_choice_file()),
            output: OutputFormatter::new(config.quiet),
            config,
        }
    }

    pub fn list(&self) {
        let solutions = self.solutions.available_solutions();
        let tests = self.tests.available_tests();
        let testable = solutions.iter().filter(|day| tests.contains(*day)).join(", ");

        println!("Solutions: {}", or_none(solutions.iter().join(", ")));
        println!("Tests:     {}", or_none(tests.iter().join(", ")));
        println!("Testable:  {}", or_none(testable));
        println!("Results:   {}", self.results.len());
        match self.last_execution.last_execution() {
            Some(settings) => println!("Last:      {}", settings),
            None => println!("Last:      (none)"),
        }
    }

    /// Run a part against the stored input; `Ok(false)` when the solution failed
    pub fn run_day(&mut self, day: u8, part: Part) -> Result<bool, CliError> {
        let solution = self
            .solutions
            .create_solution_instance(day)
            .ok_or(CliError::SolutionUnavailable(day))?;
        let input = self.solutions.read_input_file(day);
        if input.is_empty() {
            return Err(CliError::MissingInput(day));
        }

        let result = aoc_solver::run(solution.as_ref(), day, part, &input);
        self.last_execution
            .write_last_choice(day, ExecutionMode::Run, part);
        self.output.print_run(day, part, &result);

        if !result.is_success() {
            return Ok(false);
        }
        if let Some(previous) = self.results.get(day, part)
            && previous != result.value()
        {
            tracing::info!(day, %part, previous, "answer differs from the stored one");
        }
        if let Err(e) = self.results.save_day_result(day, part, result.value()) {
            tracing::warn!(day, %part, error = %e, "answer not saved");
        }
        Ok(true)
    }

    /// Run one test case; `Ok(false)` when it failed or did not match
    pub fn run_test(
        &mut self,
        day: u8,
        part: Option<Part>,
        test_number: u32,
    ) -> Result<bool, CliError> {
        let solution = self
            .solutions
            .create_solution_instance(day)
            .ok_or(CliError::SolutionUnavailable(day))?;

        let cases = self.tests.parse(day)?;
        let case = cases
            .into_iter()
            .find(|case| case.test_number == test_number)
            .ok_or(CliError::TestNotFound { day, test_number })?;

        let part = match part {
            Some(part) => part,
            None => match case.parts().collect::<Vec<_>>().as_slice() {
                [only] => *only,
                _ => {
                    return Err(CliError::Config(format!(
                        "test #{} has answers for both parts, pick one with --part",
                        test_number
                    )));
                }
            },
        };
        let expected = case
            .expected(part)
            .ok_or(CliError::NoExpectedAnswer { test_number, part })?;

        let result = aoc_solver::run(solution.as_ref(), day, part, &case.input);
        self.last_execution
            .write_last_choice(day, ExecutionMode::Test { test_number }, part);
        Ok(self
            .output
            .print_test(day, part, test_number, expected, &result))
    }

    pub fn list_tests(&self, day: u8) -> Result<(), CliError> {
        let cases = self.tests.parse(day)?;
        if self.config.quiet {
            for case in &cases {
                println!("{}", case.test_number);
            }
        } else if cases.is_empty() {
            println!("Day {:02} has no valid tests.", day);
        } else {
            print!("{}", tests_file::render_test_cases(&cases));
        }
        Ok(())
    }

    /// Replay the last execution
    pub fn repeat(&mut self) -> Result<bool, CliError> {
        let settings = self
            .last_execution
            .last_execution()
            .ok_or(CliError::NoLastExecution)?;
        tracing::info!(%settings, "repeating");

        match settings.mode {
            ExecutionMode::Run => self.run_day(settings.day, settings.part),
            ExecutionMode::Test { test_number } => {
                self.run_test(settings.day, Some(settings.part), test_number)
            }
        }
    }

    /// Download the input and set up the day's files
    pub fn init(&mut self, day: u8) -> Result<(), CliError> {
        let mut builder = AocClient::builder();
        if let Some(url) = &self.config.base_url {
            builder = builder.base_url(url.as_str())?;
        }
        let client = PuzzleInputClient::new(builder.build()?, self.config.year, self.config.session());
        if !client.has_session() {
            tracing::warn!("no session cookie, set {} or run `aoc session`", config::SESSION_ENV);
        }

        let response = client.fetch_input(day);
        if !response.is_success() {
            return Err(CliError::InputFetch {
                day,
                message: response.content.trim().to_string(),
            });
        }

        let was_initialized = self.solutions.is_day_already_initialized(day);
        self.solutions.create_initial_files(day, &response.content)?;

        println!("Input saved to {}", self.solutions.input_file(day).display());
        if !was_initialized {
            println!(
                "Solution stub created at {}, rebuild to register it",
                self.solutions.solution_file(day).display()
            );
        }
        Ok(())
    }

    /// Re-run every stored result; `Ok(false)` when an answer changed or errored
    pub fn check(&self) -> Result<bool, CliError> {
        if self.results.is_empty() {
            println!("No stored results in {}.", self.results.path().display());
            return Ok(true);
        }

        let rows = checker::check_all(
            &self.solutions,
            self.results.solution_results(),
            self.config.thread_count,
        )?;
        self.output.print_check(&rows);

        for row in &rows {
            match &row.status {
                CheckStatus::No { answer } => {
                    tracing::warn!(day = row.day, part = %row.part, expected = %row.expected, %answer, "answer changed")
                }
                CheckStatus::Error { message } => {
                    tracing::warn!(day = row.day, part = %row.part, %message, "solution failed")
                }
                _ => {}
            }
        }

        Ok(rows
            .iter()
            .all(|row| matches!(row.status, CheckStatus::Yes | CheckStatus::Skipped)))
    }

    /// Prompt for the session cookie and store it in the state directory
    pub fn store_session(&self) -> Result<(), CliError> {
        let session = config::prompt_session(
            "Paste the `session` cookie of adventofcode.com (input is hidden).",
        )?;
        let path = self.config.layout.session_file();
        text_store::write_text(&path, &session)?;
        println!("Session saved to {}", path.display());
        Ok(())
    }
}

fn or_none(list: String) -> String {
    if list.is_empty() {
        "(none)".to_string()
    } else {
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TestFileError;
    use crate::last_execution::ExecutionSettings;
    use crate::layout::{ProjectLayout, input_file_name, solution_file_name, test_file_name};
    use aoc_solver::{RegistryBuilder, Solution, SolveError};
    use std::path::Path;
    use tempfile::TempDir;

    /// Part A counts characters, part B is left unimplemented
    struct Length;

    impl Solution for Length {
        fn run_part_a(&self, input: &str) -> Result<String, SolveError> {
            Ok(input.trim().len().to_string())
        }
    }

    const HELLO_TEST: &str = "TestNumber=\n1\nAnswerA=\n5\nAnswerB=\n[Empty]\nInput=\nhello\n================================\n";

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    /// Project with a compiled-in day 3 whose solution file exists on disk
    fn project(temp: &TempDir) -> ProjectLayout {
        let layout = ProjectLayout::new(temp.path());
        write(&layout.solutions_dir().join(solution_file_name(3)), "");
        layout
    }

    fn new_app(layout: &ProjectLayout, base_url: Option<String>) -> App {
        let registry = RegistryBuilder::new()
            .register(3, "Length", || Box::new(Length))
            .unwrap()
            .build();
        let config = Config {
            layout: layout.clone(),
            year: 2025,
            thread_count: 1,
            base_url,
            quiet: true,
        };
        App::new(config, registry)
    }

    #[test]
    fn test_run_day_saves_result_and_remembers_run() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        write(&layout.inputs_dir().join(input_file_name(3)), "abcd\n");

        let mut app = new_app(&layout, None);
        assert!(app.run_day(3, Part::A).unwrap());

        assert_eq!(app.results.get(3, Part::A), Some("4"));
        assert_eq!(
            ResultStore::load(layout.results_file()).get(3, Part::A),
            Some("4")
        );
        assert_eq!(
            LastExecution::load(layout.last_choice_file()).last_execution(),
            Some(ExecutionSettings {
                day: 3,
                part: Part::A,
                mode: ExecutionMode::Run,
            })
        );
    }

    #[test]
    fn test_failed_run_saves_nothing() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        write(&layout.inputs_dir().join(input_file_name(3)), "abcd\n");

        let mut app = new_app(&layout, None);
        assert!(!app.run_day(3, Part::B).unwrap());

        assert!(app.results.is_empty());
        assert!(!layout.results_file().exists());
        assert_eq!(
            app.last_execution.last_execution().map(|s| (s.part, s.mode)),
            Some((Part::B, ExecutionMode::Run))
        );
    }

    #[test]
    fn test_run_day_without_solution_or_input() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);

        let mut app = new_app(&layout, None);
        assert!(matches!(
            app.run_day(3, Part::A),
            Err(CliError::MissingInput(3))
        ));
        assert!(matches!(
            app.run_day(8, Part::A),
            Err(CliError::SolutionUnavailable(8))
        ));
        assert!(!app.last_execution.has_last_execution());
    }

    #[test]
    fn test_run_test_resolves_solution_before_parsing() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        // Unterminated record with an empty input would abort the parse
        write(
            &layout.tests_dir().join(test_file_name(7)),
            "TestNumber=\n1\nAnswerA=\n2\nInput=\n",
        );

        let mut app = new_app(&layout, None);
        assert!(matches!(
            app.run_test(7, Some(Part::A), 1),
            Err(CliError::SolutionUnavailable(7))
        ));

        write(
            &layout.tests_dir().join(test_file_name(3)),
            "TestNumber=\n1\nAnswerA=\n2\nInput=\n",
        );
        assert!(matches!(
            app.run_test(3, Some(Part::A), 1),
            Err(CliError::TestFile(TestFileError::TruncatedRecord { test_number: 1 }))
        ));
    }

    #[test]
    fn test_run_test_picks_the_only_answered_part() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        write(&layout.tests_dir().join(test_file_name(3)), HELLO_TEST);

        let mut app = new_app(&layout, None);
        assert!(app.run_test(3, None, 1).unwrap());
        assert!(matches!(
            app.run_test(3, Some(Part::B), 1),
            Err(CliError::NoExpectedAnswer { test_number: 1, part: Part::B })
        ));
        assert!(matches!(
            app.run_test(3, None, 9),
            Err(CliError::TestNotFound { day: 3, test_number: 9 })
        ));
        assert!(app.results.is_empty());
    }

    #[test]
    fn test_repeat_replays_run() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        let input = layout.inputs_dir().join(input_file_name(3));
        write(&input, "ab");

        let mut app = new_app(&layout, None);
        assert!(matches!(app.repeat(), Err(CliError::NoLastExecution)));

        assert!(app.run_day(3, Part::A).unwrap());
        write(&input, "abcdef");
        assert!(app.repeat().unwrap());

        assert_eq!(app.results.get(3, Part::A), Some("6"));
    }

    #[test]
    fn test_repeat_replays_test() {
        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        let tests = layout.tests_dir().join(test_file_name(3));
        write(&tests, HELLO_TEST);

        let mut app = new_app(&layout, None);
        assert!(app.run_test(3, None, 1).unwrap());

        // A fresh process picks the settings up from disk
        let mut app = new_app(&layout, None);
        assert!(app.repeat().unwrap());

        write(&tests, &HELLO_TEST.replace("\n5\n", "\n6\n"));
        assert!(!app.repeat().unwrap());
        assert!(app.results.is_empty());
    }

    #[test]
    fn test_init_saves_fetched_input() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2025/day/4/input")
            .with_status(200)
            .with_body("4 5 6\n")
            .expect(1)
            .create();

        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        write(&layout.session_file(), "cafebabe\n");

        let mut app = new_app(&layout, Some(server.url()));
        app.init(4).unwrap();

        assert_eq!(
            std::fs::read_to_string(layout.inputs_dir().join(input_file_name(4))).unwrap(),
            "4 5 6\n"
        );
        assert!(layout.solutions_dir().join(solution_file_name(4)).is_file());
        assert!(layout.tests_dir().join(test_file_name(4)).is_file());
        mock.assert();
    }

    #[test]
    fn test_init_reports_rejected_fetch() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/2025/day/4/input")
            .with_status(404)
            .with_body("Please don't repeatedly request this endpoint before it unlocks!")
            .create();

        let temp = TempDir::new().unwrap();
        let layout = project(&temp);
        write(&layout.session_file(), "cafebabe\n");

        let mut app = new_app(&layout, Some(server.url()));
        match app.init(4) {
            Err(CliError::InputFetch { day, message }) => {
                assert_eq!(day, 4);
                assert!(message.starts_with("Please don't"));
            }
            other => panic!("Expected InputFetch, got {:?}", other.err()),
        }

        assert!(!layout.inputs_dir().join(input_file_name(4)).exists());
        assert!(!layout.solutions_dir().join(solution_file_name(4)).exists());
        mock.assert();
    }
}
