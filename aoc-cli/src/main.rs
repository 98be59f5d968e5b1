//! AOC CLI - Command-line runner for Advent of Code solutions

mod app;
mod checker;
mod cli;
mod config;
mod error;
mod last_execution;
mod layout;
mod logging;
mod output;
mod results;
mod solutions;
mod tests_file;
mod text_store;

// Import aoc-solutions to link the solution plugins
use aoc_solutions as _;

use aoc_solver::SolutionRegistry;
use app::App;
use clap::Parser;
use cli::{Args, Command};
use config::Config;

fn main() {
    let args = Args::parse();
    logging::init(args.quiet);

    match run(args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Dispatch a command; `Ok(false)` when it ran but did not succeed
fn run(args: Args) -> Result<bool, error::CliError> {
    let config = Config::from_args(&args)?;
    let registry = SolutionRegistry::from_plugins()?;
    let mut app = App::new(config, registry);

    match args.command {
        Command::List => {
            app.list();
            Ok(true)
        }
        Command::Run { day, part } => app.run_day(day, part),
        Command::Test {
            day, list: true, ..
        } => app.list_tests(day).map(|()| true),
        Command::Test {
            day, part, test, ..
        } => {
            let test_number = test.ok_or_else(|| {
                error::CliError::Config("a test number is required, use --test".to_string())
            })?;
            app.run_test(day, part, test_number)
        }
        Command::Repeat => app.repeat(),
        Command::Init { day } => app.init(day).map(|()| true),
        Command::Check => app.check(),
        Command::Session => app.store_session().map(|()| true),
    }
}
