//! Configuration resolution from CLI args and the environment

use crate::cli::Args;
use crate::error::CliError;
use crate::layout::ProjectLayout;
use chrono::{Datelike, NaiveDate};
use std::path::{Path, PathBuf};
use zeroize::Zeroizing;

/// Environment variable holding the session cookie, preferred over the state file
pub const SESSION_ENV: &str = "AOC_SESSION";
/// Environment variable overriding the Advent of Code base URL
pub const BASE_URL_ENV: &str = "AOC_BASE_URL";

/// Resolved runtime configuration
pub struct Config {
    /// Project layout rooted at the workspace
    pub layout: ProjectLayout,
    /// Puzzle year used for input downloads
    pub year: u16,
    /// Number of threads for the check command
    pub thread_count: usize,
    /// Base URL override for the input client
    pub base_url: Option<String>,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, locating the project root when not given
    pub fn from_args(args: &Args) -> Result<Self, CliError> {
        let root = match &args.root {
            Some(root) => expand_tilde(root),
            None => {
                let cwd = std::env::current_dir()?;
                find_project_root(&cwd).ok_or_else(|| {
                    CliError::Config(format!(
                        "no project root (a directory with Cargo.lock) above {}, use --root",
                        cwd.display()
                    ))
                })?
            }
        };
        tracing::debug!(root = %root.display(), "project root");

        Ok(Config {
            layout: ProjectLayout::new(root),
            year: args
                .year
                .unwrap_or_else(|| latest_event_year(chrono::Local::now().date_naive())),
            thread_count: args.threads.unwrap_or_else(num_cpus).max(1),
            base_url: std::env::var(BASE_URL_ENV).ok().filter(|url| !url.trim().is_empty()),
            quiet: args.quiet,
        })
    }

    /// Session cookie from the environment, else from the state file
    pub fn session(&self) -> Option<Zeroizing<String>> {
        resolve_session(
            std::env::var(SESSION_ENV).ok().map(Zeroizing::new),
            &self.layout.session_file(),
        )
    }
}

/// First ancestor of `start` (itself included) containing a `Cargo.lock`
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join("Cargo.lock").is_file())
        .map(Path::to_path_buf)
}

/// Expand ~ to home directory
fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(rest);
    }
    path.to_path_buf()
}

/// The most recent event year: this year in December, last year otherwise
pub fn latest_event_year(today: NaiveDate) -> u16 {
    let year = if today.month() == 12 {
        today.year()
    } else {
        today.year() - 1
    };
    u16::try_from(year).unwrap_or(2015)
}

/// Get number of CPUs
fn num_cpus() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

fn resolve_session(
    from_env: Option<Zeroizing<String>>,
    session_file: &Path,
) -> Option<Zeroizing<String>> {
    from_env
        .map(|s| Zeroizing::new(s.trim().to_string()))
        .filter(|s| !s.is_empty())
        .or_else(|| aoc_http_client::read_session_file(session_file))
}

/// Prompt user for session token
pub fn prompt_session(reason: &str) -> Result<Zeroizing<String>, CliError> {
    println!("{}", reason);
    let s = Zeroizing::new(
        rpassword::prompt_password("Enter AOC session key: ")
            .map_err(|e| CliError::Config(format!("Failed to read session: {}", e)))?,
    );
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(CliError::Config("Session token is required.".to_string()));
    }
    Ok(Zeroizing::new(trimmed.to_string()))
}
