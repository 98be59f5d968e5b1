//! Fixed directory layout of a runner project

use std::path::{Path, PathBuf};

/// Paths of every file the runner reads or writes, relative to the project root
///
/// ```text
/// {root}/aoc-solutions/src/solutions/day_NN.rs
/// {root}/puzzles/tests/test-NN.txt
/// {root}/puzzles/inputs/input-NN.txt
/// {root}/puzzles/state/{session-cookie.txt, last-choice.txt, results.txt}
/// {root}/templates/{solution.rs.tmpl, test.txt}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn solutions_dir(&self) -> PathBuf {
        self.root.join("aoc-solutions").join("src").join("solutions")
    }

    pub fn tests_dir(&self) -> PathBuf {
        self.root.join("puzzles").join("tests")
    }

    pub fn inputs_dir(&self) -> PathBuf {
        self.root.join("puzzles").join("inputs")
    }

    pub fn state_dir(&self) -> PathBuf {
        self.root.join("puzzles").join("state")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn session_file(&self) -> PathBuf {
        self.state_dir().join("session-cookie.txt")
    }

    pub fn last_choice_file(&self) -> PathBuf {
        self.state_dir().join("last-choice.txt")
    }

    pub fn results_file(&self) -> PathBuf {
        self.state_dir().join("results.txt")
    }

    pub fn solution_template(&self) -> PathBuf {
        self.templates_dir().join("solution.rs.tmpl")
    }

    pub fn test_template(&self) -> PathBuf {
        self.templates_dir().join("test.txt")
    }
}

/// `day_NN.rs`
pub fn solution_file_name(day: u8) -> String {
    format!("{}.rs", aoc_solver::solution_module_name(day))
}

/// `test-NN.txt`
pub fn test_file_name(day: u8) -> String {
    format!("test-{:02}.txt", day)
}

/// `input-NN.txt`
pub fn input_file_name(day: u8) -> String {
    format!("input-{:02}.txt", day)
}

/// Recover the day from a file name built by `make`, rejecting anything else
///
/// Day 0 and names that are not zero-padded (`day_1.rs`) never match.
pub fn day_from_file_name(file_name: &str, make: fn(u8) -> String) -> Option<u8> {
    let day = file_name
        .trim_start_matches(|c: char| !c.is_ascii_digit())
        .split(|c: char| !c.is_ascii_digit())
        .next()?
        .parse::<u8>()
        .ok()
        .filter(|day| *day > 0)?;
    (make(day) == file_name).then_some(day)
}

/// Days found in `dir` whose file names match `make`, sorted descending
///
/// A missing directory yields an empty list.
pub fn scan_days(dir: &Path, make: fn(u8) -> String) -> Vec<u8> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "directory not readable");
            return Vec::new();
        }
    };

    let mut days: Vec<u8> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|t| t.is_file()))
        .filter_map(|entry| {
            entry
                .file_name()
                .to_str()
                .and_then(|name| day_from_file_name(name, make))
        })
        .collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_names() {
        assert_eq!(solution_file_name(3), "day_03.rs");
        assert_eq!(test_file_name(12), "test-12.txt");
        assert_eq!(input_file_name(7), "input-07.txt");
    }

    #[test]
    fn test_day_from_file_name() {
        assert_eq!(day_from_file_name("day_05.rs", solution_file_name), Some(5));
        assert_eq!(day_from_file_name("test-25.txt", test_file_name), Some(25));
        assert_eq!(day_from_file_name("day_5.rs", solution_file_name), None);
        assert_eq!(day_from_file_name("day_00.rs", solution_file_name), None);
        assert_eq!(day_from_file_name("day_05.rs.bak", solution_file_name), None);
        assert_eq!(day_from_file_name("test-05.txt", solution_file_name), None);
        assert_eq!(day_from_file_name("mod.rs", solution_file_name), None);
    }

    #[test]
    fn test_scan_days_sorted_descending() {
        let temp = TempDir::new().unwrap();
        for name in ["day_02.rs", "day_10.rs", "day_01.rs", "notes.md", "day_7.rs"] {
            std::fs::write(temp.path().join(name), "").unwrap();
        }
        std::fs::create_dir(temp.path().join("day_04.rs")).unwrap();

        assert_eq!(scan_days(temp.path(), solution_file_name), vec![10, 2, 1]);
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let temp = TempDir::new().unwrap();
        assert!(scan_days(&temp.path().join("nope"), test_file_name).is_empty());
    }

    #[test]
    fn test_layout_paths() {
        let layout = ProjectLayout::new("/work/aoc");
        assert_eq!(
            layout.solutions_dir(),
            Path::new("/work/aoc/aoc-solutions/src/solutions")
        );
        assert_eq!(
            layout.results_file(),
            Path::new("/work/aoc/puzzles/state/results.txt")
        );
        assert_eq!(
            layout.test_template(),
            Path::new("/work/aoc/templates/test.txt")
        );
    }
}
