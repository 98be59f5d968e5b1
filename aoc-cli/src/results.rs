//! Persisted answers, one per (day, part)

use crate::error::StoreError;
use crate::text_store;
use aoc_solver::Part;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FIELD_DELIMITER: char = '|';

/// A stored answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionResult {
    pub day: u8,
    pub part: Part,
    pub result: String,
}

/// Last computed answer per (day, part), mirrored to a `day|part|result` file.
///
/// The file is loaded once on construction and rewritten in full, sorted by
/// day then part, on every save.
pub struct ResultStore {
    path: PathBuf,
    results: BTreeMap<(u8, Part), String>,
}

impl ResultStore {
    /// Load the store from `path`.
    ///
    /// A missing file is an empty store. Any unreadable or malformed line
    /// discards everything that was loaded, so the store starts empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let results = match read_results(&path) {
            Ok(results) => results,
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "failed to load results, starting empty");
                BTreeMap::new()
            }
        };
        Self { path, results }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Upsert the answer for (day, part) and rewrite the file
    pub fn save_day_result(&mut self, day: u8, part: Part, result: &str) -> Result<(), StoreError> {
        if day == 0 {
            return Err(StoreError::InvalidDay(day));
        }
        if result.contains(['\n', '\r']) {
            return Err(StoreError::MultilineValue { day, part });
        }

        let previous = self.results.insert((day, part), result.to_string());
        if let Err(e) = self.persist() {
            // Keep memory and disk in agreement
            match previous {
                Some(previous) => self.results.insert((day, part), previous),
                None => self.results.remove(&(day, part)),
            };
            return Err(e.into());
        }

        tracing::info!(day, %part, "result saved");
        Ok(())
    }

    /// Stored answers sorted by day, then part
    pub fn solution_results(&self) -> Vec<SolutionResult> {
        self.results
            .iter()
            .map(|(&(day, part), result)| SolutionResult {
                day,
                part,
                result: result.clone(),
            })
            .collect()
    }

    pub fn get(&self, day: u8, part: Part) -> Option<&str> {
        self.results.get(&(day, part)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    fn persist(&self) -> std::io::Result<()> {
        text_store::write_records(
            &self.path,
            self.results
                .iter()
                .map(|((day, part), result)| [day.to_string(), part.to_string(), result.clone()]),
            FIELD_DELIMITER,
        )
    }
}

fn read_results(path: &Path) -> Result<BTreeMap<(u8, Part), String>, StoreError> {
    let Some(content) = text_store::read_text(path)? else {
        return Ok(BTreeMap::new());
    };

    let mut results = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let (day, part, result) = parse_result_line(line).ok_or_else(|| StoreError::Malformed {
            line_number: idx + 1,
            line: line.to_string(),
        })?;
        results.insert((day, part), result.to_string());
    }
    Ok(results)
}

fn parse_result_line(line: &str) -> Option<(u8, Part, &str)> {
    let fields = text_store::split_record(line, FIELD_DELIMITER, 3)?;
    let day = fields[0].trim().parse::<u8>().ok().filter(|day| *day > 0)?;
    let part = fields[1].parse::<Part>().ok()?;
    Some((day, part, fields[2]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn store_in(temp: &TempDir) -> ResultStore {
        ResultStore::load(temp.path().join("state").join("results.txt"))
    }

    #[test]
    fn test_missing_file_is_empty_store() {
        let temp = TempDir::new().unwrap();
        let store = store_in(&temp);
        assert!(store.is_empty());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_save_sorts_and_persists() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.save_day_result(3, Part::B, "30").unwrap();
        store.save_day_result(1, Part::B, "11").unwrap();
        store.save_day_result(1, Part::A, "10").unwrap();

        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "1|A|10\n1|B|11\n3|B|30\n"
        );

        let reloaded = store_in(&temp);
        assert_eq!(reloaded.solution_results(), store.solution_results());
        assert_eq!(
            reloaded.solution_results()[0],
            SolutionResult {
                day: 1,
                part: Part::A,
                result: "10".to_string()
            }
        );
    }

    #[test]
    fn test_upsert_replaces_value() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.save_day_result(2, Part::A, "x").unwrap();
        store.save_day_result(2, Part::A, "y").unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get(2, Part::A), Some("y"));
        assert_eq!(std::fs::read_to_string(store.path()).unwrap(), "2|A|y\n");
    }

    #[test]
    fn test_result_may_contain_delimiter() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        store.save_day_result(4, Part::B, "a|b").unwrap();
        assert_eq!(store_in(&temp).get(4, Part::B), Some("a|b"));
    }

    #[test]
    fn test_rejects_multiline_and_day_zero() {
        let temp = TempDir::new().unwrap();
        let mut store = store_in(&temp);
        assert!(matches!(
            store.save_day_result(1, Part::A, "1\n2"),
            Err(StoreError::MultilineValue { day: 1, part: Part::A })
        ));
        assert!(matches!(
            store.save_day_result(0, Part::A, "1"),
            Err(StoreError::InvalidDay(0))
        ));
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_line_clears_store() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.txt");
        std::fs::write(&path, "1|A|10\n\n2|C|20\n3|B|30\n").unwrap();

        let store = ResultStore::load(&path);
        assert!(store.is_empty());

        std::fs::write(&path, "1|A|10\nnot a record\n").unwrap();
        assert!(ResultStore::load(&path).is_empty());
    }

    #[test]
    fn test_save_after_failed_load_overwrites_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("results.txt");
        std::fs::write(&path, "garbage\n").unwrap();

        let mut store = ResultStore::load(&path);
        store.save_day_result(5, Part::A, "55").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "5|A|55\n");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_saves_keep_one_record_per_key(
            saves in prop::collection::vec(
                (1u8..=25, prop::bool::ANY, "[a-z0-9|]{0,8}"),
                1..20,
            )
        ) {
            let temp = TempDir::new().unwrap();
            let mut store = store_in(&temp);
            let mut expected = BTreeMap::new();

            for (day, is_b, value) in &saves {
                let part = if *is_b { Part::B } else { Part::A };
                store.save_day_result(*day, part, value).unwrap();
                // Saving the same value twice is a no-op
                store.save_day_result(*day, part, value).unwrap();
                expected.insert((*day, part), value.clone());
            }

            let reloaded = store_in(&temp);
            prop_assert_eq!(reloaded.len(), expected.len());
            for ((day, part), value) in &expected {
                prop_assert_eq!(reloaded.get(*day, *part), Some(value.as_str()));
            }
        }
    }
}
