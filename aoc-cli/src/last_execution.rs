//! Memory of the most recent run, used by `aoc repeat`

use crate::error::SettingsError;
use crate::text_store;
use aoc_solver::Part;
use std::fmt;
use std::path::PathBuf;

const KEY_DAY: &str = "Day";
const KEY_MODE: &str = "Mode";
const KEY_PART: &str = "Part";
const KEY_TEST_NUMBER: &str = "TestNumber";

/// What was run: the real input, or one test case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionMode {
    Run,
    Test { test_number: u32 },
}

/// A fully validated last execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionSettings {
    pub day: u8,
    pub part: Part,
    pub mode: ExecutionMode,
}

impl ExecutionSettings {
    /// Build settings from `key=value` pairs.
    ///
    /// `Day`, `Mode` and `Part` are required, `TestNumber` too when the mode is
    /// `Test`. Later duplicates of a key win.
    pub fn from_key_values<K, V>(pairs: &[(K, V)]) -> Result<Self, SettingsError>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let lookup = |key: &'static str| {
            pairs
                .iter()
                .rev()
                .find(|(k, _)| k.as_ref() == key)
                .map(|(_, v)| v.as_ref().trim())
                .ok_or(SettingsError::MissingKey(key))
        };
        let invalid = |key: &'static str, value: &str| SettingsError::InvalidValue {
            key,
            value: value.to_string(),
        };

        let day_text = lookup(KEY_DAY)?;
        let mode_text = lookup(KEY_MODE)?;
        let part_text = lookup(KEY_PART)?;

        let day = day_text
            .parse::<u8>()
            .ok()
            .filter(|day| *day > 0)
            .ok_or_else(|| invalid(KEY_DAY, day_text))?;
        let part = part_text
            .parse::<Part>()
            .map_err(|_| invalid(KEY_PART, part_text))?;
        let mode = match mode_text {
            "Run" => ExecutionMode::Run,
            "Test" => {
                let number_text = lookup(KEY_TEST_NUMBER)?;
                let test_number = number_text
                    .parse::<u32>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| invalid(KEY_TEST_NUMBER, number_text))?;
                ExecutionMode::Test { test_number }
            }
            other => return Err(invalid(KEY_MODE, other)),
        };

        Ok(Self { day, part, mode })
    }

    /// The `key=value` pairs that describe these settings
    pub fn to_key_values(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            (KEY_DAY, self.day.to_string()),
            (
                KEY_MODE,
                match self.mode {
                    ExecutionMode::Run => "Run",
                    ExecutionMode::Test { .. } => "Test",
                }
                .to_string(),
            ),
            (KEY_PART, self.part.to_string()),
        ];
        if let ExecutionMode::Test { test_number } = self.mode {
            pairs.push((KEY_TEST_NUMBER, test_number.to_string()));
        }
        pairs
    }
}

impl fmt::Display for ExecutionSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            ExecutionMode::Run => write!(f, "Run day {} part {}", self.day, self.part),
            ExecutionMode::Test { test_number } => write!(
                f,
                "Test #{} of day {} part {}",
                test_number, self.day, self.part
            ),
        }
    }
}

/// Single-slot store for the last execution settings
pub struct LastExecution {
    path: PathBuf,
    settings: Option<ExecutionSettings>,
}

impl LastExecution {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let settings = read_settings(&path);
        Self { path, settings }
    }

    pub fn has_last_execution(&self) -> bool {
        self.settings.is_some()
    }

    pub fn last_execution(&self) -> Option<ExecutionSettings> {
        self.settings
    }

    /// Persist `day`/`mode`/`part`, then reload the file to confirm it.
    ///
    /// A write failure only clears the memory; it never fails the run that
    /// triggered it.
    pub fn write_last_choice(&mut self, day: u8, mode: ExecutionMode, part: Part) {
        let settings = ExecutionSettings { day, part, mode };
        match text_store::write_key_values(&self.path, &settings.to_key_values()) {
            Ok(()) => {
                self.settings = read_settings(&self.path);
                if self.settings == Some(settings) {
                    tracing::info!(%settings, "last choice saved");
                } else {
                    tracing::warn!(%settings, "last choice did not read back as written");
                }
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to save last choice");
                self.settings = None;
            }
        }
    }
}

fn read_settings(path: &std::path::Path) -> Option<ExecutionSettings> {
    let pairs = match text_store::read_key_values(path) {
        Ok(Some(pairs)) => pairs,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read last choice");
            return None;
        }
    };

    ExecutionSettings::from_key_values(&pairs)
        .inspect_err(|e| tracing::warn!(error = %e, "ignoring last execution"))
        .ok()
}
