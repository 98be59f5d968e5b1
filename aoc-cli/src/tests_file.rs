//! Per-day test definition files
//!
//! ```text
//! TestNumber=
//! 1
//! AnswerA=
//! 6
//! AnswerB=
//! [Empty]
//! Input=
//! 1,2,3
//! ================================
//! ```
//!
//! Records are closed by a line of 32 `=`. `[Empty]` marks an absent answer,
//! or a blank line inside an input block.

use crate::error::TestFileError;
use crate::layout::{scan_days, test_file_name};
use crate::text_store;
use aoc_solver::Part;
use std::path::PathBuf;

pub const RECORD_SEPARATOR: &str = "================================";
pub const EMPTY_TOKEN: &str = "[Empty]";

/// One input with its expected answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    pub test_number: u32,
    pub input: String,
    pub answer_a: Option<String>,
    pub answer_b: Option<String>,
}

impl TestCase {
    pub fn expected(&self, part: Part) -> Option<&str> {
        match part {
            Part::A => self.answer_a.as_deref(),
            Part::B => self.answer_b.as_deref(),
        }
    }

    /// Parts that have an expected answer
    pub fn parts(&self) -> impl Iterator<Item = Part> + '_ {
        Part::ALL
            .into_iter()
            .filter(|part| self.expected(*part).is_some())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    TestNumber,
    AnswerA,
    AnswerB,
    Input,
}

impl Field {
    const TAGS: [(&'static str, Field); 4] = [
        ("TestNumber=", Field::TestNumber),
        ("AnswerA=", Field::AnswerA),
        ("AnswerB=", Field::AnswerB),
        ("Input=", Field::Input),
    ];

    /// The field a tag line opens, with whatever follows the `=`
    fn from_tag_line(line: &str) -> Option<(Field, &str)> {
        let line = line.trim_start();
        Self::TAGS
            .iter()
            .find_map(|(tag, field)| line.strip_prefix(tag).map(|rest| (*field, rest)))
    }
}

#[derive(Debug, Default)]
struct PendingRecord {
    test_number: u32,
    input_lines: Vec<String>,
    answer_a: Option<String>,
    answer_b: Option<String>,
}

impl PendingRecord {
    fn input(&self) -> String {
        self.input_lines.join("\n").trim_end().to_string()
    }

    fn is_blank(&self) -> bool {
        self.test_number == 0
            && self.input_lines.is_empty()
            && self.answer_a.is_none()
            && self.answer_b.is_none()
    }
}

#[derive(Debug, Default)]
struct Parser {
    record: PendingRecord,
    key: Option<Field>,
    reading_input: bool,
    cases: Vec<TestCase>,
}

impl Parser {
    fn line(&mut self, line: &str) {
        if line.trim() == RECORD_SEPARATOR {
            self.close_record();
            return;
        }

        if let Some((field, inline)) = Field::from_tag_line(line) {
            self.key = Some(field);
            self.reading_input = field == Field::Input;
            if self.reading_input {
                self.record.input_lines.clear();
            }
            if !inline.trim().is_empty() {
                self.content(inline);
            }
            return;
        }

        self.content(line);
    }

    fn content(&mut self, line: &str) {
        let text = line.trim();

        if self.reading_input {
            let text = if text == EMPTY_TOKEN { "" } else { text };
            self.record.input_lines.push(text.to_string());
            return;
        }

        if text.is_empty() {
            return;
        }

        let answer = || (text != EMPTY_TOKEN).then(|| text.to_string());
        match self.key {
            Some(Field::TestNumber) => {
                self.record.test_number = text.parse().unwrap_or_else(|_| {
                    tracing::warn!(value = text, "test number is not a positive integer");
                    0
                });
            }
            Some(Field::AnswerA) => self.record.answer_a = answer(),
            Some(Field::AnswerB) => self.record.answer_b = answer(),
            Some(Field::Input) | None => {
                tracing::debug!(line = text, "ignoring text outside of any field")
            }
        }
    }

    fn close_record(&mut self) {
        let record = std::mem::take(&mut self.record);
        self.key = None;
        self.reading_input = false;

        if record.test_number == 0 {
            if !record.is_blank() {
                tracing::warn!("discarding test record without a test number");
            }
            return;
        }
        self.accept(record);
    }

    fn accept(&mut self, record: PendingRecord) {
        let test_number = record.test_number;
        let input = record.input();

        if input.is_empty() {
            tracing::warn!(test_number, "test is invalid: empty input");
            return;
        }
        if record.answer_a.is_none() && record.answer_b.is_none() {
            tracing::warn!(test_number, "test is invalid: no expected answer");
            return;
        }
        if self.cases.iter().any(|case| case.test_number == test_number) {
            tracing::warn!(test_number, "duplicate test number, keeping the first one");
            return;
        }

        self.cases.push(TestCase {
            test_number,
            input,
            answer_a: record.answer_a,
            answer_b: record.answer_b,
        });
    }

    fn finish(mut self) -> Result<Vec<TestCase>, TestFileError> {
        let record = std::mem::take(&mut self.record);
        if record.test_number != 0 {
            if record.input().is_empty() {
                return Err(TestFileError::TruncatedRecord {
                    test_number: record.test_number,
                });
            }
            self.accept(record);
        }
        Ok(self.cases)
    }
}

/// Parse test definitions, keeping only well-formed records.
///
/// Invalid records closed by a separator are skipped with a warning. A final
/// record without a closing separator and with an empty input aborts the parse.
pub fn parse_test_definitions(text: &str) -> Result<Vec<TestCase>, TestFileError> {
    let mut parser = Parser::default();
    for line in text.lines() {
        parser.line(line);
    }
    parser.finish()
}

/// Render test cases in the test definition format
pub fn render_test_cases(cases: &[TestCase]) -> String {
    let mut out = String::new();
    for case in cases {
        out.push_str("TestNumber=\n");
        out.push_str(&case.test_number.to_string());
        out.push('\n');
        for (tag, answer) in [("AnswerA=", &case.answer_a), ("AnswerB=", &case.answer_b)] {
            out.push_str(tag);
            out.push('\n');
            out.push_str(answer.as_deref().unwrap_or(EMPTY_TOKEN));
            out.push('\n');
        }
        out.push_str("Input=\n");
        for line in case.input.lines() {
            out.push_str(if line.trim().is_empty() { EMPTY_TOKEN } else { line });
            out.push('\n');
        }
        out.push_str(RECORD_SEPARATOR);
        out.push('\n');
    }
    out
}

/// Reads test definitions from the tests directory
pub struct TestManager {
    tests_dir: PathBuf,
}

impl TestManager {
    pub fn new(tests_dir: impl Into<PathBuf>) -> Self {
        Self {
            tests_dir: tests_dir.into(),
        }
    }

    pub fn test_file(&self, day: u8) -> PathBuf {
        self.tests_dir.join(test_file_name(day))
    }

    /// Days with a test file, descending
    pub fn available_tests(&self) -> Vec<u8> {
        scan_days(&self.tests_dir, test_file_name)
    }

    /// Parse the test file of `day`, reread on every call.
    ///
    /// A missing file yields no tests.
    pub fn parse(&self, day: u8) -> Result<Vec<TestCase>, TestFileError> {
        let path = self.test_file(day);
        let Some(text) = text_store::read_text(&path)? else {
            tracing::warn!(day, path = %path.display(), "test file not found");
            return Ok(Vec::new());
        };

        parse_test_definitions(&text).inspect_err(|e| {
            tracing::error!(day, error = %e, "test file rejected");
        })
    }
}
