//! Small flat-file helpers for `key=value` and delimited-record files
//!
//! A missing file is reported as `Ok(None)` so callers can treat it as
//! "no prior state". Writes always replace the whole file and create the
//! parent directory when needed.

use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;

/// Read a text file, `None` if it does not exist
pub fn read_text(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Replace the content of `path`, creating parent directories
pub fn write_text(path: &Path, content: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

/// Read `key=value` lines in file order.
///
/// Lines are split on the first `=` and both sides are trimmed. Blank lines,
/// `#` comments and lines without `=` are skipped.
pub fn read_key_values(path: &Path) -> io::Result<Option<Vec<(String, String)>>> {
    let Some(content) = read_text(path)? else {
        return Ok(None);
    };

    let pairs = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| match line.split_once('=') {
            Some((key, value)) => Some((key.trim().to_string(), value.trim().to_string())),
            None => {
                tracing::debug!(path = %path.display(), line, "ignoring line without '='");
                None
            }
        })
        .collect();
    Ok(Some(pairs))
}

pub fn write_key_values<K, V>(path: &Path, pairs: &[(K, V)]) -> io::Result<()>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    let content: String = pairs
        .iter()
        .map(|(key, value)| format!("{}={}\n", key.as_ref(), value.as_ref()))
        .collect();
    write_text(path, &content)
}

/// Split `line` into exactly `fields` parts on the first `fields - 1` delimiters.
///
/// The last field keeps any further delimiters.
pub fn split_record(line: &str, delimiter: char, fields: usize) -> Option<Vec<&str>> {
    let parts: Vec<&str> = line.splitn(fields, delimiter).collect();
    (parts.len() == fields).then_some(parts)
}

/// Write one delimited record per line
pub fn write_records<I, R, F>(path: &Path, records: I, delimiter: char) -> io::Result<()>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = F>,
    F: AsRef<str>,
{
    let mut content = String::new();
    for record in records {
        let mut first = true;
        for field in record {
            if !first {
                content.push(delimiter);
            }
            content.push_str(field.as_ref());
            first = false;
        }
        content.push('\n');
    }
    write_text(path, &content)
}
