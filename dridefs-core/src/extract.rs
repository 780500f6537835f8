//! Marker extraction from source files.
//!
//! A candidate line is any line containing the marker token. Its argument
//! list is the text between the first `(` following the marker and the first
//! `)` after that, with all whitespace removed:
//!
//! ```text
//! ARC_REGISTER_DRIVER(0, ext2, super) = {     ->  (0, "ext2", "super")
//! ARC_REGISTER_DRIVER(3, rtc,) = {            ->  (3, "rtc", "")
//! ```
//!
//! Lines are visited from the last to the first, so within one file the
//! registration written lowest in the file is registered first.

use regex::Regex;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::error::{DridefsError, DridefsResult, IoResultExt};
use crate::registry::Group;

/// One `(group, name, extension)` tuple lifted from a marker line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerTuple {
    pub group: Group,
    pub name: String,
    pub extension: String,
    /// 1-indexed source line the tuple came from.
    pub line: usize,
}

/// Finds and parses marker lines for a single marker token.
#[derive(Debug, Clone)]
pub struct MarkerExtractor {
    marker: String,
    args: Regex,
}

impl MarkerExtractor {
    /// Builds an extractor for `marker`.
    ///
    /// Fails if the marker is empty or only whitespace, since every line
    /// would then be a candidate.
    pub fn new(marker: &str) -> DridefsResult<Self> {
        let compact = strip_whitespace(marker);
        if compact.is_empty() {
            return Err(DridefsError::invalid_argument("marker token must not be empty"));
        }

        let pattern = format!(r"{}[^(]*\(([^)]*)\)", regex::escape(&compact));
        let args = Regex::new(&pattern)
            .map_err(|e| DridefsError::invalid_argument(format!("marker `{}`: {}", marker, e)))?;

        Ok(Self {
            marker: marker.to_string(),
            args,
        })
    }

    /// Reads `path` and extracts its tuples in bottom-to-top order.
    pub fn extract_file(&self, path: &Path) -> DridefsResult<Vec<MarkerTuple>> {
        let bytes = fs::read(path).with_path(path)?;
        let content = String::from_utf8_lossy(&bytes);
        self.extract_str(path, &content)
    }

    /// Extracts tuples from already-loaded file content.
    ///
    /// `path` is only used for diagnostics.
    pub fn extract_str(&self, path: &Path, content: &str) -> DridefsResult<Vec<MarkerTuple>> {
        let candidates: Vec<(usize, &str)> = content
            .lines()
            .enumerate()
            .filter(|(_, line)| line.contains(self.marker.as_str()))
            .collect();

        let mut tuples = Vec::with_capacity(candidates.len());
        for (idx, line) in candidates.into_iter().rev() {
            let tuple = self.parse_line(path, idx + 1, line)?;
            tracing::info!(
                file = %path.display(),
                line = tuple.line,
                group = tuple.group.value(),
                name = %tuple.name,
                ext = %tuple.extension,
                "found driver definition"
            );
            tuples.push(tuple);
        }
        Ok(tuples)
    }

    fn parse_line(&self, path: &Path, line_no: usize, line: &str) -> DridefsResult<MarkerTuple> {
        let malformed = |message: String| DridefsError::malformed(path, line_no, line.trim(), message);

        let compact = strip_whitespace(line);
        let args = self
            .args
            .captures(&compact)
            .and_then(|c| c.get(1))
            .ok_or_else(|| malformed("no parenthesized argument list after marker".to_string()))?
            .as_str();

        let fields: Vec<&str> = args.split(',').collect();
        let [group, name, extension] = fields.as_slice() else {
            return Err(malformed(format!(
                "expected 3 comma-separated fields, found {}",
                fields.len()
            )));
        };

        let group: i64 = group
            .parse()
            .map_err(|_| malformed(format!("group `{}` is not an integer", group)))?;

        Ok(MarkerTuple {
            group: Group::new(group),
            name: unquote(name).to_string(),
            extension: unquote(extension).to_string(),
            line: line_no,
        })
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Removes one pair of surrounding double quotes, if present.
fn unquote(field: &str) -> &str {
    field
        .strip_prefix('"')
        .and_then(|f| f.strip_suffix('"'))
        .unwrap_or(field)
}
