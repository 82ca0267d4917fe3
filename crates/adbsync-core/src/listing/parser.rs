//! Parser for `ls -la` style listings

use std::sync::OnceLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::{DirectoryEntry, EntryKind};
use crate::error::ListingParseError;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Length of a permission string such as `drwxr-xr-x`
const PERMISSIONS_LEN: usize = 10;

fn timestamp_regex() -> &'static Regex {
    static TIMESTAMP_RE: OnceLock<Regex> = OnceLock::new();
    TIMESTAMP_RE.get_or_init(|| {
        Regex::new(r"[ \t]([0-9]{4}-[0-9]{2}-[0-9]{2}[ \t][0-9]{2}:[0-9]{2})[ \t]")
            .expect("valid regex")
    })
}

/// Date-time token located inside a listing line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TimestampToken<'a> {
    /// Byte offset of the whitespace in front of the date
    start: usize,
    /// Byte offset of the first byte after the trailing whitespace
    end: usize,
    /// `YYYY-MM-DD HH:MM`
    text: &'a str,
}

impl<'a> TimestampToken<'a> {
    fn locate(line: &'a str) -> Option<Self> {
        let captures = timestamp_regex().captures(line)?;
        let whole = captures.get(0)?;
        let text = captures.get(1)?.as_str();
        Some(Self {
            start: whole.start(),
            end: whole.end(),
            text,
        })
    }
}

/// Parses directory listings into entries
#[derive(Debug, Clone, Copy)]
pub struct ListingParser {
    separator: char,
}

impl ListingParser {
    /// Create a parser producing paths joined with `separator`
    #[must_use]
    pub const fn new(separator: char) -> Self {
        Self { separator }
    }

    /// Parse a whole listing of the directory `parent`
    ///
    /// `parent` must already end with the separator. Symbolic links and
    /// special files are dropped, as are the `.` and `..` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if any line lacks a date-time token or carries an
    /// unparsable date or size. No entries are returned in that case.
    pub fn parse(
        &self,
        raw: &str,
        parent: &str,
    ) -> Result<Vec<DirectoryEntry>, ListingParseError> {
        let mut entries = Vec::new();

        for line in raw.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(entry) = self.parse_line(line, parent)? {
                entries.push(entry);
            }
        }

        Ok(entries)
    }

    fn parse_line(
        &self,
        line: &str,
        parent: &str,
    ) -> Result<Option<DirectoryEntry>, ListingParseError> {
        let token =
            TimestampToken::locate(line).ok_or_else(|| ListingParseError::MissingTimestamp {
                line: line.to_string(),
            })?;

        let is_directory = match line.as_bytes().first() {
            Some(b'd') => true,
            Some(b'-') => false,
            _ => return Ok(None),
        };

        let timestamp = NaiveDateTime::parse_from_str(token.text, TIMESTAMP_FORMAT)
            .map_err(|_| ListingParseError::InvalidTimestamp {
                line: line.to_string(),
            })?;

        // Known limitation: a name containing the date-time pattern misparses.
        let name = &line[token.end..];
        if name == "." || name == ".." {
            return Ok(None);
        }

        let kind = if is_directory {
            EntryKind::Directory
        } else {
            EntryKind::File {
                size: parse_size(line, &token)?,
            }
        };

        let permissions = line.get(..PERMISSIONS_LEN).unwrap_or(line);
        let is_readable = permissions.get(1..).is_some_and(|rest| rest.contains('r'));

        let mut path = format!("{parent}{name}");
        if is_directory {
            path.push(self.separator);
        }

        Ok(Some(DirectoryEntry {
            path,
            name: name.to_string(),
            kind,
            timestamp,
            is_readable,
        }))
    }
}

/// Read the size column by walking back from the character before the
/// whitespace that precedes the date-time token, collecting digits.
fn parse_size(line: &str, token: &TimestampToken<'_>) -> Result<u64, ListingParseError> {
    let head = &line.as_bytes()[..token.start];
    let digits_start = head
        .iter()
        .rposition(|byte| !byte.is_ascii_digit())
        .map_or(0, |idx| idx + 1);

    line[digits_start..token.start]
        .parse()
        .map_err(|_| ListingParseError::InvalidSize {
            line: line.to_string(),
        })
}
