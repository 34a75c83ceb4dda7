//! Escaping and tokenising of delimited fields

use std::fmt::Display;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

/// Marker placed before a literal delimiter (or a literal marker) in a text field
pub const ESCAPE: char = '\\';

const RESERVED: [char; 3] = [ESCAPE, '&', '#'];

/// Line breaks would split a record across lines, so they are written as
/// `\n` and `\r`.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            c if RESERVED.contains(&c) => {
                escaped.push(ESCAPE);
                escaped.push(c);
            }
            c => escaped.push(c),
        }
    }
    escaped
}

pub fn unescape(raw: &str) -> String {
    let mut text = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != ESCAPE {
            text.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => text.push('\n'),
            Some('r') => text.push('\r'),
            Some(literal) => text.push(literal),
            None => {}
        }
    }
    text
}

/// Split on every occurrence of `delimiter` that is not escaped. The returned
/// pieces are still escaped.
pub fn split_unescaped<'a>(raw: &'a str, delimiter: &str) -> Vec<&'a str> {
    debug_assert!(!delimiter.is_empty());
    let mut parts = Vec::new();
    let mut start = 0;
    let mut index = 0;
    while let Some(c) = raw[index..].chars().next() {
        if c == ESCAPE {
            index += c.len_utf8();
            if let Some(literal) = raw[index..].chars().next() {
                index += literal.len_utf8();
            }
        } else if raw[index..].starts_with(delimiter) {
            parts.push(&raw[start..index]);
            index += delimiter.len();
            start = index;
        } else {
            index += c.len_utf8();
        }
    }
    parts.push(&raw[start..]);
    parts
}

/// Unescaped, non-empty entries of a reference list field
pub fn split_references(raw: &str, delimiter: &str) -> Vec<String> {
    split_unescaped(raw, delimiter)
        .into_iter()
        .filter(|entry| !entry.is_empty())
        .map(unescape)
        .collect()
}

/// Positional access to the tokens of one line
pub(crate) struct Fields<'a> {
    tokens: Vec<&'a str>,
    record: &'static str,
}

impl<'a> Fields<'a> {
    pub fn split(line: &'a str, delimiter: &str, record: &'static str) -> Self {
        Self {
            tokens: split_unescaped(line, delimiter),
            record,
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn raw(&self, index: usize) -> AppResult<&'a str> {
        self.tokens.get(index).copied().ok_or_else(|| {
            AppError::Decode(format!("{} line has no field {}", self.record, index + 1))
        })
    }

    pub fn text(&self, index: usize) -> AppResult<String> {
        self.raw(index).map(unescape)
    }

    /// First character of a code field
    pub fn code(&self, index: usize, name: &str) -> AppResult<char> {
        self.text(index)?.chars().next().ok_or_else(|| {
            AppError::Decode(format!("{} line has an empty {}", self.record, name))
        })
    }

    pub fn number<T>(&self, index: usize, name: &str) -> AppResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.raw(index)?;
        raw.trim().parse().map_err(|e| {
            AppError::Decode(format!(
                "{} line has an invalid {} {:?}: {}",
                self.record, name, raw, e
            ))
        })
    }

    /// Reject lines whose field count is neither `fixed` nor `fixed + 1`.
    pub fn expect_count(&self, fixed: usize) -> AppResult<()> {
        if self.len() == fixed || self.len() == fixed + 1 {
            Ok(())
        } else {
            Err(AppError::Decode(format!(
                "{} line has {} fields, expected {} or {}",
                self.record,
                self.len(),
                fixed,
                fixed + 1
            )))
        }
    }

    /// Raw trailing reference field, if present and non-empty
    pub fn references(&self, fixed: usize) -> Option<String> {
        self.tokens
            .get(fixed)
            .filter(|raw| !raw.is_empty())
            .map(|raw| raw.to_string())
    }
}
