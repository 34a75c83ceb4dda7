//! Line codec for the members and items files.
//!
//! Each record is one line of fields joined by a single delimiter; an
//! optional trailing field carries the record's cross-references joined by a
//! secondary delimiter. Text fields are escaped so that delimiter characters
//! can appear in titles, names and ids.

pub mod fields;
mod item_line;
mod member_line;

use crate::error::AppResult;

pub use fields::{escape, split_references, split_unescaped, unescape, ESCAPE};

/// `C&name&address&gender&age&phone&id[&balance][&serial##serial]`
pub const MEMBER_FIELD_DELIMITER: &str = "&";
pub const MEMBER_LIST_DELIMITER: &str = "##";

/// `B#serial#title#author#publisher#status#genre#millis#pages[#id&&id]`
pub const ITEM_FIELD_DELIMITER: &str = "#";
pub const ITEM_LIST_DELIMITER: &str = "&&";

/// A decoded record together with its still-unresolved cross-references.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub record: T,
    /// Raw trailing field, split and resolved during reconciliation
    pub references: Option<String>,
}

/// A record that is persisted as a single line.
pub trait LineRecord: Sized {
    /// Delimiter separating entries of the trailing reference field
    const LIST_DELIMITER: &'static str;

    fn encode_line(&self) -> String;

    fn decode_line(line: &str) -> AppResult<Decoded<Self>>;
}
