//! Diagnostics collected while loading the two record files.

use serde::{Deserialize, Serialize};

/// Which record file a diagnostic refers to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RecordFile {
    Members,
    Items,
}

/// A line that could not be turned into a record and was left out.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkippedLine {
    pub file: RecordFile,
    /// 1-based
    pub line_number: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceKind {
    /// A member id listed in an item's borrowing history
    PastOwner,
    /// An item serial listed in a member's borrowed items
    BorrowedItem,
}

/// A cross-reference that matched no loaded record and was dropped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DanglingReference {
    pub kind: ReferenceKind,
    /// Id or serial of the record carrying the reference
    pub owner: String,
    pub reference: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadReport {
    pub members_loaded: usize,
    pub items_loaded: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dangling_references: Vec<DanglingReference>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.skipped_lines.is_empty() && self.dangling_references.is_empty()
    }

    pub(crate) fn skip_line(&mut self, file: RecordFile, line_number: usize, reason: String) {
        tracing::warn!("Skipping {:?} line {}: {}", file, line_number, reason);
        self.skipped_lines.push(SkippedLine {
            file,
            line_number,
            reason,
        });
    }

    pub(crate) fn dangling(&mut self, kind: ReferenceKind, owner: String, reference: String) {
        tracing::warn!("Dropping unresolved {:?} reference {} on {}", kind, reference, owner);
        self.dangling_references.push(DanglingReference {
            kind,
            owner,
            reference,
        });
    }
}
