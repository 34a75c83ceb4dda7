//! Data models for the library store

pub mod enums;
pub mod item;
pub mod library;
pub mod load_report;
pub mod member;

// Re-export commonly used types
pub use enums::{Gender, ItemStatus};
pub use item::{Item, ItemDetails, ItemKind, SerialNumber};
pub use library::{Library, LoanInconsistency};
pub use load_report::{DanglingReference, LoadReport, RecordFile, ReferenceKind, SkippedLine};
pub use member::{Member, MemberDetails, MemberKind};
