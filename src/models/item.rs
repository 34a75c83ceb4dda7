//! Catalogue item model (books and DVDs).
//!
//! An item only refers to members through their ids: `past_owners` is an
//! append-only list of member ids resolved against the member arena.

use chrono::{DateTime, Datelike, Duration, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

use super::enums::ItemStatus;
use crate::config::LendingConfig;

pub type SerialNumber = u64;

/// Books shorter than this are recorded with this page count
pub const MIN_PAGES: u32 = 20;

/// Variant-specific part of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Book { pages: u32 },
    Dvd { size_mb: f64 },
}

impl ItemKind {
    /// Build a book, raising short page counts to [`MIN_PAGES`].
    pub fn book(pages: i64) -> Self {
        ItemKind::Book {
            pages: clamp_pages(pages),
        }
    }

    /// Build a DVD. Sizes of 1 MB or less are not recorded and leave the size at 0.
    pub fn dvd(size_mb: f64) -> Self {
        ItemKind::Dvd {
            size_mb: if size_mb > 1.0 { size_mb } else { 0.0 },
        }
    }

    /// Persisted kind tag
    pub fn tag(&self) -> char {
        match self {
            ItemKind::Book { .. } => 'B',
            ItemKind::Dvd { .. } => 'D',
        }
    }

    fn surcharge(&self, lending: &LendingConfig) -> f64 {
        match self {
            ItemKind::Book { .. } => lending.book_surcharge,
            ItemKind::Dvd { .. } => lending.dvd_surcharge,
        }
    }
}

/// Free-text description shared by every kind of item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetails {
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub genre: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    serial_number: SerialNumber,
    pub title: String,
    pub author: String,
    pub publisher: String,
    pub genre: String,
    status: ItemStatus,
    date_available: DateTime<Utc>,
    past_owners: Vec<String>,
    kind: ItemKind,
}

impl Item {
    /// Create an available item, available from now.
    pub fn new(serial_number: SerialNumber, details: ItemDetails, kind: ItemKind) -> Self {
        Self {
            serial_number,
            title: details.title,
            author: details.author,
            publisher: details.publisher,
            genre: details.genre,
            status: ItemStatus::Available,
            date_available: now_millis(),
            past_owners: Vec::new(),
            kind,
        }
    }

    /// Rebuild an item exactly as it was persisted, without recomputing its availability date.
    pub(crate) fn restore(
        serial_number: SerialNumber,
        details: ItemDetails,
        status: ItemStatus,
        date_available: DateTime<Utc>,
        kind: ItemKind,
    ) -> Self {
        Self {
            status,
            date_available,
            ..Self::new(serial_number, details, kind)
        }
    }

    pub fn serial_number(&self) -> SerialNumber {
        self.serial_number
    }

    pub fn status(&self) -> ItemStatus {
        self.status
    }

    pub fn date_available(&self) -> DateTime<Utc> {
        self.date_available
    }

    /// Ids of every member who ever borrowed this item, oldest first
    pub fn past_owners(&self) -> &[String] {
        &self.past_owners
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    /// The member holding the item, when it is on loan
    pub fn current_borrower(&self) -> Option<&str> {
        match self.status {
            ItemStatus::OnLoan => self.past_owners.last().map(String::as_str),
            _ => None,
        }
    }

    /// Lending cost: flat base cost plus the kind surcharge
    pub fn price(&self, lending: &LendingConfig) -> f64 {
        lending.base_cost + self.kind.surcharge(lending)
    }

    /// Set the status from its code, then recompute the availability date.
    /// Unknown codes mean available.
    pub fn set_status(&mut self, code: char, loan_days: i64) {
        self.status = ItemStatus::from(code);
        self.refresh_availability(loan_days);
    }

    /// Available items are available now; anything else in `loan_days` days.
    pub fn refresh_availability(&mut self, loan_days: i64) {
        let now = now_millis();
        self.date_available = match self.status {
            ItemStatus::Available => now,
            _ => now + Duration::days(loan_days),
        };
    }

    /// Returns false for DVDs.
    pub fn set_pages(&mut self, pages: i64) -> bool {
        match &mut self.kind {
            ItemKind::Book { pages: current } => {
                *current = clamp_pages(pages);
                true
            }
            ItemKind::Dvd { .. } => false,
        }
    }

    /// Sizes of 1 MB or less are ignored. Returns false when nothing changed.
    pub fn set_size_mb(&mut self, size_mb: f64) -> bool {
        match &mut self.kind {
            ItemKind::Dvd { size_mb: current } if size_mb > 1.0 => {
                *current = size_mb;
                true
            }
            _ => false,
        }
    }

    /// Whole days until the item becomes available, negative once that date has passed.
    pub fn time_remaining_days(&self) -> i64 {
        (self.date_available - Utc::now()).num_days()
    }

    pub(crate) fn lend_to(&mut self, member_id: &str, loan_days: i64) {
        self.status = ItemStatus::OnLoan;
        self.refresh_availability(loan_days);
        self.past_owners.push(member_id.to_string());
    }

    pub(crate) fn give_back(&mut self) {
        self.status = ItemStatus::Available;
        self.date_available = now_millis();
    }

    pub(crate) fn record_past_owner(&mut self, member_id: String) {
        self.past_owners.push(member_id);
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SN:{}", self.serial_number)?;
        writeln!(f, "{}[{}]", self.title, self.genre)?;
        writeln!(f, "by {} published by {}", self.author, self.publisher)?;
        match self.status {
            ItemStatus::OnLoan => writeln!(
                f,
                "on loan, available on {}",
                self.date_available.format("%Y-%m-%d")
            )?,
            ItemStatus::Reference => writeln!(f, "is a reference item")?,
            ItemStatus::Available => writeln!(f, "available")?,
        }
        match &self.kind {
            ItemKind::Book { pages } => write!(f, "number of pages: {}", pages),
            ItemKind::Dvd { size_mb } => write!(f, "DVD size: {}MB", size_mb),
        }
    }
}

/// Serial candidate derived from a local timestamp: last year digit, month,
/// day, hour, minute and second (`YMMDDhhmmss`). Two items created within the
/// same second share a candidate; see [`crate::models::Library::next_serial`].
pub fn serial_candidate(at: DateTime<Local>) -> SerialNumber {
    let year_digit = at.year().rem_euclid(10) as u64;
    [
        at.month(),
        at.day(),
        at.hour(),
        at.minute(),
        at.second(),
    ]
    .iter()
    .fold(year_digit, |acc, part| acc * 100 + u64::from(*part))
}

/// Current time truncated to the millisecond precision the items file keeps.
pub(crate) fn now_millis() -> DateTime<Utc> {
    let now = Utc::now();
    DateTime::<Utc>::from_timestamp_millis(now.timestamp_millis()).unwrap_or(now)
}

fn clamp_pages(pages: i64) -> u32 {
    u32::try_from(pages.max(i64::from(MIN_PAGES))).unwrap_or(u32::MAX)
}
