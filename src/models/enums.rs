//! Shared domain enums and their single-character codes

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ItemStatus
// ---------------------------------------------------------------------------

/// Lending status of a catalogue item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    #[default]
    Available,
    /// Consultation only, never lent
    Reference,
    OnLoan,
}

impl ItemStatus {
    /// Persisted status code, always lowercase
    pub fn as_code(&self) -> char {
        match self {
            ItemStatus::Available => 'a',
            ItemStatus::Reference => 'r',
            ItemStatus::OnLoan => 'o',
        }
    }
}

/// Unknown codes fall back to available.
impl From<char> for ItemStatus {
    fn from(c: char) -> Self {
        match c {
            'r' | 'R' => ItemStatus::Reference,
            'o' | 'O' => ItemStatus::OnLoan,
            _ => ItemStatus::Available,
        }
    }
}

impl std::fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ItemStatus::Available => "available",
            ItemStatus::Reference => "reference",
            ItemStatus::OnLoan => "on loan",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_code(&self) -> char {
        match self {
            Gender::Male => 'M',
            Gender::Female => 'F',
        }
    }
}

/// Anything other than `f`/`F` is recorded as male.
impl From<char> for Gender {
    fn from(c: char) -> Self {
        match c {
            'f' | 'F' => Gender::Female,
            _ => Gender::Male,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}
