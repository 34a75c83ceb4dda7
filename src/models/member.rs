//! Member model (students and civilians)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::enums::Gender;
use super::item::SerialNumber;

pub const MIN_AGE: u32 = 18;

/// Balance given to civilians whose balance is zero, negative or unreadable
pub const DEFAULT_BALANCE: f64 = 50.0;

/// Phone number recorded when none of the accepted formats matches
pub const DEFAULT_PHONE: &str = "00-000000";

/// `12-345678` or `+961-71-123456`
static PHONE_FORMATS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"^\d{2}-\d{6}$").expect("valid local phone pattern"),
        Regex::new(r"^\+\d{3}-\d{2}-\d{6}$").expect("valid international phone pattern"),
    ]
});

pub fn is_valid_phone_number(phone_number: &str) -> bool {
    PHONE_FORMATS.iter().any(|re| re.is_match(phone_number))
}

/// Variant-specific part of a member
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberKind {
    /// Pays for each loan out of a prepaid balance
    Civilian { balance: f64 },
    /// Limited by the shared student borrow ceiling
    Student,
}

impl MemberKind {
    pub fn civilian(balance: f64) -> Self {
        MemberKind::Civilian {
            balance: clamp_balance(balance),
        }
    }

    /// Persisted kind tag
    pub fn tag(&self) -> char {
        match self {
            MemberKind::Civilian { .. } => 'C',
            MemberKind::Student => 'S',
        }
    }
}

/// Personal details, normalised when a member is built from them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberDetails {
    pub name: String,
    pub address: String,
    pub gender: char,
    pub age: i64,
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Member {
    id: String,
    pub name: String,
    pub address: String,
    gender: Gender,
    age: u32,
    phone_number: String,
    borrowed: Vec<SerialNumber>,
    kind: MemberKind,
}

impl Member {
    pub fn new(id: &str, details: MemberDetails, kind: MemberKind) -> Self {
        let mut member = Self {
            id: id.to_string(),
            name: details.name,
            address: details.address,
            gender: Gender::from(details.gender),
            age: MIN_AGE,
            phone_number: DEFAULT_PHONE.to_string(),
            borrowed: Vec::new(),
            kind,
        };
        member.set_age(details.age);
        member.set_phone_number(&details.phone_number);
        member
    }

    pub fn student(id: &str, details: MemberDetails) -> Self {
        Self::new(id, details, MemberKind::Student)
    }

    pub fn civilian(id: &str, details: MemberDetails, balance: f64) -> Self {
        Self::new(id, details, MemberKind::civilian(balance))
    }

    /// Rebuild a member as it was persisted. A stored balance is kept as long
    /// as it is a finite, non-negative amount; zero is a legal balance once a
    /// civilian has spent everything.
    pub(crate) fn restore(id: &str, details: MemberDetails, balance: Option<f64>) -> Self {
        let kind = match balance {
            Some(balance) if balance.is_finite() && balance >= 0.0 => {
                MemberKind::Civilian { balance }
            }
            Some(balance) => MemberKind::civilian(balance),
            None => MemberKind::Student,
        };
        Self::new(id, details, kind)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    /// Serial numbers of the items currently held, in borrowing order
    pub fn borrowed(&self) -> &[SerialNumber] {
        &self.borrowed
    }

    pub fn holds(&self, serial: SerialNumber) -> bool {
        self.borrowed.contains(&serial)
    }

    /// Civilian balance, `None` for students
    pub fn balance(&self) -> Option<f64> {
        match self.kind {
            MemberKind::Civilian { balance } => Some(balance),
            MemberKind::Student => None,
        }
    }

    pub fn set_gender(&mut self, code: char) {
        self.gender = Gender::from(code);
    }

    /// Ages under 18 are recorded as 18.
    pub fn set_age(&mut self, age: i64) {
        self.age = u32::try_from(age.max(i64::from(MIN_AGE))).unwrap_or(u32::MAX);
    }

    /// Keeps the previous number when the trimmed input matches neither format.
    pub fn set_phone_number(&mut self, phone_number: &str) -> bool {
        let trimmed = phone_number.trim();
        if is_valid_phone_number(trimmed) {
            self.phone_number = trimmed.to_string();
            true
        } else {
            false
        }
    }

    /// Credit a civilian balance. Non-positive amounts and students are ignored.
    pub fn add_credit(&mut self, amount: f64) -> bool {
        match &mut self.kind {
            MemberKind::Civilian { balance } if amount > 0.0 => {
                *balance = clamp_balance(*balance + amount);
                true
            }
            _ => false,
        }
    }

    pub(crate) fn charge(&mut self, amount: f64) {
        if let MemberKind::Civilian { balance } = &mut self.kind {
            *balance -= amount;
        }
    }

    pub(crate) fn take(&mut self, serial: SerialNumber) {
        self.borrowed.push(serial);
    }

    pub(crate) fn release(&mut self, serial: SerialNumber) -> bool {
        match self.borrowed.iter().position(|held| *held == serial) {
            Some(index) => {
                self.borrowed.remove(index);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Display for Member {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            MemberKind::Student => writeln!(f, "Student ID: {}", self.id)?,
            MemberKind::Civilian { .. } => writeln!(f, "ID: {}", self.id)?,
        }
        writeln!(
            f,
            "{}, {} {}, residence:{}",
            self.name, self.age, self.gender, self.address
        )?;
        writeln!(f, "phone number: {}", self.phone_number)?;
        if let MemberKind::Civilian { balance } = self.kind {
            writeln!(f, "current Balance: ${:.2}", balance)?;
        }
        write!(f, "number of borrowed items: {}", self.borrowed.len())
    }
}

fn clamp_balance(balance: f64) -> f64 {
    if balance > 0.0 {
        balance
    } else {
        DEFAULT_BALANCE
    }
}
