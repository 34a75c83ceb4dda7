//! In-memory catalogue: one arena of members keyed by id and one arena of
//! items keyed by serial number, both kept in insertion (file) order.

use chrono::{DateTime, Local};
use indexmap::IndexMap;
use serde::Serialize;

use super::enums::ItemStatus;
use super::item::{serial_candidate, Item, SerialNumber};
use super::member::Member;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Default)]
pub struct Library {
    members: IndexMap<String, Member>,
    items: IndexMap<SerialNumber, Item>,
}

/// A break in the link between a member's borrowed list and an item's status
/// and borrowing history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoanInconsistency {
    /// The member lists an item that is not on loan
    HeldButNotOnLoan { member_id: String, serial: SerialNumber },
    /// The member lists an item whose latest borrower is someone else
    HeldByOtherBorrower {
        member_id: String,
        serial: SerialNumber,
        last_owner: Option<String>,
    },
    /// The item is on loan but its latest borrower does not list it
    OnLoanButNotHeld { serial: SerialNumber },
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn members(&self) -> impl Iterator<Item = &Member> {
        self.members.values()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn find_member_by_id(&self, id: &str) -> Option<&Member> {
        self.members.get(id)
    }

    pub fn find_member_by_id_mut(&mut self, id: &str) -> Option<&mut Member> {
        self.members.get_mut(id)
    }

    /// First member whose name matches, ignoring case
    pub fn find_member_by_name(&self, name: &str) -> Option<&Member> {
        let wanted = name.to_lowercase();
        self.members
            .values()
            .find(|member| member.name.to_lowercase() == wanted)
    }

    pub fn find_item_by_serial(&self, serial: SerialNumber) -> Option<&Item> {
        self.items.get(&serial)
    }

    pub fn find_item_by_serial_mut(&mut self, serial: SerialNumber) -> Option<&mut Item> {
        self.items.get_mut(&serial)
    }

    /// Every item whose title matches exactly, ignoring case
    pub fn find_items_by_title(&self, title: &str) -> Vec<&Item> {
        let wanted = title.to_lowercase();
        self.items
            .values()
            .filter(|item| item.title.to_lowercase() == wanted)
            .collect()
    }

    pub fn available_items(&self) -> Vec<&Item> {
        self.items
            .values()
            .filter(|item| item.status() == ItemStatus::Available)
            .collect()
    }

    pub fn insert_member(&mut self, member: Member) -> AppResult<()> {
        if self.members.contains_key(member.id()) {
            return Err(AppError::Conflict(format!(
                "Member with id {} already exists",
                member.id()
            )));
        }
        self.members.insert(member.id().to_string(), member);
        Ok(())
    }

    pub fn insert_item(&mut self, item: Item) -> AppResult<()> {
        if self.items.contains_key(&item.serial_number()) {
            return Err(AppError::Conflict(format!(
                "Item with serial number {} already exists",
                item.serial_number()
            )));
        }
        self.items.insert(item.serial_number(), item);
        Ok(())
    }

    pub(crate) fn remove_member(&mut self, id: &str) -> Option<Member> {
        self.members.shift_remove(id)
    }

    pub(crate) fn remove_item(&mut self, serial: SerialNumber) -> Option<Item> {
        self.items.shift_remove(&serial)
    }

    /// Serial number for an item created at `at`. The timestamp-derived
    /// candidate is stepped up until it is unused, so items created within the
    /// same second still get distinct serials.
    pub fn next_serial(&self, at: DateTime<Local>) -> SerialNumber {
        let mut serial = serial_candidate(at);
        while self.items.contains_key(&serial) {
            serial += 1;
        }
        serial
    }

    /// Both sides of a loan, borrowed mutably at once.
    pub(crate) fn member_and_item_mut(
        &mut self,
        member_id: &str,
        serial: SerialNumber,
    ) -> AppResult<(&mut Member, &mut Item)> {
        let member = self
            .members
            .get_mut(member_id)
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", member_id)))?;
        let item = self.items.get_mut(&serial).ok_or_else(|| {
            AppError::NotFound(format!("Item with serial number {} not found", serial))
        })?;
        Ok((member, item))
    }

    /// Report every loan whose two views disagree. Nothing is repaired.
    pub fn loan_inconsistencies(&self) -> Vec<LoanInconsistency> {
        let mut found = Vec::new();

        for member in self.members.values() {
            for serial in member.borrowed() {
                let Some(item) = self.items.get(serial) else {
                    continue;
                };
                if item.status() != ItemStatus::OnLoan {
                    found.push(LoanInconsistency::HeldButNotOnLoan {
                        member_id: member.id().to_string(),
                        serial: *serial,
                    });
                } else if item.current_borrower() != Some(member.id()) {
                    found.push(LoanInconsistency::HeldByOtherBorrower {
                        member_id: member.id().to_string(),
                        serial: *serial,
                        last_owner: item.current_borrower().map(str::to_string),
                    });
                }
            }
        }

        for item in self.items.values() {
            let held = item
                .current_borrower()
                .and_then(|id| self.members.get(id))
                .is_some_and(|member| member.holds(item.serial_number()));
            if item.status() == ItemStatus::OnLoan && !held {
                found.push(LoanInconsistency::OnLoanButNotHeld {
                    serial: item.serial_number(),
                });
            }
        }

        found
    }
}
