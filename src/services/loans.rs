//! Loan management service: the borrow/return state machine.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    config::LendingConfig,
    error::AppResult,
    models::{ItemStatus, Library, MemberKind, SerialNumber},
};

/// Why a borrow was refused. Nothing is mutated when a borrow is refused.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum BorrowRefusal {
    /// The item is on loan or reference-only
    NotAvailable { status: ItemStatus },
    InsufficientBalance { price: f64, balance: f64 },
    CeilingReached { ceiling: usize },
}

impl std::fmt::Display for BorrowRefusal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BorrowRefusal::NotAvailable { status } => write!(f, "item is {}", status),
            BorrowRefusal::InsufficientBalance { price, balance } => {
                write!(f, "price ${:.2} exceeds balance ${:.2}", price, balance)
            }
            BorrowRefusal::CeilingReached { ceiling } => {
                write!(f, "student already holds {} items", ceiling)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum BorrowOutcome {
    Borrowed {
        due: DateTime<Utc>,
        /// Amount taken from a civilian balance, zero for students
        charged: f64,
    },
    Refused(BorrowRefusal),
}

impl BorrowOutcome {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, BorrowOutcome::Borrowed { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnOutcome {
    Returned,
    /// The member was not holding the item; nothing changed
    NotHeld,
}

#[derive(Debug, Clone)]
pub struct LoansService {
    lending: LendingConfig,
}

impl LoansService {
    pub fn new(lending: LendingConfig) -> Self {
        Self { lending }
    }

    pub fn lending(&self) -> &LendingConfig {
        &self.lending
    }

    /// Lend an item to a member.
    ///
    /// Unknown ids are errors; an ineligible member or unavailable item is a
    /// [`BorrowOutcome::Refused`] value.
    pub fn borrow(
        &self,
        library: &mut Library,
        member_id: &str,
        serial: SerialNumber,
    ) -> AppResult<BorrowOutcome> {
        let (member, item) = library.member_and_item_mut(member_id, serial)?;

        if item.status() != ItemStatus::Available {
            let reason = BorrowRefusal::NotAvailable {
                status: item.status(),
            };
            return Ok(self.refuse(member_id, serial, reason));
        }

        let price = item.price(&self.lending);
        let ceiling = self.lending.student_borrow_ceiling;
        let charged = match member.kind() {
            MemberKind::Civilian { balance } if price > *balance => {
                let reason = BorrowRefusal::InsufficientBalance {
                    price,
                    balance: *balance,
                };
                return Ok(self.refuse(member_id, serial, reason));
            }
            MemberKind::Civilian { .. } => price,
            MemberKind::Student if member.borrowed().len() >= ceiling => {
                let reason = BorrowRefusal::CeilingReached { ceiling };
                return Ok(self.refuse(member_id, serial, reason));
            }
            MemberKind::Student => 0.0,
        };

        item.lend_to(member_id, self.lending.loan_days);
        member.take(serial);
        member.charge(charged);

        tracing::debug!(
            "Member {} borrowed item {} until {} (charged {})",
            member_id,
            serial,
            item.date_available(),
            charged
        );
        Ok(BorrowOutcome::Borrowed {
            due: item.date_available(),
            charged,
        })
    }

    /// Take an item back from the member holding it.
    pub fn return_item(
        &self,
        library: &mut Library,
        member_id: &str,
        serial: SerialNumber,
    ) -> AppResult<ReturnOutcome> {
        let (member, item) = library.member_and_item_mut(member_id, serial)?;

        if !member.release(serial) {
            tracing::debug!("Member {} does not hold item {}", member_id, serial);
            return Ok(ReturnOutcome::NotHeld);
        }
        item.give_back();

        tracing::debug!("Member {} returned item {}", member_id, serial);
        Ok(ReturnOutcome::Returned)
    }

    fn refuse(
        &self,
        member_id: &str,
        serial: SerialNumber,
        reason: BorrowRefusal,
    ) -> BorrowOutcome {
        tracing::debug!("Refused loan of item {} to member {}: {}", serial, member_id, reason);
        BorrowOutcome::Refused(reason)
    }
}
