//! Catalog management service

use chrono::Local;

use crate::{
    config::LendingConfig,
    error::{AppError, AppResult},
    models::{
        Item, ItemDetails, ItemKind, ItemStatus, Library, Member, MemberDetails, MemberKind,
        SerialNumber,
    },
};

#[derive(Debug, Clone)]
pub struct CatalogService {
    lending: LendingConfig,
}

impl CatalogService {
    pub fn new(lending: LendingConfig) -> Self {
        Self { lending }
    }

    /// Register a new item under a fresh serial number.
    ///
    /// The status code follows the usual normalisation, except that an item
    /// cannot be created on loan: it has no borrower yet.
    pub fn add_item(
        &self,
        library: &mut Library,
        details: ItemDetails,
        kind: ItemKind,
        status: char,
    ) -> AppResult<SerialNumber> {
        if ItemStatus::from(status) == ItemStatus::OnLoan {
            return Err(AppError::BusinessRule(
                "A new item cannot be registered as on loan".to_string(),
            ));
        }
        let serial = library.next_serial(Local::now());
        let mut item = Item::new(serial, details, kind);
        item.set_status(status, self.lending.loan_days);
        library.insert_item(item)?;

        tracing::info!("Registered item {}", serial);
        Ok(serial)
    }

    /// Register a new member. Ids are assigned by the caller and must be unused.
    pub fn add_member(
        &self,
        library: &mut Library,
        id: &str,
        details: MemberDetails,
        kind: MemberKind,
    ) -> AppResult<()> {
        let id = id.trim();
        if id.is_empty() {
            return Err(AppError::BusinessRule("Member id cannot be empty".to_string()));
        }
        library.insert_member(Member::new(id, details, kind))?;

        tracing::info!("Registered member {}", id);
        Ok(())
    }

    /// Delete an item. Items on loan cannot be deleted.
    pub fn remove_item(&self, library: &mut Library, serial: SerialNumber) -> AppResult<Item> {
        let item = library.find_item_by_serial(serial).ok_or_else(|| {
            AppError::NotFound(format!("Item with serial number {} not found", serial))
        })?;
        if item.status() == ItemStatus::OnLoan {
            return Err(AppError::BusinessRule(format!(
                "Item {} is on loan and cannot be deleted",
                serial
            )));
        }

        let removed = library.remove_item(serial).ok_or_else(|| {
            AppError::NotFound(format!("Item with serial number {} not found", serial))
        })?;
        tracing::info!("Deleted item {}", serial);
        Ok(removed)
    }

    /// Delete a member. Members still holding items cannot be deleted.
    pub fn remove_member(&self, library: &mut Library, id: &str) -> AppResult<Member> {
        let member = library
            .find_member_by_id(id)
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))?;
        if !member.borrowed().is_empty() {
            return Err(AppError::BusinessRule(format!(
                "Member {} still holds {} items",
                id,
                member.borrowed().len()
            )));
        }

        let removed = library
            .remove_member(id)
            .ok_or_else(|| AppError::NotFound(format!("Member with id {} not found", id)))?;
        tracing::info!("Deleted member {}", id);
        Ok(removed)
    }

    /// Direct status edit. Only loans and returns move an item into or out
    /// of the on-loan state.
    pub fn set_item_status(
        &self,
        library: &mut Library,
        serial: SerialNumber,
        code: char,
    ) -> AppResult<ItemStatus> {
        let item = library.find_item_by_serial_mut(serial).ok_or_else(|| {
            AppError::NotFound(format!("Item with serial number {} not found", serial))
        })?;
        let wanted = ItemStatus::from(code);
        if item.status() == ItemStatus::OnLoan || wanted == ItemStatus::OnLoan {
            return Err(AppError::BusinessRule(format!(
                "Item {} cannot be edited from {} to {}",
                serial,
                item.status(),
                wanted
            )));
        }

        item.set_status(code, self.lending.loan_days);
        Ok(item.status())
    }

    /// Look a member up by id, falling back to a case-insensitive name match.
    pub fn find_member<'a>(&self, library: &'a Library, query: &str) -> AppResult<&'a Member> {
        let query = query.trim();
        library
            .find_member_by_id(query)
            .or_else(|| library.find_member_by_name(query))
            .ok_or_else(|| AppError::NotFound(format!("No member matches {}", query)))
    }

    pub fn find_item(&self, library: &Library, serial: SerialNumber) -> AppResult<Item> {
        library
            .find_item_by_serial(serial)
            .cloned()
            .ok_or_else(|| {
                AppError::NotFound(format!("Item with serial number {} not found", serial))
            })
    }

    /// Price of an item under the current lending policy
    pub fn price_of(&self, library: &Library, serial: SerialNumber) -> AppResult<f64> {
        library
            .find_item_by_serial(serial)
            .map(|item| item.price(&self.lending))
            .ok_or_else(|| {
                AppError::NotFound(format!("Item with serial number {} not found", serial))
            })
    }
}
