//! Post-decode resolution of cross-references.
//!
//! Members and items are decoded independently; their reference fields are
//! kept raw until both arenas are complete, then resolved by id lookup.

use crate::{
    codec::{split_references, LineRecord},
    models::{
        load_report::{LoadReport, ReferenceKind},
        Item, Library, Member, SerialNumber,
    },
};

/// Raw reference fields collected while decoding
#[derive(Debug, Default)]
pub(crate) struct PendingReferences {
    /// Borrowed serial lists, keyed by member id
    pub borrowed: Vec<(String, String)>,
    /// Past-owner id lists, keyed by item serial
    pub past_owners: Vec<(SerialNumber, String)>,
}

/// Run both resolution passes. Must be called once both files are decoded.
pub(crate) fn reconcile(
    library: &mut Library,
    pending: PendingReferences,
    report: &mut LoadReport,
) {
    resolve_past_owners(library, pending.past_owners, report);
    resolve_borrowed(library, pending.borrowed, report);
}

fn resolve_past_owners(
    library: &mut Library,
    pending: Vec<(SerialNumber, String)>,
    report: &mut LoadReport,
) {
    for (serial, raw) in pending {
        for member_id in split_references(&raw, Item::LIST_DELIMITER) {
            if library.find_member_by_id(&member_id).is_none() {
                report.dangling(ReferenceKind::PastOwner, serial.to_string(), member_id);
                continue;
            }
            if let Some(item) = library.find_item_by_serial_mut(serial) {
                item.record_past_owner(member_id);
            }
        }
    }
}

fn resolve_borrowed(
    library: &mut Library,
    pending: Vec<(String, String)>,
    report: &mut LoadReport,
) {
    for (member_id, raw) in pending {
        for entry in split_references(&raw, Member::LIST_DELIMITER) {
            let serial = match entry.trim().parse::<SerialNumber>() {
                Ok(serial) if library.find_item_by_serial(serial).is_some() => serial,
                _ => {
                    report.dangling(ReferenceKind::BorrowedItem, member_id.clone(), entry);
                    continue;
                }
            };
            if let Some(member) = library.find_member_by_id_mut(&member_id) {
                if member.holds(serial) {
                    tracing::debug!("Member {} lists item {} twice", member_id, serial);
                    continue;
                }
                member.take(serial);
            }
        }
    }
}
