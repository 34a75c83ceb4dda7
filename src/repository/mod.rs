//! Flat-file persistence: one file of members, one file of items.

mod lines;
pub mod items;
pub mod members;
mod reconcile;

use crate::{
    config::StorageConfig,
    error::AppResult,
    models::{Library, LoadReport},
};
use reconcile::{reconcile, PendingReferences};

/// Store owning the paths of both record files
#[derive(Debug, Clone)]
pub struct Repository {
    pub members: members::MembersRepository,
    pub items: items::ItemsRepository,
}

impl Repository {
    pub fn new(storage: &StorageConfig) -> Self {
        Self {
            members: members::MembersRepository::new(&storage.members_file),
            items: items::ItemsRepository::new(&storage.items_file),
        }
    }

    /// Load both files and relink members with the items they reference.
    pub fn load(&self) -> AppResult<Library> {
        self.load_with_report().map(|(library, _)| library)
    }

    /// Same as [`Repository::load`], also returning what was skipped or dropped.
    pub fn load_with_report(&self) -> AppResult<(Library, LoadReport)> {
        let mut library = Library::new();
        let mut report = LoadReport::default();

        let borrowed = self.members.load_into(&mut library, &mut report)?;
        let past_owners = self.items.load_into(&mut library, &mut report)?;
        reconcile(
            &mut library,
            PendingReferences {
                borrowed,
                past_owners,
            },
            &mut report,
        );

        for inconsistency in library.loan_inconsistencies() {
            tracing::warn!("Inconsistent loan record: {:?}", inconsistency);
        }
        tracing::info!(
            "Loaded {} members and {} items ({} lines skipped, {} references dropped)",
            report.members_loaded,
            report.items_loaded,
            report.skipped_lines.len(),
            report.dangling_references.len()
        );

        Ok((library, report))
    }

    /// Overwrite both files. Each file is attempted even if the other fails;
    /// a failure is not rolled back on the other file.
    pub fn save(&self, library: &Library) -> AppResult<()> {
        let members = self.members.save(library);
        if let Err(e) = &members {
            tracing::error!("Saving members to {} failed: {}", self.members.path().display(), e);
        }
        let items = self.items.save(library);
        if let Err(e) = &items {
            tracing::error!("Saving items to {} failed: {}", self.items.path().display(), e);
        }
        members.and(items).map(|_| ())
    }
}
