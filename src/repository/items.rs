//! Items file repository

use std::path::{Path, PathBuf};

use super::lines::{read_records, write_records};
use crate::{
    codec::Decoded,
    error::AppResult,
    models::{
        load_report::{LoadReport, RecordFile},
        Item, Library, SerialNumber,
    },
};

#[derive(Debug, Clone)]
pub struct ItemsRepository {
    path: PathBuf,
}

impl ItemsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the items file into `library`. Returns the raw past-owner lists
    /// keyed by serial number, left for reconciliation.
    pub fn load_into(
        &self,
        library: &mut Library,
        report: &mut LoadReport,
    ) -> AppResult<Vec<(SerialNumber, String)>> {
        let records = read_records::<Item>(&self.path, RecordFile::Items, report)?;
        let mut past_owners = Vec::new();

        for (line_number, Decoded { record, references }) in records {
            let serial = record.serial_number();
            match library.insert_item(record) {
                Ok(()) => {
                    if let Some(raw) = references {
                        past_owners.push((serial, raw));
                    }
                }
                Err(e) => report.skip_line(RecordFile::Items, line_number, e.to_string()),
            }
        }

        report.items_loaded = library.item_count();
        Ok(past_owners)
    }

    pub fn save(&self, library: &Library) -> AppResult<usize> {
        let written = write_records(&self.path, library.items())?;
        tracing::info!("Saved {} items to {}", written, self.path.display());
        Ok(written)
    }
}
