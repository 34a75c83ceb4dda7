//! Members file repository

use std::path::{Path, PathBuf};

use super::lines::{read_records, write_records};
use crate::{
    codec::Decoded,
    error::AppResult,
    models::{
        load_report::{LoadReport, RecordFile},
        Library, Member,
    },
};

#[derive(Debug, Clone)]
pub struct MembersRepository {
    path: PathBuf,
}

impl MembersRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decode the members file into `library`. Returns the raw borrowed-item
    /// lists keyed by member id, left for reconciliation.
    pub fn load_into(
        &self,
        library: &mut Library,
        report: &mut LoadReport,
    ) -> AppResult<Vec<(String, String)>> {
        let records = read_records::<Member>(&self.path, RecordFile::Members, report)?;
        let mut borrowed = Vec::new();

        for (line_number, Decoded { record, references }) in records {
            let id = record.id().to_string();
            match library.insert_member(record) {
                Ok(()) => {
                    if let Some(raw) = references {
                        borrowed.push((id, raw));
                    }
                }
                Err(e) => report.skip_line(RecordFile::Members, line_number, e.to_string()),
            }
        }

        report.members_loaded = library.member_count();
        Ok(borrowed)
    }

    pub fn save(&self, library: &Library) -> AppResult<usize> {
        let written = write_records(&self.path, library.members())?;
        tracing::info!("Saved {} members to {}", written, self.path.display());
        Ok(written)
    }
}
