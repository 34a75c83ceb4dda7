//! Whole-file reading and writing of line records

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use crate::{
    codec::{Decoded, LineRecord},
    error::AppResult,
    models::load_report::{LoadReport, RecordFile},
};

/// Decode every non-blank line of `path`. A missing file yields no records;
/// lines that fail to decode are recorded in the report and skipped.
pub(crate) fn read_records<T: LineRecord>(
    path: &Path,
    file: RecordFile,
    report: &mut LoadReport,
) -> AppResult<Vec<(usize, Decoded<T>)>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!("{} not found, starting with no {:?}", path.display(), file);
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match T::decode_line(line) {
            Ok(decoded) => records.push((index + 1, decoded)),
            Err(e) => report.skip_line(file, index + 1, e.to_string()),
        }
    }
    Ok(records)
}

/// Replace `path` with one line per record. The content is encoded in full
/// before the file is truncated.
pub(crate) fn write_records<'a, T, I>(path: &Path, records: I) -> AppResult<usize>
where
    T: LineRecord + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let mut content = String::new();
    let mut count = 0;
    for record in records {
        content.push_str(&record.encode_line());
        content.push('\n');
        count += 1;
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(count)
}
