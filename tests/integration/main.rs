//! File-backed integration tests

mod loans_tests;
mod store_tests;

use std::fs;
use std::path::{Path, PathBuf};

use library_store::{config::StorageConfig, repository::Repository};

/// Fresh scratch directory under the system temp dir
pub fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("library-store-it-{}", uuid::Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("Failed to create scratch directory");
    dir
}

pub fn repository_in(dir: &Path) -> Repository {
    Repository::new(&StorageConfig {
        members_file: dir.join("members.txt"),
        items_file: dir.join("items.txt"),
    })
}

pub fn write(dir: &Path, file: &str, lines: &[&str]) {
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(dir.join(file), content).expect("Failed to write fixture");
}

pub fn read(dir: &Path, file: &str) -> String {
    fs::read_to_string(dir.join(file)).expect("Failed to read saved file")
}
