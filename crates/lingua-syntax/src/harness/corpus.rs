//! On-disk fixture corpus discovery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::Fixture;
use crate::error::HarnessError;

/// Loads every fixture below `root` in sorted path order.
///
/// Hidden files and directories (names starting with `.`) are skipped, as
/// are files that are not UTF-8 or sit outside the `languages/<language>/`
/// layout. Each skipped file is logged at `warn` level.
/// `root` may be the `languages` directory itself or any ancestor of it.
///
/// # Errors
///
/// Returns [`HarnessError::Io`] when a directory cannot be listed or a
/// file cannot be read for reasons other than its encoding.
pub fn load_corpus(root: &Path) -> Result<Vec<Fixture>, HarnessError> {
    let mut files = Vec::new();
    collect_files(root, &mut files)?;
    files.sort();
    debug!(root = %root.display(), files = files.len(), "discovered fixture files");

    let mut fixtures = Vec::with_capacity(files.len());
    for path in files {
        let source = match fs::read_to_string(&path) {
            Ok(source) => source,
            Err(error) if error.kind() == io::ErrorKind::InvalidData => {
                warn!(path = %path.display(), "skipping fixture that is not UTF-8");
                continue;
            }
            Err(error) => return Err(HarnessError::io(&path, error)),
        };
        match Fixture::from_path(path, source) {
            Ok(fixture) => fixtures.push(fixture),
            Err(HarnessError::InvalidFixturePath { path, reason }) => {
                warn!(path = %path.display(), %reason, "skipping file outside the fixture layout");
            }
            Err(error) => return Err(error),
        }
    }
    Ok(fixtures)
}

fn collect_files(directory: &Path, files: &mut Vec<PathBuf>) -> Result<(), HarnessError> {
    let entries = fs::read_dir(directory).map_err(|error| HarnessError::io(directory, error))?;
    for item in entries {
        let entry = item.map_err(|error| HarnessError::io(directory, error))?;
        let path = entry.path();
        if is_hidden(&path) {
            continue;
        }
        let file_type = entry
            .file_type()
            .map_err(|error| HarnessError::io(&path, error))?;
        if file_type.is_dir() {
            collect_files(&path, files)?;
        } else if file_type.is_file() {
            files.push(path);
        }
    }
    Ok(())
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
