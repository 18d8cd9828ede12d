//! OWNERS serialization and the on-disk side effects of generation.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use owners_shared::{OWNERS_FILE_NAME, OwnersError, OwnersRecord, Result};
use tracing::info;

/// Ignore-list file name next to a chart.
pub const HELMIGNORE_FILE_NAME: &str = ".helmignore";

/// Block appended to the ignore list so packaged charts skip OWNERS.
pub const HELMIGNORE_ANNOTATION: &str = "# OWNERS file for Kubernetes\nOWNERS\n";

/// Serialize a record to OWNERS document text. Empty lists are omitted.
pub fn render_owners(owners: &OwnersRecord) -> Result<String> {
    serde_yaml::to_string(owners).map_err(|e| OwnersError::Serialize(e.to_string()))
}

/// Write `content` to `<dir>/OWNERS`, replacing any existing file.
pub fn write_owners_file(dir: &Path, content: &str) -> Result<PathBuf> {
    let path = dir.join(OWNERS_FILE_NAME);
    std::fs::write(&path, content).map_err(|e| OwnersError::io(&path, e))?;
    info!(path = %path.display(), "wrote OWNERS file");
    Ok(path)
}

/// Append the OWNERS annotation to `<dir>/.helmignore`, creating it if absent.
pub fn append_helmignore(dir: &Path) -> Result<PathBuf> {
    let path = dir.join(HELMIGNORE_FILE_NAME);
    let mut file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|e| OwnersError::io(&path, e))?;

    file.write_all(HELMIGNORE_ANNOTATION.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| OwnersError::io(&path, e))?;

    info!(path = %path.display(), "appended OWNERS to ignore list");
    Ok(path)
}
