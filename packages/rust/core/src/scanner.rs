//! OWNERS discovery: walk a tree, parse every marker file, collect handles.

use std::collections::BTreeSet;
use std::path::Path;

use owners_shared::{OWNERS_FILE_NAME, OwnersError, OwnersRecord, Result};
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

// ---------------------------------------------------------------------------
// HandleSet
// ---------------------------------------------------------------------------

/// Deduplicated handles gathered from OWNERS files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HandleSet {
    handles: BTreeSet<String>,
}

impl HandleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a handle. Re-adding an existing handle is a no-op.
    pub fn add(&mut self, handle: &str) {
        if !self.handles.contains(handle) {
            self.handles.insert(handle.to_string());
        }
    }

    /// Add every approver and reviewer of `record`.
    pub fn add_record(&mut self, record: &OwnersRecord) {
        for handle in record.handles() {
            self.add(handle);
        }
    }

    pub fn contains(&self, handle: &str) -> bool {
        self.handles.contains(handle)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.handles.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for HandleSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for handle in iter {
            set.add(handle);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// Tree scan
// ---------------------------------------------------------------------------

/// Read and parse a single OWNERS file.
pub fn read_owners(path: &Path) -> Result<OwnersRecord> {
    let content = std::fs::read_to_string(path).map_err(|e| OwnersError::io(path, e))?;
    parse_owners(&content).map_err(|e| OwnersError::parse(path, e.to_string()))
}

/// Parse OWNERS document text. An empty document is an empty record.
pub fn parse_owners(content: &str) -> std::result::Result<OwnersRecord, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(OwnersRecord::default());
    }
    serde_yaml::from_str(content)
}

/// Walk `root` and collect the handles of every file named `OWNERS`.
///
/// Fails fast: the first walk, read, or parse error aborts the scan and no
/// partial set is returned. Symlinks are not followed.
#[instrument(skip_all, fields(root = %root.display()))]
pub fn scan_tree(root: &Path) -> Result<HandleSet> {
    let mut handles = HandleSet::new();
    let mut files = 0usize;

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| OwnersError::Walk(e.to_string()))?;
        if entry.file_type().is_dir() || entry.file_name() != OWNERS_FILE_NAME {
            continue;
        }

        let record = read_owners(entry.path())?;
        debug!(
            path = %entry.path().display(),
            approvers = record.approvers.len(),
            reviewers = record.reviewers.len(),
            "read OWNERS"
        );
        handles.add_record(&record);
        files += 1;
    }

    info!(files, handles = handles.len(), "scanned OWNERS files");
    Ok(handles)
}
