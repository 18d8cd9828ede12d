//! End-to-end generate pipeline: Chart.yaml → maintainers → handles → OWNERS.

use std::path::{Path, PathBuf};

use owners_github::Platform;
use owners_shared::{GenerateConfig, OwnersRecord, Result};
use tracing::{info, instrument};

use crate::alias;
use crate::maintainers;
use crate::resolver::{self, ResolvedMaintainer};
use crate::writer;

/// Progress callback for announcing side effects before they happen.
pub trait ProgressReporter {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
}

/// OWNERS content built from a chart, not yet persisted.
#[derive(Debug)]
pub struct GeneratedOwners {
    /// Final approver/reviewer lists.
    pub owners: OwnersRecord,
    /// Per-maintainer resolution outcomes, in chart order.
    pub resolved: Vec<ResolvedMaintainer>,
    /// Serialized OWNERS document.
    pub content: String,
}

/// Paths touched by [`persist`].
#[derive(Debug, Default)]
pub struct PersistResult {
    pub owners_path: Option<PathBuf>,
    pub helmignore_path: Option<PathBuf>,
}

/// Directory holding the chart file; OWNERS and `.helmignore` live there too.
pub fn chart_dir(chart_path: &Path) -> &Path {
    chart_path.parent().unwrap_or_else(|| Path::new("."))
}

/// Build the OWNERS document for a chart.
///
/// 1. Load maintainers (fatal on error)
/// 2. Resolve each maintainer to a handle (per-maintainer failures contribute nothing)
/// 3. Expand the bot alias, if enabled
/// 4. Serialize
#[instrument(skip_all, fields(chart = %config.chart_path.display()))]
pub async fn build<P: Platform>(config: &GenerateConfig, platform: &P) -> Result<GeneratedOwners> {
    let maintainers = maintainers::read_maintainers(&config.chart_path)?;

    let (mut owners, resolved) = resolver::resolve_all(platform, &maintainers).await;

    if config.expand_alias {
        alias::expand_aliases(&mut owners, &config.alias);
    }

    let content = writer::render_owners(&owners)?;

    info!(
        maintainers = maintainers.len(),
        approvers = owners.approvers.len(),
        reviewers = owners.reviewers.len(),
        "generated OWNERS"
    );

    Ok(GeneratedOwners {
        owners,
        resolved,
        content,
    })
}

/// Write OWNERS and update `.helmignore` as configured. Any I/O error is fatal.
pub fn persist(
    config: &GenerateConfig,
    generated: &GeneratedOwners,
    progress: &dyn ProgressReporter,
) -> Result<PersistResult> {
    let dir = chart_dir(&config.chart_path);
    let mut result = PersistResult::default();

    if config.write_owners {
        progress.phase("Writing owners file");
        result.owners_path = Some(writer::write_owners_file(dir, &generated.content)?);
    }

    if config.update_helmignore {
        progress.phase("Appending OWNERS to .helmignore");
        result.helmignore_path = Some(writer::append_helmignore(dir)?);
    }

    Ok(result)
}
