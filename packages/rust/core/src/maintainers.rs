//! Chart metadata loading.

use std::path::Path;

use owners_shared::{ChartMetadata, Maintainer, OwnersError, Result};
use tracing::debug;

/// Load `Chart.yaml` and return its maintainers in document order.
pub fn read_maintainers(chart_path: &Path) -> Result<Vec<Maintainer>> {
    let chart = load_chart(chart_path)?;
    debug!(
        chart = chart.name.as_deref().unwrap_or("<unnamed>"),
        maintainers = chart.maintainers.len(),
        "loaded chart metadata"
    );
    Ok(chart.maintainers)
}

/// Parse a chart metadata file.
pub fn load_chart(chart_path: &Path) -> Result<ChartMetadata> {
    let content = std::fs::read_to_string(chart_path)
        .map_err(|e| OwnersError::load(format!("{}: {e}", chart_path.display())))?;

    serde_yaml::from_str(&content)
        .map_err(|e| OwnersError::load(format!("{}: {e}", chart_path.display())))
}
