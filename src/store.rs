use crate::config::StoreConfig;
use crate::core::model::SafetyIndex;
use crate::utils::fs::{ensure_parent_dir, resolve_path};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Stored {
    Saved { path: PathBuf },
    Failed { reason: String },
    Skipped,
}

fn local_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Utc::now().timestamp_millis())
}

fn append_line(path: &Path, index: &SafetyIndex) -> Result<()> {
    ensure_parent_dir(path)?;
    let line = serde_json::to_string(index).context("failed to serialize safety index")?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed opening {}", path.display()))?;
    writeln!(file, "{line}").with_context(|| format!("failed writing {}", path.display()))?;
    Ok(())
}

/// Stores the index as one JSON line. Storage is best-effort: on failure the
/// index comes back with a local id and the reason, never an error.
pub fn persist(mut index: SafetyIndex, cfg: &StoreConfig, cwd: &Path) -> (SafetyIndex, Stored) {
    if !cfg.enabled {
        index.id = local_id("unsaved");
        return (index, Stored::Skipped);
    }

    let path = resolve_path(cwd, &cfg.path);
    index.id = Uuid::new_v4().to_string();

    match append_line(&path, &index) {
        Ok(()) => {
            info!(id = %index.id, path = %path.display(), "safety index stored");
            (index, Stored::Saved { path })
        }
        Err(err) => {
            let reason = format!("{err:#}");
            warn!(error = %reason, "safety index not stored, returning computed value");
            index.id = local_id("mock-safety");
            (index, Stored::Failed { reason })
        }
    }
}
