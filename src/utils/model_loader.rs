//! Artifact naming and lookup of the newest trained model

use crate::error::{CarPriceError, Result};
use crate::preprocessing::CanonicalColumns;
use crate::training::RandomForest;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

/// File name prefix of serialized forests
pub const MODEL_PREFIX: &str = "car_price_model";
/// File name prefix of canonical column lists
pub const COLUMNS_PREFIX: &str = "column_names";
const ARTIFACT_EXTENSION: &str = "json";

/// Paths of one saved training run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub columns: PathBuf,
}

/// Artifacts loaded from a models directory
#[derive(Debug, Clone)]
pub struct LoadedArtifacts {
    pub model: RandomForest,
    pub columns: CanonicalColumns,
    pub paths: ArtifactPaths,
}

/// Finds and loads the most recently written artifacts
pub struct ModelLoader;

impl ModelLoader {
    /// Load the newest model and the newest column list from `dir`.
    ///
    /// Each is picked independently by modification time.
    pub fn latest(dir: impl AsRef<Path>) -> Result<LoadedArtifacts> {
        let dir = dir.as_ref();
        let paths = ArtifactPaths {
            model: Self::newest(dir, MODEL_PREFIX)?,
            columns: Self::newest(dir, COLUMNS_PREFIX)?,
        };

        let json = std::fs::read_to_string(&paths.model)?;
        let model: RandomForest = serde_json::from_str(&json)?;
        if !model.is_fitted() {
            return Err(CarPriceError::ModelNotFitted);
        }
        let columns = CanonicalColumns::load(&paths.columns)?;

        info!(
            model = %paths.model.display(),
            columns = %paths.columns.display(),
            n_columns = columns.len(),
            "Loaded model artifacts"
        );

        Ok(LoadedArtifacts {
            model,
            columns,
            paths,
        })
    }

    /// Newest `<prefix>*.json` file in `dir`
    pub fn newest(dir: &Path, prefix: &str) -> Result<PathBuf> {
        let entries = std::fs::read_dir(dir).map_err(|e| {
            CarPriceError::ArtifactNotFound(format!("{}: {}", dir.display(), e))
        })?;

        let mut best: Option<(SystemTime, PathBuf)> = None;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !is_artifact(&path, prefix) {
                continue;
            }
            let modified = entry.metadata()?.modified()?;
            debug!(path = %path.display(), "Found artifact candidate");

            // Equal mtimes fall back to the name, whose timestamp sorts chronologically
            let newer = match &best {
                None => true,
                Some((t, p)) => (modified, &path) > (*t, p),
            };
            if newer {
                best = Some((modified, path));
            }
        }

        best.map(|(_, path)| path).ok_or_else(|| {
            CarPriceError::ArtifactNotFound(format!(
                "no {}*.{} file in {}",
                prefix,
                ARTIFACT_EXTENSION,
                dir.display()
            ))
        })
    }
}

fn is_artifact(path: &Path, prefix: &str) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(false, |n| n.starts_with(prefix));
    let has_ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map_or(false, |e| e == ARTIFACT_EXTENSION);
    path.is_file() && has_prefix && has_ext
}
