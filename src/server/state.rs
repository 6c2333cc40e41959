//! Application state management

use chrono::{DateTime, Utc};

use crate::error::CarPriceError;
use crate::monitoring::PredictionMetrics;
use crate::preprocessing::{CanonicalColumns, InputAligner};
use crate::training::Regressor;
use crate::utils::{ArtifactPaths, ModelLoader};

use super::error::Result;
use super::ServerConfig;

/// Application state shared across handlers.
///
/// Everything here is read-only after startup; a new model means a restart.
pub struct AppState {
    pub config: ServerConfig,
    pub model: Box<dyn Regressor>,
    pub aligner: InputAligner,
    pub metrics: PredictionMetrics,
    pub artifacts: Option<ArtifactPaths>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        model: Box<dyn Regressor>,
        columns: CanonicalColumns,
        artifacts: Option<ArtifactPaths>,
    ) -> Result<Self> {
        if model.n_features() != columns.len() {
            return Err(CarPriceError::ShapeError {
                expected: format!("{} model inputs", columns.len()),
                actual: format!("{} model inputs", model.n_features()),
            }
            .into());
        }

        Ok(Self {
            config,
            model,
            aligner: InputAligner::new(columns),
            metrics: PredictionMetrics::new()?,
            artifacts,
            started_at: Utc::now(),
        })
    }

    /// Build state from the newest artifacts in the configured models directory
    pub fn load(config: ServerConfig) -> Result<Self> {
        let loaded = ModelLoader::latest(&config.models_dir)?;
        Self::new(
            config,
            Box::new(loaded.model),
            loaded.columns,
            Some(loaded.paths),
        )
    }

    pub fn columns(&self) -> &CanonicalColumns {
        self.aligner.columns()
    }
}
