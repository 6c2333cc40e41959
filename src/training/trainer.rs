//! Car price training run
//!
//! Encodes the dataset, holds out a shuffled test split, fits a random forest
//! and writes the timestamped model and column artifacts.

use crate::error::{CarPriceError, Result};
use crate::preprocessing::{CanonicalColumns, DatasetEncoder, EncodedDataset};
use crate::utils::{ArtifactPaths, COLUMNS_PREFIX, MODEL_PREFIX};
use ndarray::Axis;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::info;

use super::config::TrainingConfig;
use super::metrics::RegressionMetrics;
use super::model::Regressor;
use super::random_forest::RandomForest;

/// Row indices of a train/test split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainTestSplit {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffle `0..n_samples` with a fixed seed and hold out `ceil(n * test_split)` rows.
pub fn train_test_split(n_samples: usize, test_split: f64, seed: u64) -> Result<TrainTestSplit> {
    if !(0.0..1.0).contains(&test_split) || test_split == 0.0 {
        return Err(CarPriceError::ValidationError(format!(
            "test split must be in (0, 1), got {}",
            test_split
        )));
    }

    let n_test = (n_samples as f64 * test_split).ceil() as usize;
    if n_test == 0 || n_test >= n_samples {
        return Err(CarPriceError::ValidationError(format!(
            "{} samples are too few for a {} test split",
            n_samples, test_split
        )));
    }

    let mut indices: Vec<usize> = (0..n_samples).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    indices.shuffle(&mut rng);

    let train = indices.split_off(n_test);
    Ok(TrainTestSplit {
        train,
        test: indices,
    })
}

/// A fitted forest together with the columns it was fitted on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainedCarModel {
    pub model: RandomForest,
    pub columns: CanonicalColumns,
    pub metrics: RegressionMetrics,
    pub n_train: usize,
    pub rows_dropped: usize,
    pub training_time_secs: f64,
}

impl TrainedCarModel {
    /// Write `car_price_model_<ts>.json` and `column_names_<ts>.json` into `dir`
    pub fn save_model(&self, dir: impl AsRef<Path>) -> Result<ArtifactPaths> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
        let paths = ArtifactPaths {
            model: dir.join(format!("{}_{}.json", MODEL_PREFIX, timestamp)),
            columns: dir.join(format!("{}_{}.json", COLUMNS_PREFIX, timestamp)),
        };

        let json = serde_json::to_string_pretty(&self.model)?;
        std::fs::write(&paths.model, json)?;
        self.columns.save(&paths.columns)?;

        info!(
            model = %paths.model.display(),
            columns = %paths.columns.display(),
            "Saved model artifacts"
        );
        Ok(paths)
    }
}

/// Runs the training pipeline for the used-car dataset
#[derive(Debug, Clone)]
pub struct CarPriceTrainer {
    config: TrainingConfig,
    encoder: DatasetEncoder,
}

impl CarPriceTrainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            encoder: DatasetEncoder::new(),
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Load the configured CSV and train on it
    pub fn train(&self) -> Result<TrainedCarModel> {
        let dataset = self.encoder.load_and_encode(&self.config.data_path)?;
        self.train_encoded(&dataset)
    }

    /// Train on an already encoded dataset
    pub fn train_encoded(&self, dataset: &EncodedDataset) -> Result<TrainedCarModel> {
        let start = Instant::now();
        let split = train_test_split(
            dataset.n_samples(),
            self.config.test_split,
            self.config.random_state,
        )?;

        let x_train = dataset.features.select(Axis(0), &split.train);
        let y_train = dataset.target.select(Axis(0), &split.train);
        let x_test = dataset.features.select(Axis(0), &split.test);
        let y_test = dataset.target.select(Axis(0), &split.test);

        let mut model = RandomForest::new(self.config.n_estimators)
            .with_random_state(self.config.random_state)
            .with_min_samples_leaf(self.config.min_samples_leaf);
        if let Some(depth) = self.config.max_depth {
            model = model.with_max_depth(depth);
        }
        Regressor::fit(&mut model, &x_train, &y_train)?;

        let y_pred = Regressor::predict(&model, &x_test)?;
        let metrics = RegressionMetrics::compute(&y_test, &y_pred);
        let training_time_secs = start.elapsed().as_secs_f64();

        info!(
            r2 = metrics.r2,
            rmse = metrics.rmse,
            train_rows = split.train.len(),
            test_rows = split.test.len(),
            secs = training_time_secs,
            "Model trained"
        );

        Ok(TrainedCarModel {
            model,
            columns: dataset.columns.clone(),
            metrics,
            n_train: split.train.len(),
            rows_dropped: dataset.rows_dropped,
            training_time_secs,
        })
    }

    /// Train and save artifacts into the configured models directory
    pub fn train_and_save(&self) -> Result<(TrainedCarModel, ArtifactPaths)> {
        let trained = self.train()?;
        let paths = trained.save_model(&self.config.models_dir)?;
        Ok((trained, paths))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes() {
        let split = train_test_split(10, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 2);
        assert_eq!(split.train.len(), 8);

        let all: HashSet<usize> = split.train.iter().chain(split.test.iter()).copied().collect();
        assert_eq!(all.len(), 10);
    }

    #[test]
    fn test_split_rounds_test_up() {
        let split = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 3);
    }

    #[test]
    fn test_split_is_deterministic() {
        assert_eq!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 42).unwrap()
        );
        assert_ne!(
            train_test_split(50, 0.2, 42).unwrap(),
            train_test_split(50, 0.2, 43).unwrap()
        );
    }

    #[test]
    fn test_split_rejects_tiny_or_bad_ratio() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(10, 0.0, 42).is_err());
        assert!(train_test_split(10, 1.0, 42).is_err());
    }
}
