//! Training configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one training run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Raw CSV dataset
    pub data_path: PathBuf,

    /// Directory receiving the model and column artifacts
    pub models_dir: PathBuf,

    /// Fraction of rows held out for scoring
    pub test_split: f64,

    /// Seed for the split and the forest
    pub random_state: u64,

    /// Number of trees
    pub n_estimators: usize,

    /// Maximum depth of trees (None = grow until pure)
    pub max_depth: Option<usize>,

    /// Minimum samples per leaf
    pub min_samples_leaf: usize,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/used_cars.csv"),
            models_dir: PathBuf::from("models"),
            test_split: 0.2,
            random_state: 42,
            n_estimators: 100,
            max_depth: None,
            min_samples_leaf: 1,
        }
    }
}

impl TrainingConfig {
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Default::default()
        }
    }

    pub fn with_models_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.models_dir = dir.into();
        self
    }

    pub fn with_test_split(mut self, split: f64) -> Self {
        self.test_split = split;
        self
    }

    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = seed;
        self
    }

    /// Builder method to set number of estimators
    pub fn with_n_estimators(mut self, n: usize) -> Self {
        self.n_estimators = n;
        self
    }

    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    pub fn with_min_samples_leaf(mut self, n: usize) -> Self {
        self.min_samples_leaf = n;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TrainingConfig::default();
        assert_eq!(config.test_split, 0.2);
        assert_eq!(config.random_state, 42);
        assert_eq!(config.n_estimators, 100);
        assert!(config.max_depth.is_none());
    }

    #[test]
    fn test_builder() {
        let config = TrainingConfig::new("cars.csv")
            .with_n_estimators(10)
            .with_max_depth(5)
            .with_models_dir("/tmp/m");
        assert_eq!(config.data_path, PathBuf::from("cars.csv"));
        assert_eq!(config.n_estimators, 10);
        assert_eq!(config.max_depth, Some(5));
        assert_eq!(config.models_dir, PathBuf::from("/tmp/m"));
    }
}
