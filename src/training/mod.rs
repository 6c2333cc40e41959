//! Price model training
//!
//! - [`RandomForest`] regressor built from [`DecisionTree`]s
//! - [`Regressor`] trait used by the server
//! - [`CarPriceTrainer`] for the split/fit/score/save run

mod config;
mod metrics;
mod model;
mod trainer;
pub mod decision_tree;
pub mod random_forest;

pub use config::TrainingConfig;
pub use decision_tree::{DecisionTree, TreeNode};
pub use metrics::RegressionMetrics;
pub use model::Regressor;
pub use random_forest::{MaxFeatures, RandomForest};
pub use trainer::{train_test_split, CarPriceTrainer, TrainTestSplit, TrainedCarModel};
