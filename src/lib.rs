//! Car price prediction
//!
//! Trains a random forest on a used-car dataset and serves price predictions
//! over HTTP. The core is feature alignment between the two phases:
//!
//! - [`preprocessing`] - dataset cleaning, drop-first one-hot encoding and the
//!   inference-time aligner that projects requests onto the training columns
//! - [`training`] - regression trees, random forest and the training run
//! - [`utils`] - artifact naming and newest-artifact lookup
//! - [`monitoring`] - Prometheus collectors
//! - [`server`] - HTTP API
//! - [`cli`] - command-line interface

// Core error handling
pub mod error;
pub mod config;

// Core ML modules
pub mod preprocessing;
pub mod training;

// Infrastructure
pub mod monitoring;
pub mod utils;

// Services
pub mod server;
pub mod cli;

pub use error::{CarPriceError, Result};

/// Re-export commonly used types
pub mod prelude {
    // Error handling
    pub use crate::error::{CarPriceError, Result};

    // Preprocessing
    pub use crate::preprocessing::{
        CanonicalColumns, CarFeatures, DatasetEncoder, EncodedDataset, FeatureRow, InputAligner,
    };

    // Training
    pub use crate::training::{CarPriceTrainer, RandomForest, Regressor, TrainingConfig};

    // Artifacts
    pub use crate::utils::{ArtifactPaths, ModelLoader};

    // Server
    pub use crate::server::{create_router, AppState, ServerConfig};
}
