//! Utility functions and types

mod model_loader;

pub use model_loader::{
    ArtifactPaths, LoadedArtifacts, ModelLoader, COLUMNS_PREFIX, MODEL_PREFIX,
};
