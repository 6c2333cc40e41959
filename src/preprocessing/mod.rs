//! Feature preprocessing for the used-car schema
//!
//! - [`DatasetEncoder`]: training-time cleaning and drop-first one-hot encoding
//! - [`InputAligner`]: inference-time encoding projected onto [`CanonicalColumns`]
//! - Raw field parsers shared by both paths

mod aligner;
mod columns;
mod dataset;
pub mod encoder;
pub mod parse;
pub mod schema;

pub use aligner::{CarFeatures, InputAligner};
pub use columns::{CanonicalColumns, FeatureRow};
pub use dataset::{drop_free_text, CarRecord, DatasetEncoder, EncodedDataset};
pub use encoder::{encode_category, indicator_column, CategoryLevels, OneHotEncoder};
pub use parse::{normalize_accident, parse_mileage, parse_price, yes_flag};
pub use schema::CategoricalField;
