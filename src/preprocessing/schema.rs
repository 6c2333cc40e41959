//! Fixed car attribute schema shared by training and inference

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw mileage column name as spelled in the source dataset
pub const MILEAGE_SOURCE: &str = "milage";
/// Target column
pub const PRICE: &str = "price";
pub const MODEL_YEAR: &str = "model_year";
pub const MILEAGE: &str = "mileage";
pub const ACCIDENT: &str = "accident";
pub const CLEAN_TITLE: &str = "clean_title";

/// Free-text columns removed before encoding
pub const FREE_TEXT_COLUMNS: [&str; 3] = ["engine", "transmission", "model"];

/// Numeric feature columns, in the order they lead the canonical column set
pub const NUMERIC_FEATURES: [&str; 3] = [MODEL_YEAR, MILEAGE, ACCIDENT];

/// Categorical car attributes that are one-hot encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalField {
    Brand,
    FuelType,
    ExtCol,
    IntCol,
    CleanTitle,
}

impl CategoricalField {
    /// Fields encoded when building the training matrix
    pub const TRAINING: [CategoricalField; 5] = [
        CategoricalField::Brand,
        CategoricalField::FuelType,
        CategoricalField::ExtCol,
        CategoricalField::IntCol,
        CategoricalField::CleanTitle,
    ];

    /// Fields encoded for a prediction request. `clean_title` is a 0/1 flag there.
    pub const INFERENCE: [CategoricalField; 4] = [
        CategoricalField::Brand,
        CategoricalField::FuelType,
        CategoricalField::ExtCol,
        CategoricalField::IntCol,
    ];

    /// Column name in the raw dataset and the request body
    pub fn name(&self) -> &'static str {
        match self {
            CategoricalField::Brand => "brand",
            CategoricalField::FuelType => "fuel_type",
            CategoricalField::ExtCol => "ext_col",
            CategoricalField::IntCol => "int_col",
            CategoricalField::CleanTitle => CLEAN_TITLE,
        }
    }
}

impl fmt::Display for CategoricalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
