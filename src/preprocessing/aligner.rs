//! Inference-time feature alignment
//!
//! A prediction request is encoded on its own, without the training-time
//! reference categories, and then projected onto the canonical column set.
//! Columns the request does not produce are zero; columns the training run
//! never saw are discarded.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::columns::{CanonicalColumns, FeatureRow};
use super::encoder::{encode_category, indicator_column, CategoryLevels};
use super::parse::yes_flag;
use super::schema::{CategoricalField, ACCIDENT, CLEAN_TITLE, MILEAGE, MODEL_YEAR};

/// One prediction request. All fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarFeatures {
    pub model_year: i64,
    pub mileage: i64,
    pub brand: String,
    pub fuel_type: String,
    /// `"Yes"` or `"No"`
    pub accident: String,
    /// `"Yes"` or `"No"`
    pub clean_title: String,
    pub ext_col: String,
    pub int_col: String,
}

impl CarFeatures {
    fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Brand => &self.brand,
            CategoricalField::FuelType => &self.fuel_type,
            CategoricalField::ExtCol => &self.ext_col,
            CategoricalField::IntCol => &self.int_col,
            CategoricalField::CleanTitle => &self.clean_title,
        }
    }
}

/// Aligns requests to the column layout of one training run
#[derive(Debug, Clone)]
pub struct InputAligner {
    columns: CanonicalColumns,
}

impl InputAligner {
    pub fn new(columns: CanonicalColumns) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &CanonicalColumns {
        &self.columns
    }

    /// Encode a request into named values, before projection.
    ///
    /// Accident and clean title become 0/1 flags (only `"Yes"` counts), and
    /// each categorical field yields a single `{field}_{value}` indicator.
    pub fn encode(&self, car: &CarFeatures) -> HashMap<String, f64> {
        let mut encoded = HashMap::with_capacity(4 + CategoricalField::INFERENCE.len());
        encoded.insert(MODEL_YEAR.to_string(), car.model_year as f64);
        encoded.insert(MILEAGE.to_string(), car.mileage as f64);
        encoded.insert(ACCIDENT.to_string(), yes_flag(&car.accident));
        encoded.insert(CLEAN_TITLE.to_string(), yes_flag(&car.clean_title));

        for field in CategoricalField::INFERENCE {
            encoded.extend(encode_category(
                field.name(),
                car.category(field),
                &CategoryLevels::Open,
            ));
        }
        encoded
    }

    /// Whether `value` has its own indicator column for `field`
    pub fn is_known(&self, field: CategoricalField, value: &str) -> bool {
        self.columns.contains(&indicator_column(field.name(), value))
    }

    /// Canonical columns the request does not produce; these are zero-filled
    pub fn missing_columns(&self, car: &CarFeatures) -> Vec<String> {
        self.columns.missing_from(&self.encode(car))
    }

    /// Build the feature row in canonical order
    pub fn align(&self, car: &CarFeatures) -> FeatureRow {
        let encoded = self.encode(car);
        let row = self.columns.project(&encoded);
        debug_assert_eq!(row.len(), self.columns.len());
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bmw() -> CarFeatures {
        CarFeatures {
            model_year: 2021,
            mileage: 20000,
            brand: "BMW".to_string(),
            fuel_type: "Gasoline".to_string(),
            accident: "No".to_string(),
            clean_title: "Yes".to_string(),
            ext_col: "Black".to_string(),
            int_col: "Black".to_string(),
        }
    }

    fn columns() -> CanonicalColumns {
        CanonicalColumns::new([
            "model_year",
            "mileage",
            "accident",
            "clean_title",
            "brand_Ford",
            "fuel_type_Gasoline",
        ])
    }

    #[test]
    fn test_align_reference_scenario() {
        let aligner = InputAligner::new(columns());
        let row = aligner.align(&bmw());
        assert_eq!(row.values(), &[2021.0, 20000.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_encode_emits_request_indicators_only() {
        let aligner = InputAligner::new(columns());
        let encoded = aligner.encode(&bmw());
        assert_eq!(encoded.get("brand_BMW"), Some(&1.0));
        assert_eq!(encoded.get("ext_col_Black"), Some(&1.0));
        assert!(!encoded.contains_key("brand_Ford"));
        assert!(!encoded.keys().any(|k| k.starts_with("clean_title_")));
    }

    #[test]
    fn test_missing_columns() {
        let aligner = InputAligner::new(columns());
        assert_eq!(aligner.missing_columns(&bmw()), vec!["brand_Ford".to_string()]);
    }

    #[test]
    fn test_is_known() {
        let aligner = InputAligner::new(columns());
        assert!(aligner.is_known(CategoricalField::Brand, "Ford"));
        assert!(!aligner.is_known(CategoricalField::Brand, "BMW"));
        assert!(aligner.is_known(CategoricalField::FuelType, "Gasoline"));
    }

    #[test]
    fn test_unrecognized_accident_is_zero() {
        let aligner = InputAligner::new(columns());
        let mut car = bmw();
        car.accident = "Maybe".to_string();
        assert_eq!(aligner.align(&car).get("accident"), Some(0.0));
    }
}
