//! Canonical column set and aligned feature rows

use crate::error::{CarPriceError, Result};
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Ordered feature names produced by one training run.
///
/// Immutable once built; clones share the same backing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CanonicalColumns {
    names: Arc<Vec<String>>,
}

impl CanonicalColumns {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Arc::new(names.into_iter().map(Into::into).collect()),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Canonical columns that `present` does not provide
    pub fn missing_from(&self, present: &HashMap<String, f64>) -> Vec<String> {
        self.names
            .iter()
            .filter(|name| !present.contains_key(name.as_str()))
            .cloned()
            .collect()
    }

    /// Strict projection onto the canonical order.
    ///
    /// Names absent from `values` become 0; keys not in the canonical set are ignored.
    pub fn project(&self, values: &HashMap<String, f64>) -> FeatureRow {
        let row = self
            .names
            .iter()
            .map(|name| values.get(name).copied().unwrap_or(0.0))
            .collect();
        FeatureRow {
            columns: self.clone(),
            values: row,
        }
    }

    /// Persist as a JSON array of names
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let columns: Self = serde_json::from_str(&json)?;
        if columns.is_empty() {
            return Err(CarPriceError::ValidationError(
                "column name list is empty".to_string(),
            ));
        }
        Ok(columns)
    }
}

impl From<Vec<String>> for CanonicalColumns {
    fn from(names: Vec<String>) -> Self {
        Self {
            names: Arc::new(names),
        }
    }
}

impl From<CanonicalColumns> for Vec<String> {
    fn from(columns: CanonicalColumns) -> Self {
        Arc::try_unwrap(columns.names).unwrap_or_else(|shared| (*shared).clone())
    }
}

/// One numeric row aligned 1:1 with a canonical column set
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: CanonicalColumns,
    values: Vec<f64>,
}

impl FeatureRow {
    pub fn columns(&self) -> &CanonicalColumns {
        &self.columns
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Value of a named column, if the column is canonical
    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .position(|n| n == name)
            .map(|idx| self.values[idx])
    }

    /// `(column, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.columns.iter().zip(self.values.iter().copied())
    }

    /// Single-row matrix for a regressor's predict call
    pub fn to_matrix(&self) -> Result<Array2<f64>> {
        Ok(Array2::from_shape_vec((1, self.values.len()), self.values.clone())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_fills_and_drops() {
        let columns = CanonicalColumns::new(["a", "b", "c"]);
        let mut values = HashMap::new();
        values.insert("c".to_string(), 3.0);
        values.insert("a".to_string(), 1.0);
        values.insert("z".to_string(), 9.0);

        let row = columns.project(&values);
        assert_eq!(row.values(), &[1.0, 0.0, 3.0]);
        assert_eq!(row.get("z"), None);
        assert_eq!(columns.missing_from(&values), vec!["b".to_string()]);
    }

    #[test]
    fn test_json_is_plain_array() {
        let columns = CanonicalColumns::new(["model_year", "brand_Ford"]);
        let json = serde_json::to_string(&columns).unwrap();
        assert_eq!(json, r#"["model_year","brand_Ford"]"#);

        let back: CanonicalColumns = serde_json::from_str(&json).unwrap();
        assert_eq!(back, columns);
    }

    #[test]
    fn test_to_matrix_shape() {
        let columns = CanonicalColumns::new(["a", "b"]);
        let row = columns.project(&HashMap::new());
        let x = row.to_matrix().unwrap();
        assert_eq!(x.dim(), (1, 2));
    }
}
