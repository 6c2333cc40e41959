//! Categorical one-hot encoding
//!
//! Encoding is a pure function of `(field, value, levels)` and does not depend
//! on any tabular data library. Training fits drop-first levels per field; a
//! prediction request uses open levels, which emit a single indicator for
//! whatever value arrives and leave it to the aligner to discard unknown ones.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::schema::CategoricalField;

/// Name of the indicator column for `field == value`
pub fn indicator_column(field: &str, value: &str) -> String {
    format!("{}_{}", field, value)
}

/// Known levels of one categorical field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CategoryLevels {
    /// Observed levels sorted lexicographically. The first one is the reference
    /// category and gets no indicator column.
    DropFirst {
        reference: String,
        indicators: Vec<String>,
    },
    /// No fitted levels: the request value itself becomes the indicator.
    Open,
}

impl CategoryLevels {
    /// Build drop-first levels from observed values. Returns `Open` when nothing
    /// was observed.
    pub fn drop_first<I, S>(observed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sorted: BTreeSet<String> = observed.into_iter().map(Into::into).collect();
        let mut levels = sorted.into_iter();
        match levels.next() {
            Some(reference) => CategoryLevels::DropFirst {
                reference,
                indicators: levels.collect(),
            },
            None => CategoryLevels::Open,
        }
    }

    /// Indicator column values, in output order
    pub fn indicators(&self) -> &[String] {
        match self {
            CategoryLevels::DropFirst { indicators, .. } => indicators,
            CategoryLevels::Open => &[],
        }
    }

    pub fn reference(&self) -> Option<&str> {
        match self {
            CategoryLevels::DropFirst { reference, .. } => Some(reference),
            CategoryLevels::Open => None,
        }
    }
}

/// Encode one categorical value into `(column, value)` pairs.
pub fn encode_category(field: &str, value: &str, levels: &CategoryLevels) -> Vec<(String, f64)> {
    match levels {
        CategoryLevels::Open => vec![(indicator_column(field, value), 1.0)],
        CategoryLevels::DropFirst { indicators, .. } => indicators
            .iter()
            .map(|level| {
                let hit = if level == value { 1.0 } else { 0.0 };
                (indicator_column(field, level), hit)
            })
            .collect(),
    }
}

/// Drop-first one-hot encoder fitted on the training records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OneHotEncoder {
    levels: BTreeMap<CategoricalField, CategoryLevels>,
    fields: Vec<CategoricalField>,
}

impl OneHotEncoder {
    /// Create an encoder for the given fields, encoded in that order
    pub fn new(fields: &[CategoricalField]) -> Self {
        Self {
            levels: BTreeMap::new(),
            fields: fields.to_vec(),
        }
    }

    /// Fit levels from an accessor yielding each record's value for a field
    pub fn fit<'a, R, F>(&mut self, records: &'a [R], value_of: F) -> &mut Self
    where
        F: Fn(&'a R, CategoricalField) -> &'a str,
    {
        for &field in &self.fields {
            let levels = CategoryLevels::drop_first(records.iter().map(|r| value_of(r, field)));
            self.levels.insert(field, levels);
        }
        self
    }

    /// Levels fitted for a field
    pub fn levels(&self, field: CategoricalField) -> Option<&CategoryLevels> {
        self.levels.get(&field)
    }

    /// All indicator column names, field by field in encoder order
    pub fn column_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .filter_map(|field| self.levels.get(field).map(|levels| (field, levels)))
            .flat_map(|(field, levels)| {
                levels
                    .indicators()
                    .iter()
                    .map(move |level| indicator_column(field.name(), level))
            })
            .collect()
    }

    /// Indicator values for one record, matching `column_names` order
    pub fn encode_record<F>(&self, value_of: F) -> Vec<f64>
    where
        F: Fn(CategoricalField) -> String,
    {
        self.fields
            .iter()
            .filter_map(|field| self.levels.get(field).map(|levels| (field, levels)))
            .flat_map(|(field, levels)| {
                encode_category(field.name(), &value_of(*field), levels)
                    .into_iter()
                    .map(|(_, v)| v)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_first_levels_are_sorted() {
        let levels = CategoryLevels::drop_first(["Toyota", "BMW", "Ford", "BMW"]);
        assert_eq!(levels.reference(), Some("BMW"));
        assert_eq!(levels.indicators(), &["Ford".to_string(), "Toyota".to_string()]);
    }

    #[test]
    fn test_drop_first_empty_is_open() {
        let levels = CategoryLevels::drop_first(Vec::<String>::new());
        assert_eq!(levels, CategoryLevels::Open);
    }

    #[test]
    fn test_encode_reference_category_is_all_zero() {
        let levels = CategoryLevels::drop_first(["Audi", "BMW", "Ford"]);
        let encoded = encode_category("brand", "Audi", &levels);
        assert_eq!(encoded.len(), 2);
        assert!(encoded.iter().all(|(_, v)| *v == 0.0));
    }

    #[test]
    fn test_encode_known_category() {
        let levels = CategoryLevels::drop_first(["Audi", "BMW", "Ford"]);
        let encoded = encode_category("brand", "Ford", &levels);
        assert_eq!(
            encoded,
            vec![("brand_BMW".to_string(), 0.0), ("brand_Ford".to_string(), 1.0)]
        );
    }

    #[test]
    fn test_encode_open_levels() {
        let encoded = encode_category("fuel_type", "Diesel", &CategoryLevels::Open);
        assert_eq!(encoded, vec![("fuel_type_Diesel".to_string(), 1.0)]);
    }

    #[test]
    fn test_encoder_columns_follow_field_order() {
        let records = vec![("Ford", "Gasoline"), ("BMW", "Diesel"), ("Audi", "Gasoline")];
        let mut encoder = OneHotEncoder::new(&[CategoricalField::Brand, CategoricalField::FuelType]);
        encoder.fit(&records, |r, field| match field {
            CategoricalField::Brand => r.0,
            _ => r.1,
        });

        assert_eq!(
            encoder.column_names(),
            vec!["brand_BMW", "brand_Ford", "fuel_type_Gasoline"]
        );

        let row = encoder.encode_record(|field| match field {
            CategoricalField::Brand => "Ford".to_string(),
            _ => "Diesel".to_string(),
        });
        assert_eq!(row, vec![0.0, 1.0, 0.0]);
    }
}
