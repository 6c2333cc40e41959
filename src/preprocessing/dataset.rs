//! Training-time dataset encoding
//!
//! Turns the raw used-car CSV into a numeric feature matrix, a price vector and
//! the canonical column set the model is trained on.

use crate::error::{CarPriceError, Result};
use ndarray::{Array1, Array2};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

use super::columns::CanonicalColumns;
use super::encoder::OneHotEncoder;
use super::parse::{normalize_accident, parse_mileage, parse_model_year, parse_price};
use super::schema::{
    CategoricalField, ACCIDENT, FREE_TEXT_COLUMNS, MILEAGE_SOURCE, MODEL_YEAR, NUMERIC_FEATURES,
    PRICE,
};

/// A dataset row that survived cleaning
#[derive(Debug, Clone, PartialEq)]
pub struct CarRecord {
    pub model_year: f64,
    pub mileage: f64,
    pub accident: f64,
    pub price: f64,
    pub brand: String,
    pub fuel_type: String,
    pub ext_col: String,
    pub int_col: String,
    pub clean_title: String,
}

impl CarRecord {
    /// Raw categorical value for a field
    pub fn category(&self, field: CategoricalField) -> &str {
        match field {
            CategoricalField::Brand => &self.brand,
            CategoricalField::FuelType => &self.fuel_type,
            CategoricalField::ExtCol => &self.ext_col,
            CategoricalField::IntCol => &self.int_col,
            CategoricalField::CleanTitle => &self.clean_title,
        }
    }
}

/// Output of the training-time encoder
#[derive(Debug, Clone)]
pub struct EncodedDataset {
    /// Feature matrix, one column per canonical name
    pub features: Array2<f64>,
    /// Price target
    pub target: Array1<f64>,
    /// Column order of `features`
    pub columns: CanonicalColumns,
    /// Fitted one-hot levels
    pub encoder: OneHotEncoder,
    /// Rows removed by the accident filter or missing values
    pub rows_dropped: usize,
}

impl EncodedDataset {
    pub fn n_samples(&self) -> usize {
        self.features.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.features.ncols()
    }
}

/// Loads and encodes the used-car dataset
#[derive(Debug, Clone)]
pub struct DatasetEncoder {
    categorical_fields: Vec<CategoricalField>,
}

impl Default for DatasetEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetEncoder {
    pub fn new() -> Self {
        Self {
            categorical_fields: CategoricalField::TRAINING.to_vec(),
        }
    }

    /// Read a CSV file with every column as text
    pub fn load_csv(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "Loaded raw dataset"
        );
        Ok(df)
    }

    /// Load a CSV file and encode it
    pub fn load_and_encode(&self, path: impl AsRef<Path>) -> Result<EncodedDataset> {
        let df = self.load_csv(path)?;
        self.encode(&df)
    }

    /// Encode an already loaded frame of raw text columns
    pub fn encode(&self, df: &DataFrame) -> Result<EncodedDataset> {
        let df = drop_free_text(df)?;
        let records = self.clean_records(&df)?;
        let rows_dropped = df.height() - records.len();

        if records.is_empty() {
            return Err(CarPriceError::DataError(
                "no rows left after cleaning".to_string(),
            ));
        }

        let mut encoder = OneHotEncoder::new(&self.categorical_fields);
        encoder.fit(&records, |record, field| record.category(field));

        let mut names: Vec<String> = NUMERIC_FEATURES.iter().map(|s| s.to_string()).collect();
        names.extend(encoder.column_names());
        let columns = CanonicalColumns::from(names);

        let n_features = columns.len();
        let mut flat = Vec::with_capacity(records.len() * n_features);
        for record in &records {
            flat.push(record.model_year);
            flat.push(record.mileage);
            flat.push(record.accident);
            flat.extend(encoder.encode_record(|field| record.category(field).to_string()));
        }

        let features = Array2::from_shape_vec((records.len(), n_features), flat)?;
        let target = Array1::from_iter(records.iter().map(|r| r.price));

        info!(
            samples = features.nrows(),
            features = n_features,
            rows_dropped,
            "Encoded training dataset"
        );

        Ok(EncodedDataset {
            features,
            target,
            columns,
            encoder,
            rows_dropped,
        })
    }

    /// Parse and filter rows.
    ///
    /// Mileage is parsed for every row and any failure aborts. Rows with
    /// unrecognized accident text or a missing value are dropped, then price
    /// and model year are parsed for the surviving rows.
    fn clean_records(&self, df: &DataFrame) -> Result<Vec<CarRecord>> {
        let mileage = text_column(df, MILEAGE_SOURCE)?
            .into_iter()
            .map(|raw| {
                let raw = raw.ok_or_else(|| CarPriceError::parse(MILEAGE_SOURCE, "<missing>"))?;
                parse_mileage(&raw).map(|m| m as f64)
            })
            .collect::<Result<Vec<f64>>>()?;

        if df.column(PRICE).is_err() {
            return Err(CarPriceError::MissingTarget(PRICE.to_string()));
        }
        let price = text_column(df, PRICE)?;
        let model_year = text_column(df, MODEL_YEAR)?;
        let accident_text = text_column(df, ACCIDENT)?;
        let categories = self
            .categorical_fields
            .iter()
            .map(|field| text_column(df, field.name()).map(|values| (*field, values)))
            .collect::<Result<Vec<_>>>()?;

        let mut records = Vec::with_capacity(df.height());
        for row in 0..df.height() {
            let Some(accident) = accident_text[row].as_deref().and_then(normalize_accident) else {
                debug!(row, value = ?accident_text[row], "Dropping row with unrecognized accident value");
                continue;
            };

            let (Some(raw_price), Some(raw_year)) = (&price[row], &model_year[row]) else {
                debug!(row, "Dropping row with missing price or model year");
                continue;
            };

            let mut values = Vec::with_capacity(categories.len());
            for (_, column) in &categories {
                match &column[row] {
                    Some(v) => values.push(v.clone()),
                    None => break,
                }
            }
            if values.len() != categories.len() {
                debug!(row, "Dropping row with missing categorical value");
                continue;
            }

            let category = |field: CategoricalField| -> String {
                categories
                    .iter()
                    .position(|(f, _)| *f == field)
                    .map(|idx| values[idx].clone())
                    .unwrap_or_default()
            };

            records.push(CarRecord {
                model_year: parse_model_year(raw_year)?,
                mileage: mileage[row],
                accident: f64::from(accident),
                price: parse_price(raw_price)?,
                brand: category(CategoricalField::Brand),
                fuel_type: category(CategoricalField::FuelType),
                ext_col: category(CategoricalField::ExtCol),
                int_col: category(CategoricalField::IntCol),
                clean_title: category(CategoricalField::CleanTitle),
            });
        }

        Ok(records)
    }
}

/// Remove free-text columns; absent columns are skipped.
pub fn drop_free_text(df: &DataFrame) -> Result<DataFrame> {
    let mut result = df.clone();
    for name in FREE_TEXT_COLUMNS {
        if result.column(name).is_ok() {
            result = result.drop(name)?;
        }
    }
    Ok(result)
}

/// Read a column as optional strings, casting non-text columns
fn text_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| CarPriceError::FeatureNotFound(name.to_string()))?;
    let series = column.as_materialized_series().cast(&DataType::String)?;
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_frame() -> DataFrame {
        df!(
            "brand" => &["Ford", "BMW", "Audi", "Ford"],
            "model" => &["F-150", "X5", "A4", "Focus"],
            "model_year" => &["2018", "2020", "2015", "2019"],
            "milage" => &["51,000 mi.", "12,500 mi.", "90,000 mi.", "0 mi."],
            "fuel_type" => &["Gasoline", "Diesel", "Gasoline", "Gasoline"],
            "engine" => &["V8", "I6", "I4", "I4"],
            "transmission" => &["A/T", "A/T", "M/T", "A/T"],
            "ext_col" => &["Black", "White", "Black", "Blue"],
            "int_col" => &["Gray", "Black", "Black", "Gray"],
            "accident" => &["No accident", "At least 1 accident or damage reported", "Maybe", "No accident"],
            "clean_title" => &["Yes", "Yes", "Yes", "No"],
            "price" => &["$30,000", "$45,500", "$9,000", "$21,000"],
        )
        .unwrap()
    }

    #[test]
    fn test_encode_drops_unknown_accident_rows() {
        let encoded = DatasetEncoder::new().encode(&raw_frame()).unwrap();
        assert_eq!(encoded.n_samples(), 3);
        assert_eq!(encoded.rows_dropped, 1);
        assert_eq!(encoded.target.to_vec(), vec![30000.0, 45500.0, 21000.0]);
    }

    #[test]
    fn test_canonical_columns_drop_first() {
        let encoded = DatasetEncoder::new().encode(&raw_frame()).unwrap();
        // Audi was only present in the dropped row, so BMW is the brand reference.
        assert_eq!(
            encoded.columns.names(),
            &[
                "model_year",
                "mileage",
                "accident",
                "brand_Ford",
                "fuel_type_Gasoline",
                "ext_col_Blue",
                "ext_col_White",
                "int_col_Gray",
                "clean_title_Yes",
            ]
        );
        assert_eq!(encoded.n_features(), encoded.columns.len());

        let brand = encoded.encoder.levels(CategoricalField::Brand).unwrap();
        assert_eq!(brand.reference(), Some("BMW"));
        assert_eq!(brand.indicators(), &["Ford".to_string()]);
        let ext = encoded.encoder.levels(CategoricalField::ExtCol).unwrap();
        assert_eq!(ext.reference(), Some("Black"));
    }

    #[test]
    fn test_encoded_values() {
        let encoded = DatasetEncoder::new().encode(&raw_frame()).unwrap();
        let first = encoded.features.row(0).to_vec();
        assert_eq!(first, vec![2018.0, 51000.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 1.0]);
        let second = encoded.features.row(1).to_vec();
        assert_eq!(second, vec![2020.0, 12500.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_missing_price_column_is_fatal() {
        let df = raw_frame().drop("price").unwrap();
        let err = DatasetEncoder::new().encode(&df).unwrap_err();
        assert!(matches!(err, CarPriceError::MissingTarget(_)));
    }

    #[test]
    fn test_bad_mileage_is_fatal() {
        let mut df = raw_frame();
        df.with_column(Series::new("milage".into(), &["51,000 mi.", "n/a", "1 mi.", "2 mi."]))
            .unwrap();
        let err = DatasetEncoder::new().encode(&df).unwrap_err();
        assert!(matches!(err, CarPriceError::ParseError { .. }));
    }

    #[test]
    fn test_drop_free_text_tolerates_absent_columns() {
        let df = raw_frame().drop("engine").unwrap();
        let trimmed = drop_free_text(&df).unwrap();
        assert!(trimmed.column("model").is_err());
        assert!(trimmed.column("transmission").is_err());
        assert!(trimmed.column("brand").is_ok());
    }
}
