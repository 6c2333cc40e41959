//! Regressor trait

use crate::error::Result;
use ndarray::{Array1, Array2};

use super::metrics::RegressionMetrics;

/// A fitted-or-fittable price model.
///
/// Held behind a `Box<dyn Regressor>` by the server, so implementations must
/// be shareable across request handlers.
pub trait Regressor: Send + Sync {
    /// Fit the model to training data
    fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<()>;

    /// Predict one value per row of `x`
    fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>>;

    /// Coefficient of determination on `(x, y)`
    fn score(&self, x: &Array2<f64>, y: &Array1<f64>) -> Result<f64> {
        let y_pred = self.predict(x)?;
        Ok(RegressionMetrics::compute(y, &y_pred).r2)
    }

    /// Number of input columns the model was fitted on
    fn n_features(&self) -> usize;
}
