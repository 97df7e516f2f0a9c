pub mod model;

pub use model::{LinearPipeline, Regressor};

use crate::models::home::{HomeFeatures, Prediction};

/// Dollars per unit of `medv`.
pub const MEDV_SCALE: f64 = 1000.0;

/// Dirhams per dollar, used when the config does not override it.
pub const DEFAULT_DIRHAM_RATE: f64 = 10.0;

/// Converts a model estimate in $1000s into a dirham price. The dollar amount is
/// rounded to one decimal, ties to even, before the exchange rate is applied.
pub fn to_dirham(medv: f64, dirham_rate: f64) -> f64 {
    let dollars = medv * MEDV_SCALE;
    round_one_decimal(dollars) * dirham_rate
}

/// Inverse of [`to_dirham`] without the rounding step.
pub fn to_medv(dirham_price: f64, dirham_rate: f64) -> f64 {
    dirham_price / MEDV_SCALE / dirham_rate
}

pub fn predict_price(
    model: &dyn Regressor,
    features: &HomeFeatures,
    dirham_rate: f64,
) -> Prediction {
    let medv = model.predict(&features.feature_vector());
    Prediction {
        predicted_price_dh: to_dirham(medv, dirham_rate),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
