//! Price conversions between the canonical USD per troy ounce basis and the
//! supported quote currencies and weights.

use crate::model::{Currency, WeightUnit};

/// Converts a canonical USD/oz price into `currency` per `weight`.
pub fn convert(price_canonical: f64, currency: Currency, weight: WeightUnit) -> f64 {
    price_canonical * currency.rate() * weight.ounces()
}

/// Inverse of [`convert`]: turns a quoted price back into USD/oz.
pub fn to_canonical(price: f64, currency: Currency, weight: WeightUnit) -> f64 {
    price / currency.rate() / weight.ounces()
}
