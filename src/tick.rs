use serde::{Deserialize, Serialize};

use crate::convert::convert;
use crate::model::{Currency, WeightUnit};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceTick {
    pub sequence: u64,
    /// Canonical USD per troy ounce.
    pub price: f64,
    pub timestamp_ms: u128,
}

impl PriceTick {
    pub fn quoted(&self, currency: Currency, weight: WeightUnit) -> f64 {
        convert(self.price, currency, weight)
    }
}
