use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{EUR_RATE, GRAMS_PER_TROY_OUNCE, SGD_RATE, USD_RATE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Currency {
    #[default]
    Usd,
    Sgd,
    Eur,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::Usd, Currency::Sgd, Currency::Eur];

    /// Units of this currency per one US dollar.
    pub fn rate(self) -> f64 {
        match self {
            Currency::Usd => USD_RATE,
            Currency::Sgd => SGD_RATE,
            Currency::Eur => EUR_RATE,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Sgd => "SGD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum WeightUnit {
    #[default]
    #[value(name = "oz")]
    TroyOunce,
    #[value(name = "g")]
    Gram,
}

impl WeightUnit {
    pub const ALL: [WeightUnit; 2] = [WeightUnit::TroyOunce, WeightUnit::Gram];

    /// Troy ounces contained in one unit of this weight.
    pub fn ounces(self) -> f64 {
        match self {
            WeightUnit::TroyOunce => 1.0,
            WeightUnit::Gram => 1.0 / GRAMS_PER_TROY_OUNCE,
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            WeightUnit::TroyOunce => "oz",
            WeightUnit::Gram => "g",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WeightUnit::TroyOunce => "troy ounce",
            WeightUnit::Gram => "gram",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for TrendSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TrendSignal::Buy => "Buy",
            TrendSignal::Sell => "Sell",
            TrendSignal::Hold => "Hold",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gram_is_a_fraction_of_an_ounce() {
        let grams_in_ounce = WeightUnit::TroyOunce.ounces() / WeightUnit::Gram.ounces();
        assert!((grams_in_ounce - GRAMS_PER_TROY_OUNCE).abs() < 1e-9);
    }

    #[test]
    fn currency_codes_serialise_snake_case() {
        let encoded = serde_json::to_string(&Currency::Sgd).expect("serialise currency");
        assert_eq!(encoded, "\"sgd\"");
        assert_eq!(Currency::Eur.to_string(), "EUR");
    }
}
