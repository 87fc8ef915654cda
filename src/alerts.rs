use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::convert::convert;
use crate::error::{positive, DeskError, Result};
use crate::logging;
use crate::model::{Currency, WeightUnit};

/// One-way latch: an alert moves from `Pending` to `Fired` at most once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Pending,
    Fired,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub target_price: f64,
    pub currency: Currency,
    pub weight: WeightUnit,
    pub state: AlertState,
}

impl Alert {
    pub fn is_fired(&self) -> bool {
        self.state == AlertState::Fired
    }
}

/// Emitted once when an alert's threshold is reached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertFired {
    pub id: u64,
    pub target_price: f64,
    pub observed_price: f64,
    pub currency: Currency,
    pub weight: WeightUnit,
}

/// Platform notification facility. Delivery is fire-and-forget.
pub trait Notifier {
    fn notify(&mut self, fired: &AlertFired);
}

/// Reports fired alerts as structured log lines.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, fired: &AlertFired) {
        logging::info(
            "alert.fired",
            "Gold price reached alert target",
            json!({
                "alert_id": fired.id,
                "target_price": fired.target_price,
                "observed_price": fired.observed_price,
                "currency": fired.currency,
                "weight": fired.weight,
            }),
        );
    }
}

#[derive(Debug, Clone)]
pub struct AlertRegistry {
    alerts: Vec<Alert>,
    next_id: u64,
}

impl Default for AlertRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertRegistry {
    pub fn new() -> Self {
        Self {
            alerts: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add_alert(
        &mut self,
        target_price: f64,
        currency: Currency,
        weight: WeightUnit,
    ) -> Result<Alert> {
        if !positive(target_price) {
            return Err(DeskError::InvalidPrice(target_price));
        }

        let alert = Alert {
            id: self.next_id,
            target_price,
            currency,
            weight,
            state: AlertState::Pending,
        };
        self.next_id += 1;
        self.alerts.push(alert.clone());
        Ok(alert)
    }

    /// Returns whether an alert was removed; unknown ids are ignored.
    pub fn remove_alert(&mut self, id: u64) -> bool {
        let len_before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        len_before != self.alerts.len()
    }

    pub fn evaluate(&mut self, price_canonical: f64) -> Vec<AlertFired> {
        if !price_canonical.is_finite() {
            return Vec::new();
        }

        let mut fired = Vec::new();
        for alert in self
            .alerts
            .iter_mut()
            .filter(|alert| alert.state == AlertState::Pending)
        {
            let observed = convert(price_canonical, alert.currency, alert.weight);
            if observed >= alert.target_price {
                alert.state = AlertState::Fired;
                fired.push(AlertFired {
                    id: alert.id,
                    target_price: alert.target_price,
                    observed_price: observed,
                    currency: alert.currency,
                    weight: alert.weight,
                });
            }
        }
        fired
    }

    pub fn get(&self, id: u64) -> Result<&Alert> {
        self.alerts
            .iter()
            .find(|alert| alert.id == id)
            .ok_or(DeskError::AlertNotFound(id))
    }

    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::to_canonical;

    fn usd_per_gram(price: f64) -> f64 {
        to_canonical(price, Currency::Usd, WeightUnit::Gram)
    }

    #[test]
    fn alert_fires_exactly_once() {
        let mut registry = AlertRegistry::new();
        let alert = registry
            .add_alert(2_300.0, Currency::Usd, WeightUnit::Gram)
            .expect("add alert");

        assert!(registry.evaluate(usd_per_gram(2_250.0)).is_empty());

        let fired = registry.evaluate(usd_per_gram(2_310.0));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, alert.id);
        assert!((fired[0].observed_price - 2_310.0).abs() < 1e-6);

        assert!(registry.evaluate(usd_per_gram(2_320.0)).is_empty());
        assert!(registry.evaluate(usd_per_gram(2_330.0)).is_empty());
        assert!(registry.get(alert.id).expect("alert kept").is_fired());
    }

    #[test]
    fn threshold_is_inclusive() {
        let mut registry = AlertRegistry::new();
        registry
            .add_alert(2_400.0, Currency::Usd, WeightUnit::TroyOunce)
            .expect("add alert");
        assert_eq!(registry.evaluate(2_400.0).len(), 1);
    }

    #[test]
    fn alerts_compare_in_their_own_basis() {
        let mut registry = AlertRegistry::new();
        registry
            .add_alert(3_000.0, Currency::Sgd, WeightUnit::TroyOunce)
            .expect("add sgd alert");
        registry
            .add_alert(3_000.0, Currency::Usd, WeightUnit::TroyOunce)
            .expect("add usd alert");

        // 2_300 USD/oz is 3_105 SGD/oz.
        let fired = registry.evaluate(2_300.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].currency, Currency::Sgd);
    }

    #[test]
    fn rejects_non_positive_targets() {
        let mut registry = AlertRegistry::new();
        assert_eq!(
            registry.add_alert(0.0, Currency::Usd, WeightUnit::Gram),
            Err(DeskError::InvalidPrice(0.0))
        );
        assert!(registry.alerts().is_empty());
    }

    #[test]
    fn removal_is_idempotent() {
        let mut registry = AlertRegistry::new();
        let alert = registry
            .add_alert(10.0, Currency::Eur, WeightUnit::Gram)
            .expect("add alert");

        assert!(registry.remove_alert(alert.id));
        assert!(!registry.remove_alert(alert.id));
        assert_eq!(
            registry.get(alert.id),
            Err(DeskError::AlertNotFound(alert.id))
        );
    }
}
