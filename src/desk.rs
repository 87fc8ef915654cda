//! Owned state for one gold desk session: the simulated price, the holdings
//! ledger and the alert registry, plus the subscribers that re-render after
//! each tick.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::alerts::{Alert, AlertRegistry, Notifier};
use crate::convert::convert;
use crate::error::Result;
use crate::ledger::{Lot, PortfolioLedger, PortfolioSummary};
use crate::logging;
use crate::model::{Currency, TrendSignal, WeightUnit};
use crate::simulator::{PriceSimulator, RandomSource, SimulatorConfig};
use crate::tick::PriceTick;

pub type TickSubscriber = Box<dyn FnMut(&PriceTick, &Desk) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeskSummary {
    pub currency: Currency,
    pub weight: WeightUnit,
    /// Current price quoted in `currency` per `weight`.
    pub quoted_price: f64,
    #[serde(flatten)]
    pub portfolio: PortfolioSummary,
}

pub struct Desk {
    simulator: PriceSimulator,
    ledger: PortfolioLedger,
    alerts: AlertRegistry,
    notifier: Box<dyn Notifier + Send>,
    subscribers: Vec<TickSubscriber>,
}

impl Desk {
    pub fn new(
        config: SimulatorConfig,
        random: Box<dyn RandomSource + Send>,
        notifier: Box<dyn Notifier + Send>,
    ) -> Self {
        Self {
            simulator: PriceSimulator::new(config, random),
            ledger: PortfolioLedger::new(),
            alerts: AlertRegistry::new(),
            notifier,
            subscribers: Vec::new(),
        }
    }

    /// Advances the price, then evaluates alerts against the new price, then
    /// notifies tick subscribers.
    pub fn advance(&mut self) -> PriceTick {
        let tick = self.simulator.tick();

        for fired in self.alerts.evaluate(tick.price) {
            self.notifier.notify(&fired);
        }

        let mut subscribers = std::mem::take(&mut self.subscribers);
        for subscriber in &mut subscribers {
            subscriber(&tick, self);
        }
        self.subscribers = subscribers;

        tick
    }

    pub fn on_tick<F>(&mut self, callback: F)
    where
        F: FnMut(&PriceTick, &Desk) + Send + 'static,
    {
        self.subscribers.push(Box::new(callback));
    }

    /// Values holdings in `currency`. Lot costs are kept in USD per gram and
    /// converted with the same table as the current price, so the profit is
    /// independent of the currency each lot was bought in.
    pub fn summary(&self, currency: Currency, weight: WeightUnit) -> DeskSummary {
        let price = self.simulator.current_price();
        let usd = self
            .ledger
            .summary(convert(price, Currency::Usd, WeightUnit::Gram));
        let rate = currency.rate();
        DeskSummary {
            currency,
            weight,
            quoted_price: convert(price, currency, weight),
            portfolio: PortfolioSummary {
                total_grams: usd.total_grams,
                total_cost: usd.total_cost * rate,
                current_value: usd.current_value * rate,
                profit_loss: usd.profit_loss * rate,
            },
        }
    }

    /// Buys `grams` at the current price. The lot records its cost in USD
    /// per gram; `currency` is the basis the purchase is reported in.
    pub fn buy(&mut self, grams: f64, currency: Currency) -> Result<Lot> {
        let price = self.simulator.current_price();
        let lot = self
            .ledger
            .add_lot(grams, convert(price, Currency::Usd, WeightUnit::Gram))?;
        logging::info(
            "ledger.buy",
            "Lot added to portfolio",
            json!({
                "lot_id": lot.id,
                "grams": lot.quantity_grams,
                "unit_cost_usd_per_gram": lot.unit_cost_per_gram,
                "quoted_unit_cost": convert(price, currency, WeightUnit::Gram),
                "currency": currency,
            }),
        );
        Ok(lot)
    }

    /// Sells oldest lots first; returns the grams actually sold.
    pub fn sell(&mut self, grams: f64) -> Result<f64> {
        let sold = self.ledger.reduce_by_quantity(grams)?;
        if sold < grams {
            logging::warn(
                "ledger.oversell",
                "Sell order exceeded holdings; excess ignored",
                json!({ "requested": grams, "sold": sold }),
            );
        }
        logging::info(
            "ledger.sell",
            "Holdings reduced",
            json!({ "grams": sold, "remaining_lots": self.ledger.len() }),
        );
        Ok(sold)
    }

    pub fn sell_lot(&mut self, lot_id: u64, grams: f64) -> Result<f64> {
        let sold = self.ledger.reduce_lot(lot_id, grams)?;
        logging::info(
            "ledger.sell_lot",
            "Lot reduced",
            json!({ "lot_id": lot_id, "grams": sold }),
        );
        Ok(sold)
    }

    pub fn add_alert(
        &mut self,
        target_price: f64,
        currency: Currency,
        weight: WeightUnit,
    ) -> Result<Alert> {
        self.alerts.add_alert(target_price, currency, weight)
    }

    pub fn remove_alert(&mut self, id: u64) -> bool {
        self.alerts.remove_alert(id)
    }

    pub fn lots(&self) -> &[Lot] {
        self.ledger.lots()
    }

    pub fn alerts(&self) -> &[Alert] {
        self.alerts.alerts()
    }

    pub fn trend_signal(&self) -> TrendSignal {
        self.simulator.trend_signal()
    }

    pub fn current_price(&self) -> f64 {
        self.simulator.current_price()
    }

    pub fn ticks(&self) -> u64 {
        self.simulator.ticks()
    }

    pub fn history(&self) -> &VecDeque<f64> {
        self.simulator.history()
    }

    pub fn config(&self) -> &SimulatorConfig {
        self.simulator.config()
    }
}
