mod random;

use std::collections::VecDeque;
use std::time::Duration;

use crate::constants::{
    HISTORY_CAPACITY, INITIAL_PRICE_USD_OZ, MAX_STEP_USD_OZ, PRICE_FLOOR, TICK_INTERVAL_MS,
    TREND_LOOKBACK, TREND_THRESHOLD_PCT,
};
use crate::logging::current_timestamp_ms;
use crate::model::TrendSignal;
use crate::tick::PriceTick;

pub use random::{RandomSource, SequenceRandom, StdRandom};

#[derive(Clone, Debug)]
pub struct SimulatorConfig {
    /// Starting price in USD per troy ounce.
    pub initial_price: f64,
    /// Largest move a single tick may make, in either direction.
    pub max_step: f64,
    pub history_capacity: usize,
    pub trend_lookback: usize,
    pub trend_threshold_pct: f64,
    pub tick_interval: Duration,
    pub max_ticks: Option<usize>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            initial_price: INITIAL_PRICE_USD_OZ,
            max_step: MAX_STEP_USD_OZ,
            history_capacity: HISTORY_CAPACITY,
            trend_lookback: TREND_LOOKBACK,
            trend_threshold_pct: TREND_THRESHOLD_PCT,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            max_ticks: None,
        }
    }
}

/// Bounded random walk over the canonical gold price.
pub struct PriceSimulator {
    config: SimulatorConfig,
    random: Box<dyn RandomSource + Send>,
    current: f64,
    history: VecDeque<f64>,
    sequence: u64,
}

impl PriceSimulator {
    pub fn new(config: SimulatorConfig, random: Box<dyn RandomSource + Send>) -> Self {
        let capacity = config.history_capacity.max(1);
        let current = config.initial_price.max(PRICE_FLOOR);
        let mut history = VecDeque::with_capacity(capacity);
        history.push_back(current);
        Self {
            config,
            random,
            current,
            history,
            sequence: 0,
        }
    }

    pub fn tick(&mut self) -> PriceTick {
        let unit = self.random.next_unit();
        let delta = (unit * 2.0 - 1.0) * self.config.max_step;
        self.current = (self.current + delta).max(PRICE_FLOOR);

        self.history.push_back(self.current);
        while self.history.len() > self.config.history_capacity.max(1) {
            self.history.pop_front();
        }

        self.sequence += 1;
        PriceTick {
            sequence: self.sequence,
            price: self.current,
            timestamp_ms: current_timestamp_ms(),
        }
    }

    /// Compares the latest sample with the one `trend_lookback` ticks before.
    pub fn trend_signal(&self) -> TrendSignal {
        let lookback = self.config.trend_lookback;
        let len = self.history.len();
        if lookback == 0 || len <= lookback {
            return TrendSignal::Hold;
        }

        let latest = self.history[len - 1];
        let prior = self.history[len - 1 - lookback];
        // Scaled comparison keeps an exact 0.5% move on the inclusive boundary.
        let change = (latest - prior) * 100.0;
        let band = self.config.trend_threshold_pct * prior;

        if change >= band {
            TrendSignal::Buy
        } else if change <= -band {
            TrendSignal::Sell
        } else {
            TrendSignal::Hold
        }
    }

    pub fn current_price(&self) -> f64 {
        self.current
    }

    pub fn history(&self) -> &VecDeque<f64> {
        &self.history
    }

    pub fn ticks(&self) -> u64 {
        self.sequence
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }
}
