//! Gram-denominated holdings tracked as purchase lots.
//!
//! Lots are kept in insertion order, which is also chronological order, so
//! liquidation always consumes the oldest lot first. A lot whose quantity would
//! reach zero is removed instead of being kept around empty.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{positive, DeskError, Result};

/// Remainders at or below this many grams count as fully sold.
pub const QUANTITY_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lot {
    pub id: u64,
    pub acquired_on: NaiveDate,
    pub quantity_grams: f64,
    pub unit_cost_per_gram: f64,
}

impl Lot {
    pub fn cost(&self) -> f64 {
        self.quantity_grams * self.unit_cost_per_gram
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub total_grams: f64,
    pub total_cost: f64,
    pub current_value: f64,
    pub profit_loss: f64,
}

#[derive(Debug, Clone)]
pub struct PortfolioLedger {
    lots: Vec<Lot>,
    next_id: u64,
}

impl Default for PortfolioLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl PortfolioLedger {
    pub fn new() -> Self {
        Self {
            lots: Vec::new(),
            next_id: 1,
        }
    }

    /// Appends a lot acquired today.
    pub fn add_lot(&mut self, quantity_grams: f64, unit_cost_per_gram: f64) -> Result<Lot> {
        self.add_lot_on(Local::now().date_naive(), quantity_grams, unit_cost_per_gram)
    }

    pub fn add_lot_on(
        &mut self,
        acquired_on: NaiveDate,
        quantity_grams: f64,
        unit_cost_per_gram: f64,
    ) -> Result<Lot> {
        if !positive(quantity_grams) {
            return Err(DeskError::InvalidQuantity(quantity_grams));
        }
        if !positive(unit_cost_per_gram) {
            return Err(DeskError::InvalidPrice(unit_cost_per_gram));
        }

        let lot = Lot {
            id: self.next_id,
            acquired_on,
            quantity_grams,
            unit_cost_per_gram,
        };
        self.next_id += 1;
        self.lots.push(lot.clone());
        Ok(lot)
    }

    /// Sells `total_grams` oldest-first and returns how much was actually
    /// removed. Selling more than is held empties the ledger.
    pub fn reduce_by_quantity(&mut self, total_grams: f64) -> Result<f64> {
        if !positive(total_grams) {
            return Err(DeskError::InvalidQuantity(total_grams));
        }

        let mut remaining = total_grams;
        let mut sold = 0.0;
        let mut consumed = 0;
        for lot in &mut self.lots {
            if remaining <= QUANTITY_EPSILON {
                break;
            }
            if lot.quantity_grams <= remaining + QUANTITY_EPSILON {
                sold += lot.quantity_grams;
                remaining = (remaining - lot.quantity_grams).max(0.0);
                consumed += 1;
            } else {
                lot.quantity_grams -= remaining;
                sold += remaining;
                break;
            }
        }
        self.lots.drain(..consumed);

        Ok(sold)
    }

    /// Reduces a single lot, removing it when the request covers its whole
    /// quantity. Returns the grams removed.
    pub fn reduce_lot(&mut self, lot_id: u64, quantity_grams: f64) -> Result<f64> {
        if !positive(quantity_grams) {
            return Err(DeskError::InvalidQuantity(quantity_grams));
        }

        let index = self
            .lots
            .iter()
            .position(|lot| lot.id == lot_id)
            .ok_or(DeskError::LotNotFound(lot_id))?;

        let lot = &mut self.lots[index];
        if lot.quantity_grams <= quantity_grams + QUANTITY_EPSILON {
            let removed = lot.quantity_grams;
            self.lots.remove(index);
            Ok(removed)
        } else {
            lot.quantity_grams -= quantity_grams;
            Ok(quantity_grams)
        }
    }

    pub fn summary(&self, price_per_gram: f64) -> PortfolioSummary {
        let total_grams = self.total_grams();
        let total_cost: f64 = self.lots.iter().map(Lot::cost).sum();
        let current_value = total_grams * price_per_gram;
        PortfolioSummary {
            total_grams,
            total_cost,
            current_value,
            profit_loss: current_value - total_cost,
        }
    }

    pub fn total_grams(&self) -> f64 {
        self.lots.iter().map(|lot| lot.quantity_grams).sum()
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn len(&self) -> usize {
        self.lots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}
