use serde::{Deserialize, Serialize};

use crate::constants::{BEST_CASE_RATE, WORST_CASE_RATE};
use crate::error::{positive, DeskError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub principal: f64,
    pub horizon_years: f64,
    pub best_case: f64,
    pub worst_case: f64,
}

/// Compounds `principal` annually at `annual_rate`. Fractional horizons are
/// treated as a continuous exponent.
pub fn project(principal: f64, horizon_years: f64, annual_rate: f64) -> Result<f64> {
    if !positive(principal) {
        return Err(DeskError::InvalidPrice(principal));
    }
    if !positive(horizon_years) {
        return Err(DeskError::InvalidHorizon(horizon_years));
    }
    Ok(principal * (1.0 + annual_rate).powf(horizon_years))
}

pub fn scenarios(principal: f64, horizon_years: f64) -> Result<Projection> {
    Ok(Projection {
        principal,
        horizon_years,
        best_case: project(principal, horizon_years, BEST_CASE_RATE)?,
        worst_case: project(principal, horizon_years, WORST_CASE_RATE)?,
    })
}
