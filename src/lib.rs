pub mod alerts;
pub mod chart;
pub mod cli;
pub mod commands;
pub mod constants;
pub mod convert;
pub mod desk;
pub mod error;
pub mod ledger;
pub mod logging;
pub mod model;
pub mod projection;
pub mod runner;
pub mod scheduler;
pub mod simulator;
pub mod tick;
pub mod toto;

pub use error::{DeskError, Result};
