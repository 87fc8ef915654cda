use clap::{Args, Parser, Subcommand};

use crate::chart::ChartArgs;
use crate::model::{Currency, WeightUnit};

#[derive(Debug, Parser)]
#[command(author, version, about = "Simulated gold price desk with portfolio and alerts")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

impl Cli {
    pub fn command(self) -> Command {
        self.command.unwrap_or_default()
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Simulate live prices, evaluate alerts and report the portfolio
    Run(RunArgs),
    /// Simulate a price path and render an ASCII trend chart
    Chart(ChartArgs),
    /// Project best and worst case values of an investment
    Project(ProjectArgs),
    /// Draw six Toto numbers
    Toto(TotoArgs),
}

impl Default for Command {
    fn default() -> Self {
        Command::Run(RunArgs::default())
    }
}

#[derive(Debug, Args, Clone)]
pub struct RunArgs {
    /// Stop after this many ticks; runs until interrupted when omitted
    #[arg(short, long)]
    pub ticks: Option<usize>,

    /// Milliseconds between price ticks
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Seed for a reproducible price path
    #[arg(long)]
    pub seed: Option<u64>,

    /// Alert target price, quoted in --currency per --weight (repeatable)
    #[arg(short, long = "alert")]
    pub alerts: Vec<f64>,

    /// Grams to buy before the first tick
    #[arg(short, long)]
    pub buy: Option<f64>,

    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    pub currency: Currency,

    #[arg(long, value_enum, default_value_t = WeightUnit::TroyOunce)]
    pub weight: WeightUnit,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            ticks: None,
            interval_ms: None,
            seed: None,
            alerts: Vec::new(),
            buy: None,
            currency: Currency::Usd,
            weight: WeightUnit::TroyOunce,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct ProjectArgs {
    /// Amount invested today
    #[arg(short, long)]
    pub principal: f64,

    /// Investment horizon in years; fractions are allowed
    #[arg(short, long)]
    pub years: f64,
}

#[derive(Debug, Args, Clone)]
pub struct TotoArgs {
    #[arg(long)]
    pub seed: Option<u64>,
}
