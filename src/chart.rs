use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{bail, Result};
use clap::Args;
use textplots::{Chart, Plot, Shape};

use crate::alerts::LogNotifier;
use crate::convert::convert;
use crate::desk::Desk;
use crate::model::{Currency, WeightUnit};
use crate::scheduler::{ManualScheduler, Scheduler};
use crate::simulator::{SimulatorConfig, StdRandom};

#[derive(Debug, Args, Clone)]
pub struct ChartArgs {
    /// Number of simulated ticks to plot
    #[arg(short, long, default_value_t = 30)]
    pub ticks: usize,

    /// Seed for a reproducible price path
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Currency::Usd)]
    pub currency: Currency,

    #[arg(long, value_enum, default_value_t = WeightUnit::TroyOunce)]
    pub weight: WeightUnit,

    /// Chart width in characters
    #[arg(long, default_value_t = 120)]
    pub width: u32,

    /// Chart height in characters
    #[arg(long, default_value_t = 30)]
    pub height: u32,
}

pub fn run(args: ChartArgs) -> Result<()> {
    let random = match args.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    let desk = Arc::new(Mutex::new(Desk::new(
        SimulatorConfig::default(),
        Box::new(random),
        Box::new(LogNotifier),
    )));

    let mut scheduler = ManualScheduler::new();
    let task_desk = Arc::clone(&desk);
    let interval = desk
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .config()
        .tick_interval;
    scheduler.schedule_periodic(
        interval,
        Box::new(move || {
            task_desk
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .advance();
        }),
    );
    scheduler.run_pending(args.ticks);

    let guard = desk.lock().unwrap_or_else(PoisonError::into_inner);
    let history: Vec<f64> = guard.history().iter().copied().collect();
    let points = chart_points(&history, args.currency, args.weight);
    if points.len() < 2 {
        bail!("not enough data points to render a chart");
    }

    println!(
        "Gold price in {} per {} over the last {} samples (~{}s simulated), signal: {}",
        args.currency,
        args.weight,
        points.len(),
        scheduler.elapsed_for(args.ticks).as_secs(),
        guard.trend_signal()
    );
    render_chart(&points, args.width, args.height);
    Ok(())
}

/// Converts canonical history samples into `(index, quoted price)` points.
pub fn chart_points(history: &[f64], currency: Currency, weight: WeightUnit) -> Vec<(f32, f32)> {
    history
        .iter()
        .enumerate()
        .map(|(idx, price)| (idx as f32, convert(*price, currency, weight) as f32))
        .collect()
}

fn render_chart(points: &[(f32, f32)], width: u32, height: u32) {
    let min_price = points.iter().map(|(_, p)| *p).fold(f32::INFINITY, f32::min);
    let max_price = points
        .iter()
        .map(|(_, p)| *p)
        .fold(f32::NEG_INFINITY, f32::max);
    println!("Price range: {:.2} → {:.2}", min_price, max_price);

    let max_x = points.last().map(|(x, _)| *x).unwrap_or(1.0).max(1.0);

    Chart::new(width.max(40), height.max(10), 0.0, max_x)
        .lineplot(&Shape::Lines(points))
        .display();
    println!();
}
