use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

use crate::alerts::LogNotifier;
use crate::cli::{ProjectArgs, RunArgs, TotoArgs};
use crate::desk::Desk;
use crate::logging;
use crate::projection;
use crate::runner;
use crate::simulator::{SimulatorConfig, StdRandom};
use crate::toto;

pub async fn run(args: RunArgs) -> Result<()> {
    let mut config = SimulatorConfig {
        max_ticks: args.ticks,
        ..SimulatorConfig::default()
    };
    if let Some(interval_ms) = args.interval_ms {
        config.tick_interval = Duration::from_millis(interval_ms.max(1));
    }

    let random = match args.seed {
        Some(seed) => StdRandom::seeded(seed),
        None => StdRandom::from_entropy(),
    };
    let mut desk = Desk::new(config, Box::new(random), Box::new(LogNotifier));

    for target in &args.alerts {
        let alert = desk
            .add_alert(*target, args.currency, args.weight)
            .with_context(|| format!("invalid alert target {target}"))?;
        logging::info(
            "alert.added",
            "Price alert registered",
            json!({
                "alert_id": alert.id,
                "target_price": alert.target_price,
                "currency": alert.currency,
                "weight": alert.weight,
            }),
        );
    }

    if let Some(grams) = args.buy {
        desk.buy(grams, args.currency)
            .with_context(|| format!("invalid initial purchase of {grams}g"))?;
    }

    let (currency, weight) = (args.currency, args.weight);
    desk.on_tick(move |tick, _| {
        logging::info(
            "price.tick",
            "Gold price updated",
            json!({
                "sequence": tick.sequence,
                "price_usd_oz": tick.price,
                "quoted_price": tick.quoted(currency, weight),
                "currency": currency,
                "weight": weight,
            }),
        );
    });

    let desk = Arc::new(Mutex::new(desk));
    runner::run(Arc::clone(&desk)).await?;

    let desk = desk.lock().unwrap_or_else(PoisonError::into_inner);
    let summary = desk.summary(currency, weight);
    logging::info(
        "portfolio.summary",
        "Final portfolio summary",
        json!({
            "summary": summary,
            "lots": desk.lots().len(),
            "fired_alerts": desk.alerts().iter().filter(|alert| alert.is_fired()).count(),
            "trend_signal": desk.trend_signal(),
        }),
    );
    Ok(())
}

pub fn project(args: ProjectArgs) -> Result<()> {
    let projection =
        projection::scenarios(args.principal, args.years).context("invalid projection input")?;
    println!(
        "Principal {:.2} over {} years: best case {:.2}, worst case {:.2}",
        projection.principal, projection.horizon_years, projection.best_case, projection.worst_case
    );
    Ok(())
}

pub fn toto(args: TotoArgs) -> Result<()> {
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let numbers = toto::draw(&mut rng);
    let rendered: Vec<String> = numbers.iter().map(u8::to_string).collect();
    println!("{}", rendered.join(" "));
    Ok(())
}
