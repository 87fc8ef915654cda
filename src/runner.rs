use std::sync::{Arc, Mutex, PoisonError};

use anyhow::{Context, Result};
use serde_json::json;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;

use crate::desk::Desk;
use crate::logging;
use crate::scheduler::{Scheduler, TokioScheduler};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShutdownSignal {
    None,
    Graceful,
    Immediate,
}

/// Drives `desk` on its configured tick interval until the tick budget is
/// spent or a termination signal arrives.
pub async fn run(desk: Arc<Mutex<Desk>>) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = watch::channel(ShutdownSignal::None);
    let signals_task = tokio::spawn(handle_signals(shutdown_tx.clone()));

    let result = run_until(desk, shutdown_tx, shutdown_rx).await;

    signals_task.abort();
    if let Ok(Err(err)) = signals_task.await {
        logging::error(
            "signal.handler",
            "Signal handler failed",
            json!({ "error": format!("{err:#}") }),
        );
    }
    result
}

/// Same as [`run`] without signal handling; stops once `shutdown` leaves
/// `ShutdownSignal::None` or the tick budget is reached.
pub async fn run_until(
    desk: Arc<Mutex<Desk>>,
    shutdown_tx: watch::Sender<ShutdownSignal>,
    mut shutdown: watch::Receiver<ShutdownSignal>,
) -> Result<()> {
    let (interval, max_ticks) = {
        let guard = desk.lock().unwrap_or_else(PoisonError::into_inner);
        (guard.config().tick_interval, guard.config().max_ticks)
    };

    logging::info(
        "desk.start",
        "Price simulation started",
        json!({
            "interval_ms": interval.as_millis(),
            "max_ticks": max_ticks,
        }),
    );

    if max_ticks == Some(0) {
        logging::info_simple("desk.stop", "Price simulation stopped");
        return Ok(());
    }

    let task_desk = Arc::clone(&desk);
    let mut emitted: usize = 0;
    let handle = TokioScheduler.schedule_periodic(
        interval,
        Box::new(move || {
            // A run already queued when the budget was hit must not tick again.
            if max_ticks.is_some_and(|max| emitted >= max) {
                return;
            }

            let mut guard = task_desk.lock().unwrap_or_else(PoisonError::into_inner);
            guard.advance();
            emitted += 1;

            if let Some(max) = max_ticks.filter(|max| emitted >= *max) {
                logging::info(
                    "desk.limit",
                    "Price simulation reached its tick budget",
                    json!({ "max_ticks": max }),
                );
                let _ = shutdown_tx.send(ShutdownSignal::Graceful);
            }
        }),
    );

    loop {
        shutdown
            .changed()
            .await
            .context("shutdown channel closed before simulation finished")?;
        match *shutdown.borrow() {
            ShutdownSignal::None => continue,
            ShutdownSignal::Graceful => {
                logging::info_simple("desk.stop", "Price simulation stopped");
                break;
            }
            ShutdownSignal::Immediate => {
                logging::warn_simple("desk.stop", "Price simulation stopping immediately");
                break;
            }
        }
    }

    handle.cancel();
    Ok(())
}

async fn handle_signals(shutdown_tx: watch::Sender<ShutdownSignal>) -> Result<()> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("failed to register SIGTERM handler")?;
    let mut sigint =
        signal(SignalKind::interrupt()).context("failed to register SIGINT handler")?;

    tokio::select! {
        _ = sigterm.recv() => {
            logging::info(
                "signal.received",
                "SIGTERM received, initiating graceful shutdown",
                json!({ "signal": "SIGTERM" })
            );
            let _ = shutdown_tx.send(ShutdownSignal::Graceful);
        }
        _ = sigint.recv() => {
            logging::warn(
                "signal.received",
                "SIGINT received, forcing immediate shutdown",
                json!({ "signal": "SIGINT" })
            );
            let _ = shutdown_tx.send(ShutdownSignal::Immediate);
        }
    }

    Ok(())
}
