//! Periodic task scheduling.
//!
//! [`TokioScheduler`] runs tasks on real timers; [`ManualScheduler`] only runs
//! them when told to, which lets tests step through ticks synchronously.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};

pub type Task = Box<dyn FnMut() + Send + 'static>;

pub trait Scheduler {
    fn schedule_periodic(&mut self, interval: Duration, task: Task) -> CancelHandle;
}

/// Stops a scheduled task. Cancelling twice is harmless.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    state: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    fn new() -> (Self, watch::Receiver<bool>) {
        let (tx, rx) = watch::channel(false);
        (Self { state: Arc::new(tx) }, rx)
    }

    pub fn cancel(&self) {
        self.state.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.state.borrow()
    }
}

/// Spawns each task onto the current tokio runtime. The first run happens one
/// interval after scheduling. Dropping every clone of the handle also stops
/// the task.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule_periodic(&mut self, interval: Duration, mut task: Task) -> CancelHandle {
        let (handle, mut cancelled) = CancelHandle::new();

        tokio::spawn(async move {
            let mut ticker = time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if *cancelled.borrow() {
                            break;
                        }
                        task();
                    }
                    changed = cancelled.changed() => {
                        if changed.is_err() || *cancelled.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        handle
    }
}

struct ManualEntry {
    interval: Duration,
    handle: CancelHandle,
    task: Task,
}

#[derive(Default)]
pub struct ManualScheduler {
    entries: Vec<ManualEntry>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every live task `rounds` times and returns how many task runs
    /// happened. Cancelled tasks are dropped first.
    pub fn run_pending(&mut self, rounds: usize) -> usize {
        let mut runs = 0;
        for _ in 0..rounds {
            self.entries.retain(|entry| !entry.handle.is_cancelled());
            for entry in &mut self.entries {
                (entry.task)();
                runs += 1;
            }
        }
        runs
    }

    /// Simulated time covered by `rounds` runs of the slowest task.
    /// Saturates at `Duration::MAX`.
    pub fn elapsed_for(&self, rounds: usize) -> Duration {
        let interval = self
            .entries
            .iter()
            .map(|entry| entry.interval)
            .max()
            .unwrap_or_default();
        let rounds = u32::try_from(rounds).unwrap_or(u32::MAX);
        interval.checked_mul(rounds).unwrap_or(Duration::MAX)
    }

    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|entry| !entry.handle.is_cancelled())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_periodic(&mut self, interval: Duration, task: Task) -> CancelHandle {
        let (handle, _) = CancelHandle::new();
        self.entries.push(ManualEntry {
            interval,
            handle: handle.clone(),
            task,
        });
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_task(counter: &Arc<AtomicUsize>) -> Task {
        let counter = Arc::clone(counter);
        Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        })
    }

    #[test]
    fn manual_scheduler_runs_on_demand() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_periodic(Duration::from_millis(500), counting_task(&counter));

        assert_eq!(counter.load(Ordering::SeqCst), 0);
        assert_eq!(scheduler.run_pending(3), 3);
        assert_eq!(counter.load(Ordering::SeqCst), 3);
        assert_eq!(scheduler.elapsed_for(3), Duration::from_millis(1_500));
    }

    #[test]
    fn elapsed_time_saturates_instead_of_wrapping() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule_periodic(Duration::from_millis(500), counting_task(&counter));

        let huge = (u32::MAX as usize).saturating_add(1);
        assert_eq!(
            scheduler.elapsed_for(huge),
            Duration::from_millis(500 * u64::from(u32::MAX))
        );

        scheduler.schedule_periodic(Duration::MAX, counting_task(&counter));
        assert_eq!(scheduler.elapsed_for(2), Duration::MAX);
    }

    #[test]
    fn cancelled_tasks_stop_running() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = ManualScheduler::new();
        let handle =
            scheduler.schedule_periodic(Duration::from_millis(10), counting_task(&counter));

        scheduler.run_pending(2);
        handle.cancel();
        handle.cancel();
        assert_eq!(scheduler.run_pending(5), 0);
        assert_eq!(counter.load(Ordering::SeqCst), 2);
        assert!(scheduler.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn tokio_scheduler_ticks_until_cancelled() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut scheduler = TokioScheduler;
        let handle =
            scheduler.schedule_periodic(Duration::from_millis(100), counting_task(&counter));

        time::sleep(Duration::from_millis(350)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);

        handle.cancel();
        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 3);
    }
}
