// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Periodic background producers.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use sentra_core::StatusCode;

/// A cancellable periodic task.
///
/// The tick closure runs on every interval; a failing tick is logged and the
/// timer keeps running, so one bad cycle never kills the producer. The task
/// ends when [`PeriodicProducer::stop`] is awaited or the producer is
/// dropped.
pub struct PeriodicProducer {
    name: String,
    stop: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

impl PeriodicProducer {
    /// Spawns a producer ticking at the given period.
    ///
    /// Must be called inside a tokio runtime. The first tick fires
    /// immediately.
    pub fn spawn<F>(name: impl Into<String>, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Result<(), StatusCode> + Send + 'static,
    {
        let name = name.into();
        let (stop, mut stop_rx) = watch::channel(false);
        let task_name = name.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            tracing::info!(producer = %task_name, period = ?period, "producer started");
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if let Err(status) = tick() {
                            tracing::warn!(
                                producer = %task_name,
                                status = %status,
                                "producer tick failed"
                            );
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            tracing::info!(producer = %task_name, "producer stopped");
        });
        Self { name, stop, handle }
    }

    /// Returns the producer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` once the task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Signals the task to stop and waits for it to exit.
    pub async fn stop(mut self) {
        let _ = self.stop.send(true);
        // Await through a borrow; the Drop impl forbids moving the handle out.
        let _ = (&mut self.handle).await;
    }
}

impl Drop for PeriodicProducer {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_ticks_and_stops() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();
        let producer = PeriodicProducer::spawn("test", Duration::from_millis(10), move || {
            counter.fetch_add(1, Ordering::Relaxed);
            Ok(())
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        producer.stop().await;
        let after_stop = ticks.load(Ordering::Relaxed);
        assert!(after_stop >= 2, "expected at least 2 ticks, got {after_stop}");

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(ticks.load(Ordering::Relaxed), after_stop);
    }

    #[tokio::test]
    async fn test_tick_errors_do_not_kill_producer() {
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();
        let producer = PeriodicProducer::spawn("flaky", Duration::from_millis(10), move || {
            let count = counter.fetch_add(1, Ordering::Relaxed);
            if count == 0 {
                Err(StatusCode::BAD_INTERNAL_ERROR)
            } else {
                Ok(())
            }
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(!producer.is_finished());
        assert!(ticks.load(Ordering::Relaxed) >= 2);
        producer.stop().await;
    }
}
