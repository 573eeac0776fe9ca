//! Free-running wall-clock ticker
//!
//! Emits one [`Command::TimeStep`] per interval onto the command channel.
//! The reference time advances by exactly one interval per emission so
//! send latency does not accumulate as drift. When the consumer stalls for
//! longer than a whole interval, the missed intervals are dropped instead of
//! replayed as a burst.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

use crate::protocol::Command;

/// Interval bookkeeping, separated from the task so it can be tested
/// without a runtime
#[derive(Debug, Clone)]
pub struct TickClock {
    reference: Instant,
    interval: Duration,
}

impl TickClock {
    pub fn new(start: Instant, interval: Duration) -> Self {
        Self {
            reference: start,
            interval,
        }
    }

    /// When the next tick is due
    pub fn next_deadline(&self) -> Instant {
        self.reference + self.interval
    }

    /// Returns true if a tick is due at `now`, accounting for exactly one
    /// interval
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.reference) < self.interval {
            return false;
        }
        self.reference += self.interval;
        if now.saturating_duration_since(self.reference) >= self.interval {
            tracing::debug!(
                behind_ms = now.saturating_duration_since(self.reference).as_millis() as u64,
                "Ticker fell behind, dropping missed intervals"
            );
            self.reference = now;
        }
        true
    }
}

/// Ticker task
///
/// Holds only a weak handle to the command channel so that it never keeps
/// the session alive on its own.
pub struct Ticker {
    clock: TickClock,
    cmd_tx: mpsc::WeakSender<Command>,
}

impl Ticker {
    pub fn new(cmd_tx: &mpsc::Sender<Command>, interval: Duration) -> Self {
        Self {
            clock: TickClock::new(Instant::now(), interval),
            cmd_tx: cmd_tx.downgrade(),
        }
    }

    /// Run until the command channel closes
    pub async fn run(mut self) {
        loop {
            sleep_until(self.clock.next_deadline()).await;
            if !self.clock.poll(Instant::now()) {
                continue;
            }
            let Some(tx) = self.cmd_tx.upgrade() else {
                break;
            };
            if tx.send(Command::TimeStep).await.is_err() {
                break;
            }
        }
        tracing::debug!("Ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_secs(1);

    #[test]
    fn poll_waits_for_full_interval() {
        let start = Instant::now();
        let mut clock = TickClock::new(start, SECOND);

        assert!(!clock.poll(start + Duration::from_millis(999)));
        assert!(clock.poll(start + SECOND));
        assert_eq!(clock.next_deadline(), start + 2 * SECOND);
    }

    #[test]
    fn poll_advances_by_interval_not_observed_time() {
        let start = Instant::now();
        let mut clock = TickClock::new(start, SECOND);

        assert!(clock.poll(start + Duration::from_millis(1300)));
        assert_eq!(clock.next_deadline(), start + 2 * SECOND);
        assert!(clock.poll(start + Duration::from_millis(2050)));
        assert_eq!(clock.next_deadline(), start + 3 * SECOND);
    }

    #[test]
    fn stall_does_not_burst() {
        let start = Instant::now();
        let mut clock = TickClock::new(start, SECOND);

        let late = start + Duration::from_millis(5500);
        assert!(clock.poll(late));
        assert!(!clock.poll(late));
        assert!(!clock.poll(late + Duration::from_millis(999)));
        assert!(clock.poll(late + SECOND));
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_emits_roughly_once_per_interval() {
        let (tx, mut rx) = mpsc::channel(8);
        let handle = tokio::spawn(Ticker::new(&tx, SECOND).run());

        tokio::time::sleep(Duration::from_millis(3500)).await;
        let mut received = 0;
        while let Ok(command) = rx.try_recv() {
            assert_eq!(command, Command::TimeStep);
            received += 1;
        }
        assert_eq!(received, 3);

        drop(tx);
        handle.await.expect("ticker task");
    }

    #[tokio::test(start_paused = true)]
    async fn ticker_stops_when_channel_closes() {
        let (tx, rx) = mpsc::channel(1);
        let handle = tokio::spawn(Ticker::new(&tx, SECOND).run());
        drop(tx);
        drop(rx);

        tokio::time::timeout(5 * SECOND, handle)
            .await
            .expect("ticker should exit")
            .expect("ticker task");
    }
}
