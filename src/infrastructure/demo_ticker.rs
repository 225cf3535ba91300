// Demo ticker - tokio interval posting demo ticks to the session
use crate::application::collaborators::DemoTicker;
use crate::application::events::{EventSender, SessionEvent};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_stream::wrappers::IntervalStream;
use tokio_stream::StreamExt;

pub struct TokioDemoTicker {
    events: EventSender,
    task: Option<JoinHandle<()>>,
}

impl TokioDemoTicker {
    pub fn new(events: EventSender) -> Self {
        Self { events, task: None }
    }
}

impl DemoTicker for TokioDemoTicker {
    fn start(&mut self, run: u64, period: Duration) {
        self.stop();

        let events = self.events.clone();
        // First tick after one full period, like a browser interval.
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut ticks = IntervalStream::new(interval);

        self.task = Some(tokio::spawn(async move {
            while ticks.next().await.is_some() {
                if events.send(SessionEvent::DemoTick { run }).is_err() {
                    break;
                }
            }
        }));
        tracing::debug!(run, ?period, "demo ticker started");
    }

    fn stop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("demo ticker stopped");
        }
    }
}

impl Drop for TokioDemoTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::events::event_channel;

    #[tokio::test]
    async fn test_restart_replaces_previous_timer() {
        let (tx, mut rx) = event_channel();
        let mut ticker = TokioDemoTicker::new(tx);

        ticker.start(1, Duration::from_millis(5));
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::DemoTick { run: 1 });

        ticker.start(2, Duration::from_millis(5));
        assert!(ticker.task.as_ref().is_some_and(|t| !t.is_finished()));
        // Drain whatever run 1 queued before it was aborted.
        let mut event = rx.recv().await.unwrap();
        while event == (SessionEvent::DemoTick { run: 1 }) {
            event = rx.recv().await.unwrap();
        }
        assert_eq!(event, SessionEvent::DemoTick { run: 2 });
        for _ in 0..3 {
            assert_eq!(rx.recv().await.unwrap(), SessionEvent::DemoTick { run: 2 });
        }
    }

    #[tokio::test]
    async fn test_stop_ends_ticks() {
        let (tx, mut rx) = event_channel();
        let mut ticker = TokioDemoTicker::new(tx);

        ticker.start(1, Duration::from_millis(5));
        rx.recv().await.unwrap();
        ticker.stop();
        ticker.stop();
        assert!(ticker.task.is_none());

        while rx.try_recv().is_ok() {}
        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(rx.try_recv().is_err());
    }
}
