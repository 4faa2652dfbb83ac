//! FOMO alert feed.
//!
//! The feed starts with the fixture alerts and grows on a timer. The
//! ticker runs on tokio and stops when its handle is aborted.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::fixtures;

/// A dismissible nudge shown over the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub id: u64,
    pub message: String,
}

impl Alert {
    /// Creates an alert.
    #[must_use]
    pub fn new(id: u64, message: impl Into<String>) -> Self {
        Self {
            id,
            message: message.into(),
        }
    }
}

/// Ordered list of live alerts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFeed {
    alerts: Vec<Alert>,
}

impl AlertFeed {
    /// Creates a feed seeded with the fixture alerts.
    #[must_use]
    pub fn seeded() -> Self {
        Self {
            alerts: fixtures::alerts(),
        }
    }

    /// Live alerts, oldest first.
    #[must_use]
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }

    /// Appends a "New alert at HH:MM:SS!" alert whose id is the timestamp in millis.
    pub fn push_timestamped(&mut self, now: DateTime<Utc>) -> u64 {
        let id = u64::try_from(now.timestamp_millis()).unwrap_or_default();
        let message = format!("New alert at {}!", now.format("%H:%M:%S"));
        self.alerts.push(Alert::new(id, message));
        id
    }

    /// Removes every alert with `id`. Returns true if any was removed.
    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.alerts.len();
        self.alerts.retain(|alert| alert.id != id);
        before != self.alerts.len()
    }
}

/// Pushes a timestamped alert into `feed` every `every`.
///
/// The first alert arrives one full period after the call. Abort the
/// returned handle to stop the ticker.
#[must_use]
pub fn spawn_alert_ticker(feed: Arc<Mutex<AlertFeed>>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let start = tokio::time::Instant::now() + every;
        let mut interval = tokio::time::interval_at(start, every);
        loop {
            interval.tick().await;
            let Ok(mut guard) = feed.lock() else {
                warn!("alert feed lock poisoned; stopping ticker");
                break;
            };
            let id = guard.push_timestamped(Utc::now());
            debug!(alert_id = id, "alert pushed");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_feed() {
        let feed = AlertFeed::seeded();
        assert_eq!(feed.alerts().len(), 3);
        assert_eq!(feed.alerts()[0].id, 1);
    }

    #[test]
    fn test_push_and_dismiss() {
        let mut feed = AlertFeed::seeded();
        let now = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        let id = feed.push_timestamped(now);
        assert_eq!(feed.alerts().len(), 4);
        assert_eq!(feed.alerts()[3].message, "New alert at 22:13:20!");

        assert!(feed.dismiss(id));
        assert!(feed.dismiss(2));
        assert!(!feed.dismiss(2));
        assert_eq!(feed.alerts().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_pushes_on_interval() {
        let feed = Arc::new(Mutex::new(AlertFeed::seeded()));
        let handle = spawn_alert_ticker(Arc::clone(&feed), Duration::from_secs(30));

        tokio::time::sleep(Duration::from_secs(95)).await;
        handle.abort();

        let len = feed.lock().unwrap().alerts().len();
        assert_eq!(len, 6);
    }
}
