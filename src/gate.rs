use chrono::{DateTime, Utc};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

pub const POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Closes the portal for edits once the configured cutoff has passed.
#[derive(Debug, Clone)]
pub struct Gate {
    closes_at: Option<DateTime<Utc>>,
    closed: Arc<AtomicBool>,
}

impl Gate {
    pub fn new(closes_at: Option<DateTime<Utc>>) -> Self {
        Self {
            closes_at,
            closed: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn always_open() -> Self {
        Self::new(None)
    }

    pub fn closes_at(&self) -> Option<DateTime<Utc>> {
        self.closes_at
    }

    pub fn is_open_at(&self, now: DateTime<Utc>) -> bool {
        self.closes_at.is_none_or(|cutoff| now < cutoff)
    }

    pub fn is_open(&self) -> bool {
        self.refresh_at(Utc::now())
    }

    /// Re-evaluates the gate and reports the first transition to closed.
    pub fn refresh_at(&self, now: DateTime<Utc>) -> bool {
        let open = self.is_open_at(now);
        if !open && !self.closed.swap(true, Ordering::SeqCst) {
            warn!(
                closes_at = ?self.closes_at,
                "portal closed; search and save are disabled"
            );
        }
        open
    }
}

pub fn spawn_watch(gate: Gate) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Some(cutoff) = gate.closes_at() {
            info!("portal closes at {}", cutoff.to_rfc3339());
        }
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        loop {
            ticker.tick().await;
            if !gate.refresh_at(Utc::now()) {
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn open_until_cutoff() {
        let cutoff = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let gate = Gate::new(Some(cutoff));

        assert!(gate.is_open_at(cutoff - chrono::Duration::seconds(1)));
        assert!(!gate.is_open_at(cutoff));
        assert!(!gate.is_open_at(cutoff + chrono::Duration::days(1)));
    }

    #[test]
    fn no_cutoff_never_closes() {
        let gate = Gate::always_open();
        assert!(gate.is_open_at(Utc.with_ymd_and_hms(2099, 1, 1, 0, 0, 0).unwrap()));
        assert!(gate.is_open());
    }

    #[test]
    fn refresh_latches_closed_state() {
        let cutoff = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let gate = Gate::new(Some(cutoff));

        assert!(gate.refresh_at(cutoff - chrono::Duration::minutes(1)));
        assert!(!gate.closed.load(Ordering::SeqCst));
        assert!(!gate.refresh_at(cutoff));
        assert!(gate.closed.load(Ordering::SeqCst));
        assert!(!gate.refresh_at(cutoff + chrono::Duration::minutes(1)));
    }
}
