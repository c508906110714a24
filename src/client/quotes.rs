//! Rotating motivational quotes shown under the task stats.

use std::time::{Duration, SystemTime};
use tokio::sync::watch;
use tokio::task::JoinHandle;

pub const QUOTES: [&str; 5] = [
    "Do something today that your future self will thank you for.",
    "Small progress is still progress.",
    "Focus on being productive instead of busy.",
    "Don't watch the clock; do what it does. Keep going.",
    "Your only limit is your mind.",
];

/// How often the quote changes.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(10);

/// Quote shown before the first rotation.
pub fn initial_quote() -> &'static str {
    QUOTES[0]
}

/// Pick a quote using the clock's sub-second nanos as the source of variety.
///
/// Not uniform; the rotation is cosmetic.
pub fn random_quote() -> &'static str {
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    QUOTES[nanos as usize % QUOTES.len()]
}

/// Publish a new quote every `period` until all receivers are dropped.
pub fn spawn_rotation(period: Duration) -> (watch::Receiver<&'static str>, JoinHandle<()>) {
    let (tx, rx) = watch::channel(initial_quote());
    let task = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately; keep the initial quote for one period.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if tx.send(random_quote()).is_err() {
                break;
            }
        }
    });
    (rx, task)
}
