//! Diagnostic logging for the binary, plus a capturing layer for tests.
//!
//! Engine events go to stderr so they never mix with command output.
//! `RUST_LOG` overrides the default filter.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Registry;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

pub const DEFAULT_FILTER: &str = "warn,parlor_engine=info";

/// One captured event.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub fields: Vec<(String, String)>,
}

/// Layer that keeps every event it sees; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct TestLogSubscriber {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogSubscriber {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEntry>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.lock().clone()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Entries whose message equals `message`.
    pub fn find(&self, message: &str) -> Vec<LogEntry> {
        self.lock()
            .iter()
            .filter(|e| e.message == message)
            .cloned()
            .collect()
    }
}

impl<S: Subscriber> Layer<S> for TestLogSubscriber {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut entry = LogEntry {
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: String::new(),
            fields: Vec::new(),
        };
        event.record(&mut entry);
        self.lock().push(entry);
    }
}

impl Visit for LogEntry {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{:?}", value);
        match field.name() {
            "message" => self.message = rendered,
            name => self.fields.push((name.to_string(), rendered)),
        }
    }
}

/// Installs the stderr fmt subscriber. Returns false when a global
/// subscriber was already set.
pub fn init_logging() -> bool {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok()
}

/// Shared capturing subscriber, registered globally on first use and
/// cleared on every call.
pub fn init_test_logging() -> TestLogSubscriber {
    static SUBSCRIBER: OnceLock<TestLogSubscriber> = OnceLock::new();
    static REGISTERED: OnceLock<bool> = OnceLock::new();

    let subscriber = SUBSCRIBER.get_or_init(TestLogSubscriber::new);

    REGISTERED.get_or_init(|| {
        let registry = Registry::default().with(subscriber.clone());
        tracing::subscriber::set_global_default(registry).is_ok()
    });

    subscriber.clear();
    subscriber.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use parlor_engine::deck::Deck;
    use parlor_engine::game::{HoldemConfig, HoldemTable};
    use parlor_engine::player::{PlayerAction, SeatConfig};
    use tracing::{info, warn};

    #[test]
    fn captures_message_and_fields() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone());

        tracing::subscriber::with_default(registry, || {
            info!(seat = 3, "seat joined");
            warn!("short stack");
        });

        let entries = subscriber.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, Level::INFO);
        assert_eq!(entries[0].message, "seat joined");
        assert_eq!(entries[0].fields, vec![("seat".to_string(), "3".to_string())]);
        assert_eq!(entries[1].level, Level::WARN);

        subscriber.clear();
        assert!(subscriber.entries().is_empty());
    }

    #[test]
    fn engine_reports_hand_results() {
        let subscriber = TestLogSubscriber::new();
        let registry = Registry::default().with(subscriber.clone());

        tracing::subscriber::with_default(registry, || {
            let seats = vec![SeatConfig::ai(0, 1000), SeatConfig::ai(1, 1000)];
            let mut table = HoldemTable::new(seats, HoldemConfig::default()).unwrap();
            table.start_hand(Deck::new_with_seed(5)).unwrap();
            table.apply_action(PlayerAction::Fold).unwrap();
        });

        let entries = subscriber.entries();
        assert!(entries.iter().any(|e| e.target.starts_with("parlor_engine")));
        let started = subscriber.find("hand started");
        assert_eq!(started.len(), 1);
        assert!(started[0].fields.iter().any(|(k, v)| k == "dealer" && v == "0"));
    }
}
