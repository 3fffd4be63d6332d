//! Events emitted by the checks
//!
//! Failures are reported at `debug` with the check name, the error kind and
//! the label; passes only at `trace`.

use std::fmt::{self, Write as _};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::Registry;
use vartest::{dimtest, nantest, postest, typetest_array, Kind, TracingConfig};

#[derive(Debug)]
struct Recorded {
    level: Level,
    fields: String,
}

/// Layer that keeps every event it sees
#[derive(Clone, Default)]
struct EventLog(Arc<Mutex<Vec<Recorded>>>);

impl EventLog {
    fn take(&self) -> Vec<Recorded> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

struct FieldText(String);

impl Visit for FieldText {
    fn record_str(&mut self, field: &Field, value: &str) {
        let _ = write!(self.0, "{}={} ", field.name(), value);
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let _ = write!(self.0, "{}={:?} ", field.name(), value);
    }
}

impl<S: Subscriber> Layer<S> for EventLog {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut text = FieldText(String::new());
        event.record(&mut text);
        self.0.lock().unwrap().push(Recorded {
            level: *event.metadata().level(),
            fields: text.0,
        });
    }
}

fn with_log<F: FnOnce()>(config: &TracingConfig, f: F) -> Vec<Recorded> {
    let log = EventLog::default();
    let subscriber = Registry::default()
        .with(config.filter().unwrap())
        .with(log.clone());
    tracing::subscriber::with_default(subscriber, f);
    log.take()
}

#[test]
fn test_failed_check_emits_debug_event() {
    let events = with_log(&TracingConfig::new().with_verbosity(1), || {
        assert!(postest(&[2.0, -0.25], "sigma").is_err());
    });

    assert_eq!(events.len(), 1, "{events:?}");
    let event = &events[0];
    assert_eq!(event.level, Level::DEBUG);
    assert!(event.fields.contains("check=postest"), "{}", event.fields);
    assert!(event.fields.contains("kind=Range"), "{}", event.fields);
    assert!(event.fields.contains("label=sigma"), "{}", event.fields);
    assert!(event.fields.contains("-0.25"), "{}", event.fields);
}

#[test]
fn test_element_failures_carry_element_label() {
    let events = with_log(&TracingConfig::new().with_verbosity(1), || {
        assert!(typetest_array(&vec![1, 2], Kind::Str, "ids").is_err());
    });

    assert_eq!(events.len(), 1, "{events:?}");
    assert!(events[0].fields.contains("check=typetest"));
    assert!(events[0].fields.contains("label=element 0 of ids"));
}

#[test]
fn test_passing_checks_are_silent_at_debug() {
    let events = with_log(&TracingConfig::new().with_verbosity(1), || {
        assert!(nantest(&[1.0, 2.0], "x").is_ok());
        assert!(dimtest(&[1.0, 2.0], &[2], "x").is_ok());
    });
    assert!(events.is_empty(), "{events:?}");

    let events = with_log(&TracingConfig::new().with_verbosity(2), || {
        assert!(nantest(&[1.0, 2.0], "x").is_ok());
        assert!(dimtest(&[1.0, 2.0], &[2], "x").is_ok());
    });
    assert_eq!(events.len(), 2, "{events:?}");
    assert!(events.iter().all(|event| event.level == Level::TRACE));
}

#[test]
fn test_env_filter_can_mute_the_crate() {
    let config = TracingConfig::new()
        .with_verbosity(2)
        .with_env_filter("vartest=off");
    let events = with_log(&config, || {
        assert!(postest(&-1, "n").is_err());
    });
    assert!(events.is_empty(), "{events:?}");
}

#[test]
fn test_global_subscriber_installs_once() {
    let config = TracingConfig::new().with_verbosity(2).with_test_writer(true);
    assert!(config.init().is_ok());
    assert!(postest(&-1.0, "after init").is_err());

    let again = TracingConfig::new().with_test_writer(true).init();
    assert!(again.is_err());
}
