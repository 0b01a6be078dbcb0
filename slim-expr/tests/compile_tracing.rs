//! Compilation reports each fragment it accepts through `tracing`

use slim_expr::compile;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::Layer;

#[derive(Default)]
struct Fields(Vec<(String, String)>);

impl Visit for Fields {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.0.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.0.push((field.name().to_string(), format!("{value:?}")));
    }
}

/// Keeps the fields of every event it sees.
#[derive(Clone, Default)]
struct Recorder(Arc<Mutex<Vec<Vec<(String, String)>>>>);

impl<S: Subscriber> Layer<S> for Recorder {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut fields = Fields::default();
        event.record(&mut fields);
        self.0.lock().unwrap().push(fields.0);
    }
}

fn field<'a>(event: &'a [(String, String)], name: &str) -> Option<&'a str> {
    event
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

#[test]
fn compile_emits_one_event_per_fragment() {
    let recorder = Recorder::default();
    let subscriber = tracing_subscriber::registry().with(recorder.clone());

    tracing::subscriber::with_default(subscriber, || {
        compile(" for x in items ").unwrap();
        compile("upper(name)").unwrap();
        assert!(compile("1 +").is_err());
    });

    let events = recorder.0.lock().unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(field(&events[0], "fragment"), Some("for x in items"));
    assert_eq!(field(&events[0], "kind"), Some("iterate"));
    assert_eq!(field(&events[1], "fragment"), Some("upper(name)"));
    assert_eq!(field(&events[1], "kind"), Some("value"));
}
