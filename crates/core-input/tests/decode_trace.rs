//! The decoder reports each key on the `input.decode` target at trace level.

use std::fmt;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tracing::Subscriber;
use tracing::dispatcher::Dispatch;
use tracing::field::{Field, Visit};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Clone, Default)]
struct Capture {
    events: Arc<Mutex<Vec<(String, Vec<(String, String)>)>>>,
}

#[derive(Default)]
struct FieldCollector {
    fields: Vec<(String, String)>,
}

impl Visit for FieldCollector {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.fields
            .push((field.name().to_string(), format!("{:?}", value)));
    }
}

impl<S> Layer<S> for Capture
where
    S: Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut collector = FieldCollector::default();
        event.record(&mut collector);
        self.events
            .lock()
            .unwrap()
            .push((event.metadata().target().to_string(), collector.fields));
    }
}

#[test]
fn decoded_key_is_traced() {
    let capture = Capture::default();
    let events = capture.events.clone();
    let dispatch = Dispatch::new(Registry::default().with(capture));

    tracing::dispatcher::with_default(&dispatch, || {
        let mut decoder = core_input::KeyDecoder::new(Cursor::new(b"\x1b[1;5D".to_vec()));
        decoder.decode().unwrap();
    });

    let events = events.lock().unwrap();
    let (_, fields) = events
        .iter()
        .find(|(target, _)| target == "input.decode")
        .expect("missing input.decode event");
    assert!(
        fields
            .iter()
            .any(|(name, value)| name == "event" && value.contains("CtrlLeft")),
        "event field should carry the decoded key: {fields:?}"
    );
    assert!(fields.iter().any(|(name, value)| name == "byte" && value == "27"));
}
