#![forbid(unsafe_code)]

//! The engine reports its work through `tracing`: a span per word, a trace
//! event per matched substring, a debug summary per built index.

use std::sync::{Arc, Mutex};

use hyph_text::{HyphenPolicy, PatternSet, hyphenate, hyphenate_bytes};
use tracing::Subscriber;
use tracing_subscriber::Layer;
use tracing_subscriber::layer::{Context, SubscriberExt};

#[derive(Default)]
struct Seen {
    spans: Vec<String>,
    messages: Vec<String>,
}

struct Capture {
    seen: Arc<Mutex<Seen>>,
}

impl<S> Layer<S> for Capture
where
    S: Subscriber + for<'lookup> tracing_subscriber::registry::LookupSpan<'lookup>,
{
    fn on_new_span(
        &self,
        attrs: &tracing::span::Attributes<'_>,
        _id: &tracing::Id,
        _ctx: Context<'_, S>,
    ) {
        self.seen
            .lock()
            .expect("capture lock")
            .spans
            .push(attrs.metadata().name().to_string());
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        struct Msg {
            message: Option<String>,
        }
        impl tracing::field::Visit for Msg {
            fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
                if field.name() == "message" {
                    self.message = Some(value.to_string());
                }
            }

            fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
                if field.name() == "message" {
                    self.message = Some(format!("{value:?}").trim_matches('"').to_string());
                }
            }
        }
        let mut msg = Msg { message: None };
        event.record(&mut msg);
        if let Some(message) = msg.message {
            self.seen.lock().expect("capture lock").messages.push(message);
        }
    }
}

fn capture() -> (Arc<Mutex<Seen>>, tracing::subscriber::DefaultGuard) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let subscriber = tracing_subscriber::registry().with(Capture {
        seen: Arc::clone(&seen),
    });
    (seen, tracing::subscriber::set_default(subscriber))
}

fn count(messages: &[String], name: &str) -> usize {
    messages.iter().filter(|m| m.as_str() == name).count()
}

#[test]
fn match_events_and_word_span() {
    let (seen, _guard) = capture();

    let index = PatternSet::parse("hy1ph\nhe2n\nxyz").unwrap().build_index().unwrap();
    let policy = HyphenPolicy::new(1, 1, '-').unwrap();
    assert_eq!(hyphenate(".hyphen.", &index, &policy).unwrap(), "hy-phen");

    let seen = seen.lock().expect("capture lock");
    assert!(seen.spans.iter().any(|s| s == "hyphenate"), "{:?}", seen.spans);
    assert_eq!(count(&seen.messages, "patterns.build_index"), 1);
    // "hyph" and "hen" occur once each; "xyz" never.
    assert_eq!(count(&seen.messages, "hyphenate.match"), 2);
    assert_eq!(count(&seen.messages, "hyphenate.result"), 1);
}

#[test]
fn malformed_input_is_reported() {
    let (seen, _guard) = capture();

    let index = PatternSet::parse("a1b").unwrap().build_index().unwrap();
    let policy = HyphenPolicy::default();
    let out = hyphenate_bytes(b".a\xc3b.", &index, &policy).unwrap();
    assert_eq!(out, b"a\xc3b");

    let seen = seen.lock().expect("capture lock");
    assert_eq!(count(&seen.messages, "hyphenate.malformed_utf8"), 1);
    assert_eq!(count(&seen.messages, "hyphenate.match"), 0);
}
