use std::sync::{Arc, Mutex};

use sift_matcher::{MatcherOptions, PatternMatcher};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer};

/// Records the target of every event that reaches it.
#[derive(Clone, Default)]
struct TargetRecorder(Arc<Mutex<Vec<String>>>);

impl<S: tracing::Subscriber> Layer<S> for TargetRecorder {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.0
            .lock()
            .unwrap()
            .push(event.metadata().target().to_owned());
    }
}

fn targets_under(directives: &str, f: impl FnOnce()) -> Vec<String> {
    let recorder = TargetRecorder::default();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::try_new(directives).unwrap())
        .with(recorder.clone());
    tracing::subscriber::with_default(subscriber, f);
    let targets = recorder.0.lock().unwrap().clone();
    targets
}

fn filter_a_few_candidates() {
    let matcher = PatternMatcher::new("value", MatcherOptions::default());
    assert!(matcher.is_match("GetValue"));
    matcher.dispose();
}

#[test]
fn matcher_events_use_the_dotted_target() {
    let targets = targets_under("off,sift.matcher=trace", filter_a_few_candidates);
    assert!(!targets.is_empty());
    assert!(targets.iter().all(|t| t == "sift.matcher"), "{targets:?}");
}

#[test]
fn other_targets_filter_matcher_events_out() {
    let targets = targets_under("off,sift.cli=trace", filter_a_few_candidates);
    assert_eq!(targets, Vec::<String>::new());
}
