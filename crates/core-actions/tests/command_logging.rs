use core_actions::{SearchSession, execute_command, handle_event};
use core_events::KeyEvent;
use core_model::EditorModel;
use core_state::EditorState;
use core_text::Buffer;
use std::sync::{Arc, Mutex};
use tracing::dispatcher::{Dispatch, with_default};
use tracing::subscriber::Interest;
use tracing::{Metadata, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

#[derive(Clone, Default)]
struct TargetCapture {
    events: Arc<Mutex<Vec<String>>>,
}

impl TargetCapture {
    fn targets(&self) -> Arc<Mutex<Vec<String>>> {
        self.events.clone()
    }
}

impl<S> Layer<S> for TargetCapture
where
    S: Subscriber,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::always()
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        self.events
            .lock()
            .unwrap()
            .push(event.metadata().target().to_string());
    }
}

fn captured(f: impl FnOnce()) -> Vec<String> {
    let capture = TargetCapture::default();
    let targets = capture.targets();
    let subscriber = Registry::default().with(capture.with_filter(LevelFilter::TRACE));
    let dispatch = Dispatch::new(subscriber);
    with_default(&dispatch, f);
    let recorded = targets.lock().unwrap().clone();
    recorded
}

fn model() -> EditorModel {
    EditorModel::new(EditorState::new(Buffer::from_str("t", "abc abc").unwrap()))
}

#[test]
fn failed_command_logs_actions_command() {
    let targets = captured(|| {
        let mut m = model();
        let mut s = SearchSession::default();
        execute_command(":nope", &mut s, &mut m);
    });
    assert!(targets.iter().any(|t| t == "actions.command"));
    assert!(targets.iter().any(|t| t == "state.status"));
}

#[test]
fn one_shot_search_logs_scan_and_navigation() {
    let targets = captured(|| {
        let mut m = model();
        let mut s = SearchSession::default();
        execute_command(":find-in-buffer abc", &mut s, &mut m);
    });
    for expected in ["actions.command", "search.pattern", "search.scan", "search.navigate"] {
        assert!(
            targets.iter().any(|t| t == expected),
            "missing {expected} in {targets:?}"
        );
    }
}

#[test]
fn interactive_session_logs_transitions() {
    let targets = captured(|| {
        let mut m = model();
        let mut s = SearchSession::default();
        execute_command(":find-in-buffer", &mut s, &mut m);
        handle_event(&mut s, &mut m, KeyEvent::char('a').into());
    });
    assert!(targets.iter().any(|t| t == "actions.interactive"));
}

#[test]
fn substitution_logs_engine_target() {
    let targets = captured(|| {
        let mut m = model();
        let mut s = SearchSession::default();
        execute_command(":find-and-replace %s/abc/x/g", &mut s, &mut m);
    });
    assert!(targets.iter().any(|t| t == "search.substitute"));
}
