//! Action and store tests
//!
//! Dispatch through `EffectStore`, drive the lookup with a fake
//! `WeatherService`, and check the state the form ends up in.

use std::sync::Mutex;

use async_trait::async_trait;
use tui_dispatch::testing::*;
use tui_dispatch::{EffectStore, assert_emitted, assert_not_emitted};
use zipweather::{
    action::Action,
    api::{FALLBACK_ERROR, LookupError, WeatherService},
    effect::Effect,
    reducer::reducer,
    soap::{FETCH_FAILED, ZipEncoding},
    state::{AppState, ViewState},
};

/// Records every envelope it is asked to post and answers with a canned reply.
struct FakeService {
    reply: Result<String, LookupError>,
    posted: Mutex<Vec<String>>,
}

impl FakeService {
    fn answering(reply: Result<String, LookupError>) -> Self {
        Self {
            reply,
            posted: Mutex::new(Vec::new()),
        }
    }

    fn posted(&self) -> Vec<String> {
        self.posted.lock().unwrap().clone()
    }
}

#[async_trait]
impl WeatherService for FakeService {
    async fn post_envelope(&self, envelope: String) -> Result<String, LookupError> {
        self.posted.lock().unwrap().push(envelope);
        self.reply.clone()
    }
}

/// Run the effects a dispatch declared, returning the actions the tasks resolve to.
async fn run_effects(effects: Vec<Effect>, service: &dyn WeatherService) -> Vec<Action> {
    let mut actions = Vec::new();
    for effect in effects {
        match effect {
            Effect::PostEnvelope { envelope } => {
                actions.push(Action::from_lookup(service.post_envelope(envelope).await));
            }
        }
    }
    actions
}

#[tokio::test]
async fn test_submit_posts_zip_verbatim_once() {
    for zip in ["90210", "abc", "12 34", "</web:ZIP>"] {
        let service = FakeService::answering(Ok("<ok/>".into()));
        let mut store = EffectStore::new(AppState::new(zip, ZipEncoding::Verbatim), reducer);

        let result = store.dispatch(Action::FormSubmit);
        for action in run_effects(result.effects, &service).await {
            store.dispatch(action);
        }

        let posted = service.posted();
        assert_eq!(posted.len(), 1, "exactly one POST for {zip:?}");
        assert!(posted[0].contains(&format!("<web:ZIP>{zip}</web:ZIP>")));
    }
}

#[tokio::test]
async fn test_success_shows_raw_result() {
    let service = FakeService::answering(Ok("<ok/>".into()));
    let mut store = EffectStore::new(AppState::new("90210", ZipEncoding::Verbatim), reducer);

    let result = store.dispatch(Action::FormSubmit);
    assert!(store.state().view.is_loading());
    for action in run_effects(result.effects, &service).await {
        store.dispatch(action);
    }

    assert_eq!(store.state().view, ViewState::Result("<ok/>".into()));
    assert!(store.state().view.error().is_none());
    assert!(!store.state().view.is_loading());
}

#[tokio::test]
async fn test_http_500_shows_fixed_error() {
    let service = FakeService::answering(Err(LookupError::Status(500)));
    let mut store = EffectStore::new(AppState::new("90210", ZipEncoding::Verbatim), reducer);

    let result = store.dispatch(Action::FormSubmit);
    assert!(store.state().view.is_loading());
    for action in run_effects(result.effects, &service).await {
        store.dispatch(action);
    }

    assert_eq!(store.state().view, ViewState::Error(FETCH_FAILED.into()));
    assert!(store.state().view.result().is_none());
    assert!(!store.state().view.is_loading());
}

#[tokio::test]
async fn test_transport_failure_surfaces_message() {
    let service = FakeService::answering(Err(LookupError::Transport("Network down".into())));
    let mut store = EffectStore::new(AppState::new("90210", ZipEncoding::Verbatim), reducer);

    let result = store.dispatch(Action::FormSubmit);
    assert!(store.state().view.is_loading());
    for action in run_effects(result.effects, &service).await {
        store.dispatch(action);
    }

    assert_eq!(store.state().view, ViewState::Error("Network down".into()));
    assert!(!store.state().view.is_loading());
}

#[test]
fn test_from_lookup_mapping() {
    assert_eq!(
        Action::from_lookup(Ok("<x/>".into())),
        Action::LookupDidLoad("<x/>".into())
    );
    assert_eq!(
        Action::from_lookup(Err(LookupError::Status(503))),
        Action::LookupDidError(FETCH_FAILED.into())
    );
    assert_eq!(
        Action::from_lookup(Err(LookupError::Transport(String::new()))),
        Action::LookupDidError(FALLBACK_ERROR.into())
    );
}

#[test]
fn test_second_submit_blocked_until_resolved() {
    let mut store = EffectStore::new(AppState::new("90210", ZipEncoding::Verbatim), reducer);

    let first = store.dispatch(Action::FormSubmit);
    assert_eq!(first.effects.len(), 1);

    let second = store.dispatch(Action::FormSubmit);
    assert!(!second.changed);
    assert!(second.effects.is_empty());

    store.dispatch(Action::LookupDidLoad("<ok/>".into()));
    let third = store.dispatch(Action::FormSubmit);
    assert_eq!(third.effects.len(), 1);
    assert!(store.state().view.is_loading());
}

#[test]
fn test_new_submit_clears_previous_outcome() {
    let mut store = EffectStore::new(AppState::new("90210", ZipEncoding::Verbatim), reducer);

    store.dispatch(Action::FormSubmit);
    store.dispatch(Action::LookupDidError("Network down".into()));
    assert!(store.state().view.error().is_some());

    store.dispatch(Action::FormSubmit);
    assert_eq!(store.state().view, ViewState::Loading);
}

#[test]
fn test_action_categories() {
    let did_load = Action::LookupDidLoad("<ok/>".into());
    let scroll = Action::UiScrollDown;
    let tick = Action::Tick;

    assert_eq!(did_load.category(), Some("lookup_did"));
    assert_eq!(scroll.category(), Some("ui"));
    assert_eq!(tick.category(), None);

    assert!(did_load.is_lookup_did());
    assert!(scroll.is_ui());
}

#[test]
fn test_harness_emit_and_drain() {
    let mut harness = TestHarness::<(), Action>::new(());

    harness.emit(Action::FormZipChange("9".into()));
    harness.emit(Action::FormSubmit);
    harness.emit(Action::LookupDidError("oops".into()));

    let actions = harness.drain_emitted();
    actions.assert_count(3);
}

#[test]
fn test_assert_emitted_macro() {
    let actions = vec![Action::FormSubmit, Action::LookupDidLoad("<ok/>".into())];

    assert_emitted!(actions, Action::FormSubmit);
    assert_emitted!(actions, Action::LookupDidLoad(_));
    assert_not_emitted!(actions, Action::Quit);
    assert_not_emitted!(actions, Action::LookupDidError(_));
}
