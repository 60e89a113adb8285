use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use mac_winops::{AppInfo, MockWinOps, Rect, WinOps};
use parking_lot::Mutex;
use tokio::time::Instant;
use weaver_engine::{ActivationWait, CancelChooser, Chooser, Error, SelectionState, Selector};

const OWN: i32 = 1;
const EDITOR: i32 = 42;
const MAIL: i32 = 77;

/// Chooser that picks an app by name and counts invocations.
#[derive(Default)]
struct PickByName {
    name: Option<&'static str>,
    calls: AtomicUsize,
    offered: Mutex<Vec<i32>>,
}

impl PickByName {
    fn picking(name: &'static str) -> Self {
        Self {
            name: Some(name),
            ..Self::default()
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Chooser for PickByName {
    fn choose(&self, apps: &[AppInfo]) -> Option<usize> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.offered.lock() = apps.iter().map(|a| a.pid).collect();
        let name = self.name?;
        apps.iter().position(|a| a.name == name)
    }
}

/// Self, Editor and Mail running; each foreign app has one window.
fn desktop() -> MockWinOps {
    let mock = MockWinOps::new();
    mock.set_own_pid(OWN);
    mock.add_app(OWN, "Weaver");
    mock.add_app(EDITOR, "Editor");
    mock.add_app(MAIL, "Mail");
    mock.add_window(EDITOR, Rect::new(100.0, 100.0, 800.0, 600.0));
    mock.add_window(MAIL, Rect::new(200.0, 200.0, 600.0, 400.0));
    mock
}

fn selector(mock: &MockWinOps, chooser: Arc<dyn Chooser>) -> Selector {
    let ops: Arc<dyn WinOps> = Arc::new(mock.clone());
    Selector::new(ops, chooser, ActivationWait::default())
}

#[tokio::test(start_paused = true)]
async fn frontmost_foreign_app_is_adopted_without_chooser() {
    let mock = desktop();
    mock.set_frontmost(Some(EDITOR));
    let chooser = Arc::new(PickByName::default());
    let sel = selector(&mock, chooser.clone());
    let mut state = SelectionState::default();

    let win = sel.select(&mut state).await.unwrap();

    assert_eq!(win.pid, EDITOR);
    assert_eq!(state.process.as_ref().map(|a| a.pid), Some(EDITOR));
    assert_eq!(state.window, Some(win));
    assert_eq!(chooser.calls(), 0);
    assert!(mock.calls_contains("activate:42"));
}

#[tokio::test(start_paused = true)]
async fn self_frontmost_reuses_previous_app() {
    let mock = desktop();
    mock.set_frontmost(Some(EDITOR));
    let chooser = Arc::new(PickByName::default());
    let sel = selector(&mock, chooser.clone());
    let mut state = SelectionState::default();
    sel.select(&mut state).await.unwrap();

    // A second Editor window gains focus while our own menu is in front.
    let second = mock.add_window(EDITOR, Rect::new(0.0, 0.0, 300.0, 300.0));
    mock.set_focused(EDITOR, Some(second));
    mock.set_frontmost(Some(OWN));
    mock.clear_calls();

    let win = sel.select(&mut state).await.unwrap();

    assert_eq!(win, second);
    assert_eq!(state.process.as_ref().map(|a| a.pid), Some(EDITOR));
    assert_eq!(state.window, Some(second));
    assert_eq!(chooser.calls(), 0);
    assert_eq!(mock.count_calls("activate:"), 0);
}

#[tokio::test(start_paused = true)]
async fn cancelled_chooser_leaves_state_unset() {
    let mock = desktop();
    mock.set_frontmost(Some(OWN));
    let chooser = Arc::new(PickByName::default());
    let sel = selector(&mock, chooser.clone());
    let mut state = SelectionState::default();

    let err = sel.select(&mut state).await.unwrap_err();

    assert!(matches!(err, Error::NoTargetWindow(_)));
    assert_eq!(state, SelectionState::default());
    assert_eq!(chooser.calls(), 1);
    assert_eq!(*chooser.offered.lock(), vec![EDITOR, MAIL]);
    assert_eq!(mock.count_calls("activate:"), 0);
}

#[tokio::test(start_paused = true)]
async fn chosen_app_is_activated_and_adopted() {
    let mock = desktop();
    mock.set_frontmost(Some(OWN));
    let chooser = Arc::new(PickByName::picking("Mail"));
    let sel = selector(&mock, chooser.clone());
    let mut state = SelectionState::default();

    let win = sel.select(&mut state).await.unwrap();

    assert_eq!(win.pid, MAIL);
    assert_eq!(state.process.as_ref().map(|a| a.name.as_str()), Some("Mail"));
    assert!(mock.calls_contains("activate:77"));
}

#[tokio::test(start_paused = true)]
async fn out_of_range_choice_cancels() {
    struct Wild;
    impl Chooser for Wild {
        fn choose(&self, _apps: &[AppInfo]) -> Option<usize> {
            Some(99)
        }
    }
    let mock = desktop();
    mock.set_frontmost(Some(OWN));
    let sel = selector(&mock, Arc::new(Wild));
    let mut state = SelectionState::default();

    assert!(matches!(
        sel.select(&mut state).await,
        Err(Error::NoTargetWindow(_))
    ));
    assert!(!state.is_tracking());
}

#[tokio::test(start_paused = true)]
async fn chooser_is_skipped_without_candidates() {
    let mock = MockWinOps::new();
    mock.set_own_pid(OWN);
    mock.add_app(OWN, "Weaver");
    mock.set_frontmost(Some(OWN));
    let chooser = Arc::new(PickByName::default());
    let sel = selector(&mock, chooser.clone());
    let mut state = SelectionState::default();

    assert!(sel.select(&mut state).await.is_err());
    assert_eq!(chooser.calls(), 0);
}

#[tokio::test(start_paused = true)]
async fn window_resolution_falls_back_in_order() {
    let mock = desktop();
    mock.set_frontmost(Some(EDITOR));
    let main = mock.add_window(EDITOR, Rect::new(0.0, 0.0, 10.0, 10.0));
    let sel = selector(&mock, Arc::new(CancelChooser));
    let mut state = SelectionState::default();

    mock.set_focused(EDITOR, None);
    mock.set_main(EDITOR, Some(main));
    assert_eq!(sel.select(&mut state).await.unwrap(), main);

    mock.set_main(EDITOR, None);
    let first = sel.select(&mut state).await.unwrap();
    assert_ne!(first, main);
    assert_eq!(first.pid, EDITOR);
    assert!(mock.calls_contains("first_window:42"));
}

#[tokio::test(start_paused = true)]
async fn windowless_app_fails_and_keeps_prior_state() {
    let mock = desktop();
    mock.set_frontmost(Some(MAIL));
    let sel = selector(&mock, Arc::new(CancelChooser));
    let mut state = SelectionState::default();
    sel.select(&mut state).await.unwrap();
    let before = state.clone();

    mock.clear_windows(EDITOR);
    mock.set_frontmost(Some(EDITOR));
    let err = sel.select(&mut state).await.unwrap_err();

    assert!(matches!(err, Error::NoTargetWindow(_)));
    assert_eq!(state, before);
}

#[tokio::test(start_paused = true)]
async fn missing_permission_requests_trust_and_aborts() {
    let mock = desktop();
    mock.set_trusted(false);
    mock.set_frontmost(Some(EDITOR));
    let sel = selector(&mock, Arc::new(CancelChooser));
    let mut state = SelectionState::default();

    assert_eq!(sel.select(&mut state).await, Err(Error::PermissionDenied));
    assert!(mock.calls_contains("request_accessibility"));
    assert_eq!(mock.count_calls("activate:"), 0);
    assert_eq!(mock.count_calls("focused_window:"), 0);
}

#[tokio::test(start_paused = true)]
async fn activation_wait_is_bounded() {
    let mock = desktop();
    mock.set_frontmost(Some(OWN));
    mock.set_activation_focuses(false);
    let sel = selector(&mock, Arc::new(PickByName::picking("Editor")));
    let mut state = SelectionState::default();

    let start = Instant::now();
    let win = sel.select(&mut state).await.unwrap();
    let waited = start.elapsed();

    assert_eq!(win.pid, EDITOR);
    assert!(waited >= Duration::from_millis(200));
    assert!(waited < Duration::from_millis(300));
    assert!(mock.count_calls("frontmost_app") > 2);
}

#[tokio::test(start_paused = true)]
async fn activation_failure_does_not_abort() {
    let mock = desktop();
    mock.set_frontmost(Some(EDITOR));
    mock.set_fail_activate(true);
    let sel = selector(&mock, Arc::new(CancelChooser));
    let mut state = SelectionState::default();

    let win = sel.select(&mut state).await.unwrap();
    assert_eq!(win.pid, EDITOR);
}
