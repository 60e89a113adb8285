use std::{io, sync::Arc};

use config::{BoundsMode, Half, LayoutCommand, Third, default_bindings};
use mac_winops::{AppInfo, MockWinOps, Rect, ScreenInfo, WinOps};
use parking_lot::Mutex;
use tracing::{Level, subscriber::set_default};
use tracing_subscriber::fmt;
use weaver_engine::{
    CancelChooser, Chooser, Error, HotkeyMap, ResizeHandle, ResizeService, Resizer, ResizerCfg,
};

/// Shared buffer collecting formatted log output.
#[derive(Clone, Default)]
struct LogBuf(Arc<Mutex<Vec<u8>>>);

impl LogBuf {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

const EDITOR: i32 = 42;

fn desktop() -> MockWinOps {
    let mock = MockWinOps::new();
    mock.add_app(EDITOR, "Editor");
    mock.set_screens(vec![ScreenInfo::uniform(Rect::new(0.0, 0.0, 1920.0, 1080.0))]);
    mock.add_window(EDITOR, Rect::new(100.0, 100.0, 800.0, 600.0));
    mock.set_frontmost(Some(EDITOR));
    mock
}

fn spawn(mock: &MockWinOps, chooser: Arc<dyn Chooser>) -> ResizeHandle {
    let ops: Arc<dyn WinOps> = Arc::new(mock.clone());
    let cfg = ResizerCfg {
        bounds: BoundsMode::Full,
        ..ResizerCfg::default()
    };
    ResizeService::spawn(Resizer::new(ops, chooser, cfg))
}

#[tokio::test(start_paused = true)]
async fn handle_runs_commands_and_reports_selection() {
    let mock = desktop();
    let handle = spawn(&mock, Arc::new(CancelChooser));

    assert!(!handle.selection().await.unwrap().is_tracking());
    let report = handle
        .resize(LayoutCommand::Third(Third::Center))
        .await
        .unwrap();
    assert_eq!(report.rect, Rect::new(640.0, 0.0, 640.0, 1080.0));

    let sel = handle.selection().await.unwrap();
    assert_eq!(sel.window, Some(report.target));
    assert_eq!(sel.process.map(|a| a.pid), Some(EDITOR));
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_are_serialized() {
    let mock = desktop();
    let handle = spawn(&mock, Arc::new(CancelChooser));

    let a = handle.clone();
    let b = handle.clone();
    let (ra, rb) = tokio::join!(
        a.resize(LayoutCommand::Half(Half::Left)),
        b.resize(LayoutCommand::Half(Half::Right)),
    );
    let (ra, rb) = (ra.unwrap(), rb.unwrap());

    // Both pipelines hit the same tracked window; selection ran once.
    assert_eq!(ra.target, rb.target);
    assert_eq!(mock.count_calls("activate:"), 1);
    assert_eq!(mock.count_calls("set_"), 4);
}

#[tokio::test(start_paused = true)]
async fn hotkey_ids_dispatch_into_the_service() {
    let mock = desktop();
    let handle = spawn(&mock, Arc::new(CancelChooser));
    let map = HotkeyMap::new(&default_bindings());

    assert_eq!(
        map.dispatch(4, &handle),
        Some(LayoutCommand::Third(Third::Center))
    );
    assert_eq!(map.dispatch(404, &handle), None);

    // Requests are handled in order, so the placement is done by now.
    let sel = handle.selection().await.unwrap();
    let win = sel.window.unwrap();
    assert_eq!(mock.frame_of(&win), Some(Rect::new(640.0, 0.0, 640.0, 1080.0)));
}

#[tokio::test(start_paused = true)]
async fn failed_hotkey_command_is_logged() {
    let logs = LogBuf::default();
    let writer = logs.clone();
    let subscriber = fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let _guard = set_default(subscriber);

    // Our own process is frontmost, nothing is tracked, and the chooser
    // cancels, so selection fails.
    let mock = desktop();
    mock.set_frontmost(Some(1));
    let handle = spawn(&mock, Arc::new(CancelChooser));
    let map = HotkeyMap::new(&default_bindings());

    assert!(map.dispatch(4, &handle).is_some());
    handle.selection().await.unwrap();

    let out = logs.contents();
    assert!(out.contains("WARN"), "{out}");
    assert!(out.contains("resize failed"), "{out}");
    assert!(out.contains("center-third"), "{out}");
    assert_eq!(mock.count_calls("set_"), 0);
}

#[tokio::test(start_paused = true)]
async fn denied_permission_on_hotkey_is_logged() {
    let logs = LogBuf::default();
    let writer = logs.clone();
    let subscriber = fmt()
        .with_max_level(Level::INFO)
        .with_ansi(false)
        .without_time()
        .with_writer(move || writer.clone())
        .finish();
    let _guard = set_default(subscriber);

    let mock = desktop();
    mock.set_trusted(false);
    let handle = spawn(&mock, Arc::new(CancelChooser));

    handle.submit(LayoutCommand::Half(Half::Left)).unwrap();
    handle.selection().await.unwrap();

    let out = logs.contents();
    assert!(out.contains("accessibility permission required"), "{out}");
}

#[tokio::test(start_paused = true)]
async fn stopped_service_reports_closed() {
    struct Explodes;
    impl Chooser for Explodes {
        fn choose(&self, _apps: &[AppInfo]) -> Option<usize> {
            panic!("chooser failure");
        }
    }
    let mock = desktop();
    mock.set_frontmost(Some(1));
    let handle = spawn(&mock, Arc::new(Explodes));

    assert_eq!(
        handle.resize(LayoutCommand::Half(Half::Left)).await,
        Err(Error::ServiceClosed)
    );
    assert_eq!(handle.reselect().await, Err(Error::ServiceClosed));
    assert_eq!(handle.selection().await, Err(Error::ServiceClosed));
    assert_eq!(
        handle.submit(LayoutCommand::Half(Half::Right)),
        Err(Error::ServiceClosed)
    );
}
