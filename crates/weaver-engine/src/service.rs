//! Serialized access to a [`Resizer`].
//!
//! The resizer lives inside one tokio task; callers talk to it through a
//! cloneable [`ResizeHandle`]. Requests are processed one at a time, so every
//! select → locate → apply sequence runs to completion before the next begins.

use config::LayoutCommand;
use mac_winops::WindowRef;
use tokio::sync::{mpsc, oneshot};
use tracing::debug;

use crate::{
    Error, Result,
    mutator::ApplyReport,
    orchestrator::{Resizer, log_outcome},
    selector::SelectionState,
};

/// Requests accepted by the service task.
enum Command {
    /// Run one layout command.
    Resize {
        /// Requested placement.
        command: LayoutCommand,
        /// Reply channel.
        respond: oneshot::Sender<Result<ApplyReport>>,
    },
    /// Re-run selection.
    Reselect {
        /// Reply channel.
        respond: oneshot::Sender<Result<WindowRef>>,
    },
    /// Snapshot the selection state.
    Selection {
        /// Reply channel.
        respond: oneshot::Sender<SelectionState>,
    },
}

/// Cheap, clonable handle to the resize service.
#[derive(Clone, Debug)]
pub struct ResizeHandle {
    /// Request channel into the service task.
    tx: mpsc::UnboundedSender<Command>,
}

impl ResizeHandle {
    /// Run `command` on the service.
    pub async fn resize(&self, command: LayoutCommand) -> Result<ApplyReport> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(Command::Resize {
                command,
                respond: tx,
            })
            .map_err(|_| Error::ServiceClosed)?;
        rx.await.map_err(|_| Error::ServiceClosed)?
    }

    /// Queue `command` without waiting for the outcome.
    ///
    /// The service logs the outcome; nothing is reported back.
    pub fn submit(&self, command: LayoutCommand) -> Result<()> {
        let (tx, _rx) = oneshot::channel();
        self.tx
            .send(Command::Resize {
                command,
                respond: tx,
            })
            .map_err(|_| Error::ServiceClosed)
    }

    /// Re-run window selection.
    pub async fn reselect(&self) -> Result<WindowRef> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(Command::Reselect { respond: tx })
            .map_err(|_| Error::ServiceClosed)?;
        rx.await.map_err(|_| Error::ServiceClosed)?
    }

    /// Current selection state.
    pub async fn selection(&self) -> Result<SelectionState> {
        let (tx, rx) = oneshot::channel();
        self.tx
            .send(Command::Selection { respond: tx })
            .map_err(|_| Error::ServiceClosed)?;
        rx.await.map_err(|_| Error::ServiceClosed)
    }
}

/// Resize service constructor.
pub struct ResizeService;

impl ResizeService {
    /// Move `resizer` into a new task and return a handle to it.
    ///
    /// Must be called within a tokio runtime. The task ends when every
    /// handle has been dropped.
    ///
    /// A panic inside a request (for example in a [`Chooser`]) ends the task
    /// for good: every later request on any handle fails with
    /// [`Error::ServiceClosed`]. Long-lived hosts should treat that error as
    /// a signal to spawn a fresh service.
    ///
    /// [`Chooser`]: crate::selector::Chooser
    pub fn spawn(resizer: Resizer) -> ResizeHandle {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_service(rx, resizer));
        ResizeHandle { tx }
    }
}

/// Service loop: handle requests strictly in arrival order.
async fn run_service(mut rx: mpsc::UnboundedReceiver<Command>, mut resizer: Resizer) {
    while let Some(cmd) = rx.recv().await {
        match cmd {
            Command::Resize { command, respond } => {
                let out = resizer.resize(command).await;
                log_outcome(command, &out);
                let _ = respond.send(out);
            }
            Command::Reselect { respond } => {
                let _ = respond.send(resizer.reselect().await);
            }
            Command::Selection { respond } => {
                let _ = respond.send(resizer.selection());
            }
        }
    }
    debug!("resize service stopped");
}
