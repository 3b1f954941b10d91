//! Session establishment and lifecycle.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::auth::CredentialProvider;
use crate::client::Transport;
use crate::error::Error;
use crate::surface::{DisplayCommand, RenderSurface};
use crate::Result;

use super::message::Message;

/// Session establishment state.
///
/// Transitions: `Unstarted -> Initializing -> {Ready, Failed}`. `Failed`
/// is not terminal; a later [`SessionController::ensure_ready`] call
/// retries the full sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Unstarted,
    Initializing,
    Ready,
    Failed,
}

/// Server-side conversation context. Owned exclusively by the controller
/// and scoped to the widget instance's lifetime; never reset automatically.
#[derive(Debug, Default)]
struct Session {
    id: Option<String>,
    credential: Option<String>,
    status: SessionStatus,
}

/// Sequences session creation and exposes readiness state.
pub struct SessionController {
    /// State flips only; never held across an await.
    session: Mutex<Session>,
    /// Serializes establishment attempts so a concurrent caller queues
    /// behind the running one instead of issuing a duplicate request.
    attempt: Mutex<()>,
    provider: Arc<dyn CredentialProvider>,
    transport: Arc<dyn Transport>,
    surface: Arc<dyn RenderSurface>,
    welcome: String,
}

impl SessionController {
    pub fn new(
        provider: Arc<dyn CredentialProvider>,
        transport: Arc<dyn Transport>,
        surface: Arc<dyn RenderSurface>,
        welcome: &str,
    ) -> Self {
        Self {
            session: Mutex::new(Session::default()),
            attempt: Mutex::new(()),
            provider,
            transport,
            surface,
            welcome: welcome.to_string(),
        }
    }

    /// Make the session usable, establishing it if needed.
    ///
    /// Idempotent once `Ready`: repeated calls return immediately with no
    /// network traffic. A caller arriving while an attempt is running
    /// queues behind it and reports that attempt's outcome. On failure the
    /// session is left `Failed` and one system error message is emitted;
    /// there is no automatic retry.
    pub async fn ensure_ready(&self) -> SessionStatus {
        let entry = self.session.lock().await.status;
        if entry == SessionStatus::Ready {
            return SessionStatus::Ready;
        }

        let _running = self.attempt.lock().await;

        let current = self.session.lock().await.status;
        if current == SessionStatus::Ready {
            return SessionStatus::Ready;
        }
        if entry == SessionStatus::Initializing && current == SessionStatus::Failed {
            // The attempt this call queued behind settled; report its
            // outcome instead of issuing a duplicate request.
            return SessionStatus::Failed;
        }

        self.session.lock().await.status = SessionStatus::Initializing;
        debug!("initializing session");

        match self.establish().await {
            Ok((credential, id)) => {
                info!(session_id = %id, "session ready");
                {
                    let mut session = self.session.lock().await;
                    session.credential = Some(credential);
                    session.id = Some(id);
                    session.status = SessionStatus::Ready;
                }
                self.surface.display(DisplayCommand::AppendMessage(Message::system(
                    self.welcome.as_str(),
                )));
                SessionStatus::Ready
            }
            Err(err) => {
                warn!(error = %err, "session initialization failed");
                self.session.lock().await.status = SessionStatus::Failed;
                self.surface.display(DisplayCommand::AppendMessage(Message::system(
                    format!("❌ Failed to initialize session: {err}"),
                )));
                SessionStatus::Failed
            }
        }
    }

    /// Credential fetch followed by session creation.
    async fn establish(&self) -> Result<(String, String)> {
        let token = self.provider.get_token().await.map_err(|e| match e {
            err @ Error::Credential(_) => err,
            other => Error::Credential(other.to_string()),
        })?;
        let created = self.transport.create_session(&token).await?;
        Ok((token, created.id))
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.lock().await.status
    }

    /// Credential and session id, available once the session is `Ready`.
    pub(crate) async fn ready_handles(&self) -> Option<(String, String)> {
        let session = self.session.lock().await;
        if session.status != SessionStatus::Ready {
            return None;
        }
        match (&session.credential, &session.id) {
            (Some(credential), Some(id)) => Some((credential.clone(), id.clone())),
            _ => None,
        }
    }
}
