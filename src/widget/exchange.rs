//! Single-flight message exchange.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::client::Transport;
use crate::error::Error;
use crate::surface::{DisplayCommand, RenderSurface};
use crate::Result;

use super::message::Message;
use super::session::SessionController;

/// Transient per-exchange bookkeeping, reset after every exchange
/// regardless of outcome.
#[derive(Debug, Default)]
struct ExchangeState {
    in_flight: bool,
    typing_visible: bool,
}

/// Owns the send/receive protocol: input gating, the typing indicator and
/// the single-flight discipline.
pub struct ExchangeEngine {
    /// Flag flips only; never held across an await.
    state: Mutex<ExchangeState>,
    transport: Arc<dyn Transport>,
    surface: Arc<dyn RenderSurface>,
}

impl ExchangeEngine {
    pub fn new(transport: Arc<dyn Transport>, surface: Arc<dyn RenderSurface>) -> Self {
        Self {
            state: Mutex::new(ExchangeState::default()),
            transport,
            surface,
        }
    }

    /// Run one exchange: render the user message, issue the chat request,
    /// render the reply turns in protocol order.
    ///
    /// Rejected when the session is not ready, the trimmed text is empty,
    /// or another exchange is in flight; rejections surface as a system
    /// notice and come back as [`Error::Precondition`] for programmatic
    /// callers. Every accepted exchange returns `Ok` and ends by hiding
    /// the typing indicator, re-enabling input and restoring focus,
    /// whatever the network outcome; transport and server failures never
    /// propagate out, they become system messages in the transcript.
    pub async fn submit(&self, text: &str, session: &SessionController) -> Result<()> {
        let Some((credential, session_id)) = session.ready_handles().await else {
            self.notice("⚠️ Please wait, session not ready yet.");
            return Err(Error::Precondition("session is not ready".to_string()));
        };

        let text = text.trim();
        if text.is_empty() {
            self.notice("⚠️ Nothing to send. Type a message first.");
            return Err(Error::Precondition("message is empty".to_string()));
        }

        // Single-flight gate. The input control is disabled while an
        // exchange runs, so this only triggers on programmatic re-entry.
        {
            let mut state = self.state.lock().await;
            if state.in_flight {
                self.notice("⚠️ Please wait for the current reply to finish.");
                return Err(Error::Precondition(
                    "an exchange is already in flight".to_string(),
                ));
            }
            state.in_flight = true;
            state.typing_visible = true;
        }

        self.surface
            .display(DisplayCommand::AppendMessage(Message::user(text)));
        self.surface.display(DisplayCommand::ShowTyping);
        self.surface.display(DisplayCommand::SetInputEnabled(false));

        debug!(chars = text.len(), "exchange started");
        let outcome = self.transport.send_chat(&credential, &session_id, text).await;

        // The typing indicator drops before the first result renders.
        self.state.lock().await.typing_visible = false;
        self.surface.display(DisplayCommand::HideTyping);

        match outcome {
            Ok(turns) => {
                debug!(turns = turns.len(), "exchange complete");
                for turn in turns {
                    self.surface
                        .display(DisplayCommand::AppendMessage(Message::from_turn(turn)));
                }
            }
            Err(err) => {
                warn!(error = %err, "exchange failed");
                self.notice(format!("❌ Failed to send message: {err}"));
            }
        }

        self.state.lock().await.in_flight = false;
        self.surface.display(DisplayCommand::SetInputEnabled(true));
        self.surface.display(DisplayCommand::FocusInput);

        Ok(())
    }

    pub async fn in_flight(&self) -> bool {
        self.state.lock().await.in_flight
    }

    pub async fn typing_visible(&self) -> bool {
        self.state.lock().await.typing_visible
    }

    fn notice(&self, content: impl Into<String>) {
        self.surface
            .display(DisplayCommand::AppendMessage(Message::system(content)));
    }
}
