//! Widget core: session lifecycle, message exchange and intent handling.
//!
//! This module contains:
//! - Transcript message types
//! - [`SessionController`] for session establishment
//! - [`ExchangeEngine`] for the single-flight send/receive protocol
//! - [`ChatWidget`] tying them together behind the intent stream

mod exchange;
mod message;
mod session;

pub use exchange::ExchangeEngine;
pub use message::{Message, Role};
pub use session::{SessionController, SessionStatus};

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::auth::CredentialProvider;
use crate::client::Transport;
use crate::config::WidgetConfig;
use crate::surface::{Intent, RenderSurface};
use crate::Result;

/// One embeddable chat widget instance.
///
/// Each instance owns its session and exchange state outright; any number
/// of instances coexist in one process without shared state.
pub struct ChatWidget {
    id: Uuid,
    config: WidgetConfig,
    session: SessionController,
    exchange: ExchangeEngine,
    visible: Mutex<bool>,
}

impl ChatWidget {
    /// Validate the configuration and assemble a widget.
    ///
    /// The widget starts hidden with no session; the first `Open` intent
    /// establishes one.
    pub fn new(
        config: WidgetConfig,
        provider: Arc<dyn CredentialProvider>,
        transport: Arc<dyn Transport>,
        surface: Arc<dyn RenderSurface>,
    ) -> Result<Self> {
        let config = config.normalized()?;
        let session = SessionController::new(
            provider,
            transport.clone(),
            surface.clone(),
            config.welcome_message.as_str(),
        );
        let exchange = ExchangeEngine::new(transport, surface);

        Ok(Self {
            id: Uuid::new_v4(),
            config,
            session,
            exchange,
            visible: Mutex::new(false),
        })
    }

    /// Process one user intent from the render surface.
    ///
    /// Safe to call concurrently: a `Close` arriving while an exchange
    /// awaits the transport still applies immediately, because no lock is
    /// held across a network await.
    pub async fn handle_intent(&self, intent: Intent) {
        match intent {
            Intent::Open => self.open().await,
            Intent::Close => self.close().await,
            Intent::Submit(text) => {
                // Rejections are already surfaced as transcript notices.
                let _ = self.submit(&text).await;
            }
        }
    }

    /// Submit a message, returning any precondition rejection for
    /// programmatic callers. The rejection is also surfaced as a system
    /// notice, so intent handling can ignore it.
    pub async fn submit(&self, text: &str) -> Result<()> {
        self.exchange.submit(text, &self.session).await
    }

    /// Show the widget, establishing the session if it isn't ready yet.
    pub async fn open(&self) {
        debug!(widget = %self.id, "open");
        *self.visible.lock().await = true;
        self.session.ensure_ready().await;
    }

    /// Hide the widget. Purely a visibility toggle: in-flight work keeps
    /// running and the session is kept.
    pub async fn close(&self) {
        debug!(widget = %self.id, "close");
        *self.visible.lock().await = false;
    }

    pub async fn is_visible(&self) -> bool {
        *self.visible.lock().await
    }

    pub async fn status(&self) -> SessionStatus {
        self.session.status().await
    }

    pub async fn in_flight(&self) -> bool {
        self.exchange.in_flight().await
    }

    /// Identifier distinguishing this instance in log output.
    pub fn instance_id(&self) -> Uuid {
        self.id
    }

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }
}
