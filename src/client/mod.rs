//! Transport abstraction over the assistant service API.
//!
//! This module provides:
//! - [`Transport`] trait for swappable backends
//! - [`HttpTransport`] for the reqwest implementation
//! - Wire types shared by all backends
//!
//! # Adding a New Backend
//!
//! 1. Create a new file (e.g., `grpc.rs`)
//! 2. Implement the `Transport` trait
//! 3. Hand it to [`ChatWidget::new`](crate::ChatWidget::new)

mod types;

pub mod http;

pub use http::HttpTransport;
pub use types::{ChatTurn, SessionCreated};

use async_trait::async_trait;

use crate::Result;

/// Request/response exchanges against the assistant service.
///
/// Implementations map non-success statuses to
/// [`Error::ServerRejected`](crate::Error::ServerRejected) and
/// network-level failures to [`Error::Transport`](crate::Error::Transport).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Open a new conversation session for the configured assistant.
    async fn create_session(&self, token: &str) -> Result<SessionCreated>;

    /// Send one user message into a session and collect the reply turns.
    async fn send_chat(&self, token: &str, session_id: &str, message: &str)
        -> Result<Vec<ChatTurn>>;
}

/// Fake transport for testing.
///
/// Pops scripted outcomes per endpoint and counts issued requests. Either
/// endpoint can be gated on a zero-permit semaphore to hold a request
/// in flight until the test releases it.
#[cfg(test)]
pub struct FakeTransport {
    sessions: std::sync::Mutex<std::collections::VecDeque<Result<SessionCreated>>>,
    chats: std::sync::Mutex<std::collections::VecDeque<Result<Vec<ChatTurn>>>>,
    session_calls: std::sync::atomic::AtomicUsize,
    chat_calls: std::sync::atomic::AtomicUsize,
    session_gate: std::sync::Mutex<Option<std::sync::Arc<tokio::sync::Semaphore>>>,
    chat_gate: std::sync::Mutex<Option<std::sync::Arc<tokio::sync::Semaphore>>>,
}

#[cfg(test)]
impl FakeTransport {
    pub fn new() -> Self {
        Self {
            sessions: std::sync::Mutex::new(std::collections::VecDeque::new()),
            chats: std::sync::Mutex::new(std::collections::VecDeque::new()),
            session_calls: std::sync::atomic::AtomicUsize::new(0),
            chat_calls: std::sync::atomic::AtomicUsize::new(0),
            session_gate: std::sync::Mutex::new(None),
            chat_gate: std::sync::Mutex::new(None),
        }
    }

    /// Queue a successful session creation.
    pub fn push_session(self, id: &str) -> Self {
        self.sessions
            .lock()
            .unwrap()
            .push_back(Ok(SessionCreated { id: id.to_string() }));
        self
    }

    /// Queue a failing session creation.
    pub fn push_session_err(self, err: crate::Error) -> Self {
        self.sessions.lock().unwrap().push_back(Err(err));
        self
    }

    /// Queue a successful chat exchange from `(role, content)` pairs.
    pub fn push_chat(self, turns: &[(&str, &str)]) -> Self {
        let turns = turns
            .iter()
            .map(|(role, content)| ChatTurn {
                role: role.to_string(),
                content: content.to_string(),
            })
            .collect();
        self.chats.lock().unwrap().push_back(Ok(turns));
        self
    }

    /// Queue a failing chat exchange.
    pub fn push_chat_err(self, err: crate::Error) -> Self {
        self.chats.lock().unwrap().push_back(Err(err));
        self
    }

    /// Hold every subsequent session creation until a permit is added.
    pub fn gate_sessions(&self) -> std::sync::Arc<tokio::sync::Semaphore> {
        let gate = std::sync::Arc::new(tokio::sync::Semaphore::new(0));
        *self.session_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    /// Hold every subsequent chat exchange until a permit is added.
    pub fn gate_chats(&self) -> std::sync::Arc<tokio::sync::Semaphore> {
        let gate = std::sync::Arc::new(tokio::sync::Semaphore::new(0));
        *self.chat_gate.lock().unwrap() = Some(gate.clone());
        gate
    }

    pub fn session_calls(&self) -> usize {
        self.session_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.chat_calls.load(std::sync::atomic::Ordering::SeqCst)
    }

    async fn wait(gate: Option<std::sync::Arc<tokio::sync::Semaphore>>) {
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

#[cfg(test)]
#[async_trait]
impl Transport for FakeTransport {
    async fn create_session(&self, _token: &str) -> Result<SessionCreated> {
        self.session_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let gate = self.session_gate.lock().unwrap().clone();
        Self::wait(gate).await;
        self.sessions
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(crate::Error::Transport("no scripted session".to_string())))
    }

    async fn send_chat(
        &self,
        _token: &str,
        _session_id: &str,
        _message: &str,
    ) -> Result<Vec<ChatTurn>> {
        self.chat_calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        let gate = self.chat_gate.lock().unwrap().clone();
        Self::wait(gate).await;
        self.chats
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(crate::Error::Transport("no scripted chat".to_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fake_transport_scripted_outcomes() {
        let transport = FakeTransport::new()
            .push_session("sess_1")
            .push_chat(&[("assistant", "Hello!")]);

        let created = transport.create_session("tok").await.unwrap();
        assert_eq!(created.id, "sess_1");

        let turns = transport.send_chat("tok", "sess_1", "hi").await.unwrap();
        assert_eq!(turns[0].content, "Hello!");

        // Exhausted queues fail rather than invent replies.
        assert!(transport.send_chat("tok", "sess_1", "hi").await.is_err());
        assert_eq!(transport.session_calls(), 1);
        assert_eq!(transport.chat_calls(), 2);
    }
}
