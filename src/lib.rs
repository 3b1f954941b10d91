//! Parley - embeddable chat client for hosted AI assistants
//!
//! This library provides the session and message lifecycle engine for
//! embedding a conversational assistant into a host application. The host
//! supplies a credential provider and a render surface; parley owns session
//! establishment, single-flight message exchange and input gating.

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod surface;
pub mod widget;

pub use error::{Error, Result};
pub use widget::ChatWidget;
