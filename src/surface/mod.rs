//! Render surface boundary.
//!
//! The widget core drives presentation exclusively through
//! [`DisplayCommand`]s and receives user actions as [`Intent`]s; it never
//! reaches into surface internals. Markdown is an optional surface
//! capability: the core only sets [`Message::rich_text`], and a surface
//! that prints plain text is fully conformant.
//!
//! # Implementing a Surface
//!
//! 1. Create a new file (e.g., `dom.rs`)
//! 2. Implement the [`RenderSurface`] trait
//! 3. Forward user actions as [`Intent`]s to
//!    [`ChatWidget::handle_intent`](crate::ChatWidget::handle_intent)

pub mod term;

pub use term::TermSurface;

use crate::widget::Message;

/// Instruction from the core to the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Append one message to the transcript (chronological, append-only).
    AppendMessage(Message),
    /// Show the typing indicator.
    ShowTyping,
    /// Hide the typing indicator.
    HideTyping,
    /// Enable or disable the input control.
    SetInputEnabled(bool),
    /// Return focus to the input control.
    FocusInput,
}

/// User intent forwarded from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Show the widget; the first open also establishes the session.
    Open,
    /// Hide the widget. Never cancels in-flight work.
    Close,
    /// Submit a message from the input control.
    Submit(String),
}

/// Presentation layer driven by the widget core.
///
/// Commands arrive in a fixed order per exchange; implementations apply
/// them and must not call back into the core.
pub trait RenderSurface: Send + Sync {
    /// Apply one display command.
    fn display(&self, command: DisplayCommand);
}

/// Surface that records the command stream, for assertions.
#[cfg(test)]
pub struct RecordingSurface {
    commands: std::sync::Mutex<Vec<DisplayCommand>>,
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self {
            commands: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Every command received so far, in order.
    pub fn commands(&self) -> Vec<DisplayCommand> {
        self.commands.lock().unwrap().clone()
    }

    /// The transcript so far, as `(role, content)` pairs.
    pub fn transcript(&self) -> Vec<(crate::widget::Role, String)> {
        self.commands
            .lock()
            .unwrap()
            .iter()
            .filter_map(|command| match command {
                DisplayCommand::AppendMessage(msg) => Some((msg.role.clone(), msg.content.clone())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl RenderSurface for RecordingSurface {
    fn display(&self, command: DisplayCommand) {
        self.commands.lock().unwrap().push(command);
    }
}
