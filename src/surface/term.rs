//! Terminal reference surface.
//!
//! Prints the transcript with role-colored prefixes. This is the bundled
//! plain-text surface: `rich_text` messages are printed as-is.

use std::sync::Mutex;

use colored::Colorize;

use crate::config::WidgetConfig;
use crate::widget::{Message, Role};

use super::{DisplayCommand, RenderSurface};

#[derive(Debug, Default)]
struct TermState {
    input_enabled: bool,
    typing: bool,
}

/// Render surface writing to stdout.
pub struct TermSurface {
    title: String,
    state: Mutex<TermState>,
}

impl TermSurface {
    pub fn new(config: &WidgetConfig) -> Self {
        Self {
            title: config.title.clone(),
            state: Mutex::new(TermState {
                input_enabled: true,
                typing: false,
            }),
        }
    }

    /// Whether the core currently accepts input. Host REPLs gate reads on
    /// this between commands.
    pub fn input_enabled(&self) -> bool {
        self.state.lock().unwrap().input_enabled
    }

    /// Whether the typing indicator is showing.
    pub fn typing(&self) -> bool {
        self.state.lock().unwrap().typing
    }

    fn print_message(&self, msg: &Message) {
        match msg.role {
            Role::User => println!("{}: {}", "You".blue().bold(), msg.content),
            Role::Assistant => println!("{}: {}", self.title.green().bold(), msg.content),
            Role::System => println!("  {}", msg.content.yellow().italic()),
            Role::Tool => println!("{}: {}", "tool".magenta(), msg.content),
        }
    }
}

impl RenderSurface for TermSurface {
    fn display(&self, command: DisplayCommand) {
        match command {
            DisplayCommand::AppendMessage(msg) => self.print_message(&msg),
            DisplayCommand::ShowTyping => {
                self.state.lock().unwrap().typing = true;
                println!("{}", "…".dimmed());
            }
            DisplayCommand::HideTyping => {
                self.state.lock().unwrap().typing = false;
            }
            DisplayCommand::SetInputEnabled(enabled) => {
                self.state.lock().unwrap().input_enabled = enabled;
            }
            // Focus has no meaning on a line-oriented terminal.
            DisplayCommand::FocusInput => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_gating_tracked() {
        let config = WidgetConfig::new("asst_1", "https://api.example.com");
        let surface = TermSurface::new(&config);
        assert!(surface.input_enabled());

        surface.display(DisplayCommand::SetInputEnabled(false));
        assert!(!surface.input_enabled());

        surface.display(DisplayCommand::SetInputEnabled(true));
        assert!(surface.input_enabled());
    }

    #[test]
    fn test_typing_indicator_tracked() {
        let config = WidgetConfig::new("asst_1", "https://api.example.com");
        let surface = TermSurface::new(&config);

        surface.display(DisplayCommand::ShowTyping);
        assert!(surface.typing());

        surface.display(DisplayCommand::HideTyping);
        assert!(!surface.typing());
    }
}
