//! Wire types for the assistant service API.
//!
//! Shared between transport implementations so fakes and the HTTP backend
//! speak the same shapes.

use serde::Deserialize;

/// Response body from session creation.
///
/// The service returns more fields; only the session id matters here.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionCreated {
    pub id: String,
}

/// One turn of the chat response array, in protocol order.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_created_ignores_extra_fields() {
        let created: SessionCreated =
            serde_json::from_str(r#"{"id": "sess_1", "created_at": "2026-01-01"}"#).unwrap();
        assert_eq!(created.id, "sess_1");
    }

    #[test]
    fn test_chat_turns_parse_in_order() {
        let turns: Vec<ChatTurn> = serde_json::from_str(
            r#"[{"role": "assistant", "content": "a"}, {"role": "tool", "content": "b"}]"#,
        )
        .unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, "assistant");
        assert_eq!(turns[1].content, "b");
    }
}
