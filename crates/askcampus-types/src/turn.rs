//! Conversation turn types for AskCampus.
//!
//! A conversation is an ordered sequence of turns, oldest first, keyed by an
//! opaque session identifier. The persisted form is a bare JSON array of
//! `{"role": ..., "content": ...}` objects -- no envelope, no version field --
//! so these types must serialize to exactly that shape.

use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

/// Role of a turn in a stored conversation.
///
/// Only `user` and `assistant` appear in persisted history; the system
/// instruction is fixed per deployment and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnRole::User => write!(f, "user"),
            TurnRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for TurnRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" => Ok(TurnRole::Assistant),
            other => Err(format!("invalid turn role: '{other}'")),
        }
    }
}

/// A single turn within a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub content: String,
}

impl Turn {
    /// Create a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_role_roundtrip() {
        for role in [TurnRole::User, TurnRole::Assistant] {
            let s = role.to_string();
            let parsed: TurnRole = s.parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_turn_role_rejects_unknown() {
        assert!("system".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_turn_serializes_to_wire_shape() {
        let turn = Turn::user("Where is the library?");
        let json = serde_json::to_string(&turn).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"Where is the library?"}"#);
    }

    #[test]
    fn test_history_array_roundtrip() {
        let history = vec![Turn::user("hi"), Turn::assistant("hello!")];
        let json = serde_json::to_string(&history).unwrap();
        let parsed: Vec<Turn> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }

    #[test]
    fn test_history_rejects_unknown_role() {
        let json = r#"[{"role":"moderator","content":"no"}]"#;
        assert!(serde_json::from_str::<Vec<Turn>>(&json).is_err());
    }
}
