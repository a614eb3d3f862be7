//! Prompt construction from conversation history.
//!
//! The entire stored history is always replayed into the prompt, one line
//! per turn. There is no windowing, truncation, or summarization: prompt
//! size grows without bound as a conversation lengthens. This is a known
//! scaling limit of the relay, preserved for compatibility -- any windowing
//! policy would change externally observable behavior.

use askcampus_types::turn::Turn;

/// Fixed system instruction sent with every inference call.
pub const SYSTEM_INSTRUCTION: &str = "You are AskCampus, a helpful campus assistant \
for the University of Calgary. Be direct, friendly, and concise. Answer like a \
student peer, not a corporate chatbot. Make sure you give relevant University of \
Calgary information only.";

/// Serialize a conversation into a single prompt block.
///
/// One line per turn, formatted as `"<role>: <content>"`, newline-joined,
/// with a trailing newline.
pub fn build_prompt(history: &[Turn]) -> String {
    let lines: Vec<String> = history
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect();
    format!("{}\n", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_turn_prompt() {
        let history = vec![Turn::user("Where is the library?")];
        assert_eq!(build_prompt(&history), "user: Where is the library?\n");
    }

    #[test]
    fn test_full_history_replayed_in_order() {
        let history = vec![
            Turn::user("Where is the library?"),
            Turn::assistant("TFDL is on the main quad."),
            Turn::user("When does it open?"),
        ];
        assert_eq!(
            build_prompt(&history),
            "user: Where is the library?\n\
             assistant: TFDL is on the main quad.\n\
             user: When does it open?\n"
        );
    }

    #[test]
    fn test_prompt_ends_with_single_newline() {
        let history = vec![Turn::user("hi"), Turn::assistant("hello")];
        let prompt = build_prompt(&history);
        assert!(prompt.ends_with("hello\n"));
        assert!(!prompt.ends_with("\n\n"));
    }

    #[test]
    fn test_multiline_content_passes_through() {
        let history = vec![Turn::user("line one\nline two")];
        assert_eq!(build_prompt(&history), "user: line one\nline two\n");
    }
}
