//! Context window and prompt assembly for one exchange.
//!
//! The provider sees a single prompt string:
//! ```text
//! {persona preamble} Current conversation history: {json of last N turns} User message: {message}
//! ```
//! The history window already contains the user turn being answered.

use serde_json::json;

use anos_types::chat::Turn;

/// Name the assistant introduces itself with.
pub const ASSISTANT_NAME: &str = "Anos AI";

/// The most recent `size` turns, most recent last.
pub fn context_window(history: &[Turn], size: usize) -> &[Turn] {
    let start = history.len().saturating_sub(size);
    &history[start..]
}

/// Builds the single-string prompt sent to the provider.
pub struct PromptBuilder {
    context_turns: usize,
}

impl PromptBuilder {
    pub fn new(context_turns: usize) -> Self {
        Self { context_turns }
    }

    /// Persona and behavioral instructions that lead every prompt.
    pub fn preamble() -> String {
        format!(
            "You are {ASSISTANT_NAME}, a helpful and friendly AI assistant. \
             Respond in the same language as the user. Be concise but helpful."
        )
    }

    /// Assemble the prompt from the session history and the raw user message.
    pub fn build(&self, history: &[Turn], message: &str) -> String {
        let window: Vec<_> = context_window(history, self.context_turns)
            .iter()
            .map(|turn| {
                json!({
                    "role": turn.role.to_string(),
                    "text": turn.text,
                    "timestamp": turn.timestamp.to_rfc3339(),
                })
            })
            .collect();
        let history_json = serde_json::Value::Array(window).to_string();

        format!(
            "{} Current conversation history: {history_json} User message: {message}",
            Self::preamble()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turns(n: usize) -> Vec<Turn> {
        (0..n)
            .map(|i| {
                if i % 2 == 0 {
                    Turn::user(format!("u{i}"))
                } else {
                    Turn::assistant(format!("a{i}"))
                }
            })
            .collect()
    }

    #[test]
    fn test_window_shorter_than_size_returns_all() {
        let history = turns(3);
        assert_eq!(context_window(&history, 6).len(), 3);
    }

    #[test]
    fn test_window_keeps_most_recent_last() {
        let history = turns(10);
        let window = context_window(&history, 6);
        assert_eq!(window.len(), 6);
        assert_eq!(window[0].text, "u4");
        assert_eq!(window[5].text, "a9");
    }

    #[test]
    fn test_window_of_empty_history() {
        assert!(context_window(&[], 6).is_empty());
    }

    #[test]
    fn test_prompt_contains_preamble_window_and_message() {
        let history = turns(8);
        let prompt = PromptBuilder::new(6).build(&history, "what now?");

        assert!(prompt.starts_with("You are Anos AI"));
        assert!(prompt.contains("Respond in the same language as the user"));
        assert!(prompt.ends_with("User message: what now?"));
        // u0 and a1 fall outside the 6-turn window.
        assert!(!prompt.contains("\"u0\""));
        assert!(!prompt.contains("\"a1\""));
        assert!(prompt.contains("\"u2\""));
        assert!(prompt.contains("\"a7\""));
    }

    #[test]
    fn test_prompt_history_is_valid_json_array() {
        let history = turns(2);
        let prompt = PromptBuilder::new(6).build(&history, "x");
        let start = prompt.find('[').unwrap();
        let end = prompt.rfind(']').unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&prompt[start..=end]).unwrap();
        let arr = parsed.as_array().unwrap();
        assert_eq!(arr.len(), 2);
        assert_eq!(arr[0]["role"], "user");
        assert_eq!(arr[1]["role"], "assistant");
    }
}
