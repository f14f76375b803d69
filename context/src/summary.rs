//! Rolling-summary trigger.
//!
//! A lossy, bounded compaction: once the non-system history crosses the
//! trigger size, the most recent turns are condensed into one summary line
//! that *replaces* the previous one. Older detail is simply dropped.

use vendia_types::{Message, truncate_chars};

use crate::state::ConversationState;

/// Non-system character total at which summarization fires.
pub const SUMMARY_TRIGGER_CHARS: usize = 12_000;
/// How many trailing turns the summary condenses.
pub const SUMMARY_TAIL_MESSAGES: usize = 8;
/// Per-turn character cap inside the summary.
pub const SUMMARY_SNIPPET_CHARS: usize = 110;

/// Render the trailing turns of `messages` as one compact summary line, or
/// `None` while the history is still under the trigger size.
#[must_use]
pub fn summarize_tail(messages: &[Message]) -> Option<String> {
    let non_system: Vec<&Message> = messages.iter().filter(|m| !m.is_system()).collect();
    let total: usize = non_system.iter().map(|m| m.content_chars()).sum();
    if total < SUMMARY_TRIGGER_CHARS {
        return None;
    }

    let start = non_system.len().saturating_sub(SUMMARY_TAIL_MESSAGES);
    let fragments: Vec<String> = non_system[start..]
        .iter()
        .map(|message| {
            let prefix = if message.role_str() == "user" { "U>" } else { "A>" };
            format!(
                "{prefix} {}",
                truncate_chars(message.content(), SUMMARY_SNIPPET_CHARS, "")
            )
        })
        .collect();

    Some(format!("Reciente: {}", fragments.join(" | ")))
}

/// Apply [`summarize_tail`] to the state, replacing any prior summary.
/// Returns whether a new summary was written.
pub fn maybe_summarize(state: &mut ConversationState) -> bool {
    match summarize_tail(state.messages()) {
        Some(summary) => {
            tracing::debug!(chars = summary.chars().count(), "history summary replaced");
            state.set_history_summary(summary);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        SUMMARY_SNIPPET_CHARS, SUMMARY_TAIL_MESSAGES, maybe_summarize, summarize_tail,
    };
    use crate::state::ConversationState;
    use vendia_types::Message;

    fn long_history(turns: usize, chars_each: usize) -> Vec<Message> {
        (0..turns)
            .map(|i| {
                let body = format!("turno {i} {}", "x".repeat(chars_each));
                if i % 2 == 0 {
                    Message::try_user(body).unwrap()
                } else {
                    Message::try_assistant(body).unwrap()
                }
            })
            .collect()
    }

    #[test]
    fn below_trigger_does_nothing() {
        assert!(summarize_tail(&long_history(4, 100)).is_none());
    }

    #[test]
    fn fires_at_trigger_with_role_prefixes() {
        let summary = summarize_tail(&long_history(20, 700)).expect("over trigger");
        assert!(summary.starts_with("Reciente: "));
        assert!(summary.contains("U> turno 18"));
        assert!(summary.contains("A> turno 19"));
        // Only the trailing window, not the whole history.
        assert!(!summary.contains("turno 11"));
        assert!(summary.contains("turno 12"));
    }

    #[test]
    fn summary_length_is_bounded() {
        let summary = summarize_tail(&long_history(200, 5_000)).expect("over trigger");
        // 8 fragments of at most 110 chars plus prefixes and separators.
        let ceiling = SUMMARY_TAIL_MESSAGES * (SUMMARY_SNIPPET_CHARS + 6) + 16;
        assert!(summary.chars().count() <= ceiling);
    }

    #[test]
    fn replaces_rather_than_grows() {
        let mut state = ConversationState::new();
        for message in long_history(20, 700) {
            state.push(message);
        }
        assert!(maybe_summarize(&mut state));
        let first = state.history_summary().to_string();

        for message in long_history(20, 700) {
            state.push(message);
        }
        assert!(maybe_summarize(&mut state));
        let second = state.history_summary().to_string();

        // Re-rendered from the current tail, not appended to the old one.
        assert!(!second.starts_with(&format!("{first} ")));
        assert!(second.chars().count() <= first.chars().count() + 32);
        assert_eq!(second.matches("Reciente: ").count(), 1);
    }

    #[test]
    fn system_message_does_not_count_or_appear() {
        let mut messages = vec![Message::try_system("s".repeat(50_000)).unwrap()];
        messages.extend(long_history(4, 100));
        // Huge system content alone must not trip the trigger.
        assert!(summarize_tail(&messages).is_none());
    }
}
