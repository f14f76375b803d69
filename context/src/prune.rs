//! History pruning to the outbound character budget.

use vendia_types::Message;

/// Maximum total characters of non-system history sent per dispatch.
pub const MAX_CONTEXT_CHARS: usize = 20_000;

/// Trim `messages` to fit `max_chars`, most-recent turns first.
///
/// The system message (if any) is carried unconditionally and never counts
/// against the budget. Non-system messages are walked newest to oldest and
/// included until the running total would exceed the budget; the result
/// preserves chronological order. The newest non-system message always
/// ships, even when it alone exceeds the budget — truncating inside a
/// message is not this layer's job.
#[must_use]
pub fn prune(messages: &[Message], max_chars: usize) -> Vec<Message> {
    let system = messages.iter().find(|m| m.is_system()).cloned();

    let mut kept_rev: Vec<Message> = Vec::new();
    let mut total = 0usize;
    for message in messages.iter().rev().filter(|m| !m.is_system()) {
        let len = message.content_chars();
        if total + len > max_chars {
            if kept_rev.is_empty() {
                kept_rev.push(message.clone());
            }
            break;
        }
        total += len;
        kept_rev.push(message.clone());
    }
    kept_rev.reverse();

    system.into_iter().chain(kept_rev).collect()
}

#[cfg(test)]
mod tests {
    use super::{MAX_CONTEXT_CHARS, prune};
    use vendia_types::Message;

    fn non_system_chars(messages: &[Message]) -> usize {
        messages
            .iter()
            .filter(|m| !m.is_system())
            .map(Message::content_chars)
            .sum()
    }

    #[test]
    fn under_budget_is_untouched() {
        let messages = vec![
            Message::try_system("ctx").unwrap(),
            Message::try_user("hola").unwrap(),
            Message::try_assistant("buenas").unwrap(),
        ];
        let pruned = prune(&messages, MAX_CONTEXT_CHARS);
        assert_eq!(pruned.len(), 3);
    }

    #[test]
    fn drops_oldest_messages_first() {
        let messages: Vec<Message> = (0..50)
            .map(|i| Message::try_user(format!("{i:0>1000}")).unwrap())
            .collect();
        let pruned = prune(&messages, 20_000);

        // 50 messages of 1000 chars against a 20k budget: 20 newest survive.
        assert_eq!(pruned.len(), 20);
        assert!(pruned[0].content().ends_with("30"));
        assert!(pruned[19].content().ends_with("49"));
        assert!(non_system_chars(&pruned) <= 20_000);
    }

    #[test]
    fn budget_holds_with_system_present() {
        let mut messages = vec![Message::try_system("x".repeat(5_000)).unwrap()];
        for i in 0..10 {
            messages.push(Message::try_user(format!("{i:0>300}")).unwrap());
        }
        let pruned = prune(&messages, 1_000);

        assert!(pruned[0].is_system());
        assert_eq!(pruned.iter().filter(|m| m.is_system()).count(), 1);
        assert!(non_system_chars(&pruned) <= 1_000);
        // 3 × 300 fits, a 4th would not.
        assert_eq!(pruned.len(), 4);
    }

    #[test]
    fn preserves_chronological_order() {
        let messages = vec![
            Message::try_user("primero").unwrap(),
            Message::try_assistant("segundo").unwrap(),
            Message::try_user("tercero").unwrap(),
        ];
        let pruned = prune(&messages, 100);
        let contents: Vec<&str> = pruned.iter().map(Message::content).collect();
        assert_eq!(contents, vec!["primero", "segundo", "tercero"]);
    }

    #[test]
    fn oversized_newest_message_still_ships() {
        let messages = vec![
            Message::try_user("vieja").unwrap(),
            Message::try_user("n".repeat(500)).unwrap(),
        ];
        let pruned = prune(&messages, 100);
        assert_eq!(pruned.len(), 1);
        assert_eq!(pruned[0].content_chars(), 500);
    }

    #[test]
    fn stops_at_first_message_that_does_not_fit() {
        // Once one message fails to fit, older ones are not resurrected
        // even if they would fit on their own.
        let messages = vec![
            Message::try_user("x".repeat(10)).unwrap(),
            Message::try_user("y".repeat(90)).unwrap(),
            Message::try_user("z".repeat(20)).unwrap(),
        ];
        let pruned = prune(&messages, 115);
        let contents: Vec<usize> = pruned.iter().map(Message::content_chars).collect();
        assert_eq!(contents, vec![90, 20]);
    }

    #[test]
    fn empty_history_prunes_to_empty() {
        assert!(prune(&[], MAX_CONTEXT_CHARS).is_empty());
    }
}
