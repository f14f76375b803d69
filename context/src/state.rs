//! The conversation state value.
//!
//! Created empty when the assistant surface opens, mutated only by the
//! orchestrator, the injection controller and the summarizer trigger, and
//! discarded on close — never persisted.

use vendia_types::{Message, fingerprint};

#[derive(Debug, Default)]
pub struct ConversationState {
    messages: Vec<Message>,
    history_summary: String,
    system_fingerprint: String,
    ui_snapshot: String,
    ui_snapshot_fingerprint: String,
}

impl ConversationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    #[must_use]
    pub fn system_message(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.is_system())
    }

    /// Total character length of all non-system content, the quantity the
    /// pruning and summarization budgets are measured in.
    #[must_use]
    pub fn non_system_chars(&self) -> usize {
        self.messages
            .iter()
            .filter(|m| !m.is_system())
            .map(Message::content_chars)
            .sum()
    }

    #[must_use]
    pub fn history_summary(&self) -> &str {
        &self.history_summary
    }

    pub(crate) fn set_history_summary(&mut self, summary: String) {
        self.history_summary = summary;
    }

    #[must_use]
    pub fn system_fingerprint(&self) -> &str {
        &self.system_fingerprint
    }

    /// Drop any existing system message and prepend `message`, recording its
    /// fingerprint. Only the injection controller calls this.
    pub(crate) fn replace_system(&mut self, message: Message, print: String) {
        self.messages.retain(|m| !m.is_system());
        self.messages.insert(0, message);
        self.system_fingerprint = print;
    }

    #[must_use]
    pub fn ui_snapshot(&self) -> &str {
        &self.ui_snapshot
    }

    #[must_use]
    pub fn ui_snapshot_fingerprint(&self) -> &str {
        &self.ui_snapshot_fingerprint
    }

    /// Fingerprint-gated snapshot write.
    ///
    /// An empty capture (view unavailable) keeps the previous snapshot, and
    /// a byte-identical recapture is a no-op; both return `false`. The
    /// snapshot and its fingerprint are always written together.
    pub fn update_snapshot(&mut self, snapshot: String) -> bool {
        if snapshot.is_empty() {
            return false;
        }
        let print = fingerprint(&snapshot);
        if print == self.ui_snapshot_fingerprint {
            return false;
        }
        tracing::debug!(chars = snapshot.chars().count(), "ui snapshot updated");
        self.ui_snapshot = snapshot;
        self.ui_snapshot_fingerprint = print;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::ConversationState;
    use vendia_types::Message;

    #[test]
    fn starts_empty() {
        let state = ConversationState::new();
        assert!(state.messages().is_empty());
        assert!(state.history_summary().is_empty());
        assert!(state.system_fingerprint().is_empty());
        assert!(state.ui_snapshot().is_empty());
    }

    #[test]
    fn non_system_chars_excludes_system() {
        let mut state = ConversationState::new();
        state.push(Message::try_system("contexto largo del sistema").unwrap());
        state.push(Message::try_user("hola").unwrap());
        state.push(Message::try_assistant("buenas").unwrap());
        assert_eq!(state.non_system_chars(), 4 + 6);
    }

    #[test]
    fn snapshot_write_is_fingerprint_gated() {
        let mut state = ConversationState::new();
        assert!(state.update_snapshot("Menú:Ventas, Compras".to_string()));
        let print = state.ui_snapshot_fingerprint().to_string();

        // Byte-identical recapture: no-op.
        assert!(!state.update_snapshot("Menú:Ventas, Compras".to_string()));
        assert_eq!(state.ui_snapshot_fingerprint(), print);

        // Changed content: written, fingerprint moves.
        assert!(state.update_snapshot("Menú:Ventas".to_string()));
        assert_ne!(state.ui_snapshot_fingerprint(), print);
        assert_eq!(state.ui_snapshot(), "Menú:Ventas");
    }

    #[test]
    fn empty_capture_keeps_previous_snapshot() {
        let mut state = ConversationState::new();
        state.update_snapshot("Tabs:Detalle".to_string());
        assert!(!state.update_snapshot(String::new()));
        assert_eq!(state.ui_snapshot(), "Tabs:Detalle");
    }
}
