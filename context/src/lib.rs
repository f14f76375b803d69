//! Conversation state management for the embedded assistant.
//!
//! Everything here follows one discipline: bounded state, fingerprint-gated
//! writes. The system context and the UI snapshot are only rewritten when
//! their fingerprints change, the message history is pruned to a character
//! budget before every dispatch, and older turns collapse into a single
//! replaceable summary line once the history crosses its trigger size.
//!
//! # Architecture
//!
//! ```text
//! ConversationState
//! ├── messages (system message unique + first, when present)
//! ├── history_summary (replaced, never appended)
//! ├── system_fingerprint (gates re-injection)
//! └── ui_snapshot + fingerprint (gates re-capture writes)
//! ```

mod normalize;
mod prune;
mod snapshot;
mod state;
mod summary;
mod window;

pub use normalize::{CONCISE_WORD_LIMIT, enforce_budget, normalize};
pub use prune::{MAX_CONTEXT_CHARS, prune};
pub use snapshot::{UI_SNAPSHOT_MAX_CHARS, ViewFacts, ViewProbe, capture};
pub use state::ConversationState;
pub use summary::{
    SUMMARY_SNIPPET_CHARS, SUMMARY_TAIL_MESSAGES, SUMMARY_TRIGGER_CHARS, maybe_summarize,
    summarize_tail,
};
pub use window::{build_system_context, ensure_injected};
