//! Session orchestration for the embedded assistant.
//!
//! One logical session, one active user. The [`Assistant`] owns the
//! conversation state behind a single guarded handle and drives the
//! send-message control flow: local intent short-circuit → visual-context
//! advisory → context assembly → remote call → post-processing → state
//! update. Local composition is synchronous; only the two collaborator
//! calls (mini-context fetch, completion call) suspend.

mod compose;
mod entity;
mod session;

pub use entity::detect_entity;
pub use session::{
    ADVISORY_COOLDOWN_SECS, APOLOGY_REPLY, Assistant, SendError, SendOutcome, VISUAL_ADVISORY,
};
