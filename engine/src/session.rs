//! The send-message state machine.
//!
//! All local work happens synchronously under the session lock; the lock is
//! released across the two suspension points (mini-context fetch and the
//! completion call). The `loading` flag is the sole concurrency guard: a
//! send that arrives while another is in flight is rejected, not queued,
//! and there is no cancellation — an in-flight request settles before
//! `loading` clears.

use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use thiserror::Error;

use vendia_context::{
    CONCISE_WORD_LIMIT, ConversationState, MAX_CONTEXT_CHARS, ViewProbe, build_system_context,
    capture, enforce_budget, ensure_injected, maybe_summarize, normalize, prune,
};
use vendia_nav::{Module, ModuleMapProvider, resolve};
use vendia_providers::{CompletionBackend, MiniContextProvider, NO_REPLY_FALLBACK};
use vendia_types::{Message, NonEmptyString, SessionFacts, truncate_chars};

use crate::compose::{compose_outbound, display_content};
use crate::entity::detect_entity;

/// Appended when the completion call fails; the underlying error goes to
/// [`Assistant::last_error`] instead of the transcript.
pub const APOLOGY_REPLY: &str = "Ocurrió un error procesando la solicitud.";

/// Appended when a screen-dependent question arrives with no visual context.
pub const VISUAL_ADVISORY: &str = "Para ayudarte mejor con esta vista, añade una breve \
     descripción de lo que ves en pantalla (menús, botones, pestañas).";

/// Minimum interval between two consecutive visual advisories.
pub const ADVISORY_COOLDOWN_SECS: i64 = 90;

/// Hard cap on the mini-context segment of an outbound message.
const MINI_CONTEXT_MAX_CHARS: usize = 600;

static NEEDS_VISUAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)pantalla|vista|veo|aparece|se muestra|bot[oó]n|pesta[ñn]a")
        .expect("valid pattern")
});

#[derive(Debug, Error)]
pub enum SendError {
    #[error("el mensaje está vacío")]
    EmptyInput,
    #[error("hay un envío en curso")]
    Busy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// Answered locally from the navigation map; the endpoint was not
    /// reached.
    ShortCircuited,
    /// Asked the user for a visual description instead of dispatching.
    AdvisoryIssued,
    /// Remote reply received, normalized and appended.
    Answered,
    /// Remote call failed; the apology was appended and the error recorded.
    Failed,
}

#[derive(Debug)]
struct SessionInner {
    state: ConversationState,
    screen_desc: Option<String>,
    last_advisory: Option<DateTime<Utc>>,
    last_error: Option<String>,
    loading: bool,
    concise_mode: bool,
    auto_snapshot: bool,
    include_mini_context: bool,
}

/// The session orchestrator.
///
/// Owns the [`ConversationState`] for one assistant surface. Dropped when
/// the surface closes; nothing is persisted.
pub struct Assistant<C, M> {
    inner: Mutex<SessionInner>,
    facts: SessionFacts,
    modules: Vec<Module>,
    completion: C,
    mini: M,
}

fn cooldown_elapsed(last: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(at) => now.signed_duration_since(at) >= TimeDelta::seconds(ADVISORY_COOLDOWN_SECS),
    }
}

fn push_user(state: &mut ConversationState, content: String, shown: String) {
    let Ok(content) = NonEmptyString::new(content) else {
        return;
    };
    match NonEmptyString::new(shown) {
        Ok(shown) => state.push(Message::user_with_display(content, shown)),
        Err(_) => state.push(Message::user(content)),
    }
}

fn push_assistant(state: &mut ConversationState, content: String) {
    if let Ok(content) = NonEmptyString::new(content) {
        state.push(Message::assistant(content));
    }
}

impl<C, M> Assistant<C, M>
where
    C: CompletionBackend,
    M: MiniContextProvider,
{
    /// Open a session: fetch the module map once (a failed fetch degrades
    /// to an empty map) and start with an empty conversation.
    pub async fn open<P: ModuleMapProvider>(
        facts: SessionFacts,
        map_provider: &P,
        completion: C,
        mini: M,
    ) -> Self {
        let modules = match map_provider.fetch_modules().await {
            Ok(modules) => modules,
            Err(e) => {
                tracing::warn!("module map unavailable, continuing without it: {e:#}");
                Vec::new()
            }
        };
        Self::with_modules(facts, modules, completion, mini)
    }

    #[must_use]
    pub fn with_modules(
        facts: SessionFacts,
        modules: Vec<Module>,
        completion: C,
        mini: M,
    ) -> Self {
        Self {
            inner: Mutex::new(SessionInner {
                state: ConversationState::new(),
                screen_desc: None,
                last_advisory: None,
                last_error: None,
                loading: false,
                concise_mode: true,
                auto_snapshot: true,
                include_mini_context: true,
            }),
            facts,
            modules,
            completion,
            mini,
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn facts(&self) -> &SessionFacts {
        &self.facts
    }

    #[must_use]
    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    #[must_use]
    pub fn last_error(&self) -> Option<String> {
        self.lock().last_error.clone()
    }

    #[must_use]
    pub fn history_summary(&self) -> String {
        self.lock().state.history_summary().to_string()
    }

    /// Snapshot of the transcript for rendering.
    #[must_use]
    pub fn messages(&self) -> Vec<Message> {
        self.lock().state.messages().to_vec()
    }

    pub fn set_concise_mode(&self, on: bool) {
        self.lock().concise_mode = on;
    }

    pub fn set_auto_snapshot(&self, on: bool) {
        self.lock().auto_snapshot = on;
    }

    pub fn set_include_mini_context(&self, on: bool) {
        self.lock().include_mini_context = on;
    }

    /// Stage a manual screen description for the next send; consumed (and
    /// cleared) by that send.
    pub fn set_screen_description(&self, desc: impl Into<String>) {
        self.lock().screen_desc = Some(desc.into());
    }

    /// Recapture the UI snapshot through `probe` with the fingerprint-gated
    /// write; returns whether anything changed. Safe to call speculatively.
    pub fn refresh_snapshot(&self, probe: &dyn ViewProbe) -> bool {
        self.lock().state.update_snapshot(capture(probe))
    }

    /// Drive one user turn through the state machine.
    ///
    /// `now` is the caller's clock, used only for the advisory cooldown.
    pub async fn send(&self, text: &str, now: DateTime<Utc>) -> Result<SendOutcome, SendError> {
        let question = text.trim().to_string();
        if question.is_empty() {
            return Err(SendError::EmptyInput);
        }

        // Local resolution and composition prep, under the lock.
        let entity = {
            let mut inner = self.lock();
            if inner.loading {
                return Err(SendError::Busy);
            }
            inner.last_error = None;

            if let Some(answer) = resolve(&question, &self.modules) {
                tracing::debug!("answered locally from the navigation map");
                push_user(&mut inner.state, question.clone(), question.clone());
                push_assistant(&mut inner.state, answer);
                inner.screen_desc = None;
                return Ok(SendOutcome::ShortCircuited);
            }

            let has_screen_desc = inner
                .screen_desc
                .as_deref()
                .is_some_and(|desc| !desc.trim().is_empty());
            let snapshot_usable = inner.auto_snapshot && !inner.state.ui_snapshot().is_empty();
            if !has_screen_desc
                && !snapshot_usable
                && NEEDS_VISUAL.is_match(&question)
                && cooldown_elapsed(inner.last_advisory, now)
            {
                tracing::debug!("no visual context available, asking for a description");
                push_assistant(&mut inner.state, VISUAL_ADVISORY.to_string());
                inner.last_advisory = Some(now);
                inner.screen_desc = None;
                return Ok(SendOutcome::AdvisoryIssued);
            }

            inner.loading = true;
            detect_entity(&question).filter(|_| inner.include_mini_context)
        };

        // Suspension point 1: optional enrichment. Failures are silent.
        let db_context = match entity {
            Some(entity) => match self.mini.mini_context(entity).await {
                Ok(Some(snippet)) => {
                    truncate_chars(snippet.trim(), MINI_CONTEXT_MAX_CHARS, " …")
                }
                Ok(None) => String::new(),
                Err(e) => {
                    tracing::debug!("mini context unavailable: {e:#}");
                    String::new()
                }
            },
            None => String::new(),
        };

        // Context assembly, synchronous again.
        let outbound = {
            let mut inner = self.lock();
            let context = build_system_context(
                &self.facts,
                &self.modules,
                inner.state.ui_snapshot(),
                inner.state.history_summary(),
                inner.concise_mode,
            );
            ensure_injected(&mut inner.state, &context);

            let screen_desc = inner.screen_desc.take();
            let content = compose_outbound(
                &question,
                screen_desc.as_deref(),
                inner.state.ui_snapshot(),
                inner.auto_snapshot,
                &db_context,
            );
            let shown = display_content(&question, screen_desc.as_deref());
            push_user(&mut inner.state, content, shown);

            prune(inner.state.messages(), MAX_CONTEXT_CHARS)
        };

        // Suspension point 2: the completion call itself.
        let result = self.completion.complete(&outbound).await;

        let mut inner = self.lock();
        inner.loading = false;
        inner.screen_desc = None;
        match result {
            Ok(raw) => {
                let mut reply =
                    enforce_budget(&normalize(&raw), CONCISE_WORD_LIMIT, inner.concise_mode);
                if reply.is_empty() {
                    reply = NO_REPLY_FALLBACK.to_string();
                }
                push_assistant(&mut inner.state, reply);
                maybe_summarize(&mut inner.state);
                Ok(SendOutcome::Answered)
            }
            Err(e) => {
                tracing::warn!("completion failed: {e}");
                inner.last_error = Some(e.to_string());
                push_assistant(&mut inner.state, APOLOGY_REPLY.to_string());
                Ok(SendOutcome::Failed)
            }
        }
    }
}
