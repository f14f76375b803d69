//! HTTP clients for the assistant's external collaborators.
//!
//! Two seams, both trait-shaped so the orchestrator can be tested without a
//! network:
//!
//! - [`CompletionBackend`] — "send an ordered message list, get one reply
//!   string back, or a typed error". Implemented by [`OpenRouterClient`]
//!   against a chat-completions endpoint.
//! - [`MiniContextProvider`] — optional one-line enrichment snippets keyed
//!   by the detected question entity. Implemented by [`HttpMiniContext`]
//!   against the ERP's report API. Failures here are always survivable.

mod completion;
mod mini;
mod openrouter;

pub use completion::{
    CompletionBackend, CompletionError, NO_REPLY_FALLBACK, WireMessage, wire_messages,
};
pub use mini::{HttpMiniContext, MiniContextProvider};
pub use openrouter::{DEFAULT_MODEL_ID, OpenRouterClient, OpenRouterConfig};

use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const TCP_KEEPALIVE_SECS: u64 = 60;

/// Longest error-body excerpt carried into an error message.
const MAX_ERROR_BODY_CHARS: usize = 140;

/// Shared process-wide HTTP client.
///
/// Connection reuse matters more than per-call tuning here: every request in
/// a session goes to one of two hosts.
pub fn http_client() -> &'static reqwest::Client {
    static CLIENT: OnceLock<reqwest::Client> = OnceLock::new();
    CLIENT.get_or_init(|| {
        reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .redirect(reqwest::redirect::Policy::none())
            .tcp_keepalive(Some(Duration::from_secs(TCP_KEEPALIVE_SECS)))
            .build()
            .unwrap_or_else(|e| {
                tracing::error!("failed to build tuned HTTP client: {e}. Using defaults.");
                reqwest::Client::new()
            })
    })
}

/// Read a response body for diagnostics, capped so a huge error page cannot
/// balloon the user-visible error.
pub(crate) async fn read_capped_error_body(response: reqwest::Response) -> String {
    let body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("<no se pudo leer el cuerpo: {e}>"));
    vendia_types::truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS, "…")
}
