//! The completion endpoint seam.

use serde::Serialize;
use thiserror::Error;
use vendia_types::Message;

/// Substituted when the endpoint answers without usable content: a
/// malformed or empty reply payload means "no answer", not a failed turn.
pub const NO_REPLY_FALLBACK: &str = "Sin respuesta.";

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Credenciales inválidas (401)")]
    Unauthorized,
    #[error("Límite de peticiones (429)")]
    RateLimited,
    #[error("Error {status}: {body}")]
    Http { status: u16, body: String },
    #[error("No se pudo conectar con el servicio: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One `{role, content}` pair of the outbound payload.
#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

/// Project the conversation into the wire shape the endpoint expects.
#[must_use]
pub fn wire_messages(messages: &[Message]) -> Vec<WireMessage<'_>> {
    messages
        .iter()
        .map(|message| WireMessage {
            role: message.role_str(),
            content: message.content(),
        })
        .collect()
}

/// "Send messages, get text back, or get an error."
///
/// The reply is raw model output; normalization and budgeting belong to the
/// caller. Implementations substitute [`NO_REPLY_FALLBACK`] for a payload
/// that arrives without content rather than failing the turn.
pub trait CompletionBackend {
    fn complete(
        &self,
        messages: &[Message],
    ) -> impl Future<Output = Result<String, CompletionError>> + Send;
}
