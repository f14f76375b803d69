//! Outbound user-message composition.
//!
//! The model sees labeled segments; the user sees only their question (plus
//! their own screen description, when they wrote one). The auto-captured UI
//! snapshot and the mini context never appear in the visible transcript.

/// Compose the wire content: optional screen segment, optional data
/// segment, then the mandatory question segment, joined with ` | `.
#[must_use]
pub(crate) fn compose_outbound(
    question: &str,
    screen_desc: Option<&str>,
    ui_snapshot: &str,
    auto_snapshot: bool,
    db_context: &str,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    match screen_desc.map(str::trim).filter(|desc| !desc.is_empty()) {
        Some(desc) => parts.push(format!("Pantalla:{desc}")),
        None if auto_snapshot && !ui_snapshot.is_empty() => {
            parts.push(format!("UI:{ui_snapshot}"));
        }
        None => {}
    }

    if !db_context.is_empty() {
        parts.push(format!("ContextoBD:{db_context}"));
    }

    parts.push(format!("Pregunta:{}", question.trim()));
    parts.join(" | ")
}

/// What the transcript shows for this turn.
#[must_use]
pub(crate) fn display_content(question: &str, screen_desc: Option<&str>) -> String {
    match screen_desc.map(str::trim).filter(|desc| !desc.is_empty()) {
        Some(desc) => format!("(Pantalla:{desc} | Pregunta:{})", question.trim()),
        None => question.trim().to_string(),
    }
}
