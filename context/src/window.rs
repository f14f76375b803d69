//! System-context rendering and idempotent injection.
//!
//! The rendered context is deterministic for fixed inputs: the session-start
//! instant comes from [`SessionFacts`] (captured once per session), so two
//! consecutive builds with unchanged state are byte-identical and the
//! injection controller can skip them by fingerprint alone.

use std::fmt::Write;

use vendia_nav::{Module, functional_digest};
use vendia_types::{Message, NonEmptyString, SessionFacts, fingerprint};

use crate::state::ConversationState;

/// Render the single system message content.
///
/// Lines for the UI snapshot, active route and breadcrumbs are omitted when
/// empty; the history-summary line falls back to the fixed `inicio` marker.
#[must_use]
pub fn build_system_context(
    facts: &SessionFacts,
    modules: &[Module],
    ui_snapshot: &str,
    history_summary: &str,
    concise_mode: bool,
) -> String {
    let mut ctx = String::new();

    ctx.push_str("Eres un asistente integrado en Vendia ERP.\n");
    ctx.push_str(
        "Estilo: conversacional, breve y natural. Evita listas numeradas salvo que pidan \
         \"pasos\" o \"detalle\".\n",
    );
    ctx.push_str(
        "Si el usuario describe pantalla o hay snapshot interno, usa: \"según lo que \
         describes\" o \"según la vista actual\".\n",
    );
    ctx.push_str("Si algo no aparece: sugiere permisos o ruta alternativa corta.\n");
    ctx.push_str("No inventes módulos ni cifras.\n");
    let _ = writeln!(
        ctx,
        "Modo conciso={}.",
        if concise_mode { "sí" } else { "no" }
    );

    let _ = writeln!(
        ctx,
        "\nUsuario: Rol={} | Sucursal={} | Empresa={} | Tenant={} | Inicio de sesión={}",
        facts.rol().unwrap_or("N/D"),
        facts.sucursal().unwrap_or("N/D"),
        facts.empresa().unwrap_or("-"),
        facts.tenant().unwrap_or("-"),
        facts.session_start().to_rfc3339(),
    );

    let _ = write!(ctx, "\nMapa funcional:\n{}", functional_digest(modules));

    if !ui_snapshot.is_empty() {
        let _ = write!(ctx, "\nVista detectada: {ui_snapshot}");
    }
    if !facts.active_route().is_empty() {
        let _ = write!(ctx, "\nRuta activa: {}", facts.active_route());
    }
    if !facts.breadcrumbs().is_empty() {
        let _ = write!(ctx, "\nNavegación: {}", facts.breadcrumbs().join(" > "));
    }

    let summary = if history_summary.is_empty() {
        "inicio"
    } else {
        history_summary
    };
    let _ = write!(ctx, "\n\nHistorial breve: {summary}.");

    ctx.trim().to_string()
}

/// Inject `context` as the leading system message unless it is already
/// there.
///
/// Compares the fingerprint of `context` against the last-injected one: on a
/// match this is a no-op beyond the hash itself. Otherwise any existing
/// system message is removed, the new one is prepended, and the fingerprint
/// is recorded. Returns whether an injection happened.
pub fn ensure_injected(state: &mut ConversationState, context: &str) -> bool {
    let print = fingerprint(context);
    if print == state.system_fingerprint() {
        return false;
    }

    let Ok(content) = NonEmptyString::new(context) else {
        return false;
    };
    tracing::debug!("system context changed, reinjecting");
    state.replace_system(Message::system(content), print);
    true
}
