//! Bounded textual snapshot of the visible view.
//!
//! The live view belongs to the rendering collaborator; this module only
//! reads whatever facts that collaborator exposes through [`ViewProbe`] and
//! compacts them into one labeled, capped line. Capture never fails: an
//! unavailable view yields the empty string and the caller's previous
//! snapshot survives (see `ConversationState::update_snapshot`).

use std::sync::LazyLock;

use regex::Regex;
use vendia_types::truncate_chars;

/// Hard cap on the rendered snapshot.
pub const UI_SNAPSHOT_MAX_CHARS: usize = 900;

const MAX_HEADINGS: usize = 12;
const MAX_BREADCRUMBS: usize = 8;
const MAX_SIDEBAR_ENTRIES: usize = 14;
const MAX_ACTIVE_TABS: usize = 5;
const MAX_ACTION_LABELS: usize = 8;
const MAX_TABLE_HEADERS: usize = 10;

/// Labels shorter than this are noise (icons, separators) and dropped.
const MIN_LABEL_CHARS: usize = 3;

static ACTION_ALLOWLIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(venta|crear|guardar|factura|boleta|nota|cliente|producto|stock|exportar)")
        .expect("valid pattern")
});

/// Raw, uncapped facts read from the live view.
#[derive(Debug, Default, Clone)]
pub struct ViewFacts {
    pub headings: Vec<String>,
    pub breadcrumbs: Vec<String>,
    pub sidebar_entries: Vec<String>,
    pub active_tabs: Vec<String>,
    pub action_labels: Vec<String>,
    pub table_headers: Vec<String>,
}

/// Read-only window onto the rendering collaborator's current view.
pub trait ViewProbe {
    /// The current view facts, or `None` when no view is available.
    fn view(&self) -> Option<ViewFacts>;
}

fn clean(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-normalize, drop short labels, dedupe preserving order, cap.
fn unique_labels(raw: &[String], min_chars: usize, limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for label in raw {
        let label = clean(label);
        if label.chars().count() < min_chars || seen.contains(&label) {
            continue;
        }
        seen.push(label);
        if seen.len() == limit {
            break;
        }
    }
    seen
}

fn push_segment(parts: &mut Vec<String>, label: &str, values: &[String], separator: &str) {
    if !values.is_empty() {
        parts.push(format!("{label}:{}", values.join(separator)));
    }
}

/// Build the bounded snapshot line, or `""` when the view is unavailable.
#[must_use]
pub fn capture(probe: &dyn ViewProbe) -> String {
    let Some(facts) = probe.view() else {
        return String::new();
    };

    let actions: Vec<String> = facts
        .action_labels
        .iter()
        .filter(|label| ACTION_ALLOWLIST.is_match(label))
        .cloned()
        .collect();

    let mut parts = Vec::new();
    push_segment(
        &mut parts,
        "Encabezados",
        &unique_labels(&facts.headings, MIN_LABEL_CHARS, MAX_HEADINGS),
        " | ",
    );
    push_segment(
        &mut parts,
        "Ruta",
        &unique_labels(&facts.breadcrumbs, MIN_LABEL_CHARS, MAX_BREADCRUMBS),
        " > ",
    );
    push_segment(
        &mut parts,
        "Menú",
        &unique_labels(&facts.sidebar_entries, MIN_LABEL_CHARS, MAX_SIDEBAR_ENTRIES),
        ", ",
    );
    push_segment(
        &mut parts,
        "Tabs",
        &unique_labels(&facts.active_tabs, 1, MAX_ACTIVE_TABS),
        ", ",
    );
    push_segment(
        &mut parts,
        "Acciones",
        &unique_labels(&actions, 1, MAX_ACTION_LABELS),
        ", ",
    );
    push_segment(
        &mut parts,
        "TablaCols",
        &unique_labels(&facts.table_headers, 1, MAX_TABLE_HEADERS),
        "|",
    );

    truncate_chars(&parts.join(" | "), UI_SNAPSHOT_MAX_CHARS, " …")
}
