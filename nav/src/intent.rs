//! Deterministic local intent resolution.
//!
//! Two ordered pattern checks answer the question classes that only need the
//! navigation map, skipping the remote completion call entirely. This is
//! plain keyword matching in a fixed priority order, not inference: the same
//! question against the same map always produces the same answer.

use std::sync::LazyLock;

use regex::Regex;

use crate::lookup::find_by_keyword;
use crate::map::Module;

/// Appended to every permissions answer.
pub const ADMIN_HINT: &str =
    "Si no puedes acceder, contacta a un administrador para revisar tu rol.";

/// Where permissions live when the map has no matching entry.
const USUAL_PERMISSIONS_LOCATION: &str =
    "Configuración > Roles y permisos (/configuracion/roles)";

/// Domain nouns probed, in order, for locational questions.
const NAV_KEYWORDS: [&str; 12] = [
    "venta",
    "almac",
    "kardex",
    "cliente",
    "proveedor",
    "producto",
    "compra",
    "roles",
    "permis",
    "usuario",
    "reporte",
    "sucursal",
];

static PERMISSIONS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(permisos?|rol|roles|secciones?|seccion|accesos?)\b").expect("valid pattern")
});

static LOCATION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"donde|en que|no encuentro|no aparece").expect("valid pattern"));

/// Lowercase and strip diacritics so `¿Dónde?` and `donde` compare equal.
fn fold(question: &str) -> String {
    question
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            _ => c,
        })
        .collect()
}

/// Answer `question` from the navigation map alone, or `None` to fall
/// through to the remote completion path.
///
/// Check order (first match wins):
/// 1. Permissions questions: locate the `permis` entry, falling back to the
///    usual location when the map lacks one; always append [`ADMIN_HINT`].
/// 2. Generic "where is X" questions: the first [`NAV_KEYWORDS`] entry that
///    appears in the question *and* resolves in the map yields the answer.
///
/// Never mutates state and never reaches the network.
#[must_use]
pub fn resolve(question: &str, modules: &[Module]) -> Option<String> {
    let folded = fold(question);

    if PERMISSIONS_RE.is_match(&folded) {
        let location = match find_by_keyword(modules, "permis") {
            Some(hit) => format!("Los permisos se gestionan en {} ({}).", hit.name, hit.path),
            None => format!(
                "Los permisos suelen estar en {USUAL_PERMISSIONS_LOCATION}, su ubicación habitual."
            ),
        };
        return Some(format!("{location} {ADMIN_HINT}"));
    }

    if LOCATION_RE.is_match(&folded) {
        for keyword in NAV_KEYWORDS {
            if !folded.contains(keyword) {
                continue;
            }
            if let Some(hit) = find_by_keyword(modules, keyword) {
                return Some(format!("Puedes encontrarlo en {} ({}).", hit.name, hit.path));
            }
        }
    }

    None
}
