//! Module/submodule tree supplied by the navigation collaborator.

use serde::Deserialize;

/// First `N` modules rendered into the system-context digest.
const DIGEST_MODULES: usize = 8;
/// First `N` submodules listed per module in the digest.
const DIGEST_SUBMODULES: usize = 3;

#[derive(Debug, Clone, Deserialize)]
pub struct Submodule {
    #[serde(alias = "nombre_sub")]
    pub nombre: String,
    #[serde(default)]
    pub ruta: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Module {
    pub nombre: String,
    #[serde(default, alias = "path")]
    pub ruta: String,
    #[serde(default)]
    pub submodulos: Vec<Submodule>,
}

/// Supplies the module tree the current user can navigate to.
///
/// Fetched once per session when the assistant surface opens; never polled.
/// A failed fetch degrades to an empty map at the call site.
pub trait ModuleMapProvider {
    fn fetch_modules(&self) -> impl Future<Output = anyhow::Result<Vec<Module>>> + Send;
}

/// Capped one-line-per-module digest of the tree for the system context.
///
/// Lists the first 8 modules with up to 3 submodule names each; a module
/// without submodules reads `básicos`, an empty map reads
/// `Sin módulos cargados.`.
#[must_use]
pub fn functional_digest(modules: &[Module]) -> String {
    if modules.is_empty() {
        return "Sin módulos cargados.".to_string();
    }

    modules
        .iter()
        .take(DIGEST_MODULES)
        .map(|module| {
            let subs = module
                .submodulos
                .iter()
                .take(DIGEST_SUBMODULES)
                .map(|sub| sub.nombre.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            if subs.is_empty() {
                format!("• {}: básicos", module.nombre)
            } else {
                format!("• {}: {subs}", module.nombre)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
