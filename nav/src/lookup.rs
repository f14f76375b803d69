//! Keyword lookup over the navigation map.

use crate::map::Module;

/// A resolved navigation location.
///
/// For a submodule hit, `name` carries the composed `"<parent> > <child>"`
/// label so the answer reads like the menu path the user will follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub name: String,
    pub path: String,
}

fn matches(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Find the first entry whose name or route contains `keyword`.
///
/// Case-insensitive substring match in document order: each module's own
/// name/route is checked before its submodules, and the first hit wins — no
/// scoring, so identical maps always resolve identically.
#[must_use]
pub fn find_by_keyword(modules: &[Module], keyword: &str) -> Option<NavigationEntry> {
    let needle = keyword.to_lowercase();
    if needle.is_empty() {
        return None;
    }

    for module in modules {
        if matches(&module.nombre, &needle) || matches(&module.ruta, &needle) {
            return Some(NavigationEntry {
                name: module.nombre.clone(),
                path: module.ruta.clone(),
            });
        }
        for sub in &module.submodulos {
            if matches(&sub.nombre, &needle) || matches(&sub.ruta, &needle) {
                return Some(NavigationEntry {
                    name: format!("{} > {}", module.nombre, sub.nombre),
                    path: sub.ruta.clone(),
                });
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::find_by_keyword;
    use crate::map::{Module, Submodule};

    fn sample_map() -> Vec<Module> {
        vec![
            Module {
                nombre: "Ventas".to_string(),
                ruta: "/ventas".to_string(),
                submodulos: vec![Submodule {
                    nombre: "Comprobantes".to_string(),
                    ruta: "/ventas/comprobantes".to_string(),
                }],
            },
            Module {
                nombre: "Configuración".to_string(),
                ruta: "/configuracion".to_string(),
                submodulos: vec![Submodule {
                    nombre: "Roles y permisos".to_string(),
                    ruta: "/configuracion/roles".to_string(),
                }],
            },
        ]
    }

    #[test]
    fn finds_top_level_by_name() {
        let hit = find_by_keyword(&sample_map(), "venta").expect("hit");
        assert_eq!(hit.name, "Ventas");
        assert_eq!(hit.path, "/ventas");
    }

    #[test]
    fn match_is_case_insensitive() {
        let hit = find_by_keyword(&sample_map(), "VENTAS").expect("hit");
        assert_eq!(hit.path, "/ventas");
    }

    #[test]
    fn submodule_hit_composes_label() {
        let hit = find_by_keyword(&sample_map(), "permis").expect("hit");
        assert_eq!(hit.name, "Configuración > Roles y permisos");
        assert_eq!(hit.path, "/configuracion/roles");
    }

    #[test]
    fn route_text_also_matches() {
        let hit = find_by_keyword(&sample_map(), "comprobantes").expect("hit");
        assert_eq!(hit.path, "/ventas/comprobantes");
    }

    #[test]
    fn parent_wins_over_child_in_document_order() {
        let hit = find_by_keyword(&sample_map(), "configuracion").expect("hit");
        // The parent's own route matches before its submodule's route.
        assert_eq!(hit.name, "Configuración");
    }

    #[test]
    fn misses_return_none() {
        assert!(find_by_keyword(&sample_map(), "kardex").is_none());
        assert!(find_by_keyword(&sample_map(), "").is_none());
        assert!(find_by_keyword(&[], "venta").is_none());
    }
}
