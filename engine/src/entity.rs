//! Keyword-based entity detection.
//!
//! Fixed priority order, first match wins. This stays deliberately dumb:
//! the classes only choose which optional enrichment snippet to fetch, so a
//! wrong class costs one irrelevant line of context at worst.

use std::sync::LazyLock;

use regex::Regex;
use vendia_types::Entity;

static INVENTORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)stock|producto|almac|kardex").expect("valid pattern"));
static USERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)usuario|permiso").expect("valid pattern"));
static SALES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)venta|factura|boleta|comprobante").expect("valid pattern"));
static PURCHASES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)compra|proveedor").expect("valid pattern"));

/// Classify `question`, or `None` when no entity keyword appears.
#[must_use]
pub fn detect_entity(question: &str) -> Option<Entity> {
    if INVENTORY.is_match(question) {
        Some(Entity::Inventory)
    } else if USERS.is_match(question) {
        Some(Entity::Users)
    } else if SALES.is_match(question) {
        Some(Entity::Sales)
    } else if PURCHASES.is_match(question) {
        Some(Entity::Purchases)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::detect_entity;
    use vendia_types::Entity;

    #[test]
    fn classifies_each_entity() {
        assert_eq!(detect_entity("¿cuánto stock queda?"), Some(Entity::Inventory));
        assert_eq!(detect_entity("permisos del usuario"), Some(Entity::Users));
        assert_eq!(detect_entity("emitir una FACTURA"), Some(Entity::Sales));
        assert_eq!(
            detect_entity("notas de compra del proveedor"),
            Some(Entity::Purchases)
        );
    }

    #[test]
    fn inventory_outranks_sales() {
        // "venta de productos" mentions both; inventory is checked first.
        assert_eq!(detect_entity("venta de productos"), Some(Entity::Inventory));
    }

    #[test]
    fn no_keyword_means_no_entity() {
        assert_eq!(detect_entity("¿cómo cambio el tema oscuro?"), None);
    }
}
