//! Question entity classes used for optional mini-context enrichment.

/// The domain entity a question is about, as detected by keyword matching.
///
/// Detection itself lives in the engine; providers only consume the class to
/// decide which (if any) enrichment snippet to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Sales,
    Inventory,
    Users,
    Purchases,
}

impl Entity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Entity::Sales => "ventas",
            Entity::Inventory => "inventario",
            Entity::Users => "usuarios",
            Entity::Purchases => "compras",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
