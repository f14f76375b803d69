//! Immutable per-session facts rendered into the system context.
//!
//! Callers own the clock: the session-start instant is captured once when
//! the assistant surface opens and never re-read, so the rendered system
//! context stays byte-stable (and therefore fingerprint-stable) across
//! rebuilds within a session.

use chrono::{DateTime, Utc};

/// Maximum breadcrumb entries carried into the system context.
pub const MAX_BREADCRUMBS: usize = 8;

#[derive(Debug, Clone)]
pub struct SessionFacts {
    rol: Option<String>,
    sucursal: Option<String>,
    empresa: Option<String>,
    tenant: Option<String>,
    session_start: DateTime<Utc>,
    active_route: String,
    breadcrumbs: Vec<String>,
}

impl SessionFacts {
    #[must_use]
    pub fn new(session_start: DateTime<Utc>) -> Self {
        Self {
            rol: None,
            sucursal: None,
            empresa: None,
            tenant: None,
            session_start,
            active_route: String::new(),
            breadcrumbs: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_rol(mut self, rol: impl Into<String>) -> Self {
        self.rol = Some(rol.into());
        self
    }

    #[must_use]
    pub fn with_sucursal(mut self, sucursal: impl Into<String>) -> Self {
        self.sucursal = Some(sucursal.into());
        self
    }

    #[must_use]
    pub fn with_empresa(mut self, empresa: impl Into<String>) -> Self {
        self.empresa = Some(empresa.into());
        self
    }

    #[must_use]
    pub fn with_tenant(mut self, tenant: impl Into<String>) -> Self {
        self.tenant = Some(tenant.into());
        self
    }

    #[must_use]
    pub fn with_active_route(mut self, route: impl Into<String>) -> Self {
        self.active_route = route.into();
        self
    }

    /// Keeps at most [`MAX_BREADCRUMBS`] entries; extras are dropped from
    /// the tail.
    #[must_use]
    pub fn with_breadcrumbs(mut self, breadcrumbs: Vec<String>) -> Self {
        self.breadcrumbs = breadcrumbs;
        self.breadcrumbs.truncate(MAX_BREADCRUMBS);
        self
    }

    #[must_use]
    pub fn rol(&self) -> Option<&str> {
        self.rol.as_deref()
    }

    #[must_use]
    pub fn sucursal(&self) -> Option<&str> {
        self.sucursal.as_deref()
    }

    #[must_use]
    pub fn empresa(&self) -> Option<&str> {
        self.empresa.as_deref()
    }

    #[must_use]
    pub fn tenant(&self) -> Option<&str> {
        self.tenant.as_deref()
    }

    #[must_use]
    pub fn session_start(&self) -> DateTime<Utc> {
        self.session_start
    }

    #[must_use]
    pub fn active_route(&self) -> &str {
        &self.active_route
    }

    #[must_use]
    pub fn breadcrumbs(&self) -> &[String] {
        &self.breadcrumbs
    }
}

#[cfg(test)]
mod tests {
    use super::{MAX_BREADCRUMBS, SessionFacts};
    use chrono::{TimeZone, Utc};

    #[test]
    fn defaults_are_absent() {
        let facts = SessionFacts::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap());
        assert!(facts.rol().is_none());
        assert!(facts.active_route().is_empty());
        assert!(facts.breadcrumbs().is_empty());
    }

    #[test]
    fn breadcrumbs_capped() {
        let crumbs: Vec<String> = (0..12).map(|i| format!("nivel {i}")).collect();
        let facts = SessionFacts::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
            .with_breadcrumbs(crumbs);
        assert_eq!(facts.breadcrumbs().len(), MAX_BREADCRUMBS);
        assert_eq!(facts.breadcrumbs()[0], "nivel 0");
    }

    #[test]
    fn builder_sets_identity_fields() {
        let facts = SessionFacts::new(Utc.with_ymd_and_hms(2025, 3, 1, 8, 0, 0).unwrap())
            .with_rol("Administrador")
            .with_sucursal("Lima Centro")
            .with_empresa("12")
            .with_tenant("t-4");
        assert_eq!(facts.rol(), Some("Administrador"));
        assert_eq!(facts.sucursal(), Some("Lima Centro"));
        assert_eq!(facts.empresa(), Some("12"));
        assert_eq!(facts.tenant(), Some("t-4"));
    }
}
