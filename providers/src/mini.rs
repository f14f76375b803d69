//! Optional mini-context enrichment.
//!
//! A question classified as being about some entity can carry one short
//! data-backed line into the outbound message. This is strictly
//! best-effort: every failure degrades to "no enrichment", never to a
//! user-visible error.

use serde::Deserialize;
use vendia_types::Entity;

use crate::read_capped_error_body;

const TOP_PRODUCTS_PATH: &str = "/reporte/ventas/top-productos";
const TOP_PRODUCTS_LIMIT: usize = 3;

/// Supplies an optional enrichment snippet for a detected entity.
pub trait MiniContextProvider {
    fn mini_context(
        &self,
        entity: Entity,
    ) -> impl Future<Output = anyhow::Result<Option<String>>> + Send;
}

/// Mini-context against the ERP's report API.
///
/// Sales questions get a live top-products line; the other entities get
/// fixed orientation lines that need no request.
pub struct HttpMiniContext {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TopProductsResponse {
    #[serde(default)]
    data: Vec<TopProductRow>,
}

#[derive(Debug, Deserialize)]
struct TopProductRow {
    #[serde(default)]
    descripcion: Option<String>,
    #[serde(default)]
    producto: Option<String>,
    #[serde(default)]
    ventas: Option<serde_json::Value>,
    #[serde(default)]
    total: Option<serde_json::Value>,
}

fn render_value(value: Option<&serde_json::Value>) -> String {
    match value {
        Some(serde_json::Value::String(s)) => s.clone(),
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => "-".to_string(),
    }
}

impl TopProductRow {
    fn render(&self) -> String {
        let name = self
            .descripcion
            .as_deref()
            .or(self.producto.as_deref())
            .unwrap_or("Item");
        let amount = render_value(self.ventas.as_ref().or(self.total.as_ref()));
        format!("{name}={amount}")
    }
}

impl HttpMiniContext {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: crate::http_client().clone(),
        }
    }

    async fn sales_summary(&self) -> anyhow::Result<Option<String>> {
        let response = self
            .client
            .get(format!("{}{TOP_PRODUCTS_PATH}", self.base_url))
            .query(&[("limit", TOP_PRODUCTS_LIMIT)])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = read_capped_error_body(response).await;
            anyhow::bail!("reporte top-productos respondió {status}: {body}");
        }

        let payload: TopProductsResponse = response.json().await?;
        if payload.data.is_empty() {
            return Ok(None);
        }

        let rows: Vec<String> = payload
            .data
            .iter()
            .take(TOP_PRODUCTS_LIMIT)
            .map(TopProductRow::render)
            .collect();
        Ok(Some(format!(
            "Resumen ventas recientes: {}",
            rows.join(", ")
        )))
    }
}

impl MiniContextProvider for HttpMiniContext {
    async fn mini_context(&self, entity: Entity) -> anyhow::Result<Option<String>> {
        match entity {
            Entity::Sales => self.sales_summary().await,
            Entity::Inventory => Ok(Some(
                "Contexto producto: stock_min, stock_actual y permisos de ajuste dependen del rol."
                    .to_string(),
            )),
            Entity::Users => Ok(Some(
                "Contexto permisos: switches (modo oscuro / apariencia) visibles sólo con rol adecuado."
                    .to_string(),
            )),
            Entity::Purchases => Ok(Some(
                "Contexto compras: notas de ingreso y ranking de proveedores viven en el módulo Compras."
                    .to_string(),
            )),
        }
    }
}
