//! Supplier detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use tillpoint_core::SupplierId;

use crate::backend::Supplier;
use crate::error::Result;
use crate::services::session::SessionStore;
use crate::state::AppState;

/// Supplier detail template.
#[derive(Template, WebTemplate)]
#[template(path = "masterdata/supplier.html")]
pub struct SupplierTemplate {
    pub supplier: Supplier,
}

/// Display a single supplier.
pub async fn show(
    State(state): State<AppState>,
    store: SessionStore,
    Path(id): Path<SupplierId>,
) -> Result<SupplierTemplate> {
    let auth = store.current().await;
    let supplier = state.backend().supplier(auth.token.as_deref(), &id).await?;

    Ok(SupplierTemplate { supplier })
}
