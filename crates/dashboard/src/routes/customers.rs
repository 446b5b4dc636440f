//! Customer detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use tillpoint_core::CustomerId;

use crate::backend::Customer;
use crate::error::Result;
use crate::services::session::SessionStore;
use crate::state::AppState;

/// Customer detail template.
#[derive(Template, WebTemplate)]
#[template(path = "masterdata/customer.html")]
pub struct CustomerTemplate {
    pub customer: Customer,
}

/// Display a single customer.
pub async fn show(
    State(state): State<AppState>,
    store: SessionStore,
    Path(id): Path<CustomerId>,
) -> Result<CustomerTemplate> {
    let auth = store.current().await;
    let customer = state.backend().customer(auth.token.as_deref(), &id).await?;

    Ok(CustomerTemplate { customer })
}
