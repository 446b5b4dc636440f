//! Category detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};

use tillpoint_core::CategoryId;

use crate::backend::Category;
use crate::error::Result;
use crate::services::session::SessionStore;
use crate::state::AppState;

/// Category detail template.
#[derive(Template, WebTemplate)]
#[template(path = "masterdata/category.html")]
pub struct CategoryTemplate {
    pub category: Category,
}

/// Display a single category.
///
/// The bearer token (when present) rides along on the API call; an
/// unauthorized answer surfaces as a 401 and the interceptor takes over.
pub async fn show(
    State(state): State<AppState>,
    store: SessionStore,
    Path(id): Path<CategoryId>,
) -> Result<CategoryTemplate> {
    let auth = store.current().await;
    let category = state.backend().category(auth.token.as_deref(), &id).await?;

    Ok(CategoryTemplate { category })
}
