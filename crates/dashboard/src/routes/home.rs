//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;

use tillpoint_core::Email;

use crate::error::Result;
use crate::services::session::SessionStore;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub user_email: String,
    pub company_id: String,
    pub outlet_id: String,
}

/// Display the dashboard home page.
///
/// The route guard only lets authenticated navigations this far, so the
/// session fields are present on the happy path; absent values render
/// blank rather than failing the page.
pub async fn home(store: SessionStore) -> Result<HomeTemplate> {
    let auth = store.current().await;

    Ok(HomeTemplate {
        user_email: auth.user_email.map(Email::into_inner).unwrap_or_default(),
        company_id: auth.company_id.map(String::from).unwrap_or_default(),
        outlet_id: auth.outlet_id.map(String::from).unwrap_or_default(),
    })
}
