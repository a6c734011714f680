//! Contact and quote form pages and their submission endpoints.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, Redirect};
use axum::routing::{get, post};
use axum::{Form, Router};
use chrono::Utc;
use tracing::info;

use crate::error::{FormKind, ServerError};
use crate::handlers::{contact, quote};
use crate::schemas::forms::{validated, ContactForm, QuoteForm};
use crate::state::AppState;

pub const CONTACT_PAGE: &str = "/";
pub const QUOTE_PAGE: &str = "/quote";

/// Register form routes.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(CONTACT_PAGE, get(contact_page))
        .route("/submit-contact", post(submit_contact))
        .route(QUOTE_PAGE, get(quote_page))
        .route("/submit-quote", post(submit_quote))
}

pub async fn contact_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    Ok(Html(state.templates.contact_form()?))
}

/// Dropdowns are filled from the live quote schema on every render.
pub async fn quote_page(State(state): State<Arc<AppState>>) -> Result<Html<String>, ServerError> {
    let options =
        quote::quote_form_options(state.crm.as_ref(), &state.config.quote_object_type()).await?;
    Ok(Html(state.templates.quote_form(&options)?))
}

pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ContactForm>,
) -> Result<Redirect, ServerError> {
    let form = validated(form)?;
    let outcome = contact::submit_contact(state.crm.as_ref(), &form, Utc::now())
        .await
        .map_err(ServerError::submission(FormKind::Contact))?;
    info!(
        contact_id = %outcome.contact.id(),
        created_contact = outcome.contact.is_created(),
        note_id = %outcome.record_id,
        "contact form submitted"
    );
    Ok(Redirect::to(CONTACT_PAGE))
}

pub async fn submit_quote(
    State(state): State<Arc<AppState>>,
    Form(form): Form<QuoteForm>,
) -> Result<Redirect, ServerError> {
    let form = validated(form)?;
    let object_type = state.config.quote_object_type();
    let outcome = quote::submit_quote(state.crm.as_ref(), &object_type, &form)
        .await
        .map_err(ServerError::submission(FormKind::Quote))?;
    info!(
        contact_id = %outcome.contact.id(),
        created_contact = outcome.contact.is_created(),
        quote_id = %outcome.record_id,
        "quote form submitted"
    );
    Ok(Redirect::to(QUOTE_PAGE))
}
