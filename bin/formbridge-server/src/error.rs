//! Unified server error type.
//!
//! Every handler returns `Result<T, ServerError>`, which implements
//! [`axum::response::IntoResponse`]. Responses are plain text: the forms are
//! posted by browsers, not API clients.
//!
//! CRM and template failures are logged with full detail; the caller only
//! ever sees a generic message so tokens, ids and CRM payloads never leak.

use std::fmt;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use formbridge_crm::CrmError;
use thiserror::Error;
use tracing::error;

/// Which form a failed submission came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Quote,
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::Contact => f.write_str("contact"),
            FormKind::Quote => f.write_str("quote"),
        }
    }
}

/// All errors that can occur in the formbridge-server request lifecycle.
#[derive(Debug, Error)]
pub enum ServerError {
    /// A CRM call failed while processing a form submission.
    #[error("{form} submission failed: {source}")]
    Submission {
        form: FormKind,
        #[source]
        source: CrmError,
    },

    /// A CRM call failed outside a submission (e.g. loading dropdown options).
    #[error("CRM error: {0}")]
    Crm(#[from] CrmError),

    /// A page template failed to render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// The submitted form did not pass validation.
    #[error("bad request: {0}")]
    BadRequest(String),
}

impl ServerError {
    pub fn submission(form: FormKind) -> impl FnOnce(CrmError) -> ServerError {
        move |source| ServerError::Submission { form, source }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
            ServerError::Submission { form, source } => {
                error!(form = %form, error = %source, "form submission failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Error submitting {form} request"),
                )
            }
            ServerError::Crm(e) => {
                error!(error = %e, "CRM error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
            ServerError::Template(e) => {
                error!(error = ?e, "template render error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };
        (status, message).into_response()
    }
}
