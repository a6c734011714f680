use serde::Deserialize;
use thiserror::Error;

/// Errors that can be returned by formbridge-crm operations.
#[derive(Debug, Error)]
pub enum CrmError {
    /// The request never produced a usable response (network, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The CRM answered with a non-2xx status.
    #[error("CRM API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        category: Option<String>,
    },

    /// The CRM answered 2xx but the payload did not have the expected shape.
    #[error("Invalid CRM response: {message}")]
    InvalidResponse { message: String },
}

/// Error body HubSpot returns alongside non-2xx statuses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    message: String,
    #[serde(default)]
    category: Option<String>,
}

impl CrmError {
    /// Build an [`CrmError::Api`] from a status code and the raw response body.
    ///
    /// Falls back to the raw body (or the status reason) when it is not the
    /// usual `{ "status", "message", "category" }` envelope.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => CrmError::Api {
                status: status.as_u16(),
                message: parsed.message,
                category: parsed.category,
            },
            Err(_) => {
                let message = if body.trim().is_empty() {
                    status
                        .canonical_reason()
                        .unwrap_or("unknown error")
                        .to_owned()
                } else {
                    body.trim().to_owned()
                };
                CrmError::Api {
                    status: status.as_u16(),
                    message,
                    category: None,
                }
            }
        }
    }

    /// HTTP status reported by the CRM, if the failure came from an API response.
    pub fn status(&self) -> Option<u16> {
        match self {
            CrmError::Api { status, .. } => Some(*status),
            CrmError::Http(e) => e.status().map(|s| s.as_u16()),
            CrmError::InvalidResponse { .. } => None,
        }
    }
}
