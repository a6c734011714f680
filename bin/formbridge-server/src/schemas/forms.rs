//! Form bodies posted by the contact and quote pages.
//!
//! Every field defaults to an empty string so that a missing field surfaces
//! as a validation error (400) instead of an extractor rejection.

use serde::Deserialize;
use validator::{Validate, ValidationErrors};

use crate::error::ServerError;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(max = 5000))]
    pub message: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[validate(length(max = 100))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 100))]
    pub size: String,
    #[validate(length(min = 1, max = 100))]
    pub stories: String,
    #[validate(length(max = 5000))]
    pub additional_info: String,
    #[validate(length(min = 1, max = 100))]
    pub location: String,
}

/// Run `validator` rules and collapse failures into a 400.
pub fn validated<T: Validate>(form: T) -> Result<T, ServerError> {
    form.validate().map_err(|e| ServerError::BadRequest(describe(&e)))?;
    Ok(form)
}

/// `"email, firstName"`-style list of the offending fields, in a stable order.
fn describe(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|k| to_camel_case(k))
        .collect();
    fields.sort();
    format!("invalid or missing fields: {}", fields.join(", "))
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
