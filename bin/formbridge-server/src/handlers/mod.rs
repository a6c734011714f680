//! Form submission workflows.
//!
//! Both forms follow the same shape: look the submitter up by email, create
//! the contact when the search comes back empty, then attach a record (a note
//! or a quote request) to whichever contact id that produced. Nothing is
//! rolled back: a failure after the contact was created leaves the contact in
//! place.

pub mod contact;
pub mod quote;

use formbridge_crm::{CrmApi, CrmError, Properties, SearchResult};
use tracing::info;

/// How the submitter's contact record was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactMatch {
    /// A contact with the submitted email already existed.
    Existing(String),
    /// No contact matched; this one was created for the submission.
    Created(String),
}

impl ContactMatch {
    pub fn id(&self) -> &str {
        match self {
            ContactMatch::Existing(id) | ContactMatch::Created(id) => id,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, ContactMatch::Created(_))
    }
}

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub contact: ContactMatch,
    /// Id of the note or quote-request record attached to the contact.
    pub record_id: String,
}

/// Find the contact for `email`, creating it from `new_contact` if absent.
pub async fn resolve_contact(
    crm: &dyn CrmApi,
    email: &str,
    new_contact: Properties,
) -> Result<ContactMatch, CrmError> {
    match crm.search_contact_by_email(email).await? {
        SearchResult::Found(contact) => Ok(ContactMatch::Existing(contact.id)),
        SearchResult::NotFound => {
            let created = crm.create_contact(new_contact).await?;
            info!(contact_id = %created.id, "created contact");
            Ok(ContactMatch::Created(created.id))
        }
    }
}

/// Base contact properties shared by both forms.
pub(crate) fn contact_properties(first_name: &str, last_name: &str, email: &str) -> Properties {
    Properties::from([
        ("firstname".to_owned(), first_name.to_owned()),
        ("lastname".to_owned(), last_name.to_owned()),
        ("email".to_owned(), email.to_owned()),
    ])
}
