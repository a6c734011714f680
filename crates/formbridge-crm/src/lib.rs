//! Typed client for the HubSpot CRM REST API.
//!
//! Covers the slice of the API that formbridge needs: contact search,
//! record creation and update, notes, custom-object records, v4
//! associations and custom-object schemas.
//!
//! ```rust,no_run
//! # async fn demo() -> Result<(), formbridge_crm::CrmError> {
//! use formbridge_crm::{CrmApi, HubSpotClient, SearchResult};
//!
//! let client = HubSpotClient::builder("pat-na1-...").build()?;
//! match client.search_contact_by_email("ada@example.com").await? {
//!     SearchResult::Found(contact) => println!("existing contact {}", contact.id),
//!     SearchResult::NotFound => println!("new contact"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::{CrmApi, HubSpotClient, HubSpotClientBuilder, DEFAULT_BASE_URL};
pub use error::CrmError;
pub use types::{
    object_type, AssociationCategory, AssociationSpec, CrmObject, ObjectInput, ObjectSchema,
    Properties, PropertyOption, SearchResult,
};
