use chrono::{DateTime, SecondsFormat, Utc};
use formbridge_crm::{AssociationSpec, CrmApi, CrmError, ObjectInput, Properties};
use tracing::info;

use super::{contact_properties, resolve_contact, ContactMatch, Outcome};
use crate::schemas::forms::ContactForm;

/// Contact property stamped with the time of the latest contact-form submission.
pub const SUBMITTED_AT_PROPERTY: &str = "contact_form_submitted_at";

const NOTE_PREFIX: &str = "Contact requested: ";

/// Record a contact-form submission.
///
/// Existing contacts get a new note and a refreshed submission timestamp; new
/// contacts are created with the timestamp already set and then get the note.
pub async fn submit_contact(
    crm: &dyn CrmApi,
    form: &ContactForm,
    now: DateTime<Utc>,
) -> Result<Outcome, CrmError> {
    let submitted_at = iso_timestamp(now);

    let mut new_contact = contact_properties(&form.first_name, &form.last_name, &form.email);
    new_contact.insert(SUBMITTED_AT_PROPERTY.to_owned(), submitted_at.clone());

    let contact = resolve_contact(crm, &form.email, new_contact).await?;

    let note = crm
        .create_note(note_input(contact.id(), &form.message, &submitted_at))
        .await?;
    info!(contact_id = %contact.id(), note_id = %note.id, "attached note to contact");

    if let ContactMatch::Existing(id) = &contact {
        let stamp = Properties::from([(SUBMITTED_AT_PROPERTY.to_owned(), submitted_at)]);
        crm.update_contact(id, stamp).await?;
    }

    Ok(Outcome {
        contact,
        record_id: note.id,
    })
}

/// Note body plus association to `contact_id`.
pub fn note_input(contact_id: &str, message: &str, timestamp: &str) -> ObjectInput {
    ObjectInput::new(Properties::from([
        ("hs_note_body".to_owned(), format!("{NOTE_PREFIX}{message}")),
        ("hs_timestamp".to_owned(), timestamp.to_owned()),
    ]))
    .associate(contact_id, AssociationSpec::NOTE_TO_CONTACT)
}

fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
