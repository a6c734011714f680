use formbridge_crm::{object_type, AssociationSpec, CrmApi, CrmError, Properties, PropertyOption};
use serde::Serialize;
use tracing::info;

use super::{contact_properties, resolve_contact, Outcome};
use crate::schemas::forms::QuoteForm;

/// Value of the fixed label property carried by every website quote request.
pub const QUOTE_LABEL: &str = "Website quote request";

/// Dropdown choices rendered on the quote form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QuoteFormOptions {
    pub size: Vec<PropertyOption>,
    pub stories: Vec<PropertyOption>,
    pub location: Vec<PropertyOption>,
}

/// Load the option sets of the `size`, `stories` and `location` properties
/// from the quote object's schema.
pub async fn quote_form_options(
    crm: &dyn CrmApi,
    quote_object_type: &str,
) -> Result<QuoteFormOptions, CrmError> {
    let schema = crm.get_schema(quote_object_type).await?;
    Ok(QuoteFormOptions {
        size: schema.options_for("size"),
        stories: schema.options_for("stories"),
        location: schema.options_for("location"),
    })
}

/// Record a quote request and link it to the submitter's contact.
pub async fn submit_quote(
    crm: &dyn CrmApi,
    quote_object_type: &str,
    form: &QuoteForm,
) -> Result<Outcome, CrmError> {
    let new_contact = contact_properties(&form.first_name, &form.last_name, &form.email);
    let contact = resolve_contact(crm, &form.email, new_contact).await?;

    let quote = crm
        .create_object(quote_object_type, quote_properties(form))
        .await?;
    crm.create_association(
        quote_object_type,
        &quote.id,
        object_type::CONTACTS,
        contact.id(),
        AssociationSpec::QUOTE_TO_CONTACT,
    )
    .await?;
    info!(contact_id = %contact.id(), quote_id = %quote.id, "attached quote request to contact");

    Ok(Outcome {
        contact,
        record_id: quote.id,
    })
}

fn quote_properties(form: &QuoteForm) -> Properties {
    Properties::from([
        ("stories".to_owned(), form.stories.clone()),
        ("size".to_owned(), form.size.clone()),
        ("details".to_owned(), form.additional_info.clone()),
        ("location".to_owned(), form.location.clone()),
        ("quote_label".to_owned(), QUOTE_LABEL.to_owned()),
    ])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::handlers::ContactMatch;
    use crate::testing::{quote_schema, Call, RecordingCrm};

    const QUOTE_TYPE: &str = "p4242_quote_requests";

    fn form(email: &str) -> QuoteForm {
        QuoteForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: email.into(),
            size: "medium".into(),
            stories: "2".into(),
            additional_info: "Flat roof".into(),
            location: "north".into(),
        }
    }

    fn associations(crm: &RecordingCrm) -> Vec<Call> {
        crm.calls()
            .into_iter()
            .filter(|c| matches!(c, Call::Associate { .. }))
            .collect()
    }

    #[tokio::test]
    async fn new_email_creates_contact_and_quote() {
        let crm = RecordingCrm::new();
        let outcome = submit_quote(&crm, QUOTE_TYPE, &form("ada@example.com"))
            .await
            .unwrap();

        assert!(outcome.contact.is_created());
        assert_eq!(crm.count(|c| matches!(c, Call::CreateContact(_))), 1);

        let quotes = crm.created_objects(QUOTE_TYPE);
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].get("details").map(String::as_str), Some("Flat roof"));
        assert_eq!(quotes[0].get("quote_label").map(String::as_str), Some(QUOTE_LABEL));

        let links = associations(&crm);
        assert_eq!(links.len(), 1);
        assert_eq!(
            links[0],
            Call::Associate {
                from_type: QUOTE_TYPE.into(),
                from_id: outcome.record_id.clone(),
                to_type: "contacts".into(),
                to_id: outcome.contact.id().to_owned(),
                spec: AssociationSpec::QUOTE_TO_CONTACT,
            }
        );
    }

    #[tokio::test]
    async fn existing_email_creates_only_quote() {
        let crm = RecordingCrm::new().with_contact("101", "ada@example.com");
        let outcome = submit_quote(&crm, QUOTE_TYPE, &form("ada@example.com"))
            .await
            .unwrap();

        assert_eq!(outcome.contact, ContactMatch::Existing("101".into()));
        assert_eq!(crm.count(|c| matches!(c, Call::CreateContact(_))), 0);
        assert_eq!(crm.created_objects(QUOTE_TYPE).len(), 1);

        match &associations(&crm)[..] {
            [Call::Associate { to_id, spec, .. }] => {
                assert_eq!(to_id, "101");
                assert_eq!(spec.association_type_id, 36);
            }
            other => panic!("unexpected associations: {other:?}"),
        }
    }

    #[tokio::test]
    async fn search_failure_creates_nothing() {
        let crm = RecordingCrm::new().failing_search();
        assert!(submit_quote(&crm, QUOTE_TYPE, &form("ada@example.com")).await.is_err());
        assert_eq!(crm.writes(), 0);
    }

    #[tokio::test]
    async fn options_match_schema() {
        let crm = RecordingCrm::new().with_schema(quote_schema());
        let options = quote_form_options(&crm, QUOTE_TYPE).await.unwrap();

        let values = |opts: &[PropertyOption]| -> Vec<String> {
            opts.iter().map(|o| o.value.clone()).collect()
        };
        assert_eq!(values(&options.size[..]), vec!["small", "medium", "large"]);
        assert_eq!(values(&options.stories[..]), vec!["1", "2", "3+"]);
        assert_eq!(values(&options.location[..]), vec!["north", "south"]);
        assert!(crm.calls().contains(&Call::GetSchema(QUOTE_TYPE.into())));
    }

    #[tokio::test]
    async fn missing_schema_is_an_error() {
        let crm = RecordingCrm::new();
        assert!(quote_form_options(&crm, QUOTE_TYPE).await.is_err());
    }
}
