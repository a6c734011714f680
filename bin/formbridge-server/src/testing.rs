//! In-memory [`CrmApi`] used by workflow and route tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use formbridge_crm::types::PropertyDefinition;
use formbridge_crm::{
    AssociationSpec, CrmApi, CrmError, CrmObject, ObjectInput, ObjectSchema, Properties,
    PropertyOption, SearchResult,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Search(String),
    CreateContact(Properties),
    UpdateContact(String, Properties),
    CreateNote(ObjectInput),
    CreateObject(String, Properties),
    Associate {
        from_type: String,
        from_id: String,
        to_type: String,
        to_id: String,
        spec: AssociationSpec,
    },
    GetSchema(String),
}

/// Records successful calls and keeps a tiny contact table so that a second
/// submission finds the contact created by the first.
#[derive(Default)]
pub struct RecordingCrm {
    contacts: Mutex<Vec<(String, String)>>,
    calls: Mutex<Vec<Call>>,
    next_id: Mutex<u64>,
    schema: Option<ObjectSchema>,
    fail_search: bool,
    fail_notes: bool,
}

impl RecordingCrm {
    pub fn new() -> Self {
        Self {
            next_id: Mutex::new(1000),
            ..Default::default()
        }
    }

    pub fn with_contact(self, id: &str, email: &str) -> Self {
        self.contacts
            .lock()
            .unwrap()
            .push((id.to_owned(), email.to_owned()));
        self
    }

    pub fn with_schema(mut self, schema: ObjectSchema) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_notes(mut self) -> Self {
        self.fail_notes = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
    }

    /// Number of calls that changed remote state.
    pub fn writes(&self) -> usize {
        self.count(|c| !matches!(c, Call::Search(_) | Call::GetSchema(_)))
    }

    pub fn notes(&self) -> Vec<ObjectInput> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateNote(note) => Some(note),
                _ => None,
            })
            .collect()
    }

    pub fn created_contacts(&self) -> Vec<Properties> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateContact(props) => Some(props),
                _ => None,
            })
            .collect()
    }

    pub fn created_objects(&self, object_type: &str) -> Vec<Properties> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::CreateObject(t, props) if t == object_type => Some(props),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn object(&self) -> CrmObject {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        CrmObject {
            id: next.to_string(),
            properties: BTreeMap::new(),
            created_at: None,
            updated_at: None,
            archived: false,
        }
    }
}

fn unavailable() -> CrmError {
    CrmError::Api {
        status: 503,
        message: "service unavailable".into(),
        category: None,
    }
}

#[async_trait]
impl CrmApi for RecordingCrm {
    async fn search_contact_by_email(
        &self,
        email: &str,
    ) -> Result<SearchResult<CrmObject>, CrmError> {
        if self.fail_search {
            return Err(unavailable());
        }
        self.record(Call::Search(email.to_owned()));
        let found: Vec<CrmObject> = self
            .contacts
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, e)| e == email)
            .map(|(id, e)| CrmObject {
                id: id.clone(),
                properties: BTreeMap::from([("email".to_owned(), Some(e.clone()))]),
                created_at: None,
                updated_at: None,
                archived: false,
            })
            .collect();
        Ok(SearchResult::from_results(found))
    }

    async fn create_contact(&self, properties: Properties) -> Result<CrmObject, CrmError> {
        let created = self.object();
        if let Some(email) = properties.get("email") {
            self.contacts
                .lock()
                .unwrap()
                .push((created.id.clone(), email.clone()));
        }
        self.record(Call::CreateContact(properties));
        Ok(created)
    }

    async fn update_contact(
        &self,
        id: &str,
        properties: Properties,
    ) -> Result<CrmObject, CrmError> {
        self.record(Call::UpdateContact(id.to_owned(), properties));
        Ok(CrmObject {
            id: id.to_owned(),
            ..self.object()
        })
    }

    async fn create_note(&self, note: ObjectInput) -> Result<CrmObject, CrmError> {
        if self.fail_notes {
            return Err(unavailable());
        }
        self.record(Call::CreateNote(note));
        Ok(self.object())
    }

    async fn create_object(
        &self,
        object_type: &str,
        properties: Properties,
    ) -> Result<CrmObject, CrmError> {
        self.record(Call::CreateObject(object_type.to_owned(), properties));
        Ok(self.object())
    }

    async fn create_association(
        &self,
        from_type: &str,
        from_id: &str,
        to_type: &str,
        to_id: &str,
        spec: AssociationSpec,
    ) -> Result<(), CrmError> {
        self.record(Call::Associate {
            from_type: from_type.to_owned(),
            from_id: from_id.to_owned(),
            to_type: to_type.to_owned(),
            to_id: to_id.to_owned(),
            spec,
        });
        Ok(())
    }

    async fn get_schema(&self, object_type: &str) -> Result<ObjectSchema, CrmError> {
        self.record(Call::GetSchema(object_type.to_owned()));
        self.schema.clone().ok_or_else(|| CrmError::Api {
            status: 404,
            message: format!("schema {object_type} not found"),
            category: Some("OBJECT_NOT_FOUND".into()),
        })
    }
}

fn options(values: &[(&str, &str)]) -> Vec<PropertyOption> {
    values
        .iter()
        .enumerate()
        .map(|(i, (label, value))| PropertyOption {
            label: (*label).to_owned(),
            value: (*value).to_owned(),
            display_order: i as i32,
            hidden: false,
        })
        .collect()
}

fn select(name: &str, label: &str, opts: Vec<PropertyOption>) -> PropertyDefinition {
    PropertyDefinition {
        name: name.to_owned(),
        label: label.to_owned(),
        kind: "enumeration".to_owned(),
        field_type: "select".to_owned(),
        options: opts,
    }
}

/// Quote schema with three dropdown properties and one free-text property.
pub fn quote_schema() -> ObjectSchema {
    ObjectSchema {
        id: "12345".into(),
        name: "quote_requests".into(),
        object_type_id: Some("2-12345".into()),
        fully_qualified_name: Some("p4242_quote_requests".into()),
        properties: vec![
            select(
                "size",
                "Size",
                options(&[("Small", "small"), ("Medium", "medium"), ("Large", "large")]),
            ),
            select("stories", "Stories", options(&[("One", "1"), ("Two", "2"), ("Three or more", "3+")])),
            select("location", "Location", options(&[("North", "north"), ("South", "south")])),
            PropertyDefinition {
                name: "details".into(),
                label: "Details".into(),
                kind: "string".into(),
                field_type: "textarea".into(),
                options: Vec::new(),
            },
        ],
    }
}
