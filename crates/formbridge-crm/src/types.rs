//! Wire types for the HubSpot CRM v3/v4 object, search, association and
//! schema endpoints.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Property name → value map sent when creating or updating a record.
pub type Properties = BTreeMap<String, String>;

/// Object type path segments for the built-in CRM objects.
pub mod object_type {
    pub const CONTACTS: &str = "contacts";
    pub const NOTES: &str = "notes";
}

// ── Records ───────────────────────────────────────────────────────────────────

/// A CRM record as returned by the object and search endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrmObject {
    pub id: String,
    /// HubSpot returns `null` for requested properties that are unset.
    #[serde(default)]
    pub properties: BTreeMap<String, Option<String>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub archived: bool,
}

impl CrmObject {
    /// Value of a property, treating `null` and absent the same way.
    pub fn property(&self, name: &str) -> Option<&str> {
        self.properties.get(name).and_then(|v| v.as_deref())
    }
}

/// Outcome of a lookup that matches at most one record.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult<T> {
    Found(T),
    NotFound,
}

impl<T> SearchResult<T> {
    /// Keep the first result; an empty result set is [`SearchResult::NotFound`].
    pub fn from_results(results: Vec<T>) -> Self {
        match results.into_iter().next() {
            Some(first) => SearchResult::Found(first),
            None => SearchResult::NotFound,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchResult::Found(_))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOperator {
    #[serde(rename = "EQ")]
    Eq,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: FilterOperator,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

/// Body of `POST /crm/v3/objects/{objectType}/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub filter_groups: Vec<FilterGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    pub limit: u32,
}

impl SearchRequest {
    /// Single `property EQ value` filter returning at most `limit` records.
    pub fn property_equals(name: &str, value: &str, limit: u32) -> Self {
        Self {
            filter_groups: vec![FilterGroup {
                filters: vec![Filter {
                    property_name: name.to_owned(),
                    operator: FilterOperator::Eq,
                    value: value.to_owned(),
                }],
            }],
            properties: Vec::new(),
            limit,
        }
    }

    /// Ask the CRM to include these properties in each result.
    pub fn with_properties<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = names.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub results: Vec<CrmObject>,
}

// ── Associations ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssociationCategory {
    HubspotDefined,
    UserDefined,
    IntegratorDefined,
}

/// Category plus numeric type id describing how two records relate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssociationSpec {
    pub association_category: AssociationCategory,
    pub association_type_id: u32,
}

impl AssociationSpec {
    /// Note → contact (HubSpot-defined).
    pub const NOTE_TO_CONTACT: AssociationSpec = AssociationSpec {
        association_category: AssociationCategory::HubspotDefined,
        association_type_id: 202,
    };

    /// Quote request custom object → contact (defined in the portal schema).
    pub const QUOTE_TO_CONTACT: AssociationSpec = AssociationSpec {
        association_category: AssociationCategory::UserDefined,
        association_type_id: 36,
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordRef {
    pub id: String,
}

/// Inline association attached to a record at creation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationInput {
    pub to: RecordRef,
    pub types: Vec<AssociationSpec>,
}

/// Body of `POST /crm/v3/objects/{objectType}` and `PATCH .../{id}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ObjectInput {
    pub properties: Properties,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub associations: Vec<AssociationInput>,
}

impl ObjectInput {
    pub fn new(properties: Properties) -> Self {
        Self {
            properties,
            associations: Vec::new(),
        }
    }

    /// Attach the new record to `to_id` using `spec`.
    pub fn associate(mut self, to_id: impl Into<String>, spec: AssociationSpec) -> Self {
        self.associations.push(AssociationInput {
            to: RecordRef { id: to_id.into() },
            types: vec![spec],
        });
        self
    }
}

// ── Schemas ───────────────────────────────────────────────────────────────────

/// One selectable value of an enumeration property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyOption {
    pub label: String,
    pub value: String,
    #[serde(default)]
    pub display_order: i32,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDefinition {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub field_type: String,
    #[serde(default)]
    pub options: Vec<PropertyOption>,
}

/// Custom object schema from `GET /crm/v3/schemas/{objectType}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub object_type_id: Option<String>,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    #[serde(default)]
    pub properties: Vec<PropertyDefinition>,
}

impl ObjectSchema {
    pub fn property(&self, name: &str) -> Option<&PropertyDefinition> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Visible options of `name` in display order; empty when the property is missing.
    pub fn options_for(&self, name: &str) -> Vec<PropertyOption> {
        let mut options: Vec<PropertyOption> = self
            .property(name)
            .map(|p| p.options.iter().filter(|o| !o.hidden).cloned().collect())
            .unwrap_or_default();
        options.sort_by_key(|o| o.display_order);
        options
    }
}
