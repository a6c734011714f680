use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::CrmError;
use crate::types::{
    object_type, AssociationSpec, CrmObject, ObjectInput, ObjectSchema, Properties,
    SearchRequest, SearchResponse, SearchResult,
};

/// Default HubSpot API host.
pub const DEFAULT_BASE_URL: &str = "https://api.hubapi.com";

/// Contact properties requested back from a search.
const CONTACT_PROPERTIES: [&str; 4] = [
    "email",
    "firstname",
    "lastname",
    "contact_form_submitted_at",
];

/// Remote CRM operations the form workflows depend on.
///
/// [`HubSpotClient`] is the production implementation; tests substitute an
/// in-memory recorder.
#[async_trait]
pub trait CrmApi: Send + Sync {
    /// Look up a contact whose `email` property equals `email`.
    async fn search_contact_by_email(
        &self,
        email: &str,
    ) -> Result<SearchResult<CrmObject>, CrmError>;

    async fn create_contact(&self, properties: Properties) -> Result<CrmObject, CrmError>;

    async fn update_contact(
        &self,
        id: &str,
        properties: Properties,
    ) -> Result<CrmObject, CrmError>;

    /// Create a note; associations in `note` are created atomically with it.
    async fn create_note(&self, note: ObjectInput) -> Result<CrmObject, CrmError>;

    /// Create a record of an arbitrary (usually custom) object type.
    async fn create_object(
        &self,
        object_type: &str,
        properties: Properties,
    ) -> Result<CrmObject, CrmError>;

    /// Link two existing records.
    async fn create_association(
        &self,
        from_type: &str,
        from_id: &str,
        to_type: &str,
        to_id: &str,
        spec: AssociationSpec,
    ) -> Result<(), CrmError>;

    async fn get_schema(&self, object_type: &str) -> Result<ObjectSchema, CrmError>;
}

/// Builder for [`HubSpotClient`].
pub struct HubSpotClientBuilder {
    access_token: String,
    base_url: String,
    timeout: Duration,
}

impl HubSpotClientBuilder {
    /// Override the API host (default: [`DEFAULT_BASE_URL`]).
    pub fn set_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Per-request timeout (default: 30 seconds).
    pub fn set_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<HubSpotClient, CrmError> {
        let client = Client::builder()
            .user_agent(concat!("formbridge-crm/", env!("CARGO_PKG_VERSION")))
            .timeout(self.timeout)
            .build()?;

        Ok(HubSpotClient {
            access_token: self.access_token,
            base_url: self.base_url.trim_end_matches('/').to_owned(),
            client,
        })
    }
}

/// HubSpot CRM client authenticated with a private-app access token.
#[derive(Clone)]
pub struct HubSpotClient {
    access_token: String,
    base_url: String,
    client: Client,
}

impl fmt::Debug for HubSpotClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HubSpotClient")
            .field("base_url", &self.base_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

impl HubSpotClient {
    pub fn builder(access_token: impl Into<String>) -> HubSpotClientBuilder {
        HubSpotClientBuilder {
            access_token: access_token.into(),
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Send an authenticated request, turning non-2xx statuses into [`CrmError::Api`].
    async fn execute(&self, req: RequestBuilder) -> Result<Response, CrmError> {
        let resp = req.bearer_auth(&self.access_token).send().await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(CrmError::from_response(status, &body))
    }

    async fn execute_json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, CrmError> {
        Ok(self.execute(req).await?.json::<T>().await?)
    }
}

#[async_trait]
impl CrmApi for HubSpotClient {
    async fn search_contact_by_email(
        &self,
        email: &str,
    ) -> Result<SearchResult<CrmObject>, CrmError> {
        let body = SearchRequest::property_equals("email", email, 1)
            .with_properties(CONTACT_PROPERTIES);
        let url = self.url(&format!("/crm/v3/objects/{}/search", object_type::CONTACTS));

        let resp: SearchResponse = self.execute_json(self.client.post(url).json(&body)).await?;
        debug!(total = resp.total, "contact search finished");
        Ok(SearchResult::from_results(resp.results))
    }

    async fn create_contact(&self, properties: Properties) -> Result<CrmObject, CrmError> {
        self.create_object(object_type::CONTACTS, properties).await
    }

    async fn update_contact(
        &self,
        id: &str,
        properties: Properties,
    ) -> Result<CrmObject, CrmError> {
        let url = self.url(&format!("/crm/v3/objects/{}/{}", object_type::CONTACTS, id));
        let body = ObjectInput::new(properties);
        self.execute_json(self.client.patch(url).json(&body)).await
    }

    async fn create_note(&self, note: ObjectInput) -> Result<CrmObject, CrmError> {
        let url = self.url(&format!("/crm/v3/objects/{}", object_type::NOTES));
        self.execute_json(self.client.post(url).json(&note)).await
    }

    async fn create_object(
        &self,
        object_type: &str,
        properties: Properties,
    ) -> Result<CrmObject, CrmError> {
        let url = self.url(&format!("/crm/v3/objects/{object_type}"));
        let body = ObjectInput::new(properties);
        let created: CrmObject = self.execute_json(self.client.post(url).json(&body)).await?;
        if created.id.is_empty() {
            return Err(CrmError::InvalidResponse {
                message: format!("created {object_type} record has no id"),
            });
        }
        Ok(created)
    }

    async fn create_association(
        &self,
        from_type: &str,
        from_id: &str,
        to_type: &str,
        to_id: &str,
        spec: AssociationSpec,
    ) -> Result<(), CrmError> {
        let url = self.url(&format!(
            "/crm/v4/objects/{from_type}/{from_id}/associations/{to_type}/{to_id}"
        ));
        self.execute(self.client.put(url).json(&[spec])).await?;
        Ok(())
    }

    async fn get_schema(&self, object_type: &str) -> Result<ObjectSchema, CrmError> {
        let url = self.url(&format!("/crm/v3/schemas/{object_type}"));
        self.execute_json(self.client.get(url)).await
    }
}
