// Schema connector (ST Schema) endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{SchemaApp, SchemaCreateResponse};

/// Schema list responses use `endpointApps` instead of `items`.
#[derive(serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct EndpointAppsList {
    #[serde(default)]
    endpoint_apps: Vec<SchemaApp>,
}

impl ApiClient {
    /// List schema connectors.
    ///
    /// `GET /v1/schema/apps`
    pub async fn list_schema_apps(&self) -> Result<Vec<SchemaApp>, Error> {
        let list: EndpointAppsList = self.get("schema/apps").await?;
        Ok(list.endpoint_apps)
    }

    /// Get a single schema connector.
    ///
    /// `GET /v1/schema/apps/{endpointAppId}`
    pub async fn get_schema_app(&self, endpoint_app_id: &str) -> Result<SchemaApp, Error> {
        self.get(&format!("schema/apps/{endpoint_app_id}")).await
    }

    /// Create a schema connector.
    ///
    /// `POST /v1/schema/apps`
    pub async fn create_schema_app(
        &self,
        app: &SchemaApp,
    ) -> Result<SchemaCreateResponse, Error> {
        self.post("schema/apps", app).await
    }

    /// Update a schema connector.
    ///
    /// `PUT /v1/schema/apps/{endpointAppId}`
    pub async fn update_schema_app(
        &self,
        endpoint_app_id: &str,
        app: &SchemaApp,
    ) -> Result<SchemaCreateResponse, Error> {
        self.put(&format!("schema/apps/{endpoint_app_id}"), app)
            .await
    }

    /// Delete a schema connector.
    ///
    /// `DELETE /v1/schema/apps/{endpointAppId}`
    pub async fn delete_schema_app(&self, endpoint_app_id: &str) -> Result<(), Error> {
        self.delete(&format!("schema/apps/{endpoint_app_id}")).await
    }
}
