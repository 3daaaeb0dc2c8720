// App endpoints.

use crate::client::ApiClient;
use crate::error::Error;
use crate::types::{App, AppRequest, ItemsList, PagedApp};

impl ApiClient {
    /// List apps.
    ///
    /// `GET /v1/apps`
    pub async fn list_apps(&self) -> Result<Vec<PagedApp>, Error> {
        let list: ItemsList<PagedApp> = self.get("apps").await?;
        Ok(list.items)
    }

    /// Get a single app by id or name.
    ///
    /// `GET /v1/apps/{appId}`
    pub async fn get_app(&self, app_id: &str) -> Result<App, Error> {
        self.get(&format!("apps/{app_id}")).await
    }

    /// Create an app.
    ///
    /// `POST /v1/apps`
    pub async fn create_app(&self, app: &AppRequest) -> Result<App, Error> {
        self.post("apps", app).await
    }

    /// Update an app.
    ///
    /// `PUT /v1/apps/{appId}`
    pub async fn update_app(&self, app_id: &str, app: &AppRequest) -> Result<App, Error> {
        self.put(&format!("apps/{app_id}"), app).await
    }

    /// Delete an app.
    ///
    /// `DELETE /v1/apps/{appId}`
    pub async fn delete_app(&self, app_id: &str) -> Result<(), Error> {
        self.delete(&format!("apps/{app_id}")).await
    }
}
