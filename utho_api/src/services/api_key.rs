use reqwest::Method;

use crate::{
    types::{ApiKey, ApiKeys, CreateApiKeyParams, CreateApiKeyResponse, DeleteResponse},
    Client, Error,
};

/// Management of the account's API keys.
#[derive(Clone, Copy, Debug)]
pub struct ApiKeyService<'a> {
    client: &'a Client,
}

impl<'a> ApiKeyService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Generates a new key. The secret is only present in this response.
    pub async fn create(&self, params: &CreateApiKeyParams) -> Result<CreateApiKeyResponse, Error> {
        let request = self
            .client
            .new_request(Method::POST, "api/generate", Some(params))?;
        self.client.send(request).await
    }

    pub async fn list(&self) -> Result<Vec<ApiKey>, Error> {
        let request = self.client.new_request::<()>(Method::GET, "api", None)?;
        let keys: ApiKeys = self.client.send(request).await?;
        Ok(keys.api)
    }

    pub async fn delete(&self, api_key_id: &str) -> Result<DeleteResponse, Error> {
        let request = self.client.new_request::<()>(
            Method::DELETE,
            &format!("api/{}/delete", api_key_id),
            None,
        )?;
        self.client.send(request).await
    }
}
