use reqwest::Method;

use crate::{
    types::{Account, AccountInfo},
    Client, Error,
};

/// Operations on the authenticated account.
#[derive(Clone, Copy, Debug)]
pub struct AccountService<'a> {
    client: &'a Client,
}

impl<'a> AccountService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetches the profile and balance of the account owning the token.
    pub async fn read(&self) -> Result<Account, Error> {
        let request = self
            .client
            .new_request::<()>(Method::GET, "account/info", None)?;
        let info: AccountInfo = self.client.send(request).await?;
        Ok(info.user)
    }
}
