// User endpoints

use serde::Deserialize;
use tracing::debug;

use crate::client::CatalogClient;
use crate::error::Error;
use crate::models::User;

#[derive(Deserialize)]
struct UserResponse {
    user: User,
}

impl CatalogClient {
    /// The user the current credentials belong to.
    ///
    /// `GET /api/auth_user`
    pub async fn get_logged_in_user(&self) -> Result<User, Error> {
        let url = self.api_url("auth_user")?;
        debug!("fetching logged-in user");
        let resp: UserResponse = self.get(url).await?;
        Ok(resp.user)
    }

    /// Look up a user profile.
    ///
    /// `GET /api/metadata/v0/user?user_id=`
    pub async fn get_user(&self, user_id: &str) -> Result<User, Error> {
        let url = self.api_url_with_query("metadata/v0/user", &[("user_id", user_id)])?;
        debug!(user_id, "fetching user");
        let resp: UserResponse = self.get(url).await?;
        Ok(resp.user)
    }
}
