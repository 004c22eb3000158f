use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;

use crate::domain::user::models::User;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AccessGuardPort;
use crate::user::ports::UserRepository;

/// Resolves bearer tokens to the users they were issued for.
///
/// Every protected operation goes through [`AccessGuardPort::resolve`];
/// there is no other path from a request to a `User`.
pub struct AccessGuard<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    issuer: Arc<TokenIssuer>,
}

impl<UR> AccessGuard<UR>
where
    UR: UserRepository,
{
    pub fn new(repository: Arc<UR>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repository, issuer }
    }
}

#[async_trait]
impl<UR> AccessGuardPort for AccessGuard<UR>
where
    UR: UserRepository,
{
    async fn resolve(&self, bearer_token: &str) -> Result<User, UserError> {
        let claims = self.issuer.validate(bearer_token).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            UserError::Unauthorized
        })?;

        let username = Username::new(claims.sub).map_err(|e| {
            tracing::warn!(error = %e, "Bearer token subject is not a username");
            UserError::Unauthorized
        })?;

        // The subject may have been renamed since the token was issued.
        self.repository
            .find_by_username(&username)
            .await?
            .ok_or_else(|| {
                tracing::warn!(username = %username, "Bearer token subject not found");
                UserError::Unauthorized
            })
    }
}
