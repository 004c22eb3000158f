use std::sync::Arc;

use async_trait::async_trait;
use auth::TokenIssuer;
use chrono::Utc;

use crate::domain::user::models::AccessToken;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::UpdateProfileCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::models::Username;
use crate::user::errors::UserError;
use crate::user::ports::AuthenticatorPort;
use crate::user::ports::UserRepository;

/// Domain service for registration, credential checks and profile updates.
///
/// Concrete implementation of AuthenticatorPort with dependency injection.
pub struct Authenticator<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    issuer: Arc<TokenIssuer>,
}

impl<UR> Authenticator<UR>
where
    UR: UserRepository,
{
    /// Create a new authenticator with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `issuer` - Shared password hasher and token codec
    pub fn new(repository: Arc<UR>, issuer: Arc<TokenIssuer>) -> Self {
        Self { repository, issuer }
    }

    // Argon2 blocks for tens of milliseconds; run it off the async workers.
    async fn hash_password(&self, password: String) -> Result<String, UserError> {
        let issuer = Arc::clone(&self.issuer);

        tokio::task::spawn_blocking(move || issuer.hash_password(&password))
            .await
            .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))?
            .map_err(UserError::from)
    }

    // Without a stored hash the check still runs Argon2 and then fails.
    async fn verify_password(
        &self,
        password: &str,
        stored_hash: Option<&str>,
    ) -> Result<bool, UserError> {
        let issuer = Arc::clone(&self.issuer);
        let password = password.to_string();
        let stored_hash = stored_hash.map(str::to_string);

        tokio::task::spawn_blocking(move || match stored_hash {
            Some(stored_hash) => issuer.verify_password(&password, &stored_hash),
            None => issuer.verify_absent_password(&password),
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))
    }
}

#[async_trait]
impl<UR> AuthenticatorPort for Authenticator<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        let password_hash = self.hash_password(command.password).await?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            is_active: true,
            created_at: Utc::now(),
        };

        let created_user = self.repository.insert(user).await?;
        tracing::info!(
            user_id = %created_user.id,
            username = %created_user.username,
            "User registered"
        );

        Ok(created_user)
    }

    async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<User>, UserError> {
        // A name that can never be registered cannot match either.
        let user = match Username::new(username.to_string()) {
            Ok(username) => self.repository.find_by_username(&username).await?,
            Err(_) => None,
        };

        let stored_hash = user.as_ref().map(|user| user.password_hash.as_str());
        let verified = self.verify_password(password, stored_hash).await?;

        match user {
            Some(user) if verified => Ok(Some(user)),
            Some(user) => {
                tracing::debug!(user_id = %user.id, "Authentication failed: password mismatch");
                Ok(None)
            }
            None => {
                tracing::debug!("Authentication failed: unknown username");
                Ok(None)
            }
        }
    }

    async fn login(&self, username: &str, password: &str) -> Result<AccessToken, UserError> {
        let user = self
            .authenticate(username, password)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        let issued = self.issuer.issue(user.username.as_str())?;
        tracing::info!(user_id = %user.id, "Access token issued");

        Ok(AccessToken::bearer(issued.access_token, issued.expires_in))
    }

    async fn update_profile(
        &self,
        id: &UserId,
        command: UpdateProfileCommand,
    ) -> Result<User, UserError> {
        let mut user = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(UserError::NotFound(id.to_string()))?;

        if let Some(new_username) = command.username {
            if new_username != user.username {
                if let Some(holder) = self.repository.find_by_username(&new_username).await? {
                    if holder.id != user.id {
                        return Err(UserError::UsernameAlreadyExists(new_username.to_string()));
                    }
                }
            }
            user.username = new_username;
        }

        if let Some(new_email) = command.email {
            if new_email != user.email {
                if let Some(holder) = self.repository.find_by_email(&new_email).await? {
                    if holder.id != user.id {
                        return Err(UserError::EmailAlreadyExists(new_email.to_string()));
                    }
                }
            }
            user.email = new_email;
        }

        if let Some(new_password) = command.password {
            user.password_hash = self.hash_password(new_password).await?;
        }

        let updated_user = self.repository.update(user).await?;
        tracing::info!(user_id = %updated_user.id, "User profile updated");

        Ok(updated_user)
    }
}
