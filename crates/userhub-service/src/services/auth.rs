//! Authentication service
//!
//! Handles user registration, login and token validation.

use tracing::{info, instrument, warn};
use userhub_core::entities::{NewProfile, NewUser, Profile, Role, User, DEFAULT_ROLE_NAME};
use userhub_core::{DomainError, RecordId};

use crate::dto::{LoginRequest, RegisterRequest, TokenResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Result of a best-effort step that must not fail the surrounding operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome<T> {
    Completed(T),
    /// Nothing to do; carries the reason
    Skipped(&'static str),
    /// The step was attempted and failed; carries the error message
    Failed(String),
}

impl<T> StepOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn completed(&self) -> Option<&T> {
        match self {
            Self::Completed(value) => Some(value),
            _ => None,
        }
    }
}

/// A created account plus what happened to its secondary records
#[derive(Debug, Clone)]
pub struct Registration {
    pub user: User,
    pub profile: StepOutcome<Profile>,
    pub default_role: StepOutcome<Role>,
}

/// Authentication service
pub struct AuthService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AuthService<'a> {
    /// Create a new AuthService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a new user
    ///
    /// The user row is the only write that can fail the call. The default
    /// profile and the default role are attempted afterwards and reported in
    /// the returned [`Registration`].
    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<Registration> {
        let users = self.ctx.user_repo();

        if users
            .find_by_username(&request.username)
            .await
            .map_err(ServiceError::store("check username"))?
            .is_some()
        {
            return Err(ServiceError::already_exists("Username already taken"));
        }

        if users
            .find_by_email(&request.email)
            .await
            .map_err(ServiceError::store("check email"))?
            .is_some()
        {
            return Err(ServiceError::already_exists("Email already registered"));
        }

        let password_hash = self
            .ctx
            .password_service()
            .hash(&request.password)
            .map_err(|e| ServiceError::Dependency {
                context: "hash password",
                source: DomainError::InternalError(e.to_string()),
            })?;

        let user = users
            .create(&NewUser::active(request.username, request.email), &password_hash)
            .await
            .map_err(ServiceError::store("create user"))?;

        info!(user_id = %user.id, "User registered successfully");

        let profile = self.create_default_profile(&user).await;
        let default_role = self.assign_default_role(&user).await;

        Ok(Registration {
            user,
            profile,
            default_role,
        })
    }

    async fn create_default_profile(&self, user: &User) -> StepOutcome<Profile> {
        let draft = NewProfile::default_for(user.id, &user.username);
        match self.ctx.profile_repo().create(&draft).await {
            Ok(profile) => StepOutcome::Completed(profile),
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Failed to create default profile");
                StepOutcome::Failed(e.to_string())
            }
        }
    }

    async fn assign_default_role(&self, user: &User) -> StepOutcome<Role> {
        let roles = self.ctx.role_repo();
        let role = match roles.find_by_name(DEFAULT_ROLE_NAME).await {
            Ok(Some(role)) => role,
            Ok(None) => {
                warn!(user_id = %user.id, role = DEFAULT_ROLE_NAME, "Default role does not exist");
                return StepOutcome::Skipped("default role does not exist");
            }
            Err(e) => {
                warn!(user_id = %user.id, error = %e, "Failed to look up default role");
                return StepOutcome::Failed(e.to_string());
            }
        };

        match roles.add_to_user(user.id, role.id).await {
            Ok(_) => StepOutcome::Completed(role),
            Err(e) => {
                warn!(user_id = %user.id, role_id = %role.id, error = %e, "Failed to assign default role");
                StepOutcome::Failed(e.to_string())
            }
        }
    }

    /// Login with username and password
    ///
    /// An unknown username, an account that is not active and a wrong
    /// password all produce the same `InvalidCredentials`.
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<TokenResponse> {
        let user = self
            .ctx
            .user_repo()
            .find_by_username(&request.username)
            .await
            .map_err(ServiceError::store("find user"))?
            .ok_or_else(|| {
                warn!("Login failed: user not found");
                ServiceError::invalid_credentials()
            })?;

        if !user.can_login() {
            warn!(user_id = %user.id, status = %user.status, "Login failed: account not active");
            return Err(ServiceError::invalid_credentials());
        }

        let password_hash = self
            .ctx
            .user_repo()
            .get_password_hash(user.id)
            .await
            .map_err(ServiceError::store("load password hash"))?
            .ok_or_else(|| {
                warn!(user_id = %user.id, "Login failed: no password hash");
                ServiceError::invalid_credentials()
            })?;

        self.ctx
            .password_service()
            .verify_or_error(&request.password, &password_hash)
            .map_err(|e| {
                warn!(user_id = %user.id, "Login failed: invalid password");
                ServiceError::from(e)
            })?;

        let issued = self.ctx.token_service().issue(user.id)?;

        info!(user_id = %user.id, "User logged in successfully");

        Ok(TokenResponse::from(issued))
    }

    /// Resolve a bearer token to the id of a user that may still act
    ///
    /// Signature and expiry are checked first; the subject must then exist and
    /// be active. Every rejection is `InvalidToken`.
    #[instrument(skip_all)]
    pub async fn validate_token(&self, token: &str) -> ServiceResult<RecordId> {
        let claims = self
            .ctx
            .token_service()
            .decode_token(token)
            .map_err(|_| ServiceError::invalid_token())?;
        let user_id = claims.user_id().map_err(|_| ServiceError::invalid_token())?;

        let user = self
            .ctx
            .user_repo()
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::store("find user"))?;

        match user {
            Some(user) if user.can_login() => Ok(user.id),
            Some(user) => {
                warn!(user_id = %user.id, status = %user.status, "Token rejected: account not active");
                Err(ServiceError::invalid_token())
            }
            None => Err(ServiceError::invalid_token()),
        }
    }
}
