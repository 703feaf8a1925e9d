//! User service
//!
//! Handles user lookups, account updates, deletion, listing and profiles.

use tracing::{info, instrument};
use userhub_core::entities::{NewProfile, Profile, User};
use userhub_core::{DomainError, Gender, RecordId};

use crate::dto::{
    ProfileResponse, UpdateProfileRequest, UpdateUserRequest, UserListResponse, UserResponse,
    UserWithProfileResponse, UserWithRolesResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Page used when the caller asks for page < 1
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller asks for size < 1
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Clamp a requested page to `(offset, limit)`
pub fn page_window(page: i64, size: i64) -> (i64, i64) {
    let page = if page < 1 { DEFAULT_PAGE } else { page };
    let size = if size < 1 { DEFAULT_PAGE_SIZE } else { size };
    ((page - 1).saturating_mul(size), size)
}

/// User service
pub struct UserService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> UserService<'a> {
    /// Create a new UserService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    pub(crate) async fn load_user(&self, user_id: RecordId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await
            .map_err(ServiceError::store("find user"))?
            .ok_or_else(|| ServiceError::not_found("User", user_id.to_string()))
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get_user(&self, user_id: RecordId) -> ServiceResult<UserResponse> {
        let user = self.load_user(user_id).await?;
        Ok(UserResponse::from(&user))
    }

    /// Get a user together with their profile
    ///
    /// A user without a profile gets the default one here. Unlike at
    /// registration, failing to create it fails the call.
    #[instrument(skip(self))]
    pub async fn get_user_with_profile(
        &self,
        user_id: RecordId,
    ) -> ServiceResult<UserWithProfileResponse> {
        let user = self.load_user(user_id).await?;
        let profile = self.load_or_create_profile(&user).await?;
        Ok(UserWithProfileResponse::from((&user, &profile)))
    }

    async fn load_or_create_profile(&self, user: &User) -> ServiceResult<Profile> {
        let profiles = self.ctx.profile_repo();
        if let Some(profile) = profiles
            .find_by_user(user.id)
            .await
            .map_err(ServiceError::store("find profile"))?
        {
            return Ok(profile);
        }

        let draft = NewProfile::default_for(user.id, &user.username);
        match profiles.create(&draft).await {
            Ok(profile) => {
                info!(user_id = %user.id, "Created default profile");
                Ok(profile)
            }
            // Another request created it first
            Err(DomainError::ProfileAlreadyExists) => profiles
                .find_by_user(user.id)
                .await
                .map_err(ServiceError::store("find profile"))?
                .ok_or_else(|| ServiceError::not_found("Profile", user.id.to_string())),
            Err(e) => Err(ServiceError::store("create profile")(e)),
        }
    }

    /// Get a user together with their roles. A user without roles gets an
    /// empty list.
    #[instrument(skip(self))]
    pub async fn get_user_with_roles(
        &self,
        user_id: RecordId,
    ) -> ServiceResult<UserWithRolesResponse> {
        let user = self.load_user(user_id).await?;
        let roles = self
            .ctx
            .role_repo()
            .find_by_user(user.id)
            .await
            .map_err(ServiceError::store("find user roles"))?;
        Ok(UserWithRolesResponse::from((&user, roles.as_slice())))
    }

    /// Update username, email and optionally password
    #[instrument(skip(self, request), fields(username = %request.username))]
    pub async fn update_user(
        &self,
        user_id: RecordId,
        request: UpdateUserRequest,
    ) -> ServiceResult<UserResponse> {
        let mut user = self.load_user(user_id).await?;
        let users = self.ctx.user_repo();

        if request.username != user.username {
            let taken = users
                .find_by_username(&request.username)
                .await
                .map_err(ServiceError::store("check username"))?
                .is_some_and(|other| other.id != user.id);
            if taken {
                return Err(ServiceError::already_exists("Username already taken"));
            }
            user.set_username(request.username);
        }

        if request.email != user.email {
            let taken = users
                .find_by_email(&request.email)
                .await
                .map_err(ServiceError::store("check email"))?
                .is_some_and(|other| other.id != user.id);
            if taken {
                return Err(ServiceError::already_exists("Email already registered"));
            }
            user.set_email(request.email);
        }

        let password_hash = match request.password.as_deref() {
            Some(password) if !password.is_empty() => Some(
                self.ctx
                    .password_service()
                    .hash(password)
                    .map_err(|e| ServiceError::Dependency {
                        context: "hash password",
                        source: DomainError::InternalError(e.to_string()),
                    })?,
            ),
            _ => None,
        };

        let updated = users
            .update(&user, password_hash.as_deref())
            .await
            .map_err(ServiceError::store("update user"))?;

        info!(user_id = %updated.id, password_changed = password_hash.is_some(), "User updated");

        Ok(UserResponse::from(&updated))
    }

    /// Delete a user along with their profile and role associations
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user_id: RecordId) -> ServiceResult<()> {
        let user = self.load_user(user_id).await?;

        self.ctx
            .user_repo()
            .delete(user.id)
            .await
            .map_err(ServiceError::store("delete user"))?;

        info!(user_id = %user.id, "User deleted");
        Ok(())
    }

    /// List one page of users ordered by id
    ///
    /// `page < 1` is read as 1 and `size < 1` as 10. `total` counts every
    /// user, not just the returned page.
    #[instrument(skip(self))]
    pub async fn list_users(&self, page: i64, size: i64) -> ServiceResult<UserListResponse> {
        let (offset, limit) = page_window(page, size);
        let users = self.ctx.user_repo();

        let items = users
            .list(offset, limit)
            .await
            .map_err(ServiceError::store("list users"))?;
        let total = users
            .count()
            .await
            .map_err(ServiceError::store("count users"))?;

        Ok(UserListResponse {
            total,
            items: items.iter().map(UserResponse::from).collect(),
        })
    }

    /// Overwrite the editable profile fields, creating the profile first if
    /// the user has none
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        user_id: RecordId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        let gender = Gender::try_from(request.gender)
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let user = self.load_user(user_id).await?;
        let mut profile = self.load_or_create_profile(&user).await?;

        profile.nickname = request.nickname;
        profile.avatar = request.avatar;
        profile.bio = request.bio;
        profile.phone = request.phone;
        profile.gender = gender;
        profile.birthday = request.birthday;

        let updated = self
            .ctx
            .profile_repo()
            .update(&profile)
            .await
            .map_err(ServiceError::store("update profile"))?;

        info!(user_id = %user.id, "Profile updated");

        Ok(ProfileResponse::from(&updated))
    }
}
