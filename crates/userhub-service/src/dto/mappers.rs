//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use userhub_common::IssuedToken;
use userhub_core::entities::{ConfigEntry, Profile, Role, User};

use super::responses::{
    ConfigResponse, ProfileResponse, RoleResponse, TokenResponse, UserResponse,
    UserWithProfileResponse, UserWithRolesResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.into_inner(),
            username: user.username.clone(),
            email: user.email.clone(),
            status: user.status.code(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&Profile> for ProfileResponse {
    fn from(profile: &Profile) -> Self {
        Self {
            id: profile.id.into_inner(),
            user_id: profile.user_id.into_inner(),
            nickname: profile.nickname.clone(),
            avatar: profile.avatar.clone(),
            bio: profile.bio.clone(),
            phone: profile.phone.clone(),
            gender: profile.gender.code(),
            birthday: profile.birthday.clone(),
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<(&User, &Profile)> for UserWithProfileResponse {
    fn from((user, profile): (&User, &Profile)) -> Self {
        Self {
            user: UserResponse::from(user),
            profile: ProfileResponse::from(profile),
        }
    }
}

impl From<(&User, &[Role])> for UserWithRolesResponse {
    fn from((user, roles): (&User, &[Role])) -> Self {
        Self {
            user: UserResponse::from(user),
            roles: roles.iter().map(RoleResponse::from).collect(),
        }
    }
}

impl From<IssuedToken> for TokenResponse {
    fn from(issued: IssuedToken) -> Self {
        Self {
            token: issued.token,
            expires_at: issued.expires_at.timestamp(),
        }
    }
}

// ============================================================================
// Role Mappers
// ============================================================================

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id.into_inner(),
            name: role.name.clone(),
            description: role.description.clone(),
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self::from(&role)
    }
}

// ============================================================================
// Config Mappers
// ============================================================================

impl From<&ConfigEntry> for ConfigResponse {
    fn from(entry: &ConfigEntry) -> Self {
        Self {
            id: entry.id.into_inner(),
            key: entry.key.clone(),
            value: entry.value.clone(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

impl From<ConfigEntry> for ConfigResponse {
    fn from(entry: ConfigEntry) -> Self {
        Self::from(&entry)
    }
}
