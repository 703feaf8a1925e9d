//! User model -> entity mapper

use userhub_core::entities::User;
use userhub_core::error::DomainError;
use userhub_core::value_objects::{RecordId, UserStatus};

use crate::models::UserModel;

impl TryFrom<UserModel> for User {
    type Error = DomainError;

    fn try_from(model: UserModel) -> Result<Self, Self::Error> {
        Ok(User {
            id: RecordId::new(model.id),
            username: model.username,
            email: model.email,
            status: UserStatus::try_from(model.status)?,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
