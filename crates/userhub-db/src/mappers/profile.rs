//! Profile model -> entity mapper

use userhub_core::entities::Profile;
use userhub_core::error::DomainError;
use userhub_core::value_objects::{Gender, RecordId};

use crate::models::ProfileModel;

impl TryFrom<ProfileModel> for Profile {
    type Error = DomainError;

    fn try_from(model: ProfileModel) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: RecordId::new(model.id),
            user_id: RecordId::new(model.user_id),
            nickname: model.nickname,
            avatar: model.avatar,
            bio: model.bio,
            phone: model.phone,
            gender: Gender::try_from(model.gender)?,
            birthday: model.birthday,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
