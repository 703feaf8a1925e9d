//! Role model -> entity mapper

use userhub_core::entities::Role;
use userhub_core::value_objects::RecordId;

use crate::models::RoleModel;

impl From<RoleModel> for Role {
    fn from(model: RoleModel) -> Self {
        Role {
            id: RecordId::new(model.id),
            name: model.name,
            description: model.description,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
