use userhub_core::entities::ConfigEntry;
use userhub_core::value_objects::RecordId;

use crate::models::ConfigEntryModel;

impl From<ConfigEntryModel> for ConfigEntry {
    fn from(model: ConfigEntryModel) -> Self {
        ConfigEntry {
            id: RecordId::new(model.id),
            key: model.key,
            value: model.value,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
