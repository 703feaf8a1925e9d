//! Value objects - immutable types that represent domain concepts

mod record_id;
mod status;

pub use record_id::{RecordId, RecordIdParseError};
pub use status::{Gender, UserStatus};
