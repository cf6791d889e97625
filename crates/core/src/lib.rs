pub mod canonical;
pub mod entity;
pub mod error;
pub mod field_value;
pub mod ids;
pub mod provenance;
pub mod record;
pub mod snapshot;

pub use canonical::{CanonicalRecordSet, CanonicalRow};
pub use entity::EntityType;
pub use error::CoreError;
pub use field_value::FieldValue;
pub use ids::*;
pub use provenance::Provenance;
pub use record::Record;
pub use snapshot::DraftSnapshot;
