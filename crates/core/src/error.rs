use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("draft snapshot is not valid JSON: {0}")]
    DraftDecode(String),

    #[error("draft snapshot root is not an object")]
    DraftNotObject,

    #[error("unknown entity type key: {0}")]
    UnknownEntityType(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
