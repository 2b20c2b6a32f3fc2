use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum CourseError {
    /// A required field was blank on create or edit. Rejected before any
    /// state mutation.
    #[error("{field} is required")]
    Validation { field: &'static str },

    #[error("Module not found: {0}")]
    ModuleNotFound(Uuid),

    #[error("Resource not found: {0}")]
    ResourceNotFound(Uuid),

    /// An edit addressed a resource of the other kind (e.g. a link edit at a
    /// file). Edits never change a resource's kind.
    #[error("Cannot edit {actual} as {requested}")]
    KindMismatch {
        actual: &'static str,
        requested: &'static str,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CourseError>;
