#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing cat record.
    pub fn cat_not_found(id: impl Into<String>) -> Self {
        CoreError::NotFound {
            entity: "Cat",
            id: id.into(),
        }
    }
}
