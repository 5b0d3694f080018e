use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;

/// A named, user-defined value such as a saved filter configuration.
///
/// `id` is expected to be unique within its collection but nothing enforces it;
/// a collection is an ordered sequence, not a map.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Preset<T> {
    pub id: String,
    pub name: String,
    pub value: T,
}

impl<T> Preset<T> {
    /// Build a preset with a freshly generated id.
    pub fn new(name: impl Into<String>, value: T) -> Result<Self, ModelError> {
        let name = Self::validate_name(name.into())?;
        Ok(Self { id: Uuid::new_v4().to_string(), name, value })
    }

    /// Trim a display name and reject blank ones.
    pub fn validate_name(name: String) -> Result<String, ModelError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ModelError::Validation("preset name must not be empty".into()));
        }
        Ok(trimmed.to_string())
    }
}
