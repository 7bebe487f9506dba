//! Storage request validation.
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Key and data are required")]
    MissingKey,
    #[error("Key cannot be empty")]
    EmptyKey,
    #[error("Key and data are required")]
    MissingData,
    #[error("Key or list parameter required")]
    MissingSelector,
}

/// Validate the body of an upsert: a non-empty key and a non-null payload.
pub fn validate_put_request(
    key: Option<&str>,
    data: Option<&Value>,
) -> Result<(), ValidationError> {
    match key {
        None => return Err(ValidationError::MissingKey),
        Some(k) if k.trim().is_empty() => return Err(ValidationError::EmptyKey),
        _ => {}
    }
    match data {
        None | Some(Value::Null) => Err(ValidationError::MissingData),
        _ => Ok(()),
    }
}
