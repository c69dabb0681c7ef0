use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Avatar upload cap.
pub const MAX_AVATAR_SIZE_BYTES: u64 = 5 * 1024 * 1024;

/// Image types accepted for avatars.
pub const ALLOWED_AVATAR_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "image/gif"];

/// Flat map of profile form field name to value. Ordered so that form
/// encoding and test assertions are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields(pub BTreeMap<String, String>);

impl ProfileFields {
    pub fn set(&mut self, name: &str, value: &str) {
        self.0.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Merge server-returned values. `None` values are skipped, the
    /// server sends those for fields it did not change.
    pub fn merge(&mut self, data: &BTreeMap<String, Option<String>>) {
        for (name, value) in data {
            if let Some(value) = value {
                self.0.insert(name.clone(), value.clone());
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AvatarError {
    #[error("avatar must be 5 MB or smaller")]
    TooLarge,

    #[error("avatar must be a JPG, PNG or GIF image")]
    UnsupportedType,
}

/// Client-side gate applied before any upload request is made.
pub fn validate_avatar(mime: Option<&str>, size_bytes: u64) -> Result<(), AvatarError> {
    if size_bytes > MAX_AVATAR_SIZE_BYTES {
        return Err(AvatarError::TooLarge);
    }
    match mime {
        Some(mime) if ALLOWED_AVATAR_MIME_TYPES.contains(&mime) => Ok(()),
        _ => Err(AvatarError::UnsupportedType),
    }
}
