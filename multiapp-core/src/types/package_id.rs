//! Package identifier type.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a (mock) application package, e.g. `com.whatsapp`.
///
/// The value must not be empty or whitespace-only and must not contain
/// whitespace. It is case-sensitive.
///
/// Deserialization does not re-run the validation so that persisted data
/// written by older versions is restored as-is.
///
/// # Examples
///
/// ```
/// # use multiapp_core::types::PackageId;
/// # use multiapp_core::error::CoreError;
/// let id = PackageId::new("com.whatsapp").unwrap();
/// assert_eq!(id.value(), "com.whatsapp");
///
/// assert!(matches!(PackageId::new(""), Err(CoreError::InvalidInput(_))));
/// assert!(matches!(PackageId::new("com whatsapp"), Err(CoreError::InvalidInput(_))));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(String);

impl PackageId {
    /// Creates a new `PackageId`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the value is empty or contains
    /// whitespace.
    pub fn new(value: &str) -> Result<Self, CoreError> {
        if value.trim().is_empty() {
            return Err(CoreError::InvalidInput(
                "PackageId cannot be empty.".to_string(),
            ));
        }
        if value.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidInput(format!(
                "PackageId '{}' must not contain whitespace.",
                value
            )));
        }
        Ok(PackageId(value.to_string()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PackageId> for String {
    fn from(id: PackageId) -> Self {
        id.0
    }
}

impl AsRef<str> for PackageId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use static_assertions::assert_impl_all;

    assert_impl_all!(PackageId: fmt::Debug, Clone, PartialEq, Eq, std::hash::Hash, Serialize, Deserialize<'static>, Send, Sync, fmt::Display, AsRef<str>);

    #[test]
    fn package_id_new_valid() {
        assert_eq!(PackageId::new("com.test.app").unwrap().value(), "com.test.app");
        assert_eq!(PackageId::new("com.Google.Android.GM").unwrap().value(), "com.Google.Android.GM");
    }

    #[test]
    fn package_id_new_rejects_blank() {
        for blank in ["", "   ", "\t"] {
            match PackageId::new(blank) {
                Err(CoreError::InvalidInput(msg)) => assert_eq!(msg, "PackageId cannot be empty."),
                other => panic!("Expected InvalidInput for {:?}, got {:?}", blank, other),
            }
        }
    }

    #[test]
    fn package_id_new_rejects_inner_whitespace() {
        match PackageId::new("com.test app") {
            Err(CoreError::InvalidInput(msg)) => {
                assert_eq!(msg, "PackageId 'com.test app' must not contain whitespace.")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn package_id_conversions() {
        let id = PackageId::new("com.spotify.music").unwrap();
        assert_eq!(format!("{}", id), "com.spotify.music");
        let s_ref: &str = id.as_ref();
        assert_eq!(s_ref, "com.spotify.music");
        let s: String = id.into();
        assert_eq!(s, "com.spotify.music");
    }

    #[test]
    fn package_id_serializes_as_plain_string() {
        let id = PackageId::new("org.telegram.messenger").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"org.telegram.messenger\"");
        let back: PackageId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);

        // Persisted values are taken as-is.
        let lenient: PackageId = serde_json::from_str("\"legacy id\"").unwrap();
        assert_eq!(lenient.value(), "legacy id");
    }
}
