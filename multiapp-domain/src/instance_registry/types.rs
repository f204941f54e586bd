use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use multiapp_core::types::PackageId;

use super::errors::RegistryError;

/// Registry-assigned instance identifier. Never reused within a process.
pub type InstanceId = u64;

/// How an instance is presented. Has no effect on registry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LaunchMode {
    /// Opaque, nothing to show besides the card.
    Native,
    /// Opened as a separate browser tab or window.
    Web,
    /// Rendered inside a floating panel.
    EmbeddedWebView,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchMode::Native => "native",
            LaunchMode::Web => "web",
            LaunchMode::EmbeddedWebView => "embeddedWebView",
        }
    }

    pub fn requires_web_url(&self) -> bool {
        !matches!(self, LaunchMode::Native)
    }
}

impl fmt::Display for LaunchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LaunchMode {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [LaunchMode::Native, LaunchMode::Web, LaunchMode::EmbeddedWebView]
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| RegistryError::Validation(format!("unknown launch mode '{}'", s)))
    }
}

/// One simulated running copy of an app.
///
/// Instances are immutable once created; the registry only ever inserts and
/// removes them. The serialized form is the persisted wire format:
///
/// ```json
/// {"id":1,"packageIdentifier":"com.whatsapp","displayName":"WhatsApp #1",
///  "webUrl":"https://web.whatsapp.com","mode":"web","createdAt":1700000000000}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instance {
    id: InstanceId,
    #[serde(rename = "packageIdentifier")]
    package_id: PackageId,
    display_name: String,
    #[serde(default, with = "empty_string_as_none")]
    web_url: Option<String>,
    mode: LaunchMode,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
}

impl Instance {
    pub(crate) fn new(
        id: InstanceId,
        package_id: PackageId,
        display_name: String,
        web_url: Option<String>,
        mode: LaunchMode,
    ) -> Self {
        Self {
            id,
            package_id,
            display_name,
            web_url,
            mode,
            // The wire format keeps milliseconds only.
            created_at: Utc::now().trunc_subsecs(3),
        }
    }

    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn package_id(&self) -> &PackageId {
        &self.package_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn web_url(&self) -> Option<&str> {
        self.web_url.as_deref()
    }

    pub fn mode(&self) -> LaunchMode {
        self.mode
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// `None` is written as `""`; an empty string or `null` reads back as `None`.
mod empty_string_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|url| !url.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use serde_json::json;
    use static_assertions::assert_impl_all;

    assert_impl_all!(Instance: Send, Sync, Clone);

    #[rstest]
    #[case(LaunchMode::Native, "\"native\"")]
    #[case(LaunchMode::Web, "\"web\"")]
    #[case(LaunchMode::EmbeddedWebView, "\"embeddedWebView\"")]
    fn test_launch_mode_wire_names(#[case] mode: LaunchMode, #[case] wire: &str) {
        assert_eq!(serde_json::to_string(&mode).unwrap(), wire);
        assert_eq!(format!("\"{}\"", mode), wire);
    }

    #[test]
    fn test_launch_mode_from_str() {
        assert_eq!("embeddedWebView".parse::<LaunchMode>().unwrap(), LaunchMode::EmbeddedWebView);
        assert!(matches!("EMBEDDED".parse::<LaunchMode>(), Err(RegistryError::Validation(_))));
    }

    #[test]
    fn test_instance_wire_format() {
        let instance = Instance::new(
            4,
            PackageId::new("com.test.app").unwrap(),
            "Test".to_string(),
            None,
            LaunchMode::Native,
        );
        let value = serde_json::to_value(&instance).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 4,
                "packageIdentifier": "com.test.app",
                "displayName": "Test",
                "webUrl": "",
                "mode": "native",
                "createdAt": instance.created_at().timestamp_millis(),
            })
        );
    }

    #[test]
    fn test_instance_from_persisted_json() {
        let instance: Instance = serde_json::from_value(json!({
            "id": 7,
            "packageIdentifier": "com.google.android.gm",
            "displayName": "Gmail #2",
            "webUrl": "https://mail.google.com",
            "mode": "embeddedWebView",
            "createdAt": 1_700_000_000_123_i64,
        }))
        .unwrap();

        assert_eq!(instance.id(), 7);
        assert_eq!(instance.web_url(), Some("https://mail.google.com"));
        assert_eq!(instance.mode(), LaunchMode::EmbeddedWebView);
        assert_eq!(instance.created_at().timestamp_millis(), 1_700_000_000_123);
    }

    #[rstest]
    #[case(json!(""))]
    #[case(json!(null))]
    fn test_empty_web_url_reads_as_none(#[case] web_url: serde_json::Value) {
        let instance: Instance = serde_json::from_value(json!({
            "id": 1,
            "packageIdentifier": "com.test.app",
            "displayName": "Test",
            "webUrl": web_url,
            "mode": "native",
            "createdAt": 0,
        }))
        .unwrap();
        assert_eq!(instance.web_url(), None);
    }

    #[test]
    fn test_created_at_survives_serialization() {
        let instance = Instance::new(
            1,
            PackageId::new("com.test.app").unwrap(),
            "Test".to_string(),
            Some("https://example.com".to_string()),
            LaunchMode::Web,
        );
        let json = serde_json::to_string(&instance).unwrap();
        let back: Instance = serde_json::from_str(&json).unwrap();
        assert_eq!(back, instance);
    }
}
