use std::fmt;

use serde::{Deserialize, Serialize};

use multiapp_core::types::PackageId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AppCategory {
    Communication,
    Social,
    Productivity,
    Entertainment,
    Utilities,
}

impl fmt::Display for AppCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AppCategory::Communication => "Communication",
            AppCategory::Social => "Social",
            AppCategory::Productivity => "Productivity",
            AppCategory::Entertainment => "Entertainment",
            AppCategory::Utilities => "Utilities",
        };
        f.write_str(name)
    }
}

/// An "installed" app as reported by the catalog. Immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDescriptor {
    pub name: String,
    #[serde(rename = "packageIdentifier")]
    pub package_id: PackageId,
    pub icon_ref: String,
    pub category: AppCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}
