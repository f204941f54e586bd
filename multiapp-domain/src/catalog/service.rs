use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info};

use multiapp_core::types::PackageId;

use super::errors::CatalogError;
use super::types::{AppCategory, AppDescriptor};

/// Source of the apps that can be launched.
#[async_trait]
pub trait AppCatalog: Send + Sync {
    async fn scan_installed_apps(&self) -> Result<Vec<AppDescriptor>, CatalogError>;

    /// Looks an app up by package identifier, without the scan delay.
    async fn find(&self, package_id: &str) -> Option<AppDescriptor>;
}

// name, package, icon, category, web url
const BUILTIN_APPS: [(&str, &str, &str, AppCategory, &str); 10] = [
    ("WhatsApp", "com.whatsapp", "icons/whatsapp.png", AppCategory::Communication, "https://web.whatsapp.com"),
    ("Gmail", "com.google.android.gm", "icons/gmail.png", AppCategory::Productivity, "https://mail.google.com"),
    ("Telegram", "org.telegram.messenger", "icons/telegram.png", AppCategory::Communication, "https://web.telegram.org"),
    ("Instagram", "com.instagram.android", "icons/instagram.png", AppCategory::Social, "https://www.instagram.com"),
    ("Facebook", "com.facebook.katana", "icons/facebook.png", AppCategory::Social, "https://www.facebook.com"),
    ("Twitter/X", "com.twitter.android", "icons/twitter.png", AppCategory::Social, "https://x.com"),
    ("YouTube", "com.google.android.youtube", "icons/youtube.png", AppCategory::Entertainment, "https://m.youtube.com"),
    ("Spotify", "com.spotify.music", "icons/spotify.png", AppCategory::Entertainment, "https://open.spotify.com"),
    ("Slack", "com.Slack", "icons/slack.png", AppCategory::Productivity, "https://app.slack.com"),
    ("Outlook", "com.microsoft.office.outlook", "icons/outlook.png", AppCategory::Productivity, "https://outlook.live.com"),
];

/// A fixed list of apps, returned after an artificial scan delay.
#[derive(Debug, Clone)]
pub struct StaticAppCatalog {
    apps: Option<Vec<AppDescriptor>>,
    scan_delay: Duration,
}

impl StaticAppCatalog {
    /// The built-in list of ten well-known apps.
    pub fn new(scan_delay: Duration) -> Self {
        Self { apps: None, scan_delay }
    }

    pub fn with_apps(apps: Vec<AppDescriptor>, scan_delay: Duration) -> Self {
        Self { apps: Some(apps), scan_delay }
    }

    fn descriptors(&self) -> Result<Vec<AppDescriptor>, CatalogError> {
        if let Some(apps) = &self.apps {
            return Ok(apps.clone());
        }
        BUILTIN_APPS
            .iter()
            .map(|(name, package, icon, category, url)| {
                let package_id = PackageId::new(package).map_err(|e| CatalogError::InvalidDescriptor {
                    name: name.to_string(),
                    source: e,
                })?;
                Ok(AppDescriptor {
                    name: name.to_string(),
                    package_id,
                    icon_ref: icon.to_string(),
                    category: *category,
                    web_url: Some(url.to_string()),
                })
            })
            .collect()
    }
}

#[async_trait]
impl AppCatalog for StaticAppCatalog {
    async fn scan_installed_apps(&self) -> Result<Vec<AppDescriptor>, CatalogError> {
        debug!("Scanning installed apps ({:?} delay)", self.scan_delay);
        if !self.scan_delay.is_zero() {
            tokio::time::sleep(self.scan_delay).await;
        }
        let apps = self.descriptors()?;
        info!("Found {} installed app(s)", apps.len());
        Ok(apps)
    }

    async fn find(&self, package_id: &str) -> Option<AppDescriptor> {
        self.descriptors()
            .ok()?
            .into_iter()
            .find(|app| app.package_id.value() == package_id)
    }
}
