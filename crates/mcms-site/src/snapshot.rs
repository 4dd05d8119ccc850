//! File-backed site description
//!
//! A snapshot holds everything the menu builder asks the host for: site
//! settings, users with their roles and capabilities, page records and the
//! host navigation feeds. Snapshots are read from TOML, JSON or YAML, the
//! format chosen by file extension.
//!
//! ```toml
//! [settings]
//! rootmenuitems = """
//! Home|home|/
//! -News|news|/news/
//! """
//!
//! [menu]
//! site_url = "https://lms.example.org/"
//!
//! [[users]]
//! id = 2
//! username = "admin"
//! roles = ["manager"]
//! capabilities = ["managepages"]
//!
//! [[pages]]
//! id = 1
//! title = "About us"
//! identifier = "about"
//! parent_menu = "top"
//! roles = ["guest", "student"]
//! ```

use crate::error::{SiteError, SiteResult};
use mcms_menu::{MenuOptions, NavigationItem, Page, Viewer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Snapshot serialization formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotFormat {
    /// `.toml`
    Toml,
    /// `.json`
    Json,
    /// `.yaml` or `.yml`
    Yaml,
}

impl SnapshotFormat {
    /// Format for a file extension
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Format for a file path
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// A user known to the site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteUser {
    /// Host user id
    pub id: u64,
    /// Login name
    pub username: String,
    /// Role short-names held at site level
    pub roles: Vec<String>,
    /// Granted capability names
    pub capabilities: Vec<String>,
}

impl SiteUser {
    /// Viewer handle of this user
    #[inline]
    #[must_use]
    pub fn viewer(&self) -> Viewer {
        Viewer::new(self.id)
    }
}

/// Host navigation feeds
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteNavigation {
    /// Entries added at the end of every menu
    pub auxiliary: Vec<NavigationItem>,
    /// Primary navigation
    pub primary: Vec<NavigationItem>,
    /// Secondary navigation per page layout
    pub secondary: BTreeMap<String, Vec<NavigationItem>>,
}

/// Everything the menu needs to know about a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSnapshot {
    /// Plugin settings (`rootmenuitems`, `adminmenuitems`)
    pub settings: BTreeMap<String, String>,
    /// Builder options
    pub menu: MenuOptions,
    /// Known users
    pub users: Vec<SiteUser>,
    /// Page records in storage order
    pub pages: Vec<Page>,
    /// Navigation feeds
    pub navigation: SiteNavigation,
}

impl SiteSnapshot {
    /// Empty snapshot with default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load snapshot from a file, format chosen by extension
    ///
    /// # Errors
    /// - `SiteError::UnsupportedFormat` for unknown extensions
    /// - `SiteError::Io` if the file cannot be read
    /// - a format error if the content does not parse
    pub fn load(path: impl AsRef<Path>) -> SiteResult<Self> {
        let path = path.as_ref();
        let format = SnapshotFormat::from_path(path).ok_or_else(|| SiteError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let text = std::fs::read_to_string(path).map_err(|e| SiteError::io_error(path, e))?;

        let snapshot = Self::parse(&text, format)?;
        tracing::debug!(
            "loaded site snapshot {}: {} users, {} pages",
            path.display(),
            snapshot.users.len(),
            snapshot.pages.len()
        );
        Ok(snapshot)
    }

    /// Parse snapshot text
    ///
    /// # Errors
    /// Returns the format's parse error.
    pub fn parse(text: &str, format: SnapshotFormat) -> SiteResult<Self> {
        let snapshot = match format {
            SnapshotFormat::Toml => toml::from_str(text)?,
            SnapshotFormat::Json => serde_json::from_str(text)?,
            SnapshotFormat::Yaml => serde_yaml::from_str(text)?,
        };
        Ok(snapshot)
    }

    /// With setting
    #[must_use]
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// With builder options
    #[must_use]
    pub fn with_menu_options(mut self, options: MenuOptions) -> Self {
        self.menu = options;
        self
    }

    /// With user
    #[must_use]
    pub fn with_user(mut self, user: SiteUser) -> Self {
        self.users.push(user);
        self
    }

    /// With page
    #[must_use]
    pub fn with_page(mut self, page: Page) -> Self {
        self.pages.push(page);
        self
    }

    /// With navigation feeds
    #[must_use]
    pub fn with_navigation(mut self, navigation: SiteNavigation) -> Self {
        self.navigation = navigation;
        self
    }

    /// User by host id
    #[must_use]
    pub fn find_user(&self, id: u64) -> Option<&SiteUser> {
        self.users.iter().find(|u| u.id == id)
    }

    /// User by login name
    #[must_use]
    pub fn find_user_by_name(&self, username: &str) -> Option<&SiteUser> {
        self.users.iter().find(|u| u.username == username)
    }

    /// Viewer for a login name; `guest` is always known
    ///
    /// # Errors
    /// Returns `SiteError::UnknownViewer` when no such user exists.
    pub fn viewer(&self, username: &str) -> SiteResult<Viewer> {
        match self.find_user_by_name(username) {
            Some(user) => Ok(user.viewer()),
            None if username == GUEST_ROLE => Ok(Viewer::guest()),
            None => Err(SiteError::unknown_viewer(username)),
        }
    }
}

/// Role held by the anonymous viewer
pub const GUEST_ROLE: &str = "guest";

#[cfg(test)]
mod tests {
    use super::*;

    const SITE_TOML: &str = r#"
[settings]
rootmenuitems = "Home|home|/"

[menu]
site_url = "https://lms.example.org/"
strict_identifiers = true

[[users]]
id = 2
username = "admin"
roles = ["manager"]
capabilities = ["managepages"]

[[pages]]
id = 1
title = "About us"
identifier = "about"
parent_menu = "top"
menu_sort_order = 3
roles = ["guest"]

[[navigation.secondary.admin]]
key = "users"
label = "Users"
url = "https://lms.example.org/admin/user.php"
"#;

    #[test]
    fn format_from_extension() {
        assert_eq!(SnapshotFormat::from_path(Path::new("site.TOML")), Some(SnapshotFormat::Toml));
        assert_eq!(SnapshotFormat::from_path(Path::new("site.yml")), Some(SnapshotFormat::Yaml));
        assert_eq!(SnapshotFormat::from_path(Path::new("site.json")), Some(SnapshotFormat::Json));
        assert_eq!(SnapshotFormat::from_path(Path::new("site")), None);
    }

    #[test]
    fn parse_toml() {
        let site = SiteSnapshot::parse(SITE_TOML, SnapshotFormat::Toml).unwrap();

        assert_eq!(site.settings["rootmenuitems"], "Home|home|/");
        assert!(site.menu.strict_identifiers);
        assert_eq!(site.menu.admin_identifier, "administrationsite");
        assert_eq!(site.pages[0].identifier.as_deref(), Some("about"));
        assert_eq!(site.pages[0].parent_menu, mcms_menu::MenuTarget::Top);
        assert_eq!(site.navigation.secondary["admin"][0].key.as_deref(), Some("users"));
    }

    #[test]
    fn parse_json_and_yaml() {
        let json = r#"{"users": [{"id": 5, "username": "sam", "roles": ["student"]}]}"#;
        let site = SiteSnapshot::parse(json, SnapshotFormat::Json).unwrap();
        assert_eq!(site.find_user_by_name("sam").map(|u| u.id), Some(5));

        let yaml = "pages:\n  - id: 4\n    title: Help\n    parent_menu: none\n";
        let site = SiteSnapshot::parse(yaml, SnapshotFormat::Yaml).unwrap();
        assert_eq!(site.pages[0].title, "Help");
        assert_eq!(site.pages[0].parent_menu, mcms_menu::MenuTarget::None);
    }

    #[test]
    fn bad_toml_is_reported() {
        let err = SiteSnapshot::parse("[users", SnapshotFormat::Toml).unwrap_err();
        assert!(matches!(err, SiteError::Toml(_)));
    }

    #[test]
    fn viewer_lookup() {
        let site = SiteSnapshot::parse(SITE_TOML, SnapshotFormat::Toml).unwrap();

        assert_eq!(site.viewer("admin").unwrap(), Viewer::new(2));
        assert!(site.viewer("guest").unwrap().is_guest());
        assert!(matches!(site.viewer("mallory"), Err(SiteError::UnknownViewer { .. })));
    }
}
