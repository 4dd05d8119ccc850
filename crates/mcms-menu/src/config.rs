//! Menu configuration
//!
//! [`MenuOptions`] holds the knobs of the builder itself. The menu
//! definition text and the admin allow-list are site settings read through
//! a [`ConfigProvider`](crate::collaborators::ConfigProvider) under the keys
//! below.

use serde::{Deserialize, Serialize};
use url::Url;

/// Setting holding the menu definition text
pub const ROOT_MENU_ITEMS: &str = "rootmenuitems";

/// Setting holding the comma-separated secondary navigation keys shown in
/// the administration subtree
pub const ADMIN_MENU_ITEMS: &str = "adminmenuitems";

/// Site root used when none is configured
pub const DEFAULT_SITE_URL: &str = "http://localhost/";

/// Builder options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuOptions {
    /// Site root; relative links and page URLs resolve below it
    pub site_url: Url,
    /// Sort key of auxiliary navigation entries
    pub auxiliary_sort: i64,
    /// Sort key of the administration node
    pub admin_sort: i64,
    /// Label of the administration node
    pub admin_label: String,
    /// Identifier of the administration node
    pub admin_identifier: String,
    /// Page layout whose secondary navigation feeds the administration node
    pub admin_page_layout: String,
    /// Reject menus in which two nodes share an identifier
    pub strict_identifiers: bool,
    /// Capacity of the parsed definition cache
    pub cache_capacity: u64,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            auxiliary_sort: 9_000,
            admin_sort: 10_000,
            admin_label: "Site administration".to_string(),
            admin_identifier: "administrationsite".to_string(),
            admin_page_layout: "admin".to_string(),
            strict_identifiers: false,
            cache_capacity: 64,
        }
    }
}

impl MenuOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With site root
    #[inline]
    #[must_use]
    pub fn with_site_url(mut self, site_url: Url) -> Self {
        self.site_url = site_url;
        self
    }

    /// With strict identifier validation
    #[inline]
    #[must_use]
    pub fn with_strict_identifiers(mut self, strict: bool) -> Self {
        self.strict_identifiers = strict;
        self
    }

    /// With administration node label
    #[inline]
    #[must_use]
    pub fn with_admin_label(mut self, label: impl Into<String>) -> Self {
        self.admin_label = label.into();
        self
    }

    /// With cache capacity
    #[inline]
    #[must_use]
    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.cache_capacity = capacity;
        self
    }
}

fn default_site_url() -> Url {
    Url::parse(DEFAULT_SITE_URL).expect("DEFAULT_SITE_URL is a valid absolute URL")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_place_admin_after_auxiliary() {
        let options = MenuOptions::default();
        assert!(options.admin_sort > options.auxiliary_sort);
        assert_eq!(options.site_url.as_str(), DEFAULT_SITE_URL);
        assert!(!options.strict_identifiers);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let options: MenuOptions = serde_json::from_str(
            r#"{"site_url": "https://lms.example.org/", "strict_identifiers": true}"#,
        )
        .unwrap();
        assert_eq!(options.site_url.as_str(), "https://lms.example.org/");
        assert!(options.strict_identifiers);
        assert_eq!(options.admin_identifier, "administrationsite");
    }

    #[test]
    fn builder_setters() {
        let options = MenuOptions::new()
            .with_strict_identifiers(true)
            .with_admin_label("Admin")
            .with_cache_capacity(8);
        assert!(options.strict_identifiers);
        assert_eq!(options.admin_label, "Admin");
        assert_eq!(options.cache_capacity, 8);
    }
}
