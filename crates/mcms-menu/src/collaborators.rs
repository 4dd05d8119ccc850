//! Interfaces to the host platform
//!
//! The menu is composed from data owned by the host: page records, the
//! viewer's roles and capabilities, host navigation, and site settings.
//! Each concern is a trait so the builder can be driven by the real host,
//! a file snapshot, or a test double.

use crate::error::CollaboratorError;
use crate::page::{Page, PageId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::{self, Display, Formatter};
use url::Url;

/// Role short-names held by a viewer
pub type RoleSet = BTreeSet<String>;

/// The user a menu is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewer {
    /// Host user id; `0` is the anonymous guest
    pub user_id: u64,
}

impl Viewer {
    /// Viewer for a host user
    #[inline]
    #[must_use]
    pub fn new(user_id: u64) -> Self {
        Self { user_id }
    }

    /// Anonymous viewer
    #[inline]
    #[must_use]
    pub fn guest() -> Self {
        Self { user_id: 0 }
    }

    /// Whether this is the anonymous viewer
    #[inline]
    #[must_use]
    pub fn is_guest(&self) -> bool {
        self.user_id == 0
    }
}

/// Capabilities the menu asks about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// May create, edit and delete pages
    ManagePages,
}

impl Capability {
    /// Host capability name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManagePages => "managepages",
        }
    }
}

impl Display for Capability {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entry of a host navigation feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationItem {
    /// Stable key (secondary navigation only)
    #[serde(default)]
    pub key: Option<String>,
    /// Display text
    pub label: String,
    /// Link target
    #[serde(default)]
    pub url: Option<Url>,
}

impl NavigationItem {
    /// Item without key
    #[must_use]
    pub fn new(label: impl Into<String>, url: Option<Url>) -> Self {
        Self {
            key: None,
            label: label.into(),
            url,
        }
    }

    /// Item with key
    #[must_use]
    pub fn keyed(key: impl Into<String>, label: impl Into<String>, url: Option<Url>) -> Self {
        Self {
            key: Some(key.into()),
            label: label.into(),
            url,
        }
    }
}

/// Read access to page records
#[cfg_attr(test, mockall::automock)]
pub trait PageRepository {
    /// Every page record, in storage order
    fn list_all_pages(&self) -> Result<Vec<Page>, CollaboratorError>;

    /// One page record; `Ok(None)` when it does not exist
    fn get_page(&self, id: PageId) -> Result<Option<Page>, CollaboratorError>;
}

/// Role and capability checks for a viewer
#[cfg_attr(test, mockall::automock)]
pub trait AccessControl {
    /// Whether `viewer` may see `page`
    fn can_view_page(&self, viewer: &Viewer, page: &Page) -> Result<bool, CollaboratorError>;

    /// Role short-names held by `viewer`
    fn role_short_names(&self, viewer: &Viewer) -> Result<RoleSet, CollaboratorError>;

    /// Whether `viewer` holds `capability`
    fn has_capability(
        &self,
        viewer: &Viewer,
        capability: Capability,
    ) -> Result<bool, CollaboratorError>;
}

/// Host navigation merged into the menu
#[cfg_attr(test, mockall::automock)]
pub trait NavigationFeed {
    /// Extra top-level entries shown to everyone
    fn auxiliary_items(&self) -> Result<Vec<NavigationItem>, CollaboratorError> {
        Ok(Vec::new())
    }

    /// Primary navigation of the host
    fn primary_items(&self) -> Result<Vec<NavigationItem>, CollaboratorError>;

    /// Secondary navigation for a page layout
    fn secondary_items(&self, page_layout: &str) -> Result<Vec<NavigationItem>, CollaboratorError>;
}

/// Site settings store
#[cfg_attr(test, mockall::automock)]
pub trait ConfigProvider {
    /// Value of a setting, `None` when unset
    fn get(&self, key: &str) -> Result<Option<String>, CollaboratorError>;
}

impl ConfigProvider for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Result<Option<String>, CollaboratorError> {
        Ok(BTreeMap::get(self, key).cloned())
    }
}

/// Navigation feed with no entries
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyNavigation;

impl NavigationFeed for EmptyNavigation {
    fn primary_items(&self) -> Result<Vec<NavigationItem>, CollaboratorError> {
        Ok(Vec::new())
    }

    fn secondary_items(&self, _page_layout: &str) -> Result<Vec<NavigationItem>, CollaboratorError> {
        Ok(Vec::new())
    }
}

/// Split a comma-separated setting into trimmed, non-empty entries
#[must_use]
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
