//! Page records as seen by the menu
//!
//! Pages are owned by the host's storage. The menu only reads the fields
//! that decide where (and whether) a page shows up.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use url::Url;

/// Path of the page view script, relative to the site root
pub const PAGE_VIEW_PATH: &str = "local/mcms/index.php";

/// Page record id
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub u64);

impl Display for PageId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a page asks to be placed in the menu
///
/// Stored as a plain string by the host: `none`, `top`, or the identifier
/// of a menu node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MenuTarget {
    /// No explicit placement; fall back to the parent page
    #[default]
    None,
    /// Directly under the menu root
    Top,
    /// Under the node carrying this identifier
    Node(String),
}

impl MenuTarget {
    /// Sentinel for no explicit placement
    pub const NONE: &'static str = "none";
    /// Sentinel for the menu root
    pub const TOP: &'static str = "top";

    /// Stored string form
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::None => Self::NONE,
            Self::Top => Self::TOP,
            Self::Node(identifier) => identifier,
        }
    }
}

impl From<&str> for MenuTarget {
    fn from(value: &str) -> Self {
        match value.trim() {
            "" | Self::NONE => Self::None,
            Self::TOP => Self::Top,
            other => Self::Node(other.to_string()),
        }
    }
}

impl From<String> for MenuTarget {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<MenuTarget> for String {
    fn from(value: MenuTarget) -> Self {
        value.as_str().to_string()
    }
}

impl Display for MenuTarget {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A page record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Record id
    pub id: PageId,
    /// Full title
    #[serde(default)]
    pub title: String,
    /// Short name, preferred as menu label
    #[serde(default)]
    pub short_name: String,
    /// Page identifier (the host's "idnumber")
    #[serde(default)]
    pub identifier: Option<String>,
    /// Parent page; `0` means no parent
    #[serde(default)]
    pub parent: Option<PageId>,
    /// Explicit menu placement
    #[serde(default)]
    pub parent_menu: MenuTarget,
    /// Menu sort order; `0` means automatic
    #[serde(default)]
    pub menu_sort_order: i64,
    /// Role short-names the page is published to
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Page {
    /// Page with id and title, everything else defaulted
    #[must_use]
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: PageId(id),
            title: title.into(),
            short_name: String::new(),
            identifier: None,
            parent: None,
            parent_menu: MenuTarget::None,
            menu_sort_order: 0,
            roles: Vec::new(),
        }
    }

    /// With short name
    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    /// With identifier
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// With parent page
    #[must_use]
    pub fn with_parent(mut self, parent: PageId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// With explicit menu placement
    #[must_use]
    pub fn with_parent_menu(mut self, target: impl Into<MenuTarget>) -> Self {
        self.parent_menu = target.into();
        self
    }

    /// With menu sort order
    #[must_use]
    pub fn with_menu_sort_order(mut self, order: i64) -> Self {
        self.menu_sort_order = order;
        self
    }

    /// With published roles
    #[must_use]
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    /// Label used in the menu: short name, else title
    #[must_use]
    pub fn menu_label(&self) -> &str {
        if self.short_name.trim().is_empty() {
            &self.title
        } else {
            &self.short_name
        }
    }

    /// Identifier, ignoring empty values
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref().filter(|i| !i.is_empty())
    }

    /// Parent page id, ignoring the `0` placeholder
    #[must_use]
    pub fn parent_id(&self) -> Option<PageId> {
        self.parent.filter(|p| p.0 > 0)
    }

    /// Explicit sort key, `None` when the order is automatic
    #[must_use]
    pub fn sort_key(&self) -> Option<i64> {
        (self.menu_sort_order != 0).then_some(self.menu_sort_order)
    }

    /// Canonical view URL below `site_root`
    ///
    /// Pages with an identifier are linked by identifier, others by id.
    #[must_use]
    pub fn canonical_url(&self, site_root: &Url) -> Url {
        let mut url = site_root
            .join(PAGE_VIEW_PATH)
            .unwrap_or_else(|_| site_root.clone());
        {
            let mut query = url.query_pairs_mut();
            match self.identifier() {
                Some(identifier) => query.append_pair("p", identifier),
                None => query.append_pair("id", &self.id.to_string()),
            };
        }
        url
    }
}
