//! mcms menu composition
//!
//! Builds the navigation menu of a site from three sources:
//!
//! - **Definition text**: administrator-authored lines, one menu item each,
//!   nested by leading hyphens (see [`parser`])
//! - **Pages**: content pages that hang themselves below a named menu node,
//!   below their parent page, or at the top (see [`attacher`])
//! - **Host navigation**: auxiliary entries and, for page managers, the site
//!   administration subtree (see [`builder`])
//!
//! # Architecture
//!
//! ```text
//! definition ─→ DefinitionParser ─→ MenuTree ─→ PageAttacher ─→ MenuBuilder ─→ export
//!                     ↑                              ↑              ↑
//!              DefinitionCache                PageRepository   NavigationFeed
//!                                             AccessControl    ConfigProvider
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use mcms_menu::prelude::*;
//!
//! let builder = MenuBuilder::new(pages, access, navigation, config);
//! let menu = builder.build_from_config(Some("en"), &Viewer::new(42))?;
//! let context = serde_json::to_string(&menu.export())?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod attacher;
pub mod builder;
pub mod cache;
pub mod collaborators;
pub mod config;
pub mod error;
pub mod export;
pub mod link;
pub mod node;
pub mod page;
pub mod parser;

// Re-exports for convenience
pub use attacher::{AttachReport, AttachmentTarget, PageAttacher};
pub use builder::MenuBuilder;
pub use cache::{CacheStats, DefinitionCache};
pub use collaborators::{
    AccessControl, Capability, ConfigProvider, EmptyNavigation, NavigationFeed, NavigationItem,
    PageRepository, RoleSet, Viewer,
};
pub use config::MenuOptions;
pub use error::{CollaboratorError, MenuError, MenuResult};
pub use export::ExportedNode;
pub use node::{MenuItem, MenuTree, NodeId, NodeSpec};
pub use page::{MenuTarget, Page, PageId};
pub use parser::{DefinitionLine, DefinitionParser, VisibilityContext};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for building menus
    pub use crate::builder::MenuBuilder;
    pub use crate::collaborators::{
        AccessControl, Capability, ConfigProvider, NavigationFeed, NavigationItem, PageRepository,
        RoleSet, Viewer,
    };
    pub use crate::config::MenuOptions;
    pub use crate::error::{CollaboratorError, MenuError, MenuResult};
    pub use crate::export::ExportedNode;
    pub use crate::node::{MenuTree, NodeId};
    pub use crate::page::{MenuTarget, Page, PageId};
}
