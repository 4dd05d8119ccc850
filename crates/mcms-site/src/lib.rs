//! mcms site snapshots
//!
//! A file-backed stand-in for the host platform. A [`SiteSnapshot`] carries
//! settings, users, pages and navigation, and implements every collaborator
//! trait of `mcms-menu`, so a complete menu can be built and previewed
//! without the host.
//!
//! # Example
//!
//! ```rust,ignore
//! use mcms_site::{menu_builder, SiteSnapshot};
//!
//! let site = SiteSnapshot::load("site.toml")?;
//! let viewer = site.viewer("admin")?;
//! let menu = menu_builder(site).build_from_config(Some("en"), &viewer)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod host;
pub mod snapshot;

// Re-exports for convenience
pub use error::{SiteError, SiteResult};
pub use host::menu_builder;
pub use snapshot::{SiteNavigation, SiteSnapshot, SiteUser, SnapshotFormat, GUEST_ROLE};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
