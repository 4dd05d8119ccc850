//! Testing utilities for mcms workspace
//!
//! Shared fixtures: a sample menu definition, page builders and a site
//! with a manager and a student.

#![allow(missing_docs)]

use mcms_menu::{MenuOptions, MenuTree, NodeId, Page, Viewer};
use mcms_site::{SiteSnapshot, SiteUser};
use url::Url;

pub use mcms_site::menu_builder;

pub const SITE_URL: &str = "https://lms.example.org/";

/// Three top-level items, one English-only and one French-only
pub const MENU_DEFINITION: &str = "\
First level first item|firstlevel|http://www.moodle.com/
-Second level first item|secondlevel|http://www.moodle.com/partners/|en
-Second level second item|secondlevelseconditem|http://www.moodle.com/hq/
--Third level first item||http://www.moodle.com/jobs/
-Second level third item|http://www.moodle.com/development/
First level first item|firstlevelfr|http://www.moodle.com/|fr
First level first item|firstlevelen|http://www.moodle.com/|en";

pub const MANAGER_ID: u64 = 2;
pub const STUDENT_ID: u64 = 3;

pub fn site_url() -> Url {
    Url::parse(SITE_URL).unwrap()
}

pub fn options() -> MenuOptions {
    MenuOptions::new().with_site_url(site_url())
}

pub fn manager() -> Viewer {
    Viewer::new(MANAGER_ID)
}

pub fn student() -> Viewer {
    Viewer::new(STUDENT_ID)
}

/// Page published to guests and managers, like the pages an editor creates
pub fn sample_page(id: u64, identifier: &str) -> Page {
    Page::new(id, "Titre test")
        .with_short_name("Titre Test")
        .with_identifier(identifier)
        .with_roles(["guest", "manager"])
}

/// Site with a manager (`admin`) and a student (`sam`), no pages
pub fn sample_site() -> SiteSnapshot {
    SiteSnapshot::new()
        .with_menu_options(options())
        .with_user(SiteUser {
            id: MANAGER_ID,
            username: "admin".to_string(),
            roles: vec!["manager".to_string()],
            capabilities: vec!["managepages".to_string()],
        })
        .with_user(SiteUser {
            id: STUDENT_ID,
            username: "sam".to_string(),
            roles: vec!["student".to_string()],
            capabilities: Vec::new(),
        })
}

/// Identifiers of the children of `node`, in current order
pub fn child_identifiers(tree: &MenuTree, node: NodeId) -> Vec<String> {
    tree.children(node)
        .iter()
        .map(|c| tree.item(*c).identifier().unwrap_or_default().to_string())
        .collect()
}

pub fn top_identifiers(tree: &MenuTree) -> Vec<String> {
    child_identifiers(tree, tree.root())
}

pub fn child_labels(tree: &MenuTree, node: NodeId) -> Vec<String> {
    tree.children(node)
        .iter()
        .map(|c| tree.item(*c).label().to_string())
        .collect()
}
