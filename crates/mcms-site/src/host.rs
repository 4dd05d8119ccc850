//! Collaborator implementations over a snapshot
//!
//! Access rules:
//! - a viewer holding `managepages` sees every page
//! - anyone else sees a page published to one of their roles
//! - a page published to no role is visible to page managers only
//!
//! The anonymous viewer (user id 0) holds the `guest` role unless the
//! snapshot lists user 0 explicitly. Any other unlisted user is an access
//! control failure.

use crate::snapshot::{SiteSnapshot, SiteUser, GUEST_ROLE};
use mcms_menu::{
    AccessControl, Capability, CollaboratorError, ConfigProvider, MenuBuilder, NavigationFeed,
    NavigationItem, Page, PageId, PageRepository, RoleSet, Viewer,
};
use std::sync::Arc;

impl SiteSnapshot {
    fn user(&self, viewer: &Viewer) -> Result<Option<&SiteUser>, CollaboratorError> {
        match self.find_user(viewer.user_id) {
            Some(user) => Ok(Some(user)),
            None if viewer.is_guest() => Ok(None),
            None => Err(CollaboratorError::access_control(format!(
                "user {} is not part of the site",
                viewer.user_id
            ))),
        }
    }
}

impl PageRepository for SiteSnapshot {
    fn list_all_pages(&self) -> Result<Vec<Page>, CollaboratorError> {
        Ok(self.pages.clone())
    }

    fn get_page(&self, id: PageId) -> Result<Option<Page>, CollaboratorError> {
        Ok(self.pages.iter().find(|p| p.id == id).cloned())
    }
}

impl AccessControl for SiteSnapshot {
    fn can_view_page(&self, viewer: &Viewer, page: &Page) -> Result<bool, CollaboratorError> {
        if self.has_capability(viewer, Capability::ManagePages)? {
            return Ok(true);
        }
        let roles = self.role_short_names(viewer)?;
        Ok(page.roles.iter().any(|role| roles.contains(role)))
    }

    fn role_short_names(&self, viewer: &Viewer) -> Result<RoleSet, CollaboratorError> {
        Ok(match self.user(viewer)? {
            Some(user) => user.roles.iter().cloned().collect(),
            None => RoleSet::from([GUEST_ROLE.to_string()]),
        })
    }

    fn has_capability(&self, viewer: &Viewer, capability: Capability) -> Result<bool, CollaboratorError> {
        Ok(self
            .user(viewer)?
            .is_some_and(|user| user.capabilities.iter().any(|c| c == capability.as_str())))
    }
}

impl NavigationFeed for SiteSnapshot {
    fn auxiliary_items(&self) -> Result<Vec<NavigationItem>, CollaboratorError> {
        Ok(self.navigation.auxiliary.clone())
    }

    fn primary_items(&self) -> Result<Vec<NavigationItem>, CollaboratorError> {
        Ok(self.navigation.primary.clone())
    }

    fn secondary_items(&self, page_layout: &str) -> Result<Vec<NavigationItem>, CollaboratorError> {
        Ok(self
            .navigation
            .secondary
            .get(page_layout)
            .cloned()
            .unwrap_or_default())
    }
}

impl ConfigProvider for SiteSnapshot {
    fn get(&self, key: &str) -> Result<Option<String>, CollaboratorError> {
        Ok(self.settings.get(key).cloned())
    }
}

/// Menu builder backed entirely by `snapshot`, using its menu options
#[must_use]
pub fn menu_builder(snapshot: SiteSnapshot) -> MenuBuilder {
    let options = snapshot.menu.clone();
    let site = Arc::new(snapshot);
    MenuBuilder::new(site.clone(), site.clone(), site.clone(), site).with_options(options)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> SiteSnapshot {
        SiteSnapshot::new()
            .with_user(SiteUser {
                id: 2,
                username: "admin".to_string(),
                roles: vec!["manager".to_string()],
                capabilities: vec!["managepages".to_string()],
            })
            .with_user(SiteUser {
                id: 3,
                username: "sam".to_string(),
                roles: vec!["student".to_string()],
                capabilities: Vec::new(),
            })
            .with_page(Page::new(1, "Public").with_roles(["guest", "student"]))
            .with_page(Page::new(2, "Staff").with_roles(["manager"]))
            .with_page(Page::new(3, "Draft"))
    }

    #[test]
    fn managers_see_every_page() {
        let site = site();
        for page in &site.pages {
            assert!(site.can_view_page(&Viewer::new(2), page).unwrap());
        }
    }

    #[test]
    fn others_need_a_shared_role() {
        let site = site();
        let student = Viewer::new(3);
        let visible: Vec<bool> = site
            .pages
            .iter()
            .map(|p| site.can_view_page(&student, p).unwrap())
            .collect();
        assert_eq!(visible, [true, false, false]);
    }

    #[test]
    fn guest_holds_guest_role() {
        let site = site();
        let guest = Viewer::guest();

        assert_eq!(site.role_short_names(&guest).unwrap(), RoleSet::from(["guest".to_string()]));
        assert!(!site.has_capability(&guest, Capability::ManagePages).unwrap());
        assert!(site.can_view_page(&guest, &site.pages[0]).unwrap());
    }

    #[test]
    fn unknown_user_is_access_failure() {
        let err = site().role_short_names(&Viewer::new(99)).unwrap_err();
        assert!(matches!(err, CollaboratorError::AccessControl(_)));
    }

    #[test]
    fn secondary_navigation_per_layout() {
        let mut site = site();
        site.navigation
            .secondary
            .insert("admin".to_string(), vec![NavigationItem::keyed("users", "Users", None)]);

        assert_eq!(site.secondary_items("admin").unwrap().len(), 1);
        assert!(site.secondary_items("course").unwrap().is_empty());
    }

    #[test]
    fn builder_uses_snapshot_settings() {
        let site = site().with_setting("rootmenuitems", "Home|home");
        let builder = menu_builder(site);

        let tree = builder.build_from_config(None, &Viewer::new(3)).unwrap();
        let labels: Vec<&str> = tree.top_level().iter().map(|n| tree.item(*n).label()).collect();
        assert_eq!(labels, ["Home", "Public"]);
    }
}
