//! Menu composition
//!
//! [`MenuBuilder`] assembles the menu a viewer sees:
//!
//! 1. parse the definition text under the synthetic root
//! 2. attach the pages the viewer may see
//! 3. merge the host's auxiliary navigation as top-level entries
//! 4. append the administration subtree for page managers
//! 5. sort every level
//!
//! Malformed definition lines and unplaceable pages are skipped. Failures of
//! the host collaborators are returned unchanged.

use crate::attacher::{AttachReport, PageAttacher};
use crate::cache::DefinitionCache;
use crate::collaborators::{
    split_list, AccessControl, Capability, ConfigProvider, NavigationFeed, NavigationItem,
    PageRepository, Viewer,
};
use crate::config::{MenuOptions, ADMIN_MENU_ITEMS, ROOT_MENU_ITEMS};
use crate::error::{MenuError, MenuResult};
use crate::node::{MenuTree, NodeId, NodeSpec};
use crate::page::MenuTarget;
use crate::parser::{DefinitionParser, VisibilityContext};
use indexmap::IndexMap;
use std::sync::Arc;

/// Path of the administration landing page below the site root
const ADMIN_PATH: &str = "admin/search.php";

/// Composes menus from the definition, pages and host navigation
pub struct MenuBuilder {
    pages: Arc<dyn PageRepository>,
    access: Arc<dyn AccessControl>,
    navigation: Arc<dyn NavigationFeed>,
    config: Arc<dyn ConfigProvider>,
    options: MenuOptions,
    cache: Option<DefinitionCache>,
}

impl std::fmt::Debug for MenuBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuBuilder")
            .field("options", &self.options)
            .field("cache", &self.cache.as_ref().map(DefinitionCache::stats))
            .finish_non_exhaustive()
    }
}

impl MenuBuilder {
    /// Builder over the host collaborators with default options
    #[must_use]
    pub fn new(
        pages: Arc<dyn PageRepository>,
        access: Arc<dyn AccessControl>,
        navigation: Arc<dyn NavigationFeed>,
        config: Arc<dyn ConfigProvider>,
    ) -> Self {
        Self {
            pages,
            access,
            navigation,
            config,
            options: MenuOptions::default(),
            cache: None,
        }
    }

    /// With options
    #[inline]
    #[must_use]
    pub fn with_options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    /// With a parsed definition cache sized from the options
    #[must_use]
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(DefinitionCache::new(self.options.cache_capacity));
        self
    }

    /// Current options
    #[inline]
    #[must_use]
    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Parsed definition cache, when enabled
    #[inline]
    #[must_use]
    pub fn cache(&self) -> Option<&DefinitionCache> {
        self.cache.as_ref()
    }

    /// Build the menu of `viewer` from `definition`
    ///
    /// `language` restricts language-tagged definition lines; `None` shows
    /// them all.
    ///
    /// # Errors
    /// - [`MenuError::Collaborator`] when a host collaborator fails
    /// - [`MenuError::DuplicateIdentifier`] in strict mode when two nodes
    ///   share an identifier
    pub fn build(
        &self,
        definition: &str,
        language: Option<&str>,
        viewer: &Viewer,
    ) -> MenuResult<MenuTree> {
        let (mut tree, defined, report) = self.compose_base(definition, language, viewer)?;

        let auxiliary = self.navigation.auxiliary_items()?;
        let root = tree.root();
        for item in &auxiliary {
            tree.add_child(root, navigation_spec(item, Some(self.options.auxiliary_sort)));
        }

        if self.access.has_capability(viewer, Capability::ManagePages)? {
            self.add_admin_subtree(&mut tree)?;
        }

        tree.sort_all();

        if self.options.strict_identifiers {
            if let Some(identifier) = tree.duplicate_identifiers().into_iter().next() {
                tracing::warn!("rejecting menu with duplicate identifier {}", identifier);
                return Err(MenuError::duplicate_identifier(identifier));
            }
        }

        tracing::info!(
            "built menu for user {}: {} definition nodes, {} pages attached, {} unattached, {} hidden",
            viewer.user_id,
            defined,
            report.attached.len(),
            report.unattached.len(),
            report.hidden
        );
        Ok(tree)
    }

    /// Build the menu of `viewer` from the configured definition
    ///
    /// # Errors
    /// Same as [`build`](Self::build), plus configuration store failures.
    pub fn build_from_config(&self, language: Option<&str>, viewer: &Viewer) -> MenuResult<MenuTree> {
        let definition = self.config.get(ROOT_MENU_ITEMS)?.unwrap_or_default();
        self.build(&definition, language, viewer)
    }

    /// Choices for a page's parent menu, keyed by target
    ///
    /// Starts with `none` and `top`, followed by every identifier of the
    /// configured definition (all languages) and of the attached pages in
    /// pre-order, the first label of an identifier winning. Host navigation
    /// and the administration subtree are added after pages are placed, so
    /// they are never offered.
    ///
    /// # Errors
    /// [`MenuError::Collaborator`] when a host collaborator fails
    pub fn attachment_targets(&self, viewer: &Viewer) -> MenuResult<IndexMap<String, String>> {
        let mut targets = IndexMap::new();
        targets.insert(MenuTarget::NONE.to_string(), "None".to_string());
        targets.insert(MenuTarget::TOP.to_string(), "Top".to_string());

        let definition = self.config.get(ROOT_MENU_ITEMS)?.unwrap_or_default();
        let (mut tree, _, _) = self.compose_base(&definition, None, viewer)?;
        tree.sort_all();
        for node in tree.pre_order() {
            let item = tree.item(node);
            if let Some(identifier) = item.identifier() {
                targets
                    .entry(identifier.to_string())
                    .or_insert_with(|| item.label().to_string());
            }
        }
        Ok(targets)
    }

    /// Parsed definition with the viewer's pages attached, plus the number
    /// of definition nodes and the attachment report
    fn compose_base(
        &self,
        definition: &str,
        language: Option<&str>,
        viewer: &Viewer,
    ) -> MenuResult<(MenuTree, usize, AttachReport)> {
        let roles = self.access.role_short_names(viewer)?;
        let visibility = VisibilityContext::new(language, roles);
        let parser = DefinitionParser::new(self.options.site_url.clone());

        let mut tree = match &self.cache {
            Some(cache) => cache.get_or_parse(&parser, definition, &visibility),
            None => parser.parse(definition, &visibility),
        };
        let defined = tree.node_count();

        let report = PageAttacher::new(
            self.pages.as_ref(),
            self.access.as_ref(),
            &self.options.site_url,
        )
        .attach(&mut tree, viewer)?;
        Ok((tree, defined, report))
    }

    fn add_admin_subtree(&self, tree: &mut MenuTree) -> MenuResult<NodeId> {
        let mut spec = NodeSpec::new(self.options.admin_label.clone())
            .with_identifier(self.options.admin_identifier.clone())
            .with_sort(self.options.admin_sort);
        if let Ok(link) = self.options.site_url.join(ADMIN_PATH) {
            spec = spec.with_link(link);
        }
        let root = tree.root();
        let admin = tree.add_child(root, spec);

        for item in self.navigation.primary_items()? {
            tree.add_child(admin, navigation_spec(&item, None));
        }

        let allowed = self
            .config
            .get(ADMIN_MENU_ITEMS)?
            .map(|value| split_list(&value))
            .unwrap_or_default();
        if !allowed.is_empty() {
            let secondary = self.navigation.secondary_items(&self.options.admin_page_layout)?;
            for item in secondary
                .iter()
                .filter(|item| item.key.as_ref().is_some_and(|key| allowed.contains(key)))
            {
                tree.add_child(admin, navigation_spec(item, None));
            }
        }

        Ok(admin)
    }
}

fn navigation_spec(item: &NavigationItem, sort: Option<i64>) -> NodeSpec {
    NodeSpec {
        label: item.label.clone(),
        identifier: item.key.clone(),
        link: item.url.clone(),
        sort,
    }
}
