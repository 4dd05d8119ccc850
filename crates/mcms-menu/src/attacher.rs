//! Page placement
//!
//! Every page the viewer may see is hung below one node of the menu:
//!
//! 1. an explicit menu target (`parent_menu`) wins, `top` meaning the root;
//! 2. otherwise a parent page places the page under the node carrying the
//!    parent page's identifier;
//! 3. otherwise the page goes to the root.
//!
//! A target that names no node leaves the page out of the menu. Pages whose
//! target only appears once other pages are attached (a child page listed
//! before its parent page) are retried until a pass makes no progress.

use crate::collaborators::{AccessControl, PageRepository, Viewer};
use crate::error::CollaboratorError;
use crate::node::{MenuTree, NodeId, NodeSpec};
use crate::page::{MenuTarget, Page, PageId};
use url::Url;

/// Resolved placement of a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttachmentTarget {
    /// The menu root
    Top,
    /// The first node (pre-order) with this identifier
    Node(String),
}

impl AttachmentTarget {
    /// Locate the receiving node in `tree`
    #[must_use]
    pub fn locate(&self, tree: &MenuTree) -> Option<NodeId> {
        match self {
            Self::Top => Some(tree.root()),
            Self::Node(identifier) => tree.find_by_identifier(identifier),
        }
    }
}

/// Outcome of one attachment run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachReport {
    /// Pages placed in the menu, in placement order
    pub attached: Vec<PageId>,
    /// Visible pages left out because their target does not exist
    pub unattached: Vec<PageId>,
    /// Pages the viewer may not see
    pub hidden: usize,
}

/// Places pages from a repository into a menu tree
pub struct PageAttacher<'a> {
    pages: &'a dyn PageRepository,
    access: &'a dyn AccessControl,
    site_root: &'a Url,
}

impl std::fmt::Debug for PageAttacher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageAttacher")
            .field("site_root", &self.site_root.as_str())
            .finish_non_exhaustive()
    }
}

impl<'a> PageAttacher<'a> {
    /// Attacher reading from `pages`, filtering through `access`
    #[must_use]
    pub fn new(
        pages: &'a dyn PageRepository,
        access: &'a dyn AccessControl,
        site_root: &'a Url,
    ) -> Self {
        Self {
            pages,
            access,
            site_root,
        }
    }

    /// Where `page` asks to go
    ///
    /// `Ok(None)` when the page points at a parent page that does not exist
    /// or has no identifier.
    ///
    /// # Errors
    /// Returns the repository error if the parent page lookup fails.
    pub fn resolve_target(&self, page: &Page) -> Result<Option<AttachmentTarget>, CollaboratorError> {
        match &page.parent_menu {
            MenuTarget::Top => return Ok(Some(AttachmentTarget::Top)),
            MenuTarget::Node(identifier) => {
                return Ok(Some(AttachmentTarget::Node(identifier.clone())))
            }
            MenuTarget::None => {}
        }

        let Some(parent_id) = page.parent_id() else {
            return Ok(Some(AttachmentTarget::Top));
        };

        match self.pages.get_page(parent_id)? {
            Some(parent) => match parent.identifier() {
                Some(identifier) => Ok(Some(AttachmentTarget::Node(identifier.to_string()))),
                None => {
                    tracing::debug!(
                        "page {} has parent {} without identifier, not placing it",
                        page.id,
                        parent_id
                    );
                    Ok(None)
                }
            },
            None => {
                tracing::debug!("page {} has missing parent {}, not placing it", page.id, parent_id);
                Ok(None)
            }
        }
    }

    /// Attach every page `viewer` may see into `tree`
    ///
    /// Placement is not a single pass: pages whose target node does not
    /// exist yet are retried until a pass places nothing, so a child page
    /// listed before its parent page still lands under it. Pages left over
    /// after that are reported as unattached, never as errors.
    ///
    /// # Errors
    /// Repository and access control failures are returned unchanged.
    pub fn attach(&self, tree: &mut MenuTree, viewer: &Viewer) -> Result<AttachReport, CollaboratorError> {
        let mut report = AttachReport::default();
        let mut pending = Vec::new();

        for page in self.pages.list_all_pages()? {
            if !self.access.can_view_page(viewer, &page)? {
                report.hidden += 1;
                continue;
            }
            match self.resolve_target(&page)? {
                Some(target) => pending.push((page, target)),
                None => report.unattached.push(page.id),
            }
        }

        loop {
            let before = pending.len();
            let mut deferred = Vec::new();

            for (page, target) in pending {
                match target.locate(tree) {
                    Some(node) => {
                        self.attach_page(tree, node, &page);
                        report.attached.push(page.id);
                    }
                    None => deferred.push((page, target)),
                }
            }

            if deferred.is_empty() || deferred.len() == before {
                for (page, target) in &deferred {
                    tracing::debug!("page {} targets unknown menu node {:?}", page.id, target);
                }
                report
                    .unattached
                    .extend(deferred.into_iter().map(|(page, _)| page.id));
                break;
            }
            pending = deferred;
        }

        Ok(report)
    }

    fn attach_page(&self, tree: &mut MenuTree, node: NodeId, page: &Page) {
        tree.add_child(
            node,
            NodeSpec {
                label: page.menu_label().to_string(),
                identifier: page.identifier().map(str::to_string),
                link: Some(page.canonical_url(self.site_root)),
                sort: page.sort_key(),
            },
        );
        tree.sort_children(node);
    }
}
