//! Menu tree arena
//!
//! All nodes of a menu live inside one [`MenuTree`] and refer to each other
//! through [`NodeId`] handles. A node knows its parent and keeps an ordered
//! list of children; the order is re-established by sort key before it is
//! read.
//!
//! Removing a node detaches it (and its subtree) from the tree. The slot
//! itself stays in the arena, so handles never dangle, but it is no longer
//! reachable from the root.

use url::Url;

/// Label given to the synthetic root of every tree
pub const ROOT_LABEL: &str = "root";

/// Handle to a node inside a [`MenuTree`]
///
/// Handles are only meaningful for the tree that issued them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Payload carried by a menu node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    label: String,
    identifier: Option<String>,
    link: Option<Url>,
    sort: i64,
}

impl MenuItem {
    /// Display text
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Attachment key, if any
    #[inline]
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    /// Target of the node, absent for structural nodes
    #[inline]
    #[must_use]
    pub fn link(&self) -> Option<&Url> {
        self.link.as_ref()
    }

    /// Effective sort key
    #[inline]
    #[must_use]
    pub fn sort(&self) -> i64 {
        self.sort
    }

    /// True when the label is a run of `#` characters
    #[must_use]
    pub fn is_divider(&self) -> bool {
        !self.label.is_empty() && self.label.chars().all(|c| c == '#')
    }
}

/// Description of a node about to be added with [`MenuTree::add_child`]
///
/// A `sort` of `None` or `Some(0)` asks the parent for the next automatic key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodeSpec {
    /// Display text
    pub label: String,
    /// Attachment key; empty strings are treated as absent
    pub identifier: Option<String>,
    /// Link target
    pub link: Option<Url>,
    /// Explicit sort key
    pub sort: Option<i64>,
}

impl NodeSpec {
    /// Spec with a label and nothing else
    #[inline]
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Self::default()
        }
    }

    /// With attachment key
    #[inline]
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// With link
    #[inline]
    #[must_use]
    pub fn with_link(mut self, link: Url) -> Self {
        self.link = Some(link);
        self
    }

    /// With explicit sort key
    #[inline]
    #[must_use]
    pub fn with_sort(mut self, sort: i64) -> Self {
        self.sort = Some(sort);
        self
    }
}

#[derive(Debug, Clone)]
struct Slot {
    item: MenuItem,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    /// Highest sort key issued to a child so far
    last_sort: i64,
}

impl Slot {
    fn new(item: MenuItem, parent: Option<NodeId>) -> Self {
        Self {
            item,
            parent,
            children: Vec::new(),
            last_sort: 0,
        }
    }
}

/// Single-rooted menu tree
#[derive(Debug, Clone)]
pub struct MenuTree {
    slots: Vec<Slot>,
}

impl Default for MenuTree {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuTree {
    /// Tree holding only the synthetic root
    #[must_use]
    pub fn new() -> Self {
        let root = MenuItem {
            label: ROOT_LABEL.to_string(),
            identifier: None,
            link: None,
            sort: 0,
        };
        Self {
            slots: vec![Slot::new(root, None)],
        }
    }

    /// The synthetic root
    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Payload of a node
    #[inline]
    #[must_use]
    pub fn item(&self, node: NodeId) -> &MenuItem {
        &self.slots[node.0].item
    }

    /// Parent of a node; `None` for the root and for detached subtree tops
    #[inline]
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slots[node.0].parent
    }

    /// Children in their current order
    #[inline]
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        &self.slots[node.0].children
    }

    /// Whether the node has any children
    #[inline]
    #[must_use]
    pub fn has_children(&self, node: NodeId) -> bool {
        !self.slots[node.0].children.is_empty()
    }

    /// Top-level nodes (children of the root)
    #[inline]
    #[must_use]
    pub fn top_level(&self) -> &[NodeId] {
        self.children(self.root())
    }

    /// Create a node under `parent` and return its handle
    ///
    /// Without an explicit (non-zero) sort key the node gets one more than
    /// the highest key issued under this parent so far.
    pub fn add_child(&mut self, parent: NodeId, spec: NodeSpec) -> NodeId {
        let last_sort = self.slots[parent.0].last_sort;
        let sort = match spec.sort {
            Some(sort) if sort != 0 => sort,
            _ => last_sort + 1,
        };

        let id = NodeId(self.slots.len());
        let item = MenuItem {
            label: spec.label,
            identifier: spec.identifier.filter(|i| !i.is_empty()),
            link: spec.link,
            sort,
        };
        self.slots.push(Slot::new(item, Some(parent)));

        let parent_slot = &mut self.slots[parent.0];
        parent_slot.children.push(id);
        parent_slot.last_sort = last_sort.max(sort);
        id
    }

    /// Remove `node` from the subtree rooted at `from`
    ///
    /// Returns true when `node` was a direct child of `from` or was found
    /// (and removed) further down.
    pub fn remove_child(&mut self, from: NodeId, node: NodeId) -> bool {
        let mut stack = vec![from];
        while let Some(current) = stack.pop() {
            let slot = &mut self.slots[current.0];
            if let Some(pos) = slot.children.iter().position(|c| *c == node) {
                slot.children.remove(pos);
                self.slots[node.0].parent = None;
                return true;
            }
            stack.extend(slot.children.iter().rev().copied());
        }
        false
    }

    /// Stable-sort the children of `node` by sort key and return them
    pub fn sorted_children(&mut self, node: NodeId) -> &[NodeId] {
        self.sort_children(node);
        self.children(node)
    }

    /// Stable-sort the children of `node` by sort key
    pub fn sort_children(&mut self, node: NodeId) {
        let mut children = std::mem::take(&mut self.slots[node.0].children);
        children.sort_by_key(|c| self.slots[c.0].item.sort);
        self.slots[node.0].children = children;
    }

    /// Sort every level reachable from the root
    pub fn sort_all(&mut self) {
        let mut stack = vec![self.root()];
        while let Some(node) = stack.pop() {
            self.sort_children(node);
            stack.extend_from_slice(self.children(node));
        }
    }

    /// Number of edges between the root and `node`
    #[must_use]
    pub fn depth(&self, node: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(node);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// Whether `node` is reachable from the root
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        while let Some(parent) = self.parent(current) {
            current = parent;
        }
        current == self.root()
    }

    /// Number of nodes reachable from the root, root excluded
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.pre_order().count() - 1
    }

    /// Pre-order walk from the root (root included) in current child order
    #[must_use]
    pub fn pre_order(&self) -> PreOrder<'_> {
        PreOrder {
            tree: self,
            stack: vec![self.root()],
        }
    }

    /// First node in pre-order whose identifier equals `identifier`
    #[must_use]
    pub fn find_by_identifier(&self, identifier: &str) -> Option<NodeId> {
        self.pre_order()
            .find(|node| self.item(*node).identifier() == Some(identifier))
    }

    /// Identifiers carried by more than one reachable node, in pre-order of
    /// their second occurrence
    #[must_use]
    pub fn duplicate_identifiers(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut duplicates = Vec::new();
        for node in self.pre_order() {
            if let Some(identifier) = self.item(node).identifier() {
                if !seen.insert(identifier) && !duplicates.iter().any(|d| d == identifier) {
                    duplicates.push(identifier.to_string());
                }
            }
        }
        duplicates
    }
}

/// Iterator returned by [`MenuTree::pre_order`]
#[derive(Debug)]
pub struct PreOrder<'a> {
    tree: &'a MenuTree,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack
            .extend(self.tree.children(node).iter().rev().copied());
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(tree: &MenuTree, node: NodeId) -> Vec<&str> {
        tree.children(node)
            .iter()
            .map(|c| tree.item(*c).label())
            .collect()
    }

    #[test]
    fn new_tree_has_only_root() {
        let tree = MenuTree::new();
        assert_eq!(tree.item(tree.root()).label(), "root");
        assert!(!tree.has_children(tree.root()));
        assert_eq!(tree.node_count(), 0);
        assert!(tree.parent(tree.root()).is_none());
    }

    #[test]
    fn add_child_sets_parent() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        let b = tree.add_child(a, NodeSpec::new("b"));

        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.parent(b), Some(a));
        assert_eq!(tree.depth(b), 2);
        assert!(tree.has_children(a));
    }

    #[test]
    fn auto_sort_follows_highest_issued_key() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        let b = tree.add_child(root, NodeSpec::new("b").with_sort(10));
        let c = tree.add_child(root, NodeSpec::new("c").with_sort(0));
        let d = tree.add_child(root, NodeSpec::new("d").with_sort(4));
        let e = tree.add_child(root, NodeSpec::new("e"));

        assert_eq!(tree.item(a).sort(), 1);
        assert_eq!(tree.item(b).sort(), 10);
        assert_eq!(tree.item(c).sort(), 11);
        assert_eq!(tree.item(d).sort(), 4);
        assert_eq!(tree.item(e).sort(), 12);
    }

    #[test]
    fn auto_sort_is_scoped_to_parent() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a").with_sort(7));
        let child = tree.add_child(a, NodeSpec::new("child"));

        assert_eq!(tree.item(child).sort(), 1);
    }

    #[test]
    fn sort_is_stable_on_ties() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        tree.add_child(root, NodeSpec::new("late").with_sort(5));
        tree.add_child(root, NodeSpec::new("first-tie").with_sort(2));
        tree.add_child(root, NodeSpec::new("second-tie").with_sort(2));

        tree.sort_children(root);
        assert_eq!(labels(&tree, root), ["first-tie", "second-tie", "late"]);

        // Idempotent
        tree.sort_children(root);
        assert_eq!(labels(&tree, root), ["first-tie", "second-tie", "late"]);
    }

    #[test]
    fn sorted_children_persists_order() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let b = tree.add_child(root, NodeSpec::new("b").with_sort(2));
        let a = tree.add_child(root, NodeSpec::new("a").with_sort(1));

        assert_eq!(tree.sorted_children(root), &[a, b]);
        assert_eq!(tree.children(root), &[a, b]);
    }

    #[test]
    fn remove_direct_child() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        let b = tree.add_child(root, NodeSpec::new("b"));

        assert!(tree.remove_child(root, a));
        assert_eq!(tree.children(root), &[b]);
        assert!(!tree.is_attached(a));
    }

    #[test]
    fn remove_nested_child_recurses() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        let b = tree.add_child(a, NodeSpec::new("b"));
        let c = tree.add_child(b, NodeSpec::new("c"));

        assert!(tree.remove_child(root, b));
        assert!(!tree.has_children(a));
        assert!(!tree.is_attached(c));
        assert_eq!(tree.node_count(), 1);
    }

    #[test]
    fn remove_child_at_the_bottom_of_a_deep_chain() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let mut parent = root;
        for _ in 0..50_000 {
            parent = tree.add_child(parent, NodeSpec::new("-"));
        }

        assert!(tree.remove_child(root, parent));
        assert!(!tree.is_attached(parent));
        assert_eq!(tree.node_count(), 49_999);
    }

    #[test]
    fn remove_missing_child_returns_false() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        let b = tree.add_child(root, NodeSpec::new("b"));

        assert!(!tree.remove_child(a, b));
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn pre_order_visits_parents_first() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        tree.add_child(a, NodeSpec::new("a1"));
        tree.add_child(root, NodeSpec::new("b"));

        let order: Vec<_> = tree.pre_order().map(|n| tree.item(n).label()).collect();
        assert_eq!(order, ["root", "a", "a1", "b"]);
    }

    #[test]
    fn find_by_identifier_returns_first_match() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a"));
        let first = tree.add_child(a, NodeSpec::new("x1").with_identifier("x"));
        tree.add_child(root, NodeSpec::new("x2").with_identifier("x"));

        assert_eq!(tree.find_by_identifier("x"), Some(first));
        assert_eq!(tree.find_by_identifier("missing"), None);
        assert_eq!(tree.duplicate_identifiers(), vec!["x".to_string()]);
    }

    #[test]
    fn empty_identifier_is_absent() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a").with_identifier(""));

        assert_eq!(tree.item(a).identifier(), None);
        assert_eq!(tree.find_by_identifier(""), None);
    }

    #[test]
    fn divider_detection() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let divider = tree.add_child(root, NodeSpec::new("###"));
        let text = tree.add_child(root, NodeSpec::new("#1 item"));
        let empty = tree.add_child(root, NodeSpec::new(""));

        assert!(tree.item(divider).is_divider());
        assert!(!tree.item(text).is_divider());
        assert!(!tree.item(empty).is_divider());
    }

    #[test]
    fn sort_all_reaches_every_level() {
        let mut tree = MenuTree::new();
        let root = tree.root();
        let a = tree.add_child(root, NodeSpec::new("a").with_sort(2));
        tree.add_child(root, NodeSpec::new("b").with_sort(1));
        tree.add_child(a, NodeSpec::new("a2").with_sort(9));
        tree.add_child(a, NodeSpec::new("a1").with_sort(3));

        tree.sort_all();
        assert_eq!(labels(&tree, root), ["b", "a"]);
        assert_eq!(labels(&tree, a), ["a1", "a2"]);
    }
}
