//! Export for renderers
//!
//! Renderers receive a plain recursive structure rather than the tree
//! itself. Children are exported in sort order without touching the tree.

use crate::node::{MenuTree, NodeId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Template context of one menu node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedNode {
    /// Display text
    pub text: String,
    /// Link target
    pub url: Option<String>,
    /// Link title
    pub title: String,
    /// Sort key
    pub sort: i64,
    /// Children in sort order
    pub children: Vec<ExportedNode>,
    /// Whether `children` is non-empty
    pub haschildren: bool,
    /// Whether the node is a divider line
    pub divider: bool,
}

impl MenuTree {
    /// Export the whole tree, root included
    #[must_use]
    pub fn export(&self) -> ExportedNode {
        self.export_node(self.root())
    }

    /// Export the top-level nodes only (flat footer rendering)
    #[must_use]
    pub fn export_top_level(&self) -> Vec<ExportedNode> {
        self.sorted_view(self.root())
            .into_iter()
            .map(|node| self.export_node(node))
            .collect()
    }

    /// Export `node` and its subtree
    #[must_use]
    pub fn export_node(&self, node: NodeId) -> ExportedNode {
        // Walk iteratively; definitions may nest arbitrarily deep
        let mut order = Vec::new();
        let mut stack = vec![node];
        while let Some(current) = stack.pop() {
            let children = self.sorted_view(current);
            stack.extend(children.iter().rev().copied());
            order.push((current, children));
        }

        let mut exported: HashMap<NodeId, ExportedNode> = HashMap::with_capacity(order.len());
        for (current, children) in order.into_iter().rev() {
            let children = children
                .iter()
                .filter_map(|child| exported.remove(child))
                .collect();
            exported.insert(current, self.export_item(current, children));
        }
        exported
            .remove(&node)
            .unwrap_or_else(|| self.export_item(node, Vec::new()))
    }

    fn export_item(&self, node: NodeId, children: Vec<ExportedNode>) -> ExportedNode {
        let item = self.item(node);
        ExportedNode {
            text: item.label().to_string(),
            url: item.link().map(|u| u.as_str().to_string()),
            title: item.label().to_string(),
            sort: item.sort(),
            haschildren: !children.is_empty(),
            divider: item.is_divider(),
            children,
        }
    }

    fn sorted_view(&self, node: NodeId) -> Vec<NodeId> {
        let mut children = self.children(node).to_vec();
        children.sort_by_key(|c| self.item(*c).sort());
        children
    }
}
