//! Parsed definition cache using moka
//!
//! Parsing the definition is the same work on every request until an
//! administrator edits it. The cache keeps parsed trees keyed by a blake3
//! digest of everything the parse depends on: the definition text, the site
//! root, the active language and the viewer's roles. Editing the text
//! changes the key, so stale entries are never served; they age out through
//! LRU eviction.
//!
//! Cached trees are shared read-only. Callers always get their own clone to
//! attach pages into.

use crate::node::MenuTree;
use crate::parser::{DefinitionParser, VisibilityContext};
use moka::sync::Cache;
use std::sync::Arc;

/// Statistics for cache monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of entries in cache
    pub entry_count: u64,
}

/// Cache of parsed menu definitions
#[derive(Debug, Clone)]
pub struct DefinitionCache {
    inner: Cache<blake3::Hash, Arc<MenuTree>>,
}

impl DefinitionCache {
    /// Create cache holding at most `max_capacity` parsed definitions
    #[inline]
    #[must_use]
    pub fn new(max_capacity: u64) -> Self {
        Self {
            inner: Cache::new(max_capacity),
        }
    }

    /// Parsed tree for `text`, parsing on a miss
    #[must_use]
    pub fn get_or_parse(
        &self,
        parser: &DefinitionParser,
        text: &str,
        visibility: &VisibilityContext,
    ) -> MenuTree {
        let key = Self::key(parser, text, visibility);
        let tree = self.inner.get_with(key, || {
            tracing::debug!("definition cache miss");
            Arc::new(parser.parse(text, visibility))
        });
        MenuTree::clone(&tree)
    }

    /// Whether a parse for these inputs is cached
    #[must_use]
    pub fn contains(&self, parser: &DefinitionParser, text: &str, visibility: &VisibilityContext) -> bool {
        self.inner.contains_key(&Self::key(parser, text, visibility))
    }

    /// Drop every cached parse
    #[inline]
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }

    /// Get cache statistics
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
        }
    }

    fn key(parser: &DefinitionParser, text: &str, visibility: &VisibilityContext) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(parser.site_root().as_str().as_bytes());
        hasher.update(&[0]);
        hasher.update(text.as_bytes());
        hasher.update(&[0]);
        hasher.update(visibility.language().unwrap_or_default().as_bytes());
        hasher.update(&[0]);
        for role in visibility.roles() {
            hasher.update(role.as_bytes());
            hasher.update(&[0]);
        }
        hasher.finalize()
    }
}

impl Default for DefinitionCache {
    /// Create cache with default capacity (64 entries)
    fn default() -> Self {
        Self::new(64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collaborators::RoleSet;
    use crate::node::NodeSpec;
    use url::Url;

    fn parser() -> DefinitionParser {
        DefinitionParser::new(Url::parse("https://lms.example.org/").unwrap())
    }

    #[test]
    fn hit_returns_same_structure() {
        let cache = DefinitionCache::new(8);
        let parser = parser();
        let ctx = VisibilityContext::unrestricted();

        let first = cache.get_or_parse(&parser, "A|a\n-B|b", &ctx);
        assert!(cache.contains(&parser, "A|a\n-B|b", &ctx));
        let second = cache.get_or_parse(&parser, "A|a\n-B|b", &ctx);

        assert_eq!(first.node_count(), second.node_count());
        assert_eq!(cache.stats().entry_count, 1);
    }

    #[test]
    fn clones_are_independent() {
        let cache = DefinitionCache::new(8);
        let parser = parser();
        let ctx = VisibilityContext::unrestricted();

        let mut first = cache.get_or_parse(&parser, "A|a", &ctx);
        let root = first.root();
        first.add_child(root, NodeSpec::new("extra"));

        let second = cache.get_or_parse(&parser, "A|a", &ctx);
        assert_eq!(second.node_count(), 1);
    }

    #[test]
    fn changed_text_misses() {
        let cache = DefinitionCache::new(8);
        let parser = parser();
        let ctx = VisibilityContext::unrestricted();

        let _ = cache.get_or_parse(&parser, "A|a", &ctx);
        assert!(!cache.contains(&parser, "A|a\nB|b", &ctx));

        let tree = cache.get_or_parse(&parser, "A|a\nB|b", &ctx);
        assert_eq!(tree.node_count(), 2);
    }

    #[test]
    fn visibility_is_part_of_key() {
        let cache = DefinitionCache::new(8);
        let parser = parser();
        let text = "Staff|staff|||student";
        let student = VisibilityContext::new(None, ["student".to_string()].into_iter().collect::<RoleSet>());
        let manager = VisibilityContext::new(None, ["manager".to_string()].into_iter().collect::<RoleSet>());

        assert_eq!(cache.get_or_parse(&parser, text, &student).node_count(), 0);
        assert_eq!(cache.get_or_parse(&parser, text, &manager).node_count(), 1);
        assert_eq!(cache.get_or_parse(&parser, text, &VisibilityContext::new(Some("en"), RoleSet::new())).node_count(), 1);
    }

    #[test]
    fn invalidate_all_empties_cache() {
        let cache = DefinitionCache::default();
        let parser = parser();
        let ctx = VisibilityContext::unrestricted();

        let _ = cache.get_or_parse(&parser, "A|a", &ctx);
        cache.invalidate_all();
        assert!(!cache.contains(&parser, "A|a", &ctx));
    }
}
