//! Menu definition parser
//!
//! Turns the administrator-authored definition text into a [`MenuTree`].
//!
//! # Format
//!
//! One item per line, fields separated by `|`:
//!
//! ```text
//! text|identifier|url|languages|roles
//! ```
//!
//! - The number of leading hyphens on `text` gives the depth (none = top
//!   level, `-` = second level, ...).
//! - `identifier` is optional; pages use it to attach below the item.
//! - `url` is optional; an unusable URL leaves the item without link.
//! - `languages` is a comma list; with an active language the item shows
//!   only when that language is listed.
//! - `roles` is a comma list of role short-names; the item is HIDDEN for
//!   viewers holding any of them.
//!
//! ```text
//! First level first item|firstlevel|http://www.moodle.com/
//! -Second level first item|secondlevel|http://www.moodle.com/partners/
//! --Third level first item||http://www.moodle.com/jobs/
//! English only||http://moodle.com|en
//! Not for students|||| student
//! ```

use crate::collaborators::{split_list, RoleSet};
use crate::link::resolve_link;
use crate::node::{MenuTree, NodeId, NodeSpec};
use url::Url;

/// Who the definition is parsed for
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct VisibilityContext {
    language: Option<String>,
    roles: RoleSet,
}

impl VisibilityContext {
    /// Context with an optional active language and the viewer's roles
    #[must_use]
    pub fn new(language: Option<&str>, roles: RoleSet) -> Self {
        Self {
            language: language
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string),
            roles,
        }
    }

    /// No language filtering and no roles
    #[inline]
    #[must_use]
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Active language
    #[inline]
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    /// Viewer roles
    #[inline]
    #[must_use]
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Whether a line with these restrictions is visible
    #[must_use]
    pub fn allows(&self, line: &DefinitionLine) -> bool {
        let language_ok = match (&self.language, line.languages.is_empty()) {
            (Some(language), false) => line.languages.iter().any(|l| l == language),
            _ => true,
        };
        // Deny list: any shared role hides the line.
        let roles_ok = !line.denied_roles.iter().any(|r| self.roles.contains(r));
        language_ok && roles_ok
    }
}

/// One non-blank line of a definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefinitionLine {
    /// 1-based line number in the text
    pub line_number: usize,
    /// Leading hyphen count + 1
    pub depth: usize,
    /// Item text without the depth marker
    pub label: String,
    /// Attachment key
    pub identifier: Option<String>,
    /// URL field as written
    pub raw_url: Option<String>,
    /// Resolved link, `None` when absent or unusable
    pub link: Option<Url>,
    /// Languages the line is restricted to
    pub languages: Vec<String>,
    /// Roles the line is hidden from
    pub denied_roles: Vec<String>,
}

impl DefinitionLine {
    /// True when a URL was written but could not be used
    #[inline]
    #[must_use]
    pub fn has_broken_link(&self) -> bool {
        self.raw_url.is_some() && self.link.is_none()
    }
}

/// Parser for menu definition text
#[derive(Debug, Clone)]
pub struct DefinitionParser {
    site_root: Url,
}

impl DefinitionParser {
    /// Parser resolving site-relative links below `site_root`
    #[inline]
    #[must_use]
    pub fn new(site_root: Url) -> Self {
        Self { site_root }
    }

    /// Site root used for relative links
    #[inline]
    #[must_use]
    pub fn site_root(&self) -> &Url {
        &self.site_root
    }

    /// Split the text into lines without building a tree
    #[must_use]
    pub fn scan(&self, text: &str) -> Vec<DefinitionLine> {
        text.lines()
            .enumerate()
            .filter_map(|(index, line)| self.scan_line(index + 1, line))
            .collect()
    }

    fn scan_line(&self, line_number: usize, line: &str) -> Option<DefinitionLine> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let depth = line.chars().take_while(|c| *c == '-').count() + 1;
        let mut fields = line.split('|').map(str::trim);
        let mut next_field = || fields.next().filter(|f| !f.is_empty());

        let label = next_field()
            .map(|f| f.trim_start_matches('-').to_string())
            .unwrap_or_default();
        let identifier = next_field()
            .map(|f| f.trim_start_matches('-').to_string())
            .filter(|f| !f.is_empty());
        let raw_url = next_field().map(str::to_string);
        let languages = next_field().map(split_list).unwrap_or_default();
        let denied_roles = next_field().map(split_list).unwrap_or_default();

        let link = raw_url
            .as_deref()
            .and_then(|raw| resolve_link(raw, &self.site_root));

        Some(DefinitionLine {
            line_number,
            depth,
            label,
            identifier,
            raw_url,
            link,
            languages,
            denied_roles,
        })
    }

    /// Parse the definition into a tree for `visibility`
    ///
    /// Every line is attached first; lines hidden from the viewer are
    /// detached afterwards, together with everything nested under them.
    /// Each item's sort key is its line number.
    #[must_use]
    pub fn parse(&self, text: &str, visibility: &VisibilityContext) -> MenuTree {
        let mut tree = MenuTree::new();
        let mut cursor: Vec<(NodeId, usize)> = vec![(tree.root(), 0)];
        let mut hidden = Vec::new();

        for line in self.scan(text) {
            while cursor.len() > 1 && cursor.last().is_some_and(|(_, depth)| *depth >= line.depth) {
                cursor.pop();
            }
            let parent = cursor.last().map_or(tree.root(), |(node, _)| *node);

            let visible = visibility.allows(&line);
            let node = tree.add_child(
                parent,
                NodeSpec {
                    label: line.label,
                    identifier: line.identifier,
                    link: line.link,
                    sort: i64::try_from(line.line_number).ok(),
                },
            );
            cursor.push((node, line.depth));

            if !visible {
                hidden.push(node);
            }
        }

        if !hidden.is_empty() {
            tracing::debug!("hiding {} definition lines from viewer", hidden.len());
        }
        for node in hidden {
            if let Some(parent) = tree.parent(node) {
                tree.remove_child(parent, node);
            }
        }

        tree
    }
}
