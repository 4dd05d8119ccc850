//! Subcommand implementations
//!
//! Each command takes a loaded snapshot and returns the text to print, so
//! `main` only deals with arguments and exit codes.

use anyhow::{Context, Result};
use mcms_menu::config::ROOT_MENU_ITEMS;
use mcms_menu::{DefinitionParser, VisibilityContext};
use mcms_site::{menu_builder, SiteSnapshot};
use serde::Serialize;

/// Options of `render`
#[derive(Debug, Clone, Default)]
pub(crate) struct RenderOptions {
    pub(crate) user: String,
    pub(crate) language: Option<String>,
    pub(crate) flat: bool,
    pub(crate) compact: bool,
}

/// Exported menu of one user as JSON
pub(crate) fn render(site: SiteSnapshot, options: &RenderOptions) -> Result<String> {
    let viewer = site.viewer(&options.user)?;
    let tree = menu_builder(site)
        .build_from_config(options.language.as_deref(), &viewer)
        .with_context(|| format!("building menu for '{}'", options.user))?;

    if options.flat {
        to_json(&tree.export_top_level(), options.compact)
    } else {
        to_json(&tree.export(), options.compact)
    }
}

/// Parent menu choices, one `key<TAB>label` per line
pub(crate) fn targets(site: SiteSnapshot, user: &str) -> Result<String> {
    let viewer = site.viewer(user)?;
    let targets = menu_builder(site)
        .attachment_targets(&viewer)
        .context("listing attachment targets")?;

    Ok(targets
        .iter()
        .map(|(key, label)| format!("{key}\t{label}\n"))
        .collect())
}

/// Problems found in the configured definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(crate) struct CheckReport {
    /// `(line number, url)` of links that cannot be used
    pub(crate) broken_links: Vec<(usize, String)>,
    /// Identifiers defined on more than one line
    pub(crate) duplicate_identifiers: Vec<String>,
}

impl CheckReport {
    pub(crate) fn is_clean(&self) -> bool {
        self.broken_links.is_empty() && self.duplicate_identifiers.is_empty()
    }

    pub(crate) fn to_text(&self) -> String {
        if self.is_clean() {
            return "definition OK\n".to_string();
        }
        let mut out = String::new();
        for (line, url) in &self.broken_links {
            out.push_str(&format!("line {line}: unusable link '{url}'\n"));
        }
        for identifier in &self.duplicate_identifiers {
            out.push_str(&format!("duplicate identifier '{identifier}'\n"));
        }
        out
    }
}

/// Check the configured definition, every language and role included
pub(crate) fn check(site: &SiteSnapshot) -> CheckReport {
    let definition = site.settings.get(ROOT_MENU_ITEMS).map_or("", String::as_str);
    let parser = DefinitionParser::new(site.menu.site_url.clone());

    let broken_links = parser
        .scan(definition)
        .into_iter()
        .filter(|line| line.has_broken_link())
        .map(|line| (line.line_number, line.raw_url.unwrap_or_default()))
        .collect();
    let duplicate_identifiers = parser
        .parse(definition, &VisibilityContext::unrestricted())
        .duplicate_identifiers();

    let report = CheckReport {
        broken_links,
        duplicate_identifiers,
    };
    tracing::debug!("check report: {:?}", report);
    report
}

fn to_json<T: Serialize>(value: &T, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    Ok(json + "\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcms_test_utils::{sample_page, sample_site, MENU_DEFINITION};

    fn site() -> SiteSnapshot {
        sample_site()
            .with_setting(ROOT_MENU_ITEMS, MENU_DEFINITION)
            .with_page(sample_page(1, "pageidnumber1").with_parent_menu("firstlevel"))
    }

    #[test]
    fn render_flat_json() {
        let options = RenderOptions {
            user: "admin".to_string(),
            language: Some("fr".to_string()),
            flat: true,
            compact: true,
        };
        let out = render(site(), &options).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        let texts: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["text"].as_str().unwrap())
            .collect();
        assert_eq!(texts, ["First level first item", "First level first item", "Site administration"]);
    }

    #[test]
    fn render_unknown_user_fails() {
        let options = RenderOptions {
            user: "mallory".to_string(),
            ..RenderOptions::default()
        };
        assert!(render(site(), &options).is_err());
    }

    #[test]
    fn targets_are_tab_separated() {
        let out = targets(site(), "admin").unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "none\tNone");
        assert_eq!(lines[1], "top\tTop");
        assert_eq!(lines[2], "firstlevel\tFirst level first item");
        assert!(lines.contains(&"pageidnumber1\tTitre Test"));
    }

    #[test]
    fn check_reports_problems() {
        let site = sample_site().with_setting(ROOT_MENU_ITEMS, "A|a|http://\nB|a\nC|c|/ok");
        let report = check(&site);

        assert_eq!(report.broken_links, vec![(1, "http://".to_string())]);
        assert_eq!(report.duplicate_identifiers, vec!["a".to_string()]);
        assert!(report.to_text().contains("line 1: unusable link 'http://'"));
    }

    #[test]
    fn check_clean_definition() {
        let report = check(&site());
        assert!(report.is_clean());
        assert_eq!(report.to_text(), "definition OK\n");
    }
}
