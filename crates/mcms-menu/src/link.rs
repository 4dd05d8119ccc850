//! Link resolution for definition lines
//!
//! Absolute URLs are taken as written. Site-relative paths (starting with
//! `/`) are resolved below the site root, so `/course/index.php` on a site
//! installed at `https://example.org/lms/` becomes
//! `https://example.org/lms/course/index.php`. Anything else is not a link.

use url::Url;

/// Resolve `raw` against `site_root`, or `None` when it is not a usable URL
#[must_use]
pub fn resolve_link(raw: &str, site_root: &Url) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => match raw.strip_prefix('/') {
            Some(path) => site_root.join(path).ok(),
            None => {
                tracing::debug!("ignoring relative link without leading slash: {}", raw);
                None
            }
        },
        Err(e) => {
            tracing::debug!("ignoring malformed link {:?}: {}", raw, e);
            None
        }
    }
}
