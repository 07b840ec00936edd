//! Filename and heading naming rules.
//!
//! Articles and sections share one convention: an optional numeric prefix
//! (`NNN-`) followed by a slug. The number orders the entry in navigation;
//! the slug becomes the output filename.
//!
//! - `020-server-actions.md` → number 20, slug `server-actions`, title "server actions"
//! - `010-basics/` → number 10, slug `basics`
//! - `drafts.md` → unnumbered (generated, hidden from navigation)
//!
//! Heading anchors use [`slugify`], which lowercases and collapses anything
//! outside `[a-z0-9]` into single dashes.

/// Result of parsing a numbered entry name like `020-server-actions`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (`20` from `020-server-actions`).
    pub number: Option<u32>,
    /// Part after `NNN-`, dashes preserved. For unnumbered entries this is
    /// the full input. Empty for number-only names.
    pub slug: String,
    /// Slug with dashes converted to spaces.
    pub display_title: String,
}

impl ParsedName {
    pub fn in_nav(&self) -> bool {
        self.number.is_some()
    }

    /// Sort key: numbered entries by number, unnumbered last.
    pub fn sort_key(&self) -> u32 {
        self.number.unwrap_or(u32::MAX)
    }
}

/// Parse an entry name following the `NNN-slug` convention.
///
/// - `"020-server-actions"` → number=Some(20), slug="server-actions"
/// - `"001"` / `"001-"` → number=Some(1), slug=""
/// - `"drafts"` → number=None, slug="drafts"
/// - `"v2-notes"` → number=None, slug="v2-notes"
pub fn parse_entry_name(name: &str) -> ParsedName {
    let (number, slug) = match name.split_once('-') {
        Some((prefix, rest)) => match prefix.parse::<u32>() {
            Ok(num) => (Some(num), rest),
            Err(_) => (None, name),
        },
        None => match name.parse::<u32>() {
            Ok(num) => (Some(num), ""),
            Err(_) => (None, name),
        },
    };
    ParsedName {
        number,
        slug: slug.to_string(),
        display_title: slug.replace('-', " "),
    }
}

/// Turn heading text into an anchor id: `"What are RSCs?"` → `what-are-rscs`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

/// Hands out unique anchor ids within one page.
///
/// The first `"setup"` stays `setup`; later ones become `setup-1`, `setup-2`.
/// Headings with no usable characters fall back to `section`.
#[derive(Debug, Default)]
pub struct AnchorIds {
    seen: std::collections::HashMap<String, usize>,
}

impl AnchorIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = "section".to_string();
        }
        let count = self.seen.entry(base.clone()).or_insert(0);
        let id = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        id
    }
}
