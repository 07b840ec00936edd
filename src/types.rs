//! Shared types serialized between pipeline stages.
//!
//! The scan stage writes these into `manifest.json`; the generate stage reads
//! them back. Both sides must agree on the shape.

use serde::{Deserialize, Serialize};

/// An article generated from a markdown file.
///
/// Articles follow the `NNN-slug.md` convention:
/// - Numbered files appear in navigation, sorted by number
/// - Unnumbered files are generated but hidden from navigation
///
/// A file whose only content is a URL becomes an external link instead of a page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Title from the first `# heading`, or `link_title` as fallback.
    pub title: String,
    /// Navigation label (filename with number stripped, dashes → spaces).
    pub link_title: String,
    /// Output slug; sectioned articles are prefixed with the section slug.
    pub slug: String,
    /// Slug of the enclosing section, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Source path relative to the content root.
    pub source_path: String,
    /// First paragraph of plain text, for the index and meta description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Raw markdown (or the URL for link articles).
    pub body: String,
    pub in_nav: bool,
    pub sort_key: u32,
    /// If true, `body` is a URL and this article is an external link.
    pub is_link: bool,
}

impl Article {
    /// Output filename relative to the site root.
    pub fn output_file(&self) -> String {
        format!("{}.html", self.slug)
    }

    /// Link target: the external URL for link articles, the page otherwise.
    pub fn href(&self) -> String {
        if self.is_link {
            self.body.trim().to_string()
        } else {
            format!("/{}", self.output_file())
        }
    }
}

/// Navigation tree item. Sections carry their articles as children.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavItem {
    pub title: String,
    /// Page href, external URL, or section slug for groups.
    pub path: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub source_dir: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}
