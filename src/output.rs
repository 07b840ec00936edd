//! CLI output formatting for all pipeline stages.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Every entity (article,
//! section, link) leads with its positional index and title; filesystem paths
//! follow as indented `Source:` lines. The output reads as a content inventory
//! while still letting users trace data back to specific files.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Articles
//! 001 What are React Server Components? (3 code blocks)
//!     Source: 010-what-are-rscs.md
//!     Server components render ahead of time, on the server...
//! 002 data fetching
//!     Source: 020-data-fetching/
//!     001 Async components (1 code block)
//!         Source: 020-data-fetching/010-async-components.md
//! 003 github (link)
//!     https://github.com/example/server-components
//!
//! Hidden
//!     Drafts
//!         Source: drafts.md
//!
//! Config
//!     config.toml
//!     assets/
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! 001 What are React Server Components? → what-are-rscs.html
//! 002 data fetching
//!     001 Async components → data-fetching-async-components.html (cached)
//! 003 github → (external link)
//!     Drafts → drafts.html
//!
//! Cache: 1 cached, 3 rendered (4 total)
//! Generated 4 pages, 5 code blocks, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure:
//! no I/O, no side effects (scan output only checks which config files exist).

use crate::generate::GenerateResult;
use crate::markdown;
use crate::scan::Manifest;
use crate::types::{Article, NavItem};
use crate::viewer::{ClipboardResult, Theme};
use std::path::Path;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, one: &str, many: &str) -> String {
    if n == 1 {
        format!("{n} {one}")
    } else {
        format!("{n} {many}")
    }
}

/// Format an entity header: positional index + title, with an optional
/// code block count.
///
/// ```text
/// 001 Streaming (2 code blocks)
/// 002 data fetching
/// ```
fn entity_header(index: usize, title: &str, blocks: Option<usize>) -> String {
    match blocks {
        Some(n) if n > 0 => format!(
            "{} {} ({})",
            format_index(index),
            title,
            plural(n, "code block", "code blocks")
        ),
        _ => format!("{} {}", format_index(index), title),
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        None => text.to_string(),
        Some((byte, _)) => format!("{}...", &text[..byte]),
    }
}

fn find_by_href<'a>(manifest: &'a Manifest, href: &str) -> Option<&'a Article> {
    manifest.articles.iter().find(|a| a.href() == href)
}

// ============================================================================
// Tree walker
// ============================================================================

/// A flattened node from walking the NavItem tree.
struct TreeNode<'a> {
    depth: usize,
    position: usize,
    item: &'a NavItem,
}

/// Walk the navigation tree, assigning positional indices per sibling level.
fn walk_nav_tree(nav: &[NavItem]) -> Vec<TreeNode<'_>> {
    let mut nodes = Vec::new();
    walk_nav_tree_recursive(nav, 0, &mut nodes);
    nodes
}

fn walk_nav_tree_recursive<'a>(items: &'a [NavItem], depth: usize, nodes: &mut Vec<TreeNode<'a>>) {
    for (i, item) in items.iter().enumerate() {
        nodes.push(TreeNode {
            depth,
            position: i + 1,
            item,
        });
        walk_nav_tree_recursive(&item.children, depth + 1, nodes);
    }
}

// ============================================================================
// Stage 1: Scan output
// ============================================================================

/// Format scan stage output showing the discovered article structure.
pub fn format_scan_output(manifest: &Manifest, source_root: &Path) -> Vec<String> {
    let mut lines = vec!["Articles".to_string()];

    for node in walk_nav_tree(&manifest.navigation) {
        let base = indent(node.depth);
        let item = node.item;

        if !item.children.is_empty() {
            lines.push(format!("{}{}", base, entity_header(node.position, &item.title, None)));
            lines.push(format!("{}    Source: {}/", base, item.source_dir));
            continue;
        }
        let Some(article) = find_by_href(manifest, &item.path) else {
            continue;
        };
        if article.is_link {
            lines.push(format!(
                "{}{} {} (link)",
                base,
                format_index(node.position),
                article.title
            ));
            lines.push(format!("{}    {}", base, article.href()));
            continue;
        }
        let blocks = markdown::code_blocks(&article.body, &manifest.config.code).len();
        lines.push(format!(
            "{}{}",
            base,
            entity_header(node.position, &article.title, Some(blocks))
        ));
        lines.push(format!("{}    Source: {}", base, article.source_path));
        if let Some(summary) = &article.summary {
            lines.push(format!("{}    {}", base, truncate_desc(summary, 60)));
        }
    }

    let hidden: Vec<&Article> = manifest.articles.iter().filter(|a| !a.in_nav).collect();
    if !hidden.is_empty() {
        lines.push(String::new());
        lines.push("Hidden".to_string());
        for article in hidden {
            lines.push(format!("    {}", article.title));
            lines.push(format!("        Source: {}", article.source_path));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if source_root.join("config.toml").exists() {
        lines.push("    config.toml".to_string());
    }
    if source_root.join(&manifest.config.assets_dir).is_dir() {
        lines.push(format!("    {}/", manifest.config.assets_dir));
    }

    lines
}

/// Print scan output to stdout.
pub fn print_scan_output(manifest: &Manifest, source_root: &Path) {
    for line in format_scan_output(manifest, source_root) {
        println!("{}", line);
    }
}

// ============================================================================
// Stage 2: Generate output
// ============================================================================

/// Format generate stage output showing written HTML files.
pub fn format_generate_output(manifest: &Manifest, result: &GenerateResult) -> Vec<String> {
    let mut lines = vec!["Home \u{2192} index.html".to_string()];

    let page_line = |slug: &str| -> Option<String> {
        let page = result.pages.iter().find(|p| p.slug == slug)?;
        let cached = if page.cached() { " (cached)" } else { "" };
        Some(format!("{} \u{2192} {}{}", page.title, page.output_file, cached))
    };

    for node in walk_nav_tree(&manifest.navigation) {
        let base = indent(node.depth);
        let item = node.item;
        let index = format_index(node.position);

        if !item.children.is_empty() {
            lines.push(format!("{}{} {}", base, index, item.title));
        } else if item.external {
            lines.push(format!("{}{} {} \u{2192} (external link)", base, index, item.title));
        } else if let Some(line) = find_by_href(manifest, &item.path).and_then(|a| page_line(&a.slug)) {
            lines.push(format!("{}{} {}", base, index, line));
        }
    }

    for article in manifest.articles.iter().filter(|a| !a.in_nav && !a.is_link) {
        if let Some(line) = page_line(&article.slug) {
            lines.push(format!("    {}", line));
        }
    }

    let blocks: usize = result.pages.iter().filter_map(|p| p.code_blocks).sum();
    lines.push(String::new());
    lines.push(format!("Cache: {}", result.cache_stats));
    lines.push(format!(
        "Generated {}, {}, {}",
        plural(result.pages.len(), "page", "pages"),
        plural(blocks, "code block", "code blocks"),
        plural(result.assets_copied, "asset", "assets"),
    ));

    lines
}

/// Print generate output to stdout.
pub fn print_generate_output(manifest: &Manifest, result: &GenerateResult) {
    for line in format_generate_output(manifest, result) {
        println!("{}", line);
    }
}

// ============================================================================
// Copy command
// ============================================================================

/// Status line for the `copy` command, printed to stderr so it never mixes
/// with `--stdout` output.
pub fn format_copy_result(slug: &str, block: usize, theme: Theme, result: &ClipboardResult) -> String {
    match result {
        ClipboardResult::Copied(text) if text.is_empty() => format!(
            "Block {} of {} has no {} variant; copied nothing",
            block, slug, theme
        ),
        ClipboardResult::Copied(text) => {
            let lines = text.lines().count();
            format!(
                "Copied {} from {} block {} ({})",
                plural(lines, "line", "lines"),
                slug,
                block,
                theme
            )
        }
        ClipboardResult::Failed(err) => format!("Copy failed: {}", err),
    }
}
