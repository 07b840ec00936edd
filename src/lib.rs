//! # codepage
//!
//! A minimal static site generator for code-heavy article sites. Markdown
//! files become pages; every code block on them becomes an adaptive viewer
//! that collapses when tall, follows the reader's color scheme, and copies
//! its visible text.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! 1. Scan      content/  →  manifest.json    (filesystem → structured data)
//! 2. Generate  manifest  →  dist/            (final HTML site)
//! ```
//!
//! The manifest is human-readable JSON you can inspect between stages, and
//! each stage is testable without the other.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`viewer`] | The code-block viewer: overflow detection, theme preference, state machine, clipboard |
//! | [`scan`] | Stage 1: walks the content directory, produces the scan manifest |
//! | [`markdown`] | pulldown-cmark pipeline: heading anchors and code blocks rendered through the viewer |
//! | [`generate`] | Stage 2: renders the HTML site with Maud, in parallel |
//! | [`cache`] | Content-addressed render cache for incremental builds |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Shared types serialized between stages (`Article`, `NavItem`) |
//! | [`naming`] | `NNN-slug` filename convention and heading anchor ids |
//! | [`output`] | CLI output formatting: tree-based display of pipeline results |
//!
//! # Design Decisions
//!
//! ## One Viewer, Two Hosts
//!
//! The code-block viewer in [`viewer`] is host-independent: it talks to a
//! [`viewer::Surface`] it can apply views to and measure, a
//! [`viewer::PreferenceSource`] for the color scheme, and a
//! [`viewer::ClipboardSink`]. At build time the markdown pipeline mounts it on
//! an [`viewer::HtmlSurface`] to produce each block's initial markup; the
//! `copy` command mounts it headless and writes to the terminal clipboard
//! through OSC 52. `static/code-block.js` runs the same state machine in the
//! browser.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a compile error, template variables are plain Rust expressions, and all
//! interpolation is escaped by default. There is no template directory to
//! ship.
//!
//! ## NNN-Prefix Ordering
//!
//! Files and section directories use a numeric prefix (`010-`, `020-`) for
//! explicit ordering, parsed by [`naming::parse_entry_name`]. Unnumbered
//! articles are generated but hidden from navigation, which is handy for
//! drafts that should stay reachable by direct URL. The filesystem is the
//! source of truth: no front-matter, no separate ordering file.

pub mod cache;
pub mod config;
pub mod generate;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod scan;
pub mod types;
pub mod viewer;

#[cfg(test)]
pub(crate) mod test_helpers;
