//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the scan manifest and writes the final
//! static site.
//!
//! ## Generated Pages
//!
//! - **Index page** (`/index.html`): article list in navigation order, with
//!   summaries, grouped by section
//! - **Article pages** (`/{slug}.html`): one per non-link article; sectioned
//!   articles carry the section prefix in their slug
//!
//! External-link articles produce no page; they only appear in navigation.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── what-are-rscs.html
//! ├── data-fetching-async-components.html
//! ├── drafts.html                  # Unnumbered: generated, not linked
//! ├── favicon.svg                  # From content/assets/
//! └── .render-cache.json
//! ```
//!
//! ## Layout Shell
//!
//! Every page shares one document: `lang`, charset, viewport, the
//! `twitter:title` / `og:title` / `twitter:text:title` meta trio, description,
//! favicon, inline CSS, header with navigation, footer, and the code-block
//! script.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: base styles (color and code-height variables injected from config)
//! - `static/code-block.js`: browser side of the code-block viewer
//!
//! ## Parallelism
//!
//! Article pages render on the global rayon pool, sized by
//! `[processing] max_processes`. Each page mounts its own code-block viewers;
//! nothing is shared between pages.

use crate::cache::{self, CacheError, CacheManifest, CacheStats};
use crate::config::{self, FooterConfig, SiteConfig};
use crate::markdown::{self, Heading};
use crate::scan::Manifest;
use crate::types::{Article, NavItem};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Cache error: {0}")]
    Cache(#[from] CacheError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/code-block.js");

/// Credit line in every footer.
const CREDIT: &str = "Built with codepage";

/// One page written (or skipped) by the generate stage.
#[derive(Debug, Clone)]
pub struct GeneratedPage {
    pub slug: String,
    pub title: String,
    pub output_file: String,
    /// Code blocks rendered; `None` when the page came from the cache.
    pub code_blocks: Option<usize>,
}

impl GeneratedPage {
    pub fn cached(&self) -> bool {
        self.code_blocks.is_none()
    }
}

/// Result of the generate stage.
#[derive(Debug)]
pub struct GenerateResult {
    /// Article pages in manifest order (index page excluded).
    pub pages: Vec<GeneratedPage>,
    pub assets_copied: usize,
    pub cache_stats: CacheStats,
}

/// Read `manifest.json` and generate the site.
pub fn generate(
    manifest_path: &Path,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<(Manifest, GenerateResult), GenerateError> {
    let manifest_content = fs::read_to_string(manifest_path)?;
    let manifest: Manifest = serde_json::from_str(&manifest_content)?;
    let result = generate_site(&manifest, source_root, output_dir, use_cache)?;
    Ok((manifest, result))
}

pub fn generate_site(
    manifest: &Manifest,
    source_root: &Path,
    output_dir: &Path,
    use_cache: bool,
) -> Result<GenerateResult, GenerateError> {
    let config = &manifest.config;
    let css = build_css(config);

    fs::create_dir_all(output_dir)?;
    let assets_copied = copy_assets(&source_root.join(&config.assets_dir), output_dir)?;

    let mut cache = if use_cache {
        CacheManifest::load(output_dir)
    } else {
        CacheManifest::empty()
    };
    let context_json = serde_json::to_string(&(&manifest.config, &manifest.navigation))?;

    let index_html = render_index(manifest, &css);
    fs::write(output_dir.join("index.html"), index_html.into_string())?;

    let articles: Vec<&Article> = manifest.pages().collect();
    let rendered = articles
        .par_iter()
        .map(|article| -> Result<(GeneratedPage, String), GenerateError> {
            let output_file = article.output_file();
            let hash = cache::hash_render_input(&article.body, &context_json);
            if cache.is_fresh(&output_file, &hash, output_dir) {
                tracing::debug!(slug = %article.slug, "page unchanged, skipping");
                return Ok((
                    GeneratedPage {
                        slug: article.slug.clone(),
                        title: article.title.clone(),
                        output_file,
                        code_blocks: None,
                    },
                    hash,
                ));
            }
            let (page, blocks) = render_article_page(article, manifest, &css);
            fs::write(output_dir.join(&output_file), page.into_string())?;
            tracing::debug!(slug = %article.slug, blocks, "rendered page");
            Ok((
                GeneratedPage {
                    slug: article.slug.clone(),
                    title: article.title.clone(),
                    output_file,
                    code_blocks: Some(blocks),
                },
                hash,
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut cache_stats = CacheStats::default();
    let mut pages = Vec::with_capacity(rendered.len());
    for (page, hash) in rendered {
        if page.cached() {
            cache_stats.hit();
        } else {
            cache_stats.miss();
        }
        cache.insert(page.output_file.clone(), hash);
        pages.push(page);
    }
    let live: Vec<String> = pages.iter().map(|p| p.output_file.clone()).collect();
    cache.retain_outputs(&live);
    cache.save(output_dir)?;

    Ok(GenerateResult {
        pages,
        assets_copied,
        cache_stats,
    })
}

fn build_css(config: &SiteConfig) -> String {
    format!(
        "{}\n\n{}\n\n{}",
        config::generate_color_css(&config.colors),
        config::generate_code_css(&config.code),
        CSS_STATIC
    )
}

/// Copy the assets directory into the output root. Returns the number of
/// files copied; a missing assets directory copies nothing.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir).min_depth(1) {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let dst = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dst)?;
        } else {
            if let Some(parent) = dst.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dst)?;
            copied += 1;
        }
    }
    Ok(copied)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
///
/// `page_title` is the page's own title; the site title is appended unless
/// they are the same.
fn base_document(
    config: &SiteConfig,
    page_title: &str,
    description: Option<&str>,
    canonical_path: &str,
    css: &str,
    content: Markup,
) -> Markup {
    let site = &config.site;
    let full_title = if page_title == site.title {
        page_title.to_string()
    } else {
        format!("{} | {}", page_title, site.title)
    };
    let description = description
        .filter(|d| !d.is_empty())
        .unwrap_or(site.description.as_str());
    let canonical = (!site.base_url.is_empty()).then(|| {
        format!(
            "{}/{}",
            site.base_url.trim_end_matches('/'),
            canonical_path.trim_start_matches('/')
        )
    });

    html! {
        (DOCTYPE)
        html lang=(site.lang) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (full_title) }
                meta name="twitter:title" content=(full_title);
                meta name="og:title" content=(full_title);
                meta name="twitter:text:title" content=(full_title);
                @if !description.is_empty() {
                    meta name="description" content=(description);
                }
                @if !site.favicon.is_empty() {
                    link rel="icon" href={ "/" (site.favicon.trim_start_matches('/')) };
                }
                @if let Some(url) = &canonical {
                    link rel="canonical" href=(url);
                }
                style { (PreEscaped(css)) }
            }
            body {
                div.page {
                    (content)
                }
                (site_footer(&config.footer))
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the site header with the brand link and navigation
fn site_header(site_title: &str, nav: Markup) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (site_title) }
            nav.site-nav aria-label="Articles" {
                (nav)
            }
        }
    }
}

/// Renders the navigation list. `current_path` is the current page's href.
pub fn render_nav(items: &[NavItem], current_path: &str) -> Markup {
    html! {
        ul.nav-list {
            @for item in items {
                (render_nav_item(item, current_path))
            }
        }
    }
}

/// Renders a single navigation item; sections render their articles nested.
fn render_nav_item(item: &NavItem, current_path: &str) -> Markup {
    let is_current = item.path == current_path
        || item.children.iter().any(|c| c.path == current_path);

    html! {
        @if item.children.is_empty() {
            li class=[is_current.then_some("current")] {
                @if item.external {
                    a href=(item.path) target="_blank" rel="noopener" { (item.title) }
                } @else {
                    a href=(item.path) aria-current=[is_current.then_some("page")] { (item.title) }
                }
            }
        } @else {
            li.nav-section.current[is_current] {
                span.nav-group tabindex="0" { (item.title) }
                ul {
                    @for child in &item.children {
                        (render_nav_item(child, current_path))
                    }
                }
            }
        }
    }
}

fn site_footer(footer: &FooterConfig) -> Markup {
    html! {
        footer.site-footer {
            @if !footer.text.is_empty() {
                p.footer-text { (footer.text) }
            }
            @if !footer.links.is_empty() {
                ul.footer-links {
                    @for link in &footer.links {
                        li { a href=(link.url) rel="noopener" { (link.label) } }
                    }
                }
            }
            p.footer-credit { (CREDIT) }
        }
    }
}

/// "On this page" list, shown when an article has more than one `##` heading.
fn table_of_contents(headings: &[Heading]) -> Markup {
    html! {
        @if headings.len() > 1 {
            nav.toc aria-label="On this page" {
                strong { "On this page" }
                ol {
                    @for heading in headings {
                        li { a href={ "#" (heading.id) } { (heading.text) } }
                    }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the index page: articles in navigation order, grouped by section.
/// Index runs in navigation order: consecutive top-level articles share
/// one list, each section gets its own heading and list.
enum IndexGroup<'a> {
    Articles(Vec<&'a NavItem>),
    Section(&'a NavItem),
}

fn index_groups(navigation: &[NavItem]) -> Vec<IndexGroup<'_>> {
    let mut groups: Vec<IndexGroup<'_>> = Vec::new();
    for item in navigation {
        if !item.children.is_empty() {
            groups.push(IndexGroup::Section(item));
        } else if let Some(IndexGroup::Articles(run)) = groups.last_mut() {
            run.push(item);
        } else {
            groups.push(IndexGroup::Articles(vec![item]));
        }
    }
    groups
}

fn render_index(manifest: &Manifest, css: &str) -> Markup {
    let config = &manifest.config;
    let nav = render_nav(&manifest.navigation, "/");
    let groups = index_groups(&manifest.navigation);

    let content = html! {
        (site_header(&config.site.title, nav))
        main.index-page {
            h1 { (config.site.title) }
            @if !config.site.description.is_empty() {
                p.site-description { (config.site.description) }
            }
            @for group in &groups {
                @match group {
                    IndexGroup::Articles(items) => {
                        ol.article-list {
                            @for item in items {
                                (article_entry(manifest, item))
                            }
                        }
                    }
                    IndexGroup::Section(section) => {
                        h2.section-title { (section.title) }
                        ol.article-list {
                            @for item in &section.children {
                                (article_entry(manifest, item))
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(config, &config.site.title, None, "", css, content)
}

fn article_entry(manifest: &Manifest, item: &NavItem) -> Markup {
    let article = manifest.articles.iter().find(|a| a.href() == item.path);
    let title = article.map(|a| a.title.as_str()).unwrap_or(&item.title);
    html! {
        li {
            @if item.external {
                a href=(item.path) target="_blank" rel="noopener" { (title) " ↗" }
            } @else {
                a href=(item.path) { (title) }
            }
            @if let Some(summary) = article.and_then(|a| a.summary.as_deref()) {
                p.article-summary { (summary) }
            }
        }
    }
}

/// Renders one article page. Returns the markup and the number of code
/// blocks it contains.
fn render_article_page(article: &Article, manifest: &Manifest, css: &str) -> (Markup, usize) {
    let config = &manifest.config;
    let rendered = markdown::render(&article.body, &config.code);
    let href = article.href();
    let nav = render_nav(&manifest.navigation, &href);
    let has_title_heading = rendered.title.is_some();

    let content = html! {
        (site_header(&config.site.title, nav))
        main.article-page {
            article.article data-slug=(article.slug) {
                @if !has_title_heading {
                    h1 { (article.title) }
                }
                (table_of_contents(&rendered.headings))
                (PreEscaped(&rendered.html))
            }
        }
    };

    let page = base_document(
        config,
        &article.title,
        article.summary.as_deref(),
        &article.output_file(),
        css,
        content,
    );
    (page, rendered.blocks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FooterLink;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn article(slug: &str, body: &str) -> Article {
        Article {
            title: "Test Article".to_string(),
            link_title: slug.replace('-', " "),
            slug: slug.to_string(),
            section: None,
            source_path: format!("010-{slug}.md"),
            summary: Some("A short summary.".to_string()),
            body: body.to_string(),
            in_nav: true,
            sort_key: 10,
            is_link: false,
        }
    }

    fn manifest_with(articles: Vec<Article>) -> Manifest {
        let navigation = articles
            .iter()
            .filter(|a| a.in_nav)
            .map(|a| NavItem {
                title: a.link_title.clone(),
                path: a.href(),
                source_dir: String::new(),
                external: a.is_link,
                children: vec![],
            })
            .collect();
        Manifest {
            navigation,
            articles,
            config: SiteConfig::default(),
        }
    }

    // =========================================================================
    // Component tests
    // =========================================================================

    #[test]
    fn base_document_includes_doctype_and_meta() {
        let mut config = SiteConfig::default();
        config.site.title = "Server Components".into();
        let doc = base_document(&config, "Intro", None, "intro.html", "", html! { p { "x" } })
            .into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"<html lang="en">"#));
        assert!(doc.contains("<title>Intro | Server Components</title>"));
        assert!(doc.contains(r#"name="twitter:title" content="Intro | Server Components""#));
        assert!(doc.contains(r#"name="og:title""#));
        assert!(doc.contains(r#"name="twitter:text:title""#));
        assert!(doc.contains(r#"rel="icon" href="/favicon.ico""#));
    }

    #[test]
    fn base_document_site_title_not_repeated() {
        let config = SiteConfig::default();
        let doc = base_document(&config, "Untitled", None, "", "", html! {}).into_string();
        assert!(doc.contains("<title>Untitled</title>"));
    }

    #[test]
    fn base_document_optional_links() {
        let mut config = SiteConfig::default();
        config.site.favicon = String::new();
        let doc = base_document(&config, "A", None, "a.html", "", html! {}).into_string();
        assert!(!doc.contains(r#"rel="icon""#));
        assert!(!doc.contains("canonical"));

        config.site.base_url = "https://example.com/".into();
        let doc = base_document(&config, "A", None, "a.html", "", html! {}).into_string();
        assert!(doc.contains(r#"href="https://example.com/a.html""#));
    }

    #[test]
    fn base_document_css_not_escaped() {
        let config = SiteConfig::default();
        let doc = base_document(&config, "A", None, "", "ul > li {}", html! {}).into_string();
        assert!(doc.contains("ul > li {}"));
    }

    #[test]
    fn base_document_description_falls_back_to_site() {
        let mut config = SiteConfig::default();
        config.site.description = "Site wide".into();
        let doc = base_document(&config, "A", Some(""), "", "", html! {}).into_string();
        assert!(doc.contains(r#"content="Site wide""#));
        let doc = base_document(&config, "A", Some("Own"), "", "", html! {}).into_string();
        assert!(doc.contains(r#"content="Own""#));
    }

    #[test]
    fn footer_renders_text_links_and_credit() {
        let footer = FooterConfig {
            text: "Written by hand.".into(),
            links: vec![FooterLink {
                label: "Source".into(),
                url: "https://example.com/src".into(),
            }],
        };
        let html = site_footer(&footer).into_string();
        assert!(html.contains("Written by hand."));
        assert!(html.contains(r#"href="https://example.com/src""#));
        assert!(html.contains("Built with codepage"));
    }

    #[test]
    fn footer_credit_always_present() {
        let html = site_footer(&FooterConfig::default()).into_string();
        assert!(html.contains("Built with codepage"));
        assert!(!html.contains("footer-links"));
    }

    #[test]
    fn render_nav_marks_current() {
        let items = vec![
            NavItem {
                title: "Intro".into(),
                path: "/intro.html".into(),
                source_dir: String::new(),
                external: false,
                children: vec![],
            },
            NavItem {
                title: "Other".into(),
                path: "/other.html".into(),
                source_dir: String::new(),
                external: false,
                children: vec![],
            },
        ];
        let html = render_nav(&items, "/intro.html").into_string();
        assert!(html.contains(r#"<li class="current"><a href="/intro.html" aria-current="page">"#));
        assert!(html.contains(r#"<li><a href="/other.html">"#));
    }

    #[test]
    fn render_nav_sections_and_external() {
        let items = vec![NavItem {
            title: "Data".into(),
            path: "data".into(),
            source_dir: "020-data".into(),
            external: false,
            children: vec![NavItem {
                title: "GitHub".into(),
                path: "https://github.com".into(),
                source_dir: String::new(),
                external: true,
                children: vec![],
            }],
        }];
        let html = render_nav(&items, "").into_string();
        assert!(html.contains("nav-group"));
        assert!(html.contains(r#"target="_blank""#));
    }

    #[test]
    fn html_escape_in_maud() {
        let items = vec![NavItem {
            title: "<script>alert('xss')</script>".into(),
            path: "/x.html".into(),
            source_dir: String::new(),
            external: false,
            children: vec![],
        }];
        let html = render_nav(&items, "").into_string();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn toc_only_with_multiple_headings() {
        let one = vec![Heading {
            id: "a".into(),
            text: "A".into(),
        }];
        assert!(table_of_contents(&one).into_string().is_empty());

        let two = vec![
            one[0].clone(),
            Heading {
                id: "b".into(),
                text: "B".into(),
            },
        ];
        let html = table_of_contents(&two).into_string();
        assert!(html.contains(r##"href="#b""##));
    }

    // =========================================================================
    // Page renderer tests
    // =========================================================================

    #[test]
    fn article_page_contains_viewer_markup() {
        let body = "# Intro\n\n## Example\n\n```tsx\nexport default 1;\n```\n";
        let manifest = manifest_with(vec![article("intro", body)]);
        let (page, blocks) = render_article_page(&manifest.articles[0], &manifest, "");
        let html = page.into_string();
        assert_eq!(blocks, 1);
        assert!(html.contains("data-code-block"));
        assert!(html.contains(r#"id="example""#));
        assert!(html.contains("<h1>Intro</h1>"));
        assert!(html.contains("data-code-copy"));
    }

    #[test]
    fn article_page_adds_title_when_missing() {
        let manifest = manifest_with(vec![article("intro", "Just text.\n")]);
        let (page, blocks) = render_article_page(&manifest.articles[0], &manifest, "");
        let html = page.into_string();
        assert_eq!(blocks, 0);
        assert!(html.contains("<h1>Test Article</h1>"));
        assert!(html.contains(r#"content="A short summary.""#));
    }

    #[test]
    fn index_lists_articles_with_summaries() {
        let manifest = manifest_with(vec![article("intro", "# Intro\n")]);
        let html = render_index(&manifest, "").into_string();
        assert!(html.contains(r#"href="/intro.html""#));
        assert!(html.contains("A short summary."));
    }

    #[test]
    fn index_keeps_navigation_order_around_sections() {
        let mut manifest = manifest_with(vec![
            article("intro", "# Intro\n"),
            article("outro", "# Outro\n"),
        ]);
        let outro = manifest.navigation.pop().unwrap();
        manifest.navigation.push(NavItem {
            title: "data fetching".into(),
            path: "data-fetching".into(),
            source_dir: "020-data-fetching".into(),
            external: false,
            children: vec![NavItem {
                title: "streaming".into(),
                path: "/data-fetching-streaming.html".into(),
                source_dir: String::new(),
                external: false,
                children: vec![],
            }],
        });
        manifest.navigation.push(outro);

        let page = render_index(&manifest, "").into_string();
        let html = &page[page.find("index-page").unwrap()..];
        let intro = html.find(r#"<li><a href="/intro.html">"#).unwrap();
        let section = html.find(r#"<h2 class="section-title">data fetching</h2>"#).unwrap();
        let outro = html.find(r#"<li><a href="/outro.html">"#).unwrap();
        assert!(intro < section && section < outro);
    }

    #[test]
    fn shell_comment_does_not_suppress_page_heading() {
        let mut install = article("install", "Run this:\n\n```bash\n# install deps\nnpm i\n```\n");
        install.title = "install".into();
        let manifest = manifest_with(vec![install]);
        let (page, blocks) = render_article_page(&manifest.articles[0], &manifest, "");
        assert_eq!(blocks, 1);
        assert!(page.into_string().contains("<h1>install</h1>"));
    }

    // =========================================================================
    // Full generation
    // =========================================================================

    fn build_fixture_site(use_cache: bool) -> (TempDir, TempDir, GenerateResult) {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = crate::scan::scan(content.path()).unwrap();
        let result = generate_site(&manifest, content.path(), out.path(), use_cache).unwrap();
        (content, out, result)
    }

    #[test]
    fn generates_index_and_article_pages() {
        let (_content, out, result) = build_fixture_site(true);
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("what-are-rscs.html").exists());
        assert!(out.path().join("data-fetching-streaming.html").exists());
        assert!(out.path().join("drafts.html").exists());
        assert!(!out.path().join("github.html").exists());
        assert_eq!(result.pages.len(), 4);
    }

    #[test]
    fn copies_assets_to_output_root() {
        let (_content, out, result) = build_fixture_site(true);
        assert!(out.path().join("favicon.svg").exists());
        assert!(result.assets_copied >= 1);
    }

    #[test]
    fn second_build_hits_cache() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = crate::scan::scan(content.path()).unwrap();

        let first = generate_site(&manifest, content.path(), out.path(), true).unwrap();
        assert_eq!(first.cache_stats.hits, 0);
        assert!(cache::manifest_path(out.path()).exists());

        let second = generate_site(&manifest, content.path(), out.path(), true).unwrap();
        assert_eq!(second.cache_stats.misses, 0);
        assert!(second.pages.iter().all(|p| p.cached()));

        let forced = generate_site(&manifest, content.path(), out.path(), false).unwrap();
        assert_eq!(forced.cache_stats.hits, 0);
    }

    #[test]
    fn edited_article_rerendered() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let mut manifest = crate::scan::scan(content.path()).unwrap();
        generate_site(&manifest, content.path(), out.path(), true).unwrap();

        manifest.articles[0].body.push_str("\nOne more line.\n");
        let result = generate_site(&manifest, content.path(), out.path(), true).unwrap();
        assert_eq!(result.cache_stats.misses, 1);
    }

    #[test]
    fn generate_reads_manifest_file() {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let manifest = crate::scan::scan(content.path()).unwrap();
        let manifest_path = content.path().join("manifest.json");
        fs::write(&manifest_path, serde_json::to_string(&manifest).unwrap()).unwrap();

        let (read_back, result) = generate(&manifest_path, content.path(), out.path(), true).unwrap();
        assert_eq!(read_back.articles.len(), manifest.articles.len());
        assert_eq!(result.pages.len(), 4);
    }
}
