//! Filesystem scanning and manifest generation.
//!
//! Stage 1 of the build pipeline. Walks the content root to discover articles
//! and sections, producing a [`Manifest`] the generate stage consumes.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                          # Content root
//! ├── config.toml                   # Site configuration (optional)
//! ├── assets/                       # Copied verbatim to the output root
//! ├── 010-what-are-rscs.md          # Article (numbered = appears in nav)
//! ├── 020-data-fetching/            # Section (numbered = nav group)
//! │   ├── 010-async-components.md   # → data-fetching-async-components.html
//! │   └── 020-streaming.md
//! ├── 030-github.md                 # External link (URL-only content)
//! └── drafts.md                     # Unnumbered = generated, hidden from nav
//! ```
//!
//! Only two levels are walked: articles at the root and articles inside a
//! section directory. Deeper nesting is ignored.
//!
//! ## Validation
//!
//! - No duplicate numbers among siblings in the same directory
//! - No two articles may produce the same output slug
//! - Every article must have a non-empty slug (`001.md` is rejected)

use crate::config::{self, SiteConfig};
use crate::markdown;
use crate::naming::{ParsedName, parse_entry_name};
use crate::types::{Article, NavItem};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Duplicate number {0} in {1}")]
    DuplicateNumber(u32, PathBuf),
    #[error("Duplicate slug '{slug}': {first} and {second}")]
    DuplicateSlug {
        slug: String,
        first: String,
        second: String,
    },
    #[error("Article has no slug after its number prefix: {0}")]
    MissingSlug(PathBuf),
}

/// Manifest output from the scan stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    pub navigation: Vec<NavItem>,
    pub articles: Vec<Article>,
    pub config: SiteConfig,
}

impl Manifest {
    pub fn find_article(&self, slug: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.slug == slug)
    }

    /// Articles that produce an HTML page (everything except external links).
    pub fn pages(&self) -> impl Iterator<Item = &Article> {
        self.articles.iter().filter(|a| !a.is_link)
    }
}

/// A section directory and the articles found inside it.
struct SectionDir {
    name: ParsedName,
    dir_name: String,
    articles: Vec<Article>,
}

pub fn scan(root: &Path) -> Result<Manifest, ScanError> {
    let config = config::load_config(root)?;

    let mut root_files: Vec<PathBuf> = Vec::new();
    let mut sections: BTreeMap<String, SectionDir> = BTreeMap::new();
    let mut section_files: Vec<(String, PathBuf)> = Vec::new();

    let walker = WalkDir::new(root)
        .min_depth(1)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_skipped(e, &config.assets_dir));

    for entry in walker {
        let entry = entry?;
        let file_name = entry.file_name().to_string_lossy().to_string();
        match (entry.depth(), entry.file_type().is_dir()) {
            (1, true) => {
                sections.insert(
                    file_name.clone(),
                    SectionDir {
                        name: parse_entry_name(&file_name),
                        dir_name: file_name,
                        articles: Vec::new(),
                    },
                );
            }
            (1, false) if is_markdown(entry.path()) => root_files.push(entry.into_path()),
            (2, false) if is_markdown(entry.path()) => {
                let parent = entry
                    .path()
                    .parent()
                    .and_then(|p| p.file_name())
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default();
                section_files.push((parent, entry.into_path()));
            }
            _ => {}
        }
    }

    check_duplicate_numbers(
        root,
        root_files
            .iter()
            .filter_map(|p| file_stem(p))
            .chain(sections.keys().cloned()),
    )?;

    let mut root_articles = root_files
        .iter()
        .map(|p| build_article(p, root, None))
        .collect::<Result<Vec<_>, _>>()?;
    root_articles.sort_by_key(|a| a.sort_key);

    for (dir, path) in &section_files {
        if let Some(section) = sections.get_mut(dir) {
            let article = build_article(path, root, Some(&section.name))?;
            section.articles.push(article);
        }
    }
    for section in sections.values_mut() {
        check_duplicate_numbers(
            &root.join(&section.dir_name),
            section
                .articles
                .iter()
                .filter_map(|a| file_stem(Path::new(&a.source_path))),
        )?;
        section.articles.sort_by_key(|a| a.sort_key);
    }

    let mut sections: Vec<SectionDir> = sections.into_values().collect();
    sections.sort_by_key(|s| s.name.sort_key());

    let navigation = build_navigation(&root_articles, &sections);

    let articles: Vec<Article> = root_articles
        .into_iter()
        .chain(sections.into_iter().flat_map(|s| s.articles))
        .collect();
    check_duplicate_slugs(&articles)?;

    tracing::debug!(
        root = %root.display(),
        articles = articles.len(),
        nav_items = navigation.len(),
        "scan complete"
    );

    Ok(Manifest {
        navigation,
        articles,
        config,
    })
}

fn is_skipped(entry: &DirEntry, assets_dir: &str) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.depth() == 1 && entry.file_type().is_dir() && name == assets_dir)
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem().map(|s| s.to_string_lossy().to_string())
}

/// Parse one markdown file into an article.
///
/// Sectioned articles get the section slug as an output prefix so two
/// sections may each contain an `intro.md`.
fn build_article(
    path: &Path,
    root: &Path,
    section: Option<&ParsedName>,
) -> Result<Article, ScanError> {
    let stem = file_stem(path).unwrap_or_default();
    let name = parse_entry_name(&stem);
    if name.slug.is_empty() {
        return Err(ScanError::MissingSlug(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let trimmed = content.trim();
    let is_link = !trimmed.contains('\n')
        && (trimmed.starts_with("http://") || trimmed.starts_with("https://"));

    let link_title = name.display_title.clone();
    let title = if is_link {
        link_title.clone()
    } else {
        markdown::title_heading(&content).unwrap_or_else(|| link_title.clone())
    };
    let summary = if is_link {
        None
    } else {
        markdown::first_paragraph(&content)
    };

    let slug = match section {
        Some(s) if !s.slug.is_empty() => format!("{}-{}", s.slug, name.slug),
        _ => name.slug.clone(),
    };
    let source_path = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .to_string();

    Ok(Article {
        title,
        link_title,
        slug,
        section: section.map(|s| s.slug.clone()),
        source_path,
        summary,
        body: content,
        in_nav: name.in_nav(),
        sort_key: name.sort_key(),
        is_link,
    })
}

fn check_duplicate_numbers(
    dir: &Path,
    names: impl Iterator<Item = String>,
) -> Result<(), ScanError> {
    let mut seen = HashSet::new();
    for name in names {
        if let Some(num) = parse_entry_name(&name).number
            && !seen.insert(num)
        {
            return Err(ScanError::DuplicateNumber(num, dir.to_path_buf()));
        }
    }
    Ok(())
}

fn check_duplicate_slugs(articles: &[Article]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for article in articles {
        if let Some(first) = seen.insert(&article.slug, &article.source_path) {
            return Err(ScanError::DuplicateSlug {
                slug: article.slug.clone(),
                first: first.to_string(),
                second: article.source_path.clone(),
            });
        }
    }
    Ok(())
}

fn nav_entry(article: &Article) -> NavItem {
    NavItem {
        title: article.link_title.clone(),
        path: article.href(),
        source_dir: String::new(),
        external: article.is_link,
        children: vec![],
    }
}

/// Numbered root articles and numbered sections, interleaved by number.
/// Sections without any numbered article are left out.
fn build_navigation(root_articles: &[Article], sections: &[SectionDir]) -> Vec<NavItem> {
    let mut items: Vec<(u32, NavItem)> = root_articles
        .iter()
        .filter(|a| a.in_nav)
        .map(|a| (a.sort_key, nav_entry(a)))
        .collect();

    for section in sections.iter().filter(|s| s.name.in_nav()) {
        let children: Vec<NavItem> = section
            .articles
            .iter()
            .filter(|a| a.in_nav)
            .map(nav_entry)
            .collect();
        if children.is_empty() {
            continue;
        }
        items.push((
            section.name.sort_key(),
            NavItem {
                title: section.name.display_title.clone(),
                path: section.name.slug.clone(),
                source_dir: section.dir_name.clone(),
                external: false,
                children,
            },
        ));
    }

    items.sort_by_key(|(key, _)| *key);
    items.into_iter().map(|(_, item)| item).collect()
}
