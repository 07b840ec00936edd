//! Markdown to HTML for article bodies.
//!
//! Runs pulldown-cmark and rewrites two kinds of events on the way through:
//!
//! - **`##` headings** get the heading classes, a unique slug `id` and a
//!   trailing `#` anchor link. Other levels pass through untouched.
//! - **Code blocks** (fenced or indented) become [`RenderedBlock`]s. Each is
//!   mounted in a [`CodeBlockViewer`] over an [`HtmlSurface`] with the
//!   configured default theme as the preference, and the markup from its first
//!   commit replaces the block in the output.
//!
//! ## Fence info strings
//!
//! ````text
//! ```tsx                      → language tsx, every configured theme
//! ```bash theme=dark          → dark variant only
//! ```js themes=dark,light     → explicit list
//! ````
//!
//! The first word is the language unless it contains `=`. Unknown theme names
//! are skipped with a warning; if none are left the configured themes apply.

use crate::config::CodeConfig;
use crate::naming::AnchorIds;
use crate::viewer::{CodeBlockViewer, FixedPreference, HtmlSurface, RenderedBlock, Theme};
use maud::{Markup, PreEscaped, html};
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

/// An article body converted to HTML.
#[derive(Debug, Clone)]
pub struct RenderedMarkdown {
    pub html: String,
    /// Text of the first `#` heading, if the body has one.
    pub title: Option<String>,
    /// `##` headings in document order.
    pub headings: Vec<Heading>,
    /// Code blocks in document order.
    pub blocks: Vec<RenderedBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub id: String,
    pub text: String,
}

/// Parsed fence info string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FenceInfo {
    pub language: Option<String>,
    /// Explicit theme restriction, `None` when the fence sets none.
    pub themes: Option<Vec<Theme>>,
}

pub fn parse_info_string(info: &str) -> FenceInfo {
    let mut fence = FenceInfo::default();
    for (i, word) in info.split_whitespace().enumerate() {
        match word.split_once('=') {
            None if i == 0 => fence.language = Some(word.to_string()),
            None => {}
            Some(("theme" | "themes", value)) => {
                let mut themes: Vec<Theme> = Vec::new();
                for name in value.split(',').filter(|n| !n.is_empty()) {
                    match name.parse::<Theme>() {
                        Ok(theme) if !themes.contains(&theme) => themes.push(theme),
                        Ok(_) => {}
                        Err(err) => tracing::warn!(%err, info, "ignoring theme in code fence"),
                    }
                }
                if !themes.is_empty() {
                    fence.themes = Some(themes);
                }
            }
            Some(_) => {}
        }
    }
    fence
}

struct PendingCode {
    fence: FenceInfo,
    text: String,
}

impl PendingCode {
    fn into_block(self, code: &CodeConfig) -> RenderedBlock {
        let themes = self.fence.themes.unwrap_or_else(|| code.themes.clone());
        RenderedBlock::for_themes(self.fence.language, &self.text, &themes)
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

/// Initial markup for one code block: the first commit of a freshly mounted
/// viewer, rendered for the configured default theme.
pub fn render_code_block(block: &RenderedBlock, code: &CodeConfig) -> Markup {
    let surface = HtmlSurface::new(
        code.line_height,
        code.padding,
        code.collapsed_height,
        code.expanded_height,
    );
    let mut viewer = CodeBlockViewer::mount(
        block.clone(),
        surface,
        &FixedPreference(code.default_theme),
        code.detector(),
    );
    let markup = viewer.with_surface(|s| s.markup().cloned());
    viewer.unmount();
    markup.unwrap_or_else(|| PreEscaped(String::new()))
}

fn render_heading(id: &str, inner: Vec<Event<'_>>) -> Markup {
    let mut inner_html = String::new();
    pulldown_cmark::html::push_html(&mut inner_html, inner.into_iter());
    html! {
        h2.heading.heading-2 id=(id) {
            (PreEscaped(inner_html))
            " "
            a.heading-anchor href={ "#" (id) } aria-hidden="true" { "#" }
        }
    }
}

fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

pub fn render(markdown: &str, code: &CodeConfig) -> RenderedMarkdown {
    let mut out: Vec<Event<'_>> = Vec::new();
    let mut headings = Vec::new();
    let mut blocks = Vec::new();
    let mut ids = AnchorIds::new();
    let mut pending_code: Option<PendingCode> = None;
    let mut pending_heading: Option<Vec<Event<'_>>> = None;

    for event in Parser::new_ext(markdown, options()) {
        if let Some(pending) = pending_code.as_mut() {
            match event {
                Event::Text(text) => pending.text.push_str(&text),
                Event::End(TagEnd::CodeBlock) => {
                    if let Some(pending) = pending_code.take() {
                        let block = pending.into_block(code);
                        let markup = render_code_block(&block, code);
                        out.push(Event::Html(markup.into_string().into()));
                        blocks.push(block);
                    }
                }
                _ => {}
            }
            continue;
        }

        if let Some(inner) = pending_heading.as_mut() {
            if matches!(event, Event::End(TagEnd::Heading(HeadingLevel::H2))) {
                let inner = pending_heading.take().unwrap_or_default();
                let text = plain_text(&inner);
                let id = ids.next(&text);
                out.push(Event::Html(render_heading(&id, inner).into_string().into()));
                headings.push(Heading { id, text });
            } else {
                inner.push(event);
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let fence = match kind {
                    CodeBlockKind::Fenced(info) => parse_info_string(&info),
                    CodeBlockKind::Indented => FenceInfo::default(),
                };
                pending_code = Some(PendingCode {
                    fence,
                    text: String::new(),
                });
            }
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                ..
            }) => pending_heading = Some(Vec::new()),
            other => out.push(other),
        }
    }

    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, out.into_iter());

    tracing::trace!(
        headings = headings.len(),
        blocks = blocks.len(),
        "rendered markdown"
    );

    RenderedMarkdown {
        html,
        title: title_heading(markdown),
        headings,
        blocks,
    }
}

/// Code blocks of an article in document order.
pub fn code_blocks(markdown: &str, code: &CodeConfig) -> Vec<RenderedBlock> {
    render(markdown, code).blocks
}

/// Plain text of the first level-1 heading. Lines inside code blocks never
/// count, so a `# comment` in a shell snippet is not a title.
pub fn title_heading(markdown: &str) -> Option<String> {
    let mut current: Option<Vec<Event<'_>>> = None;
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            }) => current = Some(Vec::new()),
            Event::End(TagEnd::Heading(HeadingLevel::H1)) => {
                let text = plain_text(&current.take().unwrap_or_default());
                let text = text.trim();
                if !text.is_empty() {
                    return Some(text.to_string());
                }
            }
            other => {
                if let Some(events) = current.as_mut() {
                    events.push(other);
                }
            }
        }
    }
    None
}

/// Plain text of the first paragraph, used as the article summary.
pub fn first_paragraph(markdown: &str) -> Option<String> {
    let mut current: Option<Vec<Event<'_>>> = None;
    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::Paragraph) => current = Some(Vec::new()),
            Event::End(TagEnd::Paragraph) => {
                if let Some(events) = current.take() {
                    let text = plain_text(&events);
                    let text = text.trim();
                    if !text.is_empty() {
                        return Some(text.to_string());
                    }
                }
            }
            other => {
                if let Some(events) = current.as_mut() {
                    events.push(other);
                }
            }
        }
    }
    None
}
