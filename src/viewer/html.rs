//! Server-side rendering surface.
//!
//! At build time there is no browser to measure anything, so [`HtmlSurface`]
//! estimates the committed height from the visible variant's line count and
//! renders each applied view to Maud markup. The markup is the page's initial
//! state; `static/code-block.js` takes over in the browser, keyed off the same
//! classes and `data-*` attributes.

use super::code_block::BlockView;
use super::overflow::{MeasurableSurface, Surface};
use maud::{Markup, html};

#[derive(Debug, Clone)]
pub struct HtmlSurface {
    line_height: u32,
    padding: u32,
    threshold: u32,
    expanded_cap: u32,
    measured: Option<u32>,
    markup: Option<Markup>,
}

impl HtmlSurface {
    pub fn new(line_height: u32, padding: u32, threshold: u32, expanded_cap: u32) -> Self {
        Self {
            line_height,
            padding,
            threshold,
            expanded_cap,
            measured: None,
            markup: None,
        }
    }

    /// Markup from the most recent commit.
    pub fn markup(&self) -> Option<&Markup> {
        self.markup.as_ref()
    }

    fn estimate(&self, view: &BlockView<'_>) -> u32 {
        match view.visible {
            Some(variant) => variant
                .line_count()
                .saturating_mul(self.line_height)
                .saturating_add(self.padding),
            None => 0,
        }
    }

    fn render(&self, view: &BlockView<'_>) -> Markup {
        let state = view.state;
        let language_class = view
            .block
            .language
            .as_deref()
            .map(|lang| format!("language-{lang}"));
        let bool_attr = |b: bool| if b { "true" } else { "false" };

        html! {
            div.code-block.(view.height.class())
                .is-hidden[view.is_hidden()]
                hidden[view.is_hidden()]
                data-code-block
                data-threshold=(self.threshold)
                data-cap=(self.expanded_cap)
                data-theme=(state.theme.as_str())
                data-expanded=(bool_attr(state.expanded))
                data-overflowing=(bool_attr(state.overflowing))
            {
                pre.code-pre style=(view.height.css()) {
                    @for variant in &view.block.variants {
                        @let active = view.visible.is_some_and(|v| v.theme == variant.theme);
                        code class=[language_class.as_deref()]
                            data-theme=(variant.theme.as_str())
                            hidden[!active]
                        {
                            (variant.text)
                        }
                    }
                }
                @if let Some(label) = view.toggle {
                    button.code-toggle type="button" data-code-toggle
                        aria-expanded=(bool_attr(state.expanded))
                    {
                        (label.as_str())
                    }
                }
                div.code-copy {
                    button.code-copy-button type="button" data-code-copy
                        aria-label="Copy code" title="Copy"
                    {
                        span.code-copy-label { "Copy" }
                    }
                }
            }
        }
    }
}

impl MeasurableSurface for HtmlSurface {
    fn measured_height(&self) -> Option<u32> {
        self.measured
    }
}

impl Surface for HtmlSurface {
    fn apply(&mut self, view: &BlockView<'_>) {
        self.measured = Some(self.estimate(view));
        self.markup = Some(self.render(view));
    }
}
