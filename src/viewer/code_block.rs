//! The adaptive code-block viewer.
//!
//! # State machine
//!
//! ```text
//!                 ToggleExpand                 ThemeChanged { matched }
//!   collapsed  <---------------->  expanded      visible <-----> hidden
//! ```
//!
//! The two axes are independent. Expansion flips only on an explicit
//! [`ViewerEvent::ToggleExpand`]; visibility follows only
//! [`ViewerEvent::ThemeChanged`], and is "visible" exactly when the block has a
//! variant tagged with the new theme. [`ViewerEvent::Measured`] feeds the
//! overflow flag back in after each commit.
//!
//! [`transition`] is the whole table as a pure function. [`view`] derives
//! what a surface should show from a state. [`CodeBlockViewer`] glues them to
//! a live [`Surface`], a [`ThemePreferenceWatcher`] and the clipboard, always
//! in the same order per event: transition, apply, measure, and re-apply if
//! the measurement changed the view. Measurement therefore always sees the
//! content committed for the current theme.

use super::clipboard::{ClipboardCopier, ClipboardResult, ClipboardSink};
use super::overflow::{HeightConstraint, OverflowDetector, Surface};
use super::theme::{PreferenceSource, Theme, ThemePreferenceWatcher};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// One theme-specific rendering of a block's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentVariant {
    pub theme: Theme,
    pub text: String,
}

impl ContentVariant {
    pub fn new(theme: Theme, text: impl Into<String>) -> Self {
        Self {
            theme,
            text: text.into(),
        }
    }

    /// Rendered height in lines (a trailing newline does not add a line).
    pub fn line_count(&self) -> u32 {
        let text = self.text.strip_suffix('\n').unwrap_or(&self.text);
        if text.is_empty() {
            0
        } else {
            text.lines().count().max(1) as u32
        }
    }
}

/// A code block as delivered by the content pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub variants: Vec<ContentVariant>,
}

impl RenderedBlock {
    pub fn new(language: Option<String>) -> Self {
        Self {
            language,
            variants: Vec::new(),
        }
    }

    /// One variant per theme, all carrying the same text.
    pub fn for_themes(language: Option<String>, text: &str, themes: &[Theme]) -> Self {
        let mut block = Self::new(language);
        for &theme in themes {
            block = block.with_variant(theme, text);
        }
        block
    }

    /// Add a variant. A second variant for the same theme replaces the first.
    pub fn with_variant(mut self, theme: Theme, text: impl Into<String>) -> Self {
        let variant = ContentVariant::new(theme, text);
        match self.variants.iter_mut().find(|v| v.theme == theme) {
            Some(existing) => *existing = variant,
            None => self.variants.push(variant),
        }
        self
    }

    pub fn variant(&self, theme: Theme) -> Option<&ContentVariant> {
        self.variants.iter().find(|v| v.theme == theme)
    }

    pub fn has_variant(&self, theme: Theme) -> bool {
        self.variant(theme).is_some()
    }
}

/// Per-widget transient state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewerState {
    pub expanded: bool,
    pub overflowing: bool,
    pub hidden: bool,
    pub theme: Theme,
}

impl ViewerState {
    /// Freshly mounted: collapsed, visibility from the first theme read.
    pub fn initial(theme: Theme, matched: bool) -> Self {
        Self {
            expanded: false,
            overflowing: false,
            hidden: !matched,
            theme,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerEvent {
    /// The user pressed the show more / show less control.
    ToggleExpand,
    /// The preference changed; `matched` says whether the block has a
    /// variant for `theme`.
    ThemeChanged { theme: Theme, matched: bool },
    /// A post-commit measurement finished.
    Measured { overflowing: bool },
}

/// The viewer's transition table.
pub fn transition(state: ViewerState, event: ViewerEvent) -> ViewerState {
    match event {
        ViewerEvent::ToggleExpand => ViewerState {
            expanded: !state.expanded,
            ..state
        },
        ViewerEvent::ThemeChanged { theme, matched } => ViewerState {
            theme,
            hidden: !matched,
            ..state
        },
        ViewerEvent::Measured { overflowing } => ViewerState {
            overflowing,
            ..state
        },
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleLabel {
    ShowMore,
    ShowLess,
}

impl ToggleLabel {
    pub fn for_expanded(expanded: bool) -> Self {
        if expanded {
            ToggleLabel::ShowLess
        } else {
            ToggleLabel::ShowMore
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ToggleLabel::ShowMore => "Show more",
            ToggleLabel::ShowLess => "Show less",
        }
    }
}

impl fmt::Display for ToggleLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a surface should display for a given state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockView<'a> {
    pub block: &'a RenderedBlock,
    pub state: ViewerState,
    /// The variant on screen; `None` when the block is hidden.
    pub visible: Option<&'a ContentVariant>,
    pub height: HeightConstraint,
    /// Present exactly when the content overflows.
    pub toggle: Option<ToggleLabel>,
}

impl<'a> BlockView<'a> {
    pub fn is_hidden(&self) -> bool {
        self.state.hidden
    }

    pub fn visible_text(&self) -> Option<&'a str> {
        self.visible.map(|v| v.text.as_str())
    }
}

/// Derive the view for `state`.
pub fn view<'a>(
    state: ViewerState,
    block: &'a RenderedBlock,
    detector: &OverflowDetector,
) -> BlockView<'a> {
    let visible = if state.hidden {
        None
    } else {
        block.variant(state.theme)
    };
    BlockView {
        block,
        state,
        visible,
        height: detector.height_constraint(&state),
        toggle: state
            .overflowing
            .then(|| ToggleLabel::for_expanded(state.expanded)),
    }
}

struct ViewerCore<S> {
    block: RenderedBlock,
    state: ViewerState,
    surface: S,
    detector: OverflowDetector,
    commits: usize,
}

impl<S: Surface> ViewerCore<S> {
    fn dispatch(&mut self, event: ViewerEvent) {
        let next = transition(self.state, event);
        if next == self.state {
            return;
        }
        tracing::trace!(?event, ?next, "code block transition");
        self.state = next;
        self.commit();
    }

    fn theme_changed(&mut self, theme: Theme) {
        let matched = self.block.has_variant(theme);
        self.dispatch(ViewerEvent::ThemeChanged { theme, matched });
    }

    /// Apply the current view, measure what was committed, and re-apply
    /// if the overflow flag moved.
    fn commit(&mut self) {
        self.apply();
        let overflowing = self.detector.measure(&self.surface);
        let next = transition(self.state, ViewerEvent::Measured { overflowing });
        if next != self.state {
            self.state = next;
            self.apply();
        }
    }

    fn apply(&mut self) {
        let v = view(self.state, &self.block, &self.detector);
        self.surface.apply(&v);
        self.commits += 1;
    }

    fn visible_text(&self) -> Option<&str> {
        view(self.state, &self.block, &self.detector).visible_text()
    }
}

/// A mounted code block.
///
/// Owns its state exclusively; nothing is shared between viewers. The theme
/// subscription lives exactly as long as the viewer stays mounted.
pub struct CodeBlockViewer<S: Surface + 'static> {
    core: Rc<RefCell<ViewerCore<S>>>,
    watcher: ThemePreferenceWatcher,
}

impl<S: Surface + 'static> CodeBlockViewer<S> {
    /// Mount `block` onto `surface`, read the starting theme from `source`
    /// and subscribe to its changes.
    pub fn mount(
        block: RenderedBlock,
        surface: S,
        source: &dyn PreferenceSource,
        detector: OverflowDetector,
    ) -> Self {
        let core = Rc::new(RefCell::new(ViewerCore {
            block,
            state: ViewerState::default(),
            surface,
            detector,
            commits: 0,
        }));

        let weak = Rc::downgrade(&core);
        let watcher = ThemePreferenceWatcher::watch(source, move |theme| {
            let Some(core) = weak.upgrade() else {
                return;
            };
            match core.try_borrow_mut() {
                Ok(mut core) => core.theme_changed(theme),
                Err(_) => tracing::warn!(%theme, "theme change during render ignored"),
            }
        });

        {
            let mut core = core.borrow_mut();
            let theme = watcher.current();
            let matched = core.block.has_variant(theme);
            core.state = ViewerState::initial(theme, matched);
            tracing::debug!(
                %theme,
                hidden = core.state.hidden,
                variants = core.block.variants.len(),
                "mounted code block"
            );
            core.commit();
        }

        Self { core, watcher }
    }

    /// Flip between collapsed and expanded.
    pub fn toggle_expand(&self) {
        if !self.is_mounted() {
            tracing::trace!("toggle on unmounted code block ignored");
            return;
        }
        self.core.borrow_mut().dispatch(ViewerEvent::ToggleExpand);
    }

    /// Copy the text of the variant visible right now.
    pub fn copy(&self, sink: &mut dyn ClipboardSink) -> ClipboardResult {
        let core = self.core.borrow();
        ClipboardCopier.copy(core.visible_text(), sink)
    }

    pub fn state(&self) -> ViewerState {
        self.core.borrow().state
    }

    pub fn theme(&self) -> Theme {
        self.watcher.current()
    }

    /// Run `f` against the current view.
    pub fn with_view<R>(&self, f: impl FnOnce(&BlockView<'_>) -> R) -> R {
        let core = self.core.borrow();
        f(&view(core.state, &core.block, &core.detector))
    }

    /// Run `f` against the rendering surface.
    pub fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.core.borrow().surface)
    }

    /// How many times a view has been applied to the surface.
    pub fn commits(&self) -> usize {
        self.core.borrow().commits
    }

    pub fn is_mounted(&self) -> bool {
        self.watcher.is_subscribed()
    }

    /// Tear down: drop the theme subscription. The last rendered state stays
    /// readable but nothing updates it any more.
    pub fn unmount(&mut self) {
        if self.is_mounted() {
            tracing::debug!("unmounted code block");
        }
        self.watcher.stop();
    }
}

impl<S: Surface + 'static> fmt::Debug for CodeBlockViewer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeBlockViewer")
            .field("state", &self.state())
            .field("mounted", &self.is_mounted())
            .finish()
    }
}
