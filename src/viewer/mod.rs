//! Adaptive code-block viewer.
//!
//! A host-independent model of the one stateful widget on a generated page:
//! a code block that collapses when its content is taller than a threshold,
//! shows only the variant matching the reader's color-scheme preference (and
//! hides entirely when there is none), and copies the visible text on demand.
//!
//! | Module | Role |
//! |--------|------|
//! | [`theme`] | `Theme`, the injectable `PreferenceSource`, and the `ThemePreferenceWatcher` |
//! | [`overflow`] | `MeasurableSurface` / `Surface` capabilities and the `OverflowDetector` |
//! | [`clipboard`] | `ClipboardCopier` and clipboard sinks (memory, OSC 52) |
//! | [`code_block`] | Data model, pure transition table, and the mounted `CodeBlockViewer` |
//! | [`surface`] | `RecordingSurface`, a headless surface for tooling and tests |
//! | [`html`] | `HtmlSurface`, which renders the initial page markup at build time |
//!
//! Everything here is single-threaded (`Rc`/`RefCell`); each viewer owns
//! its state and its theme subscription.

pub mod clipboard;
pub mod code_block;
pub mod html;
pub mod overflow;
pub mod surface;
pub mod theme;

pub use clipboard::{
    ClipboardCopier, ClipboardError, ClipboardResult, ClipboardSink, MemoryClipboard,
    Osc52Clipboard,
};
pub use code_block::{
    BlockView, CodeBlockViewer, ContentVariant, RenderedBlock, ToggleLabel, ViewerEvent,
    ViewerState, transition, view,
};
pub use html::HtmlSurface;
pub use overflow::{HeightConstraint, MeasurableSurface, OverflowDetector, Surface};
pub use surface::RecordingSurface;
pub use theme::{
    FixedPreference, MemoryPreferenceSource, NoPreference, PreferenceSource, Subscription, Theme,
    ThemeHandler, ThemePreferenceWatcher,
};
