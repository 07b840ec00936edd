//! Headless surface for driving a viewer without any renderer.
//!
//! [`RecordingSurface`] reports a configurable content height per theme and
//! remembers the last view applied to it. Tests and tooling use it to observe
//! what a real surface would have been asked to display.

use super::code_block::BlockView;
use super::overflow::{HeightConstraint, MeasurableSurface, Surface};
use super::theme::Theme;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Committed {
    theme: Theme,
    hidden: bool,
    height: HeightConstraint,
    toggle_label: Option<&'static str>,
}

#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    attached: bool,
    default_height: u32,
    heights: HashMap<Theme, u32>,
    last: Option<Committed>,
    applied: usize,
}

impl RecordingSurface {
    /// Every variant renders at `height` units.
    pub fn uniform(height: u32) -> Self {
        Self {
            attached: true,
            default_height: height,
            ..Self::default()
        }
    }

    /// Never attached: measurement is always unavailable.
    pub fn detached() -> Self {
        Self::default()
    }

    /// Override the rendered height for one theme's variant.
    pub fn with_height(mut self, theme: Theme, height: u32) -> Self {
        self.heights.insert(theme, height);
        self
    }

    fn content_height(&self, theme: Theme) -> u32 {
        self.heights
            .get(&theme)
            .copied()
            .unwrap_or(self.default_height)
    }

    /// Number of views applied so far.
    pub fn applied(&self) -> usize {
        self.applied
    }

    /// Whether the last applied view hid the block.
    pub fn last_hidden(&self) -> bool {
        self.last.is_some_and(|c| c.hidden)
    }

    pub fn last_toggle_label(&self) -> Option<&'static str> {
        self.last.and_then(|c| c.toggle_label)
    }

    /// On-screen height after the container constraint, `None` before the
    /// first commit or while detached.
    pub fn visible_height(&self) -> Option<u32> {
        let committed = self.last?;
        let content = self.measured_height()?;
        Some(committed.height.visible_height(content))
    }
}

impl MeasurableSurface for RecordingSurface {
    fn measured_height(&self) -> Option<u32> {
        if !self.attached {
            return None;
        }
        let committed = self.last?;
        if committed.hidden {
            Some(0)
        } else {
            Some(self.content_height(committed.theme))
        }
    }
}

impl Surface for RecordingSurface {
    fn apply(&mut self, view: &BlockView<'_>) {
        self.last = Some(Committed {
            theme: view.state.theme,
            hidden: view.is_hidden(),
            height: view.height,
            toggle_label: view.toggle.map(|t| t.as_str()),
        });
        self.applied += 1;
    }
}
