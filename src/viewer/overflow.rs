//! Overflow detection against the collapsed-height threshold.
//!
//! The detector never touches a concrete rendering surface; it asks a
//! [`MeasurableSurface`] for the full (scroll) height of whatever content is
//! committed right now. A surface that is not attached yet reports `None`,
//! which counts as "not overflowing".

use super::code_block::{BlockView, ViewerState};

/// Anything whose committed content height can be queried.
pub trait MeasurableSurface {
    /// Full content height in layout units, `None` when nothing is attached.
    fn measured_height(&self) -> Option<u32>;
}

/// A surface the viewer can both render into and measure.
///
/// `apply` commits a view; measurement afterwards must reflect it.
pub trait Surface: MeasurableSurface {
    fn apply(&mut self, view: &BlockView<'_>);
}

/// Maximum-height rule applied to the block container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeightConstraint {
    /// Clipped to the collapsed threshold.
    Collapsed(u32),
    /// Expanded, but bounded by the finite cap.
    Capped(u32),
    /// Sized to content (nothing to clip).
    Fit,
}

impl HeightConstraint {
    /// Effective visible height for content of `content_height` units.
    pub fn visible_height(self, content_height: u32) -> u32 {
        match self {
            HeightConstraint::Collapsed(max) | HeightConstraint::Capped(max) => {
                content_height.min(max)
            }
            HeightConstraint::Fit => content_height,
        }
    }

    /// Inline CSS for the container.
    pub fn css(self) -> String {
        match self {
            HeightConstraint::Collapsed(max) | HeightConstraint::Capped(max) => {
                format!("max-height: {max}px;")
            }
            HeightConstraint::Fit => "max-height: fit-content;".to_string(),
        }
    }

    /// Class name mirrored by the browser script.
    pub fn class(self) -> &'static str {
        match self {
            HeightConstraint::Collapsed(_) => "is-collapsed",
            HeightConstraint::Capped(_) => "is-capped",
            HeightConstraint::Fit => "is-fit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverflowDetector {
    /// Heights strictly above this overflow.
    pub threshold: u32,
    /// Ceiling for an expanded, overflowing block.
    pub expanded_cap: u32,
}

impl Default for OverflowDetector {
    fn default() -> Self {
        Self {
            threshold: Self::DEFAULT_THRESHOLD,
            expanded_cap: Self::DEFAULT_EXPANDED_CAP,
        }
    }
}

impl OverflowDetector {
    pub const DEFAULT_THRESHOLD: u32 = 350;
    pub const DEFAULT_EXPANDED_CAP: u32 = 1000;

    pub fn new(threshold: u32, expanded_cap: u32) -> Self {
        Self {
            threshold,
            expanded_cap: expanded_cap.max(threshold),
        }
    }

    /// Whether committed content is taller than the threshold.
    pub fn measure(&self, surface: &dyn MeasurableSurface) -> bool {
        match surface.measured_height() {
            Some(height) => height > self.threshold,
            None => {
                tracing::trace!("surface not attached; treating as not overflowing");
                false
            }
        }
    }

    /// Height rule for the current state.
    ///
    /// Collapsed blocks are always clipped at the threshold. Expanded blocks
    /// are capped when overflowing; an expanded block that no longer
    /// overflows (a shorter variant was swapped in) fits its content.
    pub fn height_constraint(&self, state: &ViewerState) -> HeightConstraint {
        match (state.expanded, state.overflowing) {
            (false, _) => HeightConstraint::Collapsed(self.threshold),
            (true, true) => HeightConstraint::Capped(self.expanded_cap),
            (true, false) => HeightConstraint::Fit,
        }
    }
}
