#![forbid(unsafe_code)]

//! Position and opacity policies for the two lanes.
//!
//! A layout maps a relative offset to the [`SlotStyle`] a node should carry.
//! Layouts are pure: they know nothing about nodes, cursors or timers, which
//! keeps the transform/opacity math testable in isolation.

use crate::config::{GalleryConfig, NavConfig};
use crate::window::WindowBounds;

/// Opacity of nodes that are staged outside the visible band.
pub const HIDDEN_OPACITY: f64 = 0.0;

/// Presentational state of one rendered node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotStyle {
    /// Relative offset from the focused entry.
    pub offset: i32,
    /// Vertical translation in CSS pixels.
    pub translate_y: f64,
    /// Node height in CSS pixels.
    pub height: f64,
    /// Opacity in `0.0..=1.0`.
    pub opacity: f64,
}

/// Maps relative offsets to node styles.
pub trait SlotLayout {
    /// Style for a node sitting at `offset`.
    fn style(&self, offset: i32) -> SlotStyle;

    /// Fixed container height the lane needs, if any.
    fn viewport_height(&self) -> Option<f64> {
        None
    }
}

/// Project-name lane: centered on a fixed-height viewport, with the focused
/// entry opaque and its near neighbours dimmed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavLayout {
    viewport_height: f64,
    item_height: f64,
    dim_radius: u32,
    focus_opacity: f64,
    dim_opacity: f64,
}

impl NavLayout {
    #[must_use]
    pub fn new(config: &NavConfig) -> Self {
        Self {
            viewport_height: config.viewport_height,
            item_height: config.item_height,
            dim_radius: config.dim_radius,
            focus_opacity: config.focus_opacity,
            dim_opacity: config.dim_opacity,
        }
    }

    /// Vertical center of the viewport.
    #[must_use]
    pub fn center(&self) -> f64 {
        self.viewport_height / 2.0
    }

    #[must_use]
    pub fn opacity(&self, offset: i32) -> f64 {
        if offset == 0 {
            self.focus_opacity
        } else if offset.unsigned_abs() <= self.dim_radius {
            self.dim_opacity
        } else {
            HIDDEN_OPACITY
        }
    }
}

impl SlotLayout for NavLayout {
    fn style(&self, offset: i32) -> SlotStyle {
        SlotStyle {
            offset,
            translate_y: self.center() + f64::from(offset) * self.item_height
                - self.item_height / 2.0,
            height: self.item_height,
            opacity: self.opacity(offset),
        }
    }

    fn viewport_height(&self) -> Option<f64> {
        Some(self.viewport_height)
    }
}

/// Image lane: a plain stack of equal-height tiles starting at offset 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GalleryLayout {
    image_height: f64,
    visible: WindowBounds,
}

impl GalleryLayout {
    #[must_use]
    pub fn new(config: &GalleryConfig) -> Self {
        Self {
            image_height: config.image_height,
            visible: config.visible,
        }
    }

    #[must_use]
    pub fn opacity(&self, offset: i32) -> f64 {
        if self.visible.contains(offset) {
            1.0
        } else {
            HIDDEN_OPACITY
        }
    }
}

impl SlotLayout for GalleryLayout {
    fn style(&self, offset: i32) -> SlotStyle {
        SlotStyle {
            offset,
            translate_y: f64::from(offset) * self.image_height,
            height: self.image_height,
            opacity: self.opacity(offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GalleryLayout, NavLayout, SlotLayout};
    use crate::config::{GalleryConfig, NavConfig};

    #[test]
    fn nav_positions_center_the_focused_item() {
        let layout = NavLayout::new(&NavConfig::default());
        assert_eq!(layout.style(0).translate_y, 68.0);
        assert_eq!(layout.style(-1).translate_y, 34.0);
        assert_eq!(layout.style(2).translate_y, 136.0);
        assert_eq!(layout.style(-4).translate_y, -68.0);
        assert_eq!(layout.style(3).height, 34.0);
    }

    #[test]
    fn nav_opacity_bands() {
        let layout = NavLayout::new(&NavConfig::default());
        assert_eq!(layout.opacity(0), 1.0);
        for offset in [-2, -1, 1, 2] {
            assert_eq!(layout.opacity(offset), 0.3, "offset {offset}");
        }
        for offset in [-5, -4, -3, 3, 4, 5] {
            assert_eq!(layout.opacity(offset), 0.0, "offset {offset}");
        }
    }

    #[test]
    fn nav_reports_its_viewport() {
        let layout = NavLayout::new(&NavConfig::default());
        assert_eq!(layout.viewport_height(), Some(170.0));
    }

    #[test]
    fn gallery_stacks_from_zero() {
        let layout = GalleryLayout::new(&GalleryConfig::default());
        assert_eq!(layout.style(0).translate_y, 0.0);
        assert_eq!(layout.style(-2).translate_y, -594.12);
        assert_eq!(layout.style(1).height, 297.06);
        assert_eq!(layout.viewport_height(), None);
    }

    #[test]
    fn gallery_opacity_is_binary() {
        let layout = GalleryLayout::new(&GalleryConfig::default());
        for offset in -2..=2 {
            assert_eq!(layout.opacity(offset), 1.0, "offset {offset}");
        }
        for offset in [-3, 3, 4, 5, 6, 7] {
            assert_eq!(layout.opacity(offset), 0.0, "offset {offset}");
        }
    }
}
