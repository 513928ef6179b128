#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! Every field has a default reproducing the stock widget: five projects
//! focused on "CISCO", a 170px navigation viewport of 34px rows with a
//! nine-node window over offsets -4..=4, and a 297.06px image strip whose
//! nine-node window runs asymmetrically over -2..=6. Hosts may override any
//! subset from JSON; omitted fields keep their defaults.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::wheel::DEFAULT_WHEEL_THRESHOLD;
use crate::window::{Lane, WindowBounds};

/// Delay between a step and its settle pass, matching the CSS transition.
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;

/// Project-name lane settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Container height; the focused row is centered in it.
    pub viewport_height: f64,
    pub item_height: f64,
    pub window: WindowBounds,
    /// Rows within this distance of the focus (excluding it) are dimmed
    /// rather than hidden.
    pub dim_radius: u32,
    pub focus_opacity: f64,
    pub dim_opacity: f64,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            viewport_height: 170.0,
            item_height: 34.0,
            window: WindowBounds::new(-4, 4),
            dim_radius: 2,
            focus_opacity: 1.0,
            dim_opacity: 0.3,
        }
    }
}

/// Image lane settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GalleryConfig {
    pub image_height: f64,
    pub window: WindowBounds,
    /// Offsets rendered opaque; the rest of the window is staged invisible.
    pub visible: WindowBounds,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            image_height: 297.06,
            window: WindowBounds::new(-2, 6),
            visible: WindowBounds::new(-2, 2),
        }
    }
}

/// Full carousel configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub projects: Vec<String>,
    /// Image identifiers, rendered as CSS classes on image nodes.
    pub images: Vec<String>,
    pub initial_project_index: usize,
    pub initial_image_index: usize,
    pub nav: NavConfig,
    pub gallery: GalleryConfig,
    pub wheel_threshold: f64,
    pub settle_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            projects: ["BLUEFORCE", "GOLDFISH", "CISCO", "SAP", "SCOPESTYLE"]
                .map(String::from)
                .to_vec(),
            images: (1..=5).map(|i| format!("project-image-{i}")).collect(),
            initial_project_index: 2,
            initial_image_index: 0,
            nav: NavConfig::default(),
            gallery: GalleryConfig::default(),
            wheel_threshold: DEFAULT_WHEEL_THRESHOLD,
            settle_delay_ms: DEFAULT_SETTLE_DELAY_MS,
        }
    }
}

impl CarouselConfig {
    /// Decode and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, CarouselError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Check every invariant the carousel relies on.
    pub fn validate(&self) -> Result<(), CarouselError> {
        check_list(Lane::Nav, &self.projects, self.initial_project_index)?;
        check_list(Lane::Gallery, &self.images, self.initial_image_index)?;
        check_window(Lane::Nav, self.nav.window)?;
        check_window(Lane::Gallery, self.gallery.window)?;
        if self.gallery.visible.is_empty() {
            return Err(CarouselError::InvalidBounds {
                lane: Lane::Gallery,
                min: self.gallery.visible.min,
                max: self.gallery.visible.max,
            });
        }
        check_dimension("nav.viewport_height", self.nav.viewport_height)?;
        check_dimension("nav.item_height", self.nav.item_height)?;
        check_dimension("gallery.image_height", self.gallery.image_height)?;
        check_opacity("nav.focus_opacity", self.nav.focus_opacity)?;
        check_opacity("nav.dim_opacity", self.nav.dim_opacity)?;
        if !self.wheel_threshold.is_finite() || self.wheel_threshold <= 0.0 {
            return Err(CarouselError::InvalidThreshold(self.wheel_threshold));
        }
        Ok(())
    }
}

fn check_list(lane: Lane, items: &[String], cursor: usize) -> Result<(), CarouselError> {
    if items.is_empty() {
        return Err(CarouselError::EmptyList { lane });
    }
    if cursor >= items.len() {
        return Err(CarouselError::CursorOutOfRange {
            lane,
            index: cursor,
            len: items.len(),
        });
    }
    Ok(())
}

fn check_window(lane: Lane, bounds: WindowBounds) -> Result<(), CarouselError> {
    if bounds.is_window() {
        Ok(())
    } else {
        Err(CarouselError::InvalidBounds {
            lane,
            min: bounds.min,
            max: bounds.max,
        })
    }
}

fn check_dimension(name: &'static str, value: f64) -> Result<(), CarouselError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(CarouselError::InvalidDimension { name, value })
    }
}

fn check_opacity(name: &'static str, value: f64) -> Result<(), CarouselError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(CarouselError::InvalidOpacity { name, value })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::CarouselConfig;
    use crate::error::CarouselError;
    use crate::window::{Lane, WindowBounds};

    #[test]
    fn defaults_are_valid() {
        let config = CarouselConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.projects[config.initial_project_index], "CISCO");
        assert_eq!(config.images[4], "project-image-5");
        assert_eq!(config.settle_delay().as_millis(), 300);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CarouselConfig::from_json(
            r#"{"projects":["A","B"],"initial_project_index":1,"nav":{"item_height":40}}"#,
        )
        .expect("valid config");
        assert_eq!(config.projects, vec!["A".to_owned(), "B".to_owned()]);
        assert_eq!(config.nav.item_height, 40.0);
        assert_eq!(config.nav.viewport_height, 170.0);
        assert_eq!(config.gallery.window, WindowBounds::new(-2, 6));
    }

    #[test]
    fn empty_list_is_rejected() {
        let err = CarouselConfig::from_json(r#"{"images":[]}"#).unwrap_err();
        assert_eq!(err, CarouselError::EmptyList { lane: Lane::Gallery });
    }

    #[test]
    fn cursor_outside_list_is_rejected() {
        let err = CarouselConfig::from_json(r#"{"initial_project_index":5}"#).unwrap_err();
        assert_eq!(
            err,
            CarouselError::CursorOutOfRange {
                lane: Lane::Nav,
                index: 5,
                len: 5,
            }
        );
    }

    #[test]
    fn window_must_contain_focus() {
        let err =
            CarouselConfig::from_json(r#"{"gallery":{"window":{"min":1,"max":6}}}"#).unwrap_err();
        assert_eq!(
            err,
            CarouselError::InvalidBounds {
                lane: Lane::Gallery,
                min: 1,
                max: 6,
            }
        );
    }

    #[test]
    fn oversized_window_is_rejected() {
        let err = CarouselConfig::from_json(
            r#"{"nav":{"window":{"min":-2147483648,"max":2147483647}}}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            CarouselError::InvalidBounds {
                lane: Lane::Nav,
                min: i32::MIN,
                max: i32::MAX,
            }
        );

        let mut config = CarouselConfig::default();
        config.gallery.window = WindowBounds::new(-2, 62);
        assert!(matches!(
            config.validate(),
            Err(CarouselError::InvalidBounds {
                lane: Lane::Gallery,
                ..
            })
        ));
        config.gallery.window = WindowBounds::new(-2, 61);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        let mut config = CarouselConfig::default();
        config.nav.item_height = 0.0;
        assert!(matches!(
            config.validate(),
            Err(CarouselError::InvalidDimension {
                name: "nav.item_height",
                ..
            })
        ));

        let mut config = CarouselConfig::default();
        config.nav.dim_opacity = 1.5;
        assert!(matches!(
            config.validate(),
            Err(CarouselError::InvalidOpacity { .. })
        ));

        let mut config = CarouselConfig::default();
        config.wheel_threshold = f64::NAN;
        assert!(matches!(
            config.validate(),
            Err(CarouselError::InvalidThreshold(_))
        ));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            CarouselConfig::from_json("{"),
            Err(CarouselError::Config(_))
        ));
    }
}
