//! Engine configuration.
//!
//! Breakpoints for viewport classification and the few constants the scroll
//! controller and draw emission need. Hosts usually build this in code; it
//! also deserializes from any serde format.

use serde::{Deserialize, Serialize};

use crate::types::ViewportClass;

// =============================================================================
// SCROLL CONSTANTS
// =============================================================================

/// Default scroll amount per wheel notch (logical units).
pub const LINE_SCROLL: f32 = 16.0;

/// Default scroll amount for page up/down (90% of viewport).
pub const PAGE_SCROLL_FACTOR: f32 = 0.9;

/// Default scrollbar thumb thickness.
pub const SCROLLBAR_THICKNESS: f32 = 6.0;

/// Default minimum thumb length so tiny thumbs stay grabbable.
pub const MIN_THUMB_LENGTH: f32 = 12.0;

// =============================================================================
// Breakpoints
// =============================================================================

/// A named responsive breakpoint, active while the viewport width is at most `max_width`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    pub max_width: f32,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, max_width: f32) -> Self {
        Self {
            name: name.into(),
            max_width,
        }
    }
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Configuration for a [`Scene`](crate::pipeline::Scene).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Responsive breakpoints; the narrowest matching one wins.
    pub breakpoints: Vec<Breakpoint>,
    /// Class used when no breakpoint matches.
    pub default_class: String,
    /// Units scrolled per wheel notch by [`Scene::scroll_lines`](crate::pipeline::Scene::scroll_lines).
    pub line_scroll: f32,
    /// Fraction of the viewport scrolled per page.
    pub page_scroll_factor: f32,
    /// Thickness of emitted scrollbar thumbs.
    pub scrollbar_thickness: f32,
    /// Minimum length of emitted scrollbar thumbs.
    pub min_thumb_length: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            breakpoints: vec![Breakpoint::new(ViewportClass::MOBILE, 600.0)],
            default_class: ViewportClass::DEFAULT.to_string(),
            line_scroll: LINE_SCROLL,
            page_scroll_factor: PAGE_SCROLL_FACTOR,
            scrollbar_thickness: SCROLLBAR_THICKNESS,
            min_thumb_length: MIN_THUMB_LENGTH,
        }
    }
}

impl EngineConfig {
    /// Classify a viewport width.
    ///
    /// Picks the breakpoint with the smallest `max_width` that still covers
    /// `width`, falling back to `default_class`.
    pub fn classify(&self, width: f32) -> ViewportClass {
        self.breakpoints
            .iter()
            .filter(|bp| width <= bp.max_width)
            .min_by(|a, b| a.max_width.total_cmp(&b.max_width))
            .map_or_else(
                || ViewportClass::new(self.default_class.clone()),
                |bp| ViewportClass::new(bp.name.clone()),
            )
    }

    /// Replace the breakpoints.
    pub fn with_breakpoints(mut self, breakpoints: Vec<Breakpoint>) -> Self {
        self.breakpoints = breakpoints;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_classification() {
        let config = EngineConfig::default();
        assert_eq!(config.classify(375.0).as_str(), "mobile");
        assert_eq!(config.classify(600.0).as_str(), "mobile");
        assert_eq!(config.classify(1024.0).as_str(), "default");
    }

    #[test]
    fn test_narrowest_breakpoint_wins() {
        let config = EngineConfig::default().with_breakpoints(vec![
            Breakpoint::new("tablet", 1024.0),
            Breakpoint::new("mobile", 600.0),
        ]);
        assert_eq!(config.classify(320.0).as_str(), "mobile");
        assert_eq!(config.classify(800.0).as_str(), "tablet");
        assert_eq!(config.classify(1920.0).as_str(), "default");
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: EngineConfig = serde_json::from_str(
            r#"{ "breakpoints": [{ "name": "phone", "max_width": 480 }], "line_scroll": 20 }"#,
        )
        .unwrap();

        assert_eq!(config.classify(400.0).as_str(), "phone");
        assert_eq!(config.line_scroll, 20.0);
        assert_eq!(config.default_class, "default");
        assert!((config.page_scroll_factor - 0.9).abs() < 0.001);
    }
}
