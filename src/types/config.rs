//! Externally supplied tuning constants.
//!
//! None of these are computed by the engine. They arrive from JavaScript via
//! `serde-wasm-bindgen` or from a JSON file in the CLI, and every field has a
//! default so partial objects are accepted.

use serde::{Deserialize, Serialize};

use super::Orientation;
use crate::error::{GalleryError, Result};

/// Span sizing parameters for one orientation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpanRule {
    /// Span given to an image whose ratio equals `reference_aspect`
    pub reference_span: u32,
    /// Aspect ratio (width / height) the reference span was tuned for
    pub reference_aspect: f64,
    pub min_span: u32,
    pub max_span: u32,
    /// Span used while the aspect ratio is unknown
    pub default_span: u32,
}

impl SpanRule {
    pub const PORTRAIT: Self = Self {
        reference_span: 32,
        reference_aspect: 0.67,
        min_span: 24,
        max_span: 40,
        default_span: 32,
    };

    pub const LANDSCAPE: Self = Self {
        reference_span: 16,
        reference_aspect: 1.5,
        min_span: 12,
        max_span: 20,
        default_span: 16,
    };
}

/// Span rules for both orientation classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpanRules {
    pub portrait: SpanRule,
    pub landscape: SpanRule,
}

impl Default for SpanRules {
    fn default() -> Self {
        Self {
            portrait: SpanRule::PORTRAIT,
            landscape: SpanRule::LANDSCAPE,
        }
    }
}

impl SpanRules {
    pub fn rule(&self, orientation: Orientation) -> &SpanRule {
        match orientation {
            Orientation::Portrait => &self.portrait,
            Orientation::Landscape => &self.landscape,
        }
    }
}

/// Column count used from `min_width` upwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnBreakpoint {
    pub min_width: f64,
    pub columns: usize,
}

/// Gallery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GalleryConfig {
    /// Viewport width (px) below which the nav strip scrolls horizontally
    pub mobile_breakpoint: f64,
    /// Quiet window (ms) before header height is re-measured
    pub resize_debounce_ms: u32,
    /// Delay (ms) before the first header measurement after mount
    pub initial_measure_delay_ms: u32,
    /// Ascending breakpoints mapping viewport width to column count
    pub column_breakpoints: Vec<ColumnBreakpoint>,
    pub span_rules: SpanRules,
    /// Header height used when it cannot be measured
    pub fallback_header_height: f64,
    /// Nav height used when it cannot be measured
    pub fallback_nav_height: f64,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            mobile_breakpoint: 768.0,
            resize_debounce_ms: 150,
            initial_measure_delay_ms: 100,
            column_breakpoints: vec![
                ColumnBreakpoint {
                    min_width: 0.0,
                    columns: 1,
                },
                ColumnBreakpoint {
                    min_width: 640.0,
                    columns: 2,
                },
                ColumnBreakpoint {
                    min_width: 1024.0,
                    columns: 3,
                },
                ColumnBreakpoint {
                    min_width: 1440.0,
                    columns: 4,
                },
            ],
            span_rules: SpanRules::default(),
            fallback_header_height: 0.0,
            fallback_nav_height: 0.0,
        }
    }
}

impl GalleryConfig {
    /// Parse a configuration from JSON, then validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is internally consistent.
    ///
    /// # Errors
    /// Returns `GalleryError::Config` describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.column_breakpoints.is_empty() {
            return Err(GalleryError::Config(
                "columnBreakpoints must not be empty".into(),
            ));
        }
        if self.column_breakpoints.iter().any(|bp| bp.columns == 0) {
            return Err(GalleryError::Config(
                "columnBreakpoints entries need at least one column".into(),
            ));
        }
        if self
            .column_breakpoints
            .windows(2)
            .any(|w| matches!(w, [a, b] if a.min_width >= b.min_width))
        {
            return Err(GalleryError::Config(
                "columnBreakpoints must be sorted by ascending minWidth".into(),
            ));
        }
        for (name, rule) in [
            ("portrait", &self.span_rules.portrait),
            ("landscape", &self.span_rules.landscape),
        ] {
            if rule.min_span == 0 || rule.min_span > rule.max_span {
                return Err(GalleryError::Config(format!(
                    "{name} span bounds [{}, {}] are invalid",
                    rule.min_span, rule.max_span
                )));
            }
            if !(rule.reference_aspect.is_finite() && rule.reference_aspect > 0.0) {
                return Err(GalleryError::Config(format!(
                    "{name} reference aspect must be positive"
                )));
            }
            if rule.default_span == 0 {
                return Err(GalleryError::Config(format!(
                    "{name} default span must be positive"
                )));
            }
        }
        if self.mobile_breakpoint < 0.0 {
            return Err(GalleryError::Config(
                "mobileBreakpoint must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Target column count for a viewport width.
    ///
    /// Picks the last breakpoint whose `min_width` is at or below `width`;
    /// widths below the first breakpoint use the first entry.
    pub fn columns_for_width(&self, width: f64) -> usize {
        let mut columns = self.column_breakpoints.first().map_or(1, |bp| bp.columns);
        for bp in &self.column_breakpoints {
            if bp.min_width <= width {
                columns = bp.columns;
            }
        }
        columns.max(1)
    }
}
