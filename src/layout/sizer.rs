//! Aspect ratio to grid row-span conversion.
//!
//! A span is a whole number of row tracks so the renderer can use a grid
//! `span N` directly instead of measuring each image after it loads.

use crate::types::{Orientation, SpanRule, SpanRules};

/// Row span for an item using the default span rules.
pub fn span_for(orientation: Orientation, aspect_ratio: Option<f64>) -> u32 {
    SpanRules::default().span_for(orientation, aspect_ratio)
}

impl SpanRule {
    /// Row span for an image of this orientation class.
    ///
    /// Unknown, zero, negative or non-finite ratios fall back to
    /// `default_span`. Known ratios scale inversely with the reference aspect
    /// and are clamped to `[min_span, max_span]`.
    // The value is clamped to the u32 span bounds before the cast.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn span(&self, aspect_ratio: Option<f64>) -> u32 {
        let Some(ratio) = aspect_ratio.filter(|r| r.is_finite() && *r > 0.0) else {
            return self.default_span;
        };
        let raw = f64::from(self.reference_span) * self.reference_aspect / ratio;
        let clamped = raw.clamp(f64::from(self.min_span), f64::from(self.max_span));
        clamped.round() as u32
    }
}

impl SpanRules {
    pub fn span_for(&self, orientation: Orientation, aspect_ratio: Option<f64>) -> u32 {
        self.rule(orientation).span(aspect_ratio)
    }
}
