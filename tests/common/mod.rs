//! Shared builders for gallery layout tests.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic,
    clippy::cast_possible_truncation,
    clippy::cast_lossless
)]

use galleryview::viewer::LayoutProbe;
use galleryview::{GalleryItem, Orientation};

pub fn portrait(id: &str, ratio: Option<f64>) -> GalleryItem {
    let item = GalleryItem::new(id, Orientation::Portrait);
    match ratio {
        Some(r) => item.with_aspect_ratio(r),
        None => item,
    }
}

pub fn landscape(id: &str, ratio: Option<f64>) -> GalleryItem {
    let item = GalleryItem::new(id, Orientation::Landscape);
    match ratio {
        Some(r) => item.with_aspect_ratio(r),
        None => item,
    }
}

/// Deterministic pseudo-random item list (64-bit LCG).
pub fn mixed_items(count: usize, seed: u64) -> Vec<GalleryItem> {
    let mut state = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
    (0..count)
        .map(|i| {
            state = state
                .wrapping_mul(6_364_136_223_846_793_005)
                .wrapping_add(1_442_695_040_888_963_407);
            let bits = (state >> 33) as u32;
            let id = format!("img-{i}");
            let ratio = match bits % 4 {
                0 => None,
                n => Some(0.3 + f64::from(bits % 1000) / 400.0 * f64::from(n)),
            };
            if bits % 3 == 0 {
                portrait(&id, ratio.map(|r| r.min(0.99)))
            } else {
                landscape(&id, ratio.map(|r| r.max(1.0)))
            }
        })
        .collect()
}

/// A probe with fixed header/nav geometry.
#[derive(Debug, Clone, Copy)]
pub struct FixedProbe {
    pub header: Option<f64>,
    pub nav: Option<f64>,
    pub nav_top: Option<f64>,
}

impl FixedProbe {
    pub fn new(header: f64, nav: f64, nav_top: f64) -> Self {
        Self {
            header: Some(header),
            nav: Some(nav),
            nav_top: Some(nav_top),
        }
    }
}

impl LayoutProbe for FixedProbe {
    fn header_height(&self) -> Option<f64> {
        self.header
    }

    fn nav_height(&self) -> Option<f64> {
        self.nav
    }

    fn nav_top(&self) -> Option<f64> {
        self.nav_top
    }
}
