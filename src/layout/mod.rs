//! Layout engine for sizing and packing gallery items.
//!
//! This module handles:
//! - Converting aspect ratios into grid row spans
//! - Packing items into balanced masonry columns
//! - Targeted span updates when an aspect ratio arrives late

mod packer;
mod sizer;

pub use packer::{assign_columns, pack, ColumnLayout};
pub use sizer::span_for;
