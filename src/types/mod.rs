//! Data types for the gallery layout engine.

mod config;
mod intent;
mod item;

pub use config::*;
pub use intent::*;
pub use item::*;
