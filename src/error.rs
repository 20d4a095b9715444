//! Structured error types for galleryview.
//!
//! Almost everything in the layout engine degrades instead of failing; the
//! variants here cover caller programming errors and bad external input.

/// All errors that can occur in galleryview layout and binding code.
#[derive(Debug, thiserror::Error)]
pub enum GalleryError {
    /// A packer was asked for zero columns.
    #[error("Column count must be at least 1")]
    InvalidColumnCount,

    /// A category label that the category collaborator never supplied.
    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    /// An item id that is not part of the current item set.
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// Invalid configuration values.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// JSON (de)serialization error.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failure while talking to the DOM or converting JS values.
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GalleryError>;

#[cfg(target_arch = "wasm32")]
impl From<GalleryError> for wasm_bindgen::JsValue {
    fn from(e: GalleryError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for GalleryError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Dom(e.to_string())
    }
}
