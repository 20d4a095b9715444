use serde::{Deserialize, Serialize};

/// A user action the gallery forwards to an external service.
///
/// The engine never acts on these itself; they are handed to the intent
/// callback registered by the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum GalleryIntent {
    /// Open the full-size view of an image
    SelectImage { id: String },
    /// Flip the favourite status of an image
    ToggleFavorite { id: String },
    /// Download the original file
    Download { id: String },
    /// Switch the active category; the host refetches and replaces the items
    SelectCategory { label: String },
}
