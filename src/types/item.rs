use serde::{Deserialize, Serialize};

/// Orientation class of a gallery image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Taller than wide (default, matches most phone photos)
    #[default]
    Portrait,
    /// Wider than tall
    Landscape,
}

/// One image handed to the layout engine by the item source.
///
/// The payload is opaque to layout and is passed through to the render
/// snapshot untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryItem {
    pub id: String,
    /// Intrinsic width / height, `None` until the image has been measured.
    #[serde(default)]
    pub aspect_ratio: Option<f64>,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl GalleryItem {
    /// Create an item with an unknown aspect ratio and an empty payload.
    pub fn new(id: impl Into<String>, orientation: Orientation) -> Self {
        Self {
            id: id.into(),
            aspect_ratio: None,
            orientation,
            payload: serde_json::Value::Null,
        }
    }

    /// Builder-style setter for the aspect ratio.
    #[must_use]
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = Some(aspect_ratio);
        self
    }

    /// Builder-style setter for the payload.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let item: GalleryItem = serde_json::from_str(r#"{"id":"a"}"#).unwrap();
        assert_eq!(item.id, "a");
        assert_eq!(item.aspect_ratio, None);
        assert_eq!(item.orientation, Orientation::Portrait);
        assert!(item.payload.is_null());
    }
}
