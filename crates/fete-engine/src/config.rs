use serde::{Deserialize, Serialize};

/// The configuration document describing one presentation.
/// Produced by the external setup form, parsed from JSON once at init,
/// and read-only afterwards.
///
/// Every collection-bearing field tolerates absence in the JSON: a missing
/// array deserializes to an empty one and renders an empty panel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationConfig {
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub welcome_message: String,
    #[serde(default)]
    pub birthday_message: String,
    #[serde(default)]
    pub bento_items: Vec<BentoItem>,
    #[serde(default)]
    pub gallery_title: String,
    #[serde(default)]
    pub photos: Vec<Photo>,
    #[serde(default)]
    pub videos: Vec<Video>,
    #[serde(default)]
    pub gallery_closing: String,
    #[serde(default)]
    pub wish_message: String,
    #[serde(default)]
    pub wish_description: String,
    #[serde(default)]
    pub final_message: String,
    #[serde(default)]
    pub playlist: Vec<Track>,
    #[serde(default)]
    pub letter: String,
    /// Authoring metadata, only used to re-seed the external editing form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memories: Option<String>,
}

/// One tile of the "things I adore" grid. Display order = insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BentoItem {
    pub icon: String,
    pub title: String,
    pub text: String,
}

/// A still image in the gallery strip.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Photo {
    pub url: String,
    #[serde(default)]
    pub caption: String,
}

/// A clip in the video reel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Video {
    #[serde(default)]
    pub caption: String,
    pub source: VideoSource,
}

/// Where a video comes from. The tag carries exactly the field that kind
/// needs, so an id/url mismatch is unrepresentable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum VideoSource {
    /// Streaming embed, provider A.
    Stream { id: String },
    /// Streaming embed, provider B (drive-hosted).
    Drive { id: String },
    /// Direct file URL.
    File { url: String },
}

/// One streaming-audio track of the playlist. The first entry, if present,
/// is the initially loaded track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    pub id: String,
}

impl PresentationConfig {
    /// Parse a configuration document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
