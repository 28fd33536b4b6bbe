//! Media content models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Audio,
    Video,
    Image,
    Document,
}

impl MediaType {
    /// Default MIME type for uploads of this kind, used when the file
    /// extension gives no better answer.
    pub fn fallback_mime(&self) -> &'static str {
        match self {
            MediaType::Audio => "audio/mpeg",
            MediaType::Video => "video/mp4",
            MediaType::Image => "image/jpeg",
            MediaType::Document => "application/pdf",
        }
    }
}

/// One media item as returned by /api/media/media/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub media_type: Option<MediaType>,
    pub file: Option<String>,
    pub uploaded_by: Option<serde_json::Value>,
    pub uploaded_at: Option<String>,
    #[serde(default)]
    pub approved: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub views_count: Option<u64>,
    #[serde(default)]
    pub tags: Option<serde_json::Value>,
}

impl MediaItem {
    /// Uploader display string; the backend serializes this field either as
    /// a plain username or as a nested user object depending on the view.
    pub fn uploader(&self) -> String {
        match &self.uploaded_by {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Object(map)) => map
                .get("username")
                .or_else(|| map.get("email"))
                .and_then(|v| v.as_str())
                .unwrap_or("(unknown)")
                .to_string(),
            _ => "(unknown)".to_string(),
        }
    }
}

/// Dashboard totals from /api/media/statistics/.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralStats {
    pub total_media: Option<u64>,
    pub total_views: Option<u64>,
    pub total_users: Option<u64>,
    #[serde(default)]
    pub media_by_type: Option<serde_json::Value>,
}
