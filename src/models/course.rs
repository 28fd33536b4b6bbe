//! Course models

use serde::{Deserialize, Serialize};

/// One course as returned by /api/courses/. Taught by a "sabedor"
/// (teacher); availability is filtered by the learner's level server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub level: Option<String>,
    pub teacher: Option<serde_json::Value>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub lessons: Option<Vec<Lesson>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lesson {
    pub id: u64,
    pub title: String,
    pub description: Option<String>,
    pub order: Option<u32>,
}

impl Course {
    /// Teacher display string; serialized as a username or a nested object
    /// depending on the view, like media uploaders.
    pub fn teacher_name(&self) -> String {
        match &self.teacher {
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
