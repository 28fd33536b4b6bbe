//! Quiz models

use serde::{Deserialize, Serialize};

/// One quiz as returned by /api/quizzes/. Attached to a course and
/// optionally a specific lesson.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quiz {
    pub id: u64,
    pub title: String,
    pub course: Option<serde_json::Value>,
    pub lesson: Option<serde_json::Value>,
    pub created_at: Option<String>,
    #[serde(default)]
    pub questions: Option<Vec<Question>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    pub text: String,
    #[serde(default)]
    pub answers: Option<Vec<Answer>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub id: u64,
    pub text: String,
    /// Only present for teachers/admins; student-facing serializers omit it.
    #[serde(default)]
    pub is_correct: Option<bool>,
}

/// A completed attempt from /api/quizzes/history/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: u64,
    pub quiz: Option<serde_json::Value>,
    pub score: i64,
    pub completed_at: Option<String>,
}

impl QuizResult {
    pub fn quiz_title(&self) -> String {
        match &self.quiz {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Object(map)) => map
                .get("title")
                .and_then(|v| v.as_str())
                .unwrap_or("(unknown quiz)")
                .to_string(),
            Some(serde_json::Value::Number(n)) => format!("quiz #{}", n),
            _ => "(unknown quiz)".to_string(),
        }
    }
}
