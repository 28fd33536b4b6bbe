//! User-related models

use serde::{Deserialize, Serialize};

/// Platform role. Teachers are "sabedores" (knowledge keepers) in the
/// Wayuu community terminology the backend uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

/// Learner level, advanced by accumulating XP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

/// User profile as returned by /api/auth/me/ and /api/auth/profile/.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<Role>,
    pub level: Option<Level>,
    pub xp: Option<i64>,
    pub bio: Option<String>,
    pub avatar: Option<String>,
    pub date_joined: Option<String>,
}

impl User {
    /// Human-readable name: full name when set, else username, else email.
    pub fn display_name(&self) -> String {
        let full = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let full = full.trim();
        if !full.is_empty() {
            return full.to_string();
        }
        self.username
            .clone()
            .unwrap_or_else(|| self.email.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_prefers_full_name() {
        let user: User = serde_json::from_str(
            r#"{"id": 7, "email": "ana@yonna.co", "first_name": "Ana", "last_name": "Epieyu",
                "role": "teacher", "level": "advanced", "xp": 1200}"#,
        )
        .unwrap();
        assert_eq!(user.display_name(), "Ana Epieyu");
        assert!(matches!(user.role, Some(Role::Teacher)));
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let user: User =
            serde_json::from_str(r#"{"id": 1, "email": "x@yonna.co"}"#).unwrap();
        assert_eq!(user.display_name(), "x@yonna.co");
    }
}
