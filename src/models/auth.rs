//! Auth endpoint response shapes

use serde::Deserialize;

/// Response from POST /api/auth/login/ (and /api/auth/google/): the token
/// pair plus the user fields the backend inlines alongside it.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    pub refresh: String,
    pub id: Option<u64>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub level: Option<String>,
    pub xp: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Response from POST /api/auth/register/. Some backend versions inline the
/// token pair, others require a follow-up login.
#[derive(Debug, Deserialize)]
pub struct RegisterResponse {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub id: Option<u64>,
    pub email: Option<String>,
}
