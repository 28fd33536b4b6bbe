//! API client module for the Yonna Akademia backend

pub mod client;
mod courses;
pub mod error;
mod media;
mod profile;
mod progress;
mod quizzes;
pub mod request;
mod stats;
mod users;

pub use client::YonnaClient;
pub use error::ApiError;

use anyhow::Result;

/// Show current user info
pub async fn whoami() -> Result<()> {
    profile::whoami().await
}

/// Show the full profile
pub async fn show_profile() -> Result<()> {
    profile::show_profile().await
}

/// Update profile fields (only the provided ones are sent)
pub async fn edit_profile(
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    level: Option<String>,
) -> Result<()> {
    profile::edit_profile(first_name, last_name, bio, level).await
}

/// Upload a profile avatar image
pub async fn upload_avatar(path: &std::path::Path) -> Result<()> {
    profile::upload_avatar(path).await
}

/// List media content, optionally filtered
pub async fn list_media(
    media_type: Option<String>,
    search: Option<String>,
    limit: usize,
) -> Result<()> {
    media::list_media(media_type, search, limit).await
}

/// List the current user's uploads
pub async fn my_uploads() -> Result<()> {
    media::my_uploads().await
}

/// Show one media item
pub async fn show_media(id: u64) -> Result<()> {
    media::show_media(id).await
}

/// Upload a new media file
pub async fn upload_media(
    path: &std::path::Path,
    title: &str,
    description: Option<&str>,
    media_type: &str,
    tags: &[String],
) -> Result<()> {
    media::upload_media(path, title, description, media_type, tags).await
}

/// Update title/description of a media item
pub async fn update_media(
    id: u64,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    media::update_media(id, title, description).await
}

/// Delete a media item
pub async fn delete_media(id: u64) -> Result<()> {
    media::delete_media(id).await
}

/// Approve a pending media item (admin)
pub async fn approve_media(id: u64) -> Result<()> {
    media::approve_media(id).await
}

/// Feature a media item on the landing surface (admin)
pub async fn feature_media(id: u64) -> Result<()> {
    media::feature_media(id).await
}

/// Record a view of a media item
pub async fn record_view(id: u64, duration: u64) -> Result<()> {
    media::record_view(id, duration).await
}

/// List courses available for the learner's level
pub async fn list_courses() -> Result<()> {
    courses::list_courses().await
}

/// Show one course with its lessons
pub async fn show_course(id: u64) -> Result<()> {
    courses::show_course(id).await
}

/// Create a course (teachers only)
pub async fn create_course(
    title: &str,
    description: Option<&str>,
    level: Option<&str>,
) -> Result<()> {
    courses::create_course(title, description, level).await
}

/// Enroll in a course
pub async fn enroll_course(id: u64) -> Result<()> {
    courses::enroll(id).await
}

/// List available quizzes
pub async fn list_quizzes() -> Result<()> {
    quizzes::list_quizzes().await
}

/// Show one quiz with questions
pub async fn show_quiz(id: u64) -> Result<()> {
    quizzes::show_quiz(id).await
}

/// Submit a quiz score
pub async fn submit_quiz(id: u64, score: i64) -> Result<()> {
    quizzes::submit_attempt(id, score).await
}

/// Show quiz history
pub async fn quiz_history() -> Result<()> {
    quizzes::quiz_history().await
}

/// Show learning progress
pub async fn show_progress(course_id: Option<u64>, stats: bool) -> Result<()> {
    progress::show_progress(course_id, stats).await
}

/// List all users (admin)
pub async fn list_users() -> Result<()> {
    users::list_users().await
}

/// Show platform statistics
pub async fn show_stats(engagement: bool) -> Result<()> {
    stats::show_stats(engagement).await
}
