//! Profile endpoints (/api/auth/me/, /api/auth/profile/)

use anyhow::{Context, Result};
use serde_json::json;
use std::path::Path;

use super::request::{ApiRequest, MultipartForm};
use super::{ApiError, YonnaClient};
use crate::models::User;

/// Fetch the current user, preferring /me/ and falling back to /profile/
/// on backends that never grew the /me/ view.
async fn current_user(client: &YonnaClient) -> Result<User, ApiError> {
    match client.get_json("/api/auth/me/").await {
        Ok(user) => Ok(user),
        Err(ApiError::Validation { status: 404, .. }) => {
            tracing::debug!("/api/auth/me/ not available, using /api/auth/profile/");
            client.get_json("/api/auth/profile/").await
        }
        Err(e) => Err(e),
    }
}

/// Fetch and display current user info.
pub async fn whoami() -> Result<()> {
    let client = YonnaClient::new()?;
    let me = current_user(&client).await?;

    println!();
    println!("Name:  {}", me.display_name());
    println!("Email: {}", me.email);
    if let Some(role) = &me.role {
        println!("Role:  {:?}", role);
    }
    println!("ID:    {}", me.id);
    Ok(())
}

/// Fetch and display the full profile.
pub async fn show_profile() -> Result<()> {
    let client = YonnaClient::new()?;
    let user: User = client.get_json("/api/auth/profile/").await?;

    println!();
    println!("Name:    {}", user.display_name());
    println!("Email:   {}", user.email);
    if let Some(role) = &user.role {
        println!("Role:    {:?}", role);
    }
    if let Some(level) = &user.level {
        println!("Level:   {:?}", level);
    }
    if let Some(xp) = user.xp {
        println!("XP:      {}", xp);
    }
    if let Some(bio) = &user.bio {
        if !bio.is_empty() {
            println!("Bio:     {}", bio);
        }
    }
    if let Some(joined) = &user.date_joined {
        println!("Joined:  {}", joined);
    }
    Ok(())
}

/// PATCH only the provided fields.
pub async fn edit_profile(
    first_name: Option<String>,
    last_name: Option<String>,
    bio: Option<String>,
    level: Option<String>,
) -> Result<()> {
    let mut body = serde_json::Map::new();
    if let Some(v) = first_name {
        body.insert("first_name".into(), json!(v));
    }
    if let Some(v) = last_name {
        body.insert("last_name".into(), json!(v));
    }
    if let Some(v) = bio {
        body.insert("bio".into(), json!(v));
    }
    if let Some(v) = level {
        body.insert("level".into(), json!(v));
    }
    if body.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let client = YonnaClient::new()?;
    let user: User = client
        .patch_json("/api/auth/profile/", body.into())
        .await
        .context("Profile update failed")?;
    println!("Profile updated for {}.", user.display_name());
    Ok(())
}

/// Upload an avatar image as multipart form data.
pub async fn upload_avatar(path: &Path) -> Result<()> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("avatar")
        .to_string();
    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    };

    let form = MultipartForm::new().file("avatar", file_name, mime, bytes);

    let client = YonnaClient::new()?;
    client
        .send(ApiRequest::post("/api/auth/upload-avatar/").multipart(form))
        .await
        .context("Avatar upload failed")?;
    println!("Avatar uploaded.");
    Ok(())
}
