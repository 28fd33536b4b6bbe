//! Media content endpoints (/api/media/media/)

use anyhow::{bail, Context, Result};
use serde_json::json;
use std::path::Path;

use super::request::{ApiRequest, MultipartForm};
use super::YonnaClient;
use crate::models::{ListResponse, MediaItem, MediaType};

fn media_path(id: u64, action: Option<&str>) -> String {
    match action {
        Some(action) => format!("/api/media/media/{}/{}/", id, action),
        None => format!("/api/media/media/{}/", id),
    }
}

fn print_item(item: &MediaItem) {
    println!("{} (#{})", item.title, item.id);
    if let Some(t) = &item.media_type {
        println!("  Type: {:?}", t);
    }
    println!("  By:   {}", item.uploader());
    if let Some(at) = &item.uploaded_at {
        println!("  At:   {}", at);
    }
    if let Some(desc) = &item.description {
        if !desc.trim().is_empty() {
            println!("  {}", desc.trim());
        }
    }
    if item.approved == Some(false) {
        println!("  [pending approval]");
    }
    if item.featured == Some(true) {
        println!("  [featured]");
    }
    if let Some(views) = item.views_count {
        println!("  Views: {}", views);
    }
}

/// List media, optionally filtered by type and search text (prints to stdout).
pub async fn list_media(
    media_type: Option<String>,
    search: Option<String>,
    limit: usize,
) -> Result<()> {
    let client = YonnaClient::new()?;

    let mut req = ApiRequest::get("/api/media/media/");
    if let Some(t) = media_type {
        req = req.query("media_type", t);
    }
    if let Some(s) = search {
        req = req.query("search", s);
    }

    let items = client
        .fetch_json::<ListResponse<MediaItem>>(req)
        .await?
        .into_results();

    println!("\nMedia Content:");
    println!("{:-<60}", "");
    if items.is_empty() {
        println!("  (no content found)");
        return Ok(());
    }
    for item in items.iter().take(limit) {
        print_item(item);
        println!();
    }
    Ok(())
}

/// List the current user's uploads.
pub async fn my_uploads() -> Result<()> {
    let client = YonnaClient::new()?;
    let items = client
        .get_json::<ListResponse<MediaItem>>("/api/media/media/my_uploads/")
        .await?
        .into_results();

    println!("\nMy Uploads:");
    println!("{:-<60}", "");
    if items.is_empty() {
        println!("  (no uploads yet)");
        return Ok(());
    }
    for item in &items {
        print_item(item);
        println!();
    }
    Ok(())
}

/// Show one media item by ID.
pub async fn show_media(id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    let item: MediaItem = client.get_json(&media_path(id, None)).await?;
    println!();
    print_item(&item);
    if let Some(file) = &item.file {
        println!("  File: {}", file);
    }
    Ok(())
}

/// Upload a media file. Tags are sent as a JSON-encoded array field, the
/// format the backend's upload view expects.
pub async fn upload_media(
    path: &Path,
    title: &str,
    description: Option<&str>,
    media_type: &str,
    tags: &[String],
) -> Result<()> {
    let kind: MediaType = serde_json::from_value(json!(media_type))
        .map_err(|_| anyhow::anyhow!("Unknown media type '{}'. Use audio, video, image or document.", media_type))?;

    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload")
        .to_string();

    let mut form = MultipartForm::new()
        .text("title", title)
        .text("media_type", media_type)
        .file("file", file_name, kind.fallback_mime(), bytes);
    if let Some(desc) = description {
        form = form.text("description", desc);
    }
    if !tags.is_empty() {
        form = form.text("tags", serde_json::to_string(tags)?);
    }

    let client = YonnaClient::new()?;
    let item: MediaItem = client
        .post_multipart("/api/media/media/", form)
        .await
        .context("Upload failed")?;
    println!("Uploaded '{}' (#{}).", item.title, item.id);
    Ok(())
}

/// PATCH title/description of an existing item.
pub async fn update_media(
    id: u64,
    title: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let mut body = serde_json::Map::new();
    if let Some(v) = title {
        body.insert("title".into(), json!(v));
    }
    if let Some(v) = description {
        body.insert("description".into(), json!(v));
    }
    if body.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let client = YonnaClient::new()?;
    let item: MediaItem = client
        .patch_json(&media_path(id, None), body.into())
        .await?;
    println!("Updated '{}' (#{}).", item.title, item.id);
    Ok(())
}

/// Delete a media item.
pub async fn delete_media(id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    client.delete(&media_path(id, None)).await?;
    println!("Deleted #{}.", id);
    Ok(())
}

/// Approve a pending item (admin).
pub async fn approve_media(id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    client
        .send(ApiRequest::post(media_path(id, Some("approve"))))
        .await?;
    println!("Approved #{}.", id);
    Ok(())
}

/// Feature an item (admin).
pub async fn feature_media(id: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    client
        .send(ApiRequest::post(media_path(id, Some("feature"))))
        .await?;
    println!("Featured #{}.", id);
    Ok(())
}

/// Record a view with watch duration in seconds.
pub async fn record_view(id: u64, duration: u64) -> Result<()> {
    let client = YonnaClient::new()?;
    client
        .send(
            ApiRequest::post(media_path(id, Some("record_view")))
                .json(json!({ "duration_watched": duration })),
        )
        .await?;
    println!("View recorded for #{}.", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_paths_keep_trailing_slash() {
        assert_eq!(media_path(5, None), "/api/media/media/5/");
        assert_eq!(media_path(5, Some("approve")), "/api/media/media/5/approve/");
    }
}
