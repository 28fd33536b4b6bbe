//! Learning progress endpoints (/api/progress/)

use anyhow::Result;

use super::YonnaClient;

/// Show the user's progress: overall, per-course, or the learning-stats
/// breakdown. The progress serializers vary across backend versions, so
/// the payload is printed as returned.
pub async fn show_progress(course_id: Option<u64>, stats: bool) -> Result<()> {
    let client = YonnaClient::new()?;

    let path = if stats {
        "/api/progress/stats/".to_string()
    } else if let Some(id) = course_id {
        format!("/api/progress/{}/", id)
    } else {
        "/api/progress/".to_string()
    };

    let data: serde_json::Value = client.get_json(&path).await?;
    println!("{}", serde_json::to_string_pretty(&data)?);
    Ok(())
}
