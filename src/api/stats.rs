//! Platform statistics endpoints (/api/media/statistics/)

use anyhow::Result;

use super::YonnaClient;
use crate::models::GeneralStats;

/// Show dashboard statistics; `engagement` switches to the per-user
/// engagement breakdown, which is printed as returned.
pub async fn show_stats(engagement: bool) -> Result<()> {
    let client = YonnaClient::new()?;

    if engagement {
        let data: serde_json::Value = client
            .get_json("/api/media/statistics/user_engagement/")
            .await?;
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    let stats: GeneralStats = client.get_json("/api/media/statistics/").await?;

    println!("\nPlatform Statistics:");
    println!("{:-<40}", "");
    if let Some(n) = stats.total_media {
        println!("  Media items: {}", n);
    }
    if let Some(n) = stats.total_views {
        println!("  Total views: {}", n);
    }
    if let Some(n) = stats.total_users {
        println!("  Users:       {}", n);
    }
    if let Some(by_type) = &stats.media_by_type {
        println!("  By type:     {}", by_type);
    }
    Ok(())
}
