//! User administration endpoint (/api/auth/users/)

use anyhow::Result;

use super::YonnaClient;
use crate::models::{ListResponse, User};

/// List all users (requires an admin account).
pub async fn list_users() -> Result<()> {
    let client = YonnaClient::new()?;
    let users = client
        .get_json::<ListResponse<User>>("/api/auth/users/")
        .await?
        .into_results();

    println!("\nUsers:");
    println!("{:-<60}", "");
    if users.is_empty() {
        println!("  (no users)");
        return Ok(());
    }
    for user in &users {
        let role = user
            .role
            .as_ref()
            .map(|r| format!("{:?}", r).to_lowercase())
            .unwrap_or_else(|| "-".into());
        println!("#{:<5} {:<30} {:<10}", user.id, user.email, role);
    }
    Ok(())
}
