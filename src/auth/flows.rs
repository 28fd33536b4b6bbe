//! Login, registration, and session management flows.

use anyhow::{Context, Result};
use serde_json::json;

use crate::api::request::ApiRequest;
use crate::api::YonnaClient;
use crate::auth::TokenPair;
use crate::config::Config;
use crate::models::{LoginResponse, RegisterResponse};

/// Authenticate with email and password, storing the returned token pair.
pub async fn login(email: &str, password: &str) -> Result<()> {
    let client = YonnaClient::new()?;
    let resp: LoginResponse = client
        .post_json(
            "/api/auth/login/",
            json!({
                "email": email,
                "password": password,
            }),
        )
        .await
        .context("Login failed")?;

    client.session().store_token_pair(TokenPair {
        access: resp.access,
        refresh: resp.refresh,
    });

    println!("Login successful.");
    if let Some(email) = resp.email {
        println!("  Account: {}", email);
    }
    if let (Some(role), Some(level)) = (resp.role, resp.level) {
        println!("  Role: {}, level: {}", role, level);
    }
    if let Some(xp) = resp.xp {
        println!("  XP: {}", xp);
    }
    Ok(())
}

/// Federated login: exchange a Google ID token for a platform token pair.
pub async fn login_google(id_token: &str) -> Result<()> {
    let client = YonnaClient::new()?;
    let resp: LoginResponse = client
        .post_json("/api/auth/google/", json!({ "token": id_token }))
        .await
        .context("Google login failed")?;

    client.session().store_token_pair(TokenPair {
        access: resp.access,
        refresh: resp.refresh,
    });

    println!("Login successful (Google).");
    if let Some(email) = resp.email {
        println!("  Account: {}", email);
    }
    Ok(())
}

/// Create an account. Some backend versions return a token pair directly;
/// when they do, the session is established without a second login.
pub async fn register(
    email: &str,
    password: &str,
    username: &str,
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<()> {
    let client = YonnaClient::new()?;
    let resp: RegisterResponse = client
        .post_json(
            "/api/auth/register/",
            json!({
                "email": email,
                "password": password,
                "username": username,
                "first_name": first_name.unwrap_or(""),
                "last_name": last_name.unwrap_or(""),
            }),
        )
        .await
        .context("Registration failed")?;

    match (resp.access, resp.refresh) {
        (Some(access), Some(refresh)) => {
            client
                .session()
                .store_token_pair(TokenPair { access, refresh });
            println!("Account created, logged in.");
        }
        _ => {
            println!("Account created. Run 'yonna-cli login' to sign in.");
        }
    }
    Ok(())
}

/// Revoke the refresh token on the backend (best effort) and clear stored
/// credentials. Local tokens are wiped even if the revoke call fails.
pub async fn logout() -> Result<()> {
    let client = YonnaClient::new()?;

    if let Some(refresh) = client.session().refresh_token() {
        let result = client
            .send(ApiRequest::post("/api/auth/logout/").json(json!({ "refresh": refresh })))
            .await;
        if let Err(e) = result {
            tracing::warn!("Logout endpoint failed, clearing local tokens anyway: {e}");
        }
    }

    client.session().clear();
    println!("Logged out.");
    Ok(())
}

/// Change the account password (requires a valid session).
pub async fn change_password(old_password: &str, new_password: &str) -> Result<()> {
    let client = YonnaClient::new()?;
    client
        .send(
            ApiRequest::post("/api/auth/change-password/").json(json!({
                "old_password": old_password,
                "new_password": new_password,
            })),
        )
        .await
        .context("Password change failed")?;
    println!("Password changed.");
    Ok(())
}

/// Display current auth status.
pub async fn status() -> Result<()> {
    let config = Config::load()?;

    match config.access_token.as_deref() {
        Some(_) => println!("Access token:  present"),
        None => println!("Access token:  none"),
    }
    match config.refresh_token.as_deref() {
        Some(_) => println!("Refresh token: present"),
        None => println!("Refresh token: none"),
    }
    println!(
        "Backend:       {}",
        std::env::var("YONNA_API_URL")
            .ok()
            .or(config.api_url)
            .unwrap_or_else(|| crate::api::client::DEFAULT_BASE_URL.to_string())
    );

    if config.access_token.is_none() && config.refresh_token.is_none() {
        println!("\nRun 'yonna-cli login' to authenticate.");
    }
    Ok(())
}
