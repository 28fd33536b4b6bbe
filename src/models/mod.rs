//! Data models for platform entities

mod auth;
mod course;
mod media;
mod quiz;
mod user;

pub use auth::*;
pub use course::*;
pub use media::*;
pub use quiz::*;
pub use user::*;

use serde::Deserialize;

/// List responses arrive either as a bare array or wrapped in the backend's
/// page envelope (`{count, next, previous, results}`), depending on whether
/// pagination kicked in for the view. Accept both shapes.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated {
        count: Option<u64>,
        next: Option<String>,
        previous: Option<String>,
        results: Vec<T>,
    },
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    pub fn into_results(self) -> Vec<T> {
        match self {
            ListResponse::Paginated { results, .. } => results,
            ListResponse::Plain(items) => items,
        }
    }
}
