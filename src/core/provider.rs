//! Upstream collaborator abstractions

use crate::core::record::{ClubsResponse, DocumentsResponse};
use anyhow::Result;
use async_trait::async_trait;

/// Source of club financial records.
#[async_trait]
pub trait ClubDataProvider: Send + Sync {
    async fn fetch_clubs(&self) -> Result<ClubsResponse>;

    async fn fetch_club(&self, club_name: &str) -> Result<DocumentsResponse>;
}

/// Source of free-text club descriptions, keyed by slug.
#[async_trait]
pub trait DescriptionProvider: Send + Sync {
    async fn fetch_description(&self, slug: &str) -> Result<Option<String>>;
}
