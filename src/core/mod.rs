//! Core business logic abstractions

pub mod cache;
pub mod config;
pub mod log;
pub mod metrics;
pub mod provider;
pub mod record;
pub mod slug;
pub mod tier;

// Re-export main types for cleaner imports
pub use cache::ResponseCache;
pub use provider::{ClubDataProvider, DescriptionProvider};
pub use record::ClubRecord;
pub use tier::{DataTier, classify};
