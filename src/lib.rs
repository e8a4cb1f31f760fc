pub mod cli;
pub mod core;
pub mod facade;
pub mod providers;

use crate::core::config::AppConfig;
use crate::core::{DescriptionProvider, ResponseCache};
use crate::facade::DataAccessFacade;
use crate::providers::{ClubApiProvider, CmsDescriptionProvider};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

pub enum AppCommand {
    Clubs,
    Club { name: String },
}

/// Wires the configured upstream providers and a fresh response cache.
pub fn build_facade(config: &AppConfig) -> Result<DataAccessFacade> {
    let timeout = config.request_timeout();
    let clubs = ClubApiProvider::new(&config.providers.club_api.base_url, timeout)?;

    let descriptions = match &config.providers.descriptions {
        Some(descriptions) => Some(Arc::new(CmsDescriptionProvider::new(
            &descriptions.base_url,
            timeout,
        )?) as Arc<dyn DescriptionProvider>),
        None => None,
    };

    let cache = Arc::new(ResponseCache::with_limits(
        config.cache.ttl(),
        config.cache.max_entries,
    ));

    Ok(DataAccessFacade::new(Arc::new(clubs), descriptions, cache))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("clubfin starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let facade = build_facade(&config)?;

    match command {
        AppCommand::Clubs => cli::clubs::run(&facade).await,
        AppCommand::Club { name } => cli::club::run(&facade, &name).await,
    }
}
