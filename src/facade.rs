//! Cached access to club records and the derived data shown for a club.
use crate::core::cache::ResponseCache;
use crate::core::metrics::{
    self, BalanceSheetRatios, CashFlowSummary, OperatingRatios, RevenueBreakdown,
};
use crate::core::provider::{ClubDataProvider, DescriptionProvider};
use crate::core::record::{ClubRecord, ClubsResponse, DocumentsResponse};
use crate::core::slug::slugify;
use crate::core::tier::{DataTier, classify};
use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Cache key for the full club collection.
pub const ALL_CLUBS_KEY: &str = "all-clubs";

/// Cache key for a single club's detail payload.
pub fn club_cache_key(club_name: &str) -> String {
    format!("club-{}", club_name.to_lowercase())
}

/// Upstream payloads as held in the response cache.
#[derive(Debug, Clone)]
pub enum ApiPayload {
    Clubs(Arc<ClubsResponse>),
    Documents(Arc<DocumentsResponse>),
}

pub type PayloadCache = ResponseCache<String, ApiPayload>;

/// Metrics prepared for a club detail view. Groups that do not apply to the
/// record's tier, or that it lacks the inputs for, are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivedMetrics {
    pub ratios: Option<OperatingRatios>,
    pub revenue_breakdown: Option<RevenueBreakdown>,
    pub balance_sheet: Option<BalanceSheetRatios>,
    pub cash_flow: Option<CashFlowSummary>,
}

/// Computes the metrics a detail view shows for a record of the given tier.
///
/// `Basic` records get nothing. `Core` records get operating ratios and, when
/// a revenue category is reported, the revenue breakdown. `Rich` records also
/// get balance-sheet ratios and the cash flow summary.
pub fn derive_metrics(record: &ClubRecord, tier: DataTier) -> DerivedMetrics {
    match tier {
        DataTier::Basic => DerivedMetrics::default(),
        DataTier::Core | DataTier::Rich => {
            let mut derived = DerivedMetrics {
                ratios: Some(metrics::compute_ratios(record)),
                revenue_breakdown: record
                    .has_revenue_breakdown()
                    .then(|| metrics::compute_revenue_breakdown(record)),
                ..Default::default()
            };
            if tier == DataTier::Rich {
                derived.balance_sheet = Some(metrics::compute_balance_sheet_ratios(record));
                derived.cash_flow = metrics::compute_cash_flow_summary(record);
            }
            derived
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClubDetail {
    pub record: ClubRecord,
    pub tier: DataTier,
    pub metrics: DerivedMetrics,
    pub description: Option<String>,
}

/// Entry point for callers: serves record requests from the cache and
/// falls back to the upstream API on a miss.
///
/// Concurrent misses for the same key are not coalesced; each caller fetches
/// and the last write wins.
pub struct DataAccessFacade {
    clubs: Arc<dyn ClubDataProvider>,
    descriptions: Option<Arc<dyn DescriptionProvider>>,
    cache: Arc<PayloadCache>,
}

impl DataAccessFacade {
    pub fn new(
        clubs: Arc<dyn ClubDataProvider>,
        descriptions: Option<Arc<dyn DescriptionProvider>>,
        cache: Arc<PayloadCache>,
    ) -> Self {
        Self {
            clubs,
            descriptions,
            cache,
        }
    }

    /// Every club in the collection.
    pub async fn all_clubs(&self) -> Result<Vec<ClubRecord>> {
        let key = ALL_CLUBS_KEY.to_string();
        if let Some(ApiPayload::Clubs(cached)) = self.cache.get(&key) {
            return Ok(cached.clubs.clone());
        }

        let response = Arc::new(
            self.clubs
                .fetch_clubs()
                .await
                .context("Failed to fetch clubs")?,
        );
        info!(count = response.clubs.len(), "Fetched club collection");
        self.cache.set(key, ApiPayload::Clubs(Arc::clone(&response)));
        Ok(response.clubs.clone())
    }

    /// The record for `club_name` with its tier, metrics and description,
    /// or `None` if the API has no matching record.
    pub async fn club_detail(&self, club_name: &str) -> Result<Option<ClubDetail>> {
        let (documents, description) =
            futures::join!(self.club_documents(club_name), self.description(club_name));

        let Some(record) = documents?.documents.first().cloned() else {
            debug!("No record found for {}", club_name);
            return Ok(None);
        };

        let tier = classify(&record);
        debug!("Classified {} as {}", record.club_name, tier);
        let metrics = derive_metrics(&record, tier);
        let description = description.or_else(|| record.description.clone());

        Ok(Some(ClubDetail {
            record,
            tier,
            metrics,
            description,
        }))
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    async fn club_documents(&self, club_name: &str) -> Result<Arc<DocumentsResponse>> {
        let key = club_cache_key(club_name);
        if let Some(ApiPayload::Documents(cached)) = self.cache.get(&key) {
            return Ok(cached);
        }

        let response = Arc::new(
            self.clubs
                .fetch_club(club_name)
                .await
                .with_context(|| format!("Failed to fetch club: {club_name}"))?,
        );
        self.cache
            .set(key, ApiPayload::Documents(Arc::clone(&response)));
        Ok(response)
    }

    /// Description lookups never fail the detail request.
    async fn description(&self, club_name: &str) -> Option<String> {
        let provider = self.descriptions.as_ref()?;
        let slug = slugify(club_name);
        match provider.fetch_description(&slug).await {
            Ok(description) => description,
            Err(e) => {
                warn!("Description lookup failed for {}: {}", slug, e);
                None
            }
        }
    }
}
