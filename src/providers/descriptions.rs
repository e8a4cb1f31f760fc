use crate::core::provider::DescriptionProvider;
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Looks up club descriptions in the content service by slug.
pub struct CmsDescriptionProvider {
    base_url: Url,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct CmsResponse {
    #[serde(default)]
    data: Vec<CmsEntry>,
}

#[derive(Debug, Deserialize)]
struct CmsEntry {
    description: Option<String>,
}

impl CmsDescriptionProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .with_context(|| format!("Invalid description service URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!(
                "Description service URL cannot be used as a base: {base_url}"
            ));
        }

        let client = reqwest::Client::builder()
            .user_agent("clubfin/1.0")
            .timeout(timeout)
            .build()?;

        Ok(CmsDescriptionProvider { base_url, client })
    }

    fn lookup_url(&self, slug: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "clubs"]);
        }
        url.query_pairs_mut().append_pair("filters[slug][$eq]", slug);
        url
    }
}

#[async_trait]
impl DescriptionProvider for CmsDescriptionProvider {
    #[instrument(name = "DescriptionFetch", skip(self), fields(slug = %slug))]
    async fn fetch_description(&self, slug: &str) -> Result<Option<String>> {
        let url = self.lookup_url(slug);
        debug!("Requesting description from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let data: CmsResponse = response
            .json()
            .await
            .with_context(|| format!("Failed to parse description response for {slug}"))?;

        Ok(data
            .data
            .into_iter()
            .filter_map(|entry| entry.description)
            .find(|description| !description.trim().is_empty()))
    }
}
