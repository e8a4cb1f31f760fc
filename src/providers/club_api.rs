use crate::core::provider::ClubDataProvider;
use crate::core::record::{ClubsResponse, DocumentsResponse};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the club records API (`/clubs` and `/clubs/{name}`).
pub struct ClubApiProvider {
    base_url: Url,
    client: reqwest::Client,
}

impl ClubApiProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid club API URL: {base_url}"))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Club API URL cannot be used as a base: {base_url}"));
        }

        let client = reqwest::Client::builder()
            .user_agent("clubfin/1.0")
            .timeout(timeout)
            .build()?;

        Ok(ClubApiProvider { base_url, client })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!("Requesting club data from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| anyhow!("Request error: {} for URL: {}", e, url))?;

        if !response.status().is_success() {
            return Err(anyhow!("HTTP error: {} for URL: {}", response.status(), url));
        }

        let text = response
            .text()
            .await
            .with_context(|| format!("Failed to read response body from {url}"))?;

        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse club API response from {url}"))
    }
}

#[async_trait]
impl ClubDataProvider for ClubApiProvider {
    #[instrument(name = "ClubsFetch", skip(self))]
    async fn fetch_clubs(&self) -> Result<ClubsResponse> {
        let response: ClubsResponse = self.get_json(self.endpoint(&["clubs"])).await?;
        debug!("Fetched {} clubs", response.clubs.len());
        Ok(response)
    }

    #[instrument(name = "ClubFetch", skip(self), fields(club = %club_name))]
    async fn fetch_club(&self, club_name: &str) -> Result<DocumentsResponse> {
        let response: DocumentsResponse =
            self.get_json(self.endpoint(&["clubs", club_name])).await?;
        debug!("Fetched {} documents", response.documents.len());
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn create_mock_server(request_path: &str, status: u16, body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&mock_server)
            .await;

        mock_server
    }

    fn provider_for(server: &MockServer, prefix: &str) -> ClubApiProvider {
        ClubApiProvider::new(&format!("{}{}", server.uri(), prefix), Duration::from_secs(5))
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_clubs() {
        let body = r#"{
            "total": 2,
            "clubs": [
                {"club_name": "Aldershot Town", "company_number": "02123456", "revenue": 3500000},
                {"club_name": "Barnet", "revenue": null}
            ]
        }"#;
        let server = create_mock_server("/api/v1/clubs", 200, body).await;
        let provider = provider_for(&server, "/api/v1");

        let response = provider.fetch_clubs().await.unwrap();

        assert_eq!(response.total, Some(2));
        assert_eq!(response.clubs.len(), 2);
        assert_eq!(response.clubs[0].club_name, "Aldershot Town");
        assert_eq!(response.clubs[0].revenue, Some(3_500_000.0));
        assert_eq!(response.clubs[1].revenue, None);
    }

    #[tokio::test]
    async fn test_fetch_club_with_trailing_slash_base() {
        let body = r#"{
            "club_name": "Barnet",
            "found": 1,
            "documents": [{"club_name": "Barnet", "total_assets": "1,000"}]
        }"#;
        let server = create_mock_server("/api/v1/clubs/Barnet", 200, body).await;
        let provider = provider_for(&server, "/api/v1/");

        let response = provider.fetch_club("Barnet").await.unwrap();

        assert_eq!(response.documents.len(), 1);
        assert_eq!(response.documents[0].total_assets, Some(1000.0));
    }

    #[tokio::test]
    async fn test_fetch_club_encodes_name() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clubs/Forest%20Green%20Rovers"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"documents": []}"#))
            .expect(1)
            .mount(&server)
            .await;
        let provider = provider_for(&server, "");

        let response = provider.fetch_club("Forest Green Rovers").await.unwrap();

        assert!(response.documents.is_empty());
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = create_mock_server("/clubs", 500, "boom").await;
        let provider = provider_for(&server, "");

        let err = provider.fetch_clubs().await.unwrap_err();

        assert!(err.to_string().contains("HTTP error: 500"));
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = create_mock_server("/clubs", 200, "<html>not json</html>").await;
        let provider = provider_for(&server, "");

        let err = provider.fetch_clubs().await.unwrap_err();

        assert!(err.to_string().contains("Failed to parse club API response"));
    }

    #[tokio::test]
    async fn test_request_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/clubs"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"clubs": []}"#)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;
        let provider =
            ClubApiProvider::new(&server.uri(), Duration::from_millis(50)).unwrap();

        assert!(provider.fetch_clubs().await.is_err());
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ClubApiProvider::new("not a url", Duration::from_secs(1)).is_err());
        assert!(ClubApiProvider::new("mailto:someone@example.com", Duration::from_secs(1)).is_err());
    }
}
