use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, warn};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// A plant as returned by `GET /plants`; fields the façade does not expose are ignored
#[derive(Debug, Clone, Deserialize)]
pub struct ListedPlant {
    pub id: i32,
    pub name: String,
    #[serde(default)]
    pub photos: Vec<ListedPhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListedPhoto {
    pub id: i32,
    pub plant_id: i32,
    pub date: NaiveDate,
    pub path: String,
}

/// HTTP client for the plant listing endpoint
#[derive(Clone, Debug)]
pub struct PlantsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PlantsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn fetch_plants(&self) -> Result<Vec<ListedPlant>, reqwest::Error> {
        let url = format!("{}/plants", self.base_url);
        debug!("Fetching plant listing from {}", url);
        self.http
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<ListedPlant>>()
            .await
    }

    /// Plant listing, or an empty list if the API cannot be reached or answers badly
    pub async fn plants_or_empty(&self) -> Vec<ListedPlant> {
        match self.fetch_plants().await {
            Ok(plants) => plants,
            Err(e) => {
                warn!("Plant listing from {} unavailable: {}", self.base_url, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_ignores_extra_fields() {
        let raw = r#"[{
            "id": 1,
            "name": "Fern",
            "nickname": null,
            "health_status": "healthy",
            "photos": [{"id": 4, "plant_id": 1, "date": "2024-02-01", "path": "static/2024-02-01-Fern"}]
        }]"#;

        let plants: Vec<ListedPlant> = serde_json::from_str(raw).unwrap();

        assert_eq!(plants.len(), 1);
        assert_eq!(plants[0].photos[0].path, "static/2024-02-01-Fern");
        assert_eq!(
            plants[0].photos[0].date,
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let client = PlantsClient::new("http://127.0.0.1:3000/").unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:3000");
    }

    #[tokio::test]
    async fn test_silent_api_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept connections but never answer
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let client =
            PlantsClient::with_timeout(format!("http://{}", addr), Duration::from_millis(200))
                .unwrap();
        let started = std::time::Instant::now();

        let err = client.fetch_plants().await.unwrap_err();

        assert!(err.is_timeout());
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(client.plants_or_empty().await.is_empty());
        server.abort();
    }

    #[tokio::test]
    async fn test_unreachable_api_yields_empty_list() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = PlantsClient::new(format!("http://{}", addr)).unwrap();

        assert!(client.fetch_plants().await.is_err());
        assert!(client.plants_or_empty().await.is_empty());
    }
}
