//! Free-text location search against Nominatim. The core only ever consumes
//! the first few candidates; timeouts count as "no results found".

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;

/// How many candidates callers display.
pub const MAX_CANDIDATES: usize = 5;

const SEARCH_URL: &str = "https://nominatim.openstreetmap.org/search";

#[derive(Clone, Debug, PartialEq)]
pub struct GeoCandidate {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCandidate {
    /// Short label for filling the search box: the first comma-separated
    /// component of the display name.
    pub fn short_label(&self) -> &str {
        self.display_name
            .split(',')
            .next()
            .unwrap_or(&self.display_name)
            .trim()
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<GeoCandidate>>;
}

/// Nominatim responses carry coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    display_name: String,
    lat: String,
    lon: String,
}

pub struct NominatimClient {
    client: reqwest::Client,
    endpoint: String,
}

impl NominatimClient {
    /// `timeout` applies per request; expiry yields an empty candidate list.
    pub fn new(timeout: Duration) -> Result<Self> {
        Self::with_endpoint(timeout, SEARCH_URL)
    }

    /// Point at a different search endpoint, e.g. a self-hosted instance.
    pub fn with_endpoint(timeout: Duration, endpoint: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("PhotoTagger/0.1")
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn search(&self, query: &str) -> Result<Vec<GeoCandidate>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let response = match self
            .client
            .get(&self.endpoint)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) if err.is_timeout() => {
                log::debug!("geocode lookup timed out for {query:?}");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        // The per-request timeout can also fire mid-body; treat that the same
        // as a timeout on connect.
        let body = match response.error_for_status()?.bytes().await {
            Ok(body) => body,
            Err(err) if err.is_timeout() => {
                log::debug!("geocode response timed out for {query:?}");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };
        let places: Vec<NominatimPlace> = serde_json::from_slice(&body)?;

        let candidates = places
            .into_iter()
            .filter_map(|place| {
                Some(GeoCandidate {
                    display_name: place.display_name,
                    latitude: place.lat.parse().ok()?,
                    longitude: place.lon.parse().ok()?,
                })
            })
            .collect();

        Ok(top_candidates(candidates))
    }
}

/// Truncate to the candidates the UI actually shows.
pub fn top_candidates(mut candidates: Vec<GeoCandidate>) -> Vec<GeoCandidate> {
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(name: &str) -> GeoCandidate {
        GeoCandidate {
            display_name: name.to_string(),
            latitude: 0.0,
            longitude: 0.0,
        }
    }

    #[test]
    fn truncates_to_five_candidates() {
        let many: Vec<GeoCandidate> = (0..12).map(|i| candidate(&format!("place {i}"))).collect();
        let top = top_candidates(many);
        assert_eq!(top.len(), MAX_CANDIDATES);
        assert_eq!(top[0].display_name, "place 0");
    }

    #[tokio::test]
    async fn timeout_during_body_read_yields_no_candidates() {
        use std::io::{Read, Write};

        // Sends valid headers immediately, then stalls the body past the
        // client timeout.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        let addr = listener.local_addr().expect("local addr");
        std::thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(
                    b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 4096\r\n\r\n[",
                );
                let _ = stream.flush();
                std::thread::sleep(Duration::from_secs(2));
            }
        });

        let client = NominatimClient::with_endpoint(
            Duration::from_millis(200),
            format!("http://{addr}/search"),
        )
        .expect("client");

        let results = client
            .search("paris")
            .await
            .expect("timeout should degrade, not error");
        assert!(results.is_empty());
    }

    #[test]
    fn short_label_takes_the_first_component() {
        let c = candidate("Paris, Ile-de-France, Metropolitan France, France");
        assert_eq!(c.short_label(), "Paris");

        let plain = candidate("Nowhere");
        assert_eq!(plain.short_label(), "Nowhere");
    }
}
