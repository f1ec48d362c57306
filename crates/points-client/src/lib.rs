//! points-client: HTTP client for the wink points rewards API
//!
//! Endpoints:
//! - GET  /getPoints?address=<address>  → `{ "points": <number> }`
//! - POST /setPoints  `{ "to": <address> }`
//!
//! Reads never fail from the caller's point of view: any transport, status
//! or payload problem yields zero and a warning.

use std::time::Duration;

use gho_core::{checksummed, Address, PointsConfig};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Errors from the points write endpoint
#[derive(Debug, Error)]
pub enum PointsError {
    #[error("Points API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Points API returned status {status}")]
    Status { status: u16 },
}

/// Result type for points operations
pub type Result<T> = std::result::Result<T, PointsError>;

#[derive(Serialize)]
struct AddPointsBody {
    to: String,
}

/// Points API client
#[derive(Clone)]
pub struct PointsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PointsClient {
    pub fn new(config: &PointsConfig, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// GET the current points for `address`. Returns 0 on any failure.
    pub async fn get_points(&self, address: &Address) -> u64 {
        let url = format!("{}/getPoints", self.base_url);
        let resp = match self
            .http
            .get(&url)
            .query(&[("address", checksummed(address))])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(?address, "Failed to fetch points: {}", e);
                return 0;
            }
        };

        if !resp.status().is_success() {
            tracing::warn!(?address, status = resp.status().as_u16(), "Points API returned an error");
            return 0;
        }

        match resp.json::<Value>().await {
            Ok(body) => {
                tracing::debug!(?address, ?body, "Points data");
                parse_points(&body).unwrap_or_else(|| {
                    tracing::warn!(?body, "Invalid points payload");
                    0
                })
            }
            Err(e) => {
                tracing::warn!(?address, "Failed to parse points response: {}", e);
                0
            }
        }
    }

    /// POST a points award for `address`.
    pub async fn add_points(&self, address: &Address) -> Result<()> {
        let url = format!("{}/setPoints", self.base_url);
        let resp = self
            .http
            .post(&url)
            .json(&AddPointsBody {
                to: checksummed(address),
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(PointsError::Status {
                status: resp.status().as_u16(),
            });
        }

        tracing::info!(?address, "Points updated");
        Ok(())
    }
}

/// Extract a non-negative `points` number. Fractions are truncated.
fn parse_points(body: &Value) -> Option<u64> {
    let points = body.get("points")?;
    points.as_u64().or_else(|| {
        points
            .as_f64()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .map(|p| p as u64)
    })
}
