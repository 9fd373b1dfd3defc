use crate::date_range::DateSpan;
use crate::observation::Sample;
use crate::parameter::Parameter;

#[cfg(feature = "api")]
use crate::observation::DATE_FORMAT;
#[cfg(feature = "api")]
use log::warn;
#[cfg(feature = "api")]
use reqwest::{Client, StatusCode};
#[cfg(feature = "api")]
use std::time::Duration;
#[cfg(feature = "api")]
use thiserror::Error;

/// Public SINAICA endpoint serving raw station measurements.
pub const DEFAULT_BASE_URL: &str = "https://sinaica.inecc.gob.mx";

/// A source of raw samples keyed by station, parameter and date span.
///
/// Implementations never raise for source-side failures: a failed request
/// and an empty result both yield an empty vector, with failures reported
/// on the log side-channel. The orchestrator treats the two identically.
pub trait SampleSource {
    async fn fetch(&self, station_id: u32, parameter: Parameter, span: DateSpan) -> Vec<Sample>;
}

/// Parse a SINAICA measurement payload into samples.
///
/// An empty or `null` body is an explicit absence, not an error.
pub fn parse_samples(body: &str) -> Result<Vec<Sample>, serde_json::Error> {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }
    serde_json::from_str(trimmed)
}

/// Cut a diagnostic message down to something log-sized.
#[cfg(feature = "api")]
fn truncate_diagnostic(message: &str) -> String {
    message.chars().take(400).collect()
}

/// Errors from a single retrieval attempt. These never reach the
/// orchestrator; the [`SampleSource`] impl downgrades them to an empty
/// result after reporting.
#[cfg(feature = "api")]
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("bad response status: {0}")]
    Status(StatusCode),
    #[error("malformed payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// HTTP client for the SINAICA raw-data service.
#[cfg(feature = "api")]
pub struct SinaicaClient {
    client: Client,
    base_url: String,
}

#[cfg(feature = "api")]
impl SinaicaClient {
    pub fn new() -> Result<SinaicaClient, reqwest::Error> {
        SinaicaClient::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Result<SinaicaClient, reqwest::Error> {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(SinaicaClient {
            client,
            base_url: base_url.into(),
        })
    }

    /// One retrieval attempt. The request is fully parameterized; station
    /// and parameter identifiers never get spliced into command text.
    /// The `Crude` tier is requested for freshness: validated data can lag
    /// by weeks or months.
    async fn fetch_samples(
        &self,
        station_id: u32,
        parameter: Parameter,
        span: DateSpan,
    ) -> Result<Vec<Sample>, FetchError> {
        let url = format!("{}/srv/datos", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("estacionId", station_id.to_string()),
                ("parametro", String::from(parameter.code())),
                ("fechaInicio", span.start.format(DATE_FORMAT).to_string()),
                ("fechaFin", span.end.format(DATE_FORMAT).to_string()),
                ("tipo", String::from("Crude")),
            ])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status()));
        }
        let body = response.text().await?;
        Ok(parse_samples(&body)?)
    }
}

#[cfg(feature = "api")]
impl SampleSource for SinaicaClient {
    async fn fetch(&self, station_id: u32, parameter: Parameter, span: DateSpan) -> Vec<Sample> {
        let max_tries = 3;
        let mut sleep_millis: u64 = 1000;

        for attempt in 1..=max_tries {
            match self.fetch_samples(station_id, parameter, span).await {
                Ok(samples) => return samples,
                Err(e) => {
                    warn!(
                        "Attempt {}/{}: {} fetch failed for station {} ({} to {}): {}",
                        attempt,
                        max_tries,
                        parameter,
                        station_id,
                        span.start,
                        span.end,
                        truncate_diagnostic(&e.to_string())
                    );
                }
            }

            if attempt < max_tries {
                tokio::time::sleep(Duration::from_millis(sleep_millis)).await;
                sleep_millis *= 2;
            }
        }

        warn!(
            "All attempts failed for station {} ({} {} to {})",
            station_id, parameter, span.start, span.end
        );
        Vec::new()
    }
}


#[cfg(all(test, feature = "api"))]
mod api_tests {
    use super::truncate_diagnostic;

    #[test]
    fn test_truncate_diagnostic() {
        let long = "x".repeat(1000);
        assert_eq!(truncate_diagnostic(&long).len(), 400);
        assert_eq!(truncate_diagnostic("corto"), "corto");
    }
}
