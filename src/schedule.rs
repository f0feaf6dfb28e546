use std::time::Duration;

use tracing::{error, info, info_span, instrument, warn};

use crate::error::FetchError;
use crate::model::schedule::{ApiResponse, ScheduleDate};

pub const DEFAULT_SCHEDULE_URL: &str = "http://localhost:3000/schedules";

/// Something the view can pull one day's schedule from.
pub trait ScheduleSource: Send + Sync {
    fn fetch(&self) -> Result<ApiResponse, FetchError>;
}

/// HTTP client for the local schedule service.
#[derive(Debug, Clone)]
pub struct ScheduleClient {
    url: String,
    timeout: Option<Duration>,
}

impl ScheduleClient {
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Self {
        Self { url: url.into(), timeout }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Decode a raw schedule body (no network).
    #[instrument(level = "info", skip(body), fields(bytes = body.len()))]
    pub fn decode(body: &str) -> Result<ApiResponse, FetchError> {
        Ok(serde_json::from_str::<ApiResponse>(body)?)
    }

    fn agent(&self) -> ureq::Agent {
        ureq::Agent::config_builder()
            .timeout_global(self.timeout)
            .build()
            .into()
    }
}

impl ScheduleSource for ScheduleClient {
    fn fetch(&self) -> Result<ApiResponse, FetchError> {
        let response_result = {
            let _span = info_span!("schedule_fetch", url = %self.url).entered();
            self.agent().get(&self.url).call()
        };
        let response = response_result.map_err(|e| {
            let err = FetchError::from(e);
            error!(error = %err, url = %self.url, "Schedule request failed");
            err
        })?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();
        let body = body_reader.read_to_string().map_err(|e| {
            error!(error = %e, "Failed to read schedule response body");
            FetchError::Body(e.to_string())
        })?;

        match Self::decode(&body) {
            Ok(doc) => {
                let game_count: usize = doc.dates.iter().map(|d| d.games.len()).sum();
                info!(status, dates = doc.dates.len(), game_count, "Fetched schedule");
                Ok(doc)
            }
            Err(e) => {
                error!(error = %e, "Failed to deserialize schedule response");
                Err(e)
            }
        }
    }
}

/// The day the view shows: the first date bucket of the response.
///
/// A response with no date buckets is an empty day rather than a failure.
pub fn first_day(response: ApiResponse) -> ScheduleDate {
    let bucket_count = response.dates.len();
    match response.dates.into_iter().next() {
        Some(day) => {
            if bucket_count > 1 {
                info!(bucket_count, "Schedule has several dates; showing the first");
            }
            day
        }
        None => {
            warn!("Schedule response contained no dates; treating as no games");
            ScheduleDate { date: None, games: Vec::new() }
        }
    }
}
