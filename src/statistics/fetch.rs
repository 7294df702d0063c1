//! Typed fetcher for the statistics endpoint.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::client::{BackendClient, FetchError};

use super::types::StatisticsSummary;

pub const STATISTICS_METRICS: &str = "statistics/statistics/metricas/";

/// The endpoint answers 200 even for application-level failures, with
/// an `error` field instead of the summary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MetricsResponse {
    Error { error: String },
    Summary(StatisticsSummary),
}

pub async fn summary(
    client: &BackendClient,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<StatisticsSummary, FetchError> {
    let response: MetricsResponse = client
        .get_json(
            STATISTICS_METRICS,
            &[("start", &start.to_string()), ("end", &end.to_string())],
        )
        .await?;

    match response {
        MetricsResponse::Error { error } => Err(FetchError::Backend(error)),
        MetricsResponse::Summary(summary) => Ok(summary),
    }
}
