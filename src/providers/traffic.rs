use async_trait::async_trait;
use chrono::Utc;

use super::{Result, TrafficProvider};
use crate::models::TrafficReport;

/// Static traffic source
///
/// Placeholder for a real-time traffic feed; it performs no network call
/// and always reports moderate conditions. A real source only needs to
/// implement [`TrafficProvider`] — the aggregator does not change.
pub struct StaticTrafficSource;

#[async_trait]
impl TrafficProvider for StaticTrafficSource {
    async fn current_conditions(&self, _lat: f64, _lng: f64) -> Result<TrafficReport> {
        Ok(TrafficReport {
            status: "moderate".to_string(),
            description: "Moderate traffic conditions".to_string(),
            last_updated: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_reports_moderate_conditions() {
        let report = StaticTrafficSource
            .current_conditions(48.8566, 2.3522)
            .await
            .unwrap();
        assert_eq!(report.status, "moderate");
        assert_eq!(report.description, "Moderate traffic conditions");
    }
}
