use counterscam_shared::constants::{PATH_ANALYTICS, PATH_RECENT_CHECKS, PATH_STATS};
use counterscam_shared::protocol::{
    Analytics, AnalyticsWire, RecentCheck, RecentChecksBody, StatsSummary,
};
use tracing::debug;

use super::ServiceApi;
use crate::error::Result;

impl ServiceApi {
    /// Aggregate counters for the admin dashboard.
    pub async fn stats(&self) -> Result<StatsSummary> {
        let stats: StatsSummary = self.access.get(PATH_STATS).await?;
        debug!(
            total = stats.total_checks,
            phishing = stats.phishing_detected,
            "Fetched stats"
        );
        Ok(stats)
    }

    /// Most recent checks across all users, newest first as the service
    /// orders them. Accepts both the bare list and the wrapped shape.
    pub async fn recent_checks(&self) -> Result<Vec<RecentCheck>> {
        let body: RecentChecksBody = self.access.get(PATH_RECENT_CHECKS).await?;
        let checks = body.into_checks();
        debug!(count = checks.len(), "Fetched recent checks");
        Ok(checks)
    }

    pub async fn analytics(&self) -> Result<Analytics> {
        let wire: AnalyticsWire = self.access.get(PATH_ANALYTICS).await?;
        let analytics = Analytics::from(wire);
        debug!(
            trend_points = analytics.attack_trend.len(),
            domains = analytics.top_domains.len(),
            "Fetched analytics"
        );
        Ok(analytics)
    }
}
