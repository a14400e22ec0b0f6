use counterscam_shared::constants::{MIN_REPORT_LEN, PATH_REPORT};
use counterscam_shared::protocol::ReportRequest;
use counterscam_shared::{validate_payload, ScanKind};
use tracing::info;

use super::ServiceApi;
use crate::error::Result;

impl ServiceApi {
    /// Report a URL or message the user believes is a scam.
    pub async fn submit_report(&self, kind: ScanKind, value: &str, details: &str) -> Result<()> {
        let report = ReportRequest::new(kind, value, details);
        validate_payload(kind, &report.value, MIN_REPORT_LEN)?;

        self.access.post_ack(PATH_REPORT, &report).await?;

        info!(%kind, "Report submitted");
        Ok(())
    }
}
