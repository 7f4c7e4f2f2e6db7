//! Sensor history endpoint.

use tracing::debug;

use sensit_core::error::{SensitError, SensitResult};
use sensit_models::{HistoryPage, RawRecord};

use crate::api::SensitApi;

impl SensitApi {
    /// Fetch one page of sensor history.
    ///
    /// `path` is either the sensor resource (`/devices/{id}/sensors/{sensor}`)
    /// or a `next` link taken from a previous page. A non-success status is
    /// an upstream error: a missing page must never read as "no more data".
    pub async fn history_page(&self, path: &str) -> SensitResult<HistoryPage> {
        let resp = self.get_accepted(path).await?;
        let history = resp.field("history")?;
        let records: Vec<RawRecord> = match history {
            serde_json::Value::Null => Vec::new(),
            other => serde_json::from_value(other.clone())
                .map_err(|e| SensitError::Serialization(format!("bad history in {path}: {e}")))?,
        };
        debug!("{path}: {} record(s), links {:?}", records.len(), resp.links.keys());

        Ok(HistoryPage {
            records,
            links: resp.links,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::endpoints::stub::StubGateway;
    use crate::response::ApiResponse;

    #[tokio::test]
    async fn test_history_page() {
        let gateway = Arc::new(StubGateway::default().with(
            "/devices/1/sensors/2",
            ApiResponse::accepted(serde_json::json!({
                "history": [
                    { "date": "2015-07-01T10:00Z", "data": "3:1:7" },
                    { "date": "2015-07-01T11:00Z", "data": "4:1:8" }
                ]
            }))
            .with_link("next", "https://api.sensit.io/api/v1/devices/1/sensors/2?page=2"),
        ));
        let page = SensitApi::new(gateway).history_page("/devices/1/sensors/2").await.unwrap();
        assert_eq!(page.records.len(), 2);
        assert_eq!(page.records[1].data, "4:1:8");
        assert_eq!(page.next(), Some("/devices/1/sensors/2?page=2"));
    }

    #[tokio::test]
    async fn test_failed_page_is_error() {
        let gateway = Arc::new(StubGateway::default().with(
            "/devices/1/sensors/2",
            ApiResponse::new(500, None),
        ));
        let err = SensitApi::new(gateway)
            .history_page("/devices/1/sensors/2")
            .await
            .unwrap_err();
        assert!(matches!(err, SensitError::Upstream { status: 500, .. }));
    }
}
