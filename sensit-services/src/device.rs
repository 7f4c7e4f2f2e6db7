//! Per-device telemetry accessors.

use tracing::debug;

use sensit_api::SensitApi;
use sensit_core::config::PageOrder;
use sensit_core::error::{SensitError, SensitResult};
use sensit_models::{
    ButtonPress, Device, HistoryRequest, Measurement, RawRecord, SensorKind,
};

use crate::history::HistoryPaginator;

/// A discovered device bound to an authenticated API handle.
///
/// Each accessor takes a [`HistoryRequest`], validates it against the
/// device's lifetime, fetches the matching history and decodes it. Errors
/// are attributed to the accessor that was called.
#[derive(Debug, Clone)]
pub struct SensitDevice {
    device: Device,
    paginator: HistoryPaginator,
}

impl SensitDevice {
    pub fn new(device: Device, api: SensitApi, order: PageOrder) -> Self {
        Self {
            device,
            paginator: HistoryPaginator::new(api, order),
        }
    }

    /// The underlying device entity.
    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn id(&self) -> &str {
        &self.device.id
    }

    /// Temperature readings.
    pub async fn temperature(&self, request: HistoryRequest) -> SensitResult<Vec<Measurement>> {
        self.measurements(SensorKind::Temperature, request).await
    }

    /// Sound level readings.
    pub async fn sound(&self, request: HistoryRequest) -> SensitResult<Vec<Measurement>> {
        self.measurements(SensorKind::Sound, request).await
    }

    /// Motion readings.
    pub async fn motion(&self, request: HistoryRequest) -> SensitResult<Vec<Measurement>> {
        self.measurements(SensorKind::Motion, request).await
    }

    /// Button presses.
    pub async fn button(&self, request: HistoryRequest) -> SensitResult<Vec<ButtonPress>> {
        let records = self.records(SensorKind::Button, request).await?;
        Ok(records.iter().map(ButtonPress::from).collect())
    }

    /// Decoded readings of any measuring kind.
    pub async fn measurements(
        &self,
        kind: SensorKind,
        request: HistoryRequest,
    ) -> SensitResult<Vec<Measurement>> {
        let method = kind.as_str();
        if kind == SensorKind::Button {
            return Err(SensitError::argument(method, "button history has no measurements"));
        }
        let records = self.records(kind, request).await?;
        records
            .iter()
            .map(|r| Measurement::decode(kind, r))
            .collect::<SensitResult<Vec<_>>>()
            .map_err(|e| e.in_method(method))
    }

    /// Undecoded history of `kind`. Every error names the `kind` accessor.
    pub async fn records(
        &self,
        kind: SensorKind,
        request: HistoryRequest,
    ) -> SensitResult<Vec<RawRecord>> {
        self.fetch(kind, request)
            .await
            .map_err(|e| e.in_method(kind.as_str()))
    }

    async fn fetch(&self, kind: SensorKind, request: HistoryRequest) -> SensitResult<Vec<RawRecord>> {
        let criterion = request
            .resolve(&self.device)
            .map_err(|e| e.in_method(kind.as_str()))?;
        let path = self.device.history_path(kind)?;
        debug!("device {}: {kind} via {path}", self.device.id);

        self.paginator.fetch(&path, &criterion).await
    }
}
