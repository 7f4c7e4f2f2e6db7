//! Authenticated session and device directory.
//!
//! Opening a session authenticates once, then discovers the account's
//! devices and, per device, its sensor map. The directory is a snapshot;
//! call [`Session::refresh`] to re-read it.

use std::sync::Arc;

use tracing::{debug, info, warn};

use sensit_api::{ApiClient, HttpGateway, SensitApi};
use sensit_core::config::{AppConfig, PageOrder};
use sensit_core::error::{SensitError, SensitResult};
use sensit_models::Device;

use crate::credentials::AuthMethod;
use crate::device::SensitDevice;

/// An authenticated connection plus the devices it can see.
#[derive(Debug, Clone)]
pub struct Session {
    api: SensitApi,
    order: PageOrder,
    devices: Vec<Device>,
}

impl Session {
    /// Open a session against the API configured in `config`.
    pub async fn open(config: &AppConfig, auth: AuthMethod) -> SensitResult<Self> {
        let client = ApiClient::new(&config.api)?;
        info!("opening session against {}", client.base_url());
        Self::connect(Arc::new(client), auth, config.history.page_order).await
    }

    /// Open a session over any gateway.
    pub async fn connect(
        gateway: Arc<dyn HttpGateway>,
        auth: AuthMethod,
        order: PageOrder,
    ) -> SensitResult<Self> {
        let api = Self::authenticate(SensitApi::new(gateway), auth).await?;
        let mut session = Self {
            api,
            order,
            devices: Vec::new(),
        };
        session.refresh().await?;
        Ok(session)
    }

    async fn authenticate(api: SensitApi, auth: AuthMethod) -> SensitResult<SensitApi> {
        match auth {
            AuthMethod::Token(token) => {
                debug!("using supplied token");
                Ok(api.with_token(token))
            }
            AuthMethod::Password { email, password } => {
                let token = api.request_token(&email, &password).await?;
                info!("obtained token for {email}");
                Ok(api.with_token(token))
            }
        }
    }

    /// Re-read the device list and every device's sensors.
    pub async fn refresh(&mut self) -> SensitResult<()> {
        let mut devices = self.api.list_devices().await.map_err(rejected_as_auth)?;

        for device in &mut devices {
            let detail = self
                .api
                .device_detail(&device.id)
                .await
                .map_err(rejected_as_auth)?;
            if detail.sensors.is_empty() {
                warn!("device {} reported no sensors", device.id);
            }
            device.apply_detail(detail);
        }

        info!("discovered {} device(s)", devices.len());
        self.devices = devices;
        Ok(())
    }

    /// Authenticated API handle.
    pub fn api(&self) -> &SensitApi {
        &self.api
    }

    /// Bearer token of this session.
    pub fn token(&self) -> Option<&str> {
        self.api.token()
    }

    pub fn page_order(&self) -> PageOrder {
        self.order
    }

    /// Discovered devices, in listing order.
    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    /// Accessor handle for the device with `id`.
    pub fn device(&self, id: &str) -> SensitResult<SensitDevice> {
        self.devices
            .iter()
            .find(|d| d.id == id)
            .map(|d| self.handle(d))
            .ok_or_else(|| SensitError::DeviceNotFound(id.to_string()))
    }

    /// Accessor handle for the first listed device.
    pub fn first_device(&self) -> SensitResult<SensitDevice> {
        self.devices
            .first()
            .map(|d| self.handle(d))
            .ok_or_else(|| SensitError::DeviceNotFound("account has no devices".into()))
    }

    /// Accessor handles for every device.
    pub fn device_handles(&self) -> Vec<SensitDevice> {
        self.devices.iter().map(|d| self.handle(d)).collect()
    }

    fn handle(&self, device: &Device) -> SensitDevice {
        SensitDevice::new(device.clone(), self.api.clone(), self.order)
    }
}

/// A refused discovery call means the token is bad, not that the API is down.
fn rejected_as_auth(err: SensitError) -> SensitError {
    match err {
        SensitError::Upstream { status: 401 | 403, message } => {
            SensitError::Authentication(format!("token rejected: {message}"))
        }
        other => other,
    }
}
