//! Shared test utilities for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::{json, Value};

use sensit_api::{ApiResponse, HttpGateway, SensitApi};
use sensit_core::error::SensitResult;
use sensit_models::Device;

/// One request seen by the mock.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub token: Option<String>,
    pub body: Option<Value>,
}

/// Scripted gateway: canned responses keyed by path, 404 for anything else.
#[derive(Default)]
pub struct MockGateway {
    responses: Mutex<HashMap<String, ApiResponse>>,
    calls: Mutex<Vec<Call>>,
}

impl MockGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, resp: ApiResponse) {
        self.responses.lock().unwrap().insert(path.to_string(), resp);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Paths requested with GET, in order.
    pub fn get_paths(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == "GET")
            .map(|c| c.path)
            .collect()
    }

    fn answer(&self, path: &str) -> ApiResponse {
        self.responses
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .unwrap_or_else(|| ApiResponse::new(404, None))
    }

    fn record(&self, method: &'static str, path: &str, token: Option<&str>, body: Option<Value>) {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            token: token.map(String::from),
            body,
        });
    }
}

#[async_trait]
impl HttpGateway for MockGateway {
    async fn get(&self, path: &str, token: Option<&str>) -> SensitResult<ApiResponse> {
        self.record("GET", path, token, None);
        Ok(self.answer(path))
    }

    async fn post(&self, path: &str, body: &Value, token: Option<&str>) -> SensitResult<ApiResponse> {
        self.record("POST", path, token, Some(body.clone()));
        Ok(self.answer(path))
    }
}

/// Midnight UTC on the given day of July 2015.
pub fn july(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2015, 7, day, 0, 0, 0).unwrap()
}

pub fn history_json(records: &[(DateTime<Utc>, &str)]) -> Value {
    let history: Vec<Value> = records
        .iter()
        .map(|(date, data)| json!({ "date": date.to_rfc3339(), "data": data }))
        .collect();
    json!({ "history": history })
}

/// Path of page `index` (zero based) of a paged resource.
pub fn page_path(resource: &str, index: usize) -> String {
    if index == 0 {
        resource.to_string()
    } else {
        format!("{resource}?page={}", index + 1)
    }
}

/// Serve `pages` as a chain starting at `resource`, each page linking to the next.
pub fn serve_history(mock: &MockGateway, resource: &str, pages: &[Vec<(DateTime<Utc>, &str)>]) {
    for (i, records) in pages.iter().enumerate() {
        let mut resp = ApiResponse::accepted(history_json(records));
        if i + 1 < pages.len() {
            let next = format!("https://api.sensit.io/api/v1{}", page_path(resource, i + 1));
            resp = resp.with_link("next", &next);
        }
        mock.respond(&page_path(resource, i), resp);
    }
}

/// Days of July split into pages, each record carrying `data`.
pub fn day_pages(pages: &[&[u32]], data: &'static str) -> Vec<Vec<(DateTime<Utc>, &'static str)>> {
    pages
        .iter()
        .map(|days| days.iter().map(|d| (july(*d), data)).collect())
        .collect()
}

pub fn api(mock: &Arc<MockGateway>) -> SensitApi {
    SensitApi::new(mock.clone()).with_token("test-token")
}

pub fn device_json(id: u64, activation: &str, last_comm: &str) -> Value {
    json!({ "id": id, "activation_date": activation, "last_comm_date": last_comm })
}

/// Device 1, active from 2015-01-01 to 2015-08-01, with the given sensors.
pub fn test_device(sensors: &[(&str, u64)]) -> Device {
    let mut device =
        Device::from_server_map(&device_json(1, "2015-01-01T00:00Z", "2015-08-01T00:00Z")).unwrap();
    device.apply_detail(
        sensit_models::DeviceDetail::from_server_map(&detail_json(sensors)).unwrap(),
    );
    device
}

pub fn detail_json(sensors: &[(&str, u64)]) -> Value {
    let sensors: Vec<Value> = sensors
        .iter()
        .map(|(kind, id)| json!({ "sensor_type": kind, "id": id }))
        .collect();
    json!({ "mode": 0, "sensors": sensors })
}

/// Register an account with one device and its sensor map.
pub fn serve_account(mock: &MockGateway, sensors: &[(&str, u64)]) {
    mock.respond(
        "/devices",
        ApiResponse::accepted(json!([device_json(1, "2015-01-01T00:00Z", "2015-08-01T00:00Z")])),
    );
    mock.respond("/devices/1/", ApiResponse::accepted(detail_json(sensors)));
}
