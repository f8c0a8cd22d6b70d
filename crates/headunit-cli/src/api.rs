//! Head Unit API Client

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// API Client for the head unit server
pub struct HeadUnitClient {
    client: Client,
    base_url: String,
}

// ============================================
// API Response Types
// ============================================

#[derive(Debug, Deserialize)]
pub struct StatusResponse {
    pub connected: bool,
    pub device_name: Option<String>,
    pub device_kind: Option<String>,
    pub battery_percent: Option<u8>,
    pub signal_bars: Option<u8>,
    pub call_status: String,
    pub current_call: Option<CurrentCall>,
}

#[derive(Debug, Deserialize)]
pub struct CurrentCall {
    pub status: String,
    pub direction: String,
    pub number: String,
    pub name: Option<String>,
    pub start_time: DateTime<Utc>,
}

impl CurrentCall {
    /// Name if known, otherwise the number
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.number)
    }
}

#[derive(Debug, Deserialize)]
pub struct DeviceResponse {
    pub id: String,
    pub display_name: String,
    pub kind: String,
    pub battery_percent: Option<u8>,
    pub signal_bars: Option<u8>,
    pub last_connected: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct CallRecordResponse {
    pub number: String,
    pub name: Option<String>,
    pub start_time: DateTime<Utc>,
    pub duration_seconds: u64,
    pub outcome: String,
}

#[derive(Debug, Serialize)]
pub struct ConnectRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MakeCallRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,
}

impl HeadUnitClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Test connection with health check
    pub async fn health(&self) -> Result<bool> {
        let resp = self.client.get(self.url("/health")).send().await?;
        Ok(resp.status().is_success())
    }

    pub async fn status(&self) -> Result<StatusResponse> {
        self.send(self.client.get(self.url("/api/phone/status"))).await
    }

    pub async fn devices(&self) -> Result<Vec<DeviceResponse>> {
        self.send(self.client.get(self.url("/api/phone/devices"))).await
    }

    /// Connect to a device, or the most recently connected one
    pub async fn connect(&self, device_id: Option<String>) -> Result<StatusResponse> {
        let request = ConnectRequest { device_id };
        self.send(self.client.post(self.url("/api/phone/connect")).json(&request))
            .await
    }

    pub async fn disconnect(&self) -> Result<StatusResponse> {
        self.send(self.client.post(self.url("/api/phone/disconnect")))
            .await
    }

    pub async fn contacts(&self) -> Result<Vec<ContactResponse>> {
        self.send(self.client.get(self.url("/api/phone/contacts"))).await
    }

    /// Call history, most recent first
    pub async fn history(&self) -> Result<Vec<CallRecordResponse>> {
        self.send(self.client.get(self.url("/api/phone/history"))).await
    }

    pub async fn make_call(
        &self,
        number: Option<String>,
        contact_id: Option<String>,
    ) -> Result<StatusResponse> {
        let request = MakeCallRequest { number, contact_id };
        self.send(self.client.post(self.url("/api/phone/call")).json(&request))
            .await
    }

    pub async fn answer(&self) -> Result<StatusResponse> {
        self.send(self.client.post(self.url("/api/phone/answer"))).await
    }

    pub async fn end_call(&self) -> Result<StatusResponse> {
        self.send(self.client.post(self.url("/api/phone/end"))).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let resp = request
            .send()
            .await
            .context("Failed to connect to head unit API")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            bail!("API error ({}): {}", status, body);
        }

        resp.json().await.context("Failed to parse response")
    }
}
