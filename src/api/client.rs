use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::domain::{Device, DeviceDetails, DevicesResponse, LocationHistory, LocationPoint};
use crate::error::ApiError;

const USER_AGENT: &str = concat!("nyanlook/", env!("CARGO_PKG_VERSION"));

/// Calls the dashboard makes against the location API.
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Exchanges credentials for a bearer token.
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError>;

    async fn devices(&self, token: &str) -> Result<Vec<Device>, ApiError>;

    async fn device_details(&self, token: &str, device_id: &str)
    -> Result<DeviceDetails, ApiError>;

    /// Most recent `limit` points for one device, in server order.
    async fn location_history(
        &self,
        token: &str,
        device_id: &str,
        limit: u64,
    ) -> Result<Vec<LocationPoint>, ApiError>;
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: Url,
}

impl ApiClient {
    /// Builds a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be parsed or cannot carry a path,
    /// or when the HTTP client cannot be constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let base = Url::parse(base_url).map_err(|err| ApiError::InvalidBaseUrl {
            url: base_url.to_owned(),
            source: err,
        })?;
        if base.cannot_be_a_base() {
            return Err(ApiError::BaseUrlNotHierarchical {
                url: base_url.to_owned(),
            });
        }
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|err| ApiError::BuildClientFailed { source: err })?;
        Ok(Self { client, base })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Appends `segments` to the base path, percent-encoding each one.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::BaseUrlNotHierarchical {
                url: self.base.to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn authorized_get(&self, url: Url, token: &str) -> RequestBuilder {
        debug!("GET {}", url);
        self.client
            .get(url)
            .bearer_auth(token)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
    }
}

#[async_trait]
impl DeviceApi for ApiClient {
    async fn login(&self, username: &str, password: &str) -> Result<String, ApiError> {
        let url = self.endpoint(&["auth", "token"])?;
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .map_err(|err| ApiError::Transport {
                context: "login",
                source: err,
            })?;
        let body: Value = decode(response, "login").await?;
        body.get("access_token")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::MissingAccessToken {
                body: body.to_string(),
            })
    }

    async fn devices(&self, token: &str) -> Result<Vec<Device>, ApiError> {
        let url = self.endpoint(&["devices"])?;
        let response = send(self.authorized_get(url, token), "device list").await?;
        let payload: DevicesResponse = decode(response, "device list").await?;
        debug!("Fetched {} devices", payload.devices.len());
        Ok(payload.devices)
    }

    async fn device_details(
        &self,
        token: &str,
        device_id: &str,
    ) -> Result<DeviceDetails, ApiError> {
        let url = self.endpoint(&["device", device_id, "details"])?;
        let response = send(self.authorized_get(url, token), "device details").await?;
        decode(response, "device details").await
    }

    async fn location_history(
        &self,
        token: &str,
        device_id: &str,
        limit: u64,
    ) -> Result<Vec<LocationPoint>, ApiError> {
        let mut url = self.endpoint(&["device", device_id, "location", "history"])?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string());
        let response = send(self.authorized_get(url, token), "location history").await?;
        let payload: LocationHistory = decode(response, "location history").await?;
        debug!(
            "Fetched {} history points for {}",
            payload.history.len(),
            payload.device_id
        );
        Ok(payload.history)
    }
}

async fn send(request: RequestBuilder, context: &'static str) -> Result<Response, ApiError> {
    request
        .send()
        .await
        .map_err(|err| ApiError::Transport {
            context,
            source: err,
        })
}

/// Maps non-2xx to [`ApiError::Status`] and decodes the JSON body otherwise.
async fn decode<T>(response: Response, context: &'static str) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        let reason = status.canonical_reason().unwrap_or("Request failed");
        let detail = response
            .json::<Value>()
            .await
            .ok()
            .and_then(|body| error_detail(&body))
            .unwrap_or_else(|| reason.to_owned());
        debug!("{} failed with {}: {}", context, status, detail);
        return Err(ApiError::Status {
            status: status.as_u16(),
            detail,
        });
    }
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode {
            context,
            source: err,
        })
}

fn error_detail(body: &Value) -> Option<String> {
    let detail = body.get("detail")?;
    Some(
        detail
            .as_str()
            .map_or_else(|| detail.to_string(), str::to_owned),
    )
}
