use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::api::DeviceApi;
use crate::domain::{Device, DeviceDetails, DeviceInfos, LocationPoint};
use crate::error::{ApiError, AppError, AppResult};

pub(crate) fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

pub(crate) fn device(id: &str, name: &str, timestamp: i64) -> Device {
    Device {
        device_id: id.to_owned(),
        latitude: 48.85,
        longitude: 2.35,
        timestamp,
        infos: DeviceInfos {
            device_id: id.to_owned(),
            display_name: Some(name.to_owned()),
            ..DeviceInfos::default()
        },
    }
}

/// In-memory API: fixed devices, details for any id, a history of points.
#[derive(Default)]
pub(crate) struct FakeApi {
    pub(crate) devices: Vec<Device>,
    pub(crate) history: Vec<LocationPoint>,
    pub(crate) fail_details: bool,
    pub(crate) unauthorized: bool,
    pub(crate) login_calls: AtomicUsize,
}

impl FakeApi {
    pub(crate) const TOKEN: &'static str = "fake-token";

    pub(crate) fn unauthorized() -> Self {
        Self {
            unauthorized: true,
            ..Self::default()
        }
    }

    pub(crate) fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), ApiError> {
        if self.unauthorized {
            return Err(ApiError::Status {
                status: 401,
                detail: "Could not validate credentials".to_owned(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceApi for FakeApi {
    async fn login(&self, _username: &str, _password: &str) -> Result<String, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.check()?;
        Ok(Self::TOKEN.to_owned())
    }

    async fn devices(&self, _token: &str) -> Result<Vec<Device>, ApiError> {
        self.check()?;
        Ok(self.devices.clone())
    }

    async fn device_details(
        &self,
        _token: &str,
        device_id: &str,
    ) -> Result<DeviceDetails, ApiError> {
        self.check()?;
        if self.fail_details {
            return Err(ApiError::Status {
                status: 500,
                detail: "Internal Server Error".to_owned(),
            });
        }
        Ok(DeviceDetails {
            device_id: device_id.to_owned(),
            ..DeviceDetails::default()
        })
    }

    async fn location_history(
        &self,
        _token: &str,
        device_id: &str,
        limit: u64,
    ) -> Result<Vec<LocationPoint>, ApiError> {
        self.check()?;
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(self
            .history
            .iter()
            .filter(|point| point.device_id == device_id)
            .take(limit)
            .cloned()
            .collect())
    }
}
