use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::DeviceApi;
use crate::args::LookArgs;
use crate::auth::TokenStore;
use crate::domain::{Device, DeviceDetails, LocationPoint};
use crate::error::{ApiError, AppError, AppResult, AuthError};

/// Where the bearer token comes from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Credentials {
    pub(crate) token: Option<String>,
    pub(crate) username: Option<String>,
    pub(crate) password: Option<String>,
}

impl Credentials {
    pub(crate) fn from_args(args: &LookArgs) -> Self {
        let non_empty = |value: &Option<String>| {
            value
                .as_ref()
                .filter(|value| !value.trim().is_empty())
                .cloned()
        };
        Self {
            token: non_empty(&args.token),
            username: non_empty(&args.username),
            password: args.password.clone(),
        }
    }
}

/// API handle bound to the token store. A 401 from any call clears the store.
#[derive(Clone)]
pub(crate) struct Session {
    api: Arc<dyn DeviceApi>,
    tokens: Arc<dyn TokenStore>,
    history_limit: u64,
}

impl Session {
    pub(crate) fn new(
        api: Arc<dyn DeviceApi>,
        tokens: Arc<dyn TokenStore>,
        history_limit: u64,
    ) -> Self {
        Self {
            api,
            tokens,
            history_limit,
        }
    }

    /// Stores the explicit token, or logs in with username and password.
    pub(crate) async fn authenticate(&self, credentials: &Credentials) -> AppResult<()> {
        if let Some(token) = credentials.token.as_ref() {
            debug!("Using token from arguments");
            self.tokens.set(token.clone());
            return Ok(());
        }
        let Some(username) = credentials.username.as_deref() else {
            return Err(AppError::auth(AuthError::MissingCredentials));
        };
        let Some(password) = credentials.password.as_deref() else {
            return Err(AppError::auth(AuthError::MissingPassword));
        };
        self.login(username, password).await?;
        Ok(())
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> AppResult<String> {
        let token = self.api.login(username, password).await.map_err(|err| {
            warn!("Login failed for {}: {}", username, err);
            AppError::api(err)
        })?;
        info!("Logged in as {}", username);
        self.tokens.set(token.clone());
        Ok(token)
    }

    pub(crate) async fn devices(&self) -> AppResult<Vec<Device>> {
        let token = self.token()?;
        self.checked(self.api.devices(&token).await)
    }

    pub(crate) async fn device_details(&self, device_id: &str) -> AppResult<DeviceDetails> {
        let token = self.token()?;
        self.checked(self.api.device_details(&token, device_id).await)
    }

    pub(crate) async fn location_history(&self, device_id: &str) -> AppResult<Vec<LocationPoint>> {
        let token = self.token()?;
        self.checked(
            self.api
                .location_history(&token, device_id, self.history_limit)
                .await,
        )
    }

    /// Details and history fetched concurrently; each result stands alone.
    pub(crate) async fn selection(
        &self,
        device_id: &str,
    ) -> (AppResult<DeviceDetails>, AppResult<Vec<LocationPoint>>) {
        tokio::join!(
            self.device_details(device_id),
            self.location_history(device_id)
        )
    }

    fn token(&self) -> AppResult<String> {
        self.tokens
            .get()
            .ok_or_else(|| AppError::auth(AuthError::Unauthorized))
    }

    fn checked<T>(&self, result: Result<T, ApiError>) -> AppResult<T> {
        result.map_err(|err| {
            if err.is_unauthorized() {
                warn!("API rejected the session token; clearing it");
                self.tokens.clear();
            }
            AppError::api(err)
        })
    }
}
