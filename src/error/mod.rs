mod api;
mod app;
mod auth;
mod config;
mod validation;

#[cfg(test)]
mod test_support;

pub use api::ApiError;
pub use app::{AppError, AppResult};
pub use auth::AuthError;
pub use config::ConfigError;
pub use validation::ValidationError;
