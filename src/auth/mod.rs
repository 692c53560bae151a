//! Bearer token storage for the API session.
mod store;

pub use store::{SESSION_MAX_AGE, SessionTokenStore, TokenStore};
