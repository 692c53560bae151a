//! REST client for the device location API.
mod client;

#[cfg(test)]
mod tests;

pub use client::{ApiClient, DeviceApi};
