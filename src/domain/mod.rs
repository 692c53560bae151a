//! REST payload models shared by the API client, the timeline core, and the UI.
mod device;
mod location;

pub use device::{Device, DeviceDetails, DeviceInfos, DeviceSummary, DevicesResponse, Platform};
pub use location::{LocationHistory, LocationPoint, retain_finite};
