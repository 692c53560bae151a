use serde::{Deserialize, Serialize};

use super::location::{lenient_coordinate, missing_coordinate, valid_coordinates};

/// Characters of the device id shown when no display name is known.
const SHORT_ID_CHARS: usize = 14;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Android,
    Ios,
    Web,
    Other,
}

impl Platform {
    #[must_use]
    pub fn classify(raw: &str) -> Self {
        let lowered = raw.trim().to_ascii_lowercase();
        if lowered == "android" {
            Platform::Android
        } else if lowered == "ios" {
            Platform::Ios
        } else if lowered.contains("web") {
            Platform::Web
        } else {
            Platform::Other
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Platform::Android => "android",
            Platform::Ios => "ios",
            Platform::Web => "web",
            Platform::Other => "other",
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Platform::Android => "A",
            Platform::Ios => "i",
            Platform::Web => "W",
            Platform::Other => "*",
        }
    }
}

/// Metadata shared by every platform; platform-specific keys are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceSummary {
    #[serde(default)]
    pub platform: String,
    pub platform_version: Option<String>,
    pub locale: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
    pub android_version: Option<String>,
    pub sdk: Option<u32>,
    pub is_physical_device: Option<bool>,
    pub name: Option<String>,
    pub system_version: Option<String>,
    pub utsname_machine: Option<String>,
    pub browser_name: Option<String>,
    pub user_agent: Option<String>,
    pub language: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceInfos {
    #[serde(default)]
    pub device_id: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub summary: DeviceSummary,
    pub last_seen: Option<String>,
}

/// Latest known position of a device plus its summary.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Device {
    pub device_id: String,
    #[serde(default = "missing_coordinate", deserialize_with = "lenient_coordinate")]
    pub latitude: f64,
    #[serde(default = "missing_coordinate", deserialize_with = "lenient_coordinate")]
    pub longitude: f64,
    pub timestamp: i64,
    #[serde(default)]
    pub infos: DeviceInfos,
}

impl Device {
    #[must_use]
    pub fn display_name(&self) -> String {
        match self.infos.display_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name.to_owned(),
            Some(_) | None => self.device_id.chars().take(SHORT_ID_CHARS).collect(),
        }
    }

    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::classify(&self.infos.summary.platform)
    }

    /// A device without a usable fix stays listed but is not drawn.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        valid_coordinates(self.latitude, self.longitude)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DevicesResponse {
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Full hardware/software report for one device.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DeviceDetails {
    #[serde(default)]
    pub device_id: String,
    pub display_name: Option<String>,
    #[serde(flatten)]
    pub summary: DeviceSummary,
    pub supported_abis: Option<Vec<String>>,
    pub supported_32bit_abis: Option<Vec<String>>,
    pub supported_64bit_abis: Option<Vec<String>>,
}

impl DeviceDetails {
    #[must_use]
    pub fn platform(&self) -> Platform {
        Platform::classify(&self.summary.platform)
    }
}
