use serde::{Deserialize, Deserializer, Serialize};

/// Valid latitude range in degrees.
const LATITUDE_LIMIT: f64 = 90.0;
/// Valid longitude range in degrees.
const LONGITUDE_LIMIT: f64 = 180.0;

/// One timestamped fix reported by a device. Timestamps are epoch millis.
///
/// A null or missing coordinate decodes as NaN and is dropped later by
/// [`retain_finite`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LocationPoint {
    #[serde(default = "missing_coordinate", deserialize_with = "lenient_coordinate")]
    pub latitude: f64,
    #[serde(default = "missing_coordinate", deserialize_with = "lenient_coordinate")]
    pub longitude: f64,
    pub timestamp: i64,
    pub device_id: String,
}

impl LocationPoint {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64, timestamp: i64, device_id: &str) -> Self {
        Self {
            latitude,
            longitude,
            timestamp,
            device_id: device_id.to_owned(),
        }
    }

    /// Whether the coordinates are usable for display.
    #[must_use]
    pub fn has_valid_coordinates(&self) -> bool {
        valid_coordinates(self.latitude, self.longitude)
    }
}

pub(super) fn valid_coordinates(latitude: f64, longitude: f64) -> bool {
    latitude.is_finite()
        && longitude.is_finite()
        && latitude.abs() <= LATITUDE_LIMIT
        && longitude.abs() <= LONGITUDE_LIMIT
}

pub(super) const fn missing_coordinate() -> f64 {
    f64::NAN
}

pub(super) fn lenient_coordinate<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LocationHistory {
    pub device_id: String,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub history: Vec<LocationPoint>,
}

/// Drops points whose coordinates are missing or out of range.
#[must_use]
pub fn retain_finite(points: Vec<LocationPoint>) -> Vec<LocationPoint> {
    let total = points.len();
    let kept: Vec<LocationPoint> = points
        .into_iter()
        .filter(LocationPoint::has_valid_coordinates)
        .collect();
    let dropped = total.saturating_sub(kept.len());
    if dropped > 0 {
        tracing::debug!("Dropped {} location points with unusable coordinates", dropped);
    }
    kept
}
