use serde::Serialize;

use super::GeoLocation;

/// Body of check-in and check-out calls. `token` is the QR scan identity,
/// not the bearer credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttendanceMark<'a> {
    pub token: &'a str,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> AttendanceMark<'a> {
    pub fn new(token: &'a str, location: GeoLocation) -> Self {
        Self {
            token,
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}
