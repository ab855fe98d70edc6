use serde::Serialize;

pub const DEFAULT_RADIUS_M: i64 = 500;

/// A company location with the geofence the backend validates check-ins against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCompany {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub radius_m: i64,
}
