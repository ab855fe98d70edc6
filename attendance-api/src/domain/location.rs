use std::{fmt, str::FromStr};

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoLocation {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Error, Debug, PartialEq)]
#[error("Error parsing location data.")]
pub struct LocationParseError;

/// Parses `"lat,lon"`, the same shape the browser geolocation bridge produced.
impl FromStr for GeoLocation {
    type Err = LocationParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s.split_once(',').ok_or(LocationParseError)?;
        let latitude: f64 = lat.trim().parse().map_err(|_| LocationParseError)?;
        let longitude: f64 = lon.trim().parse().map_err(|_| LocationParseError)?;

        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(LocationParseError);
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }
}

impl fmt::Display for GeoLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Latitude: {:.6}, Longitude: {:.6}",
            self.latitude, self.longitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_comma_separated_pair() {
        let loc: GeoLocation = "12.971599, 77.594566".parse().unwrap();
        assert_eq!(loc.latitude, 12.971599);
        assert_eq!(loc.longitude, 77.594566);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!("12.9".parse::<GeoLocation>(), Err(LocationParseError));
        assert_eq!("abc,77.5".parse::<GeoLocation>(), Err(LocationParseError));
        assert_eq!("12.9,NaN".parse::<GeoLocation>(), Err(LocationParseError));
        assert_eq!("".parse::<GeoLocation>(), Err(LocationParseError));
    }
}
