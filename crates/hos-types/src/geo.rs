//! Geographic point type

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A latitude/longitude pair in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinates {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lon)
    }
}

/// Parses `"lat,lon"` (whitespace around either number is ignored)
impl FromStr for Coordinates {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidInput(format!("expected \"lat,lon\", got \"{}\"", s)))?;
        let lat: f64 = lat
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("invalid latitude: {}", lat.trim())))?;
        let lon: f64 = lon
            .trim()
            .parse()
            .map_err(|_| Error::InvalidInput(format!("invalid longitude: {}", lon.trim())))?;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(Error::InvalidInput(format!("coordinates out of range: {}", s)));
        }
        Ok(Self { lat, lon })
    }
}
