//! Address geocoding against a Nominatim-compatible search endpoint

use std::time::Duration;

use serde::{Deserialize, Serialize};

use hos_domain::Geocoder;
use hos_types::{Coordinates, GeocodeError};

/// Connection settings for the search endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderSettings {
    pub base_url: String,
    /// Comma separated ISO country codes passed as `countrycodes`
    pub country_codes: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org/search".to_string(),
            country_codes: "us".to_string(),
            timeout_secs: 6,
            user_agent: "hos-planner/0.1".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

pub struct NominatimGeocoder {
    settings: GeocoderSettings,
    client: reqwest::blocking::Client,
}

impl NominatimGeocoder {
    pub fn new(settings: GeocoderSettings) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;
        Ok(Self { settings, client })
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Result<Coordinates, GeocodeError> {
        tracing::debug!(address, url = %self.settings.base_url, "geocoding address");

        let resp = self
            .client
            .get(&self.settings.base_url)
            .query(&[
                ("format", "json"),
                ("q", address),
                ("limit", "1"),
                ("countrycodes", self.settings.country_codes.as_str()),
            ])
            .send()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(GeocodeError::Request(format!(
                "{} returned {}",
                self.settings.base_url,
                resp.status()
            )));
        }

        let body = resp
            .text()
            .map_err(|e| GeocodeError::Request(e.to_string()))?;
        parse_search_response(&body, address)
    }
}

/// Take the first hit of a search response body
pub fn parse_search_response(body: &str, address: &str) -> Result<Coordinates, GeocodeError> {
    let hits: Vec<SearchHit> =
        serde_json::from_str(body).map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;
    let hit = hits
        .first()
        .ok_or_else(|| GeocodeError::NoResult(address.to_string()))?;

    let lat: f64 = hit
        .lat
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude: {}", hit.lat)))?;
    let lon: f64 = hit
        .lon
        .trim()
        .parse()
        .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude: {}", hit.lon)))?;

    Ok(Coordinates::new(lat, lon))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_hit() {
        let body = r#"[{"lat":"41.8781136","lon":"-87.6297982","display_name":"Chicago"},
                       {"lat":"0","lon":"0"}]"#;
        let coords = parse_search_response(body, "Chicago, IL").unwrap();
        assert!((coords.lat - 41.8781136).abs() < 1e-9);
        assert!((coords.lon + 87.6297982).abs() < 1e-9);
    }

    #[test]
    fn test_parse_empty_result() {
        let result = parse_search_response("[]", "Nowhere");
        assert!(matches!(result, Err(GeocodeError::NoResult(a)) if a == "Nowhere"));
    }

    #[test]
    fn test_parse_invalid_body() {
        assert!(matches!(
            parse_search_response("<html>", "x"),
            Err(GeocodeError::InvalidResponse(_))
        ));
        assert!(matches!(
            parse_search_response(r#"[{"lat":"north","lon":"1"}]"#, "x"),
            Err(GeocodeError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_default_settings() {
        let settings = GeocoderSettings::default();
        assert_eq!(settings.country_codes, "us");
        assert_eq!(settings.timeout_secs, 6);
        assert!(NominatimGeocoder::new(settings).is_ok());
    }
}
