use serde::Deserialize;
use std::thread;
use std::time::Duration;

use super::{GeolocationError, Geolocator, PositionOptions};
use crate::domain::GeoPoint;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = concat!("farmtrace/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct NominatimResult {
    lat: String,
    lon: String,
}

/// Resolves a free-text place query ("Huntington Beach, USA") to a fix.
///
/// Stands in for device positioning where none is available, e.g. from
/// the command line. Includes a 1 second delay for rate limiting
/// (Nominatim ToS).
#[derive(Debug, Clone)]
pub struct NominatimLocator {
    query: String,
    url: String,
}

impl NominatimLocator {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            url: NOMINATIM_URL.to_string(),
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    pub fn query(&self) -> &str {
        &self.query
    }
}

impl Geolocator for NominatimLocator {
    fn current_position(
        &mut self,
        options: &PositionOptions,
    ) -> Result<GeoPoint, GeolocationError> {
        // Rate limiting - Nominatim requires max 1 request per second
        thread::sleep(Duration::from_secs(1));

        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(options.timeout)
            .build()
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))?;

        let response = client
            .get(&self.url)
            .query(&[("q", self.query.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .map_err(map_request_error)?;

        match response.status().as_u16() {
            200 => {}
            401 | 403 => {
                return Err(GeolocationError::PermissionDenied(format!(
                    "Location service refused the request: {}",
                    response.status()
                )));
            }
            _ => {
                return Err(GeolocationError::PositionUnavailable(format!(
                    "Location service returned error status: {}",
                    response.status()
                )));
            }
        }

        let body = response.text().map_err(map_request_error)?;
        parse_first_result(&body, &self.query)
    }
}

fn map_request_error(error: reqwest::Error) -> GeolocationError {
    if error.is_timeout() {
        GeolocationError::Timeout("Timed out while fetching your location.".to_string())
    } else {
        GeolocationError::PositionUnavailable(error.to_string())
    }
}

fn parse_first_result(body: &str, query: &str) -> Result<GeoPoint, GeolocationError> {
    let unavailable = GeolocationError::PositionUnavailable;

    let results: Vec<NominatimResult> = serde_json::from_str(body)
        .map_err(|e| unavailable(format!("Failed to parse location response: {}", e)))?;

    let result = results
        .into_iter()
        .next()
        .ok_or_else(|| unavailable(format!("Location not found: {}", query)))?;

    let lat: f64 = result
        .lat
        .parse()
        .map_err(|_| unavailable(format!("Invalid latitude in response: {}", result.lat)))?;
    let lon: f64 = result
        .lon
        .parse()
        .map_err(|_| unavailable(format!("Invalid longitude in response: {}", result.lon)))?;

    Ok(GeoPoint::new(lat, lon))
}
