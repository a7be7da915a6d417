//! Geolocation providers
//!
//! A locate request is single-shot: it either yields a fix or an error
//! whose message is shown to the user. Fixes only recenter the map and set
//! the current location; they never change the traced ring.

pub mod nominatim;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::GeoPoint;

pub use nominatim::NominatimLocator;

/// Fallback text when a provider reports a failure without a message
pub const DEFAULT_FAILURE_MESSAGE: &str = "Unable to fetch your location.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Geolocation is not supported on this device.")]
    Unsupported,
    #[error("{}", message_or_default(.0))]
    PermissionDenied(String),
    #[error("{}", message_or_default(.0))]
    PositionUnavailable(String),
    #[error("{}", message_or_default(.0))]
    Timeout(String),
}

fn message_or_default(message: &str) -> &str {
    if message.is_empty() {
        DEFAULT_FAILURE_MESSAGE
    } else {
        message
    }
}

/// Request options handed to a provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    pub high_accuracy: bool,
    /// Oldest cached fix that may be returned instead of a fresh lookup
    pub maximum_age: Duration,
    /// Longest the provider may take before reporting a timeout
    pub timeout: Duration,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            maximum_age: Duration::from_secs(60),
            timeout: Duration::from_secs(20),
        }
    }
}

pub trait Geolocator {
    fn current_position(&mut self, options: &PositionOptions)
    -> Result<GeoPoint, GeolocationError>;
}

impl<L: Geolocator + ?Sized> Geolocator for Box<L> {
    fn current_position(
        &mut self,
        options: &PositionOptions,
    ) -> Result<GeoPoint, GeolocationError> {
        (**self).current_position(options)
    }
}

/// Provider for devices without any location capability
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl Geolocator for Unsupported {
    fn current_position(&mut self, _: &PositionOptions) -> Result<GeoPoint, GeolocationError> {
        Err(GeolocationError::Unsupported)
    }
}

/// Provider that always reports the same position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator {
    position: GeoPoint,
}

impl FixedLocator {
    pub fn new(position: GeoPoint) -> Self {
        Self { position }
    }
}

impl Geolocator for FixedLocator {
    fn current_position(&mut self, _: &PositionOptions) -> Result<GeoPoint, GeolocationError> {
        Ok(self.position)
    }
}

/// Wraps a provider and reuses its last fix while it is younger than
/// `maximum_age`. Failures are never cached.
#[derive(Debug)]
pub struct CachedLocator<L> {
    inner: L,
    last_fix: Option<(GeoPoint, Instant)>,
}

impl<L: Geolocator> CachedLocator<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            last_fix: None,
        }
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

impl<L: Geolocator> Geolocator for CachedLocator<L> {
    fn current_position(
        &mut self,
        options: &PositionOptions,
    ) -> Result<GeoPoint, GeolocationError> {
        if let Some((point, at)) = self.last_fix
            && at.elapsed() <= options.maximum_age
        {
            log::debug!("Reusing cached fix {}", point);
            return Ok(point);
        }

        let point = self.inner.current_position(options)?;
        self.last_fix = Some((point, Instant::now()));
        Ok(point)
    }
}
