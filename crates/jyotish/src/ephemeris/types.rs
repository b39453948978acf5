use crate::time::TimeInstant;
use crate::vedic::types::Body;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by an ephemeris provider
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Body {body} has no direct ephemeris support")]
    UnsupportedBody { body: Body },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed {
        body: Body,
        jd: f64,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Provider returned a non-finite {field}")]
    NonFinite { field: &'static str },
}

/// Raw tropical position as reported by the provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Tropical ecliptic longitude in degrees
    pub lon: f64,
    /// Ecliptic latitude in degrees
    pub lat: f64,
    /// Speed in longitude (degrees per day)
    pub speed_lon: f64,
}

impl RawPosition {
    pub fn ensure_finite(self) -> Result<Self, EphemerisError> {
        if !self.lon.is_finite() {
            return Err(EphemerisError::NonFinite { field: "longitude" });
        }
        if !self.lat.is_finite() {
            return Err(EphemerisError::NonFinite { field: "latitude" });
        }
        if !self.speed_lon.is_finite() {
            return Err(EphemerisError::NonFinite { field: "speed" });
        }
        Ok(self)
    }
}

/// Raw tropical angles for a house request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawAngles {
    /// Tropical ascendant longitude in degrees
    pub ascendant: f64,
    /// Tropical midheaven, when the provider reports one
    pub mc: Option<f64>,
}

/// Lunar node flavour requested from the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeModel {
    #[default]
    True,
    Mean,
}

/// Per-call provider configuration.
///
/// Passed with every request instead of being installed as library state,
/// so concurrent charts never observe each other's settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EphemerisSettings {
    #[serde(default)]
    pub node_model: NodeModel,
}

/// Source of raw tropical positions and angles.
pub trait EphemerisProvider {
    fn position(
        &self,
        instant: TimeInstant,
        body: Body,
        settings: &EphemerisSettings,
    ) -> Result<RawPosition, EphemerisError>;

    fn houses(
        &self,
        instant: TimeInstant,
        latitude: f64,
        longitude: f64,
        settings: &EphemerisSettings,
    ) -> Result<RawAngles, EphemerisError>;
}

impl<P: EphemerisProvider + ?Sized> EphemerisProvider for &P {
    fn position(
        &self,
        instant: TimeInstant,
        body: Body,
        settings: &EphemerisSettings,
    ) -> Result<RawPosition, EphemerisError> {
        (**self).position(instant, body, settings)
    }

    fn houses(
        &self,
        instant: TimeInstant,
        latitude: f64,
        longitude: f64,
        settings: &EphemerisSettings,
    ) -> Result<RawAngles, EphemerisError> {
        (**self).houses(instant, latitude, longitude, settings)
    }
}
