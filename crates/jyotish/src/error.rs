//! Chart-level error taxonomy.
//!
//! Per-body provider failures are absorbed by the classifier; everything else
//! reaches the caller as one of these variants, tagged with the stage that
//! failed.

use crate::ephemeris::EphemerisError;
use crate::vedic::types::Body;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Invalid time input: {message}")]
    InvalidTimeInput { message: String },
    #[error("Invalid location: {message}")]
    InvalidLocation { message: String },
    #[error("House calculation failed: {source}")]
    HouseCalculation {
        #[source]
        source: EphemerisError,
    },
    #[error("Failed to calculate position for {body}: {source}")]
    PositionCalculation {
        body: Body,
        #[source]
        source: EphemerisError,
    },
    #[error("No body positions could be calculated")]
    NoPositionsCalculated,
    #[error("Dasha calculation failed: {message}")]
    DashaCalculation { message: String },
    #[error("Unknown body: {name}. Valid bodies: {valid:?}")]
    UnknownBody { name: String, valid: Vec<String> },
}

impl ChartError {
    pub(crate) fn time(message: impl Into<String>) -> Self {
        Self::InvalidTimeInput {
            message: message.into(),
        }
    }

    pub(crate) fn dasha(message: impl Into<String>) -> Self {
        Self::DashaCalculation {
            message: message.into(),
        }
    }

    /// Name of the pipeline stage that produced this error.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::InvalidTimeInput { .. } => "time",
            Self::InvalidLocation { .. } => "location",
            Self::HouseCalculation { .. } => "houses",
            Self::PositionCalculation { .. } | Self::NoPositionsCalculated => "positions",
            Self::DashaCalculation { .. } => "dasha",
            Self::UnknownBody { .. } => "nakshatra",
        }
    }
}
