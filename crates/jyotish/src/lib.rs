//! Sidereal (Vedic) natal chart computation.
//!
//! Given a birth record, the engine derives the Julian Day, the sidereal
//! ascendant and Whole-Sign houses, the nine grahas with their nakshatra and
//! house placements, the major aspects between them and the Vimshottari
//! dasha schedule. Raw tropical positions come from an [`EphemerisProvider`];
//! [`SwissEphemerisAdapter`] is the Swiss Ephemeris implementation.

pub mod aspects;
pub mod chart;
pub mod ephemeris;
pub mod error;
pub mod sidereal;
pub mod time;
pub mod vedic;

pub use chart::{AyanamsaValue, BodyNakshatra, ChartEngine, ChartResult, ChartSettings};
pub use ephemeris::{
    EphemerisError, EphemerisProvider, EphemerisSettings, NodeModel, SwissEphemerisAdapter,
};
pub use error::ChartError;
pub use sidereal::AyanamsaModel;
pub use time::{BirthRecord, TimeInstant};
pub use vedic::{Body, ZodiacSign};
