//! Ascendant resolution and Whole-Sign houses.
//!
//! The sign holding the sidereal ascendant is house 1 in its entirety; the
//! following signs in zodiacal order are houses 2 to 12. Cusps are therefore
//! always whole multiples of 30 degrees.

use crate::ephemeris::{EphemerisError, EphemerisProvider, EphemerisSettings};
use crate::error::ChartError;
use crate::sidereal::SiderealCorrector;
use crate::time::TimeInstant;
use crate::vedic::nakshatra::{build_placement, NakshatraPlacement};
use crate::vedic::types::{degree_in_sign, sign_index, ZodiacSign, SIGN_SPAN};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ascendant {
    #[serde(rename = "tropicalLongitude")]
    pub tropical_longitude: f64,
    pub longitude: f64,
    pub sign: ZodiacSign,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
    pub degree: f64,
    pub nakshatra: NakshatraPlacement,
}

impl Ascendant {
    pub fn from_sidereal(tropical_longitude: f64, longitude: f64) -> Self {
        let index = sign_index(longitude);
        Self {
            tropical_longitude,
            longitude,
            sign: ZodiacSign::from_index(index),
            sign_index: index,
            degree: degree_in_sign(longitude),
            nakshatra: build_placement(longitude),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    pub house: u8,
    pub sign: ZodiacSign,
    pub cusp: f64,
    pub degree: f64,
}

/// `houseCusp[i] = ((ascendant_sign + i) mod 12) * 30`
pub fn whole_sign_cusps(ascendant_sign: usize) -> [f64; 12] {
    let mut cusps = [0.0; 12];
    for (i, cusp) in cusps.iter_mut().enumerate() {
        *cusp = ((ascendant_sign + i) % 12) as f64 * SIGN_SPAN;
    }
    cusps
}

pub fn whole_sign_houses(ascendant_sign: usize) -> Vec<HouseCusp> {
    whole_sign_cusps(ascendant_sign)
        .iter()
        .enumerate()
        .map(|(i, &cusp)| HouseCusp {
            house: (i + 1) as u8,
            sign: ZodiacSign::from_longitude(cusp),
            cusp,
            degree: cusp % SIGN_SPAN,
        })
        .collect()
}

/// House 1..=12 of a body sign under the Whole-Sign rule.
pub fn whole_sign_house(body_sign: usize, ascendant_sign: usize) -> u8 {
    ((body_sign % 12 + 12 - ascendant_sign % 12) % 12 + 1) as u8
}

/// Obtain the tropical ascendant from the provider and convert it to sidereal.
pub fn resolve_ascendant<P: EphemerisProvider>(
    provider: &P,
    instant: TimeInstant,
    latitude: f64,
    longitude: f64,
    corrector: &SiderealCorrector,
    settings: &EphemerisSettings,
) -> Result<Ascendant, ChartError> {
    let angles = provider
        .houses(instant, latitude, longitude, settings)
        .map_err(|source| ChartError::HouseCalculation { source })?;

    if !angles.ascendant.is_finite() {
        return Err(ChartError::HouseCalculation {
            source: EphemerisError::NonFinite { field: "ascendant" },
        });
    }

    let sidereal = corrector.to_sidereal(angles.ascendant);
    log::debug!(
        "Ascendant tropical {:.6}, sidereal {:.6} (ayanamsa {:.6})",
        angles.ascendant,
        sidereal,
        corrector.ayanamsa
    );
    Ok(Ascendant::from_sidereal(angles.ascendant, sidereal))
}
