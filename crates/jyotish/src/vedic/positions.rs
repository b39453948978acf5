//! Body position classification.
//!
//! Raw tropical positions are converted to sidereal longitude and classified
//! into sign, nakshatra, pada, Whole-Sign house and retrograde status. A body
//! the provider cannot deliver is logged and skipped; the chart only fails
//! when nothing could be placed.

use crate::aspects::types::BodyAspect;
use crate::ephemeris::{EphemerisProvider, EphemerisSettings, RawPosition};
use crate::error::ChartError;
use crate::sidereal::{normalize_degrees, SiderealCorrector};
use crate::time::TimeInstant;
use crate::vedic::houses::whole_sign_house;
use crate::vedic::nakshatra::{build_placement, NakshatraPlacement};
use crate::vedic::types::{degree_in_sign, sign_index, Body, Derivation, ZodiacSign};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Sidereal longitude in [0, 360)
    pub longitude: f64,
    pub latitude: f64,
    /// Degrees per day
    pub speed: f64,
    pub sign: ZodiacSign,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
    #[serde(rename = "signLord")]
    pub sign_lord: Body,
    /// Degrees within the sign
    pub degree: f64,
    pub nakshatra: NakshatraPlacement,
    pub house: u8,
    pub retrograde: bool,
    #[serde(default)]
    pub aspects: Vec<BodyAspect>,
}

impl BodyPosition {
    /// Classify a body from its sidereal coordinates.
    pub fn classify(
        body: Body,
        sidereal_longitude: f64,
        latitude: f64,
        speed: f64,
        ascendant_sign: usize,
    ) -> Self {
        let longitude = normalize_degrees(sidereal_longitude);
        let index = sign_index(longitude);
        let sign = ZodiacSign::from_index(index);
        Self {
            body,
            longitude,
            latitude,
            speed,
            sign,
            sign_index: index,
            sign_lord: sign.lord(),
            degree: degree_in_sign(longitude),
            nakshatra: build_placement(longitude),
            house: whole_sign_house(index, ascendant_sign),
            retrograde: speed < 0.0,
            aspects: Vec::new(),
        }
    }

    /// The exact reflection of this position through the ecliptic centre.
    pub fn antipode(&self, body: Body, ascendant_sign: usize) -> Self {
        Self::classify(
            body,
            normalize_degrees(self.longitude + 180.0),
            -self.latitude,
            -self.speed,
            ascendant_sign,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedBody {
    pub body: Body,
    pub reason: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifiedBodies {
    pub positions: Vec<BodyPosition>,
    pub skipped: Vec<SkippedBody>,
}

impl ClassifiedBodies {
    pub fn get(&self, body: Body) -> Option<&BodyPosition> {
        self.positions.iter().find(|p| p.body == body)
    }

    fn skip(&mut self, error: ChartError) {
        log::warn!("{}; skipping", error);
        if let ChartError::PositionCalculation { body, source } = &error {
            self.skipped.push(SkippedBody {
                body: *body,
                reason: source.to_string(),
            });
        }
    }
}

/// Classify every tracked body, skipping the ones the provider fails on.
pub fn calculate_positions<P: EphemerisProvider>(
    provider: &P,
    instant: TimeInstant,
    ascendant_sign: usize,
    corrector: &SiderealCorrector,
    settings: &EphemerisSettings,
) -> Result<ClassifiedBodies, ChartError> {
    let mut classified = ClassifiedBodies::default();

    for body in Body::ALL {
        match body.derivation() {
            Derivation::Direct => {
                let raw = provider
                    .position(instant, body, settings)
                    .and_then(RawPosition::ensure_finite);
                match raw {
                    Ok(raw) => classified.positions.push(BodyPosition::classify(
                        body,
                        corrector.to_sidereal(raw.lon),
                        raw.lat,
                        raw.speed_lon,
                        ascendant_sign,
                    )),
                    Err(source) => classified.skip(ChartError::PositionCalculation { body, source }),
                }
            }
            Derivation::AntipodeOf(source_body) => match classified.get(source_body) {
                Some(source) => {
                    let derived = source.antipode(body, ascendant_sign);
                    classified.positions.push(derived);
                }
                None => {
                    log::warn!("{} derives from {}, which was skipped; skipping", body, source_body);
                    classified.skipped.push(SkippedBody {
                        body,
                        reason: format!("derived from {}, which could not be calculated", source_body),
                    });
                }
            },
        }
    }

    if classified.positions.is_empty() {
        return Err(ChartError::NoPositionsCalculated);
    }
    Ok(classified)
}
