//! Scripted in-memory ephemeris shared by the integration tests.

#![allow(dead_code)]

use jyotish::ephemeris::{
    EphemerisError, EphemerisProvider, EphemerisSettings, RawAngles, RawPosition,
};
use jyotish::sidereal::{ayanamsa, AyanamsaModel};
use jyotish::time::normalize_birth_time;
use jyotish::{BirthRecord, Body, TimeInstant};
use std::cell::RefCell;
use std::collections::HashMap;

/// 2000-01-01 12:00 UT, exactly J2000.0.
pub fn j2000_record() -> BirthRecord {
    BirthRecord {
        date: "2000-01-01".to_string(),
        time: "12:00".to_string(),
        timezone: "UTC".to_string(),
        latitude: 28.6139,
        longitude: 77.2090,
    }
}

pub fn instant_of(record: &BirthRecord) -> TimeInstant {
    normalize_birth_time(record).unwrap()
}

/// Returns tropical values chosen so the engine sees the scripted sidereal
/// longitudes under the Lahiri model.
pub struct ScriptedProvider {
    ayanamsa: f64,
    positions: HashMap<Body, RawPosition>,
    ascendant: Option<f64>,
    pub queried: RefCell<Vec<Body>>,
}

impl ScriptedProvider {
    pub fn new(record: &BirthRecord) -> Self {
        Self {
            ayanamsa: ayanamsa(instant_of(record), AyanamsaModel::Lahiri),
            positions: HashMap::new(),
            ascendant: None,
            queried: RefCell::new(Vec::new()),
        }
    }

    pub fn with_body(mut self, body: Body, sidereal_lon: f64, speed: f64) -> Self {
        self.positions.insert(
            body,
            RawPosition {
                lon: sidereal_lon + self.ayanamsa,
                lat: 0.5,
                speed_lon: speed,
            },
        );
        self
    }

    pub fn with_raw(mut self, body: Body, raw: RawPosition) -> Self {
        self.positions.insert(body, raw);
        self
    }

    pub fn with_ascendant(mut self, sidereal_lon: f64) -> Self {
        self.ascendant = Some(sidereal_lon + self.ayanamsa);
        self
    }

    pub fn without(mut self, body: Body) -> Self {
        self.positions.remove(&body);
        self
    }

    /// A full sky: ascendant in Cancer, Moon 40% into Ardra.
    pub fn sample(record: &BirthRecord) -> Self {
        Self::new(record)
            .with_ascendant(95.0)
            .with_body(Body::Sun, 10.0, 1.0)
            .with_body(Body::Moon, 72.0, 13.2)
            .with_body(Body::Mercury, 100.0, 1.4)
            .with_body(Body::Venus, 130.0, 1.2)
            .with_body(Body::Mars, 201.0, -0.3)
            .with_body(Body::Jupiter, 250.0, 0.1)
            .with_body(Body::Saturn, 310.0, 0.05)
            .with_body(Body::Rahu, 40.0, -0.053)
    }
}

impl EphemerisProvider for ScriptedProvider {
    fn position(
        &self,
        instant: TimeInstant,
        body: Body,
        _settings: &EphemerisSettings,
    ) -> Result<RawPosition, EphemerisError> {
        self.queried.borrow_mut().push(body);
        self.positions
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::CalculationFailed {
                body,
                jd: instant.julian_day(),
                message: "scripted failure".to_string(),
            })
    }

    fn houses(
        &self,
        _instant: TimeInstant,
        _latitude: f64,
        _longitude: f64,
        _settings: &EphemerisSettings,
    ) -> Result<RawAngles, EphemerisError> {
        match self.ascendant {
            Some(ascendant) => Ok(RawAngles {
                ascendant,
                mc: None,
            }),
            None => Err(EphemerisError::HouseCalculationFailed {
                message: "scripted failure".to_string(),
            }),
        }
    }
}
