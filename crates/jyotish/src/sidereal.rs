//! Ayanamsa (precession correction) and tropical to sidereal conversion.
//!
//! Each model is defined by its value at J2000.0; the offset at any other
//! instant adds the IAU 2006 general precession in ecliptic longitude.
//! The model is passed explicitly to every conversion so no process-wide
//! sidereal mode exists.

use crate::time::TimeInstant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Supported sidereal reference systems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AyanamsaModel {
    /// Chitrapaksha: Spica at 0 Libra sidereal.
    #[default]
    Lahiri,
    Krishnamurti,
    Raman,
    FaganBradley,
    Yukteshwar,
    DeLuce,
    DjwhalKhul,
}

const MODELS: &[(&str, AyanamsaModel)] = &[
    ("lahiri", AyanamsaModel::Lahiri),
    ("chitrapaksha", AyanamsaModel::Lahiri),
    ("krishnamurti", AyanamsaModel::Krishnamurti),
    ("raman", AyanamsaModel::Raman),
    ("fagan_bradley", AyanamsaModel::FaganBradley),
    ("yukteshwar", AyanamsaModel::Yukteshwar),
    ("de_luce", AyanamsaModel::DeLuce),
    ("djwhal_khul", AyanamsaModel::DjwhalKhul),
];

impl AyanamsaModel {
    /// Ayanamsa at J2000.0 in degrees.
    pub const fn reference_j2000_deg(self) -> f64 {
        match self {
            Self::Lahiri => 23.853,
            Self::Krishnamurti => 23.850,
            Self::Raman => 22.370,
            Self::FaganBradley => 24.736,
            Self::Yukteshwar => 22.376,
            Self::DeLuce => 21.619,
            Self::DjwhalKhul => 22.883,
        }
    }

    pub fn name(self) -> &'static str {
        MODELS
            .iter()
            .find(|(_, model)| *model == self)
            .map(|(name, _)| *name)
            .unwrap_or("lahiri")
    }

    pub fn valid_names() -> Vec<String> {
        MODELS.iter().map(|(name, _)| name.to_string()).collect()
    }
}

impl fmt::Display for AyanamsaModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AyanamsaModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        MODELS
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, model)| *model)
            .ok_or_else(|| {
                format!(
                    "Invalid ayanamsa: {}. Valid ayanamsas: {:?}",
                    s,
                    Self::valid_names()
                )
            })
    }
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// IAU 2006 general precession in ecliptic longitude, in degrees.
fn general_precession_deg(t: f64) -> f64 {
    let t2 = t * t;
    let t3 = t2 * t;
    let t4 = t3 * t;
    let t5 = t4 * t;
    let arcsec =
        5028.796195 * t + 1.1054348 * t2 + 0.00007964 * t3 - 0.000023857 * t4 - 0.0000000383 * t5;
    arcsec / 3600.0
}

/// Ayanamsa in degrees for one instant.
pub fn ayanamsa(instant: TimeInstant, model: AyanamsaModel) -> f64 {
    let t = instant.centuries_since_j2000();
    normalize_degrees(model.reference_j2000_deg() + general_precession_deg(t))
}

/// `normalize(tropical - ayanamsa)`.
pub fn to_sidereal(tropical: f64, ayanamsa_deg: f64) -> f64 {
    normalize_degrees(tropical - ayanamsa_deg)
}

/// Ayanamsa bound to one instant, computed once per chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiderealCorrector {
    pub model: AyanamsaModel,
    pub ayanamsa: f64,
}

impl SiderealCorrector {
    pub fn new(instant: TimeInstant, model: AyanamsaModel) -> Self {
        let value = ayanamsa(instant, model);
        log::debug!("Ayanamsa {} at JD {:.6}: {:.6}", model, instant.julian_day(), value);
        Self {
            model,
            ayanamsa: value,
        }
    }

    pub fn to_sidereal(&self, tropical: f64) -> f64 {
        to_sidereal(tropical, self.ayanamsa)
    }
}
