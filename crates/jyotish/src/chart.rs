//! The chart pipeline.
//!
//! [`ChartEngine::compute_chart`] runs every stage in order: time
//! normalization, ayanamsa, ascendant and houses, body classification,
//! aspects and the Vimshottari schedule. The narrower views reuse the same
//! stages but stop as early as their output allows.

use crate::aspects::{AspectCalculator, AspectOrbs, AspectPair, AspectSettings};
use crate::ephemeris::{EphemerisError, EphemerisProvider, EphemerisSettings, NodeModel};
use crate::error::ChartError;
use crate::sidereal::{normalize_degrees, AyanamsaModel, SiderealCorrector};
use crate::time::{normalize_birth_time, BirthRecord, TimeInstant};
use crate::vedic::dashas::{compute_from_positions, compute_vimshottari_dasha, DashaSchedule};
use crate::vedic::houses::{resolve_ascendant, whole_sign_houses, Ascendant, HouseCusp};
use crate::vedic::nakshatra::{build_placement, NakshatraPlacement};
use crate::vedic::positions::{calculate_positions, BodyPosition, ClassifiedBodies, SkippedBody};
use crate::vedic::types::{Body, Derivation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Chart options; every field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub ayanamsa: AyanamsaModel,
    pub node_model: NodeModel,
    pub orbs: AspectOrbs,
    pub include_aspects: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            ayanamsa: AyanamsaModel::default(),
            node_model: NodeModel::default(),
            orbs: AspectOrbs::default(),
            include_aspects: true,
        }
    }
}

impl ChartSettings {
    pub fn ephemeris_settings(&self) -> EphemerisSettings {
        EphemerisSettings {
            node_model: self.node_model,
        }
    }

    pub fn aspect_settings(&self) -> AspectSettings {
        AspectSettings { orbs: self.orbs }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AyanamsaValue {
    pub model: AyanamsaModel,
    pub degrees: f64,
}

/// Everything computed for one birth record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    #[serde(rename = "julianDay")]
    pub instant: TimeInstant,
    pub utc: DateTime<Utc>,
    pub ayanamsa: AyanamsaValue,
    pub ascendant: Ascendant,
    pub houses: Vec<HouseCusp>,
    pub planets: Vec<BodyPosition>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedBody>,
    pub aspects: Vec<AspectPair>,
    pub dashas: DashaSchedule,
}

impl ChartResult {
    pub fn planet(&self, body: Body) -> Option<&BodyPosition> {
        self.planets.iter().find(|p| p.body == body)
    }
}

/// Nakshatra of a single body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyNakshatra {
    pub body: Body,
    pub longitude: f64,
    #[serde(flatten)]
    pub placement: NakshatraPlacement,
}

/// Runs chart computations against an ephemeris provider.
///
/// The engine holds no mutable state; one instance can serve concurrent
/// requests as long as the provider can.
pub struct ChartEngine<P> {
    provider: P,
    settings: ChartSettings,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    pub fn new(provider: P, settings: ChartSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &ChartSettings {
        &self.settings
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn prepare(&self, record: &BirthRecord) -> Result<(TimeInstant, SiderealCorrector), ChartError> {
        record.validate_location()?;
        let instant = normalize_birth_time(record)?;
        let corrector = SiderealCorrector::new(instant, self.settings.ayanamsa);
        Ok((instant, corrector))
    }

    fn ascendant_at(
        &self,
        record: &BirthRecord,
        instant: TimeInstant,
        corrector: &SiderealCorrector,
    ) -> Result<Ascendant, ChartError> {
        resolve_ascendant(
            &self.provider,
            instant,
            record.latitude,
            record.longitude,
            corrector,
            &self.settings.ephemeris_settings(),
        )
    }

    /// Full chart for one birth record.
    pub fn compute_chart(&self, record: &BirthRecord) -> Result<ChartResult, ChartError> {
        let (instant, corrector) = self.prepare(record)?;
        let utc = instant
            .to_utc()
            .ok_or_else(|| ChartError::time("instant outside the representable date range"))?;

        let ascendant = self.ascendant_at(record, instant, &corrector)?;
        let houses = whole_sign_houses(ascendant.sign_index);

        let classified = calculate_positions(
            &self.provider,
            instant,
            ascendant.sign_index,
            &corrector,
            &self.settings.ephemeris_settings(),
        )?;
        let dashas = compute_from_positions(instant, &classified)?;

        let ClassifiedBodies {
            positions: mut planets,
            skipped,
        } = classified;

        let aspects = if self.settings.include_aspects {
            let calculator = AspectCalculator::new();
            let pairs = calculator.compute_aspects(&planets, &self.settings.aspect_settings());
            calculator.annotate_positions(&mut planets, &pairs);
            pairs
        } else {
            Vec::new()
        };

        log::info!(
            "Chart computed: {} bodies, {} skipped, {} aspects, ascendant in {}",
            planets.len(),
            skipped.len(),
            aspects.len(),
            ascendant.sign
        );

        Ok(ChartResult {
            instant,
            utc,
            ayanamsa: AyanamsaValue {
                model: corrector.model,
                degrees: corrector.ayanamsa,
            },
            ascendant,
            houses,
            planets,
            skipped,
            aspects,
            dashas,
        })
    }

    /// Classified bodies without aspects or dashas.
    pub fn positions(&self, record: &BirthRecord) -> Result<ClassifiedBodies, ChartError> {
        let (instant, corrector) = self.prepare(record)?;
        let ascendant = self.ascendant_at(record, instant, &corrector)?;
        calculate_positions(
            &self.provider,
            instant,
            ascendant.sign_index,
            &corrector,
            &self.settings.ephemeris_settings(),
        )
    }

    pub fn ascendant(&self, record: &BirthRecord) -> Result<Ascendant, ChartError> {
        let (instant, corrector) = self.prepare(record)?;
        self.ascendant_at(record, instant, &corrector)
    }

    pub fn houses(&self, record: &BirthRecord) -> Result<Vec<HouseCusp>, ChartError> {
        let ascendant = self.ascendant(record)?;
        Ok(whole_sign_houses(ascendant.sign_index))
    }

    /// Vimshottari schedule; only the Moon is queried.
    pub fn dasha_schedule(&self, record: &BirthRecord) -> Result<DashaSchedule, ChartError> {
        let (instant, corrector) = self.prepare(record)?;
        let moon = self
            .sidereal_longitude(instant, Body::Moon, &corrector)
            .map_err(|e| {
                ChartError::dasha(format!(
                    "Moon position required for Vimshottari dasha calculation: {}",
                    e
                ))
            })?;
        compute_vimshottari_dasha(instant, moon)
    }

    /// Nakshatra of the named body, or `None` when its position could not be
    /// calculated.
    pub fn nakshatra_of(
        &self,
        record: &BirthRecord,
        body_name: &str,
    ) -> Result<Option<BodyNakshatra>, ChartError> {
        let body: Body = body_name.parse().map_err(|_| ChartError::UnknownBody {
            name: body_name.to_string(),
            valid: Body::ALL.iter().map(|b| b.id().to_string()).collect(),
        })?;

        let (instant, corrector) = self.prepare(record)?;
        match self.sidereal_longitude(instant, body, &corrector) {
            Ok(longitude) => Ok(Some(BodyNakshatra {
                body,
                longitude,
                placement: build_placement(longitude),
            })),
            Err(e) => {
                log::warn!("Failed to calculate position for {}: {}; skipping", body, e);
                Ok(None)
            }
        }
    }

    fn sidereal_longitude(
        &self,
        instant: TimeInstant,
        body: Body,
        corrector: &SiderealCorrector,
    ) -> Result<f64, EphemerisError> {
        match body.derivation() {
            Derivation::Direct => {
                let raw = self
                    .provider
                    .position(instant, body, &self.settings.ephemeris_settings())?
                    .ensure_finite()?;
                Ok(corrector.to_sidereal(raw.lon))
            }
            Derivation::AntipodeOf(source) => {
                let lon = self.sidereal_longitude(instant, source, corrector)?;
                Ok(normalize_degrees(lon + 180.0))
            }
        }
    }
}
