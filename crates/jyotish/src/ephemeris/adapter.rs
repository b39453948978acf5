use crate::ephemeris::types::{
    EphemerisError, EphemerisProvider, EphemerisSettings, NodeModel, RawAngles, RawPosition,
};
use crate::time::TimeInstant;
use crate::vedic::types::Body;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::Once;
use swisseph::swe::{calc_ut, houses_ex};
use swisseph::AscMc;

/// Default ephemeris data directory when nothing else is configured.
pub const DEFAULT_EPHE_PATH: &str = "./ephe";

// Swiss Ephemeris body numbers
const SE_SUN: u32 = 0;
const SE_MOON: u32 = 1;
const SE_MERCURY: u32 = 2;
const SE_VENUS: u32 = 3;
const SE_MARS: u32 = 4;
const SE_JUPITER: u32 = 5;
const SE_SATURN: u32 = 6;
const SE_MEAN_NODE: u32 = 10;
const SE_TRUE_NODE: u32 = 11;

const SEFLG_SWIEPH: u32 = 2;
const SEFLG_SPEED: u32 = 256;

const WHOLE_SIGN_HOUSES: u8 = b'W';

static EPHE_PATH_INIT: Once = Once::new();

/// Swiss Ephemeris provider.
///
/// Every request is computed tropically with flags derived from the
/// per-call [`EphemerisSettings`]; the adapter never toggles the library's
/// sidereal mode.
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
}

impl SwissEphemerisAdapter {
    /// Create an adapter, resolving the data directory from the argument,
    /// then `EPHE_PATH`, then `SWISS_EPHEMERIS_PATH`, then `./ephe`.
    ///
    /// The directory is handed to the library through `SE_EPHE_PATH` once per
    /// process, so construct the adapter during startup.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(resolve_ephemeris_path);

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        EPHE_PATH_INIT.call_once(|| {
            log::info!("Using ephemeris path: {}", path.display());
            env::set_var("SE_EPHE_PATH", &path);
        });

        Ok(Self {
            ephemeris_path: path,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }
}

/// Environment lookup for the ephemeris directory.
pub fn resolve_ephemeris_path() -> PathBuf {
    env::var("EPHE_PATH")
        .or_else(|_| env::var("SWISS_EPHEMERIS_PATH"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_EPHE_PATH))
}

fn body_code(body: Body, settings: &EphemerisSettings) -> Result<u32, EphemerisError> {
    let code = match body {
        Body::Sun => SE_SUN,
        Body::Moon => SE_MOON,
        Body::Mercury => SE_MERCURY,
        Body::Venus => SE_VENUS,
        Body::Mars => SE_MARS,
        Body::Jupiter => SE_JUPITER,
        Body::Saturn => SE_SATURN,
        Body::Rahu => match settings.node_model {
            NodeModel::True => SE_TRUE_NODE,
            NodeModel::Mean => SE_MEAN_NODE,
        },
        Body::Ketu => return Err(EphemerisError::UnsupportedBody { body }),
    };
    Ok(code)
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn position(
        &self,
        instant: TimeInstant,
        body: Body,
        settings: &EphemerisSettings,
    ) -> Result<RawPosition, EphemerisError> {
        let code = body_code(body, settings)?;
        let jd = instant.julian_day();

        let result = calc_ut(jd, code, SEFLG_SWIEPH | SEFLG_SPEED).map_err(|e| {
            EphemerisError::CalculationFailed {
                body,
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        RawPosition {
            lon: out[0],
            lat: out[1],
            speed_lon: out[3],
        }
        .ensure_finite()
    }

    fn houses(
        &self,
        instant: TimeInstant,
        latitude: f64,
        longitude: f64,
        _settings: &EphemerisSettings,
    ) -> Result<RawAngles, EphemerisError> {
        let (_cusps, angles) = houses_ex(
            instant.julian_day(),
            SEFLG_SWIEPH as i32,
            latitude,
            longitude,
            WHOLE_SIGN_HOUSES as i32,
        );
        let ascmc = AscMc::from_array(angles);

        if !ascmc.ascendant.is_finite() {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "no usable ascendant at latitude {:.4}, longitude {:.4}",
                    latitude, longitude
                ),
            });
        }

        Ok(RawAngles {
            ascendant: ascmc.ascendant,
            mc: ascmc.mc.is_finite().then_some(ascmc.mc),
        })
    }
}
