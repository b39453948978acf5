pub mod adapter;
pub mod types;

pub use adapter::{resolve_ephemeris_path, SwissEphemerisAdapter, DEFAULT_EPHE_PATH};
pub use types::{
    EphemerisError, EphemerisProvider, EphemerisSettings, NodeModel, RawAngles, RawPosition,
};
