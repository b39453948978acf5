pub mod dashas;
pub mod houses;
pub mod nakshatra;
pub mod positions;
pub mod types;

pub use dashas::{
    compute_from_positions, compute_vimshottari_dasha, CurrentDasha, DashaPeriod, DashaSchedule,
    DurationBreakdown,
};
pub use houses::{resolve_ascendant, whole_sign_houses, Ascendant, HouseCusp};
pub use nakshatra::{build_placement, get_nakshatra_for_longitude, NakshatraPlacement};
pub use positions::{calculate_positions, BodyPosition, ClassifiedBodies, SkippedBody};
pub use types::{Body, ZodiacSign};
