pub mod calculator;
pub mod types;

pub use calculator::{angular_separation, AspectCalculator};
pub use types::{AspectCore, AspectKind, AspectOrbs, AspectPair, AspectSettings, BodyAspect};
