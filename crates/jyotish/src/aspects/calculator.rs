use crate::aspects::types::{AspectCore, AspectKind, AspectPair, AspectSettings, BodyAspect};
use crate::sidereal::normalize_degrees;
use crate::vedic::positions::BodyPosition;

/// Within this many degrees an aspect is reported as exact
const EXACT_THRESHOLD: f64 = 0.1;

/// Bodies moving together count as applying only this close to exact
const STATIONARY_WINDOW: f64 = 0.5;

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Compute aspects between every unordered pair of distinct bodies
    pub fn compute_aspects(
        &self,
        positions: &[BodyPosition],
        settings: &AspectSettings,
    ) -> Vec<AspectPair> {
        let mut pairs = Vec::new();
        for i in 0..positions.len() {
            for j in (i + 1)..positions.len() {
                let p1 = &positions[i];
                let p2 = &positions[j];
                if p1.body == p2.body {
                    continue;
                }

                if let Some(aspect) =
                    self.calculate_aspect(p1.longitude, p2.longitude, p1.speed, p2.speed, settings)
                {
                    pairs.push(AspectPair {
                        from: p1.body,
                        to: p2.body,
                        aspect,
                    });
                }
            }
        }
        pairs
    }

    /// Attach each aspect to both bodies involved
    pub fn annotate_positions(&self, positions: &mut [BodyPosition], pairs: &[AspectPair]) {
        for position in positions.iter_mut() {
            position.aspects.clear();
        }
        for pair in pairs {
            for position in positions.iter_mut() {
                let other = if position.body == pair.from {
                    pair.to
                } else if position.body == pair.to {
                    pair.from
                } else {
                    continue;
                };
                position.aspects.push(BodyAspect {
                    with: other,
                    aspect: pair.aspect.aspect_type,
                    orb: pair.aspect.orb,
                    is_applying: pair.aspect.is_applying,
                });
            }
        }
    }

    /// Classify the angle between two longitudes; the first aspect in
    /// priority order whose orb is satisfied wins
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        settings: &AspectSettings,
    ) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        AspectKind::PRIORITY.iter().find_map(|&kind| {
            let orb = (separation - kind.exact_angle()).abs();
            if orb > settings.orbs.orb(kind) {
                return None;
            }
            Some(AspectCore {
                aspect_type: kind,
                exact_angle: kind.exact_angle(),
                orb,
                is_applying: self.is_aspect_applying(
                    lon1,
                    lon2,
                    speed1,
                    speed2,
                    kind.exact_angle(),
                    separation,
                ),
                is_exact: orb < EXACT_THRESHOLD,
                is_retrograde: speed1 < 0.0 || speed2 < 0.0,
            })
        })
    }

    /// Determine if an aspect is applying (approaching exact) or separating
    fn is_aspect_applying(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        aspect_angle: f64,
        current_angle: f64,
    ) -> bool {
        let relative_speed = speed1 - speed2;

        // Direction is unreliable when the bodies move together
        if relative_speed.abs() < 0.01 {
            return (current_angle - aspect_angle).abs() < STATIONARY_WINDOW;
        }

        // Project a tenth of a day forward
        let time_step = 0.1;
        let future_angle =
            angular_separation(lon1 + speed1 * time_step, lon2 + speed2 * time_step);

        let current_distance = (current_angle - aspect_angle).abs();
        let future_distance = (future_angle - aspect_angle).abs();
        future_distance < current_distance
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Separation folded into [0, 180]
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let d = normalize_degrees(lon1 - lon2).abs();
    d.min(360.0 - d)
}
