//! Vimshottari dasha calculation.
//!
//! A 120 year cycle shared among nine lords in a fixed order. The period in
//! force at birth belongs to the lord of the Moon's nakshatra, and only the
//! untraversed fraction of that nakshatra is still owed from birth onward.

use crate::error::ChartError;
use crate::time::TimeInstant;
use crate::vedic::nakshatra::{build_placement, get_nakshatra_for_longitude, NakshatraPlacement};
use crate::vedic::positions::ClassifiedBodies;
use crate::vedic::types::Body;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const VIMSHOTTARI_TOTAL_YEARS: f64 = 120.0;
pub const VIMSHOTTARI_YEAR_DAYS: f64 = 365.25;
pub const AVERAGE_MONTH_DAYS: f64 = 30.44;

const VIMSHOTTARI_SEQUENCE: [(Body, f64); 9] = [
    (Body::Ketu, 7.0),
    (Body::Venus, 20.0),
    (Body::Sun, 6.0),
    (Body::Moon, 10.0),
    (Body::Mars, 7.0),
    (Body::Rahu, 18.0),
    (Body::Jupiter, 16.0),
    (Body::Saturn, 19.0),
    (Body::Mercury, 17.0),
];

/// Full Vimshottari period of a lord, in years.
pub fn dasha_years(lord: Body) -> f64 {
    VIMSHOTTARI_SEQUENCE[sequence_index(lord)].1
}

/// Lords in cycle order.
pub fn vimshottari_order() -> [Body; 9] {
    VIMSHOTTARI_SEQUENCE.map(|(lord, _)| lord)
}

/// Lord following `lord` in the cycle.
pub fn next_lord(lord: Body) -> Body {
    VIMSHOTTARI_SEQUENCE[(sequence_index(lord) + 1) % VIMSHOTTARI_SEQUENCE.len()].0
}

fn sequence_index(lord: Body) -> usize {
    // Every body appears exactly once in the cycle.
    VIMSHOTTARI_SEQUENCE
        .iter()
        .position(|(p, _)| *p == lord)
        .unwrap_or(0)
}

/// Whole years, months and days of a span measured in years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl DurationBreakdown {
    /// 365.25-day years and 30.44-day months.
    pub fn from_years(years: f64) -> Self {
        let total_days = years.max(0.0) * VIMSHOTTARI_YEAR_DAYS;
        let whole_years = (total_days / VIMSHOTTARI_YEAR_DAYS + 1e-9).floor();
        let rest = (total_days - whole_years * VIMSHOTTARI_YEAR_DAYS).max(0.0);
        let months = (rest / AVERAGE_MONTH_DAYS + 1e-9).floor();
        let days = (rest - months * AVERAGE_MONTH_DAYS + 1e-9).floor().max(0.0);
        Self {
            years: whole_years as u32,
            months: months as u32,
            days: days as u32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaPeriod {
    pub lord: Body,
    pub start: TimeInstant,
    pub end: TimeInstant,
    #[serde(rename = "startDate")]
    pub start_date: DateTime<Utc>,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "durationYears")]
    pub duration_years: f64,
}

impl DashaPeriod {
    fn new(lord: Body, start: TimeInstant, duration_years: f64) -> Result<Self, ChartError> {
        let end = start.add_days(duration_years * VIMSHOTTARI_YEAR_DAYS);
        Ok(Self {
            lord,
            start,
            end,
            start_date: to_date(start)?,
            end_date: to_date(end)?,
            duration_years,
        })
    }

    pub fn contains(&self, instant: TimeInstant) -> bool {
        self.start <= instant && instant < self.end
    }
}

/// The period running at birth, split into elapsed and remaining parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentDasha {
    pub lord: Body,
    /// Moon's nakshatra at birth
    pub nakshatra: NakshatraPlacement,
    /// Fraction of the nakshatra traversed at birth, in [0, 1)
    pub progress: f64,
    /// Birth minus the elapsed part of the period
    #[serde(rename = "nominalStart")]
    pub nominal_start: TimeInstant,
    #[serde(rename = "nominalStartDate")]
    pub nominal_start_date: DateTime<Utc>,
    pub end: TimeInstant,
    #[serde(rename = "endDate")]
    pub end_date: DateTime<Utc>,
    #[serde(rename = "elapsedYears")]
    pub elapsed_years: f64,
    #[serde(rename = "remainingYears")]
    pub remaining_years: f64,
    pub elapsed: DurationBreakdown,
    pub remaining: DurationBreakdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashaSchedule {
    pub system: String,
    pub birth: TimeInstant,
    #[serde(rename = "birthDate")]
    pub birth_date: DateTime<Utc>,
    pub current: CurrentDasha,
    /// Current period followed by the eight that complete the cycle
    pub sequence: Vec<DashaPeriod>,
}

impl DashaSchedule {
    /// Period in force at `instant`, if it falls inside the schedule.
    pub fn period_at(&self, instant: TimeInstant) -> Option<&DashaPeriod> {
        self.sequence.iter().find(|p| p.contains(instant))
    }
}

fn to_date(instant: TimeInstant) -> Result<DateTime<Utc>, ChartError> {
    instant.to_utc().ok_or_else(|| {
        ChartError::dasha(format!(
            "JD {} is outside the representable date range",
            instant.julian_day()
        ))
    })
}

/// Compute the Vimshottari schedule from the Moon's sidereal longitude.
pub fn compute_vimshottari_dasha(
    birth: TimeInstant,
    moon_longitude: f64,
) -> Result<DashaSchedule, ChartError> {
    if !moon_longitude.is_finite() {
        return Err(ChartError::dasha("Moon longitude is not finite"));
    }

    let moon_meta = get_nakshatra_for_longitude(moon_longitude);
    let birth_lord = moon_meta.base.lord;
    let progress = moon_meta.progress;
    let full_years = dasha_years(birth_lord);
    let remaining_years = full_years * (1.0 - progress);
    let elapsed_years = full_years * progress;

    let start_index = sequence_index(birth_lord);
    let mut sequence = Vec::with_capacity(VIMSHOTTARI_SEQUENCE.len());
    let mut current_start = birth;
    for offset in 0..VIMSHOTTARI_SEQUENCE.len() {
        let (lord, years) = VIMSHOTTARI_SEQUENCE[(start_index + offset) % VIMSHOTTARI_SEQUENCE.len()];
        let effective_years = if offset == 0 { remaining_years } else { years };
        let period = DashaPeriod::new(lord, current_start, effective_years)?;
        current_start = period.end;
        sequence.push(period);
    }

    let nominal_start = birth.add_days(-elapsed_years * VIMSHOTTARI_YEAR_DAYS);
    let current = CurrentDasha {
        lord: birth_lord,
        nakshatra: build_placement(moon_longitude),
        progress,
        nominal_start,
        nominal_start_date: to_date(nominal_start)?,
        end: sequence[0].end,
        end_date: sequence[0].end_date,
        elapsed_years,
        remaining_years,
        elapsed: DurationBreakdown::from_years(elapsed_years),
        remaining: DurationBreakdown::from_years(remaining_years),
    };

    log::debug!(
        "Vimshottari: birth lord {} with {:.4} of {} years remaining",
        birth_lord,
        remaining_years,
        full_years
    );

    Ok(DashaSchedule {
        system: "vimshottari".to_string(),
        birth,
        birth_date: to_date(birth)?,
        current,
        sequence,
    })
}

/// Compute the schedule from a classified body set; the Moon is required.
pub fn compute_from_positions(
    birth: TimeInstant,
    bodies: &ClassifiedBodies,
) -> Result<DashaSchedule, ChartError> {
    let moon = bodies.get(Body::Moon).ok_or_else(|| {
        ChartError::dasha("Moon position required for Vimshottari dasha calculation")
    })?;
    compute_vimshottari_dasha(birth, moon.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::J2000_JD;

    #[test]
    fn test_cycle_sums_to_120_years() {
        let total: f64 = VIMSHOTTARI_SEQUENCE.iter().map(|(_, years)| years).sum();
        assert_eq!(total, VIMSHOTTARI_TOTAL_YEARS);
    }

    #[test]
    fn test_next_lord_wraps() {
        assert_eq!(next_lord(Body::Ketu), Body::Venus);
        assert_eq!(next_lord(Body::Mercury), Body::Ketu);
    }

    #[test]
    fn test_breakdown() {
        let b = DurationBreakdown::from_years(7.0);
        assert_eq!(b, DurationBreakdown { years: 7, months: 0, days: 0 });

        let b = DurationBreakdown::from_years(2.5);
        assert_eq!(b.years, 2);
        assert_eq!(b.months, 5);
        assert_eq!(b.days, 30);
    }

    #[test]
    fn test_moon_at_zero_owes_full_ketu_period() {
        let birth = TimeInstant::from_julian_day(J2000_JD);
        let schedule = compute_vimshottari_dasha(birth, 0.0).unwrap();
        assert_eq!(schedule.current.lord, Body::Ketu);
        assert_eq!(schedule.current.remaining_years, 7.0);
        assert_eq!(schedule.current.elapsed_years, 0.0);
        assert_eq!(schedule.sequence.len(), 9);
        assert_eq!(schedule.sequence[1].lord, Body::Venus);
    }

    #[test]
    fn test_missing_moon_is_fatal() {
        let birth = TimeInstant::from_julian_day(J2000_JD);
        let result = compute_from_positions(birth, &ClassifiedBodies::default());
        assert!(matches!(result, Err(ChartError::DashaCalculation { .. })));
    }
}
