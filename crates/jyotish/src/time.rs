//! Birth-time normalization.
//!
//! Turns a civil birth record (local date, time and zone) into a single
//! continuous [`TimeInstant`], the Julian Day (UT) shared by every later stage.

use crate::error::ChartError;
use chrono::{
    DateTime, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Julian Day of the Unix epoch, 1970-01-01T00:00:00Z.
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;
/// Julian Day of J2000.0.
pub const J2000_JD: f64 = 2_451_545.0;
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Civil birth data as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirthRecord {
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM` or `HH:MM:SS`, local clock time.
    pub time: String,
    /// IANA zone name (`Asia/Kolkata`) or fixed offset (`+05:30`, `UTC`).
    pub timezone: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl BirthRecord {
    pub fn validate_location(&self) -> Result<(), ChartError> {
        if !self.latitude.is_finite() || !(-90.0..=90.0).contains(&self.latitude) {
            return Err(ChartError::InvalidLocation {
                message: format!("latitude {} outside [-90, 90]", self.latitude),
            });
        }
        if !self.longitude.is_finite() || !(-180.0..=180.0).contains(&self.longitude) {
            return Err(ChartError::InvalidLocation {
                message: format!("longitude {} outside [-180, 180]", self.longitude),
            });
        }
        Ok(())
    }
}

/// Absolute instant as a Julian Day number in UT, fractional part included.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeInstant(f64);

impl TimeInstant {
    pub fn from_julian_day(jd: f64) -> Self {
        Self(jd)
    }

    pub fn julian_day(self) -> f64 {
        self.0
    }

    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        let seconds = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_nanos()) * 1e-9;
        Self(UNIX_EPOCH_JD + seconds / SECONDS_PER_DAY)
    }

    /// Nearest whole-millisecond UTC timestamp, `None` outside chrono's range.
    pub fn to_utc(self) -> Option<DateTime<Utc>> {
        if !self.0.is_finite() {
            return None;
        }
        let millis = ((self.0 - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
        if millis.abs() > i64::MAX as f64 {
            return None;
        }
        DateTime::<Utc>::from_timestamp_millis(millis as i64)
    }

    pub fn add_days(self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Julian centuries since J2000.0.
    pub fn centuries_since_j2000(self) -> f64 {
        (self.0 - J2000_JD) / 36525.0
    }
}

/// Resolved UTC offset source for a birth record.
#[derive(Debug, Clone, Copy)]
enum Zone {
    Fixed(FixedOffset),
    Named(Tz),
}

/// Convert a birth record's local civil time into a [`TimeInstant`].
pub fn normalize_birth_time(record: &BirthRecord) -> Result<TimeInstant, ChartError> {
    let utc = local_to_utc(record)?;
    let instant = TimeInstant::from_utc(utc);
    log::info!(
        "Julian Day calculated: {:.6} for {} {} {} (UTC {})",
        instant.julian_day(),
        record.date,
        record.time,
        record.timezone,
        utc.to_rfc3339()
    );
    Ok(instant)
}

/// Resolve the local civil time to UTC, rolling day/month/year as needed.
pub fn local_to_utc(record: &BirthRecord) -> Result<DateTime<Utc>, ChartError> {
    let date = parse_date(&record.date)?;
    let time = parse_time(&record.time)?;
    let local = NaiveDateTime::new(date, time);

    match parse_zone(&record.timezone)? {
        Zone::Fixed(offset) => resolve_local(&offset, local, &record.timezone),
        Zone::Named(tz) => resolve_local(&tz, local, &record.timezone),
    }
}

fn resolve_local<Z: TimeZone>(
    zone: &Z,
    local: NaiveDateTime,
    zone_name: &str,
) -> Result<DateTime<Utc>, ChartError> {
    match zone.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // Repeated wall-clock hour: take the first occurrence.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        // Skipped wall-clock time: read it with the offset in force before
        // the gap, which lands past the transition by the same amount.
        LocalResult::None => {
            let before = local - chrono::Duration::days(1);
            zone.from_local_datetime(&before)
                .earliest()
                .map(|dt| dt.offset().fix().local_minus_utc())
                .map(|offset| {
                    let naive_utc = local - chrono::Duration::seconds(offset.into());
                    Utc.from_utc_datetime(&naive_utc)
                })
                .ok_or_else(|| {
                    ChartError::time(format!("{} does not exist in zone {}", local, zone_name))
                })
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| ChartError::time(format!("invalid date '{}': {}", value, e)))
}

fn parse_time(value: &str) -> Result<NaiveTime, ChartError> {
    let value = value.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|e| ChartError::time(format!("invalid time '{}': {}", value, e)))
}

fn parse_zone(value: &str) -> Result<Zone, ChartError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ChartError::time("timezone is empty"));
    }
    if let Some(offset) = parse_fixed_offset(value) {
        return Ok(Zone::Fixed(offset));
    }
    value
        .parse::<Tz>()
        .map(Zone::Named)
        .map_err(|_| ChartError::time(format!("unrecognized timezone '{}'", value)))
}

/// Accepts `Z`, `UTC`, `GMT`, `+05:30`, `-0345`, `+7`, optionally prefixed
/// with `UTC`/`GMT`.
fn parse_fixed_offset(value: &str) -> Option<FixedOffset> {
    let upper = value.to_uppercase();
    if matches!(upper.as_str(), "Z" | "UTC" | "GMT") {
        return FixedOffset::east_opt(0);
    }
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper);

    let (sign, digits) = match rest.chars().next()? {
        '+' => (1, &rest[1..]),
        '-' => (-1, &rest[1..]),
        _ => return None,
    };
    if !digits.bytes().all(|b| b.is_ascii_digit() || b == b':') {
        return None;
    }

    let (hours, minutes) = match digits.split_once(':') {
        Some((h, m)) => (h.parse::<i32>().ok()?, m.parse::<i32>().ok()?),
        None if digits.len() == 4 => (digits[..2].parse().ok()?, digits[2..].parse().ok()?),
        None if !digits.is_empty() && digits.len() <= 2 => (digits.parse().ok()?, 0),
        None => return None,
    };
    if hours > 14 || minutes >= 60 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
