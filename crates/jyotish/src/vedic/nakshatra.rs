//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters) of 3°20'.

use crate::sidereal::normalize_degrees;
use crate::vedic::types::Body;
use serde::{Deserialize, Serialize};

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = 360.0 / 108.0;

// (slug, display_name, lord)
pub const NAKSHATRA_ORDER: [(&str, &str, Body); NAKSHATRA_COUNT] = [
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: BaseNakshatraRecord,
    /// Degrees already traversed inside the nakshatra.
    pub offset: f64,
    /// `offset` as a fraction of the nakshatra span, in [0, 1).
    pub progress: f64,
    pub pada: u8,
    pub pada_fraction: f64,
}

/// Nakshatra placement of a body or angle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    #[serde(rename = "nakshatraId")]
    pub nakshatra_id: String,
    #[serde(rename = "nakshatraName")]
    pub nakshatra_name: String,
    pub index: usize,
    pub lord: Body,
    pub pada: u8,
    #[serde(rename = "degreeInNakshatra")]
    pub degree_in_nakshatra: f64,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// `floor(longitude / (360/27))` on the normalized longitude.
pub fn nakshatra_index(longitude: f64) -> usize {
    let lon = normalize_degrees(longitude);
    ((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(NAKSHATRA_COUNT - 1)
}

/// Pada 1..=4 of the normalized longitude.
pub fn pada(longitude: f64) -> u8 {
    let lon = normalize_degrees(longitude);
    let within = lon - nakshatra_index(lon) as f64 * NAKSHATRA_SEGMENT_SIZE;
    ((within.max(0.0) / PADA_SIZE).floor() as u8).min(3) + 1
}

pub fn nakshatra_lord(index: usize) -> Body {
    NAKSHATRA_ORDER[index % NAKSHATRA_COUNT].2
}

/// Return metadata for the nakshatra containing the given longitude.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let index = nakshatra_index(lon);
    let entry = &NAKSHATRA_TABLE[index];

    let offset = (lon - entry.start).max(0.0);
    let pada = pada(lon);
    let pada_offset = offset - f64::from(pada - 1) * PADA_SIZE;

    NakshatraMetadata {
        base: entry.clone(),
        offset,
        progress: (lon / NAKSHATRA_SEGMENT_SIZE - index as f64).clamp(0.0, 1.0),
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}

pub fn build_placement(longitude: f64) -> NakshatraPlacement {
    let metadata = get_nakshatra_for_longitude(longitude);
    NakshatraPlacement {
        nakshatra_id: metadata.base.id,
        nakshatra_name: metadata.base.name,
        index: metadata.base.index,
        lord: metadata.base.lord,
        pada: metadata.pada,
        degree_in_nakshatra: metadata.offset,
    }
}
