//! Bodies and signs shared by every stage of the chart pipeline.

use crate::sidereal::normalize_degrees;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The nine grahas tracked by the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    /// Ascending lunar node.
    Rahu,
    /// Descending lunar node, always derived from Rahu.
    Ketu,
}

/// How a body's raw position is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Derivation {
    /// Queried from the ephemeris provider.
    Direct,
    /// Reflection of another body: longitude + 180, latitude and speed negated.
    AntipodeOf(Body),
}

impl Body {
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Rahu,
        Body::Ketu,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Rahu => "rahu",
            Body::Ketu => "ketu",
        }
    }

    pub fn derivation(self) -> Derivation {
        match self {
            Body::Ketu => Derivation::AntipodeOf(Body::Rahu),
            _ => Derivation::Direct,
        }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Body {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = match s.trim().to_lowercase().as_str() {
            "sun" => Body::Sun,
            "moon" => Body::Moon,
            "mercury" => Body::Mercury,
            "venus" => Body::Venus,
            "mars" => Body::Mars,
            "jupiter" => Body::Jupiter,
            "saturn" => Body::Saturn,
            "rahu" | "north_node" => Body::Rahu,
            "ketu" | "south_node" => Body::Ketu,
            other => return Err(format!("Unknown body: {}", other)),
        };
        Ok(body)
    }
}

pub const SIGN_SPAN: f64 = 30.0;

/// `floor(longitude / 30)` on the normalized longitude.
pub fn sign_index(longitude: f64) -> usize {
    ((normalize_degrees(longitude) / SIGN_SPAN).floor() as usize).min(11)
}

/// Degrees past the start of the containing sign, in [0, 30).
pub fn degree_in_sign(longitude: f64) -> f64 {
    let lon = normalize_degrees(longitude);
    (lon - sign_index(lon) as f64 * SIGN_SPAN).max(0.0)
}

/// Rashi, a 30 degree division of the sidereal zodiac.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    pub fn from_index(index: usize) -> Self {
        SIGNS[index % 12]
    }

    pub fn from_longitude(longitude: f64) -> Self {
        SIGNS[sign_index(longitude)]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }

    /// Classical sign lord. The nodes rule no sign.
    pub fn lord(self) -> Body {
        match self {
            ZodiacSign::Aries | ZodiacSign::Scorpio => Body::Mars,
            ZodiacSign::Taurus | ZodiacSign::Libra => Body::Venus,
            ZodiacSign::Gemini | ZodiacSign::Virgo => Body::Mercury,
            ZodiacSign::Cancer => Body::Moon,
            ZodiacSign::Leo => Body::Sun,
            ZodiacSign::Sagittarius | ZodiacSign::Pisces => Body::Jupiter,
            ZodiacSign::Capricorn | ZodiacSign::Aquarius => Body::Saturn,
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_from_str_accepts_aliases() {
        assert_eq!("MOON".parse::<Body>().unwrap(), Body::Moon);
        assert_eq!("north_node".parse::<Body>().unwrap(), Body::Rahu);
        assert_eq!(" South_Node ".parse::<Body>().unwrap(), Body::Ketu);
        assert!("pluto".parse::<Body>().is_err());
    }

    #[test]
    fn test_only_ketu_is_derived() {
        for body in Body::ALL {
            let expected = if body == Body::Ketu {
                Derivation::AntipodeOf(Body::Rahu)
            } else {
                Derivation::Direct
            };
            assert_eq!(body.derivation(), expected);
        }
    }

    #[test]
    fn test_sign_index_roundtrip_and_lords() {
        for i in 0..12 {
            assert_eq!(ZodiacSign::from_index(i).index(), i);
        }
        assert_eq!(ZodiacSign::from_index(12), ZodiacSign::Aries);
        assert_eq!(ZodiacSign::Cancer.lord(), Body::Moon);
        assert_eq!(ZodiacSign::Aquarius.lord(), Body::Saturn);
    }

    #[test]
    fn test_sign_index_is_cyclic() {
        for k in -3i32..=3 {
            let shift = 360.0 * f64::from(k);
            assert_eq!(sign_index(95.0 + shift), 3);
            assert_eq!(sign_index(200.0 + shift), 6);
            assert_eq!(sign_index(0.0 + shift), 0);
        }
        assert_eq!(ZodiacSign::from_longitude(359.9), ZodiacSign::Pisces);
        assert!((degree_in_sign(95.5) - 5.5).abs() < 1e-12);
    }
}
