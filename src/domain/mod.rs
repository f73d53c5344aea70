//! Domain primitives for the restaurant search flow.
//!
//! Newtypes keep provider identifiers, coordinates and price tiers from being
//! mixed up with plain strings and numbers as they cross the gateway.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::limits::MAX_PLACE_ID_CHARS;

/// Provider-assigned place identifier, the natural key of the cache.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted so the value can be
/// interpolated into a provider URL path.
///
/// # Examples
///
/// ```rust
/// use dinearound::domain::PlaceId;
///
/// let id = PlaceId::parse("ChIJN1t_tDeuEmsRUsoyG83frY4").unwrap();
/// assert_eq!(id.as_str(), "ChIJN1t_tDeuEmsRUsoyG83frY4");
/// assert!(PlaceId::parse("../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlaceId(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlaceIdError {
    #[error("place id cannot be empty")]
    Empty,

    #[error("place id must be 256 characters or less")]
    TooLong,

    #[error("place id can only contain letters, numbers, hyphens, and underscores")]
    InvalidCharacters,
}

impl PlaceId {
    pub fn parse(raw: &str) -> Result<Self, PlaceIdError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PlaceIdError::Empty);
        }
        if trimmed.len() > MAX_PLACE_ID_CHARS {
            return Err(PlaceIdError::TooLong);
        }
        if !trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(PlaceIdError::InvalidCharacters);
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Returns `None` unless both components are finite and in range.
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        valid.then_some(Self { lat, lng })
    }
}

/// Ordinal price tier, 0 (free) through 4 (very expensive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PriceLevel(u8);

impl PriceLevel {
    pub const MAX: u8 = 4;

    #[must_use]
    pub const fn new(level: u8) -> Option<Self> {
        if level <= Self::MAX {
            Some(Self(level))
        } else {
            None
        }
    }

    /// Converts the provider's `PRICE_LEVEL_*` enum string.
    ///
    /// A numeric suffix (`PRICE_LEVEL_2`) is accepted as well as the named
    /// tiers. `PRICE_LEVEL_UNSPECIFIED` and unknown labels yield `None`.
    #[must_use]
    pub fn from_provider(label: &str) -> Option<Self> {
        let tier = label.trim().trim_start_matches("PRICE_LEVEL_");
        let level = match tier {
            "FREE" => 0,
            "INEXPENSIVE" => 1,
            "MODERATE" => 2,
            "EXPENSIVE" => 3,
            "VERY_EXPENSIVE" => 4,
            other => other.parse::<u8>().ok()?,
        };
        Self::new(level)
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "$".repeat(usize::from(self.0.max(1))))
    }
}

impl From<PriceLevel> for i32 {
    fn from(level: PriceLevel) -> Self {
        Self::from(level.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_id_accepts_provider_ids() {
        let id = PlaceId::parse("  ChIJ-abc_123 ").unwrap();
        assert_eq!(id.as_str(), "ChIJ-abc_123");
        assert_eq!(id.to_string(), "ChIJ-abc_123");
    }

    #[test]
    fn place_id_rejects_path_like_input() {
        assert_eq!(PlaceId::parse(""), Err(PlaceIdError::Empty));
        assert_eq!(PlaceId::parse("   "), Err(PlaceIdError::Empty));
        assert_eq!(
            PlaceId::parse("a/b"),
            Err(PlaceIdError::InvalidCharacters)
        );
        assert_eq!(
            PlaceId::parse("a?key=x"),
            Err(PlaceIdError::InvalidCharacters)
        );
        assert_eq!(
            PlaceId::parse(&"a".repeat(MAX_PLACE_ID_CHARS + 1)),
            Err(PlaceIdError::TooLong)
        );
    }

    #[test]
    fn geo_point_range_checks() {
        assert!(GeoPoint::new(35.6762, 139.6503).is_some());
        assert!(GeoPoint::new(-90.0, 180.0).is_some());
        assert!(GeoPoint::new(90.1, 0.0).is_none());
        assert!(GeoPoint::new(0.0, -180.5).is_none());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn price_level_from_named_tiers() {
        assert_eq!(PriceLevel::from_provider("PRICE_LEVEL_FREE"), PriceLevel::new(0));
        assert_eq!(
            PriceLevel::from_provider("PRICE_LEVEL_INEXPENSIVE"),
            PriceLevel::new(1)
        );
        assert_eq!(
            PriceLevel::from_provider("PRICE_LEVEL_MODERATE"),
            PriceLevel::new(2)
        );
        assert_eq!(
            PriceLevel::from_provider("PRICE_LEVEL_EXPENSIVE"),
            PriceLevel::new(3)
        );
        assert_eq!(
            PriceLevel::from_provider("PRICE_LEVEL_VERY_EXPENSIVE"),
            PriceLevel::new(4)
        );
    }

    #[test]
    fn price_level_numeric_and_unknown() {
        assert_eq!(PriceLevel::from_provider("PRICE_LEVEL_3"), PriceLevel::new(3));
        assert_eq!(PriceLevel::from_provider("PRICE_LEVEL_UNSPECIFIED"), None);
        assert_eq!(PriceLevel::from_provider("PRICE_LEVEL_9"), None);
        assert_eq!(PriceLevel::from_provider("cheap"), None);
    }

    #[test]
    fn price_level_display() {
        assert_eq!(PriceLevel::new(0).unwrap().to_string(), "$");
        assert_eq!(PriceLevel::new(3).unwrap().to_string(), "$$$");
    }

    #[test]
    fn price_level_stores_as_integer() {
        let stored: Vec<i32> = ["PRICE_LEVEL_FREE", "PRICE_LEVEL_VERY_EXPENSIVE"]
            .into_iter()
            .filter_map(PriceLevel::from_provider)
            .map(i32::from)
            .collect();
        assert_eq!(stored, vec![0, 4]);
        assert!(PriceLevel::new(PriceLevel::MAX + 1).is_none());
    }
}
