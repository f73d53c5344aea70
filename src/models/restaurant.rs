use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::restaurants;

/// One candidate returned by the places provider, already normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceResult {
    pub google_place_id: String,
    pub name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub rating: Option<f64>,
    pub price_level: Option<i32>,
    pub photo_url: Option<String>,
    pub cuisine_type: Option<String>,
}

/// Restaurant as returned to clients.
///
/// `id` and `cached_at` are only present when the record came from the
/// store; an uncached fallback carries neither.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub google_place_id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuisine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cached_at: Option<DateTime<Utc>>,
}

impl Restaurant {
    #[must_use]
    pub fn uncached(place: PlaceResult) -> Self {
        Self {
            id: None,
            google_place_id: place.google_place_id,
            name: place.name,
            address: place.address,
            lat: place.lat,
            lng: place.lng,
            rating: place.rating,
            price_level: place.price_level,
            photo_url: place.photo_url,
            cuisine_type: place.cuisine_type,
            cached_at: None,
        }
    }

    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.id.is_some()
    }
}

impl From<restaurants::Model> for Restaurant {
    fn from(m: restaurants::Model) -> Self {
        let cached_at = DateTime::parse_from_rfc3339(&m.cached_at)
            .ok()
            .map(|t| t.with_timezone(&Utc));

        Self {
            id: Some(m.id),
            google_place_id: m.google_place_id,
            name: m.name,
            address: m.address,
            lat: m.lat,
            lng: m.lng,
            rating: m.rating,
            price_level: m.price_level,
            photo_url: m.photo_url,
            cuisine_type: m.cuisine_type,
            cached_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place() -> PlaceResult {
        PlaceResult {
            google_place_id: "place-1".to_string(),
            name: "Sushi Zen".to_string(),
            address: None,
            lat: Some(1.5),
            lng: Some(2.5),
            rating: Some(4.6),
            price_level: Some(3),
            photo_url: None,
            cuisine_type: Some("Japanese".to_string()),
        }
    }

    #[test]
    fn uncached_fallback_omits_store_fields() {
        let restaurant = Restaurant::uncached(place());
        assert!(!restaurant.is_cached());

        let json = serde_json::to_value(&restaurant).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("cached_at").is_none());
        assert!(json.get("address").is_none());
        assert_eq!(json["google_place_id"], "place-1");
        assert_eq!(json["price_level"], 3);
        assert_eq!(json["cuisine_type"], "Japanese");
    }

    #[test]
    fn from_model_parses_timestamp() {
        let model = restaurants::Model {
            id: "abc".to_string(),
            google_place_id: "place-1".to_string(),
            name: "Sushi Zen".to_string(),
            address: Some("1 Main St".to_string()),
            lat: None,
            lng: None,
            rating: Some(4.0),
            price_level: None,
            photo_url: None,
            cuisine_type: None,
            cached_at: "2026-01-02T03:04:05.678Z".to_string(),
        };

        let restaurant = Restaurant::from(model);
        assert!(restaurant.is_cached());
        assert_eq!(
            restaurant.cached_at.unwrap().to_rfc3339(),
            "2026-01-02T03:04:05.678+00:00"
        );
    }
}
