use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{PlacesError, PlacesProvider};
use crate::config::PlacesConfig;
use crate::constants::places::{
    DETAILS_FIELD_MASK, INCLUDED_TYPE, SEARCH_FIELD_MASK, UNKNOWN_NAME,
};
use crate::domain::{PlaceId, PriceLevel};
use crate::models::{PlaceQuery, PlaceResult};

const API_KEY_HEADER: &str = "X-Goog-Api-Key";
const FIELD_MASK_HEADER: &str = "X-Goog-FieldMask";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchTextBody {
    text_query: String,
    max_result_count: u32,
    included_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    location_bias: Option<LocationBias>,
}

#[derive(Debug, Serialize)]
struct LocationBias {
    circle: Circle,
}

#[derive(Debug, Serialize)]
struct Circle {
    center: LatLng,
    radius: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct SearchTextResponse {
    #[serde(default)]
    places: Vec<ApiPlace>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiPlace {
    #[serde(default)]
    id: String,
    display_name: Option<LocalizedText>,
    formatted_address: Option<String>,
    location: Option<LatLng>,
    rating: Option<f64>,
    price_level: Option<String>,
    #[serde(default)]
    photos: Vec<ApiPhoto>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiPhoto {
    name: String,
}

/// Client for the Places API (New) REST surface.
#[derive(Clone)]
pub struct GooglePlacesClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    max_result_count: u32,
    photo_max_px: u32,
}

impl GooglePlacesClient {
    /// Builds a dedicated client honouring the configured timeout.
    pub fn new(config: &PlacesConfig) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_seconds))
            .user_agent(concat!("DineAround/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_shared_client(client, config))
    }

    /// Reuses an existing client so connections are pooled across services.
    #[must_use]
    pub fn with_shared_client(client: Client, config: &PlacesConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config
                .api_key
                .clone()
                .filter(|k| !k.trim().is_empty()),
            max_result_count: config.max_result_count,
            photo_max_px: config.photo_max_px,
        }
    }

    fn api_key(&self) -> Result<&str, PlacesError> {
        self.api_key.as_deref().ok_or(PlacesError::MissingApiKey)
    }

    fn search_body(&self, query: &PlaceQuery) -> SearchTextBody {
        SearchTextBody {
            text_query: query.provider_text(),
            max_result_count: self.max_result_count,
            included_type: INCLUDED_TYPE,
            location_bias: query.location.map(|point| LocationBias {
                circle: Circle {
                    center: LatLng {
                        latitude: point.lat,
                        longitude: point.lng,
                    },
                    radius: query.radius_meters,
                },
            }),
        }
    }

    fn photo_url(&self, photo_name: &str, api_key: &str) -> String {
        format!(
            "{}/v1/{}/media?maxHeightPx={px}&maxWidthPx={px}&key={}",
            self.base_url,
            photo_name,
            urlencoding::encode(api_key),
            px = self.photo_max_px,
        )
    }

    fn map_place(&self, place: ApiPlace, api_key: &str) -> PlaceResult {
        let photo_url = place
            .photos
            .first()
            .map(|photo| self.photo_url(&photo.name, api_key));

        PlaceResult {
            google_place_id: place.id,
            name: place
                .display_name
                .and_then(|n| n.text)
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_NAME.to_string()),
            address: place.formatted_address,
            lat: place.location.as_ref().map(|l| l.latitude),
            lng: place.location.as_ref().map(|l| l.longitude),
            rating: place.rating,
            price_level: place
                .price_level
                .as_deref()
                .and_then(PriceLevel::from_provider)
                .map(i32::from),
            photo_url,
            cuisine_type: cuisine_hint(&place.types),
        }
    }

    async fn error_from_response(response: reqwest::Response) -> PlacesError {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        warn!(status, body = %body, "Google Places API returned an error");
        PlacesError::Status { status, body }
    }
}

#[async_trait::async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn search_text(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>, PlacesError> {
        let api_key = self.api_key()?;
        let body = self.search_body(query);
        debug!(text_query = %body.text_query, biased = body.location_bias.is_some(), "Searching places");

        let response = self
            .client
            .post(format!("{}/v1/places:searchText", self.base_url))
            .header(API_KEY_HEADER, api_key)
            .header(FIELD_MASK_HEADER, SEARCH_FIELD_MASK)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            metrics::counter!("places_requests_total", "operation" => "search", "outcome" => "error")
                .increment(1);
            return Err(Self::error_from_response(response).await);
        }

        let payload: SearchTextResponse = response.json().await?;
        metrics::counter!("places_requests_total", "operation" => "search", "outcome" => "success")
            .increment(1);

        Ok(payload
            .places
            .into_iter()
            .map(|p| self.map_place(p, api_key))
            .collect())
    }

    async fn place_details(&self, place_id: &PlaceId) -> Result<Option<PlaceResult>, PlacesError> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(format!("{}/v1/places/{}", self.base_url, place_id))
            .header(API_KEY_HEADER, api_key)
            .header(FIELD_MASK_HEADER, DETAILS_FIELD_MASK)
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            metrics::counter!("places_requests_total", "operation" => "details", "outcome" => "not_found")
                .increment(1);
            return Ok(None);
        }

        if !response.status().is_success() {
            metrics::counter!("places_requests_total", "operation" => "details", "outcome" => "error")
                .increment(1);
            return Err(Self::error_from_response(response).await);
        }

        let place: ApiPlace = response.json().await?;
        metrics::counter!("places_requests_total", "operation" => "details", "outcome" => "success")
            .increment(1);

        Ok(Some(self.map_place(place, api_key)))
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Coarse cuisine label from the provider's type tags.
///
/// Food-related tags are `restaurant*`, `*_restaurant` and anything mentioning
/// `food`. The first specific tag wins (`japanese_restaurant` gives
/// `Japanese`); if only generic ones matched the label is `Restaurant`.
#[must_use]
pub fn cuisine_hint(types: &[String]) -> Option<String> {
    let food_related: Vec<&str> = types
        .iter()
        .map(String::as_str)
        .filter(|t| t.starts_with("restaurant") || t.ends_with("_restaurant") || t.contains("food"))
        .collect();

    if food_related.is_empty() {
        return None;
    }

    let specific = food_related.iter().find_map(|tag| {
        let stem = tag
            .trim_end_matches("restaurant")
            .trim_start_matches("restaurant")
            .trim_matches('_');
        (!stem.is_empty() && stem != "food").then(|| humanize_tag(stem))
    });

    Some(specific.unwrap_or_else(|| "Restaurant".to_string()))
}

fn humanize_tag(tag: &str) -> String {
    tag.split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
