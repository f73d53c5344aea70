use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::limits::{DEFAULT_RADIUS_METERS, MAX_QUERY_CHARS, MAX_RADIUS_METERS};
use crate::domain::GeoPoint;

/// Query-string shape of a search request before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPlaceQuery {
    pub q: Option<String>,
    pub lat: Option<String>,
    pub lng: Option<String>,
    pub radius: Option<String>,
}

/// A validated restaurant search.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceQuery {
    pub text: String,
    pub location: Option<GeoPoint>,
    pub radius_meters: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every problem found in a raw query, reported together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid query parameters: {}", join_details(.details))]
pub struct QueryError {
    pub details: Vec<FieldError>,
}

fn join_details(details: &[FieldError]) -> String {
    details
        .iter()
        .map(|d| format!("{}: {}", d.field, d.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl PlaceQuery {
    pub fn parse(raw: &RawPlaceQuery) -> Result<Self, QueryError> {
        let mut details = Vec::new();

        let text = raw.q.as_deref().map(str::trim).unwrap_or_default();
        if text.is_empty() {
            details.push(FieldError {
                field: "q",
                message: "Search query cannot be empty".to_string(),
            });
        } else if text.chars().count() > MAX_QUERY_CHARS {
            details.push(FieldError {
                field: "q",
                message: format!("Search query must be {MAX_QUERY_CHARS} characters or less"),
            });
        }

        let radius_meters = match non_blank(raw.radius.as_deref()) {
            None => DEFAULT_RADIUS_METERS,
            Some(value) => match value.parse::<u32>() {
                Ok(r) if (1..=MAX_RADIUS_METERS).contains(&r) => r,
                _ => {
                    details.push(FieldError {
                        field: "radius",
                        message: format!(
                            "Radius must be an integer between 1 and {MAX_RADIUS_METERS} meters"
                        ),
                    });
                    DEFAULT_RADIUS_METERS
                }
            },
        };

        // A lone latitude or longitude is ignored rather than rejected.
        let location = match (non_blank(raw.lat.as_deref()), non_blank(raw.lng.as_deref())) {
            (Some(lat), Some(lng)) => {
                let point = lat
                    .parse::<f64>()
                    .ok()
                    .zip(lng.parse::<f64>().ok())
                    .and_then(|(lat, lng)| GeoPoint::new(lat, lng));
                if point.is_none() {
                    details.push(FieldError {
                        field: "location",
                        message: "lat must be within [-90, 90] and lng within [-180, 180]"
                            .to_string(),
                    });
                }
                point
            }
            _ => None,
        };

        if !details.is_empty() {
            return Err(QueryError { details });
        }

        Ok(Self {
            text: text.to_string(),
            location,
            radius_meters,
        })
    }

    /// Text sent to the provider. Location-biased searches are nudged
    /// towards restaurants explicitly.
    #[must_use]
    pub fn provider_text(&self) -> String {
        if self.location.is_some() {
            format!("{} restaurant", self.text)
        } else {
            self.text.clone()
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
