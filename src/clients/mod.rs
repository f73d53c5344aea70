pub mod google_places;

use crate::domain::PlaceId;
use crate::models::{PlaceQuery, PlaceResult};
use thiserror::Error;

/// Failures talking to the places provider.
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("Google Places API key not configured")]
    MissingApiKey,

    #[error("Google Places API error: {status}")]
    Status { status: u16, body: String },

    #[error("Google Places request failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl PlacesError {
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }
}

/// Outbound seam for the places provider.
///
/// The HTTP implementation is [`google_places::GooglePlacesClient`]; tests
/// inject in-process fakes.
#[async_trait::async_trait]
pub trait PlacesProvider: Send + Sync {
    /// Runs one text search and maps every returned place, in provider order.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::MissingApiKey`] before any request is sent
    /// - [`PlacesError::Status`] on a non-success response
    async fn search_text(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>, PlacesError>;

    /// Fetches one place by id. `Ok(None)` when the provider does not know it.
    async fn place_details(&self, place_id: &PlaceId) -> Result<Option<PlaceResult>, PlacesError>;

    fn is_configured(&self) -> bool;
}
