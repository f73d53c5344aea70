use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::clients::{PlacesError, PlacesProvider};
use crate::domain::{PlaceId, PlaceIdError};
use crate::models::{PlaceQuery, QueryError, RawPlaceQuery, Restaurant};
use crate::services::restaurant_cache::RestaurantCache;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] QueryError),

    #[error("Invalid place id: {0}")]
    InvalidPlaceId(#[from] PlaceIdError),

    #[error("{0}")]
    Configuration(String),

    #[error("Places provider error: {message}")]
    Provider {
        status: Option<u16>,
        message: String,
    },
}

impl From<PlacesError> for SearchError {
    fn from(err: PlacesError) -> Self {
        match err {
            PlacesError::MissingApiKey => Self::Configuration(err.to_string()),
            PlacesError::Status { status, .. } => Self::Provider {
                status: Some(status),
                message: err.to_string(),
            },
            PlacesError::Http(e) => Self::Provider {
                status: e.status().map(|s| s.as_u16()),
                message: e.to_string(),
            },
        }
    }
}

/// Search gateway: validate, query the provider, cache every result.
pub struct RestaurantSearchService {
    provider: Arc<dyn PlacesProvider>,
    cache: Arc<dyn RestaurantCache>,
}

impl RestaurantSearchService {
    #[must_use]
    pub fn new(provider: Arc<dyn PlacesProvider>, cache: Arc<dyn RestaurantCache>) -> Self {
        Self { provider, cache }
    }

    /// Validates the raw request first; nothing is sent upstream when it fails.
    pub async fn search_raw(&self, raw: &RawPlaceQuery) -> Result<Vec<Restaurant>, SearchError> {
        let query = PlaceQuery::parse(raw)?;
        self.search(&query).await
    }

    /// Results keep the provider's order. A provider failure aborts the whole
    /// search; cache problems never do.
    pub async fn search(&self, query: &PlaceQuery) -> Result<Vec<Restaurant>, SearchError> {
        let places = self.provider.search_text(query).await?;
        debug!(count = places.len(), "Provider returned places");

        let restaurants = join_all(
            places
                .into_iter()
                .map(|place| self.cache.cache_or_get(place)),
        )
        .await;

        info!(
            query = %query.text,
            biased = query.location.is_some(),
            results = restaurants.len(),
            "Restaurant search completed"
        );

        Ok(restaurants)
    }

    pub async fn details(&self, raw_place_id: &str) -> Result<Option<Restaurant>, SearchError> {
        let place_id = PlaceId::parse(raw_place_id)?;

        match self.provider.place_details(&place_id).await? {
            Some(place) => Ok(Some(self.cache.cache_or_get(place).await)),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn provider_configured(&self) -> bool {
        self.provider.is_configured()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlaceResult;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeProvider {
        places: Vec<PlaceResult>,
        fail_status: Option<u16>,
        calls: AtomicUsize,
        last_query: Mutex<Option<PlaceQuery>>,
    }

    #[async_trait::async_trait]
    impl PlacesProvider for FakeProvider {
        async fn search_text(&self, query: &PlaceQuery) -> Result<Vec<PlaceResult>, PlacesError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.clone());
            if let Some(status) = self.fail_status {
                return Err(PlacesError::Status {
                    status,
                    body: "denied".to_string(),
                });
            }
            Ok(self.places.clone())
        }

        async fn place_details(
            &self,
            place_id: &PlaceId,
        ) -> Result<Option<PlaceResult>, PlacesError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .places
                .iter()
                .find(|p| p.google_place_id == place_id.as_str())
                .cloned())
        }

        fn is_configured(&self) -> bool {
            true
        }
    }

    /// Records every place it is asked to cache and echoes it back uncached.
    #[derive(Default)]
    struct RecordingCache {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait::async_trait]
    impl RestaurantCache for RecordingCache {
        async fn cache_or_get(&self, place: PlaceResult) -> Restaurant {
            self.seen.lock().unwrap().push(place.google_place_id.clone());
            Restaurant::uncached(place)
        }
    }

    fn place(id: &str) -> PlaceResult {
        PlaceResult {
            google_place_id: id.to_string(),
            name: format!("Place {id}"),
            address: None,
            lat: None,
            lng: None,
            rating: None,
            price_level: None,
            photo_url: None,
            cuisine_type: None,
        }
    }

    fn service(provider: Arc<FakeProvider>, cache: Arc<RecordingCache>) -> RestaurantSearchService {
        RestaurantSearchService::new(provider, cache)
    }

    fn raw(q: &str) -> RawPlaceQuery {
        RawPlaceQuery {
            q: Some(q.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn invalid_query_never_reaches_provider() {
        let provider = Arc::new(FakeProvider::default());
        let cache = Arc::new(RecordingCache::default());
        let service = service(provider.clone(), cache);

        for q in [String::new(), "   ".to_string(), "x".repeat(201)] {
            let err = service.search_raw(&raw(&q)).await.unwrap_err();
            assert!(matches!(err, SearchError::Validation(_)));
        }
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn caches_each_place_once_in_provider_order() {
        let provider = Arc::new(FakeProvider {
            places: vec![place("c"), place("a"), place("b")],
            ..Default::default()
        });
        let cache = Arc::new(RecordingCache::default());
        let service = service(provider.clone(), cache.clone());

        let results = service.search_raw(&raw("sushi")).await.unwrap();

        let ids: Vec<_> = results.iter().map(|r| r.google_place_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);

        let mut seen = cache.seen.lock().unwrap().clone();
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c"]);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn lone_latitude_sends_unbiased_query() {
        let provider = Arc::new(FakeProvider::default());
        let service = service(provider.clone(), Arc::new(RecordingCache::default()));

        let mut request = raw("pho");
        request.lat = Some("10.5".to_string());
        service.search_raw(&request).await.unwrap();

        let sent = provider.last_query.lock().unwrap().clone().unwrap();
        assert!(sent.location.is_none());
        assert_eq!(sent.provider_text(), "pho");
    }

    #[tokio::test]
    async fn provider_failure_aborts_without_caching() {
        let provider = Arc::new(FakeProvider {
            places: vec![place("a")],
            fail_status: Some(403),
            ..Default::default()
        });
        let cache = Arc::new(RecordingCache::default());
        let service = service(provider, cache.clone());

        let err = service.search_raw(&raw("sushi")).await.unwrap_err();

        assert!(matches!(
            err,
            SearchError::Provider {
                status: Some(403),
                ..
            }
        ));
        assert!(cache.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn details_validates_id_and_caches_hit() {
        let provider = Arc::new(FakeProvider {
            places: vec![place("known")],
            ..Default::default()
        });
        let cache = Arc::new(RecordingCache::default());
        let service = service(provider.clone(), cache.clone());

        assert!(matches!(
            service.details("../secret").await,
            Err(SearchError::InvalidPlaceId(_))
        ));
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);

        assert!(service.details("missing").await.unwrap().is_none());

        let found = service.details("known").await.unwrap().unwrap();
        assert_eq!(found.name, "Place known");
        assert_eq!(*cache.seen.lock().unwrap(), vec!["known".to_string()]);
    }

    #[test]
    fn missing_key_maps_to_configuration() {
        let err = SearchError::from(PlacesError::MissingApiKey);
        assert!(matches!(err, SearchError::Configuration(_)));
    }
}
