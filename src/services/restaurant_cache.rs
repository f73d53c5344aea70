//! Lookup-or-store cache for restaurants returned by the places provider.
//!
//! Rows are keyed by the provider's place id. A row refreshed within the TTL
//! is served as-is; anything else is upserted with the caller's values. Write
//! failures never fail the caller: the uncached input is handed back instead.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::db::Store;
use crate::models::{PlaceResult, Restaurant};

/// Domain seam for the result cache.
///
/// # Examples
///
/// ```rust,ignore
/// use dinearound::services::RestaurantCache;
///
/// async fn example(cache: &dyn RestaurantCache, place: PlaceResult) {
///     let restaurant = cache.cache_or_get(place).await;
///     println!("{}", restaurant.name);
/// }
/// ```
#[async_trait::async_trait]
pub trait RestaurantCache: Send + Sync {
    /// Returns the cached record for `place`, refreshing it when stale.
    ///
    /// Infallible by contract: persistence problems degrade to returning
    /// `place` uncached.
    async fn cache_or_get(&self, place: PlaceResult) -> Restaurant;
}

/// SeaORM-backed [`RestaurantCache`].
pub struct SeaOrmRestaurantCache {
    store: Store,
    /// `None` when the configured hours do not fit a `Duration`.
    ttl: Option<Duration>,
}

impl SeaOrmRestaurantCache {
    #[must_use]
    pub fn new(store: Store, ttl_hours: i64) -> Self {
        Self {
            store,
            ttl: Duration::try_hours(ttl_hours),
        }
    }

    /// Same as [`RestaurantCache::cache_or_get`] with an explicit clock.
    pub async fn cache_or_get_at(&self, place: PlaceResult, now: DateTime<Utc>) -> Restaurant {
        if place.google_place_id.is_empty() {
            metrics::counter!("restaurant_cache_total", "outcome" => "skipped").increment(1);
            return Restaurant::uncached(place);
        }

        // An unrepresentable cutoff means nothing can be proven fresh.
        let fresh_since = self.ttl.and_then(|ttl| now.checked_sub_signed(ttl));
        let lookup = match fresh_since {
            Some(since) => {
                self.store
                    .get_fresh_restaurant(&place.google_place_id, since)
                    .await
            }
            None => Ok(None),
        };

        match lookup {
            Ok(Some(row)) => {
                metrics::counter!("restaurant_cache_total", "outcome" => "hit").increment(1);
                return Restaurant::from(row);
            }
            Ok(None) => {}
            Err(e) => {
                debug!(
                    place_id = %place.google_place_id,
                    error = %e,
                    "Restaurant cache lookup failed, treating as miss"
                );
            }
        }

        match self.store.upsert_restaurant(&place, now).await {
            Ok(row) => {
                metrics::counter!("restaurant_cache_total", "outcome" => "miss").increment(1);
                Restaurant::from(row)
            }
            Err(e) => {
                metrics::counter!("restaurant_cache_total", "outcome" => "write_failed")
                    .increment(1);
                warn!(
                    place_id = %place.google_place_id,
                    error = %e,
                    "Failed to cache restaurant, returning uncached result"
                );
                Restaurant::uncached(place)
            }
        }
    }
}

#[async_trait::async_trait]
impl RestaurantCache for SeaOrmRestaurantCache {
    async fn cache_or_get(&self, place: PlaceResult) -> Restaurant {
        self.cache_or_get_at(place, Utc::now()).await
    }
}
