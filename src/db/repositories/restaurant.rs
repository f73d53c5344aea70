use crate::entities::{prelude::*, restaurants};
use crate::models::PlaceResult;
use anyhow::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, Set};

/// Fixed-width UTC timestamps so string comparison in SQL orders correctly.
#[must_use]
pub fn format_timestamp(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub struct RestaurantRepository {
    conn: DatabaseConnection,
}

impl RestaurantRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get_by_place_id(&self, google_place_id: &str) -> Result<Option<restaurants::Model>> {
        let row = Restaurants::find()
            .filter(restaurants::Column::GooglePlaceId.eq(google_place_id))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Returns the row only if it was refreshed at or after `fresh_since`.
    pub async fn get_fresh(
        &self,
        google_place_id: &str,
        fresh_since: DateTime<Utc>,
    ) -> Result<Option<restaurants::Model>> {
        let row = Restaurants::find()
            .filter(restaurants::Column::GooglePlaceId.eq(google_place_id))
            .filter(restaurants::Column::CachedAt.gte(format_timestamp(fresh_since)))
            .one(&self.conn)
            .await?;
        Ok(row)
    }

    /// Insert-or-update keyed on `google_place_id`.
    ///
    /// The internal id is only assigned on first insert; a conflicting write
    /// replaces every data column and `cached_at` but keeps the id.
    pub async fn upsert(
        &self,
        place: &PlaceResult,
        cached_at: DateTime<Utc>,
    ) -> Result<restaurants::Model> {
        let active_model = restaurants::ActiveModel {
            id: Set(uuid::Uuid::new_v4().to_string()),
            google_place_id: Set(place.google_place_id.clone()),
            name: Set(place.name.clone()),
            address: Set(place.address.clone()),
            lat: Set(place.lat),
            lng: Set(place.lng),
            rating: Set(place.rating),
            price_level: Set(place.price_level),
            photo_url: Set(place.photo_url.clone()),
            cuisine_type: Set(place.cuisine_type.clone()),
            cached_at: Set(format_timestamp(cached_at)),
        };

        Restaurants::insert(active_model)
            .on_conflict(
                OnConflict::column(restaurants::Column::GooglePlaceId)
                    .update_columns([
                        restaurants::Column::Name,
                        restaurants::Column::Address,
                        restaurants::Column::Lat,
                        restaurants::Column::Lng,
                        restaurants::Column::Rating,
                        restaurants::Column::PriceLevel,
                        restaurants::Column::PhotoUrl,
                        restaurants::Column::CuisineType,
                        restaurants::Column::CachedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.conn)
            .await?;

        self.get_by_place_id(&place.google_place_id)
            .await?
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "restaurant {} missing after upsert",
                    place.google_place_id
                )
            })
    }

    pub async fn count_for_place_id(&self, google_place_id: &str) -> Result<u64> {
        let count = Restaurants::find()
            .filter(restaurants::Column::GooglePlaceId.eq(google_place_id))
            .count(&self.conn)
            .await?;
        Ok(count)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Restaurants::find().count(&self.conn).await?)
    }
}
