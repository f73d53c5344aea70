use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use std::sync::Arc;
use tracing::info;

use super::{ApiError, AppState};
use crate::models::{RawPlaceQuery, Restaurant};

/// `GET /api/restaurants/search?q=&lat=&lng=&radius=`
///
/// Responds with a bare JSON array of restaurants in provider order.
pub async fn search_restaurants(
    State(state): State<Arc<AppState>>,
    params: Result<Query<RawPlaceQuery>, QueryRejection>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let Query(params) = params?;
    let restaurants = state.search_service().search_raw(&params).await?;
    Ok(Json(restaurants))
}

/// `GET /api/restaurants/{place_id}`
pub async fn get_restaurant(
    State(state): State<Arc<AppState>>,
    Path(place_id): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    match state.search_service().details(&place_id).await? {
        Some(restaurant) => Ok(Json(restaurant)),
        None => {
            info!(place_id = %place_id, "Place not known to provider");
            Err(ApiError::not_found("Restaurant", place_id))
        }
    }
}
