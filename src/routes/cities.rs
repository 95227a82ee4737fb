use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::db;
use crate::error::ApiError;
use crate::models::{City, CreateCity};
use crate::AppState;

// Query parameters for listing cities
#[derive(Deserialize)]
pub struct ListCitiesQuery {
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    10
}

// POST /create_city - Register a new city
pub async fn create_city(
    State(state): State<AppState>,
    Json(payload): Json<CreateCity>,
) -> Result<Json<City>, ApiError> {
    // Check-then-insert, same as the original service. Two concurrent
    // creates with the same province can still race past this lookup.
    if db::get_city_by_name(&state.pool, &payload.province).await?.is_some() {
        return Err(ApiError::DuplicateCity);
    }

    let city = db::create_city(&state.pool, &payload).await?;
    Ok(Json(city))
}

// GET /city/:name - Look up a city by province name
pub async fn get_city_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<City>, ApiError> {
    let city = db::get_city_by_name(&state.pool, &name)
        .await?
        .ok_or(ApiError::CityNotFound)?;

    Ok(Json(city))
}

// GET /cities?skip=0&limit=10 - List cities with pagination
pub async fn get_cities(
    State(state): State<AppState>,
    Query(params): Query<ListCitiesQuery>,
) -> Result<Json<Vec<City>>, ApiError> {
    let cities = db::get_cities(&state.pool, params.skip, params.limit).await?;
    Ok(Json(cities))
}
