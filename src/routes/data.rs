use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::db;
use crate::error::ApiError;
use crate::models::{CreateData, DataRecord};
use crate::AppState;

// Query parameters for creating data: ?city=Hubei
#[derive(Deserialize)]
pub struct CreateDataQuery {
    city: String,
}

// Query parameters for listing data
#[derive(Deserialize)]
pub struct ListDataQuery {
    #[serde(default)]
    city: Option<String>,
    #[serde(default)]
    skip: i64,
    #[serde(default = "default_limit")]
    limit: i64,
}

fn default_limit() -> i64 {
    10
}

// POST /create_data?city=Hubei - Record a dated case count for a city
pub async fn create_data(
    State(state): State<AppState>,
    Query(params): Query<CreateDataQuery>,
    Json(payload): Json<CreateData>,
) -> Result<Json<DataRecord>, ApiError> {
    let city = db::get_city_by_name(&state.pool, &params.city)
        .await?
        .ok_or(ApiError::CityNotFound)?;

    let record = db::create_data(
        &state.pool,
        city.id,
        &payload.date.to_string(),
        payload.confirmed,
        payload.deaths,
        payload.recovered,
    )
    .await?;

    Ok(Json(record))
}

// GET /get_data?city=Hubei&skip=0&limit=10 - List data, optionally filtered by city
pub async fn get_data(
    State(state): State<AppState>,
    Query(params): Query<ListDataQuery>,
) -> Result<Json<Vec<DataRecord>>, ApiError> {
    // An empty ?city= means no filter, like the original's falsy check.
    let city = params.city.as_deref().filter(|c| !c.is_empty());
    let data = db::get_data(&state.pool, city, params.skip, params.limit).await?;
    Ok(Json(data))
}
