use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// City row from the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct City {
    pub id: i64,
    pub province: String,
    pub country: String,
    pub country_code: String,
    pub country_population: i64,
}

/// Dated case-count row belonging to a city
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct DataRecord {
    pub id: i64,
    pub city_id: i64,
    pub date: String,
    pub confirmed: i64,
    pub deaths: i64,
    pub recovered: i64,
}

/// Request body for POST /create_city
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCity {
    pub province: String,
    pub country: String,
    pub country_code: String,
    pub country_population: i64,
}

/// Request body for POST /create_data
///
/// The date is parsed at the schema layer; a malformed date is rejected
/// before it reaches the database.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateData {
    pub date: NaiveDate,
    #[serde(default)]
    pub confirmed: i64,
    #[serde(default)]
    pub deaths: i64,
    #[serde(default)]
    pub recovered: i64,
}

/// Response for GET /sync_coronavirus_data/jhu
#[derive(Debug, Serialize, Deserialize)]
pub struct SyncResponse {
    pub message: String,
}

/// Top-level shape of the JHU locations feed
#[derive(Debug, Deserialize)]
pub struct LocationsFeed {
    pub locations: Vec<FeedLocation>,
}

/// One location entry from the feed
///
/// `timelines` is only present when the feed is requested with
/// `timelines=true`.
#[derive(Debug, Deserialize)]
pub struct FeedLocation {
    pub province: String,
    pub country: String,
    pub country_code: String,
    pub country_population: i64,
    #[serde(default)]
    pub timelines: Option<FeedTimelines>,
}

#[derive(Debug, Deserialize)]
pub struct FeedTimelines {
    pub confirmed: FeedTimeline,
    pub deaths: FeedTimeline,
}

/// Timestamp -> cumulative count. BTreeMap keeps the dates in order.
#[derive(Debug, Deserialize)]
pub struct FeedTimeline {
    pub timeline: BTreeMap<String, i64>,
}
