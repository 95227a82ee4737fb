//! Background refresh of the city and data tables from the JHU feed.
//!
//! Two phases, each delete-then-reinsert with no surrounding transaction:
//! a crash mid-phase leaves that table empty, and readers can observe an
//! empty table while a phase is running. Non-200 responses skip the phase.
//! The city phase clears the data table before the city table because
//! data rows reference city ids.

use reqwest::Client;
use sqlx::sqlite::SqlitePool;

use crate::db;
use crate::models::{CreateCity, FeedLocation, LocationsFeed};

pub const DEFAULT_FEED_URL: &str = "https://coronavirus-tracker-api.herokuapp.com/v2/locations";

/// Run both sync phases. Never fails: every error is logged and the
/// remaining work continues, matching the original fire-and-forget job.
pub async fn run_sync(pool: &SqlitePool, client: &Client, feed_url: &str) {
    sync_cities(pool, client, feed_url).await;
    sync_data(pool, client, feed_url).await;
}

async fn fetch_feed(client: &Client, feed_url: &str, timelines: bool) -> Option<LocationsFeed> {
    let url = format!("{feed_url}?source=jhu&country_code=CN&timelines={timelines}");

    let response = match client.get(&url).send().await {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("Failed to fetch {}: {}", url, e);
            return None;
        }
    };

    if response.status() != reqwest::StatusCode::OK {
        tracing::warn!("Feed returned {} for {}, skipping phase", response.status(), url);
        return None;
    }

    match response.json::<LocationsFeed>().await {
        Ok(feed) => Some(feed),
        Err(e) => {
            tracing::error!("Failed to decode feed from {}: {}", url, e);
            None
        }
    }
}

async fn sync_cities(pool: &SqlitePool, client: &Client, feed_url: &str) {
    let Some(feed) = fetch_feed(client, feed_url, false).await else {
        return;
    };

    // Data rows hold foreign keys into city, so they have to go first or
    // the city delete fails once a previous sync has filled both tables.
    if let Err(e) = db::delete_all_data(pool).await {
        tracing::error!("Failed to clear data table: {}", e);
        return;
    }

    if let Err(e) = db::delete_all_cities(pool).await {
        tracing::error!("Failed to clear city table: {}", e);
        return;
    }

    let mut inserted = 0u64;
    for location in &feed.locations {
        let city = CreateCity {
            province: location.province.clone(),
            country: location.country.clone(),
            // The upstream job pins the code regardless of the feed value.
            country_code: "CN".to_string(),
            country_population: location.country_population,
        };

        match db::create_city(pool, &city).await {
            Ok(_) => inserted += 1,
            Err(e) => tracing::warn!("Failed to insert city {}: {}", location.province, e),
        }
    }

    tracing::info!("Synced {} cities", inserted);
}

async fn sync_data(pool: &SqlitePool, client: &Client, feed_url: &str) {
    let Some(feed) = fetch_feed(client, feed_url, true).await else {
        return;
    };

    if let Err(e) = db::delete_all_data(pool).await {
        tracing::error!("Failed to clear data table: {}", e);
        return;
    }

    let mut inserted = 0u64;
    for location in &feed.locations {
        inserted += sync_location_data(pool, location).await;
    }

    tracing::info!("Synced {} data records", inserted);
}

async fn sync_location_data(pool: &SqlitePool, location: &FeedLocation) -> u64 {
    let city = match db::get_city_by_name(pool, &location.province).await {
        Ok(Some(city)) => city,
        Ok(None) => {
            tracing::warn!("No city row for province {}, skipping its timeline", location.province);
            return 0;
        }
        Err(e) => {
            tracing::error!("Lookup failed for province {}: {}", location.province, e);
            return 0;
        }
    };

    let Some(timelines) = &location.timelines else {
        tracing::warn!("Feed entry for {} has no timelines", location.province);
        return 0;
    };

    let mut inserted = 0u64;
    for (stamp, confirmed) in &timelines.confirmed.timeline {
        let date = trim_timestamp(stamp);
        let deaths = timelines.deaths.timeline.get(stamp).copied().unwrap_or(0);
        // The feed carries no per-day recovered counts.
        match db::create_data(pool, city.id, date, *confirmed, deaths, 0).await {
            Ok(_) => inserted += 1,
            Err(e) => tracing::warn!("Failed to insert data for {} {}: {}", location.province, date, e),
        }
    }

    inserted
}

/// Turn a feed timestamp like `2020-12-31T00:00:00Z` into `2020-12-31`.
fn trim_timestamp(stamp: &str) -> &str {
    stamp.split('T').next().unwrap_or(stamp)
}
