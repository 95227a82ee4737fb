use axum::{extract::State, response::Json};

use crate::models::SyncResponse;
use crate::sync;
use crate::AppState;

// GET /sync_coronavirus_data/jhu - Refresh city and data tables from the JHU feed
//
// Fire-and-forget: the fetch runs on a spawned task and the response
// returns immediately. Fetch failures are logged, never surfaced here.
pub async fn sync_coronavirus_data(State(state): State<AppState>) -> Json<SyncResponse> {
    tokio::spawn(async move {
        sync::run_sync(&state.pool, &state.client, &state.feed_url).await;
    });

    Json(SyncResponse {
        message: "Syncing coronavirus data in the background".to_string(),
    })
}
