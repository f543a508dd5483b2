//! Media-message endpoints.
//!
//! The download endpoints are the only ones with a filesystem side effect:
//! the operation writes beneath the caller-supplied download path.

use axum::{Json, extract::State};
use gramgate_model::{
    DownloadMediaRequest, DownloadSharedPostRequest, ListMediaMessagesRequest,
};
use serde_json::Value;

use crate::{errors::AppResult, gateway, infra::app_state::AppState};

/// List the media-bearing messages in a thread.
pub async fn list_media_messages(
    State(state): State<AppState>,
    Json(req): Json<ListMediaMessagesRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .list_media_messages(&req.thread_id, req.limit)
        .await;
    gateway::translate("list_media_messages", outcome)
}

/// Download a message's photo or video to a local path.
pub async fn download_media(
    State(state): State<AppState>,
    Json(req): Json<DownloadMediaRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .download_media(&req.message_id, &req.thread_id, &req.download_path)
        .await;
    gateway::translate("download_media", outcome)
}

/// Download the post shared in a message to a local path.
pub async fn download_shared_post(
    State(state): State<AppState>,
    Json(req): Json<DownloadSharedPostRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .download_shared_post(
            &req.message_id,
            &req.thread_id,
            &req.download_path,
        )
        .await;
    gateway::translate("download_shared_post", outcome)
}
