//! Direct-message and thread endpoints.
//!
//! Each handler validates one schema, dispatches one operation on the
//! shared client, and hands the outcome to [`gateway::translate`]. The
//! mutex guard is held across the dispatch and released before the
//! response is written.

use axum::{
    Json,
    extract::{Query, State},
};
use gramgate_model::{
    DeleteMessageRequest, ListChatsRequest, ListMessagesRequest,
    MarkMessageSeenRequest, MuteConversationRequest, PendingChatsParams,
    SearchThreadsRequest, SendMessageRequest, SendPhotoRequest,
    SendVideoRequest, ThreadByParticipantsRequest, ThreadDetailsRequest,
};
use serde_json::Value;

use crate::{errors::AppResult, gateway, infra::app_state::AppState};

/// Send a direct message to a user by username.
pub async fn send_message(
    State(state): State<AppState>,
    Json(req): Json<SendMessageRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .send_message(&req.username, &req.message)
        .await;
    gateway::translate("send_message", outcome)
}

/// Send a photo from a local path.
pub async fn send_photo(
    State(state): State<AppState>,
    Json(req): Json<SendPhotoRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .send_photo(&req.username, &req.photo_path)
        .await;
    gateway::translate("send_photo", outcome)
}

/// Send a video from a local path.
pub async fn send_video(
    State(state): State<AppState>,
    Json(req): Json<SendVideoRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .send_video(&req.username, &req.video_path)
        .await;
    gateway::translate("send_video", outcome)
}

/// List inbox chats, optionally filtered and expanded.
pub async fn list_chats(
    State(state): State<AppState>,
    Json(req): Json<ListChatsRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .list_chats(
            req.amount,
            &req.selected_filter,
            req.thread_message_limit,
            req.full,
            req.fields.as_deref(),
        )
        .await;
    gateway::translate("list_chats", outcome)
}

/// List messages from a thread.
pub async fn list_messages(
    State(state): State<AppState>,
    Json(req): Json<ListMessagesRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .list_messages(&req.thread_id, req.amount)
        .await;
    gateway::translate("list_messages", outcome)
}

/// Mark a message as seen.
pub async fn mark_seen(
    State(state): State<AppState>,
    Json(req): Json<MarkMessageSeenRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .mark_message_seen(&req.thread_id, &req.message_id)
        .await;
    gateway::translate("mark_message_seen", outcome)
}

/// List chats awaiting approval.
pub async fn pending_chats(
    State(state): State<AppState>,
    Query(params): Query<PendingChatsParams>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .list_pending_chats(params.amount)
        .await;
    gateway::translate("list_pending_chats", outcome)
}

/// Search threads by participant.
pub async fn search_threads(
    State(state): State<AppState>,
    Json(req): Json<SearchThreadsRequest>,
) -> AppResult<Json<Value>> {
    let outcome =
        state.client.lock().await.search_threads(&req.query).await;
    gateway::translate("search_threads", outcome)
}

/// Look up the thread with an exact participant set.
pub async fn thread_by_participants(
    State(state): State<AppState>,
    Json(req): Json<ThreadByParticipantsRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .thread_by_participants(&req.user_ids)
        .await;
    gateway::translate("thread_by_participants", outcome)
}

/// Thread summary plus recent messages.
pub async fn thread_details(
    State(state): State<AppState>,
    Json(req): Json<ThreadDetailsRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .thread_details(&req.thread_id, req.amount)
        .await;
    gateway::translate("thread_details", outcome)
}

/// Delete a message from a thread.
pub async fn delete_message(
    State(state): State<AppState>,
    Json(req): Json<DeleteMessageRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .delete_message(&req.thread_id, &req.message_id)
        .await;
    gateway::translate("delete_message", outcome)
}

/// Mute or unmute a conversation.
pub async fn mute_conversation(
    State(state): State<AppState>,
    Json(req): Json<MuteConversationRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .mute_conversation(&req.thread_id, req.mute)
        .await;
    gateway::translate("mute_conversation", outcome)
}
