//! User lookup, search, and engagement endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use gramgate_model::{
    LikeMediaRequest, OnlineStatusRequest, SearchUsersRequest,
    UserFollowersRequest, UserFollowingRequest, UserPostsRequest,
    UserStoriesRequest,
};
use serde_json::Value;

use crate::{errors::AppResult, gateway, infra::app_state::AppState};

/// Resolve a username to its numeric user id.
pub async fn user_id(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .user_id_from_username(&username)
        .await;
    gateway::translate("user_id_from_username", outcome)
}

/// Resolve a numeric user id to its username.
pub async fn username(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .username_from_user_id(&user_id)
        .await;
    gateway::translate("username_from_user_id", outcome)
}

/// Full profile information for a username.
pub async fn user_info(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<Value>> {
    let outcome = state.client.lock().await.user_info(&username).await;
    gateway::translate("user_info", outcome)
}

/// Check the online status of a set of usernames.
pub async fn online_status(
    State(state): State<AppState>,
    Json(req): Json<OnlineStatusRequest>,
) -> AppResult<Json<Value>> {
    let outcome =
        state.client.lock().await.online_status(&req.usernames).await;
    gateway::translate("online_status", outcome)
}

/// Search users by name.
pub async fn search_users(
    State(state): State<AppState>,
    Json(req): Json<SearchUsersRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state.client.lock().await.search_users(&req.query).await;
    gateway::translate("search_users", outcome)
}

/// Active stories for a username.
pub async fn user_stories(
    State(state): State<AppState>,
    Json(req): Json<UserStoriesRequest>,
) -> AppResult<Json<Value>> {
    let outcome =
        state.client.lock().await.user_stories(&req.username).await;
    gateway::translate("user_stories", outcome)
}

/// Like or unlike a media URL.
pub async fn like_media(
    State(state): State<AppState>,
    Json(req): Json<LikeMediaRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .like_media(&req.media_url, req.like)
        .await;
    gateway::translate("like_media", outcome)
}

/// Followers of a user.
pub async fn user_followers(
    State(state): State<AppState>,
    Json(req): Json<UserFollowersRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .user_followers(&req.username, req.count)
        .await;
    gateway::translate("user_followers", outcome)
}

/// Accounts a user follows.
pub async fn user_following(
    State(state): State<AppState>,
    Json(req): Json<UserFollowingRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .user_following(&req.username, req.count)
        .await;
    gateway::translate("user_following", outcome)
}

/// Recent posts by a user.
pub async fn user_posts(
    State(state): State<AppState>,
    Json(req): Json<UserPostsRequest>,
) -> AppResult<Json<Value>> {
    let outcome = state
        .client
        .lock()
        .await
        .user_posts(&req.username, req.count)
        .await;
    gateway::translate("user_posts", outcome)
}
