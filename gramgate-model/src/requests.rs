//! Request schemas, one closed field set per endpoint.
//!
//! Defaults mirror the operation signatures exactly; unknown incoming
//! fields are ignored, the single policy applied across every endpoint.

use serde::Deserialize;

fn default_amount() -> i64 {
    20
}

fn default_post_count() -> i64 {
    12
}

fn default_media_limit() -> i64 {
    100
}

fn default_true() -> bool {
    true
}

fn default_download_path() -> String {
    "/app/downloads".to_string()
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SendMessageRequest {
    pub username: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SendPhotoRequest {
    pub username: String,
    pub photo_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SendVideoRequest {
    pub username: String,
    pub video_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListChatsRequest {
    #[serde(default = "default_amount")]
    pub amount: i64,
    #[serde(default)]
    pub selected_filter: String,
    #[serde(default)]
    pub thread_message_limit: Option<i64>,
    #[serde(default)]
    pub full: bool,
    #[serde(default)]
    pub fields: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListMessagesRequest {
    pub thread_id: String,
    #[serde(default = "default_amount")]
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarkMessageSeenRequest {
    pub thread_id: String,
    pub message_id: String,
}

/// Query parameters for the pending-chats endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PendingChatsParams {
    #[serde(default = "default_amount")]
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchThreadsRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThreadByParticipantsRequest {
    pub user_ids: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThreadDetailsRequest {
    pub thread_id: String,
    #[serde(default = "default_amount")]
    pub amount: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OnlineStatusRequest {
    pub usernames: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchUsersRequest {
    pub query: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserStoriesRequest {
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LikeMediaRequest {
    pub media_url: String,
    #[serde(default = "default_true")]
    pub like: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserFollowersRequest {
    pub username: String,
    #[serde(default = "default_amount")]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserFollowingRequest {
    pub username: String,
    #[serde(default = "default_amount")]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserPostsRequest {
    pub username: String,
    #[serde(default = "default_post_count")]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ListMediaMessagesRequest {
    pub thread_id: String,
    #[serde(default = "default_media_limit")]
    pub limit: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DownloadMediaRequest {
    pub message_id: String,
    pub thread_id: String,
    #[serde(default = "default_download_path")]
    pub download_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DownloadSharedPostRequest {
    pub message_id: String,
    pub thread_id: String,
    #[serde(default = "default_download_path")]
    pub download_path: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeleteMessageRequest {
    pub thread_id: String,
    pub message_id: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MuteConversationRequest {
    pub thread_id: String,
    #[serde(default = "default_true")]
    pub mute: bool,
}
