//! The endpoint registry: every (path, method, schema, operation) tuple the
//! gateway exposes.

use axum::{
    Json, Router,
    routing::{get, post},
};
use gramgate_model::Manifest;

use crate::{
    infra::app_state::AppState, media_handlers, messaging_handlers,
    user_handlers,
};

/// Operation endpoints, in manifest order.
pub const ENDPOINTS: &[&str] = &[
    "/send-message",
    "/send-photo",
    "/send-video",
    "/list-chats",
    "/list-messages",
    "/mark-seen",
    "/pending-chats",
    "/search-threads",
    "/thread-by-participants",
    "/thread-details",
    "/user-id",
    "/username",
    "/user-info",
    "/online-status",
    "/search-users",
    "/user-stories",
    "/like-media",
    "/user-followers",
    "/user-following",
    "/user-posts",
    "/list-media-messages",
    "/download-media",
    "/download-shared-post",
    "/delete-message",
    "/mute-conversation",
];

/// Register the full endpoint set.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(manifest))
        // Messaging
        .route("/send-message", post(messaging_handlers::send_message))
        .route("/send-photo", post(messaging_handlers::send_photo))
        .route("/send-video", post(messaging_handlers::send_video))
        .route("/list-chats", post(messaging_handlers::list_chats))
        .route("/list-messages", post(messaging_handlers::list_messages))
        .route("/mark-seen", post(messaging_handlers::mark_seen))
        .route("/pending-chats", post(messaging_handlers::pending_chats))
        .route("/search-threads", post(messaging_handlers::search_threads))
        .route(
            "/thread-by-participants",
            post(messaging_handlers::thread_by_participants),
        )
        .route("/thread-details", post(messaging_handlers::thread_details))
        .route("/delete-message", post(messaging_handlers::delete_message))
        .route(
            "/mute-conversation",
            post(messaging_handlers::mute_conversation),
        )
        // Users
        .route("/user-id/{username}", get(user_handlers::user_id))
        .route("/username/{user_id}", get(user_handlers::username))
        .route("/user-info/{username}", get(user_handlers::user_info))
        .route("/online-status", post(user_handlers::online_status))
        .route("/search-users", post(user_handlers::search_users))
        .route("/user-stories", post(user_handlers::user_stories))
        .route("/like-media", post(user_handlers::like_media))
        .route("/user-followers", post(user_handlers::user_followers))
        .route("/user-following", post(user_handlers::user_following))
        .route("/user-posts", post(user_handlers::user_posts))
        // Media messages
        .route(
            "/list-media-messages",
            post(media_handlers::list_media_messages),
        )
        .route("/download-media", post(media_handlers::download_media))
        .route(
            "/download-shared-post",
            post(media_handlers::download_shared_post),
        )
        .with_state(state)
}

/// Static service manifest.
async fn manifest() -> Json<Manifest> {
    Json(Manifest {
        service: "gramgate",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: ENDPOINTS,
    })
}
