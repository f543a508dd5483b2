use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use gramgate_model::Outcome;
use tokio::sync::Mutex;

use crate::error::ClientError;

/// Result of a dispatched operation.
///
/// `Ok(Outcome::Failure { .. })` is a failure the upstream reported through
/// the envelope contract; `Err` is an unexpected error in the backend
/// itself.
pub type OpResult = Result<Outcome, ClientError>;

/// The automation-client seam.
///
/// Each method takes exactly the validated fields of one endpoint, in the
/// order and naming the underlying operation expects, and returns the
/// uniform envelope. The session primitives are reserved for the startup
/// bootstrapper; handlers never touch them.
#[async_trait]
pub trait DirectApi: Send {
    // Session persistence primitives.
    async fn load_settings(&mut self, path: &Path) -> Result<(), ClientError>;
    async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError>;
    async fn dump_settings(&self, path: &Path) -> Result<(), ClientError>;

    // Messaging.
    async fn send_message(&mut self, username: &str, message: &str)
    -> OpResult;
    async fn send_photo(&mut self, username: &str, photo_path: &str)
    -> OpResult;
    async fn send_video(&mut self, username: &str, video_path: &str)
    -> OpResult;
    async fn list_chats(
        &mut self,
        amount: i64,
        selected_filter: &str,
        thread_message_limit: Option<i64>,
        full: bool,
        fields: Option<&[String]>,
    ) -> OpResult;
    async fn list_messages(&mut self, thread_id: &str, amount: i64)
    -> OpResult;
    async fn mark_message_seen(
        &mut self,
        thread_id: &str,
        message_id: &str,
    ) -> OpResult;
    async fn list_pending_chats(&mut self, amount: i64) -> OpResult;
    async fn search_threads(&mut self, query: &str) -> OpResult;
    async fn thread_by_participants(&mut self, user_ids: &[i64]) -> OpResult;
    async fn thread_details(&mut self, thread_id: &str, amount: i64)
    -> OpResult;
    async fn delete_message(
        &mut self,
        thread_id: &str,
        message_id: &str,
    ) -> OpResult;
    async fn mute_conversation(&mut self, thread_id: &str, mute: bool)
    -> OpResult;

    // Users.
    async fn user_id_from_username(&mut self, username: &str) -> OpResult;
    async fn username_from_user_id(&mut self, user_id: &str) -> OpResult;
    async fn user_info(&mut self, username: &str) -> OpResult;
    async fn online_status(&mut self, usernames: &[String]) -> OpResult;
    async fn search_users(&mut self, query: &str) -> OpResult;
    async fn user_stories(&mut self, username: &str) -> OpResult;
    async fn like_media(&mut self, media_url: &str, like: bool) -> OpResult;
    async fn user_followers(&mut self, username: &str, count: i64)
    -> OpResult;
    async fn user_following(&mut self, username: &str, count: i64)
    -> OpResult;
    async fn user_posts(&mut self, username: &str, count: i64) -> OpResult;

    // Media messages.
    async fn list_media_messages(
        &mut self,
        thread_id: &str,
        limit: i64,
    ) -> OpResult;
    async fn download_media(
        &mut self,
        message_id: &str,
        thread_id: &str,
        download_path: &str,
    ) -> OpResult;
    async fn download_shared_post(
        &mut self,
        message_id: &str,
        thread_id: &str,
        download_path: &str,
    ) -> OpResult;
}

/// The single authenticated client context every request shares.
///
/// Backends are assumed unsafe for unmediated concurrent use, so all calls
/// serialize behind this mutex; the lock is held across one operation and
/// released before the response is written.
pub type SharedClient = Arc<Mutex<Box<dyn DirectApi>>>;

/// Wrap a backend into the shared, serialized handle.
pub fn share(client: impl DirectApi + 'static) -> SharedClient {
    Arc::new(Mutex::new(Box::new(client)))
}
