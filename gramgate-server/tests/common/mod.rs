//! Shared test doubles: a scriptable client backend that records every
//! dispatched operation with its verbatim argument set.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum_test::TestServer;
use gramgate_client::{ClientError, DirectApi, OpResult, share};
use gramgate_model::Outcome;
use gramgate_server::{
    create_app,
    infra::{app_state::AppState, config::Config},
};
use serde_json::{Value, json};

/// Ordered record of `(operation, arguments)` pairs.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<(String, Value)>>>,
}

impl CallLog {
    pub fn record(&self, op: &str, args: Value) {
        self.calls.lock().unwrap().push((op.to_string(), args));
    }

    pub fn calls(&self) -> Vec<(String, Value)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.calls().into_iter().map(|(name, _)| name).collect()
    }

    pub fn count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn args_of(&self, op: &str) -> Option<Value> {
        self.calls()
            .into_iter()
            .find(|(name, _)| name == op)
            .map(|(_, args)| args)
    }
}

enum Reply {
    Outcome(Outcome),
    Error(String),
}

/// Scriptable backend: every operation records itself, optionally stalls,
/// then returns the configured reply.
pub struct StubClient {
    pub log: CallLog,
    pub max_in_flight: Arc<AtomicUsize>,
    in_flight: Arc<AtomicUsize>,
    reply: Reply,
    delay: Option<Duration>,
}

impl StubClient {
    pub fn with_outcome(outcome: Outcome) -> Self {
        StubClient {
            log: CallLog::default(),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
            in_flight: Arc::new(AtomicUsize::new(0)),
            reply: Reply::Outcome(outcome),
            delay: None,
        }
    }

    pub fn success(message: &str) -> Self {
        Self::with_outcome(Outcome::success(message))
    }

    pub fn failing(message: &str) -> Self {
        Self::with_outcome(Outcome::failure(message))
    }

    pub fn erroring(message: &str) -> Self {
        StubClient {
            reply: Reply::Error(message.to_string()),
            ..Self::success("unused")
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn op(&self, name: &str, args: Value) -> OpResult {
        self.log.record(name, args);
        let entered = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(entered, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match &self.reply {
            Reply::Outcome(outcome) => Ok(outcome.clone()),
            Reply::Error(message) => {
                Err(ClientError::Unavailable(message.clone()))
            }
        }
    }
}

#[async_trait]
impl DirectApi for StubClient {
    async fn load_settings(&mut self, path: &Path) -> Result<(), ClientError> {
        self.log
            .record("load_settings", json!({"path": path.display().to_string()}));
        Ok(())
    }

    async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        self.log
            .record("login", json!({"username": username, "password": password}));
        Ok(())
    }

    async fn dump_settings(&self, path: &Path) -> Result<(), ClientError> {
        self.log
            .record("dump_settings", json!({"path": path.display().to_string()}));
        Ok(())
    }

    async fn send_message(
        &mut self,
        username: &str,
        message: &str,
    ) -> OpResult {
        self.op("send_message", json!({"username": username, "message": message}))
            .await
    }

    async fn send_photo(
        &mut self,
        username: &str,
        photo_path: &str,
    ) -> OpResult {
        self.op(
            "send_photo",
            json!({"username": username, "photo_path": photo_path}),
        )
        .await
    }

    async fn send_video(
        &mut self,
        username: &str,
        video_path: &str,
    ) -> OpResult {
        self.op(
            "send_video",
            json!({"username": username, "video_path": video_path}),
        )
        .await
    }

    async fn list_chats(
        &mut self,
        amount: i64,
        selected_filter: &str,
        thread_message_limit: Option<i64>,
        full: bool,
        fields: Option<&[String]>,
    ) -> OpResult {
        self.op(
            "list_chats",
            json!({
                "amount": amount,
                "selected_filter": selected_filter,
                "thread_message_limit": thread_message_limit,
                "full": full,
                "fields": fields,
            }),
        )
        .await
    }

    async fn list_messages(
        &mut self,
        thread_id: &str,
        amount: i64,
    ) -> OpResult {
        self.op(
            "list_messages",
            json!({"thread_id": thread_id, "amount": amount}),
        )
        .await
    }

    async fn mark_message_seen(
        &mut self,
        thread_id: &str,
        message_id: &str,
    ) -> OpResult {
        self.op(
            "mark_message_seen",
            json!({"thread_id": thread_id, "message_id": message_id}),
        )
        .await
    }

    async fn list_pending_chats(&mut self, amount: i64) -> OpResult {
        self.op("list_pending_chats", json!({"amount": amount})).await
    }

    async fn search_threads(&mut self, query: &str) -> OpResult {
        self.op("search_threads", json!({"query": query})).await
    }

    async fn thread_by_participants(&mut self, user_ids: &[i64]) -> OpResult {
        self.op("thread_by_participants", json!({"user_ids": user_ids}))
            .await
    }

    async fn thread_details(
        &mut self,
        thread_id: &str,
        amount: i64,
    ) -> OpResult {
        self.op(
            "thread_details",
            json!({"thread_id": thread_id, "amount": amount}),
        )
        .await
    }

    async fn delete_message(
        &mut self,
        thread_id: &str,
        message_id: &str,
    ) -> OpResult {
        self.op(
            "delete_message",
            json!({"thread_id": thread_id, "message_id": message_id}),
        )
        .await
    }

    async fn mute_conversation(
        &mut self,
        thread_id: &str,
        mute: bool,
    ) -> OpResult {
        self.op(
            "mute_conversation",
            json!({"thread_id": thread_id, "mute": mute}),
        )
        .await
    }

    async fn user_id_from_username(&mut self, username: &str) -> OpResult {
        self.op("user_id_from_username", json!({"username": username}))
            .await
    }

    async fn username_from_user_id(&mut self, user_id: &str) -> OpResult {
        self.op("username_from_user_id", json!({"user_id": user_id}))
            .await
    }

    async fn user_info(&mut self, username: &str) -> OpResult {
        self.op("user_info", json!({"username": username})).await
    }

    async fn online_status(&mut self, usernames: &[String]) -> OpResult {
        self.op("online_status", json!({"usernames": usernames})).await
    }

    async fn search_users(&mut self, query: &str) -> OpResult {
        self.op("search_users", json!({"query": query})).await
    }

    async fn user_stories(&mut self, username: &str) -> OpResult {
        self.op("user_stories", json!({"username": username})).await
    }

    async fn like_media(&mut self, media_url: &str, like: bool) -> OpResult {
        self.op("like_media", json!({"media_url": media_url, "like": like}))
            .await
    }

    async fn user_followers(
        &mut self,
        username: &str,
        count: i64,
    ) -> OpResult {
        self.op(
            "user_followers",
            json!({"username": username, "count": count}),
        )
        .await
    }

    async fn user_following(
        &mut self,
        username: &str,
        count: i64,
    ) -> OpResult {
        self.op(
            "user_following",
            json!({"username": username, "count": count}),
        )
        .await
    }

    async fn user_posts(&mut self, username: &str, count: i64) -> OpResult {
        self.op("user_posts", json!({"username": username, "count": count}))
            .await
    }

    async fn list_media_messages(
        &mut self,
        thread_id: &str,
        limit: i64,
    ) -> OpResult {
        self.op(
            "list_media_messages",
            json!({"thread_id": thread_id, "limit": limit}),
        )
        .await
    }

    async fn download_media(
        &mut self,
        message_id: &str,
        thread_id: &str,
        download_path: &str,
    ) -> OpResult {
        self.op(
            "download_media",
            json!({
                "message_id": message_id,
                "thread_id": thread_id,
                "download_path": download_path,
            }),
        )
        .await
    }

    async fn download_shared_post(
        &mut self,
        message_id: &str,
        thread_id: &str,
        download_path: &str,
    ) -> OpResult {
        self.op(
            "download_shared_post",
            json!({
                "message_id": message_id,
                "thread_id": thread_id,
                "download_path": download_path,
            }),
        )
        .await
    }
}

pub fn test_config() -> Config {
    Config {
        username: "tester".to_string(),
        password: "hunter2".to_string(),
        sessions_dir: PathBuf::from("."),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

pub fn config_with_sessions_dir(dir: &Path) -> Config {
    Config {
        sessions_dir: dir.to_path_buf(),
        ..test_config()
    }
}

/// Boot a test server around a stub backend, keeping the call log handle.
pub fn spawn_server(client: StubClient) -> (TestServer, CallLog) {
    let log = client.log.clone();
    let state = AppState::new(share(client), Arc::new(test_config()));
    let server = TestServer::new(create_app(state)).expect("test server");
    (server, log)
}
