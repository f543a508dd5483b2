//! Deterministic in-process backend.
//!
//! Implements the full [`DirectApi`] surface against a small fixture of
//! accounts and threads, with real file I/O for the session artifact and
//! media downloads. The server binary ships wired to this backend so the
//! whole request path can be exercised without upstream credentials;
//! production backends live out of tree and plug in through the same trait.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gramgate_model::Outcome;
use serde_json::{Map, Value, json};
use tracing::info;

use crate::api::{DirectApi, OpResult};
use crate::error::ClientError;
use crate::session::{self, SessionSettings};

const PLACEHOLDER_MEDIA: &[u8] = b"gramgate demo media payload";

/// Sender id used for messages authored by the logged-in account.
const SELF_SENDER: i64 = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Attachment {
    Photo,
    Video,
    SharedPost,
}

impl Attachment {
    fn media_type(self) -> &'static str {
        match self {
            Attachment::Photo => "photo",
            Attachment::Video => "video",
            Attachment::SharedPost => "shared_post",
        }
    }

    fn file_name(self, message_id: &str) -> String {
        match self {
            Attachment::Photo => format!("{message_id}.jpg"),
            Attachment::Video => format!("{message_id}.mp4"),
            Attachment::SharedPost => format!("{message_id}_post.json"),
        }
    }
}

#[derive(Debug, Clone)]
struct DemoUser {
    user_id: i64,
    username: String,
    full_name: String,
    is_private: bool,
    follower_count: i64,
}

#[derive(Debug, Clone)]
struct DemoMessage {
    message_id: String,
    sender_id: i64,
    text: String,
    attachment: Option<Attachment>,
    seen: bool,
    sent_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct DemoThread {
    thread_id: String,
    participants: Vec<i64>,
    muted: bool,
    pending: bool,
    messages: Vec<DemoMessage>,
}

/// In-memory stand-in for the automation client.
#[derive(Debug)]
pub struct DemoClient {
    session: Option<SessionSettings>,
    users: Vec<DemoUser>,
    threads: Vec<DemoThread>,
    next_message_id: u64,
    next_thread_id: u64,
}

impl Default for DemoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoClient {
    pub fn new() -> Self {
        let now = Utc::now();
        let user = |user_id, username: &str, full_name: &str, is_private, follower_count| DemoUser {
            user_id,
            username: username.to_string(),
            full_name: full_name.to_string(),
            is_private,
            follower_count,
        };
        let message = |message_id: &str, sender_id, text: &str, attachment, seen, age_minutes| DemoMessage {
            message_id: message_id.to_string(),
            sender_id,
            text: text.to_string(),
            attachment,
            seen,
            sent_at: now - Duration::minutes(age_minutes),
        };

        DemoClient {
            session: None,
            users: vec![
                user(1001, "ava", "Ava Moreno", false, 412),
                user(1002, "ben", "Ben Okafor", false, 87),
                user(1003, "cleo", "Cleo Tanaka", true, 1530),
                user(1004, "noa", "Noa Lindqvist", false, 52),
            ],
            threads: vec![
                DemoThread {
                    thread_id: "34012000001".to_string(),
                    participants: vec![1001],
                    muted: false,
                    pending: false,
                    messages: vec![
                        message("31000001", 1001, "see you at eight?", None, true, 180),
                        message("31000002", SELF_SENDER, "sure, bringing snacks", None, true, 175),
                        message("31000003", 1001, "", Some(Attachment::Photo), false, 20),
                    ],
                },
                DemoThread {
                    thread_id: "34012000002".to_string(),
                    participants: vec![1002, 1003],
                    muted: false,
                    pending: false,
                    messages: vec![
                        message("31000011", 1002, "did you two see this", Some(Attachment::SharedPost), true, 95),
                        message("31000012", 1003, "sending the clip now", None, true, 90),
                        message("31000013", 1003, "", Some(Attachment::Video), false, 85),
                    ],
                },
                DemoThread {
                    thread_id: "34012000003".to_string(),
                    participants: vec![1004],
                    muted: false,
                    pending: true,
                    messages: vec![message(
                        "31000021",
                        1004,
                        "hey! loved your last post",
                        None,
                        false,
                        30,
                    )],
                },
            ],
            next_message_id: 31000100,
            next_thread_id: 34012000100,
        }
    }

    fn logged_out(&self) -> Option<Outcome> {
        if self.session.is_none() {
            Some(Outcome::failure("login_required"))
        } else {
            None
        }
    }

    fn user_by_name(&self, username: &str) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.username == username)
    }

    fn user_by_id(&self, user_id: i64) -> Option<&DemoUser> {
        self.users.iter().find(|u| u.user_id == user_id)
    }

    fn username_of(&self, sender_id: i64) -> String {
        if sender_id == SELF_SENDER {
            return self
                .session
                .as_ref()
                .map(|s| s.username.clone())
                .unwrap_or_else(|| "me".to_string());
        }
        self.user_by_id(sender_id)
            .map(|u| u.username.clone())
            .unwrap_or_else(|| sender_id.to_string())
    }

    fn thread_index(&self, thread_id: &str) -> Option<usize> {
        self.threads.iter().position(|t| t.thread_id == thread_id)
    }

    fn user_json(&self, user: &DemoUser) -> Value {
        json!({
            "user_id": user.user_id,
            "username": user.username,
            "full_name": user.full_name,
            "is_private": user.is_private,
            "follower_count": user.follower_count,
        })
    }

    fn message_json(&self, message: &DemoMessage) -> Value {
        json!({
            "message_id": message.message_id,
            "sender": self.username_of(message.sender_id),
            "text": message.text,
            "media_type": message.attachment.map(Attachment::media_type),
            "seen": message.seen,
            "timestamp": message.sent_at.to_rfc3339(),
        })
    }

    fn thread_summary(&self, thread: &DemoThread) -> Map<String, Value> {
        let participants: Vec<String> = thread
            .participants
            .iter()
            .map(|id| self.username_of(*id))
            .collect();
        let last_activity = thread
            .messages
            .last()
            .map(|m| m.sent_at.to_rfc3339());
        let unread = thread.messages.iter().filter(|m| !m.seen).count();

        let mut summary = Map::new();
        summary.insert("thread_id".to_string(), json!(thread.thread_id));
        summary.insert("participants".to_string(), json!(participants));
        summary.insert("muted".to_string(), json!(thread.muted));
        summary.insert("unread_count".to_string(), json!(unread));
        summary.insert("last_activity".to_string(), json!(last_activity));
        summary
    }

    fn messages_json(&self, thread: &DemoThread, limit: usize) -> Vec<Value> {
        let start = thread.messages.len().saturating_sub(limit);
        thread.messages[start..]
            .iter()
            .map(|m| self.message_json(m))
            .collect()
    }

    fn allocate_message_id(&mut self) -> String {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id.to_string()
    }

    fn allocate_thread_id(&mut self) -> String {
        let id = self.next_thread_id;
        self.next_thread_id += 1;
        id.to_string()
    }

    /// Direct thread with a single counterpart, created on first send.
    fn direct_thread_index(&mut self, user_id: i64) -> usize {
        if let Some(index) = self
            .threads
            .iter()
            .position(|t| t.participants == [user_id] && !t.pending)
        {
            return index;
        }
        let thread_id = self.allocate_thread_id();
        self.threads.push(DemoThread {
            thread_id,
            participants: vec![user_id],
            muted: false,
            pending: false,
            messages: Vec::new(),
        });
        self.threads.len() - 1
    }

    fn push_outgoing(
        &mut self,
        username: &str,
        text: &str,
        attachment: Option<Attachment>,
    ) -> Result<(String, String), Outcome> {
        let Some(user) = self.user_by_name(username) else {
            return Err(Outcome::failure("user not found"));
        };
        let user_id = user.user_id;
        let message_id = self.allocate_message_id();
        let index = self.direct_thread_index(user_id);
        let thread = &mut self.threads[index];
        thread.messages.push(DemoMessage {
            message_id: message_id.clone(),
            sender_id: SELF_SENDER,
            text: text.to_string(),
            attachment,
            seen: true,
            sent_at: Utc::now(),
        });
        Ok((thread.thread_id.clone(), message_id))
    }
}

#[async_trait]
impl DirectApi for DemoClient {
    async fn load_settings(&mut self, path: &Path) -> Result<(), ClientError> {
        self.session = Some(session::load(path)?);
        Ok(())
    }

    async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        if username.is_empty() || password.is_empty() {
            return Err(ClientError::Auth {
                username: username.to_string(),
                reason: "empty credentials".to_string(),
            });
        }

        let settings = match self.session.take() {
            Some(existing) if existing.username == username => {
                info!(username, "resuming persisted session");
                existing.refresh()
            }
            _ => SessionSettings::issue(username),
        };
        self.session = Some(settings);
        Ok(())
    }

    async fn dump_settings(&self, path: &Path) -> Result<(), ClientError> {
        let Some(settings) = &self.session else {
            return Err(ClientError::Unavailable(
                "no session to persist".to_string(),
            ));
        };
        session::save(path, settings)
    }

    async fn send_message(
        &mut self,
        username: &str,
        message: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        match self.push_outgoing(username, message, None) {
            Ok((thread_id, message_id)) => {
                let mut payload = Map::new();
                payload.insert("thread_id".to_string(), json!(thread_id));
                payload.insert("message_id".to_string(), json!(message_id));
                Ok(Outcome::success_with(
                    format!("message sent to {username}"),
                    payload,
                ))
            }
            Err(outcome) => Ok(outcome),
        }
    }

    async fn send_photo(
        &mut self,
        username: &str,
        photo_path: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        if !Path::new(photo_path).is_file() {
            return Ok(Outcome::failure(format!(
                "photo not found: {photo_path}"
            )));
        }
        match self.push_outgoing(username, "", Some(Attachment::Photo)) {
            Ok((thread_id, message_id)) => {
                let mut payload = Map::new();
                payload.insert("thread_id".to_string(), json!(thread_id));
                payload.insert("message_id".to_string(), json!(message_id));
                payload.insert("media_type".to_string(), json!("photo"));
                Ok(Outcome::success_with(
                    format!("photo sent to {username}"),
                    payload,
                ))
            }
            Err(outcome) => Ok(outcome),
        }
    }

    async fn send_video(
        &mut self,
        username: &str,
        video_path: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        if !Path::new(video_path).is_file() {
            return Ok(Outcome::failure(format!(
                "video not found: {video_path}"
            )));
        }
        match self.push_outgoing(username, "", Some(Attachment::Video)) {
            Ok((thread_id, message_id)) => {
                let mut payload = Map::new();
                payload.insert("thread_id".to_string(), json!(thread_id));
                payload.insert("message_id".to_string(), json!(message_id));
                payload.insert("media_type".to_string(), json!("video"));
                Ok(Outcome::success_with(
                    format!("video sent to {username}"),
                    payload,
                ))
            }
            Err(outcome) => Ok(outcome),
        }
    }

    async fn list_chats(
        &mut self,
        amount: i64,
        selected_filter: &str,
        thread_message_limit: Option<i64>,
        full: bool,
        fields: Option<&[String]>,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }

        let threads: Vec<&DemoThread> = match selected_filter {
            "" => self.threads.iter().filter(|t| !t.pending).collect(),
            "unread" => self
                .threads
                .iter()
                .filter(|t| !t.pending && t.messages.iter().any(|m| !m.seen))
                .collect(),
            "flagged" => Vec::new(),
            other => {
                return Ok(Outcome::failure(format!("unknown filter: {other}")));
            }
        };

        let limit = amount.max(0) as usize;
        let message_limit =
            thread_message_limit.map_or(usize::MAX, |n| n.max(0) as usize);
        let chats: Vec<Value> = threads
            .into_iter()
            .take(limit)
            .map(|thread| {
                let mut summary = self.thread_summary(thread);
                if full {
                    summary.insert(
                        "messages".to_string(),
                        json!(self.messages_json(thread, message_limit)),
                    );
                }
                if let Some(fields) = fields {
                    summary.retain(|key, _| fields.iter().any(|f| f == key));
                }
                Value::Object(summary)
            })
            .collect();

        let mut payload = Map::new();
        payload.insert("threads".to_string(), json!(chats));
        Ok(Outcome::success_with(
            format!("{} chats", chats.len()),
            payload,
        ))
    }

    async fn list_messages(
        &mut self,
        thread_id: &str,
        amount: i64,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let messages =
            self.messages_json(&self.threads[index], amount.max(0) as usize);

        let mut payload = Map::new();
        payload.insert("thread_id".to_string(), json!(thread_id));
        payload.insert("messages".to_string(), json!(messages));
        Ok(Outcome::success_with(
            format!("{} messages", messages.len()),
            payload,
        ))
    }

    async fn mark_message_seen(
        &mut self,
        thread_id: &str,
        message_id: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let Some(message) = self.threads[index]
            .messages
            .iter_mut()
            .find(|m| m.message_id == message_id)
        else {
            return Ok(Outcome::failure("message not found"));
        };
        message.seen = true;

        let mut payload = Map::new();
        payload.insert("thread_id".to_string(), json!(thread_id));
        payload.insert("message_id".to_string(), json!(message_id));
        Ok(Outcome::success_with("message marked seen", payload))
    }

    async fn list_pending_chats(&mut self, amount: i64) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let chats: Vec<Value> = self
            .threads
            .iter()
            .filter(|t| t.pending)
            .take(amount.max(0) as usize)
            .map(|t| Value::Object(self.thread_summary(t)))
            .collect();

        let mut payload = Map::new();
        payload.insert("threads".to_string(), json!(chats));
        Ok(Outcome::success_with(
            format!("{} pending chats", chats.len()),
            payload,
        ))
    }

    async fn search_threads(&mut self, query: &str) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let needle = query.to_lowercase();
        let matches: Vec<Value> = self
            .threads
            .iter()
            .filter(|t| {
                t.participants.iter().any(|id| {
                    self.username_of(*id).to_lowercase().contains(&needle)
                })
            })
            .map(|t| Value::Object(self.thread_summary(t)))
            .collect();

        let mut payload = Map::new();
        payload.insert("threads".to_string(), json!(matches));
        Ok(Outcome::success_with(
            format!("{} threads", matches.len()),
            payload,
        ))
    }

    async fn thread_by_participants(&mut self, user_ids: &[i64]) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let mut wanted: Vec<i64> = user_ids.to_vec();
        wanted.sort_unstable();

        let found = self.threads.iter().find(|t| {
            let mut participants = t.participants.clone();
            participants.sort_unstable();
            participants == wanted
        });
        let Some(thread) = found else {
            return Ok(Outcome::failure("thread not found"));
        };

        let mut payload = Map::new();
        payload.insert(
            "thread".to_string(),
            Value::Object(self.thread_summary(thread)),
        );
        Ok(Outcome::success_with("thread found", payload))
    }

    async fn thread_details(
        &mut self,
        thread_id: &str,
        amount: i64,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let thread = &self.threads[index];

        let mut payload = Map::new();
        payload.insert(
            "thread".to_string(),
            Value::Object(self.thread_summary(thread)),
        );
        payload.insert(
            "messages".to_string(),
            json!(self.messages_json(thread, amount.max(0) as usize)),
        );
        Ok(Outcome::success_with("thread details", payload))
    }

    async fn delete_message(
        &mut self,
        thread_id: &str,
        message_id: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let thread = &mut self.threads[index];
        let Some(position) = thread
            .messages
            .iter()
            .position(|m| m.message_id == message_id)
        else {
            return Ok(Outcome::failure("message not found"));
        };
        thread.messages.remove(position);

        let mut payload = Map::new();
        payload.insert("thread_id".to_string(), json!(thread_id));
        payload.insert("message_id".to_string(), json!(message_id));
        Ok(Outcome::success_with("message deleted", payload))
    }

    async fn mute_conversation(
        &mut self,
        thread_id: &str,
        mute: bool,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        self.threads[index].muted = mute;

        let mut payload = Map::new();
        payload.insert("thread_id".to_string(), json!(thread_id));
        payload.insert("muted".to_string(), json!(mute));
        let message = if mute {
            "conversation muted"
        } else {
            "conversation unmuted"
        };
        Ok(Outcome::success_with(message, payload))
    }

    async fn user_id_from_username(&mut self, username: &str) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(user) = self.user_by_name(username) else {
            return Ok(Outcome::failure("user not found"));
        };

        let mut payload = Map::new();
        payload.insert("username".to_string(), json!(username));
        payload.insert("user_id".to_string(), json!(user.user_id));
        Ok(Outcome::success_with("user id resolved", payload))
    }

    async fn username_from_user_id(&mut self, user_id: &str) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Ok(id) = user_id.parse::<i64>() else {
            return Ok(Outcome::failure(format!("invalid user id: {user_id}")));
        };
        let Some(user) = self.user_by_id(id) else {
            return Ok(Outcome::failure("user not found"));
        };

        let mut payload = Map::new();
        payload.insert("user_id".to_string(), json!(id));
        payload.insert("username".to_string(), json!(user.username));
        Ok(Outcome::success_with("username resolved", payload))
    }

    async fn user_info(&mut self, username: &str) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(user) = self.user_by_name(username) else {
            return Ok(Outcome::failure("user not found"));
        };

        let mut payload = Map::new();
        payload.insert("user".to_string(), self.user_json(user));
        Ok(Outcome::success_with("user info", payload))
    }

    async fn online_status(&mut self, usernames: &[String]) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let mut statuses = Map::new();
        for username in usernames {
            let Some(user) = self.user_by_name(username) else {
                return Ok(Outcome::failure(format!(
                    "user not found: {username}"
                )));
            };
            statuses.insert(username.clone(), json!(user.user_id % 2 == 0));
        }

        let mut payload = Map::new();
        payload.insert("statuses".to_string(), Value::Object(statuses));
        Ok(Outcome::success_with("online status", payload))
    }

    async fn search_users(&mut self, query: &str) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let needle = query.to_lowercase();
        let users: Vec<Value> = self
            .users
            .iter()
            .filter(|u| {
                u.username.to_lowercase().contains(&needle)
                    || u.full_name.to_lowercase().contains(&needle)
            })
            .map(|u| self.user_json(u))
            .collect();

        let mut payload = Map::new();
        payload.insert("users".to_string(), json!(users));
        Ok(Outcome::success_with(
            format!("{} users", users.len()),
            payload,
        ))
    }

    async fn user_stories(&mut self, username: &str) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(user) = self.user_by_name(username) else {
            return Ok(Outcome::failure("user not found"));
        };
        // Only the first fixture account has an active story.
        let stories: Vec<Value> = if user.user_id == 1001 {
            vec![json!({
                "story_id": "36000001",
                "media_type": "photo",
                "taken_at": Utc::now().to_rfc3339(),
            })]
        } else {
            Vec::new()
        };

        let mut payload = Map::new();
        payload.insert("username".to_string(), json!(username));
        payload.insert("stories".to_string(), json!(stories));
        Ok(Outcome::success_with(
            format!("{} stories", stories.len()),
            payload,
        ))
    }

    async fn like_media(&mut self, media_url: &str, like: bool) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        if media_url.is_empty() {
            return Ok(Outcome::failure("media not found"));
        }

        let mut payload = Map::new();
        payload.insert("media_url".to_string(), json!(media_url));
        payload.insert("liked".to_string(), json!(like));
        let message = if like { "media liked" } else { "media unliked" };
        Ok(Outcome::success_with(message, payload))
    }

    async fn user_followers(
        &mut self,
        username: &str,
        count: i64,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(user) = self.user_by_name(username) else {
            return Ok(Outcome::failure("user not found"));
        };
        let target_id = user.user_id;
        let followers: Vec<Value> = self
            .users
            .iter()
            .filter(|u| u.user_id != target_id)
            .take(count.max(0) as usize)
            .map(|u| self.user_json(u))
            .collect();

        let mut payload = Map::new();
        payload.insert("username".to_string(), json!(username));
        payload.insert("followers".to_string(), json!(followers));
        Ok(Outcome::success_with(
            format!("{} followers", followers.len()),
            payload,
        ))
    }

    async fn user_following(
        &mut self,
        username: &str,
        count: i64,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(user) = self.user_by_name(username) else {
            return Ok(Outcome::failure("user not found"));
        };
        let target_id = user.user_id;
        let following: Vec<Value> = self
            .users
            .iter()
            .rev()
            .filter(|u| u.user_id != target_id)
            .take(count.max(0) as usize)
            .map(|u| self.user_json(u))
            .collect();

        let mut payload = Map::new();
        payload.insert("username".to_string(), json!(username));
        payload.insert("following".to_string(), json!(following));
        Ok(Outcome::success_with(
            format!("following {}", following.len()),
            payload,
        ))
    }

    async fn user_posts(&mut self, username: &str, count: i64) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(user) = self.user_by_name(username) else {
            return Ok(Outcome::failure("user not found"));
        };
        let posts: Vec<Value> = (0..3i64)
            .take(count.max(0) as usize)
            .map(|i| {
                json!({
                    "pk": format!("{}{:02}", user.user_id, i),
                    "caption": format!("post {} by {}", i + 1, username),
                    "like_count": user.follower_count / (i + 1),
                })
            })
            .collect();

        let mut payload = Map::new();
        payload.insert("username".to_string(), json!(username));
        payload.insert("posts".to_string(), json!(posts));
        Ok(Outcome::success_with(
            format!("{} posts", posts.len()),
            payload,
        ))
    }

    async fn list_media_messages(
        &mut self,
        thread_id: &str,
        limit: i64,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let messages: Vec<Value> = self.threads[index]
            .messages
            .iter()
            .filter(|m| m.attachment.is_some())
            .take(limit.max(0) as usize)
            .map(|m| self.message_json(m))
            .collect();

        let mut payload = Map::new();
        payload.insert("thread_id".to_string(), json!(thread_id));
        payload.insert("messages".to_string(), json!(messages));
        Ok(Outcome::success_with(
            format!("{} media messages", messages.len()),
            payload,
        ))
    }

    async fn download_media(
        &mut self,
        message_id: &str,
        thread_id: &str,
        download_path: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let Some(message) = self.threads[index]
            .messages
            .iter()
            .find(|m| m.message_id == message_id)
        else {
            return Ok(Outcome::failure("message not found"));
        };
        let Some(attachment) = message.attachment else {
            return Ok(Outcome::failure("message has no media"));
        };
        if attachment == Attachment::SharedPost {
            return Ok(Outcome::failure("message has no media"));
        }

        fs::create_dir_all(download_path)?;
        let target =
            Path::new(download_path).join(attachment.file_name(message_id));
        fs::write(&target, PLACEHOLDER_MEDIA)?;

        let mut payload = Map::new();
        payload.insert("path".to_string(), json!(target.display().to_string()));
        payload.insert(
            "media_type".to_string(),
            json!(attachment.media_type()),
        );
        Ok(Outcome::success_with("media downloaded", payload))
    }

    async fn download_shared_post(
        &mut self,
        message_id: &str,
        thread_id: &str,
        download_path: &str,
    ) -> OpResult {
        if let Some(outcome) = self.logged_out() {
            return Ok(outcome);
        }
        let Some(index) = self.thread_index(thread_id) else {
            return Ok(Outcome::failure("thread not found"));
        };
        let Some(message) = self.threads[index]
            .messages
            .iter()
            .find(|m| m.message_id == message_id)
        else {
            return Ok(Outcome::failure("message not found"));
        };
        if message.attachment != Some(Attachment::SharedPost) {
            return Ok(Outcome::failure("message has no shared post"));
        }

        let post = json!({
            "message_id": message_id,
            "shared_by": self.username_of(message.sender_id),
            "caption": message.text,
        });

        fs::create_dir_all(download_path)?;
        let target = Path::new(download_path)
            .join(Attachment::SharedPost.file_name(message_id));
        fs::write(&target, serde_json::to_vec_pretty(&post).expect("post json"))?;

        let mut payload = Map::new();
        payload.insert("path".to_string(), json!(target.display().to_string()));
        Ok(Outcome::success_with("shared post downloaded", payload))
    }
}
