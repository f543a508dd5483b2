//! On-disk session artifact handling.
//!
//! One artifact per account, at a path derived deterministically from the
//! account identifier. The blob is opaque to the gateway: it is read back
//! into the client before login and overwritten after every successful
//! authentication, never deleted.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ClientError;

/// Persisted authenticated-context blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSettings {
    pub username: String,
    pub device_id: Uuid,
    pub session_token: String,
    pub issued_at: DateTime<Utc>,
}

impl SessionSettings {
    /// Fresh settings for a first login on a new device identity.
    pub fn issue(username: impl Into<String>) -> Self {
        SessionSettings {
            username: username.into(),
            device_id: Uuid::new_v4(),
            session_token: Uuid::new_v4().simple().to_string(),
            issued_at: Utc::now(),
        }
    }

    /// Rotate the token while keeping the device identity, so the upstream
    /// service sees a continuing session rather than a new device.
    pub fn refresh(&self) -> Self {
        SessionSettings {
            username: self.username.clone(),
            device_id: self.device_id,
            session_token: Uuid::new_v4().simple().to_string(),
            issued_at: Utc::now(),
        }
    }
}

/// Artifact location for an account.
pub fn artifact_path(sessions_dir: &Path, username: &str) -> PathBuf {
    sessions_dir.join(format!("{username}_session.json"))
}

pub fn load(path: &Path) -> Result<SessionSettings, ClientError> {
    let raw = fs::read_to_string(path).map_err(|source| ClientError::Session {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ClientError::MalformedSession {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save(
    path: &Path,
    settings: &SessionSettings,
) -> Result<(), ClientError> {
    let raw = serde_json::to_string_pretty(settings)
        .expect("session settings serialize to json");
    fs::write(path, raw).map_err(|source| ClientError::Session {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_path_is_derived_from_the_identifier() {
        let path = artifact_path(Path::new("/app/sessions"), "ava");
        assert_eq!(path, PathBuf::from("/app/sessions/ava_session.json"));
    }

    #[test]
    fn settings_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = artifact_path(dir.path(), "ava");

        let settings = SessionSettings::issue("ava");
        save(&path, &settings).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn refresh_keeps_the_device_identity() {
        let settings = SessionSettings::issue("ava");
        let refreshed = settings.refresh();
        assert_eq!(refreshed.device_id, settings.device_id);
        assert_eq!(refreshed.username, settings.username);
        assert_ne!(refreshed.session_token, settings.session_token);
    }

    #[test]
    fn malformed_artifact_is_reported_as_such() {
        let dir = tempfile::tempdir().unwrap();
        let path = artifact_path(dir.path(), "ava");
        fs::write(&path, "not json").unwrap();

        match load(&path) {
            Err(ClientError::MalformedSession { .. }) => {}
            other => panic!("expected malformed-session error, got {other:?}"),
        }
    }

    #[test]
    fn missing_artifact_is_a_session_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = artifact_path(dir.path(), "ava");

        match load(&path) {
            Err(ClientError::Session { .. }) => {}
            other => panic!("expected session error, got {other:?}"),
        }
    }
}
