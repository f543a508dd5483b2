//! Startup bootstrap: artifact handling order, persistence across
//! restarts, and fatal authentication failures.

use std::fs;

use gramgate_client::{DemoClient, SessionSettings, session, share};
use gramgate_server::bootstrap;

mod common;
use common::{StubClient, config_with_sessions_dir};

#[tokio::test]
async fn artifact_is_loaded_before_login_when_present() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = session::artifact_path(dir.path(), "tester");
    fs::write(&artifact, "{}").unwrap();

    let client = StubClient::success("unused");
    let log = client.log.clone();
    let shared = share(client);
    let config = config_with_sessions_dir(dir.path());

    bootstrap::establish_session(&shared, &config).await.unwrap();
    assert_eq!(log.names(), ["load_settings", "login", "dump_settings"]);
}

#[tokio::test]
async fn missing_artifact_skips_straight_to_login() {
    let dir = tempfile::tempdir().unwrap();

    let client = StubClient::success("unused");
    let log = client.log.clone();
    let shared = share(client);
    let config = config_with_sessions_dir(dir.path());

    bootstrap::establish_session(&shared, &config).await.unwrap();
    assert_eq!(log.names(), ["login", "dump_settings"]);
}

#[tokio::test]
async fn restart_resumes_the_persisted_session() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_with_sessions_dir(dir.path());

    let first = share(DemoClient::new());
    let path = bootstrap::establish_session(&first, &config).await.unwrap();
    let initial: SessionSettings =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(initial.username, "tester");

    // Second process start: same artifact read back, device identity kept,
    // token refreshed and the artifact overwritten in place.
    let second = share(DemoClient::new());
    let path = bootstrap::establish_session(&second, &config).await.unwrap();
    let resumed: SessionSettings =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert_eq!(resumed.device_id, initial.device_id);
    assert_ne!(resumed.session_token, initial.session_token);
}

#[tokio::test]
async fn rejected_login_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_with_sessions_dir(dir.path());
    config.password = String::new();

    let client = share(DemoClient::new());
    let result = bootstrap::establish_session(&client, &config).await;
    assert!(result.is_err());

    // No artifact is written for a failed bootstrap.
    let artifact = session::artifact_path(dir.path(), "tester");
    assert!(!artifact.exists());
}

#[tokio::test]
async fn unreadable_artifact_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = session::artifact_path(dir.path(), "tester");
    fs::write(&artifact, "not json").unwrap();

    let client = share(DemoClient::new());
    let config = config_with_sessions_dir(dir.path());

    let result = bootstrap::establish_session(&client, &config).await;
    assert!(result.is_err());
}
