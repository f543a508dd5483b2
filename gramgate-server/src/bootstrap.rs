//! Session bootstrap: resume a persisted session when one exists,
//! authenticate, and persist the refreshed artifact.
//!
//! Runs to completion before the listener binds. Any failure here is fatal;
//! there is no retry and no partially-available state.

use std::path::PathBuf;

use anyhow::{Context, Result};
use gramgate_client::{SharedClient, session};
use tracing::info;

use crate::infra::config::Config;

/// Establish the authenticated client context, returning the artifact path
/// the session was persisted to.
///
/// An existing artifact is loaded into the client *before* login so the
/// upstream service recognizes a continuing session instead of a fresh
/// device. After a successful login the refreshed artifact overwrites the
/// prior one.
pub async fn establish_session(
    client: &SharedClient,
    config: &Config,
) -> Result<PathBuf> {
    let path = session::artifact_path(&config.sessions_dir, &config.username);
    let mut guard = client.lock().await;

    if path.is_file() {
        info!(path = %path.display(), "loading persisted session artifact");
        guard.load_settings(&path).await.with_context(|| {
            format!("failed to load session artifact {}", path.display())
        })?;
    }

    guard
        .login(&config.username, &config.password)
        .await
        .context("login failed")?;

    guard.dump_settings(&path).await.with_context(|| {
        format!("failed to persist session artifact {}", path.display())
    })?;

    info!(username = %config.username, "authenticated session established");
    Ok(path)
}
