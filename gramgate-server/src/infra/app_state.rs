use std::{fmt, sync::Arc};

use gramgate_client::SharedClient;

use crate::infra::config::Config;

/// Shared application state handed to every handler.
///
/// `client` is the single authenticated client context; all dispatches
/// serialize on its mutex. The serialization point is this field, not the
/// handlers — once a request releases the lock, unrelated requests proceed.
#[derive(Clone)]
pub struct AppState {
    pub client: SharedClient,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(client: SharedClient, config: Arc<Config>) -> Self {
        Self { client, config }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
