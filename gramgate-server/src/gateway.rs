//! Envelope-to-HTTP translation, the final stage of every endpoint's
//! validate -> dispatch -> translate pipeline.

use axum::Json;
use gramgate_client::ClientError;
use gramgate_model::Outcome;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::{AppError, AppResult};

/// Translate a dispatched operation's outcome into the response contract.
///
/// Success returns the full envelope with status 200. A reported failure
/// returns 400 carrying only the failure message. An unexpected client
/// error returns 500 with a generic body; the detail is logged server-side
/// and never shown to the caller.
pub fn translate(
    op: &'static str,
    outcome: Result<Outcome, ClientError>,
) -> AppResult<Json<Value>> {
    match outcome {
        Ok(Outcome::Success(envelope)) => Ok(Json(envelope.into_body())),
        Ok(Outcome::Failure { message }) => {
            debug!(op, %message, "operation reported failure");
            Err(AppError::operation(message))
        }
        Err(err) => {
            error!(op, error = %err, "operation failed unexpectedly");
            Err(AppError::internal("internal error"))
        }
    }
}
