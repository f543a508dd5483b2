use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Uniform result contract returned by every client operation.
///
/// The gateway inspects only the variant tag and the message. A success
/// payload is passed through opaquely; a failure carries nothing but its
/// message, so payload data can never leak through an error response.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Envelope),
    Failure { message: String },
}

impl Outcome {
    /// Successful outcome with a message and no payload.
    pub fn success(message: impl Into<String>) -> Self {
        Outcome::Success(Envelope {
            message: Some(message.into()),
            payload: Map::new(),
        })
    }

    /// Successful outcome carrying an operation-specific payload.
    pub fn success_with(
        message: impl Into<String>,
        payload: Map<String, Value>,
    ) -> Self {
        Outcome::Success(Envelope {
            message: Some(message.into()),
            payload,
        })
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Body of a successful operation: an optional human-readable message plus
/// whatever payload fields the operation produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl Envelope {
    pub fn new(message: impl Into<String>) -> Self {
        Envelope {
            message: Some(message.into()),
            payload: Map::new(),
        }
    }

    pub fn with_payload(mut self, payload: Map<String, Value>) -> Self {
        self.payload = payload;
        self
    }

    /// Wire shape of a successful response: the success flag, the message
    /// when present, then the payload fields verbatim.
    pub fn into_body(self) -> Value {
        let mut body = Map::new();
        body.insert("success".to_string(), Value::Bool(true));
        if let Some(message) = self.message {
            body.insert("message".to_string(), Value::String(message));
        }
        body.extend(self.payload);
        Value::Object(body)
    }
}
