//! Client-side seam of the Gramgate gateway.
//!
//! The gateway never talks to the upstream service directly; every handler
//! dispatches into a [`DirectApi`] implementation through a single shared,
//! mutex-guarded client context. This crate defines that trait, the error
//! type its implementations raise, the on-disk session artifact, and an
//! in-process demo backend used by the server binary and the test suite.

pub mod api;
pub mod demo;
pub mod error;
pub mod session;

pub use api::{DirectApi, OpResult, SharedClient, share};
pub use demo::DemoClient;
pub use error::ClientError;
pub use session::SessionSettings;
