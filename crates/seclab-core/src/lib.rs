//! Session and access-policy core of the `seclab` teaching site.
//!
//! Nothing in here knows about HTTP. The web crate extracts raw values from
//! the request, hands them over as a [`CredentialPresentation`] or a plain
//! `Option<&str>`, and renders whatever [`Decision`] comes back.

mod credential;
mod decision;
mod gate;
mod store;
mod token;

pub use credential::{Candidate, CredentialPresentation, CredentialSource};
pub use decision::{ChannelReport, Decision, DenyReason, GateDecision, Grant};
pub use gate::AccessGate;
pub use store::SessionStore;
pub use token::{SessionToken, TokenGenerateError, TokenGenerateResult, TokenParseError};

pub const LOG_TARGET: &str = "seclab::core";

/// Name shared by the query parameter and the cookie carrying a session token.
pub const SESSION_CREDENTIAL_NAME: &str = "session";
