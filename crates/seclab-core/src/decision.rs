use std::fmt;

use crate::{CredentialSource, SessionToken};

/// Why an authorization check said no.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DenyReason {
    NoCredential,
    InvalidCredential,
    WrongValue,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DenyReason::NoCredential => "no credential presented",
            DenyReason::InvalidCredential => "invalid credential",
            DenyReason::WrongValue => "wrong value",
        })
    }
}

/// Per-channel validity, for display only.
///
/// Each flag is computed on its own, so when both the query parameter and the
/// cookie carry the same valid token, both are reported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelReport {
    pub query_valid: bool,
    pub cookie_valid: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grant {
    pub token: SessionToken,
    /// Channel the winning candidate came from.
    pub source: CredentialSource,
    pub channels: ChannelReport,
}

/// Outcome of validating a session credential.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Decision {
    Granted(Grant),
    Denied(DenyReason),
}

impl Decision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Decision::Granted(_))
    }

    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Decision::Granted(_) => None,
            Decision::Denied(reason) => Some(*reason),
        }
    }
}

/// Outcome of the stateless [`crate::AccessGate`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GateDecision {
    Granted,
    Denied(DenyReason),
}

impl GateDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, GateDecision::Granted)
    }
}
