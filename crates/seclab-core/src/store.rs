//! In-memory set of issued session tokens.

use std::collections::HashSet;
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use crate::{
    Candidate, ChannelReport, CredentialPresentation, Decision, DenyReason, Grant, LOG_TARGET,
    SessionToken, TokenGenerateResult,
};

/// Every token this process has issued.
///
/// Tokens are only ever added: there is no expiry, no revocation, and
/// nothing survives a restart. A long-running process therefore grows this
/// set by one entry per issuance request, without bound.
///
/// One lock guards the whole set. A `register` that returned is visible to
/// every `is_valid` that starts after it.
#[derive(Debug, Default)]
pub struct SessionStore {
    tokens: RwLock<HashSet<SessionToken>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token to the valid set.
    ///
    /// Idempotent. Returns `true` if the token was not already present.
    pub fn register(&self, token: SessionToken) -> bool {
        // A poisoned lock can't hold a half-inserted set, so keep using it.
        self.tokens
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(token)
    }

    pub fn is_valid(&self, token: &SessionToken) -> bool {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(token)
    }

    /// Like [`Self::is_valid`], for a raw presented value.
    ///
    /// Anything that doesn't even parse as a token is not valid.
    pub fn is_valid_str(&self, raw: &str) -> bool {
        raw.parse::<SessionToken>()
            .is_ok_and(|token| self.is_valid(&token))
    }

    pub fn len(&self) -> usize {
        self.tokens
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Generate a fresh token and register it.
    pub fn issue(&self) -> TokenGenerateResult<SessionToken> {
        let token = SessionToken::generate()?;
        self.register(token);
        Ok(token)
    }

    /// Resolve the candidate out of `presentation` and validate it.
    pub fn authorize(&self, presentation: &CredentialPresentation) -> Decision {
        self.authorize_candidate(presentation.resolve(), presentation)
    }

    /// Validate an already resolved `candidate`.
    ///
    /// `presentation` is only consulted to fill the per-channel
    /// [`ChannelReport`] of a granted decision.
    pub fn authorize_candidate(
        &self,
        candidate: Option<Candidate>,
        presentation: &CredentialPresentation,
    ) -> Decision {
        let Some(candidate) = candidate else {
            debug!(target: LOG_TARGET, "No session credential presented");
            return Decision::Denied(DenyReason::NoCredential);
        };

        let Some(token) = candidate
            .value
            .parse::<SessionToken>()
            .ok()
            .filter(|token| self.is_valid(token))
        else {
            debug!(target: LOG_TARGET, source = %candidate.source, "Invalid session credential");
            return Decision::Denied(DenyReason::InvalidCredential);
        };

        let token_str = token.to_string();
        let channels = ChannelReport {
            query_valid: presentation.query() == Some(token_str.as_str()),
            cookie_valid: presentation.cookie() == Some(token_str.as_str()),
        };

        debug!(target: LOG_TARGET, source = %candidate.source, "Session credential accepted");
        Decision::Granted(Grant {
            token,
            source: candidate.source,
            channels,
        })
    }
}
