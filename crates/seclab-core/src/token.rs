use std::{fmt, str};

use rand::TryRngCore as _;
use rand::rngs::OsRng;
use seclab_util_error::BoxedError;
use snafu::{ResultExt as _, Snafu};

/// Number of random bytes in a [`SessionToken`].
pub const SESSION_TOKEN_LEN: usize = 16;

/// Opaque session identifier handed out by the issuance page.
///
/// 128 bits drawn from the OS random source. The string form is lowercase hex
/// (32 chars), which is safe to put in a query string and in a cookie value
/// without any escaping.
#[derive(Copy, Clone, Hash, Debug, PartialEq, Eq)]
pub struct SessionToken([u8; SESSION_TOKEN_LEN]);

#[derive(Debug, Snafu)]
pub enum TokenGenerateError {
    #[snafu(display("OS random source unavailable"))]
    Entropy { source: BoxedError },
}
pub type TokenGenerateResult<T> = std::result::Result<T, TokenGenerateError>;

#[derive(Debug, Snafu)]
pub enum TokenParseError {
    #[snafu(display("Session token must be {expected} lowercase hex characters"))]
    Length { expected: usize },
    #[snafu(display("Session token is not lowercase hex"))]
    Encoding { source: data_encoding::DecodeError },
}

impl SessionToken {
    /// Length of the string form.
    pub const ENCODED_LEN: usize = SESSION_TOKEN_LEN * 2;

    /// Draw a new token from the OS random source.
    ///
    /// There is deliberately no fallback: if the OS can't give us randomness
    /// the caller gets an error instead of a guessable token.
    pub fn generate() -> TokenGenerateResult<Self> {
        let mut bytes = [0u8; SESSION_TOKEN_LEN];
        OsRng
            .try_fill_bytes(&mut bytes)
            .boxed()
            .context(EntropySnafu)?;
        Ok(Self(bytes))
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<[u8; SESSION_TOKEN_LEN]> for SessionToken {
    fn from(value: [u8; SESSION_TOKEN_LEN]) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        data_encoding::HEXLOWER.encode_write(self.as_slice(), f)
    }
}

impl str::FromStr for SessionToken {
    type Err = TokenParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::ENCODED_LEN {
            return LengthSnafu {
                expected: Self::ENCODED_LEN,
            }
            .fail();
        }
        let v = data_encoding::HEXLOWER
            .decode(s.as_bytes())
            .context(EncodingSnafu)?;
        let a = v.try_into().map_err(|_| {
            LengthSnafu {
                expected: Self::ENCODED_LEN,
            }
            .build()
        })?;
        Ok(Self(a))
    }
}
