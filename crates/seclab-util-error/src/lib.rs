//! Error helpers shared by all `seclab` crates.

use std::{error, fmt, result};

pub type BoxedError = Box<dyn error::Error + Send + Sync + 'static>;
pub type BoxedErrorResult<T> = result::Result<T, BoxedError>;
pub type WhateverResult<T> = result::Result<T, snafu::Whatever>;

/// Displays an error together with all its sources on a single line,
/// separated by `: `.
///
/// Meant for structured logging, where a multi-line report would be mangled.
pub struct CompactChain<'e>(&'e (dyn error::Error + 'e));

impl fmt::Display for CompactChain<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)?;

        let mut source = self.0.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }

        Ok(())
    }
}

pub trait FmtCompact<'e> {
    fn fmt_compact(self) -> CompactChain<'e>;
}

impl<'e, E> FmtCompact<'e> for &'e E
where
    E: error::Error + 'e,
{
    fn fmt_compact(self) -> CompactChain<'e> {
        CompactChain(self)
    }
}
