use std::fmt;

/// Channel a session token was presented through.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CredentialSource {
    Query,
    Cookie,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CredentialSource::Query => "query parameter",
            CredentialSource::Cookie => "cookie",
        })
    }
}

/// Raw credential values found on a single request.
///
/// Both channels are kept verbatim: no trimming, no decoding beyond what the
/// transport already did. Only lives for the duration of one request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CredentialPresentation {
    pub query: Option<String>,
    pub cookie: Option<String>,
}

/// Value picked by [`CredentialPresentation::resolve`], not yet validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub value: String,
    pub source: CredentialSource,
}

impl CredentialPresentation {
    pub fn new(query: Option<String>, cookie: Option<String>) -> Self {
        Self { query, cookie }
    }

    pub fn query(&self) -> Option<&str> {
        non_empty(self.query.as_deref())
    }

    pub fn cookie(&self) -> Option<&str> {
        non_empty(self.cookie.as_deref())
    }

    /// Pick the candidate token.
    ///
    /// The query parameter always wins over the cookie, even when they
    /// differ. Empty values are treated exactly like missing ones.
    pub fn resolve(&self) -> Option<Candidate> {
        if let Some(value) = self.query() {
            return Some(Candidate {
                value: value.to_owned(),
                source: CredentialSource::Query,
            });
        }

        self.cookie().map(|value| Candidate {
            value: value.to_owned(),
            source: CredentialSource::Cookie,
        })
    }
}

fn non_empty(v: Option<&str>) -> Option<&str> {
    v.filter(|v| !v.is_empty())
}
