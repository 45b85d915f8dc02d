use crate::domain_model::UserRecord;
use std::fmt;

/// Which lookup path a resolution took. Carried by `NotFound` so the
/// rejection message names the path that was actually tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    Email,
    Username,
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Email => write!(f, "email"),
            Lookup::Username => write!(f, "username"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("User not found with {lookup}: {identifier}")]
    NotFound { lookup: Lookup, identifier: String },
    #[error("store error: {0}")]
    Store(String),
}

/// The plug-in seam the authentication pipeline calls into. One method,
/// stateless, shareable across concurrent callers.
#[async_trait::async_trait]
pub trait IdentifierResolver: Send + Sync {
    async fn resolve(&self, identifier: &str) -> Result<UserRecord, ResolveError>;
}
