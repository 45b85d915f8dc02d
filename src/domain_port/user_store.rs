use crate::application_port::ResolveError;
use crate::domain_model::UserRecord;

/// Persistence collaborator for identity lookups. Both lookups are read-only;
/// an absent record is `Ok(None)`, a backend failure is `Err(Store)`.
#[async_trait::async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, ResolveError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ResolveError>;
}
