use crate::application_port::*;
use crate::domain_model::UserRecord;
use crate::domain_port::UserStore;
use regex::Regex;
use std::sync::{Arc, LazyLock};

// Syntactic heuristic, not RFC 5322 validation: case-sensitive, no length
// limits, and anything after '@' is accepted. Do not tighten; callers rely
// on non-matching inputs falling through to the username path.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9+_.-]+@.+$").unwrap());

pub struct RealIdentifierResolver {
    user_store: Arc<dyn UserStore>,
}

impl RealIdentifierResolver {
    pub fn new(user_store: Arc<dyn UserStore>) -> RealIdentifierResolver {
        RealIdentifierResolver { user_store }
    }
}

#[async_trait::async_trait]
impl IdentifierResolver for RealIdentifierResolver {
    async fn resolve(&self, identifier: &str) -> Result<UserRecord, ResolveError> {
        if EMAIL_PATTERN.is_match(identifier) {
            self.user_store
                .find_by_email(identifier)
                .await?
                .ok_or_else(|| ResolveError::NotFound {
                    lookup: Lookup::Email,
                    identifier: identifier.to_string(),
                })
        } else {
            self.user_store
                .find_by_username(identifier)
                .await?
                .ok_or_else(|| ResolveError::NotFound {
                    lookup: Lookup::Username,
                    identifier: identifier.to_string(),
                })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application_impl::{FakeUserStore, fake_record};

    fn resolver_with(store: FakeUserStore) -> (Arc<FakeUserStore>, RealIdentifierResolver) {
        let store = Arc::new(store);
        let resolver = RealIdentifierResolver::new(store.clone());
        (store, resolver)
    }

    #[tokio::test]
    async fn email_identifier_resolves_by_email() {
        let mut store = FakeUserStore::new();
        let alice = fake_record("alice", "alice@example.com");
        store.insert(alice.clone());
        let (store, resolver) = resolver_with(store);

        let record = resolver.resolve("alice@example.com").await.unwrap();

        assert_eq!(record, alice);
        assert_eq!(store.calls(), vec![Lookup::Email]);
    }

    #[tokio::test]
    async fn plain_identifier_resolves_by_username() {
        let mut store = FakeUserStore::new();
        let alice = fake_record("alice", "alice@example.com");
        store.insert(alice.clone());
        let (store, resolver) = resolver_with(store);

        let record = resolver.resolve("alice").await.unwrap();

        assert_eq!(record, alice);
        assert_eq!(store.calls(), vec![Lookup::Username]);
    }

    #[tokio::test]
    async fn missing_email_reports_email_not_found() {
        let (_, resolver) = resolver_with(FakeUserStore::new());

        let err = resolver.resolve("bob@nowhere").await.unwrap_err();

        assert_eq!(err.to_string(), "User not found with email: bob@nowhere");
    }

    #[tokio::test]
    async fn missing_username_reports_username_not_found() {
        let (_, resolver) = resolver_with(FakeUserStore::new());

        let err = resolver.resolve("unknown_user").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "User not found with username: unknown_user"
        );
    }

    #[tokio::test]
    async fn email_shaped_inputs_only_hit_the_email_path() {
        let inputs = [
            "a@b",
            "first.last@example.com",
            "user+tag@example.com",
            "under_score@host",
            "dash-ed@host",
            "a@b@c",
            "dots@..",
        ];

        for input in inputs {
            let (store, resolver) = resolver_with(FakeUserStore::new());
            let _ = resolver.resolve(input).await;
            assert_eq!(store.calls(), vec![Lookup::Email], "input: {input}");
        }
    }

    #[tokio::test]
    async fn other_inputs_only_hit_the_username_path() {
        let inputs = [
            "alice",
            "",
            "@example.com",
            "trailing@",
            "spaced name@example.com",
            "ünïcode@example.com",
        ];

        for input in inputs {
            let (store, resolver) = resolver_with(FakeUserStore::new());
            let _ = resolver.resolve(input).await;
            assert_eq!(store.calls(), vec![Lookup::Username], "input: {input}");
        }
    }

    #[tokio::test]
    async fn username_containing_at_sign_in_store_is_unreachable_by_username_path() {
        // An '@' identifier with a matchable local part always classifies as
        // email, even when only a username matches it.
        let mut store = FakeUserStore::new();
        store.insert(fake_record("odd@name", "odd@example.com"));
        let (store, resolver) = resolver_with(store);

        let err = resolver.resolve("odd@name").await.unwrap_err();

        assert_eq!(err.to_string(), "User not found with email: odd@name");
        assert_eq!(store.calls(), vec![Lookup::Email]);
    }

    #[tokio::test]
    async fn store_failure_surfaces_unchanged_on_both_paths() {
        // A backend failure must pass through resolve without being wrapped
        // or turned into NotFound.
        let mut store = FakeUserStore::new();
        store.insert(fake_record("erin", "erin@example.com"));
        store.fail_with("connection refused");
        let (_, resolver) = resolver_with(store);

        let by_email = resolver.resolve("erin@example.com").await.unwrap_err();
        assert!(matches!(
            &by_email,
            ResolveError::Store(msg) if msg == "connection refused"
        ));
        assert_eq!(by_email.to_string(), "store error: connection refused");

        let by_username = resolver.resolve("erin").await.unwrap_err();
        assert!(matches!(
            &by_username,
            ResolveError::Store(msg) if msg == "connection refused"
        ));
    }

    #[tokio::test]
    async fn resolve_is_idempotent_over_unchanged_store() {
        let mut store = FakeUserStore::new();
        store.insert(fake_record("carol", "carol@example.com"));
        let (_, resolver) = resolver_with(store);

        let first = resolver.resolve("carol").await.unwrap();
        let second = resolver.resolve("carol").await.unwrap();

        assert_eq!(first, second);

        let miss_a = resolver.resolve("nobody").await.unwrap_err();
        let miss_b = resolver.resolve("nobody").await.unwrap_err();
        assert_eq!(miss_a.to_string(), miss_b.to_string());
    }

    #[tokio::test]
    async fn record_passes_through_unchanged() {
        let mut store = FakeUserStore::new();
        let mut dave = fake_record("dave", "dave@example.com");
        dave.enabled = false;
        dave.locked = true;
        dave.authorities = vec!["ROLE_ADMIN".to_string(), "ROLE_USER".to_string()];
        store.insert(dave.clone());
        let (_, resolver) = resolver_with(store);

        let record = resolver.resolve("dave@example.com").await.unwrap();

        assert_eq!(record, dave);
    }
}
