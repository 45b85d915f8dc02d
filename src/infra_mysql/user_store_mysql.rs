use crate::application_port::ResolveError;
use crate::domain_model::{UserId, UserRecord};
use crate::domain_port::UserStore;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

pub struct MySqlUserStore {
    pool: MySqlPool,
}

impl MySqlUserStore {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserStore { pool }
    }
}

#[async_trait::async_trait]
impl UserStore for MySqlUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, ResolveError> {
        let row = sqlx::query(
            r#"
SELECT user_id, username, email, password_hash, is_enabled, is_locked, authorities, created_at
FROM user
WHERE username = ?
"#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ResolveError::Store(format!("query by username: {e}")))?;

        row.map(record_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, ResolveError> {
        let row = sqlx::query(
            r#"
SELECT user_id, username, email, password_hash, is_enabled, is_locked, authorities, created_at
FROM user
WHERE email = ?
"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ResolveError::Store(format!("query by email: {e}")))?;

        row.map(record_from_row).transpose()
    }
}

// authorities are stored as one comma-separated column
fn record_from_row(row: MySqlRow) -> Result<UserRecord, ResolveError> {
    let read_err = |field: &str| {
        let field = field.to_string();
        move |e: sqlx::Error| ResolveError::Store(format!("read {field}: {e}"))
    };

    let authorities: String = row.try_get("authorities").map_err(read_err("authorities"))?;
    let authorities = authorities
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    Ok(UserRecord {
        user_id: row
            .try_get::<UserId, _>("user_id")
            .map_err(read_err("user_id"))?,
        username: row.try_get("username").map_err(read_err("username"))?,
        email: row.try_get("email").map_err(read_err("email"))?,
        password_hash: row
            .try_get("password_hash")
            .map_err(read_err("password_hash"))?,
        enabled: row.try_get("is_enabled").map_err(read_err("is_enabled"))?,
        locked: row.try_get("is_locked").map_err(read_err("is_locked"))?,
        authorities,
        created_at: row
            .try_get::<DateTime<Utc>, _>("created_at")
            .map_err(read_err("created_at"))?,
    })
}
