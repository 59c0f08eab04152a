//! User storage

use async_trait::async_trait;
use sqlx::PgPool;

use super::models::{NewUser, UserRecord};
use super::service::UserAuthError;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken email yields [`UserAuthError::DuplicateEmail`]
    async fn insert(&self, user: NewUser) -> Result<i64, UserAuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserAuthError>;
}

/// PostgreSQL-backed user repository
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn insert(&self, user: NewUser) -> Result<i64, UserAuthError> {
        let result = sqlx::query_scalar::<_, i64>(
            r#"INSERT INTO users (name, email, password_hash, role)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(id) => Ok(id),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(UserAuthError::DuplicateEmail)
            }
            Err(e) => Err(UserAuthError::Database(e)),
        }
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserAuthError> {
        let user = sqlx::query_as::<_, UserRecord>(
            r#"SELECT id, name, email, password_hash, role, created_at
               FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// In-memory repository for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserRepository {
        users: Mutex<Vec<UserRecord>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }

        pub fn get(&self, email: &str) -> Option<UserRecord> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned()
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn insert(&self, user: NewUser) -> Result<i64, UserAuthError> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.email == user.email) {
                return Err(UserAuthError::DuplicateEmail);
            }
            let id = users.len() as i64 + 1;
            users.push(UserRecord {
                id,
                name: user.name,
                email: user.email,
                password_hash: user.password_hash,
                role: user.role,
                created_at: Utc::now(),
            });
            Ok(id)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, UserAuthError> {
            Ok(self.get(email))
        }
    }
}

#[cfg(test)]
pub use mock::MockUserRepository;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::Role;
    use crate::db::{Database, test_database_url};

    #[tokio::test]
    #[ignore = "requires PostgreSQL database"]
    async fn test_pg_duplicate_email_detected() {
        let db = Database::connect(&test_database_url())
            .await
            .expect("Failed to connect");
        db.init_schema().await.expect("schema");
        let repo = PgUserRepository::new(db.pool().clone());

        let email = format!("dup-{}@example.com", chrono::Utc::now().timestamp_micros());
        let user = NewUser {
            name: "dup".to_string(),
            email: email.clone(),
            password_hash: "$argon2id$stub".to_string(),
            role: Role::Customer,
        };

        assert!(repo.insert(user.clone()).await.is_ok());
        assert!(matches!(
            repo.insert(user).await,
            Err(UserAuthError::DuplicateEmail)
        ));

        let found = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(found.role, Role::Customer);
    }
}
