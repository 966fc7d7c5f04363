//! User Storage
//! Mission: Persist user accounts with SQLite

use crate::auth::models::User;
use anyhow::Result;
use rusqlite::{params, Connection, ErrorCode};
use tracing::info;
use uuid::Uuid;

/// Failure modes for user creation.
///
/// The UNIQUE index on `username` is the authoritative guard against
/// concurrent registrations; handler-level existence checks are only a
/// courtesy pre-check.
#[derive(Debug)]
pub enum CreateUserError {
    DuplicateUsername,
    Other(anyhow::Error),
}

impl std::fmt::Display for CreateUserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreateUserError::DuplicateUsername => write!(f, "Username already exists"),
            CreateUserError::Other(e) => write!(f, "Failed to create user: {}", e),
        }
    }
}

impl std::error::Error for CreateUserError {}

impl From<rusqlite::Error> for CreateUserError {
    fn from(err: rusqlite::Error) -> Self {
        if let rusqlite::Error::SqliteFailure(e, _) = &err {
            if e.code == ErrorCode::ConstraintViolation {
                return CreateUserError::DuplicateUsername;
            }
        }
        CreateUserError::Other(err.into())
    }
}

/// User storage with SQLite backend
pub struct UserStore {
    db_path: String,
}

impl UserStore {
    /// Create a new user store and initialize database
    pub fn new(db_path: &str) -> Result<Self> {
        let store = Self {
            db_path: db_path.to_string(),
        };
        store.init_db()?;
        Ok(store)
    }

    /// Initialize database schema
    fn init_db(&self) -> Result<()> {
        let conn = Connection::open(&self.db_path)?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            )",
            [],
        )?;

        Ok(())
    }

    /// Get user by username
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let conn = Connection::open(&self.db_path)?;

        let mut stmt = conn.prepare(
            "SELECT id, username, password_hash, created_at
             FROM users WHERE username = ?1",
        )?;

        let user_result = stmt.query_row(params![username], Self::row_to_user);

        match user_result {
            Ok(user) => Ok(Some(user)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Create a new user from an already-hashed password
    pub fn create_user(
        &self,
        username: &str,
        password_hash: String,
    ) -> Result<User, CreateUserError> {
        let user = User::new(username, password_hash);

        let conn = Connection::open(&self.db_path).map_err(CreateUserError::from)?;
        conn.execute(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                user.id.to_string(),
                user.username,
                user.password_hash,
                user.created_at,
            ],
        )?;

        info!("✅ Created user: {}", user.username);

        Ok(user)
    }

    fn row_to_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
        let id_str: String = row.get(0)?;
        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        Ok(User {
            id,
            username: row.get(1)?,
            password_hash: row.get(2)?,
            created_at: row.get(3)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_store() -> (UserStore, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db_path = temp_file.path().to_str().unwrap();
        let store = UserStore::new(db_path).unwrap();
        (store, temp_file)
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (store, _temp) = create_test_store();

        let created = store
            .create_user("alice", "hashed-password".to_string())
            .unwrap();
        assert_eq!(created.username, "alice");

        let retrieved = store.find_by_username("alice").unwrap();
        assert!(retrieved.is_some());

        let retrieved = retrieved.unwrap();
        assert_eq!(retrieved.id, created.id);
        assert_eq!(retrieved.password_hash, "hashed-password");
    }

    #[test]
    fn test_missing_user_is_none() {
        let (store, _temp) = create_test_store();

        assert!(store.find_by_username("nonexistent").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (store, _temp) = create_test_store();

        store.create_user("alice", "hash1".to_string()).unwrap();

        // Second insert trips the UNIQUE index regardless of password
        let result = store.create_user("alice", "hash2".to_string());
        assert!(matches!(result, Err(CreateUserError::DuplicateUsername)));

        // Original record untouched
        let user = store.find_by_username("alice").unwrap().unwrap();
        assert_eq!(user.password_hash, "hash1");
    }
}
