//! `SQLite` database connection and operations.
//!
//! The database is stored at `~/.serenity/serenity.db` and holds the
//! key-value table behind the persisted mood and journal logs.

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::Paths;
use crate::error::SerenityError;

use super::kv::KeyValueStore;
use super::migrations;

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database described by `paths`, creating its directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_with(paths: &Paths) -> Result<Self, SerenityError> {
        paths.ensure_dirs()?;
        Self::open_at(&paths.database)
    }

    /// Open the database at a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, SerenityError> {
        let conn = Connection::open(path).map_err(|e| {
            SerenityError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, SerenityError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            SerenityError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    fn migrate(&self) -> Result<(), SerenityError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    #[cfg(test)]
    fn schema_version(&self) -> Result<i32, SerenityError> {
        migrations::get_version(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, SerenityError> {
        self.conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| SerenityError::Database(format!("Failed to read {key}: {e}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SerenityError> {
        self.conn
            .execute(
                r"INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value,
                                                 updated_at = excluded.updated_at",
                params![key, value, chrono::Utc::now().to_rfc3339()],
            )
            .map_err(|e| SerenityError::Database(format!("Failed to write {key}: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_open_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let db = Database::open_at(&db_path).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(db_path.exists());
    }

    #[test]
    fn test_open_with_creates_root() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_root(temp_dir.path().join("data"));

        let db = Database::open_with(&paths).unwrap();
        assert!(db.schema_version().unwrap() > 0);
        assert!(paths.database.exists());
    }

    #[test]
    fn test_get_missing_key() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("moodEntries").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let mut db = Database::open_in_memory().unwrap();

        db.set("moodEntries", "[]").unwrap();
        db.set("moodEntries", "[1]").unwrap();

        assert_eq!(db.get("moodEntries").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let mut db = Database::open_at(&db_path).unwrap();
            db.set("journalEntries", "[]").unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        assert_eq!(db.get("journalEntries").unwrap().as_deref(), Some("[]"));
    }
}
