use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Persist the session token, replacing any previous one.
    pub fn save_token(&self, token: &str) -> Result<()> {
        self.conn().execute(
            "INSERT OR REPLACE INTO session (id, token, updated_at) VALUES (1, ?1, ?2)",
            params![token, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn load_token(&self) -> Result<Option<String>> {
        let token = self
            .conn()
            .query_row("SELECT token FROM session WHERE id = 1", [], |row| row.get(0))
            .optional()?;
        Ok(token)
    }

    pub fn clear_token(&self) -> Result<()> {
        self.conn().execute("DELETE FROM session", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_lifecycle() {
        let db = Database::open_in_memory().unwrap();
        assert_eq!(db.load_token().unwrap(), None);

        db.save_token("first").unwrap();
        db.save_token("second").unwrap();
        assert_eq!(db.load_token().unwrap().as_deref(), Some("second"));

        db.clear_token().unwrap();
        db.clear_token().unwrap();
        assert_eq!(db.load_token().unwrap(), None);
    }
}
