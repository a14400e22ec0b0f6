//! v001 -- Initial schema creation.
//!
//! Creates the `scan_history` table.

use rusqlite::Connection;

/// SQL executed when upgrading from version 0 to version 1.
const UP_SQL: &str = r#"
-- ----------------------------------------------------------------
-- Scan history (bounded, most-recent-first by seq)
-- ----------------------------------------------------------------
CREATE TABLE IF NOT EXISTS scan_history (
    seq        INTEGER PRIMARY KEY AUTOINCREMENT, -- insertion order
    id         TEXT NOT NULL UNIQUE,              -- UUID v7
    created_at TEXT NOT NULL,                     -- RFC-3339
    kind       TEXT NOT NULL,                     -- 'url' | 'message'
    value      TEXT NOT NULL,
    verdict    TEXT NOT NULL,                     -- 'safe' | 'suspicious' | 'phishing'
    risk_score REAL NOT NULL,
    reasons    TEXT NOT NULL                      -- JSON array of strings
);
"#;

/// Apply the initial migration.
pub fn up(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(UP_SQL)
}
