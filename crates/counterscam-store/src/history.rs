use chrono::{DateTime, Utc};
use rusqlite::params;
use rusqlite::types::Type;
use uuid::Uuid;

use counterscam_shared::{EntryId, HistoryEntry, ScanKind, Verdict};

use crate::database::Database;
use crate::error::Result;

impl Database {
    /// Insert `entry` as the newest row and drop everything beyond the
    /// `cap` most recent rows, atomically.
    pub fn append_history(&mut self, entry: &HistoryEntry, cap: usize) -> Result<()> {
        let reasons = serde_json::to_string(&entry.reasons)?;
        let tx = self.conn_mut().transaction()?;

        tx.execute(
            "INSERT INTO scan_history (id, created_at, kind, value, verdict, risk_score, reasons)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                entry.id.0.to_string(),
                entry.created_at.to_rfc3339(),
                entry.kind.as_str(),
                entry.value,
                entry.verdict.as_str(),
                entry.risk_score,
                reasons,
            ],
        )?;

        let dropped = tx.execute(
            "DELETE FROM scan_history
             WHERE seq NOT IN (SELECT seq FROM scan_history ORDER BY seq DESC LIMIT ?1)",
            params![cap as i64],
        )?;

        tx.commit()?;

        if dropped > 0 {
            tracing::debug!(dropped, cap, "trimmed stored history");
        }
        Ok(())
    }

    /// Stored entries, most recent first.
    pub fn list_history(&self, limit: usize) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self.conn().prepare(
            "SELECT id, created_at, kind, value, verdict, risk_score, reasons
             FROM scan_history
             ORDER BY seq DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], row_to_entry)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    pub fn count_history(&self) -> Result<usize> {
        let count: i64 = self
            .conn()
            .query_row("SELECT COUNT(*) FROM scan_history", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    pub fn clear_history(&self) -> Result<usize> {
        let affected = self.conn().execute("DELETE FROM scan_history", [])?;
        Ok(affected)
    }
}

fn conversion_error<E>(index: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
}

fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<HistoryEntry> {
    let id_str: String = row.get(0)?;
    let created_str: String = row.get(1)?;
    let kind_str: String = row.get(2)?;
    let value: String = row.get(3)?;
    let verdict_str: String = row.get(4)?;
    let risk_score: f64 = row.get(5)?;
    let reasons_json: String = row.get(6)?;

    let id = Uuid::parse_str(&id_str).map_err(|e| conversion_error(0, e))?;

    let created_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&created_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(1, e))?;

    let kind: ScanKind = kind_str.parse().map_err(|e| conversion_error(2, e))?;
    let verdict: Verdict = verdict_str.parse().map_err(|e| conversion_error(4, e))?;
    let reasons: Vec<String> =
        serde_json::from_str(&reasons_json).map_err(|e| conversion_error(6, e))?;

    Ok(HistoryEntry {
        id: EntryId(id),
        created_at,
        kind,
        value,
        verdict,
        risk_score,
        reasons,
    })
}
