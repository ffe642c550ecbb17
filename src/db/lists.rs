// src/db/lists.rs
use crate::domain::listing::{ListKind, ListingRecord, ListingSet};
use crate::errors::ServerError;
use chrono::Utc;
use rusqlite::{params, Connection};

fn table(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Favorite => "favorites",
        ListKind::Reject => "rejections",
    }
}

/// Insert `hash` into the list. Returns `false` if it was already there.
pub fn add_to_list(
    conn: &Connection,
    kind: ListKind,
    hash: &str,
    record: &ListingRecord,
) -> Result<bool, ServerError> {
    let record_json = serde_json::to_string(record)?;
    let inserted = conn
        .execute(
            &format!(
                "INSERT OR IGNORE INTO {} (hash, record_json, added_at) VALUES (?1, ?2, ?3)",
                table(kind)
            ),
            params![hash, record_json, Utc::now().naive_utc()],
        )
        .map_err(|e| ServerError::DbError(format!("Insert into {} failed: {e}", table(kind))))?;

    Ok(inserted == 1)
}

/// Delete `hash` from the list. Returns `false` if it was not there.
pub fn remove_from_list(conn: &Connection, kind: ListKind, hash: &str) -> Result<bool, ServerError> {
    let deleted = conn
        .execute(
            &format!("DELETE FROM {} WHERE hash = ?1", table(kind)),
            params![hash],
        )
        .map_err(|e| ServerError::DbError(format!("Delete from {} failed: {e}", table(kind))))?;

    Ok(deleted > 0)
}

pub fn get_list(conn: &Connection, kind: ListKind) -> Result<ListingSet, ServerError> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT hash, record_json FROM {} ORDER BY hash",
            table(kind)
        ))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = ListingSet::new();
    for r in rows {
        let (hash, record_json) = r.map_err(|e| ServerError::DbError(e.to_string()))?;
        match serde_json::from_str::<ListingRecord>(&record_json) {
            Ok(record) => {
                out.insert(hash, record);
            }
            Err(e) => log::warn!("Skipping unreadable {} entry {hash}: {e}", kind.as_str()),
        }
    }
    Ok(out)
}

pub fn count_list(conn: &Connection, kind: ListKind) -> Result<i64, ServerError> {
    conn.query_row(
        &format!("SELECT COUNT(*) FROM {}", table(kind)),
        [],
        |row| row.get(0),
    )
    .map_err(|e| ServerError::DbError(format!("Count of {} failed: {e}", table(kind))))
}
