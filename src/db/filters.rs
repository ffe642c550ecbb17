// src/db/filters.rs
use crate::domain::filter::FilterDimension;
use crate::domain::listing::ListingSet;
use crate::errors::ServerError;
use rusqlite::{params, Connection};

/// Replace the stored filter choices with the distinct values present in `listings`.
pub fn sync_filter_choices(conn: &mut Connection, listings: &ListingSet) -> Result<usize, ServerError> {
    let tx = conn
        .transaction()
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    tx.execute("DELETE FROM filter_choices", [])
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut inserted = 0;
    for record in listings.values() {
        for dim in FilterDimension::ALL {
            let Some(value) = record.housing_data.dimension_value(dim) else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            inserted += tx
                .execute(
                    "INSERT OR IGNORE INTO filter_choices (dimension, value) VALUES (?1, ?2)",
                    params![dim.as_str(), value.trim()],
                )
                .map_err(|e| ServerError::DbError(e.to_string()))?;
        }
    }

    tx.commit()
        .map_err(|e| ServerError::DbError(e.to_string()))?;
    Ok(inserted)
}

pub fn get_filter_choices(conn: &Connection, dim: FilterDimension) -> Result<Vec<String>, ServerError> {
    let mut stmt = conn
        .prepare("SELECT value FROM filter_choices WHERE dimension = ?1 ORDER BY value")
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let rows = stmt
        .query_map(params![dim.as_str()], |row| row.get::<_, String>(0))
        .map_err(|e| ServerError::DbError(e.to_string()))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r.map_err(|e| ServerError::DbError(e.to_string()))?);
    }
    Ok(out)
}
