// src/host/sqlite.rs
use std::sync::atomic::{AtomicBool, Ordering};

use crate::db::connection::Database;
use crate::db::{filters, lists};
use crate::domain::filter::FilterDimension;
use crate::domain::listing::{ListKind, ListingRecord, ListingSet};
use crate::errors::ServerError;
use crate::host::{HostApi, ReadyMessage};

/// Host backed by the local SQLite file.
pub struct SqliteHost {
    db: Database,
    page_ready: AtomicBool,
}

impl SqliteHost {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            page_ready: AtomicBool::new(false),
        }
    }

    /// Refresh the filter choice lists from a freshly loaded listing set.
    pub fn publish_filter_choices(&self, listings: &ListingSet) -> Result<(), ServerError> {
        let n = self
            .db
            .with_conn(|conn| filters::sync_filter_choices(conn, listings))?;
        log::debug!("Published {n} filter choices");
        Ok(())
    }

    fn add(&self, kind: ListKind, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        let added = self
            .db
            .with_conn(|conn| lists::add_to_list(conn, kind, hash, record))?;
        if added {
            log::info!("Adding {hash} to {} list", kind.as_str());
        } else {
            log::debug!("{hash} already in {} list", kind.as_str());
        }
        Ok(added)
    }

    fn remove(&self, kind: ListKind, hash: &str) -> Result<bool, ServerError> {
        let removed = self
            .db
            .with_conn(|conn| lists::remove_from_list(conn, kind, hash))?;
        if removed {
            log::info!("Removing {hash} from {} list", kind.as_str());
        }
        Ok(removed)
    }
}

impl HostApi for SqliteHost {
    fn ready(&self) -> Result<ReadyMessage, ServerError> {
        let message = if self.page_ready.swap(true, Ordering::SeqCst) {
            "Host ready (page reloaded)"
        } else {
            log::debug!("Webpage ready!");
            "Host ready"
        };
        Ok(ReadyMessage {
            message: message.to_string(),
        })
    }

    fn get_favorites(&self) -> Result<ListingSet, ServerError> {
        self.db
            .with_conn(|conn| lists::get_list(conn, ListKind::Favorite))
    }

    fn get_rejections(&self) -> Result<ListingSet, ServerError> {
        self.db
            .with_conn(|conn| lists::get_list(conn, ListKind::Reject))
    }

    fn get_favorites_count(&self) -> Result<i64, ServerError> {
        self.db
            .with_conn(|conn| lists::count_list(conn, ListKind::Favorite))
    }

    fn get_rejections_count(&self) -> Result<i64, ServerError> {
        self.db
            .with_conn(|conn| lists::count_list(conn, ListKind::Reject))
    }

    fn add_to_favorites(&self, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        self.add(ListKind::Favorite, hash, record)
    }

    fn add_to_rejections(&self, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        self.add(ListKind::Reject, hash, record)
    }

    fn remove_from_favorites(&self, hash: &str) -> Result<bool, ServerError> {
        self.remove(ListKind::Favorite, hash)
    }

    fn remove_from_rejections(&self, hash: &str) -> Result<bool, ServerError> {
        self.remove(ListKind::Reject, hash)
    }

    fn get_filter_choices(&self, dim: FilterDimension) -> Result<Vec<String>, ServerError> {
        self.db
            .with_conn(|conn| filters::get_filter_choices(conn, dim))
    }
}
