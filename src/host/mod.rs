// src/host/mod.rs
//
// The board never owns durable state: favorites, rejections, their counts and
// the filter choice lists all come from a host through this trait.

mod sqlite;

pub use sqlite::SqliteHost;

use serde::Serialize;

use crate::domain::filter::FilterDimension;
use crate::domain::listing::{ListKind, ListingRecord, ListingSet};
use crate::errors::ServerError;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadyMessage {
    pub message: String,
}

/// Request/response operations offered by the host.
///
/// `Ok(false)` is a refusal (nothing changed host-side); `Err` is a failed call.
/// Neither may be followed by a local state change.
pub trait HostApi: Send + Sync {
    fn ready(&self) -> Result<ReadyMessage, ServerError>;

    fn get_favorites(&self) -> Result<ListingSet, ServerError>;
    fn get_rejections(&self) -> Result<ListingSet, ServerError>;

    fn get_favorites_count(&self) -> Result<i64, ServerError>;
    fn get_rejections_count(&self) -> Result<i64, ServerError>;

    fn add_to_favorites(&self, hash: &str, record: &ListingRecord) -> Result<bool, ServerError>;
    fn add_to_rejections(&self, hash: &str, record: &ListingRecord) -> Result<bool, ServerError>;

    fn remove_from_favorites(&self, hash: &str) -> Result<bool, ServerError>;
    fn remove_from_rejections(&self, hash: &str) -> Result<bool, ServerError>;

    fn get_filter_choices(&self, dim: FilterDimension) -> Result<Vec<String>, ServerError>;

    fn get_list(&self, kind: ListKind) -> Result<ListingSet, ServerError> {
        match kind {
            ListKind::Favorite => self.get_favorites(),
            ListKind::Reject => self.get_rejections(),
        }
    }

    fn list_count(&self, kind: ListKind) -> Result<i64, ServerError> {
        match kind {
            ListKind::Favorite => self.get_favorites_count(),
            ListKind::Reject => self.get_rejections_count(),
        }
    }

    fn add_to_list(&self, kind: ListKind, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        match kind {
            ListKind::Favorite => self.add_to_favorites(hash, record),
            ListKind::Reject => self.add_to_rejections(hash, record),
        }
    }

    fn remove_from_list(&self, kind: ListKind, hash: &str) -> Result<bool, ServerError> {
        match kind {
            ListKind::Favorite => self.remove_from_favorites(hash),
            ListKind::Reject => self.remove_from_rejections(hash),
        }
    }
}

/// Host-reported list sizes, used for the navigation badges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HostCounts {
    pub favorites: i64,
    pub rejections: i64,
}

impl HostCounts {
    pub fn fetch(host: &dyn HostApi) -> Result<Self, ServerError> {
        Ok(Self {
            favorites: host.get_favorites_count()?,
            rejections: host.get_rejections_count()?,
        })
    }
}

impl<T: HostApi + ?Sized> HostApi for std::sync::Arc<T> {
    fn ready(&self) -> Result<ReadyMessage, ServerError> {
        (**self).ready()
    }

    fn get_favorites(&self) -> Result<ListingSet, ServerError> {
        (**self).get_favorites()
    }

    fn get_rejections(&self) -> Result<ListingSet, ServerError> {
        (**self).get_rejections()
    }

    fn get_favorites_count(&self) -> Result<i64, ServerError> {
        (**self).get_favorites_count()
    }

    fn get_rejections_count(&self) -> Result<i64, ServerError> {
        (**self).get_rejections_count()
    }

    fn add_to_favorites(&self, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        (**self).add_to_favorites(hash, record)
    }

    fn add_to_rejections(&self, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        (**self).add_to_rejections(hash, record)
    }

    fn remove_from_favorites(&self, hash: &str) -> Result<bool, ServerError> {
        (**self).remove_from_favorites(hash)
    }

    fn remove_from_rejections(&self, hash: &str) -> Result<bool, ServerError> {
        (**self).remove_from_rejections(hash)
    }

    fn get_filter_choices(&self, dim: FilterDimension) -> Result<Vec<String>, ServerError> {
        (**self).get_filter_choices(dim)
    }
}
