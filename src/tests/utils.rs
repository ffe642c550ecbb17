use crate::domain::filter::FilterDimension;
use crate::domain::listing::{CharOutput, HousingData, ListKind, ListingRecord, ListingSet};
use crate::errors::ServerError;
use crate::host::{HostApi, ReadyMessage};
use crate::db::connection::{init_db, Database};
use astra::Response;
use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Mutex;
use tempfile::TempDir;

/// A schema-initialized SQLite file inside `dir`; removed with the directory.
pub fn temp_db(dir: &TempDir) -> Database {
    let db = Database::new(dir.path().join("board.sqlite3").to_string_lossy().into_owned());
    init_db(&db).unwrap();
    db
}

pub fn listing(address: &str, rent: f64, score: f64, source: &str) -> ListingRecord {
    ListingRecord {
        housing_data: HousingData {
            address: address.to_string(),
            rent: Some(rent),
            beds: Some(2.0),
            baths: Some(1.0),
            source: source.to_string(),
            link: format!("https://example.com/{}", address.replace(' ', "-")),
            ..Default::default()
        },
        char_output: CharOutput {
            score,
            transit: None,
        },
    }
}

pub fn body_string(mut resp: Response) -> String {
    let mut body = String::new();
    resp.body_mut()
        .reader()
        .read_to_string(&mut body)
        .unwrap();
    body
}

#[derive(Debug, Clone, Copy)]
pub enum HostFailure {
    /// The call succeeds but answers `false`.
    Falsy,
    /// The call itself fails.
    Error,
}

/// In-memory host with one-shot failure injection.
#[derive(Default)]
pub struct MemoryHost {
    lists: Mutex<BTreeMap<ListKind, ListingSet>>,
    choices: Mutex<BTreeMap<FilterDimension, Vec<String>>>,
    failure: Mutex<Option<HostFailure>>,
}

impl MemoryHost {
    pub fn with_list(self, kind: ListKind, entries: ListingSet) -> Self {
        self.lists.lock().unwrap().insert(kind, entries);
        self
    }

    pub fn with_choices(self, dim: FilterDimension, values: &[&str]) -> Self {
        self.choices
            .lock()
            .unwrap()
            .insert(dim, values.iter().map(|v| v.to_string()).collect());
        self
    }

    pub fn fail_next(&self, failure: HostFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn count(&self, kind: ListKind) -> usize {
        self.lists
            .lock()
            .unwrap()
            .get(&kind)
            .map(|l| l.len())
            .unwrap_or(0)
    }

    fn take_failure(&self) -> Option<HostFailure> {
        self.failure.lock().unwrap().take()
    }

    fn read_check(&self) -> Result<(), ServerError> {
        match self.take_failure() {
            Some(HostFailure::Error) => Err(ServerError::HostRejected("injected".into())),
            _ => Ok(()),
        }
    }

    fn write<F>(&self, f: F) -> Result<bool, ServerError>
    where
        F: FnOnce(&mut BTreeMap<ListKind, ListingSet>) -> bool,
    {
        match self.take_failure() {
            Some(HostFailure::Error) => Err(ServerError::HostRejected("injected".into())),
            Some(HostFailure::Falsy) => Ok(false),
            None => Ok(f(&mut self.lists.lock().unwrap())),
        }
    }

    fn get(&self, kind: ListKind) -> Result<ListingSet, ServerError> {
        self.read_check()?;
        Ok(self
            .lists
            .lock()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_default())
    }

    fn add(&self, kind: ListKind, hash: &str, record: &ListingRecord) -> Result<bool, ServerError> {
        self.write(|lists| {
            let list = lists.entry(kind).or_default();
            if list.contains_key(hash) {
                return false;
            }
            list.insert(hash.to_string(), record.clone());
            true
        })
    }

    fn remove(&self, kind: ListKind, hash: &str) -> Result<bool, ServerError> {
        self.write(|lists| {
            lists
                .get_mut(&kind)
                .map(|l| l.remove(hash).is_some())
                .unwrap_or(false)
        })
    }
}

impl HostApi for MemoryHost {
    fn ready(&self) -> Result<ReadyMessage, ServerError> {
        self.read_check()?;
        Ok(ReadyMessage {
            message: "memory host ready".into(),
        })
    }

    fn get_favorites(&self) -> Result<ListingSet, ServerError> {
        self.get(ListKind::Favorite)
    }

    fn get_rejections(&self) -> Result<ListingSet, ServerError> {
        self.get(ListKind::Reject)
    }

    fn get_favorites_count(&self) -> Result<i64, ServerError> {
        self.read_check()?;
        Ok(self.count(ListKind::Favorite) as i64)
    }

    fn get_rejections_count(&self) -> Result<i64, ServerError> {
        self.read_check()?;
        Ok(self.count(ListKind::Reject) as i64)
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
        self.read_check()?;
        Ok(self
            .choices
            .lock()
            .unwrap()
            .get(&dim)
            .cloned()
            .unwrap_or_default())
    }
}
