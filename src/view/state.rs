// src/view/state.rs

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::domain::filter::FilterSelection;
use crate::domain::listing::{Hash, ListKind, ListingRecord, ListingSet};
use crate::domain::sort::{sort_rows, Column, SortState};
use crate::errors::ServerError;
use crate::host::{HostApi, HostCounts};
use crate::view::link::encode_segment;
use crate::view::row::{BoardRow, RowContext, RowMode};

/// A navigation target. Exactly one is current at a time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum View {
    All,
    Favorites,
    Rejections,
    Source(String),
}

impl View {
    pub fn context(&self) -> RowContext {
        match self {
            View::All | View::Source(_) => RowContext::Browse,
            View::Favorites => RowContext::List(ListKind::Favorite),
            View::Rejections => RowContext::List(ListKind::Reject),
        }
    }

    pub fn path(&self) -> String {
        match self {
            View::All => "/views/all".to_string(),
            View::Favorites => "/views/favorites".to_string(),
            View::Rejections => "/views/rejections".to_string(),
            View::Source(name) => format!("/views/source/{}", encode_segment(name)),
        }
    }

    pub fn title(&self) -> String {
        match self {
            View::All => "All".to_string(),
            View::Favorites => "Favorites".to_string(),
            View::Rejections => "Rejections".to_string(),
            View::Source(name) => name.clone(),
        }
    }
}

/// User actions on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Favorite,
    Reject,
    Unfavorite,
    Unreject,
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "favorite" => Some(Action::Favorite),
            "reject" => Some(Action::Reject),
            "unfavorite" => Some(Action::Unfavorite),
            "unreject" => Some(Action::Unreject),
            _ => None,
        }
    }

    pub fn kind(self) -> ListKind {
        match self {
            Action::Favorite | Action::Unfavorite => ListKind::Favorite,
            Action::Reject | Action::Unreject => ListKind::Reject,
        }
    }
}

/// Result of a host-guarded action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The host confirmed. `mode` is what the row shows now; `None` means the
    /// row leaves the current table. `settled` lists older undo rows whose
    /// undo window just closed.
    Applied {
        hash: Hash,
        record: ListingRecord,
        mode: Option<RowMode>,
        settled: Vec<(Hash, ListKind)>,
    },
    /// The host said no or the call failed. Nothing changed locally.
    Refused(String),
}

/// Everything the board knows about the listings on screen.
///
/// Created when the board is mounted and dropped with it. Local state only
/// ever changes after the host confirmed the matching call.
#[derive(Debug, Default)]
pub struct ViewState {
    baseline: ListingSet,
    active: ListingSet,
    favorites: ListingSet,
    rejections: ListingSet,
    orphaned: BTreeMap<(ListKind, Hash), ListingRecord>,
    retired: HashSet<(ListKind, Hash)>,
    /// Rows currently drawn as undo placeholders, with the list they went to.
    pending_undo: HashMap<Hash, ListKind>,
    sorts: HashMap<View, SortState>,
    filters: FilterSelection,
    current: Option<View>,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take a freshly loaded characterization set as the full candidate pool.
    /// Everything derived from a previous load is dropped.
    pub fn load(&mut self, listings: ListingSet) {
        log::info!("Loaded {} characterized listings", listings.len());
        self.baseline = listings.clone();
        self.active = listings;
        self.favorites.clear();
        self.rejections.clear();
        self.orphaned.clear();
        self.pending_undo.clear();
    }

    /// Replace the local copy of `kind` with a freshly fetched host list.
    ///
    /// Entries the host no longer holds go back to active (or, for orphans,
    /// disappear) before the fetched set is merged in.
    pub fn refresh(&mut self, host_set: &ListingSet, kind: ListKind) {
        let dropped: Vec<Hash> = self
            .list(kind)
            .keys()
            .filter(|hash| !host_set.contains_key(*hash))
            .cloned()
            .collect();

        for hash in dropped {
            if let Some(record) = self.list_mut(kind).remove(&hash) {
                log::debug!("{hash} left the host's {} list", kind.as_str());
                if self.baseline.contains_key(&hash) {
                    self.active.insert(hash, record);
                }
            }
        }

        self.orphaned
            .retain(|(k, hash), _| *k != kind || host_set.contains_key(hash));

        self.reconcile(host_set, kind);
    }

    /// Fold one host-reported list into the partition.
    ///
    /// Hashes known to the current load move from active to the list; unknown
    /// hashes are kept as orphans with the host's payload. A hash the host has
    /// on both lists counts as a favorite, so the two reconcile calls give the
    /// same partition in either order.
    pub fn reconcile(&mut self, host_set: &ListingSet, kind: ListKind) {
        for (hash, payload) in host_set {
            if self.retired.contains(&(kind, hash.clone())) {
                log::debug!("Ignoring retired {} entry {hash}", kind.as_str());
                continue;
            }

            let Some(record) = self.baseline.get(hash).cloned() else {
                log::debug!("{hash} is an orphaned {} entry", kind.as_str());
                self.orphaned.insert((kind, hash.clone()), payload.clone());
                continue;
            };

            match kind {
                ListKind::Favorite => {
                    if self.rejections.remove(hash).is_some() {
                        log::warn!("{hash} is both favorited and rejected, showing as favorite");
                    }
                }
                ListKind::Reject => {
                    if self.favorites.contains_key(hash) {
                        log::warn!("{hash} is both favorited and rejected, showing as favorite");
                        continue;
                    }
                }
            }

            self.active.remove(hash);
            self.list_mut(kind).insert(hash.clone(), record);
        }
    }

    /// Run `action` against the host and, only if it confirms, move the row.
    pub fn apply_action(
        &mut self,
        host: &dyn HostApi,
        hash: &str,
        action: Action,
    ) -> Result<ActionOutcome, ServerError> {
        let kind = action.kind();
        match action {
            Action::Favorite | Action::Reject => {
                let record = self.active.get(hash).cloned().ok_or(ServerError::NotFound)?;

                if let Some(reason) = refused(host.add_to_list(kind, hash, &record), hash) {
                    return Ok(ActionOutcome::Refused(reason));
                }

                self.active.remove(hash);
                self.list_mut(kind).insert(hash.to_string(), record.clone());
                let settled = self.settle_pending();
                self.pending_undo.insert(hash.to_string(), kind);

                Ok(ActionOutcome::Applied {
                    hash: hash.to_string(),
                    record,
                    mode: Some(RowMode::PendingUndo(kind)),
                    settled,
                })
            }
            Action::Unfavorite | Action::Unreject => {
                if !self.list(kind).contains_key(hash) {
                    if self.orphaned.contains_key(&(kind, hash.to_string())) {
                        return self.retire_orphan(host, kind, hash);
                    }
                    return Err(ServerError::NotFound);
                }

                match self.remove_confirmed(host, kind, hash) {
                    Ok(record) => Ok(ActionOutcome::Applied {
                        hash: hash.to_string(),
                        record,
                        mode: None,
                        settled: Vec::new(),
                    }),
                    Err(reason) => Ok(ActionOutcome::Refused(reason)),
                }
            }
        }
    }

    /// Reverse the pending favorite/reject on `hash`.
    pub fn undo(&mut self, host: &dyn HostApi, hash: &str) -> Result<ActionOutcome, ServerError> {
        let Some(kind) = self.pending_undo.get(hash).copied() else {
            return Err(ServerError::BadRequest(format!("nothing to undo for {hash}")));
        };

        match self.remove_confirmed(host, kind, hash) {
            Ok(record) => Ok(ActionOutcome::Applied {
                hash: hash.to_string(),
                record,
                mode: Some(RowMode::Normal),
                settled: Vec::new(),
            }),
            Err(reason) => Ok(ActionOutcome::Refused(reason)),
        }
    }

    /// Permanently drop an orphaned entry. Terminal: a later reconcile that
    /// still carries the hash will not bring it back.
    pub fn retire_orphan(
        &mut self,
        host: &dyn HostApi,
        kind: ListKind,
        hash: &str,
    ) -> Result<ActionOutcome, ServerError> {
        let key = (kind, hash.to_string());
        let record = self.orphaned.get(&key).cloned().ok_or(ServerError::NotFound)?;

        if let Some(reason) = refused(host.remove_from_list(kind, hash), hash) {
            return Ok(ActionOutcome::Refused(reason));
        }

        self.orphaned.remove(&key);
        self.retired.insert(key);
        log::info!("Retired orphaned {} entry {hash}", kind.as_str());

        Ok(ActionOutcome::Applied {
            hash: hash.to_string(),
            record,
            mode: None,
            settled: Vec::new(),
        })
    }

    /// Switch the current view. List views re-fetch their list from the host
    /// first; a failed fetch leaves the last known list in place and returns
    /// the diagnostic.
    pub fn show(&mut self, host: &dyn HostApi, view: View) -> Option<String> {
        self.pending_undo.clear();
        let mut warning = None;

        let refresh = match view {
            View::Favorites => Some(ListKind::Favorite),
            View::Rejections => Some(ListKind::Reject),
            View::All | View::Source(_) => None,
        };

        if let Some(kind) = refresh {
            match host.get_list(kind) {
                Ok(set) => self.refresh(&set, kind),
                Err(e) => {
                    log::warn!("Fetching {} list failed: {e}", kind.as_str());
                    warning = Some(format!("Could not refresh the {} list: {e}", kind.as_str()));
                }
            }
        }

        self.current = Some(view);
        warning
    }

    pub fn current_view(&self) -> View {
        self.current.clone().unwrap_or(View::All)
    }

    /// Click on a column header of the current table.
    pub fn sort_current(&mut self, column: Column) {
        self.pending_undo.clear();
        let view = self.current_view();
        let direction = self.sorts.entry(view).or_default().toggle(column);
        log::debug!("Sorting by {} {direction:?}", column.slug());
    }

    pub fn sort_state(&self, view: &View) -> SortState {
        self.sorts.get(view).copied().unwrap_or_default()
    }

    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.pending_undo.clear();
        self.filters = filters;
    }

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    /// Rows of `view`, filtered and sorted.
    pub fn rows(&self, view: &View) -> Vec<BoardRow> {
        let mut rows: Vec<BoardRow> = match view {
            View::All => self.browse_rows(|_| true),
            View::Source(name) => self.browse_rows(|r| r.housing_data.source == *name),
            View::Favorites => self.list_rows(ListKind::Favorite),
            View::Rejections => self.list_rows(ListKind::Reject),
        };

        let sort = self.sort_state(view);
        if let Some(column) = sort.column {
            sort_rows(&mut rows, column.kind(), sort.direction(), |row| {
                column.cell_text(&row.record)
            });
        }
        rows
    }

    fn browse_rows<F>(&self, keep: F) -> Vec<BoardRow>
    where
        F: Fn(&ListingRecord) -> bool,
    {
        self.active
            .iter()
            .filter(|(_, record)| keep(record) && self.filters.passes(record))
            .map(|(hash, record)| BoardRow {
                hash: hash.clone(),
                record: record.clone(),
                mode: RowMode::Normal,
            })
            .collect()
    }

    fn list_rows(&self, kind: ListKind) -> Vec<BoardRow> {
        let kept = self.list(kind).iter().map(|(hash, record)| BoardRow {
            hash: hash.clone(),
            record: record.clone(),
            mode: RowMode::Normal,
        });
        let orphans = self
            .orphaned
            .iter()
            .filter(|((k, _), _)| *k == kind)
            .map(|((k, hash), record)| BoardRow {
                hash: hash.clone(),
                record: record.clone(),
                mode: RowMode::Orphaned(*k),
            });
        kept.chain(orphans).collect()
    }

    /// Distinct listing sources of the current load, for the per-source views.
    pub fn sources(&self) -> BTreeSet<String> {
        self.baseline
            .values()
            .map(|r| r.housing_data.source.clone())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn active(&self) -> &ListingSet {
        &self.active
    }

    pub fn list(&self, kind: ListKind) -> &ListingSet {
        match kind {
            ListKind::Favorite => &self.favorites,
            ListKind::Reject => &self.rejections,
        }
    }

    pub fn orphaned(&self) -> &BTreeMap<(ListKind, Hash), ListingRecord> {
        &self.orphaned
    }

    /// With no orphans, active + host favorites + host rejections must add up
    /// to the loaded set. Mismatches are logged; nothing is corrected.
    pub fn check_totals(&self, counts: HostCounts) -> bool {
        if !self.orphaned.is_empty() {
            return true;
        }
        let sum = self.active.len() as i64 + counts.favorites + counts.rejections;
        let ok = sum == self.baseline.len() as i64;
        if !ok {
            log::warn!(
                "Listing totals disagree: {} active + {} favorites + {} rejections != {} loaded",
                self.active.len(),
                counts.favorites,
                counts.rejections,
                self.baseline.len()
            );
        }
        ok
    }

    fn list_mut(&mut self, kind: ListKind) -> &mut ListingSet {
        match kind {
            ListKind::Favorite => &mut self.favorites,
            ListKind::Reject => &mut self.rejections,
        }
    }

    /// Close the undo window on every pending row.
    fn settle_pending(&mut self) -> Vec<(Hash, ListKind)> {
        let mut settled: Vec<(Hash, ListKind)> = self.pending_undo.drain().collect();
        settled.sort();
        settled
    }

    /// Ask the host to drop `hash` from `kind`; on success move it back to active.
    fn remove_confirmed(
        &mut self,
        host: &dyn HostApi,
        kind: ListKind,
        hash: &str,
    ) -> Result<ListingRecord, String> {
        if let Some(reason) = refused(host.remove_from_list(kind, hash), hash) {
            return Err(reason);
        }

        self.pending_undo.remove(hash);
        let record = self
            .list_mut(kind)
            .remove(hash)
            .or_else(|| self.baseline.get(hash).cloned())
            .unwrap_or_default();
        if self.baseline.contains_key(hash) {
            self.active.insert(hash.to_string(), record.clone());
        }
        Ok(record)
    }
}

/// `Some(reason)` unless the host call returned `Ok(true)`.
fn refused(result: Result<bool, ServerError>, hash: &str) -> Option<String> {
    match result {
        Ok(true) => None,
        Ok(false) => {
            log::warn!("Host declined the change for {hash}");
            Some(format!("The host declined the change for {hash}."))
        }
        Err(e) => {
            log::warn!("Host call for {hash} failed: {e}");
            Some(format!("{e}"))
        }
    }
}
