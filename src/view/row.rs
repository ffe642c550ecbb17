// src/view/row.rs

use crate::domain::listing::{Hash, ListKind, ListingRecord};

/// What a single table row currently shows.
///
/// ```text
/// Normal --(favorite|reject, confirmed)--> PendingUndo --(undo, confirmed)--> Normal
///                                          PendingUndo --(newer action)-----> static "Moved to" row
/// Orphaned --(remove, confirmed)--> gone for good
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowMode {
    Normal,
    PendingUndo(ListKind),
    Orphaned(ListKind),
}

/// Which table a row is drawn in; decides the action buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowContext {
    /// "All" and per-source tables: favorite / reject.
    Browse,
    /// A favorites or rejections table: remove.
    List(ListKind),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardRow {
    pub hash: Hash,
    pub record: ListingRecord,
    pub mode: RowMode,
}

pub fn moved_message(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Favorite => "Moved to Favorites",
        ListKind::Reject => "Moved to Rejected",
    }
}
