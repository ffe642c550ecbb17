use crate::domain::listing::{Hash, ListKind, ListingRecord};
use crate::domain::score::{score_label, ScoreBucket};
use crate::domain::sort::Column;
use crate::domain::transit::{BadgeDescriptor, TransitBadge};
use crate::view::link::listing_path;
use crate::view::row::{moved_message, BoardRow, RowContext, RowMode};
use maud::{html, Markup};

/// Columns in the listing table, actions included.
pub const TABLE_COLUMNS: usize = 9;

pub fn row_id(hash: &str) -> String {
    format!("row-{hash}")
}

/// Render one row in whatever mode it is in.
pub fn listing_row(row: &BoardRow, ctx: RowContext) -> Markup {
    match row.mode {
        RowMode::Normal => normal_row(&row.hash, &row.record, ctx),
        RowMode::PendingUndo(kind) => undo_row(&row.hash, kind),
        RowMode::Orphaned(kind) => orphan_row(&row.hash, &row.record, kind),
    }
}

/// Resolve the record's transit lines to badges. Unknown lines are logged and left out.
pub fn transit_badges(record: &ListingRecord) -> Vec<BadgeDescriptor> {
    record
        .char_output
        .transit_lines()
        .into_iter()
        .filter_map(|name| match TransitBadge::resolve(name) {
            TransitBadge::Known(line) => Some(line.descriptor()),
            TransitBadge::Unknown(name) => {
                log::warn!("Unknown train line: {name}");
                None
            }
        })
        .collect()
}

fn listing_cells(record: &ListingRecord) -> Markup {
    let h = &record.housing_data;
    let bucket = ScoreBucket::from_score(record.char_output.score);

    html! {
        td class="address-row" { (h.address) }
        td { (Column::Rent.cell_text(record)) }
        td { (Column::Beds.cell_text(record)) }
        td { (Column::Baths.cell_text(record)) }
        td {
            @for badge in transit_badges(record) {
                span class=(format!("{} badge", badge.color.css_class())) {
                    @match badge.code {
                        Some(code) => { (code) }
                        None => { "\u{a0}" }
                    }
                }
            }
        }
        td { span class=(format!("{} badge", bucket.css_class())) { (score_label(record.char_output.score)) } }
        td { (h.source) }
        td { a target="_blank" rel="noopener" href=(h.link) { "Visit Page" } }
    }
}

fn action_button(hash: &str, action: &str, class: &str, label: &str) -> Markup {
    html! {
        button
            type="button"
            class=(class)
            hx-post=(listing_path(hash, action))
            hx-target="closest tr"
            hx-swap="outerHTML"
        { (label) }
    }
}

pub fn normal_row(hash: &str, record: &ListingRecord, ctx: RowContext) -> Markup {
    html! {
        tr id=(row_id(hash)) {
            (listing_cells(record))
            td {
                div class="btn-group" role="group" {
                    @match ctx {
                        RowContext::Browse => {
                            (action_button(hash, "favorite", "fav-button btn btn-success", "Favorite"))
                            (action_button(hash, "reject", "rej-button btn btn-danger", "Reject"))
                        }
                        RowContext::List(ListKind::Favorite) => {
                            (action_button(hash, "unfavorite", "remove-button btn btn-warning", "Remove"))
                        }
                        RowContext::List(ListKind::Reject) => {
                            (action_button(hash, "unreject", "remove-button btn btn-warning", "Remove"))
                        }
                    }
                }
            }
        }
    }
}

pub fn undo_row(hash: &str, kind: ListKind) -> Markup {
    html! {
        tr id=(row_id(hash)) class=(format!("undo-row {}", kind_class(kind))) {
            td colspan=(TABLE_COLUMNS - 1) { strong { i { (moved_message(kind)) " - " } } }
            td {
                div class="btn-group" role="group" {
                    (action_button(hash, "undo", "undo-button btn btn-warning", "Undo"))
                }
            }
        }
    }
}

/// An undo row whose window closed, swapped in out of band.
pub fn settled_row(hash: &str, kind: ListKind) -> Markup {
    html! {
        tr id=(row_id(hash))
            class=(format!("undo-row settled {}", kind_class(kind)))
            hx-swap-oob="true"
        {
            td colspan=(TABLE_COLUMNS) { i { (moved_message(kind)) } }
        }
    }
}

/// A host entry whose listing is gone from the current scrape. Removal is the only action.
pub fn orphan_row(hash: &str, record: &ListingRecord, kind: ListKind) -> Markup {
    html! {
        tr id=(row_id(hash)) class="orphan-row" {
            (listing_cells(record))
            td {
                span class="orphan-note" { "No longer listed" }
                button
                    type="button"
                    class="remove-button btn btn-default"
                    hx-post=(format!("{}?list={}", listing_path(hash, "remove-orphan"), kind.as_str()))
                    hx-target="closest tr"
                    hx-swap="outerHTML"
                { "Remove" }
            }
        }
    }
}

pub fn no_data_row() -> Markup {
    html! {
        tr class="no-data-row" {
            td colspan=(TABLE_COLUMNS) { i { "No data to display" } }
        }
    }
}

fn kind_class(kind: ListKind) -> &'static str {
    match kind {
        ListKind::Favorite => "fav-row",
        ListKind::Reject => "rej-row",
    }
}

/// Rows about to be replaced by an out-of-band swap after an action.
pub fn settled_rows_oob(settled: &[(Hash, ListKind)]) -> Markup {
    html! {
        @for (hash, kind) in settled {
            (settled_row(hash, *kind))
        }
    }
}
