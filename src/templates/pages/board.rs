use crate::domain::filter::FilterSelection;
use crate::domain::sort::{Column, SortDirection, SortState};
use crate::host::HostCounts;
use crate::templates::components::{
    alert_box, filter_form, listing_row, no_data_row, side_nav, FilterChoices, NavVm,
};
use crate::templates::desktop_layout;
use crate::view::row::BoardRow;
use crate::view::state::View;
use maud::{html, Markup};
use std::collections::BTreeSet;

pub struct BoardVm {
    pub view: View,
    pub rows: Vec<BoardRow>,
    pub sort: SortState,
    pub sources: BTreeSet<String>,
    pub counts: Option<HostCounts>,
    pub filter_choices: Vec<FilterChoices>,
    pub filters: FilterSelection,
    pub alerts: Vec<String>,
}

impl BoardVm {
    fn nav(&self) -> NavVm<'_> {
        NavVm {
            current: &self.view,
            sources: &self.sources,
            counts: self.counts,
        }
    }
}

pub fn board_page(vm: &BoardVm) -> Markup {
    desktop_layout(
        "Listing Board",
        html! {
            main class="container" {
                (alert_box(&vm.alerts, false))
                div class="board-layout" {
                    (side_nav(&vm.nav(), false))
                    section class="board-main" {
                        (filter_form(&vm.filter_choices, &vm.filters))
                        (board_table(vm))
                    }
                }
            }
        },
    )
}

/// Response to a view switch, sort or filter change: the table plus
/// out-of-band updates for the navigation and the alert box.
pub fn board_fragment(vm: &BoardVm) -> Markup {
    html! {
        (board_table(vm))
        (side_nav(&vm.nav(), true))
        (alert_box(&vm.alerts, true))
    }
}

fn sortable_th(column: Column, sort: SortState) -> Markup {
    let arrow = match (sort.column == Some(column), sort.direction()) {
        (false, _) => None,
        (true, SortDirection::Ascending) => Some(" ▲"),
        (true, SortDirection::Descending) => Some(" ▼"),
    };

    html! {
        th class="sortable-col" {
            a
                href="#"
                hx-post=(format!("/tables/sort/{}", column.slug()))
                hx-target="#board"
                hx-swap="outerHTML"
            {
                (column.title())
                @if let Some(arrow) = arrow { (arrow) }
            }
        }
    }
}

pub fn board_table(vm: &BoardVm) -> Markup {
    let ctx = vm.view.context();

    html! {
        div id="board" {
            h2 { (vm.view.title()) }
            table id="address-table" class="table table-striped" {
                thead {
                    tr {
                        (sortable_th(Column::Address, vm.sort))
                        (sortable_th(Column::Rent, vm.sort))
                        (sortable_th(Column::Beds, vm.sort))
                        (sortable_th(Column::Baths, vm.sort))
                        th { "Transit" }
                        (sortable_th(Column::Score, vm.sort))
                        (sortable_th(Column::Source, vm.sort))
                        th { "Link" }
                        th { "Actions" }
                    }
                }
                tbody id="address-table-body" {
                    @if vm.rows.is_empty() {
                        (no_data_row())
                    } @else {
                        @for row in &vm.rows {
                            (listing_row(row, ctx))
                        }
                    }
                }
            }
        }
    }
}
