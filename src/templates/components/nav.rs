use crate::host::HostCounts;
use crate::view::state::View;
use maud::{html, Markup};
use std::collections::BTreeSet;

pub struct NavVm<'a> {
    pub current: &'a View,
    pub sources: &'a BTreeSet<String>,
    pub counts: Option<HostCounts>,
}

fn nav_link(target: &View, current: &View, label: Markup) -> Markup {
    html! {
        li class=[(target == current).then_some("active")] {
            a
                href="#"
                hx-get=(target.path())
                hx-target="#board"
                hx-swap="outerHTML"
            { (label) }
        }
    }
}

/// Side navigation. Exactly one entry carries `active`.
pub fn side_nav(vm: &NavVm, oob: bool) -> Markup {
    let favorites = vm.counts.map(|c| c.favorites);
    let rejections = vm.counts.map(|c| c.rejections);

    html! {
        nav id="side-nav" class="side-nav" hx-swap-oob=[oob.then_some("true")] {
            ul {
                (nav_link(&View::All, vm.current, html! { "All" }))
                (nav_link(&View::Favorites, vm.current, html! {
                    "Favorites"
                    @if let Some(n) = favorites { " " span class="badge" { (n) } }
                }))
                (nav_link(&View::Rejections, vm.current, html! {
                    "Rejections"
                    @if let Some(n) = rejections { " " span class="badge" { (n) } }
                }))
            }
            @if !vm.sources.is_empty() {
                h4 { "Sources" }
                ul {
                    @for source in vm.sources {
                        (nav_link(&View::Source(source.clone()), vm.current, html! { (source) }))
                    }
                }
            }
        }
    }
}
