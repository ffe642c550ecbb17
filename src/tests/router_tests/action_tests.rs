// src/tests/router_tests/action_tests.rs

use crate::app::App;
use crate::domain::listing::{ListKind, ListingSet};
use crate::domain::loader::LoadedData;
use crate::errors::ServerError;
use crate::host::HostApi;
use crate::router::handle;
use crate::templates::components::listing_row::normal_row;
use crate::tests::utils::{body_string, listing, HostFailure, MemoryHost};
use crate::view::row::RowContext;
use astra::Body;
use http::{Method, Request};
use std::sync::Arc;

fn three_listings() -> ListingSet {
    ["a", "b", "c"]
        .iter()
        .map(|h| (h.to_string(), listing(&format!("{h} Main St"), 1000.0, 0.5, "craigslist")))
        .collect()
}

fn mount(host: Arc<MemoryHost>) -> App {
    App::mount(
        host,
        Some(LoadedData {
            listings: three_listings(),
            missing_characterization: Vec::new(),
        }),
    )
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[test]
fn favorite_shows_undo_row_and_updates_counts() {
    let host = Arc::new(MemoryHost::default());
    let app = mount(host.clone());

    let resp = handle(post("/listings/a/favorite"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);
    let body = body_string(resp);

    assert!(body.contains("Moved to Favorites"));
    assert!(body.contains("/listings/a/undo"));
    assert!(body.contains(r#"id="side-nav""#));
    assert_eq!(host.count(ListKind::Favorite), 1);

    let all = body_string(handle(get("/views/all"), &app).unwrap());
    assert!(!all.contains("a Main St"));
}

#[test]
fn undo_restores_the_normal_row() {
    let host = Arc::new(MemoryHost::default());
    let app = mount(host.clone());

    handle(post("/listings/a/reject"), &app).unwrap();
    assert_eq!(host.count(ListKind::Reject), 1);

    let body = body_string(handle(post("/listings/a/undo"), &app).unwrap());
    let expected = normal_row(
        "a",
        &listing("a Main St", 1000.0, 0.5, "craigslist"),
        RowContext::Browse,
    )
    .into_string();

    assert!(body.starts_with(&expected));
    assert_eq!(host.count(ListKind::Reject), 0);

    // The window has closed.
    let err = handle(post("/listings/a/undo"), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn second_action_settles_the_first_undo_row() {
    let app = mount(Arc::new(MemoryHost::default()));

    handle(post("/listings/a/favorite"), &app).unwrap();
    let body = body_string(handle(post("/listings/b/reject"), &app).unwrap());

    assert!(body.contains("Moved to Rejected"));
    assert!(body.contains(r#"id="row-a""#));
    assert!(body.contains("undo-row settled fav-row"));

    let err = handle(post("/listings/a/undo"), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn refused_action_leaves_everything_in_place() {
    let host = Arc::new(MemoryHost::default());
    let app = mount(host.clone());

    host.fail_next(HostFailure::Falsy);
    let resp = handle(post("/listings/a/favorite"), &app).unwrap();
    assert_eq!(resp.headers().get("HX-Reswap").unwrap(), "none");

    let body = body_string(resp);
    assert!(body.contains("The host declined the change for a."));
    assert!(!body.contains("Moved to Favorites"));
    assert_eq!(host.count(ListKind::Favorite), 0);

    let all = body_string(handle(get("/views/all"), &app).unwrap());
    assert!(all.contains("a Main St"));
}

#[test]
fn failed_host_call_is_refused() {
    let host = Arc::new(MemoryHost::default());
    let app = mount(host.clone());

    handle(post("/listings/c/favorite"), &app).unwrap();
    host.fail_next(HostFailure::Error);

    let resp = handle(get("/views/favorites"), &app).unwrap();
    let body = body_string(resp);
    // Last known list stays on screen alongside the warning.
    assert!(body.contains("c Main St"));
    assert!(body.contains("Could not refresh the favorite list"));

    host.fail_next(HostFailure::Error);
    let resp = handle(post("/listings/c/unfavorite"), &app).unwrap();
    assert_eq!(resp.headers().get("HX-Reswap").unwrap(), "none");
    assert_eq!(host.count(ListKind::Favorite), 1);
}

#[test]
fn unfavorite_returns_the_listing_to_all() {
    let host = Arc::new(MemoryHost::default());
    let app = mount(host.clone());

    handle(post("/listings/b/favorite"), &app).unwrap();
    handle(get("/views/favorites"), &app).unwrap();

    let body = body_string(handle(post("/listings/b/unfavorite"), &app).unwrap());
    assert!(!body.contains("b Main St"));
    // The list is now empty, so the placeholder takes the row's place.
    assert!(body.starts_with(r#"<tr class="no-data-row">"#));
    assert_eq!(host.count(ListKind::Favorite), 0);

    let all = body_string(handle(get("/views/all"), &app).unwrap());
    assert!(all.contains("b Main St"));
}

#[test]
fn orphans_need_an_explicit_list() {
    let mut favs = ListingSet::new();
    favs.insert("gone".into(), listing("9 Old Rd", 1800.0, 0.9, "zillow"));
    let host = Arc::new(MemoryHost::default().with_list(ListKind::Favorite, favs));
    let app = mount(host.clone());

    let favorites = body_string(handle(get("/views/favorites"), &app).unwrap());
    assert!(favorites.contains("9 Old Rd"));
    assert!(favorites.contains("No longer listed"));

    let err = handle(post("/listings/gone/remove-orphan"), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));

    let resp = handle(post("/listings/gone/remove-orphan?list=favorite"), &app).unwrap();
    assert!(!body_string(resp).contains("9 Old Rd"));
    assert_eq!(host.count(ListKind::Favorite), 0);

    let favorites = body_string(handle(get("/views/favorites"), &app).unwrap());
    assert!(!favorites.contains("9 Old Rd"));
}

#[test]
fn unknown_hash_is_not_found() {
    let app = mount(Arc::new(MemoryHost::default()));

    let err = handle(post("/listings/nope/favorite"), &app).unwrap_err();
    assert!(matches!(err, ServerError::NotFound));
}

#[test]
fn list_views_follow_host_side_removals() {
    let host = Arc::new(MemoryHost::default());
    let app = mount(host.clone());

    handle(post("/listings/a/favorite"), &app).unwrap();
    host.remove_from_favorites("a").unwrap();

    let favorites = body_string(handle(get("/views/favorites"), &app).unwrap());
    assert!(!favorites.contains("a Main St"));
    assert!(favorites.contains("No data to display"));

    let all = body_string(handle(get("/views/all"), &app).unwrap());
    assert!(all.contains("a Main St"));
}

#[test]
fn hashes_with_reserved_characters_are_actionable() {
    let host = Arc::new(MemoryHost::default());
    let mut listings = ListingSet::new();
    listings.insert("k+1".into(), listing("7 Plus Ave", 1000.0, 0.5, "craigslist"));
    listings.insert("x/y z".into(), listing("8 Slash Ct", 1100.0, 0.5, "craigslist"));
    let app = App::mount(
        host.clone(),
        Some(LoadedData {
            listings,
            missing_characterization: Vec::new(),
        }),
    );

    let all = body_string(handle(get("/views/all"), &app).unwrap());
    assert!(all.contains(r#"hx-post="/listings/k%2B1/favorite""#));
    assert!(all.contains(r#"hx-post="/listings/x%2Fy%20z/reject""#));

    handle(post("/listings/k%2B1/favorite"), &app).expect("Handler failed");
    handle(post("/listings/x%2Fy%20z/reject"), &app).expect("Handler failed");
    assert_eq!(host.count(ListKind::Favorite), 1);
    assert_eq!(host.count(ListKind::Reject), 1);
}
