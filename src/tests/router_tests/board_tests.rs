// src/tests/router_tests/board_tests.rs

use crate::app::{App, NO_DATA_MESSAGE};
use crate::domain::filter::FilterDimension;
use crate::domain::listing::{ListKind, ListingSet};
use crate::domain::loader::LoadedData;
use crate::errors::ServerError;
use crate::router::handle;
use crate::tests::utils::{body_string, listing, MemoryHost};
use astra::Body;
use http::{Method, Request};
use std::sync::Arc;

fn boston_set() -> ListingSet {
    let mut listings = ListingSet::new();

    let mut a = listing("1 Elm St", 1500.0, 0.7, "craigslist");
    a.housing_data.city = Some("Boston".into());
    listings.insert("a".into(), a);

    let mut b = listing("2 Oak St", 900.0, 0.4, "apartments");
    b.housing_data.city = Some("Somerville".into());
    listings.insert("b".into(), b);

    let mut c = listing("3 Ash St", 1200.0, 0.1, "craigslist");
    c.housing_data.city = Some("Boston".into());
    listings.insert("c".into(), c);

    listings
}

fn make_app(host: Arc<MemoryHost>) -> App {
    App::mount(
        host,
        Some(LoadedData {
            listings: boston_set(),
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

fn post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(Body::from(body.as_bytes().to_vec()))
        .unwrap()
}

/// Addresses in the order they appear in the markup.
fn address_order(body: &str, addresses: &[&str]) -> Vec<String> {
    let mut found: Vec<(usize, String)> = addresses
        .iter()
        .filter_map(|a| body.find(a).map(|pos| (pos, a.to_string())))
        .collect();
    found.sort();
    found.into_iter().map(|(_, a)| a).collect()
}

#[test]
fn index_lists_every_active_listing() {
    let host = Arc::new(
        MemoryHost::default().with_choices(FilterDimension::City, &["Boston", "Somerville"]),
    );
    let app = make_app(host);

    let resp = handle(get("/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("1 Elm St"));
    assert!(body.contains("2 Oak St"));
    assert!(body.contains("3 Ash St"));
    assert!(body.contains(r#"name="city" value="Somerville""#));
    assert!(body.contains(r#"id="master-error-alert""#));
    assert!(!body.contains(NO_DATA_MESSAGE));
}

#[test]
fn favorites_from_host_leave_the_all_view() {
    let mut favs = ListingSet::new();
    favs.insert("b".into(), listing("2 Oak St", 900.0, 0.4, "apartments"));
    let host = Arc::new(MemoryHost::default().with_list(ListKind::Favorite, favs));
    let app = make_app(host);

    let all = body_string(handle(get("/views/all"), &app).unwrap());
    assert!(!all.contains("2 Oak St"));
    assert!(all.contains(r#"hx-swap-oob="true""#));

    let favorites = body_string(handle(get("/views/favorites"), &app).unwrap());
    assert!(favorites.contains("2 Oak St"));
    assert!(favorites.contains("/listings/b/unfavorite"));
    assert!(!favorites.contains("1 Elm St"));
}

#[test]
fn source_view_shows_one_source() {
    let app = make_app(Arc::new(MemoryHost::default()));

    let body = body_string(handle(get("/views/source/craigslist"), &app).unwrap());
    assert!(body.contains("1 Elm St"));
    assert!(body.contains("3 Ash St"));
    assert!(!body.contains("2 Oak St"));
}

#[test]
fn sorting_toggles_direction() {
    let app = make_app(Arc::new(MemoryHost::default()));
    let addresses = ["1 Elm St", "2 Oak St", "3 Ash St"];

    // First click sorts descending.
    let body = body_string(handle(post("/tables/sort/rent", ""), &app).unwrap());
    assert_eq!(address_order(&body, &addresses), vec!["1 Elm St", "3 Ash St", "2 Oak St"]);

    let body = body_string(handle(post("/tables/sort/rent", ""), &app).unwrap());
    assert_eq!(address_order(&body, &addresses), vec!["2 Oak St", "3 Ash St", "1 Elm St"]);

    let err = handle(post("/tables/sort/colour", ""), &app).unwrap_err();
    assert!(matches!(err, ServerError::BadRequest(_)));
}

#[test]
fn filters_use_the_submitted_form() {
    let app = make_app(Arc::new(MemoryHost::default()));

    let body = body_string(handle(post("/filters", "city=Somerville"), &app).unwrap());
    assert!(body.contains("2 Oak St"));
    assert!(!body.contains("1 Elm St"));

    // Clearing every box shows everything again.
    let body = body_string(handle(post("/filters", ""), &app).unwrap());
    assert!(body.contains("1 Elm St"));
    assert!(body.contains("2 Oak St"));
}

#[test]
fn missing_data_renders_placeholder() {
    let app = App::mount(Arc::new(MemoryHost::default()), None);

    let body = body_string(handle(get("/"), &app).unwrap());
    assert!(body.contains(NO_DATA_MESSAGE));
    assert!(body.contains("No data to display"));
}

#[test]
fn api_endpoints_return_json() {
    let app = make_app(Arc::new(MemoryHost::default()));

    let ready = handle(get("/api/ready"), &app).unwrap();
    assert_eq!(
        ready.headers().get("Content-Type").unwrap(),
        "application/json"
    );
    assert!(body_string(ready).contains("memory host ready"));

    let counts = body_string(handle(get("/api/counts"), &app).unwrap());
    assert_eq!(counts, r#"{"favorites":0,"rejections":0}"#);
}

#[test]
fn unknown_routes_are_not_found() {
    let app = make_app(Arc::new(MemoryHost::default()));

    assert!(matches!(handle(get("/nope"), &app), Err(ServerError::NotFound)));
    assert!(matches!(
        handle(post("/listings/a/teleport", ""), &app),
        Err(ServerError::NotFound)
    ));
}
