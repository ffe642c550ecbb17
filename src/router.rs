use crate::app::App;
use crate::domain::filter::FilterSelection;
use crate::domain::listing::ListKind;
use crate::domain::sort::Column;
use crate::errors::{ResultResp, ServerError};
use crate::host::HostCounts;
use crate::responses::{asset_response, html_response, json_response};
use crate::templates::components::{
    alert_box, listing_row, no_data_row, settled_rows_oob, side_nav, NavVm,
};
use crate::templates::pages::{board_fragment, board_page};
use crate::view::link::decode_segment;
use crate::view::row::BoardRow;
use crate::view::state::{Action, ActionOutcome, View};
use astra::{Body, Request, ResponseBuilder};
use maud::html;
use std::collections::HashMap;
use std::io::Read;
use url::form_urlencoded;

const MAIN_CSS: &str = include_str!("../static/main.css");

pub fn handle(mut req: Request, app: &App) -> ResultResp {
    let method = req.method().as_str().to_string();
    let path = req.uri().path().to_string();
    let query = parse_query(&req);

    let segments: Vec<String> = path
        .trim_matches('/')
        .split('/')
        .filter(|s| !s.is_empty())
        .map(decode_segment)
        .collect();
    let segments: Vec<&str> = segments.iter().map(String::as_str).collect();

    log::debug!("{method} {path}");

    match (method.as_str(), segments.as_slice()) {
        ("GET", []) => board(app, Some(View::All), true),
        ("GET", ["static", "main.css"]) => asset_response(MAIN_CSS, "text/css; charset=utf-8"),

        ("GET", ["api", "ready"]) => json_response(&app.host().ready()?),
        ("GET", ["api", "counts"]) => {
            let counts = HostCounts::fetch(app.host())?;
            app.with_state(|state, _| Ok(state.check_totals(counts)))?;
            json_response(&counts)
        }

        ("GET", ["views", "all"]) => board(app, Some(View::All), false),
        ("GET", ["views", "favorites"]) => board(app, Some(View::Favorites), false),
        ("GET", ["views", "rejections"]) => board(app, Some(View::Rejections), false),
        ("GET", ["views", "source", name]) => board(app, Some(View::Source(name.to_string())), false),

        ("POST", ["tables", "sort", column]) => {
            let column = Column::parse(column)
                .ok_or_else(|| ServerError::BadRequest(format!("unknown column '{column}'")))?;
            app.with_state(|state, _| {
                state.sort_current(column);
                Ok(())
            })?;
            board(app, None, false)
        }

        ("POST", ["filters"]) => {
            let form = read_body(&mut req)?;
            let pairs: Vec<(String, String)> =
                form_urlencoded::parse(form.as_bytes()).into_owned().collect();
            let selection =
                FilterSelection::from_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));
            app.with_state(|state, _| {
                state.set_filters(selection);
                Ok(())
            })?;
            board(app, None, false)
        }

        ("POST", ["listings", hash, op]) => listing_action(app, hash, op, &query),

        _ => Err(ServerError::NotFound),
    }
}

/// Render the current table, switching to `view` first when given.
fn board(app: &App, view: Option<View>, full_page: bool) -> ResultResp {
    let vm = app.with_state(|state, host| {
        let mut warnings = Vec::new();
        if let Some(view) = view {
            warnings.extend(state.show(host, view));
        }
        Ok(app.board_vm(state, warnings))
    })?;

    if full_page {
        html_response(board_page(&vm))
    } else {
        html_response(board_fragment(&vm))
    }
}

fn listing_action(app: &App, hash: &str, op: &str, query: &HashMap<String, String>) -> ResultResp {
    let (outcome, view, table_empty, sources, counts) = app.with_state(|state, host| {
        let outcome = match op {
            "undo" => state.undo(host, hash)?,
            "remove-orphan" => {
                let kind = query
                    .get("list")
                    .and_then(|k| ListKind::parse(k))
                    .ok_or_else(|| ServerError::BadRequest("missing or invalid list".into()))?;
                state.retire_orphan(host, kind, hash)?
            }
            other => {
                let action = Action::parse(other).ok_or(ServerError::NotFound)?;
                state.apply_action(host, hash, action)?
            }
        };
        let view = state.current_view();
        let table_empty = state.rows(&view).is_empty();
        Ok((outcome, view, table_empty, state.sources(), app.counts(state)))
    })?;

    let (hash, record, mode, settled) = match outcome {
        ActionOutcome::Applied { hash, record, mode, settled } => (hash, record, mode, settled),
        ActionOutcome::Refused(reason) => return refused_response(&reason),
    };

    // A row that leaves the table is replaced by nothing, or by the
    // placeholder when it was the last one.
    let row = match mode {
        Some(mode) => listing_row(&BoardRow { hash, record, mode }, view.context()),
        None if table_empty => no_data_row(),
        None => html! {},
    };
    let nav = NavVm {
        current: &view,
        sources: &sources,
        counts,
    };

    html_response(html! {
        (row)
        (settled_rows_oob(&settled))
        (side_nav(&nav, true))
        (alert_box(&[], true))
    })
}

/// Leave the row as it is and surface the reason in the alert box.
fn refused_response(reason: &str) -> ResultResp {
    let body = alert_box(&[reason.to_string()], true).into_string();

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .header("HX-Reswap", "none")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}

fn read_body(req: &mut Request) -> Result<String, ServerError> {
    let mut body = String::new();
    req.body_mut()
        .reader()
        .read_to_string(&mut body)
        .map_err(|e| ServerError::BadRequest(format!("Unreadable body: {e}")))?;
    Ok(body)
}

fn parse_query(req: &Request) -> HashMap<String, String> {
    req.uri()
        .query()
        .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
        .unwrap_or_default()
}
