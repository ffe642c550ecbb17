use crate::app::App;
use crate::config::{AppConfig, DEFAULT_CONFIG_FILE};
use crate::db::connection::{init_db, Database};
use crate::domain::loader::load_data_files;
use crate::domain::transit::validate_line_table;
use crate::host::SqliteHost;
use crate::router::handle;
use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;

mod app;
mod config;
mod db;
mod domain;
mod errors;
mod host;
mod responses;
mod router;
mod templates;
mod view;

#[cfg(test)]
mod tests;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            log::error!("Could not load {config_path}: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = validate_line_table() {
        log::error!("Transit line table is inconsistent: {e}");
        std::process::exit(1);
    }

    // 1️⃣ Open the host's database
    let db = Database::new(cfg.database_path.clone());
    if let Err(e) = init_db(&db) {
        log::error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 2️⃣ Load listing + characterization data; absence is not fatal
    let loaded = match load_data_files(&cfg.data_file, &cfg.char_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{e}");
            None
        }
    };

    let host = SqliteHost::new(db);
    if let Some(data) = &loaded {
        if let Err(e) = host.publish_filter_choices(&data.listings) {
            log::warn!("Could not publish filter choices: {e}");
        }
    }
    let app = Arc::new(App::mount(host, loaded));

    // 3️⃣ Start the server
    let addr: SocketAddr = match cfg.bind_addr.parse() {
        Ok(addr) => addr,
        Err(e) => {
            log::error!("Invalid bind address '{}': {e}", cfg.bind_addr);
            std::process::exit(1);
        }
    };
    log::info!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(cfg.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => {
            log::warn!("Request failed: {err}");
            responses::html_error_response(err)
        }
    });

    if let Err(e) = result {
        log::error!("Server ended with error: {e}");
    }

    log::info!("Server shut down cleanly.");
}
