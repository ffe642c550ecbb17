pub mod connection;
pub mod filters;
pub mod lists;

pub use connection::{init_db, Database};
