pub mod errors;
pub mod html;
pub mod json;

pub use errors::html_error_response;

// Normal HTML response
pub use html::{asset_response, html_response};
pub use json::json_response;
