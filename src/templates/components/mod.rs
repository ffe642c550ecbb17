pub mod alert;
pub mod filters;
pub mod listing_row;
pub mod nav;

pub use alert::alert_box;
pub use filters::{filter_form, FilterChoices};
pub use listing_row::{listing_row, no_data_row, settled_rows_oob};
pub use nav::{side_nav, NavVm};
