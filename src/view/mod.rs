pub mod link;
pub mod row;
pub mod state;

pub use row::{BoardRow, RowContext, RowMode};
pub use state::{Action, ActionOutcome, View, ViewState};
