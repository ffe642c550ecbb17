pub mod board;
pub mod error;

pub use board::{board_fragment, board_page, BoardVm};
pub use error::error_page;
