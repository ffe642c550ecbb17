pub mod filter;
pub mod listing;
pub mod loader;
pub mod score;
pub mod sort;
pub mod transit;

pub use filter::{FilterDimension, FilterSelection};
pub use listing::{Hash, ListKind, ListingRecord, ListingSet};
