// =============================================================================
// Market Data Module
// =============================================================================
//
// The desk's data-source side: a synthetic random-walk feed standing in for a
// live venue, and the thread-safe per-symbol bar store the service layer owns.

pub mod bar_store;
pub mod synthetic;

pub use bar_store::BarStore;
pub use synthetic::{base_price, SyntheticFeed};
