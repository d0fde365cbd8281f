//! Inventory domain module: an in-memory stock ledger with lot-level FIFO costing.
//!
//! This crate contains business rules for inventory, implemented purely as
//! deterministic domain logic (no IO, no HTTP, no storage).

pub mod error;
pub mod ledger;
pub mod lot;
pub mod shared;

pub use error::{InventoryError, InventoryResult, NegativeStock};
pub use ledger::{InventoryLedger, Issue};
pub use lot::{Consumption, LotDetails, LotRef, QTY_TOLERANCE, StockLot};
pub use shared::SharedLedger;
