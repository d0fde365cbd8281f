//! Thread-safe handle over an [`InventoryLedger`].
//!
//! A single ledger-wide lock serialises every mutation. A transfer holds the
//! write lock across both its issue and its receipts, so no reader or writer can
//! observe the source debited without the destination credited.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use lotledger_core::{ItemId, WarehouseId};

use crate::error::{InventoryError, InventoryResult};
use crate::ledger::{InventoryLedger, Issue};
use crate::lot::{LotDetails, StockLot};

/// Cloneable, shareable ledger. Clones point at the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<InventoryLedger>>,
}

impl From<InventoryLedger> for SharedLedger {
    fn from(ledger: InventoryLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> InventoryResult<RwLockReadGuard<'_, InventoryLedger>> {
        self.inner
            .read()
            .map_err(|e| InventoryError::unavailable(e.to_string()))
    }

    fn write(&self) -> InventoryResult<RwLockWriteGuard<'_, InventoryLedger>> {
        self.inner
            .write()
            .map_err(|e| InventoryError::unavailable(e.to_string()))
    }

    pub fn receive(
        &self,
        item: ItemId,
        warehouse: WarehouseId,
        qty: f64,
        cost_per_unit: f64,
        details: LotDetails,
    ) -> InventoryResult<StockLot> {
        self.write()?
            .receive(item, warehouse, qty, cost_per_unit, details)
    }

    pub fn issue(&self, item: ItemId, warehouse: WarehouseId, qty: f64) -> InventoryResult<Issue> {
        self.write()?.issue(item, warehouse, qty)
    }

    pub fn transfer(
        &self,
        item: ItemId,
        from: WarehouseId,
        to: WarehouseId,
        qty: f64,
    ) -> InventoryResult<f64> {
        self.write()?.transfer(item, from, to, qty)
    }

    pub fn stock_on_hand(
        &self,
        item: ItemId,
        warehouse: Option<WarehouseId>,
    ) -> InventoryResult<f64> {
        Ok(self.read()?.stock_on_hand(item, warehouse))
    }

    pub fn stock_value(&self, item: ItemId, warehouse: Option<WarehouseId>) -> InventoryResult<f64> {
        Ok(self.read()?.stock_value(item, warehouse))
    }

    /// Copy of the current ledger state, taken under the read lock.
    pub fn snapshot(&self) -> InventoryResult<InventoryLedger> {
        Ok(self.read()?.clone())
    }
}
