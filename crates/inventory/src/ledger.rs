use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap, VecDeque};

use chrono::Utc;

use lotledger_core::{ItemId, LotId, WarehouseId};

use crate::error::{InventoryError, InventoryResult, NegativeStock};
use crate::lot::{Consumption, LotDetails, QTY_TOLERANCE, StockLot};

/// Outcome of an issue: the FIFO cost of the goods and the draws that made it up.
#[derive(Debug, Clone, PartialEq)]
pub struct Issue {
    pub total_cost: f64,
    /// Draws in FIFO order (oldest lot first).
    pub consumptions: Vec<Consumption>,
}

impl Issue {
    /// Total quantity drawn across all lots.
    pub fn qty(&self) -> f64 {
        self.consumptions.iter().map(|c| c.qty).sum()
    }

    pub fn into_parts(self) -> (f64, Vec<Consumption>) {
        (self.total_cost, self.consumptions)
    }
}

/// In-memory inventory ledger with lot-level FIFO valuation.
///
/// Lots are kept per (item, warehouse) in receipt order. Issues always draw
/// from the oldest lot first, and no operation can take a bucket below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryLedger {
    lots: HashMap<ItemId, BTreeMap<WarehouseId, VecDeque<StockLot>>>,
    next_lot_id: LotId,
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

fn ensure_positive_qty(qty: f64) -> InventoryResult<()> {
    if !qty.is_finite() || qty <= 0.0 {
        return Err(InventoryError::invalid_argument(format!(
            "quantity must be positive, got {qty}"
        )));
    }
    Ok(())
}

impl InventoryLedger {
    pub fn new() -> Self {
        Self {
            lots: HashMap::new(),
            next_lot_id: LotId::FIRST,
        }
    }

    /// Identity the next receipt will be assigned.
    pub fn next_lot_id(&self) -> LotId {
        self.next_lot_id
    }

    fn allocate_lot_id(&mut self) -> LotId {
        let id = self.next_lot_id;
        self.next_lot_id = id.next();
        id
    }

    /// Register receipt of stock and return a snapshot of the new lot.
    ///
    /// The lot goes to the back of the (item, warehouse) FIFO queue.
    #[tracing::instrument(level = "debug", skip(self, details))]
    pub fn receive(
        &mut self,
        item: ItemId,
        warehouse: WarehouseId,
        qty: f64,
        cost_per_unit: f64,
        details: LotDetails,
    ) -> InventoryResult<StockLot> {
        ensure_positive_qty(qty)?;
        if !cost_per_unit.is_finite() {
            return Err(InventoryError::invalid_argument(format!(
                "cost per unit must be a finite number, got {cost_per_unit}"
            )));
        }

        let id = self.allocate_lot_id();
        let lot = StockLot::new(id, item, warehouse, qty, cost_per_unit, Utc::now(), details);

        self.lots
            .entry(item)
            .or_default()
            .entry(warehouse)
            .or_default()
            .push_back(lot.clone());

        tracing::debug!(lot_id = %id, %item, %warehouse, qty, cost_per_unit, "lot received");
        Ok(lot)
    }

    /// Draw `qty` from the (item, warehouse) bucket, oldest lot first.
    ///
    /// All-or-nothing: availability is checked before any lot is touched.
    pub(crate) fn consume(
        &mut self,
        item: ItemId,
        warehouse: WarehouseId,
        qty: f64,
    ) -> InventoryResult<Vec<Consumption>> {
        ensure_positive_qty(qty)?;

        let available = self.stock_on_hand(item, Some(warehouse));
        if qty > available + QTY_TOLERANCE {
            tracing::warn!(%item, %warehouse, requested = qty, available, "negative stock rejected");
            return Err(NegativeStock {
                item,
                warehouse,
                requested: qty,
                available,
            }
            .into());
        }

        let mut consumed = Vec::new();
        let Some(lots) = self
            .lots
            .get_mut(&item)
            .and_then(|by_wh| by_wh.get_mut(&warehouse))
        else {
            // Nothing on hand and the request is within tolerance of zero.
            return Ok(consumed);
        };

        let mut remaining = qty;
        while remaining > QTY_TOLERANCE {
            let Some(lot) = lots.front_mut() else {
                break;
            };
            let take = lot.draw(remaining);
            remaining -= take;
            consumed.push(Consumption {
                lot: lot.snapshot(),
                qty: take,
            });
            if lot.is_exhausted() {
                lots.pop_front();
            }
        }

        self.prune(item, warehouse);
        Ok(consumed)
    }

    /// Drop empty buckets so queries never see phantom state.
    fn prune(&mut self, item: ItemId, warehouse: WarehouseId) {
        if let Entry::Occupied(mut by_item) = self.lots.entry(item) {
            if by_item.get().get(&warehouse).is_some_and(VecDeque::is_empty) {
                by_item.get_mut().remove(&warehouse);
            }
            if by_item.get().is_empty() {
                by_item.remove();
            }
        }
    }

    /// Issue stock from a warehouse at FIFO cost.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn issue(
        &mut self,
        item: ItemId,
        warehouse: WarehouseId,
        qty: f64,
    ) -> InventoryResult<Issue> {
        ensure_positive_qty(qty)?;
        let consumptions = self.consume(item, warehouse, qty)?;
        let total_cost = consumptions.iter().map(Consumption::cost).sum();

        tracing::debug!(
            %item,
            %warehouse,
            qty,
            total_cost,
            lots_drawn = consumptions.len(),
            "stock issued"
        );
        Ok(Issue {
            total_cost,
            consumptions,
        })
    }

    /// Move stock between warehouses, keeping each drawn lot's cost, lot number
    /// and expiry. Returns the FIFO cost of the transferred goods.
    ///
    /// Destination lots get fresh identities and are queued in the order they
    /// were drawn at the source. Transferring into the source warehouse itself
    /// re-queues the drawn quantity at the back under new identities.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn transfer(
        &mut self,
        item: ItemId,
        from: WarehouseId,
        to: WarehouseId,
        qty: f64,
    ) -> InventoryResult<f64> {
        let issue = self.issue(item, from, qty)?;
        for c in &issue.consumptions {
            self.receive(item, to, c.qty, c.lot.cost_per_unit, c.lot.details())?;
        }

        tracing::debug!(%item, %from, %to, qty, total_cost = issue.total_cost, "stock transferred");
        Ok(issue.total_cost)
    }

    /// Active lots of one (item, warehouse) bucket in FIFO order.
    pub fn lots(&self, item: ItemId, warehouse: WarehouseId) -> impl Iterator<Item = &StockLot> {
        self.lots
            .get(&item)
            .and_then(|by_wh| by_wh.get(&warehouse))
            .into_iter()
            .flatten()
    }

    /// Warehouses currently holding stock of `item`, in ascending order.
    pub fn warehouses(&self, item: ItemId) -> Vec<WarehouseId> {
        self.lots
            .get(&item)
            .map(|by_wh| by_wh.keys().copied().collect())
            .unwrap_or_default()
    }

    fn scoped_lots(
        &self,
        item: ItemId,
        warehouse: Option<WarehouseId>,
    ) -> impl Iterator<Item = &StockLot> {
        self.lots
            .get(&item)
            .into_iter()
            .flat_map(move |by_wh| {
                by_wh
                    .iter()
                    .filter(move |(wh, _)| warehouse.is_none_or(|w| w == **wh))
                    .flat_map(|(_, lots)| lots.iter())
            })
    }

    /// Quantity on hand for an item, in one warehouse or across all of them.
    pub fn stock_on_hand(&self, item: ItemId, warehouse: Option<WarehouseId>) -> f64 {
        self.scoped_lots(item, warehouse).map(StockLot::qty).sum()
    }

    /// FIFO book value of the stock on hand, scoped like [`Self::stock_on_hand`].
    pub fn stock_value(&self, item: ItemId, warehouse: Option<WarehouseId>) -> f64 {
        self.scoped_lots(item, warehouse).map(StockLot::value).sum()
    }
}
