//! Stock lots and the records produced when drawing from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use lotledger_core::{Entity, ItemId, LotId, ValueObject, WarehouseId};

/// Absolute tolerance for "is this quantity available" and "is this lot
/// exhausted" comparisons. Absorbs rounding from repeated subtraction.
pub const QTY_TOLERANCE: f64 = 1e-9;

/// Optional attributes attached to a lot at receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotDetails {
    pub lot_no: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl LotDetails {
    pub fn with_lot_no(mut self, lot_no: impl Into<String>) -> Self {
        self.lot_no = Some(lot_no.into());
        self
    }

    pub fn with_expiry(mut self, expiry_date: DateTime<Utc>) -> Self {
        self.expiry_date = Some(expiry_date);
        self
    }
}

/// A quantity of an item received at one point in time at one unit cost.
///
/// Only the ledger mutates a lot, and only by reducing `qty` during FIFO
/// consumption. Everything else is fixed at receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLot {
    id: LotId,
    item_id: ItemId,
    warehouse_id: WarehouseId,
    qty: f64,
    cost_per_unit: f64,
    received_at: DateTime<Utc>,
    lot_no: Option<String>,
    expiry_date: Option<DateTime<Utc>>,
}

impl StockLot {
    pub(crate) fn new(
        id: LotId,
        item_id: ItemId,
        warehouse_id: WarehouseId,
        qty: f64,
        cost_per_unit: f64,
        received_at: DateTime<Utc>,
        details: LotDetails,
    ) -> Self {
        Self {
            id,
            item_id,
            warehouse_id,
            qty,
            cost_per_unit,
            received_at,
            lot_no: details.lot_no,
            expiry_date: details.expiry_date,
        }
    }

    pub fn id_typed(&self) -> LotId {
        self.id
    }

    pub fn item_id(&self) -> ItemId {
        self.item_id
    }

    pub fn warehouse_id(&self) -> WarehouseId {
        self.warehouse_id
    }

    /// Remaining quantity.
    pub fn qty(&self) -> f64 {
        self.qty
    }

    pub fn cost_per_unit(&self) -> f64 {
        self.cost_per_unit
    }

    pub fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    pub fn lot_no(&self) -> Option<&str> {
        self.lot_no.as_deref()
    }

    pub fn expiry_date(&self) -> Option<DateTime<Utc>> {
        self.expiry_date
    }

    /// FIFO book value of what remains in this lot.
    pub fn value(&self) -> f64 {
        self.qty * self.cost_per_unit
    }

    pub(crate) fn is_exhausted(&self) -> bool {
        self.qty <= QTY_TOLERANCE
    }

    /// Draw up to `wanted` from this lot and return the amount actually taken.
    pub(crate) fn draw(&mut self, wanted: f64) -> f64 {
        let take = wanted.min(self.qty);
        self.qty -= take;
        take
    }

    pub(crate) fn snapshot(&self) -> LotRef {
        LotRef {
            id: self.id,
            cost_per_unit: self.cost_per_unit,
            received_at: self.received_at,
            lot_no: self.lot_no.clone(),
            expiry_date: self.expiry_date,
        }
    }
}

impl Entity for StockLot {
    type Id = LotId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Read-only snapshot of the lot a consumption drew from.
///
/// Carries the fields that never change after receipt, so it stays accurate
/// even after the lot itself has been exhausted and dropped from the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LotRef {
    pub id: LotId,
    pub cost_per_unit: f64,
    pub received_at: DateTime<Utc>,
    pub lot_no: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl LotRef {
    /// Attributes to carry over when re-receiving this lot elsewhere.
    pub fn details(&self) -> LotDetails {
        LotDetails {
            lot_no: self.lot_no.clone(),
            expiry_date: self.expiry_date,
        }
    }
}

/// How much of one lot a single issue or transfer drew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Consumption {
    pub lot: LotRef,
    pub qty: f64,
}

impl Consumption {
    pub fn cost(&self) -> f64 {
        self.qty * self.lot.cost_per_unit
    }
}

impl ValueObject for Consumption {}
