//! Record store trait

use crate::core::error::StoreError;
use crate::core::shipment::{NewShipment, ShipmentRecord};
use async_trait::async_trait;

/// Durable, append-only collection of shipment records
///
/// Implementations keep records in submission order and never update or
/// delete them. The store assigns `created_at` at append time.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Append a validated shipment and return the stored record
    ///
    /// When this returns an error the shipment must be considered not saved.
    async fn append(&self, shipment: NewShipment) -> Result<ShipmentRecord, StoreError>;

    /// Read the whole collection in submission order
    async fn load(&self) -> Result<Vec<ShipmentRecord>, StoreError>;
}
