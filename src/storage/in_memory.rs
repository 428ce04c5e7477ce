//! In-memory implementation of RecordStore for testing and development

use crate::core::error::StoreError;
use crate::core::shipment::{NewShipment, ShipmentRecord};
use crate::core::store::RecordStore;
use async_trait::async_trait;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory record store
///
/// Useful for tests and for running the form without touching the disk.
/// Records are lost when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<Vec<ShipmentRecord>>>,
}

impl InMemoryRecordStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records
    pub fn with_records(records: Vec<ShipmentRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn append(&self, shipment: NewShipment) -> Result<ShipmentRecord, StoreError> {
        let record = shipment.into_record(Local::now().naive_local());
        self.records.write().await.push(record.clone());
        Ok(record)
    }

    async fn load(&self) -> Result<Vec<ShipmentRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }
}
