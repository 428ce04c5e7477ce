//! # parcel-intake
//!
//! A shipment intake form: a user submits sender and recipient details and
//! package attributes, the server validates them and appends valid shipments
//! to a JSON record file.
//!
//! ## Features
//!
//! - **Aggregated validation**: every invalid field is reported in one round trip
//! - **Message tables**: validation texts keyed by field and rule (Czech, English)
//! - **Append-only record store**: JSON file or in-memory, behind one trait
//! - **HTML form and JSON API**: both drive the same intake pipeline
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parcel_intake::prelude::*;
//!
//! let store = Arc::new(JsonFileStore::new("parcel_data.json"));
//! let intake = IntakeService::new(store, MessageCatalog::default());
//!
//! let submission = Submission::from_pairs([
//!     ("sender_name", "Jan Novák"),
//!     ("sender_address", "Hlavní 12"),
//!     ("sender_zip", "10000"),
//!     ("recipient_name", "Eva"),
//!     ("recipient_address", "Vedlejší 3"),
//!     ("recipient_zip", "20000"),
//!     ("weight", "2.5"),
//!     ("shipment_type", "balik"),
//! ]);
//!
//! match intake.submit(&submission).await? {
//!     SubmissionOutcome::Accepted(record) => println!("saved at {}", record.created_at),
//!     SubmissionOutcome::Rejected(errors) => println!("invalid: {:?}", errors),
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        error::{ConfigError, ErrorResponse, IntakeError, StoreError},
        intake::{IntakeService, SubmissionOutcome},
        messages::{Locale, MessageCatalog, Rule},
        shipment::{NewShipment, ShipmentRecord, ShipmentType, Submission, fields},
        store::RecordStore,
        validation::{ValidationErrors, check, validate, validate_with},
    };

    // === Storage ===
    pub use crate::storage::{InMemoryRecordStore, JsonFileStore};

    // === Config ===
    pub use crate::config::{AppConfig, ServerConfig, StorageConfig};

    // === Server ===
    pub use crate::server::{ServerBuilder, ServerHost};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
