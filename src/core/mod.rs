//! Core module containing the shipment model, validation and the store seam

pub mod error;
pub mod intake;
pub mod messages;
pub mod shipment;
pub mod store;
pub mod validation;

pub use error::{ConfigError, IntakeError, StoreError};
pub use intake::{IntakeService, SubmissionOutcome};
pub use messages::{Locale, MessageCatalog, Rule};
pub use shipment::{NewShipment, ShipmentRecord, ShipmentType, Submission};
pub use store::RecordStore;
pub use validation::{ValidationErrors, validate, validate_with};
