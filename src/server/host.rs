//! Server host for transport-agnostic exposure
//!
//! The host owns the intake pipeline and the page templates. Exposures (the
//! HTML form and the JSON API) borrow what they need from it.

use crate::config::AppConfig;
use crate::core::intake::IntakeService;
use crate::core::messages::MessageCatalog;
use crate::core::store::RecordStore;
use crate::server::exposure::form::Templates;
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all application state
pub struct ServerHost {
    /// Configuration the host was built from
    pub config: Arc<AppConfig>,

    /// Validation-and-append pipeline
    pub intake: Arc<IntakeService>,

    /// Compiled page templates
    pub templates: Arc<Templates>,
}

impl ServerHost {
    /// Build the host around a record store
    pub fn new(config: AppConfig, store: Arc<dyn RecordStore>) -> Result<Self> {
        let catalog = MessageCatalog::new(config.locale);
        let templates = Templates::embedded()?;

        Ok(Self {
            config: Arc::new(config),
            intake: Arc::new(IntakeService::new(store, catalog)),
            templates: Arc::new(templates),
        })
    }
}
