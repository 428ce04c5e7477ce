//! Transport exposures built on top of a [`ServerHost`](super::host::ServerHost)

pub mod form;
pub mod rest;

pub use form::{FormExposure, FormState};
pub use rest::RestExposure;
