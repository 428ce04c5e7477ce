//! Submission validation
//!
//! Every field rule is evaluated independently and all failures are collected,
//! so the form can highlight each invalid field in a single round trip.
//! Validation never fails: any input resolves to a (possibly empty) error map.

pub mod extractor;
pub mod validators;

pub use extractor::JsonSubmission;

use crate::core::messages::{MessageCatalog, Rule};
use crate::core::shipment::{NewShipment, ShipmentType, Submission, fields};
use indexmap::IndexMap;
use serde::Serialize;

/// Minimum trimmed length of a person's name
pub const NAME_MIN_LENGTH: usize = 2;
/// Minimum trimmed length of an address
pub const ADDRESS_MIN_LENGTH: usize = 5;
/// Maximum length of the free-text note
pub const NOTE_MAX_LENGTH: usize = 200;

/// Field name → message map, in the order fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains_key(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Collects failures while extracting typed values from a submission
struct FieldChecker<'a> {
    submission: &'a Submission,
    catalog: &'a MessageCatalog,
    errors: ValidationErrors,
}

impl<'a> FieldChecker<'a> {
    fn new(submission: &'a Submission, catalog: &'a MessageCatalog) -> Self {
        Self {
            submission,
            catalog,
            errors: ValidationErrors::new(),
        }
    }

    fn fail(&mut self, field: &str, rule: Rule) {
        self.errors.insert(field, self.catalog.message(field, rule));
    }

    fn min_length(&mut self, field: &str, min: usize) -> String {
        let value = self.submission.value(field).to_string();
        if !validators::min_trimmed_length(&value, min) {
            self.fail(field, Rule::MinLength);
        }
        value
    }

    fn zip(&mut self, field: &str) -> String {
        let value = self.submission.value(field).to_string();
        if !validators::zip_code(&value) {
            self.fail(field, Rule::Zip);
        }
        value
    }

    fn weight(&mut self) -> Option<f64> {
        let weight = validators::positive_number(self.submission.value(fields::WEIGHT));
        if weight.is_none() {
            self.fail(fields::WEIGHT, Rule::PositiveNumber);
        }
        weight
    }

    fn shipment_type(&mut self) -> Option<ShipmentType> {
        let shipment_type = self
            .submission
            .get(fields::SHIPMENT_TYPE)
            .and_then(ShipmentType::from_token);
        if shipment_type.is_none() {
            self.fail(fields::SHIPMENT_TYPE, Rule::ShipmentType);
        }
        shipment_type
    }

    fn note(&mut self) -> String {
        let value = self.submission.value(fields::NOTE).to_string();
        if !validators::max_length(&value, NOTE_MAX_LENGTH) {
            self.fail(fields::NOTE, Rule::MaxLength);
        }
        value
    }
}

/// Validate a submission and build the shipment it describes
///
/// Text fields are kept exactly as submitted; trimming only applies when
/// measuring names and addresses.
pub fn check(
    submission: &Submission,
    catalog: &MessageCatalog,
) -> Result<NewShipment, ValidationErrors> {
    let mut checker = FieldChecker::new(submission, catalog);

    let sender_name = checker.min_length(fields::SENDER_NAME, NAME_MIN_LENGTH);
    let sender_address = checker.min_length(fields::SENDER_ADDRESS, ADDRESS_MIN_LENGTH);
    let sender_zip = checker.zip(fields::SENDER_ZIP);
    let recipient_name = checker.min_length(fields::RECIPIENT_NAME, NAME_MIN_LENGTH);
    let recipient_address = checker.min_length(fields::RECIPIENT_ADDRESS, ADDRESS_MIN_LENGTH);
    let recipient_zip = checker.zip(fields::RECIPIENT_ZIP);
    let weight = checker.weight();
    let shipment_type = checker.shipment_type();
    let note = checker.note();

    match (weight, shipment_type) {
        (Some(weight), Some(shipment_type)) if checker.errors.is_empty() => Ok(NewShipment {
            sender_name,
            sender_address,
            sender_zip,
            recipient_name,
            recipient_address,
            recipient_zip,
            weight,
            shipment_type,
            insurance: submission.contains(fields::INSURANCE),
            note,
        }),
        _ => Err(checker.errors),
    }
}

/// Validate a submission; an empty map means it is valid
pub fn validate_with(submission: &Submission, catalog: &MessageCatalog) -> ValidationErrors {
    check(submission, catalog).err().unwrap_or_default()
}

/// Validate a submission using the default (Czech) messages
pub fn validate(submission: &Submission) -> ValidationErrors {
    validate_with(submission, &MessageCatalog::default())
}
