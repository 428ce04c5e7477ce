//! Shipment submissions and persisted shipment records
//!
//! A [`Submission`] is the raw, untrusted field map coming from the form.
//! Once validation passes it becomes a [`NewShipment`], and the record store
//! stamps it into a [`ShipmentRecord`] at append time.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Form field names
pub mod fields {
    pub const SENDER_NAME: &str = "sender_name";
    pub const SENDER_ADDRESS: &str = "sender_address";
    pub const SENDER_ZIP: &str = "sender_zip";
    pub const RECIPIENT_NAME: &str = "recipient_name";
    pub const RECIPIENT_ADDRESS: &str = "recipient_address";
    pub const RECIPIENT_ZIP: &str = "recipient_zip";
    pub const WEIGHT: &str = "weight";
    pub const SHIPMENT_TYPE: &str = "shipment_type";
    pub const INSURANCE: &str = "insurance";
    pub const NOTE: &str = "note";

    /// Every field the form knows about, in display order
    pub const ALL: [&str; 10] = [
        SENDER_NAME,
        SENDER_ADDRESS,
        SENDER_ZIP,
        RECIPIENT_NAME,
        RECIPIENT_ADDRESS,
        RECIPIENT_ZIP,
        WEIGHT,
        SHIPMENT_TYPE,
        INSURANCE,
        NOTE,
    ];
}

/// Raw form input for one shipment request
///
/// Values are arbitrary strings. Keys that the form does not know about are
/// kept but ignored by validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission {
    fields: HashMap<String, String>,
}

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a submission from `(field, value)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Build a submission from a JSON object
    ///
    /// Strings are taken as-is and numbers use their JSON text. `true` marks a
    /// flag as present while `false` and `null` leave the field out, so a JSON
    /// client can toggle `insurance` the same way a checkbox does.
    ///
    /// Returns `None` when the payload is not an object.
    pub fn from_json(payload: &Value) -> Option<Self> {
        let object = payload.as_object()?;
        let mut submission = Self::new();

        for (key, value) in object {
            match value {
                Value::String(s) => submission.insert(key.clone(), s.clone()),
                Value::Number(n) => submission.insert(key.clone(), n.to_string()),
                Value::Bool(true) => submission.insert(key.clone(), "on"),
                Value::Bool(false) | Value::Null => {}
                other => submission.insert(key.clone(), other.to_string()),
            }
        }

        Some(submission)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.fields.remove(field)
    }

    /// Raw value of a field, if it was submitted
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Raw value of a field, or the empty string when it is missing
    pub fn value(&self, field: &str) -> &str {
        self.get(field).unwrap_or("")
    }

    /// Whether the field was submitted at all (regardless of its value)
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }
}

/// Parcel classification
///
/// The wire tokens (`balik`, `dopis`, `cenny`) are what the form posts and
/// what the data file stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentType {
    #[serde(rename = "balik")]
    Package,
    #[serde(rename = "dopis")]
    Letter,
    #[serde(rename = "cenny")]
    InsuredValue,
}

impl ShipmentType {
    pub const ALL: [ShipmentType; 3] = [Self::Package, Self::Letter, Self::InsuredValue];

    pub fn token(&self) -> &'static str {
        match self {
            Self::Package => "balik",
            Self::Letter => "dopis",
            Self::InsuredValue => "cenny",
        }
    }

    /// Human-readable label shown in the form
    pub fn label(&self) -> &'static str {
        match self {
            Self::Package => "Balík",
            Self::Letter => "Dopis",
            Self::InsuredValue => "Cenná zásilka",
        }
    }

    /// Exact, case-sensitive token lookup
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.token() == token)
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// A validated shipment that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewShipment {
    pub sender_name: String,
    pub sender_address: String,
    pub sender_zip: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub recipient_zip: String,
    pub weight: f64,
    pub shipment_type: ShipmentType,
    pub insurance: bool,
    pub note: String,
}

impl NewShipment {
    /// Turn the shipment into a record created at `created_at`
    pub fn into_record(self, created_at: NaiveDateTime) -> ShipmentRecord {
        ShipmentRecord {
            sender_name: self.sender_name,
            sender_address: self.sender_address,
            sender_zip: self.sender_zip,
            recipient_name: self.recipient_name,
            recipient_address: self.recipient_address,
            recipient_zip: self.recipient_zip,
            weight: self.weight,
            shipment_type: self.shipment_type,
            insurance: self.insurance,
            note: self.note,
            created_at,
        }
    }
}

/// A persisted shipment
///
/// `created_at` is local wall-clock time without an offset, which keeps data
/// files written by earlier versions of the form readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub sender_name: String,
    pub sender_address: String,
    pub sender_zip: String,
    pub recipient_name: String,
    pub recipient_address: String,
    pub recipient_zip: String,
    pub weight: f64,
    pub shipment_type: ShipmentType,
    pub insurance: bool,
    pub note: String,
    pub created_at: NaiveDateTime,
}

impl ShipmentRecord {
    /// The record without its store-assigned timestamp
    pub fn shipment(&self) -> NewShipment {
        NewShipment {
            sender_name: self.sender_name.clone(),
            sender_address: self.sender_address.clone(),
            sender_zip: self.sender_zip.clone(),
            recipient_name: self.recipient_name.clone(),
            recipient_address: self.recipient_address.clone(),
            recipient_zip: self.recipient_zip.clone(),
            weight: self.weight,
            shipment_type: self.shipment_type,
            insurance: self.insurance,
            note: self.note.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shipment_type_tokens() {
        assert_eq!(ShipmentType::from_token("balik"), Some(ShipmentType::Package));
        assert_eq!(ShipmentType::from_token("dopis"), Some(ShipmentType::Letter));
        assert_eq!(
            ShipmentType::from_token("cenny"),
            Some(ShipmentType::InsuredValue)
        );
        assert_eq!(ShipmentType::from_token("letter"), None);
        assert_eq!(ShipmentType::from_token("Balik"), None);
        assert_eq!(ShipmentType::from_token(" balik"), None);
    }

    #[test]
    fn test_shipment_type_serializes_as_token() {
        let value = serde_json::to_value(ShipmentType::InsuredValue).unwrap();
        assert_eq!(value, json!("cenny"));

        let parsed: ShipmentType = serde_json::from_value(json!("dopis")).unwrap();
        assert_eq!(parsed, ShipmentType::Letter);
    }

    #[test]
    fn test_submission_missing_field_reads_as_empty() {
        let submission = Submission::from_pairs([("sender_name", "Jan")]);
        assert_eq!(submission.value("sender_name"), "Jan");
        assert_eq!(submission.value("note"), "");
        assert_eq!(submission.get("note"), None);
        assert!(!submission.contains("insurance"));
    }

    #[test]
    fn test_submission_from_json_object() {
        let submission = Submission::from_json(&json!({
            "sender_name": "Jan",
            "weight": 2.5,
            "insurance": true,
            "note": null,
        }))
        .unwrap();

        assert_eq!(submission.value("sender_name"), "Jan");
        assert_eq!(submission.value("weight"), "2.5");
        assert!(submission.contains("insurance"));
        assert!(!submission.contains("note"));
    }

    #[test]
    fn test_submission_from_json_false_flag_is_absent() {
        let submission = Submission::from_json(&json!({ "insurance": false })).unwrap();
        assert!(!submission.contains("insurance"));
    }

    #[test]
    fn test_submission_from_json_rejects_non_object() {
        assert!(Submission::from_json(&json!(["sender_name"])).is_none());
        assert!(Submission::from_json(&json!("text")).is_none());
    }

    #[test]
    fn test_submission_deserializes_from_form_body() {
        let submission: Submission =
            serde_json::from_value(json!({ "sender_zip": "10000", "insurance": "on" })).unwrap();
        assert_eq!(submission.value("sender_zip"), "10000");
        assert!(submission.contains("insurance"));
    }

    #[test]
    fn test_record_round_trip_keeps_non_ascii() {
        let created_at = chrono::NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let record = NewShipment {
            sender_name: "Jan Novák".into(),
            sender_address: "Hlavní 12".into(),
            sender_zip: "10000".into(),
            recipient_name: "Eva".into(),
            recipient_address: "Vedlejší 3".into(),
            recipient_zip: "20000".into(),
            weight: 2.5,
            shipment_type: ShipmentType::Package,
            insurance: false,
            note: String::new(),
        }
        .into_record(created_at);

        let text = serde_json::to_string(&record).unwrap();
        assert!(text.contains("Jan Novák"));
        assert!(text.contains("\"created_at\":\"2024-03-01T09:30:00\""));

        let parsed: ShipmentRecord = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_record_reads_fractional_timestamp() {
        let parsed: ShipmentRecord = serde_json::from_value(json!({
            "sender_name": "Jan",
            "sender_address": "Hlavní 12",
            "sender_zip": "10000",
            "recipient_name": "Eva",
            "recipient_address": "Vedlejší 3",
            "recipient_zip": "20000",
            "weight": 1.0,
            "shipment_type": "balik",
            "insurance": true,
            "note": "",
            "created_at": "2024-05-01T10:00:00.123456"
        }))
        .unwrap();

        assert!(parsed.insurance);
        assert_eq!(parsed.created_at.and_utc().timestamp_subsec_micros(), 123456);
    }
}
