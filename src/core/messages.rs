//! Validation message tables
//!
//! Messages are looked up by field and rule so validation logic never carries
//! literal text. The Czech table is the default and reproduces the texts the
//! intake form has always shown.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validation rule a message belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    MinLength,
    Zip,
    PositiveNumber,
    ShipmentType,
    MaxLength,
}

/// Language of the message table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Cs,
    En,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::Cs => "cs",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cs" => Ok(Locale::Cs),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale '{}' (expected cs or en)", other)),
        }
    }
}

type MessageTable = &'static [(&'static str, Rule, &'static str)];

const CS: MessageTable = &[
    ("sender_name", Rule::MinLength, "Jméno odesílatele musí mít alespoň 2 znaky."),
    ("sender_address", Rule::MinLength, "Adresa odesílatele musí mít alespoň 5 znaky."),
    ("recipient_name", Rule::MinLength, "Jméno příjemce musí mít alespoň 2 znaky."),
    ("recipient_address", Rule::MinLength, "Adresa příjemce musí mít alespoň 5 znaky."),
    ("sender_zip", Rule::Zip, "PSČ odesílatele musí mít přesně 5 číslic."),
    ("recipient_zip", Rule::Zip, "PSČ příjemce musí mít přesně 5 číslic."),
    ("weight", Rule::PositiveNumber, "Hmotnost musí být kladné číslo."),
    ("shipment_type", Rule::ShipmentType, "Neplatný typ zásilky."),
    ("note", Rule::MaxLength, "Poznámka může mít maximálně 200 znaků."),
];

const EN: MessageTable = &[
    ("sender_name", Rule::MinLength, "name must be at least 2 characters"),
    ("sender_address", Rule::MinLength, "address must be at least 5 characters"),
    ("recipient_name", Rule::MinLength, "name must be at least 2 characters"),
    ("recipient_address", Rule::MinLength, "address must be at least 5 characters"),
    ("sender_zip", Rule::Zip, "zip must be exactly 5 digits"),
    ("recipient_zip", Rule::Zip, "zip must be exactly 5 digits"),
    ("weight", Rule::PositiveNumber, "weight must be a positive number"),
    ("shipment_type", Rule::ShipmentType, "invalid shipment type"),
    ("note", Rule::MaxLength, "note may be at most 200 characters"),
];

/// Message lookup for one locale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: Locale,
}

impl MessageCatalog {
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Message for a failed rule on a field
    ///
    /// Unknown (field, rule) pairs fall back to a generic message rather than
    /// failing, since every input must resolve to an error entry.
    pub fn message(&self, field: &str, rule: Rule) -> &'static str {
        let table = match self.locale {
            Locale::Cs => CS,
            Locale::En => EN,
        };

        table
            .iter()
            .find(|(f, r, _)| *f == field && *r == rule)
            .map(|(_, _, message)| *message)
            .unwrap_or(match self.locale {
                Locale::Cs => "Neplatná hodnota.",
                Locale::En => "invalid value",
            })
    }
}
