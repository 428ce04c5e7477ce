//! Page rendering for the HTML form
//!
//! Templates are compiled into the binary and rendered with tera. HTML
//! autoescaping is on, so echoed user input is always escaped.

use crate::core::shipment::{ShipmentType, Submission, fields};
use crate::core::validation::ValidationErrors;
use serde::Serialize;
use std::collections::BTreeMap;
use tera::{Context, Tera};

const BASE: &str = include_str!("../../../../templates/base.html");
const FORM: &str = include_str!("../../../../templates/form.html");
const SUCCESS: &str = include_str!("../../../../templates/success.html");
const ERROR: &str = include_str!("../../../../templates/error.html");

/// One `<option>` of the shipment type select
#[derive(Debug, Clone, Serialize)]
pub struct ShipmentTypeOption {
    pub token: &'static str,
    pub label: &'static str,
}

/// Everything the form template needs
///
/// `values` and `errors` hold an entry for every field (empty when there is
/// nothing to show) so the template never hits an undefined variable.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub values: BTreeMap<&'static str, String>,
    pub errors: BTreeMap<&'static str, String>,
    pub insurance: bool,
    pub shipment_types: Vec<ShipmentTypeOption>,
}

impl FormView {
    /// A blank form
    pub fn empty() -> Self {
        Self::echo(&Submission::new(), &ValidationErrors::new())
    }

    /// The form re-filled with the user's input and per-field errors
    pub fn echo(submission: &Submission, errors: &ValidationErrors) -> Self {
        let values = fields::ALL
            .iter()
            .map(|&field| (field, submission.value(field).to_string()))
            .collect();
        let errors = fields::ALL
            .iter()
            .map(|&field| (field, errors.get(field).unwrap_or("").to_string()))
            .collect();

        Self {
            values,
            errors,
            insurance: submission.contains(fields::INSURANCE),
            shipment_types: ShipmentType::ALL
                .iter()
                .map(|t| ShipmentTypeOption {
                    token: t.token(),
                    label: t.label(),
                })
                .collect(),
        }
    }
}

/// Compiled page templates
pub struct Templates {
    tera: Tera,
}

impl Templates {
    /// Load the templates embedded in the binary
    pub fn embedded() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("base.html", BASE),
            ("form.html", FORM),
            ("success.html", SUCCESS),
            ("error.html", ERROR),
        ])?;
        Ok(Self { tera })
    }

    pub fn render_form(&self, view: &FormView) -> Result<String, tera::Error> {
        let context = Context::from_serialize(view)?;
        self.tera.render("form.html", &context)
    }

    pub fn render_success(&self) -> Result<String, tera::Error> {
        self.tera.render("success.html", &Context::new())
    }

    /// Error page; `code` is the machine-readable error code shown to the user
    pub fn render_error(&self, code: &str) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("code", code);
        self.tera.render("error.html", &context)
    }
}
