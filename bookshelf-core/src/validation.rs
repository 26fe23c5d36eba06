//! The payload of a 400 caused by a body that parsed but broke a `garde` rule.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Dotted path of the offending field, or `value` for the body itself.
    pub field: String,
    pub message: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

impl From<&garde::Report> for ValidationErrorResponse {
    fn from(report: &garde::Report) -> Self {
        let errors = report
            .iter()
            .map(|(path, error)| {
                let field = match path.to_string() {
                    p if p.is_empty() => "value".to_owned(),
                    p => p,
                };
                FieldError {
                    field,
                    message: error.message().to_owned(),
                    code: "invalid".to_owned(),
                }
            })
            .collect();
        Self { errors }
    }
}
