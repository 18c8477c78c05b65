// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("Parameter string is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("Parameter string repeats key `{0}`")]
    DuplicateKey(String),

    #[error("Cannot parse parameter string: {0}")]
    Parse(String),

    #[error("Degenerate source profile: {0}")]
    DegenerateProfile(String),

    #[error("Normalized radius {rho} outside [0, 1]")]
    CoordinateOutOfRange { rho: f64 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("NPY output error: {0}")]
    Npy(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

impl SourceError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        SourceError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }
}
