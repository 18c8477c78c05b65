// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Parameter Codec
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Flat `key=value` interchange format for [`PlasmaParameters`].
//!
//! This string is the only channel through which the parameters reach the
//! loaded sampling artifact:
//!
//! ```text
//! major_radius=9.06, minor_radius=2.92258, ..., ion_temperature_beta=6
//! ```
//!
//! Field order is fixed by [`FIELD_NAMES`]. Floats use the shortest
//! representation that parses back to the identical `f64`. On decode,
//! entries may be separated by commas or newlines, unknown keys are
//! skipped and every known key must appear exactly once.

use crate::error::{SourceError, SourceResult};
use crate::params::{ParameterSet, PlasmaParameters};

/// Interchange keys, in encoding order.
pub const FIELD_NAMES: [&str; 16] = [
    "major_radius",
    "minor_radius",
    "pedestal_radius",
    "elongation",
    "triangularity",
    "shafranov_shift",
    "plasma_id",
    "ion_density_origin",
    "ion_density_pedestal",
    "ion_density_separatrix",
    "ion_density_peaking_factor",
    "ion_temperature_origin",
    "ion_temperature_pedestal",
    "ion_temperature_separatrix",
    "ion_temperature_peaking_factor",
    "ion_temperature_beta",
];

const SEPARATOR: &str = ", ";

/// Render the parameters as the canonical interchange string.
pub fn encode(params: &PlasmaParameters) -> String {
    let p = params.as_set();
    let values = [
        p.major_radius.to_string(),
        p.minor_radius.to_string(),
        p.pedestal_radius.to_string(),
        p.elongation.to_string(),
        p.triangularity.to_string(),
        p.shafranov_shift.to_string(),
        p.plasma_id.to_string(),
        p.ion_density_origin.to_string(),
        p.ion_density_pedestal.to_string(),
        p.ion_density_separatrix.to_string(),
        p.ion_density_peaking_factor.to_string(),
        p.ion_temperature_origin.to_string(),
        p.ion_temperature_pedestal.to_string(),
        p.ion_temperature_separatrix.to_string(),
        p.ion_temperature_peaking_factor.to_string(),
        p.ion_temperature_beta.to_string(),
    ];
    FIELD_NAMES
        .iter()
        .zip(values.iter())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(SEPARATOR)
}

/// Parse and validate an interchange string.
pub fn decode(text: &str) -> SourceResult<PlasmaParameters> {
    let mut slots: [Option<&str>; 16] = [None; 16];

    for entry in text.split([',', '\n']) {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        let (key, value) = entry
            .split_once('=')
            .ok_or_else(|| SourceError::Parse(format!("entry `{entry}` has no `=`")))?;
        let key = key.trim();
        let Some(index) = FIELD_NAMES.iter().position(|name| *name == key) else {
            continue;
        };
        if slots[index].is_some() {
            return Err(SourceError::DuplicateKey(key.to_string()));
        }
        slots[index] = Some(value.trim());
    }

    let float = |index: usize| -> SourceResult<f64> {
        let name = FIELD_NAMES[index];
        let raw = slots[index].ok_or(SourceError::MissingKey(name))?;
        raw.parse::<f64>()
            .map_err(|e| SourceError::Parse(format!("{name}=`{raw}`: {e}")))
    };

    let id = || -> SourceResult<u32> {
        let raw = slots[6].ok_or(SourceError::MissingKey(FIELD_NAMES[6]))?;
        parse_plasma_id(raw)
    };

    // Fields are read in interchange order so the first problem reported
    // is the earliest one in the string.
    let set = ParameterSet {
        major_radius: float(0)?,
        minor_radius: float(1)?,
        pedestal_radius: float(2)?,
        elongation: float(3)?,
        triangularity: float(4)?,
        shafranov_shift: float(5)?,
        plasma_id: id()?,
        ion_density_origin: float(7)?,
        ion_density_pedestal: float(8)?,
        ion_density_separatrix: float(9)?,
        ion_density_peaking_factor: float(10)?,
        ion_temperature_origin: float(11)?,
        ion_temperature_pedestal: float(12)?,
        ion_temperature_separatrix: float(13)?,
        ion_temperature_peaking_factor: float(14)?,
        ion_temperature_beta: float(15)?,
    };
    PlasmaParameters::new(set)
}

/// Accepts `1` as well as integral float spellings such as `1.0`.
fn parse_plasma_id(raw: &str) -> SourceResult<u32> {
    if let Ok(id) = raw.parse::<u32>() {
        return Ok(id);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.fract() == 0.0 && (0.0..=u32::MAX as f64).contains(&v) => Ok(v as u32),
        _ => Err(SourceError::Parse(format!(
            "plasma_id=`{raw}` is not a non-negative integer"
        ))),
    }
}

impl std::fmt::Display for PlasmaParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&encode(self))
    }
}

impl std::str::FromStr for PlasmaParameters {
    type Err = SourceError;

    fn from_str(s: &str) -> SourceResult<Self> {
        decode(s)
    }
}
