// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Plasma Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Plasma shape and profile parameters.
//!
//! [`ParameterSet`] is the plain field bag (JSON and interchange schema).
//! [`PlasmaParameters`] is the validated, read-only form every sampling
//! call borrows. The only way to obtain one is through validation.

use std::ops::Deref;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SourceError, SourceResult};

/// Raw, unvalidated parameter fields.
///
/// Lengths share one unit (metres in the reference scenario), densities
/// are in m⁻³ and temperatures in keV.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    pub major_radius: f64,
    pub minor_radius: f64,
    pub pedestal_radius: f64,
    pub elongation: f64,
    pub triangularity: f64,
    pub shafranov_shift: f64,
    /// Disambiguates coexisting plasma sources.
    pub plasma_id: u32,
    pub ion_density_origin: f64,
    pub ion_density_pedestal: f64,
    pub ion_density_separatrix: f64,
    pub ion_density_peaking_factor: f64,
    pub ion_temperature_origin: f64,
    pub ion_temperature_pedestal: f64,
    pub ion_temperature_separatrix: f64,
    pub ion_temperature_peaking_factor: f64,
    pub ion_temperature_beta: f64,
}

impl Default for ParameterSet {
    /// Large-tokamak reference scenario.
    fn default() -> Self {
        Self {
            major_radius: 9.06,
            minor_radius: 2.92258,
            pedestal_radius: 0.8 * 2.92258,
            elongation: 1.557,
            triangularity: 0.270,
            shafranov_shift: 0.44789,
            plasma_id: 1,
            ion_density_origin: 1.09e20,
            ion_density_pedestal: 1.09e20,
            ion_density_separatrix: 3e19,
            ion_density_peaking_factor: 1.0,
            ion_temperature_origin: 45.9,
            ion_temperature_pedestal: 6.09,
            ion_temperature_separatrix: 0.1,
            ion_temperature_peaking_factor: 8.06,
            ion_temperature_beta: 6.0,
        }
    }
}

fn require_finite(field: &'static str, value: f64) -> SourceResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(SourceError::invalid(field, format!("must be finite, got {value}")))
    }
}

fn require_positive(field: &'static str, value: f64) -> SourceResult<()> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(SourceError::invalid(field, format!("must be > 0, got {value}")))
    }
}

fn require_non_increasing(
    outer: &'static str,
    outer_value: f64,
    inner: &'static str,
    inner_value: f64,
) -> SourceResult<()> {
    if outer_value <= inner_value {
        Ok(())
    } else {
        Err(SourceError::invalid(
            outer,
            format!("must not exceed {inner} ({outer_value} > {inner_value})"),
        ))
    }
}

impl ParameterSet {
    /// Floating-point fields in interchange order (`plasma_id` excluded).
    fn float_fields(&self) -> [(&'static str, f64); 15] {
        [
            ("major_radius", self.major_radius),
            ("minor_radius", self.minor_radius),
            ("pedestal_radius", self.pedestal_radius),
            ("elongation", self.elongation),
            ("triangularity", self.triangularity),
            ("shafranov_shift", self.shafranov_shift),
            ("ion_density_origin", self.ion_density_origin),
            ("ion_density_pedestal", self.ion_density_pedestal),
            ("ion_density_separatrix", self.ion_density_separatrix),
            ("ion_density_peaking_factor", self.ion_density_peaking_factor),
            ("ion_temperature_origin", self.ion_temperature_origin),
            ("ion_temperature_pedestal", self.ion_temperature_pedestal),
            ("ion_temperature_separatrix", self.ion_temperature_separatrix),
            ("ion_temperature_peaking_factor", self.ion_temperature_peaking_factor),
            ("ion_temperature_beta", self.ion_temperature_beta),
        ]
    }

    /// Check every construction invariant, reporting the first violation.
    pub fn validate(&self) -> SourceResult<()> {
        for (field, value) in self.float_fields() {
            require_finite(field, value)?;
        }

        require_positive("major_radius", self.major_radius)?;
        require_positive("minor_radius", self.minor_radius)?;
        require_positive("pedestal_radius", self.pedestal_radius)?;
        if self.pedestal_radius >= self.minor_radius {
            return Err(SourceError::invalid(
                "pedestal_radius",
                format!(
                    "must be < minor_radius ({} >= {})",
                    self.pedestal_radius, self.minor_radius
                ),
            ));
        }
        require_positive("elongation", self.elongation)?;
        if self.triangularity.abs() >= 1.0 {
            return Err(SourceError::invalid(
                "triangularity",
                format!("|triangularity| must be < 1, got {}", self.triangularity),
            ));
        }
        if self.shafranov_shift.abs() >= self.minor_radius {
            return Err(SourceError::invalid(
                "shafranov_shift",
                format!(
                    "|shafranov_shift| must be < minor_radius ({} vs {})",
                    self.shafranov_shift, self.minor_radius
                ),
            ));
        }
        if self.major_radius <= self.minor_radius + self.shafranov_shift.abs() {
            return Err(SourceError::invalid(
                "major_radius",
                format!(
                    "must exceed minor_radius + |shafranov_shift| ({} <= {})",
                    self.major_radius,
                    self.minor_radius + self.shafranov_shift.abs()
                ),
            ));
        }

        require_positive("ion_density_origin", self.ion_density_origin)?;
        require_positive("ion_density_pedestal", self.ion_density_pedestal)?;
        if self.ion_density_separatrix < 0.0 {
            return Err(SourceError::invalid(
                "ion_density_separatrix",
                format!("must be >= 0, got {}", self.ion_density_separatrix),
            ));
        }
        require_non_increasing(
            "ion_density_pedestal",
            self.ion_density_pedestal,
            "ion_density_origin",
            self.ion_density_origin,
        )?;
        require_non_increasing(
            "ion_density_separatrix",
            self.ion_density_separatrix,
            "ion_density_pedestal",
            self.ion_density_pedestal,
        )?;
        require_positive("ion_density_peaking_factor", self.ion_density_peaking_factor)?;

        require_positive("ion_temperature_origin", self.ion_temperature_origin)?;
        if self.ion_temperature_separatrix < 0.0 {
            return Err(SourceError::invalid(
                "ion_temperature_separatrix",
                format!("must be >= 0, got {}", self.ion_temperature_separatrix),
            ));
        }
        require_non_increasing(
            "ion_temperature_pedestal",
            self.ion_temperature_pedestal,
            "ion_temperature_origin",
            self.ion_temperature_origin,
        )?;
        require_non_increasing(
            "ion_temperature_separatrix",
            self.ion_temperature_separatrix,
            "ion_temperature_pedestal",
            self.ion_temperature_pedestal,
        )?;
        require_positive(
            "ion_temperature_peaking_factor",
            self.ion_temperature_peaking_factor,
        )?;
        require_positive("ion_temperature_beta", self.ion_temperature_beta)?;

        Ok(())
    }
}

/// Validated plasma parameters. Read-only after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterSet", into = "ParameterSet")]
pub struct PlasmaParameters {
    inner: ParameterSet,
}

impl PlasmaParameters {
    pub fn new(set: ParameterSet) -> SourceResult<Self> {
        set.validate()?;
        Ok(Self { inner: set })
    }

    /// Load from a JSON file holding the 16 fields.
    pub fn from_json_file(path: impl AsRef<Path>) -> SourceResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&contents)?;
        Ok(params)
    }

    pub fn to_json_string(&self) -> SourceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn as_set(&self) -> &ParameterSet {
        &self.inner
    }

    /// Pedestal position as a normalized minor radius.
    pub fn pedestal_rho(&self) -> f64 {
        self.inner.pedestal_radius / self.inner.minor_radius
    }
}

impl Deref for PlasmaParameters {
    type Target = ParameterSet;

    fn deref(&self) -> &ParameterSet {
        &self.inner
    }
}

impl TryFrom<ParameterSet> for PlasmaParameters {
    type Error = SourceError;

    fn try_from(set: ParameterSet) -> SourceResult<Self> {
        Self::new(set)
    }
}

impl From<PlasmaParameters> for ParameterSet {
    fn from(params: PlasmaParameters) -> Self {
        params.inner
    }
}
