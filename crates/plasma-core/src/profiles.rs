// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Pedestal Profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Pedestal-model ion density and temperature profiles.
//!
//! Core region (ρ ≤ ρ_ped):
//!   n(ρ) = n_ped + (n_0 - n_ped)·(1 - (ρ/ρ_ped)²)^α_n
//!   T(ρ) = T_ped + (T_0 - T_ped)·(1 - (ρ/ρ_ped)^β)^α_T
//! Edge region (ρ > ρ_ped): linear from the pedestal value to the
//! separatrix value at ρ = 1.

use ndarray::Array1;
use plasma_types::error::{SourceError, SourceResult};
use plasma_types::params::PlasmaParameters;
use plasma_types::state::RadialProfiles;

/// Density core shape exponent on ρ/ρ_ped.
const DENSITY_CORE_EXPONENT: f64 = 2.0;

/// Shape of one profile quantity.
#[derive(Debug, Clone, Copy, PartialEq)]
struct PedestalShape {
    origin: f64,
    pedestal: f64,
    separatrix: f64,
    peaking: f64,
    core_exponent: f64,
}

impl PedestalShape {
    fn eval(&self, rho: f64, rho_ped: f64) -> f64 {
        if rho <= rho_ped {
            let x = (rho / rho_ped).powf(self.core_exponent);
            let core = (1.0 - x).max(0.0).powf(self.peaking);
            // Written from the origin side so ρ = 0 returns the origin value exactly.
            self.origin - (self.origin - self.pedestal) * (1.0 - core)
        } else {
            let edge = (1.0 - rho) / (1.0 - rho_ped);
            self.separatrix + (self.pedestal - self.separatrix) * edge
        }
    }
}

/// Radial ion density and temperature model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProfileModel {
    rho_ped: f64,
    density: PedestalShape,
    temperature: PedestalShape,
}

fn check_rho(rho: f64) -> SourceResult<()> {
    if (0.0..=1.0).contains(&rho) {
        Ok(())
    } else {
        Err(SourceError::CoordinateOutOfRange { rho })
    }
}

impl ProfileModel {
    pub fn new(params: &PlasmaParameters) -> Self {
        Self {
            rho_ped: params.pedestal_rho(),
            density: PedestalShape {
                origin: params.ion_density_origin,
                pedestal: params.ion_density_pedestal,
                separatrix: params.ion_density_separatrix,
                peaking: params.ion_density_peaking_factor,
                core_exponent: DENSITY_CORE_EXPONENT,
            },
            temperature: PedestalShape {
                origin: params.ion_temperature_origin,
                pedestal: params.ion_temperature_pedestal,
                separatrix: params.ion_temperature_separatrix,
                peaking: params.ion_temperature_peaking_factor,
                core_exponent: params.ion_temperature_beta,
            },
        }
    }

    pub fn pedestal_rho(&self) -> f64 {
        self.rho_ped
    }

    /// Ion density [m⁻³] at normalized radius ρ.
    pub fn density_at(&self, rho: f64) -> SourceResult<f64> {
        check_rho(rho)?;
        Ok(self.density.eval(rho, self.rho_ped))
    }

    /// Ion temperature [keV] at normalized radius ρ.
    pub fn temperature_at(&self, rho: f64) -> SourceResult<f64> {
        check_rho(rho)?;
        Ok(self.temperature.eval(rho, self.rho_ped))
    }

    /// Density and temperature for ρ already known to lie in [0, 1].
    pub(crate) fn local(&self, rho: f64) -> (f64, f64) {
        (
            self.density.eval(rho, self.rho_ped),
            self.temperature.eval(rho, self.rho_ped),
        )
    }

    /// Tabulate both profiles on `n` uniformly spaced ρ points (n ≥ 2).
    pub fn tabulate(&self, n: usize) -> SourceResult<RadialProfiles> {
        if n < 2 {
            return Err(SourceError::InvalidParameter {
                field: "n",
                reason: format!("profile tabulation needs at least 2 points, got {n}"),
            });
        }
        let rho = Array1::linspace(0.0, 1.0, n);
        let ion_density = rho.mapv(|r| self.density.eval(r, self.rho_ped));
        let ion_temperature = rho.mapv(|r| self.temperature.eval(r, self.rho_ped));
        Ok(RadialProfiles {
            rho,
            ion_density,
            ion_temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_types::params::ParameterSet;

    fn reference() -> ProfileModel {
        ProfileModel::new(&PlasmaParameters::new(ParameterSet::default()).unwrap())
    }

    #[test]
    fn test_endpoint_values_exact() {
        let model = reference();
        let set = ParameterSet::default();
        assert_eq!(model.density_at(0.0).unwrap(), set.ion_density_origin);
        assert_eq!(model.temperature_at(0.0).unwrap(), set.ion_temperature_origin);
        assert_eq!(model.density_at(1.0).unwrap(), set.ion_density_separatrix);
        assert_eq!(model.temperature_at(1.0).unwrap(), set.ion_temperature_separatrix);
    }

    #[test]
    fn test_continuous_at_pedestal() {
        let model = reference();
        let rho_ped = model.pedestal_rho();
        let eps = 1e-9;
        let t_in = model.temperature_at(rho_ped - eps).unwrap();
        let t_out = model.temperature_at(rho_ped + eps).unwrap();
        let n_in = model.density_at(rho_ped - eps).unwrap();
        let n_out = model.density_at(rho_ped + eps).unwrap();
        assert!((t_in - t_out).abs() < 1e-6, "T jump {t_in} vs {t_out}");
        assert!((n_in - n_out).abs() / n_in < 1e-6, "n jump {n_in} vs {n_out}");
        assert!((model.temperature_at(rho_ped).unwrap() - 6.09).abs() < 1e-12);
    }

    #[test]
    fn test_monotone_non_increasing() {
        let model = reference();
        let table = model.tabulate(2001).unwrap();
        for i in 1..table.rho.len() {
            assert!(table.ion_density[i] <= table.ion_density[i - 1]);
            assert!(table.ion_temperature[i] <= table.ion_temperature[i - 1]);
        }
    }

    #[test]
    fn test_flat_density_core() {
        // Reference scenario has n_0 == n_ped: flat out to the pedestal.
        let model = reference();
        assert_eq!(model.density_at(0.5).unwrap(), 1.09e20);
    }

    #[test]
    fn test_out_of_range_rho_rejected() {
        let model = reference();
        assert!(matches!(
            model.density_at(1.0001),
            Err(SourceError::CoordinateOutOfRange { .. })
        ));
        assert!(model.temperature_at(-0.1).is_err());
        assert!(model.temperature_at(f64::NAN).is_err());
        assert!(model.tabulate(1).is_err());
    }
}
