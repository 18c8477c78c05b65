// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — D-T Reactivity Weighting
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Local D-T neutron emission weighting.
//!
//! Uses the Bosch-Hale (1992) parameterization of ⟨σv⟩, fitted over
//! 0.2-100 keV:
//!   θ = T / (1 - T(C2 + T(C4 + T·C6)) / (1 + T(C3 + T(C5 + T·C7))))
//!   ξ = (B_G² / 4θ)^(1/3)
//!   ⟨σv⟩ = C1·θ·sqrt(ξ / (m_r c²·T³))·exp(-3ξ)

use crate::geometry::GeometryMapper;
use crate::profiles::ProfileModel;
use plasma_types::constants::{
    BOSCH_HALE_DT_BG, BOSCH_HALE_DT_C, BOSCH_HALE_DT_MRC2, CM3_TO_M3,
};
use std::f64::consts::PI;

/// Bosch-Hale D-T reactivity ⟨σv⟩ in m³/s. Zero for T ≤ 0.
pub fn dt_reactivity(t_kev: f64) -> f64 {
    if !(t_kev > 0.0) {
        return 0.0;
    }
    let [c1, c2, c3, c4, c5, c6, c7] = BOSCH_HALE_DT_C;
    let t = t_kev;
    let numerator = t * (c2 + t * (c4 + t * c6));
    let denominator = 1.0 + t * (c3 + t * (c5 + t * c7));
    let theta = t / (1.0 - numerator / denominator);
    let xi = (BOSCH_HALE_DT_BG * BOSCH_HALE_DT_BG / (4.0 * theta)).cbrt();
    let sigma_v_cm3 =
        c1 * theta * (xi / (BOSCH_HALE_DT_MRC2 * t * t * t)).sqrt() * (-3.0 * xi).exp();
    if sigma_v_cm3.is_finite() {
        sigma_v_cm3 * CM3_TO_M3
    } else {
        0.0
    }
}

/// Neutron emission weight from the local ion profiles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReactivityWeighter {
    profiles: ProfileModel,
}

impl ReactivityWeighter {
    pub fn new(profiles: ProfileModel) -> Self {
        Self { profiles }
    }

    pub fn profiles(&self) -> &ProfileModel {
        &self.profiles
    }

    /// Relative sampling weight n² ⟨σv⟩ for given local density and temperature.
    pub fn weight_from(density: f64, temperature_kev: f64) -> f64 {
        (density * density * dt_reactivity(temperature_kev)).max(0.0)
    }

    /// Relative sampling weight at ρ ∈ [0, 1].
    pub fn weight(&self, rho: f64) -> f64 {
        let (n, t) = self.profiles.local(rho);
        Self::weight_from(n, t)
    }

    /// Absolute emission rate [m⁻³ s⁻¹] for a 50/50 D-T mix: n_D·n_T·⟨σv⟩.
    pub fn emission_rate(&self, rho: f64) -> f64 {
        0.25 * self.weight(rho)
    }

    /// Neutrons per second from the whole plasma (midpoint quadrature).
    ///
    /// Only meaningful when lengths are in metres.
    pub fn total_neutron_rate(&self, geometry: &GeometryMapper, n_rho: usize, n_theta: usize) -> f64 {
        let n_rho = n_rho.max(1);
        let n_theta = n_theta.max(1);
        let d_rho = 1.0 / n_rho as f64;
        let d_theta = 2.0 * PI / n_theta as f64;
        let mut total = 0.0;
        for i in 0..n_rho {
            let rho = (i as f64 + 0.5) * d_rho;
            let rate = self.emission_rate(rho);
            if rate == 0.0 {
                continue;
            }
            let ring: f64 = (0..n_theta)
                .map(|j| geometry.jacobian(rho, (j as f64 + 0.5) * d_theta))
                .sum();
            total += rate * ring;
        }
        2.0 * PI * total * d_rho * d_theta
    }
}
