// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Flux-Surface Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! D-shaped flux-surface mapping (ρ, θ, φ) → (x, y, z).
//!
//!   R(ρ,θ) = R₀ + aρ·cos(θ + δ·sin θ) + Δ·(1 - ρ²)
//!   Z(ρ,θ) = κ·aρ·sin θ
//!
//! The Shafranov shift Δ is fully applied on the magnetic axis and vanishes
//! on the boundary surface. φ rotates about the vertical axis.

use plasma_types::params::PlasmaParameters;
use plasma_types::state::FluxCoordinate;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryMapper {
    major_radius: f64,
    minor_radius: f64,
    elongation: f64,
    triangularity: f64,
    shafranov_shift: f64,
}

impl GeometryMapper {
    pub fn new(params: &PlasmaParameters) -> Self {
        Self {
            major_radius: params.major_radius,
            minor_radius: params.minor_radius,
            elongation: params.elongation,
            triangularity: params.triangularity,
            shafranov_shift: params.shafranov_shift,
        }
    }

    /// (R, Z) of the magnetic axis.
    pub fn magnetic_axis(&self) -> (f64, f64) {
        (self.major_radius + self.shafranov_shift, 0.0)
    }

    /// Poloidal-plane position (R, Z) on flux surface ρ at angle θ.
    pub fn poloidal(&self, rho: f64, theta: f64) -> (f64, f64) {
        let a_rho = self.minor_radius * rho;
        let alpha = theta + self.triangularity * theta.sin();
        let r = self.major_radius
            + a_rho * alpha.cos()
            + self.shafranov_shift * (1.0 - rho * rho);
        let z = self.elongation * a_rho * theta.sin();
        (r, z)
    }

    pub fn to_cartesian(&self, coord: &FluxCoordinate) -> [f64; 3] {
        let (r, z) = self.poloidal(coord.rho, coord.theta);
        let (sin_phi, cos_phi) = coord.phi.sin_cos();
        [r * cos_phi, r * sin_phi, z]
    }

    /// Poloidal-plane determinant ∂(R,Z)/∂(ρ,θ).
    fn poloidal_determinant(&self, rho: f64, theta: f64) -> f64 {
        let a = self.minor_radius;
        let delta = self.triangularity;
        let (sin_t, cos_t) = theta.sin_cos();
        let (sin_a, cos_a) = (theta + delta * sin_t).sin_cos();

        let dr_drho = a * cos_a - 2.0 * self.shafranov_shift * rho;
        let dr_dtheta = -a * rho * sin_a * (1.0 + delta * cos_t);
        let dz_drho = self.elongation * a * sin_t;
        let dz_dtheta = self.elongation * a * rho * cos_t;

        dr_drho * dz_dtheta - dr_dtheta * dz_drho
    }

    /// Volume element: dV = J(ρ,θ)·dρ·dθ·dφ with J = R·|∂(R,Z)/∂(ρ,θ)|.
    pub fn jacobian(&self, rho: f64, theta: f64) -> f64 {
        let (r, _) = self.poloidal(rho, theta);
        r * self.poloidal_determinant(rho, theta).abs()
    }

    /// Upper bound of [`Self::jacobian`] over all θ and every ρ ≤ `rho_hi`.
    pub fn jacobian_bound(&self, rho_hi: f64) -> f64 {
        let a = self.minor_radius;
        let shift = self.shafranov_shift.abs();
        let r_max = self.major_radius + a * rho_hi + shift;
        let bracket = a * (2.0 + self.triangularity.abs()) + 2.0 * shift * rho_hi;
        r_max * self.elongation * a * rho_hi * bracket
    }

    /// Plasma volume by midpoint quadrature of the Jacobian.
    pub fn plasma_volume(&self, n_rho: usize, n_theta: usize) -> f64 {
        let n_rho = n_rho.max(1);
        let n_theta = n_theta.max(1);
        let d_rho = 1.0 / n_rho as f64;
        let d_theta = 2.0 * PI / n_theta as f64;
        let mut sum = 0.0;
        for i in 0..n_rho {
            let rho = (i as f64 + 0.5) * d_rho;
            for j in 0..n_theta {
                let theta = (j as f64 + 0.5) * d_theta;
                sum += self.jacobian(rho, theta);
            }
        }
        2.0 * PI * sum * d_rho * d_theta
    }
}
