// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Normalized flux coordinates of one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluxCoordinate {
    pub rho: f64,   // normalized minor radius [0, 1]
    pub theta: f64, // poloidal angle [0, 2π)
    pub phi: f64,   // toroidal angle [0, 2π)
}

/// One neutron birth site. Statistical weight is always 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SampledParticle {
    /// Cartesian position, same length unit as the parameters.
    pub position: [f64; 3],
    /// Unit direction vector.
    pub direction: [f64; 3],
    /// Kinetic energy [MeV].
    pub energy_mev: f64,
}

impl SampledParticle {
    pub const WEIGHT: f64 = 1.0;

    /// Cylindrical major radius of the birth site.
    pub fn major_radius(&self) -> f64 {
        self.position[0].hypot(self.position[1])
    }

    pub fn direction_norm(&self) -> f64 {
        let [u, v, w] = self.direction;
        (u * u + v * v + w * w).sqrt()
    }
}

/// Radial ion profiles tabulated on a uniform ρ grid.
#[derive(Debug, Clone)]
pub struct RadialProfiles {
    pub rho: Array1<f64>,
    pub ion_density: Array1<f64>,     // m⁻³
    pub ion_temperature: Array1<f64>, // keV
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_particle_major_radius() {
        let p = SampledParticle {
            position: [3.0, 4.0, 1.0],
            direction: [0.0, 0.0, 1.0],
            energy_mev: 14.08,
        };
        assert!((p.major_radius() - 5.0).abs() < 1e-12);
        assert!((p.direction_norm() - 1.0).abs() < 1e-12);
        assert_eq!(SampledParticle::WEIGHT, 1.0);
    }
}
