// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Sample Output
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! `.npy` dumps of sampled sources and tabulated profiles for inspection.

use std::path::Path;

use ndarray::Array2;
use ndarray_npy::write_npy;
use plasma_types::error::{SourceError, SourceResult};
use plasma_types::state::{RadialProfiles, SampledParticle};

/// Column layout of [`samples_to_array`].
pub const SAMPLE_COLUMNS: [&str; 7] = ["x", "y", "z", "u", "v", "w", "energy_mev"];

/// Pack samples into an `[n, 7]` array: x, y, z, u, v, w, E.
pub fn samples_to_array(samples: &[SampledParticle]) -> Array2<f64> {
    Array2::from_shape_fn((samples.len(), SAMPLE_COLUMNS.len()), |(i, j)| {
        let s = &samples[i];
        match j {
            0..=2 => s.position[j],
            3..=5 => s.direction[j - 3],
            _ => s.energy_mev,
        }
    })
}

/// Pack profiles into an `[n, 3]` array: ρ, n_i, T_i.
pub fn profiles_to_array(profiles: &RadialProfiles) -> Array2<f64> {
    Array2::from_shape_fn((profiles.rho.len(), 3), |(i, j)| match j {
        0 => profiles.rho[i],
        1 => profiles.ion_density[i],
        _ => profiles.ion_temperature[i],
    })
}

pub fn write_samples_npy(path: impl AsRef<Path>, samples: &[SampledParticle]) -> SourceResult<()> {
    write_npy(path, &samples_to_array(samples)).map_err(|e| SourceError::Npy(e.to_string()))
}

pub fn write_profiles_npy(path: impl AsRef<Path>, profiles: &RadialProfiles) -> SourceResult<()> {
    write_npy(path, &profiles_to_array(profiles)).map_err(|e| SourceError::Npy(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ProfileModel;
    use crate::sampler::Sampler;
    use ndarray_npy::read_npy;
    use plasma_types::params::{ParameterSet, PlasmaParameters};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_samples_array_layout() {
        let sample = SampledParticle {
            position: [1.0, 2.0, 3.0],
            direction: [0.0, 0.6, 0.8],
            energy_mev: 14.1,
        };
        let arr = samples_to_array(&[sample, sample]);
        assert_eq!(arr.shape(), &[2, 7]);
        assert_eq!(arr[[1, 2]], 3.0);
        assert_eq!(arr[[0, 5]], 0.8);
        assert_eq!(arr[[1, 6]], 14.1);
    }

    #[test]
    fn test_write_and_read_back() {
        let params = PlasmaParameters::new(ParameterSet::default()).unwrap();
        let sampler = Sampler::new(params);
        let samples = sampler
            .sample_batch(64, &mut StdRng::seed_from_u64(9))
            .unwrap();

        let dir = std::env::temp_dir().join(format!("plasma-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("samples.npy");
        write_samples_npy(&path, &samples).unwrap();
        let back: Array2<f64> = read_npy(&path).unwrap();
        assert_eq!(back, samples_to_array(&samples));

        let profiles = ProfileModel::new(&params).tabulate(50).unwrap();
        let ppath = dir.join("profiles.npy");
        write_profiles_npy(&ppath, &profiles).unwrap();
        let pback: Array2<f64> = read_npy(&ppath).unwrap();
        assert_eq!(pback.shape(), &[50, 3]);
        assert_eq!(pback[[0, 2]], 45.9);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
