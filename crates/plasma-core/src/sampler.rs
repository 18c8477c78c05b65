// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Neutron Source Sampler
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Neutron birth-site sampler.
//!
//! Position: (ρ, θ) is drawn with density ∝ n²⟨σv⟩(ρ)·J(ρ,θ) by rejection
//! against a piecewise-constant envelope over uniform radial bins. A bin
//! is picked by inverse CDF of envelope mass, a proposal is drawn uniformly
//! inside it and accepted with probability f/envelope, so the accepted
//! distribution is exact for any bin count. φ is uniform.
//!
//! Direction: isotropic. Energy: Gaussian around 14.08 MeV with
//! σ² = 2·m_n·E₀·kT/(m_n + m_α) at the local ion temperature.
//!
//! The sampler holds no mutable state apart from the envelope table, which
//! is built once on first use. Every call takes the caller's RNG.

use std::f64::consts::TAU;
use std::sync::OnceLock;

use rand::Rng;
use rand_distr::StandardNormal;
use tracing::{debug, warn};

use crate::geometry::GeometryMapper;
use crate::profiles::ProfileModel;
use crate::reactivity::ReactivityWeighter;
use plasma_types::constants::{
    ALPHA_MASS_AMU, DT_NEUTRON_ENERGY_MEV, KEV_PER_MEV, NEUTRON_MASS_AMU,
};
use plasma_types::error::{SourceError, SourceResult};
use plasma_types::params::PlasmaParameters;
use plasma_types::state::{FluxCoordinate, SampledParticle};

/// Sub-samples per bin used to find the weight maximum.
const ENVELOPE_SUBSAMPLES: usize = 8;

/// Safety factor on the sub-sampled weight maximum.
const ENVELOPE_MARGIN: f64 = 1.05;

/// Negative energy draws are redrawn up to this many times, then floored.
const MAX_ENERGY_REDRAWS: usize = 64;

/// Lowest energy ever returned [MeV].
const ENERGY_FLOOR_MEV: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplerConfig {
    /// Radial bins of the rejection envelope.
    pub number_of_bins: usize,
    /// Proposals allowed per position before the profile is declared degenerate.
    pub max_rejections: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            number_of_bins: 100,
            max_rejections: 100_000,
        }
    }
}

#[derive(Debug, Clone)]
struct EnvelopeTable {
    bin_width: f64,
    /// Envelope height per bin (bounds weight × Jacobian inside the bin).
    envelope: Vec<f64>,
    /// Normalized cumulative envelope mass, last entry 1.
    cdf: Vec<f64>,
}

/// Doppler width σ [MeV] of the D-T neutron line at ion temperature T [keV].
pub fn energy_spread_mev(t_kev: f64) -> f64 {
    let t_mev = t_kev.max(0.0) / KEV_PER_MEV;
    let mass_ratio = NEUTRON_MASS_AMU / (NEUTRON_MASS_AMU + ALPHA_MASS_AMU);
    (2.0 * mass_ratio * DT_NEUTRON_ENERGY_MEV * t_mev).sqrt()
}

/// Unit vector uniformly distributed on the sphere.
pub fn isotropic_direction<R: Rng + ?Sized>(rng: &mut R) -> [f64; 3] {
    let mu = 2.0 * rng.gen::<f64>() - 1.0;
    let azimuth = TAU * rng.gen::<f64>();
    let s = (1.0 - mu * mu).max(0.0).sqrt();
    let (sin_a, cos_a) = azimuth.sin_cos();
    [s * cos_a, s * sin_a, mu]
}

/// Doppler-broadened D-T neutron energy [MeV] at ion temperature T [keV].
pub fn sample_energy<R: Rng + ?Sized>(t_kev: f64, rng: &mut R) -> f64 {
    let sigma = energy_spread_mev(t_kev);
    let mut energy = DT_NEUTRON_ENERGY_MEV;
    for _ in 0..MAX_ENERGY_REDRAWS {
        let z: f64 = rng.sample(StandardNormal);
        energy = DT_NEUTRON_ENERGY_MEV + sigma * z;
        if energy > 0.0 {
            return energy;
        }
    }
    energy.max(ENERGY_FLOOR_MEV)
}

/// Thread-safe neutron source sampler for one plasma.
#[derive(Debug)]
pub struct Sampler {
    params: PlasmaParameters,
    config: SamplerConfig,
    geometry: GeometryMapper,
    weighter: ReactivityWeighter,
    table: OnceLock<Result<EnvelopeTable, String>>,
}

impl Sampler {
    pub fn new(params: PlasmaParameters) -> Self {
        Self::build(params, SamplerConfig::default())
    }

    pub fn with_config(params: PlasmaParameters, config: SamplerConfig) -> SourceResult<Self> {
        if config.number_of_bins == 0 {
            return Err(SourceError::InvalidParameter {
                field: "number_of_bins",
                reason: "must be >= 1".to_string(),
            });
        }
        if config.max_rejections == 0 {
            return Err(SourceError::InvalidParameter {
                field: "max_rejections",
                reason: "must be >= 1".to_string(),
            });
        }
        Ok(Self::build(params, config))
    }

    fn build(params: PlasmaParameters, config: SamplerConfig) -> Self {
        let profiles = ProfileModel::new(&params);
        Self {
            geometry: GeometryMapper::new(&params),
            weighter: ReactivityWeighter::new(profiles),
            params,
            config,
            table: OnceLock::new(),
        }
    }

    pub fn params(&self) -> &PlasmaParameters {
        &self.params
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn geometry(&self) -> &GeometryMapper {
        &self.geometry
    }

    pub fn profiles(&self) -> &ProfileModel {
        self.weighter.profiles()
    }

    pub fn weighter(&self) -> &ReactivityWeighter {
        &self.weighter
    }

    /// Build the envelope table now instead of on the first sample.
    pub fn prepare(&self) -> SourceResult<()> {
        self.table().map(|_| ())
    }

    fn table(&self) -> SourceResult<&EnvelopeTable> {
        self.table
            .get_or_init(|| self.build_table())
            .as_ref()
            .map_err(|reason| SourceError::DegenerateProfile(reason.clone()))
    }

    fn build_table(&self) -> Result<EnvelopeTable, String> {
        let bins = self.config.number_of_bins;
        let bin_width = 1.0 / bins as f64;
        let mut envelope = Vec::with_capacity(bins);
        let mut cdf = Vec::with_capacity(bins);
        let mut total = 0.0;

        for i in 0..bins {
            let rho_lo = i as f64 * bin_width;
            let rho_hi = if i + 1 == bins {
                1.0
            } else {
                (i + 1) as f64 * bin_width
            };
            let weight_max = (0..=ENVELOPE_SUBSAMPLES)
                .map(|k| {
                    let rho = rho_lo + (rho_hi - rho_lo) * k as f64 / ENVELOPE_SUBSAMPLES as f64;
                    self.weighter.weight(rho)
                })
                .fold(0.0_f64, f64::max);
            let height = ENVELOPE_MARGIN * weight_max * self.geometry.jacobian_bound(rho_hi);
            envelope.push(height);
            total += height * bin_width;
            cdf.push(total);
        }

        if !(total.is_finite() && total > 0.0) {
            return Err(format!(
                "total emission weight is {total} over {bins} radial bins; \
                 check the temperature and density profiles"
            ));
        }
        for c in cdf.iter_mut() {
            *c /= total;
        }
        if let Some(last) = cdf.last_mut() {
            *last = 1.0;
        }

        debug!(
            plasma_id = self.params.plasma_id,
            bins,
            envelope_mass = total,
            "built neutron source envelope table"
        );

        Ok(EnvelopeTable {
            bin_width,
            envelope,
            cdf,
        })
    }

    /// Draw (ρ, θ) from the emission-weighted volume distribution.
    /// Returns the local ion temperature alongside.
    fn sample_poloidal<R: Rng + ?Sized>(&self, rng: &mut R) -> SourceResult<(f64, f64, f64)> {
        let table = self.table()?;
        let last_bin = table.cdf.len() - 1;

        for _ in 0..self.config.max_rejections {
            let u: f64 = rng.gen();
            let bin = table.cdf.partition_point(|&c| c < u).min(last_bin);
            let height = table.envelope[bin];
            if height <= 0.0 {
                continue;
            }

            let rho = ((bin as f64 + rng.gen::<f64>()) * table.bin_width).min(1.0);
            let theta = TAU * rng.gen::<f64>();
            let (density, temperature) = self.weighter.profiles().local(rho);
            let f = ReactivityWeighter::weight_from(density, temperature)
                * self.geometry.jacobian(rho, theta);

            if f > height {
                warn!(
                    rho,
                    theta,
                    ratio = f / height,
                    "emission density exceeds rejection envelope"
                );
            }
            if rng.gen::<f64>() * height < f {
                return Ok((rho, theta, temperature));
            }
        }

        Err(SourceError::DegenerateProfile(format!(
            "no position accepted after {} proposals",
            self.config.max_rejections
        )))
    }

    /// Sample one neutron and report the flux coordinate it was born at.
    pub fn sample_with_coordinate<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> SourceResult<(FluxCoordinate, SampledParticle)> {
        let (rho, theta, temperature) = self.sample_poloidal(rng)?;
        let coord = FluxCoordinate {
            rho,
            theta,
            phi: TAU * rng.gen::<f64>(),
        };
        let particle = SampledParticle {
            position: self.geometry.to_cartesian(&coord),
            direction: isotropic_direction(rng),
            energy_mev: sample_energy(temperature, rng),
        };
        Ok((coord, particle))
    }

    /// Sample one neutron birth site.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SourceResult<SampledParticle> {
        self.sample_with_coordinate(rng).map(|(_, particle)| particle)
    }

    pub fn sample_batch<R: Rng + ?Sized>(
        &self,
        n: usize,
        rng: &mut R,
    ) -> SourceResult<Vec<SampledParticle>> {
        (0..n).map(|_| self.sample(rng)).collect()
    }
}
