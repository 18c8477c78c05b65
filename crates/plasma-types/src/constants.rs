// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Mean D-T neutron birth energy (MeV).
pub const DT_NEUTRON_ENERGY_MEV: f64 = 14.08;

/// Neutron mass (u).
pub const NEUTRON_MASS_AMU: f64 = 1.008_664_916;

/// Alpha particle mass (u).
pub const ALPHA_MASS_AMU: f64 = 4.001_506_179;

/// keV per MeV.
pub const KEV_PER_MEV: f64 = 1.0e3;

/// Bosch-Hale D-T Gamow constant B_G (keV^1/2).
pub const BOSCH_HALE_DT_BG: f64 = 34.3827;

/// Bosch-Hale D-T reduced mass energy m_r c² (keV).
pub const BOSCH_HALE_DT_MRC2: f64 = 1_124_656.0;

/// Bosch-Hale D-T fit coefficients C1..C7 (C1 in cm³/s).
pub const BOSCH_HALE_DT_C: [f64; 7] = [
    1.17302e-9,
    1.51361e-2,
    7.51886e-2,
    4.60643e-3,
    1.35000e-2,
    -1.06750e-4,
    1.36600e-5,
];

/// cm³ to m³.
pub const CM3_TO_M3: f64 = 1.0e-6;
