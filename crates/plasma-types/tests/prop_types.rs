// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Property-Based Tests (proptest) for plasma-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for plasma-types using proptest.
//!
//! Covers: parameter validation invariants, interchange codec roundtrip.

use plasma_types::codec::{decode, encode, FIELD_NAMES};
use plasma_types::error::SourceError;
use plasma_types::params::{ParameterSet, PlasmaParameters};
use proptest::prelude::*;

prop_compose! {
    fn shape()(
        major_radius in 2.0f64..12.0,
        minor_frac in 0.1f64..0.45,
        pedestal_frac in 0.5f64..0.97,
        elongation in 0.8f64..2.2,
        triangularity in -0.6f64..0.6,
        shift_frac in -0.3f64..0.3,
        plasma_id in 0u32..1000,
    ) -> (f64, f64, f64, f64, f64, f64, u32) {
        let minor_radius = major_radius * minor_frac;
        (
            major_radius,
            minor_radius,
            minor_radius * pedestal_frac,
            elongation,
            triangularity,
            minor_radius * shift_frac,
            plasma_id,
        )
    }
}

prop_compose! {
    fn density()(
        n0 in 1e19f64..3e20,
        n_ped_frac in 0.2f64..1.0,
        n_sep_frac in 0.0f64..1.0,
        alpha_n in 0.1f64..4.0,
    ) -> [f64; 4] {
        let n_ped = n0 * n_ped_frac;
        [n0, n_ped, n_ped * n_sep_frac, alpha_n]
    }
}

prop_compose! {
    fn temperature()(
        t0 in 1.0f64..60.0,
        t_ped_frac in 0.05f64..1.0,
        t_sep_frac in 0.0f64..1.0,
        alpha_t in 0.1f64..10.0,
        beta_t in 0.5f64..8.0,
    ) -> [f64; 5] {
        let t_ped = t0 * t_ped_frac;
        [t0, t_ped, t_ped * t_sep_frac, alpha_t, beta_t]
    }
}

prop_compose! {
    fn valid_set()(
        g in shape(),
        n in density(),
        t in temperature(),
    ) -> ParameterSet {
        ParameterSet {
            major_radius: g.0,
            minor_radius: g.1,
            pedestal_radius: g.2,
            elongation: g.3,
            triangularity: g.4,
            shafranov_shift: g.5,
            plasma_id: g.6,
            ion_density_origin: n[0],
            ion_density_pedestal: n[1],
            ion_density_separatrix: n[2],
            ion_density_peaking_factor: n[3],
            ion_temperature_origin: t[0],
            ion_temperature_pedestal: t[1],
            ion_temperature_separatrix: t[2],
            ion_temperature_peaking_factor: t[3],
            ion_temperature_beta: t[4],
        }
    }
}

// ── Validation Invariants ────────────────────────────────────────────

proptest! {
    /// Every parameter set respecting the documented ordering is accepted.
    #[test]
    fn ordered_sets_are_valid(set in valid_set()) {
        prop_assert!(PlasmaParameters::new(set).is_ok());
    }

    /// A separatrix density above the pedestal is always rejected.
    #[test]
    fn inverted_density_rejected(set in valid_set(), excess in 1.01f64..3.0) {
        let set = ParameterSet {
            ion_density_separatrix: set.ion_density_pedestal * excess,
            ..set
        };
        let rejected = matches!(
            PlasmaParameters::new(set),
            Err(SourceError::InvalidParameter { field: "ion_density_separatrix", .. })
        );
        prop_assert!(rejected);
    }

    /// Pedestal at or beyond the boundary is always rejected.
    #[test]
    fn pedestal_beyond_boundary_rejected(set in valid_set(), frac in 1.0f64..2.0) {
        let set = ParameterSet {
            pedestal_radius: set.minor_radius * frac,
            ..set
        };
        prop_assert!(PlasmaParameters::new(set).is_err());
    }
}

// ── Codec Roundtrip ──────────────────────────────────────────────────

proptest! {
    /// decode(encode(p)) == p bit-for-bit.
    #[test]
    fn decode_encode_identity(set in valid_set()) {
        let params = PlasmaParameters::new(set).unwrap();
        let text = encode(&params);
        let back = decode(&text).unwrap();
        prop_assert_eq!(params, back);
    }

    /// encode(decode(s)) == s for canonical strings.
    #[test]
    fn encode_decode_identity(set in valid_set()) {
        let text = encode(&PlasmaParameters::new(set).unwrap());
        prop_assert_eq!(encode(&decode(&text).unwrap()), text);
    }

    /// Encoded strings always name all 16 fields exactly once.
    #[test]
    fn encoded_names_every_field(set in valid_set()) {
        let text = encode(&PlasmaParameters::new(set).unwrap());
        prop_assert_eq!(text.split(", ").count(), 16);
        for name in FIELD_NAMES {
            let needle = format!("{name}=");
            let hits = text
                .split(", ")
                .filter(|entry| entry.starts_with(&needle))
                .count();
            prop_assert_eq!(hits, 1, "{} appears {} times", name, hits);
        }
    }

    /// Dropping any one key yields MissingKey for exactly that key.
    #[test]
    fn dropped_key_reported(set in valid_set(), index in 0usize..16) {
        let text = encode(&PlasmaParameters::new(set).unwrap());
        let kept: Vec<&str> = text
            .split(", ")
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, e)| e)
            .collect();
        match decode(&kept.join(", ")) {
            Err(SourceError::MissingKey(key)) => prop_assert_eq!(key, FIELD_NAMES[index]),
            other => prop_assert!(false, "expected MissingKey, got {:?}", other),
        }
    }
}
