// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Plasma Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Neutron source sampling kernels.
//!
//! Leaf-first: profiles, geometry, reactivity, then the sampler that
//! composes them. Sample dumps live in `output`.

pub mod geometry;
pub mod output;
pub mod profiles;
pub mod reactivity;
pub mod sampler;
