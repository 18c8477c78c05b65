// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Python Bindings
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! PyO3 Python bindings for the parametric plasma source.
//!
//! `str(PlasmaSource(...))` is the interchange string a transport engine's
//! source configuration passes to the sampling library, and
//! `SOURCE_SAMPLING_PATH` is where that library is installed: next to this
//! extension module.

use std::path::PathBuf;

use numpy::{IntoPyArray, PyArray2};
use pyo3::exceptions::{PyAttributeError, PyIOError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use plasma_core::output::{profiles_to_array, samples_to_array, write_samples_npy};
use plasma_core::sampler::Sampler;
use plasma_source_sampling::library_path;
use plasma_types::codec::{decode, encode};
use plasma_types::error::SourceError;
use plasma_types::params::{ParameterSet, PlasmaParameters};

fn to_py_err(e: SourceError) -> PyErr {
    match e {
        SourceError::Io(_) => PyIOError::new_err(e.to_string()),
        SourceError::DegenerateProfile(_) => PyRuntimeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

fn seeded(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Parametric tokamak plasma neutron source.
#[pyclass(name = "PlasmaSource", frozen)]
struct PyPlasmaSource {
    sampler: Sampler,
}

#[pymethods]
impl PyPlasmaSource {
    #[new]
    #[pyo3(signature = (
        *,
        major_radius,
        minor_radius,
        pedestal_radius,
        elongation,
        triangularity,
        shafranov_shift,
        ion_density_origin,
        ion_density_pedestal,
        ion_density_separatrix,
        ion_density_peaking_factor,
        ion_temperature_origin,
        ion_temperature_pedestal,
        ion_temperature_separatrix,
        ion_temperature_peaking_factor,
        ion_temperature_beta,
        plasma_id = 0,
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        major_radius: f64,
        minor_radius: f64,
        pedestal_radius: f64,
        elongation: f64,
        triangularity: f64,
        shafranov_shift: f64,
        ion_density_origin: f64,
        ion_density_pedestal: f64,
        ion_density_separatrix: f64,
        ion_density_peaking_factor: f64,
        ion_temperature_origin: f64,
        ion_temperature_pedestal: f64,
        ion_temperature_separatrix: f64,
        ion_temperature_peaking_factor: f64,
        ion_temperature_beta: f64,
        plasma_id: u32,
    ) -> PyResult<Self> {
        let params = PlasmaParameters::new(ParameterSet {
            major_radius,
            minor_radius,
            pedestal_radius,
            elongation,
            triangularity,
            shafranov_shift,
            plasma_id,
            ion_density_origin,
            ion_density_pedestal,
            ion_density_separatrix,
            ion_density_peaking_factor,
            ion_temperature_origin,
            ion_temperature_pedestal,
            ion_temperature_separatrix,
            ion_temperature_peaking_factor,
            ion_temperature_beta,
        })
        .map_err(to_py_err)?;
        Ok(Self {
            sampler: Sampler::new(params),
        })
    }

    /// Rebuild a source from its interchange string.
    #[staticmethod]
    fn from_string(text: &str) -> PyResult<Self> {
        let params = decode(text).map_err(to_py_err)?;
        Ok(Self {
            sampler: Sampler::new(params),
        })
    }

    /// Load parameters from a JSON file.
    #[staticmethod]
    fn from_json(path: &str) -> PyResult<Self> {
        let params = PlasmaParameters::from_json_file(path).map_err(to_py_err)?;
        Ok(Self {
            sampler: Sampler::new(params),
        })
    }

    fn to_json(&self) -> PyResult<String> {
        self.sampler.params().to_json_string().map_err(to_py_err)
    }

    fn __str__(&self) -> String {
        encode(self.sampler.params())
    }

    fn __repr__(&self) -> String {
        format!("PlasmaSource({})", encode(self.sampler.params()))
    }

    #[getter]
    fn plasma_id(&self) -> u32 {
        self.sampler.params().plasma_id
    }

    /// One neutron: ((x, y, z), (u, v, w), energy [MeV]).
    #[pyo3(signature = (seed = None))]
    fn sample(&self, seed: Option<u64>) -> PyResult<([f64; 3], [f64; 3], f64)> {
        let mut rng = seeded(seed);
        let p = self.sampler.sample(&mut rng).map_err(to_py_err)?;
        Ok((p.position, p.direction, p.energy_mev))
    }

    /// `n` neutrons as an `[n, 7]` array of x, y, z, u, v, w, E [MeV].
    #[pyo3(signature = (n, seed = None))]
    fn sample_array<'py>(
        &self,
        py: Python<'py>,
        n: usize,
        seed: Option<u64>,
    ) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let mut rng = seeded(seed);
        let samples = py
            .allow_threads(|| self.sampler.sample_batch(n, &mut rng))
            .map_err(to_py_err)?;
        Ok(samples_to_array(&samples).into_pyarray(py))
    }

    /// Sample `n` neutrons and write them to an `.npy` file.
    #[pyo3(signature = (n, path, seed = None))]
    fn write_samples(&self, py: Python<'_>, n: usize, path: &str, seed: Option<u64>) -> PyResult<()> {
        let mut rng = seeded(seed);
        py.allow_threads(|| {
            let samples = self.sampler.sample_batch(n, &mut rng)?;
            write_samples_npy(path, &samples)
        })
        .map_err(to_py_err)
    }

    /// Ion profiles on `n` points as an `[n, 3]` array of ρ, n_i, T_i.
    #[pyo3(signature = (n = 101))]
    fn profiles<'py>(&self, py: Python<'py>, n: usize) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let table = self.sampler.profiles().tabulate(n).map_err(to_py_err)?;
        Ok(profiles_to_array(&table).into_pyarray(py))
    }

    /// Total neutron emission rate [1/s] (lengths in metres).
    fn neutron_rate(&self) -> f64 {
        self.sampler
            .weighter()
            .total_neutron_rate(self.sampler.geometry(), 200, 128)
    }
}

/// Module attributes resolved on access. `__file__` is only set once module
/// initialization has returned, so the library path cannot be a plain constant.
#[pyfunction(pass_module)]
#[pyo3(name = "__getattr__")]
fn module_getattr(module: &Bound<'_, PyModule>, name: &str) -> PyResult<String> {
    match name {
        "SOURCE_SAMPLING_PATH" => {
            let module_file: PathBuf = module.getattr("__file__")?.extract()?;
            Ok(library_path(&module_file).to_string_lossy().into_owned())
        }
        _ => Err(PyAttributeError::new_err(format!(
            "module 'parametric_plasma_source' has no attribute '{name}'"
        ))),
    }
}

#[pymodule]
fn parametric_plasma_source(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyPlasmaSource>()?;
    m.add_function(wrap_pyfunction!(module_getattr, m)?)?;
    Ok(())
}
