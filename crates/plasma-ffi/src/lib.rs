// ─────────────────────────────────────────────────────────────────────
// Parametric Plasma Source — Source Sampling Artifact
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! C ABI entry points loaded by an external Monte Carlo transport engine.
//!
//! The host hands over the interchange string once, then calls
//! [`plasma_source_sample`] for every source particle with a pointer to the
//! particle's seed. Every random number the source consumes is one step of
//! the host's own 63-bit linear congruential stream, taken from and written
//! back to that seed, so threads never share generator state and the host's
//! stream position stays well defined. Sites are reported in the host's
//! units: positions in cm (parameters in metres), energies in eV. See
//! `include/plasma_source.h` for the C declarations.

use std::cell::RefCell;
use std::ffi::{c_char, c_int, CStr, CString};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::ptr;

use plasma_core::sampler::Sampler;
use plasma_types::codec::decode;
use plasma_types::error::{SourceError, SourceResult};
use plasma_types::state::SampledParticle;
use rand::RngCore;
use tracing::error;

/// eV per MeV; hosts track energies in eV.
const EV_PER_MEV: f64 = 1.0e6;

/// cm per metre; hosts track lengths in cm.
const CM_PER_M: f64 = 100.0;

/// Host stream: seed' = (g·seed + c) mod 2⁶³.
const LCG_MULT: u64 = 2_806_196_910_506_780_709;
const LCG_ADD: u64 = 1;
const LCG_MASK: u64 = (1 << 63) - 1;

/// File name of this artifact on the build platform.
#[cfg(target_os = "windows")]
pub const LIBRARY_FILE_NAME: &str = "plasma_source_sampling.dll";
#[cfg(target_os = "macos")]
pub const LIBRARY_FILE_NAME: &str = "libplasma_source_sampling.dylib";
#[cfg(not(any(target_os = "windows", target_os = "macos")))]
pub const LIBRARY_FILE_NAME: &str = "libplasma_source_sampling.so";

/// Absolute path of the artifact installed in the same directory as
/// `sibling`, e.g. the Python extension module file.
pub fn library_path(sibling: &Path) -> PathBuf {
    let dir = match sibling.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::canonicalize(dir)
        .unwrap_or_else(|_| dir.to_path_buf())
        .join(LIBRARY_FILE_NAME)
}

pub const PLASMA_SOURCE_OK: c_int = 0;
pub const PLASMA_SOURCE_NULL_ARGUMENT: c_int = 1;
pub const PLASMA_SOURCE_SAMPLING_FAILED: c_int = 2;
pub const PLASMA_SOURCE_PANIC: c_int = 3;

/// One source site in the layout the host reads.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceSite {
    /// Position [cm].
    pub r: [f64; 3],
    /// Unit direction.
    pub u: [f64; 3],
    /// Energy [eV].
    pub e: f64,
    /// Statistical weight, always 1.
    pub wgt: f64,
}

impl From<SampledParticle> for SourceSite {
    fn from(p: SampledParticle) -> Self {
        Self {
            r: p.position.map(|x| x * CM_PER_M),
            u: p.direction,
            e: p.energy_mev * EV_PER_MEV,
            wgt: SampledParticle::WEIGHT,
        }
    }
}

/// The host's linear congruential stream, advanced in place through its
/// seed. Each `next_u64` is exactly one step; the returned bits are the 63-bit
/// state shifted to the top, so a uniform `f64` matches the host's own
/// `seed / 2⁶³` draw.
#[derive(Debug)]
pub struct HostStream<'a> {
    seed: &'a mut u64,
}

impl<'a> HostStream<'a> {
    pub fn new(seed: &'a mut u64) -> Self {
        Self { seed }
    }

    /// One step of the host generator.
    pub fn step(seed: u64) -> u64 {
        LCG_MULT.wrapping_mul(seed).wrapping_add(LCG_ADD) & LCG_MASK
    }
}

impl RngCore for HostStream<'_> {
    fn next_u32(&mut self) -> u32 {
        (self.next_u64() >> 32) as u32
    }

    fn next_u64(&mut self) -> u64 {
        *self.seed = Self::step(*self.seed);
        *self.seed << 1
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Loaded plasma source. Owned by the host through an opaque pointer.
#[derive(Debug)]
pub struct PlasmaSource {
    sampler: Sampler,
}

impl PlasmaSource {
    /// Decode the interchange string and build the envelope table up front,
    /// so configuration problems surface before the first particle.
    pub fn from_parameter_string(text: &str) -> SourceResult<Self> {
        let sampler = Sampler::new(decode(text)?);
        sampler.prepare()?;
        Ok(Self { sampler })
    }

    pub fn sampler(&self) -> &Sampler {
        &self.sampler
    }

    /// Sample one site from the host stream held in `seed`, advancing it by
    /// one step per random number consumed.
    pub fn sample_site(&self, seed: &mut u64) -> SourceResult<SourceSite> {
        let particle = self.sampler.sample(&mut HostStream::new(seed))?;
        Ok(particle.into())
    }
}

thread_local! {
    static LAST_ERROR: RefCell<Option<CString>> = const { RefCell::new(None) };
}

fn set_last_error(message: String) {
    error!(%message, "plasma source call failed");
    let c_message = CString::new(message.replace('\0', " ")).unwrap_or_default();
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(c_message));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

/// Create a source from a NUL-terminated interchange string.
/// Returns null on failure; see [`plasma_source_last_error`].
///
/// # Safety
/// `parameters` must be null or point to a valid NUL-terminated string.
#[no_mangle]
pub unsafe extern "C" fn plasma_source_create(parameters: *const c_char) -> *mut PlasmaSource {
    clear_last_error();
    if parameters.is_null() {
        set_last_error("parameter string pointer is null".to_string());
        return ptr::null_mut();
    }
    let text = match CStr::from_ptr(parameters).to_str() {
        Ok(text) => text,
        Err(e) => {
            set_last_error(SourceError::Parse(format!("parameter string is not UTF-8: {e}")).to_string());
            return ptr::null_mut();
        }
    };
    match catch_unwind(|| PlasmaSource::from_parameter_string(text)) {
        Ok(Ok(source)) => Box::into_raw(Box::new(source)),
        Ok(Err(e)) => {
            set_last_error(e.to_string());
            ptr::null_mut()
        }
        Err(_) => {
            set_last_error("panic while creating plasma source".to_string());
            ptr::null_mut()
        }
    }
}

/// Sample one source site into `site`, advancing `*seed`.
///
/// # Safety
/// `source` must come from [`plasma_source_create`] and not yet be freed.
/// `seed` and `site` must be valid for reads/writes. Concurrent calls on one
/// `source` are allowed as long as each thread passes its own `seed`.
#[no_mangle]
pub unsafe extern "C" fn plasma_source_sample(
    source: *const PlasmaSource,
    seed: *mut u64,
    site: *mut SourceSite,
) -> c_int {
    if source.is_null() || seed.is_null() || site.is_null() {
        set_last_error("null argument to plasma_source_sample".to_string());
        return PLASMA_SOURCE_NULL_ARGUMENT;
    }
    let source = &*source;
    let seed = &mut *seed;
    match catch_unwind(AssertUnwindSafe(|| source.sample_site(seed))) {
        Ok(Ok(sampled)) => {
            site.write(sampled);
            PLASMA_SOURCE_OK
        }
        Ok(Err(e)) => {
            set_last_error(e.to_string());
            PLASMA_SOURCE_SAMPLING_FAILED
        }
        Err(_) => {
            set_last_error("panic while sampling plasma source".to_string());
            PLASMA_SOURCE_PANIC
        }
    }
}

/// Release a source. Null is ignored.
///
/// # Safety
/// `source` must be null or come from [`plasma_source_create`], and must not
/// be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn plasma_source_free(source: *mut PlasmaSource) {
    if !source.is_null() {
        drop(Box::from_raw(source));
    }
}

/// Last error message on the calling thread, or null.
/// The pointer stays valid until the next failing call on this thread.
#[no_mangle]
pub extern "C" fn plasma_source_last_error() -> *const c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_ref()
            .map_or(ptr::null(), |message| message.as_ptr())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use plasma_types::codec::encode;
    use plasma_types::params::{ParameterSet, PlasmaParameters};

    fn reference_text() -> String {
        encode(&PlasmaParameters::new(ParameterSet::default()).unwrap())
    }

    #[test]
    fn test_seed_advances_and_reproduces() {
        let source = PlasmaSource::from_parameter_string(&reference_text()).unwrap();
        let mut seed_a = 12345;
        let mut seed_b = 12345;
        let a = source.sample_site(&mut seed_a).unwrap();
        let b = source.sample_site(&mut seed_b).unwrap();
        assert_eq!(a, b);
        assert_eq!(seed_a, seed_b);
        assert_ne!(seed_a, 12345);
        let c = source.sample_site(&mut seed_a).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn test_site_units() {
        let source = PlasmaSource::from_parameter_string(&reference_text()).unwrap();
        let mut seed = 1;
        for _ in 0..1_000 {
            let site = source.sample_site(&mut seed).unwrap();
            assert!(site.e > 10.0e6 && site.e < 18.0e6, "E = {} eV", site.e);
            assert_eq!(site.wgt, 1.0);
            // Reference plasma spans R = 6.14..11.98 m.
            let r_major = site.r[0].hypot(site.r[1]);
            assert!(r_major > 614.0 && r_major < 1242.0, "R = {r_major} cm");
            assert!(site.r[2].abs() <= 1.557 * 292.258 + 1e-9);
        }
    }

    #[test]
    fn test_host_stream_steps_once_per_draw() {
        let mut seed = 42;
        let mut stream = HostStream::new(&mut seed);
        let bits = stream.next_u64();
        let expected = (2_806_196_910_506_780_709u64.wrapping_mul(42) + 1) & ((1 << 63) - 1);
        assert_eq!(seed, expected);
        assert_eq!(bits, expected << 1);

        let mut seed = 42;
        let mut stream = HostStream::new(&mut seed);
        let mut bytes = [0u8; 12];
        stream.fill_bytes(&mut bytes);
        assert_eq!(seed, HostStream::step(HostStream::step(42)));
    }

    #[test]
    fn test_sample_site_leaves_seed_on_host_stream() {
        let source = PlasmaSource::from_parameter_string(&reference_text()).unwrap();
        let start = 987_654_321;
        let mut seed = start;
        source.sample_site(&mut seed).unwrap();

        let mut walked = start;
        let steps = (1..=10_000).find(|_| {
            walked = HostStream::step(walked);
            walked == seed
        });
        assert!(steps.is_some(), "seed left the host stream");
    }

    #[test]
    fn test_library_path_is_absolute_sibling() {
        let dir = std::env::temp_dir();
        let path = library_path(&dir.join("parametric_plasma_source.so"));
        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), LIBRARY_FILE_NAME);
        assert_eq!(path.parent().unwrap(), std::fs::canonicalize(&dir).unwrap());

        let bare = library_path(Path::new("parametric_plasma_source.so"));
        assert!(bare.is_absolute());
        assert!(bare.ends_with(LIBRARY_FILE_NAME));
    }

    #[test]
    fn test_bad_string_rejected() {
        assert!(PlasmaSource::from_parameter_string("major_radius=9.06").is_err());
    }
}
