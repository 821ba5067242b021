//! Forward and inverse discrete Fourier transform by direct summation.
//!
//! The transform length `N` is the input length. Each free function builds
//! the matching kernel for that length and runs it once:
//!
//! - [`dft`]: real or complex signal to complex spectrum.
//! - [`idft`]: complex spectrum to real signal, imaginary residue dropped.
//! - [`idft_strict`]: as [`idft`], but imaginary residue above
//!   [`default_imaginary_tolerance`] is an error.
//! - [`idft_complex`]: complex spectrum to complex signal.
//!
//! Bin `k` of a length-`N` spectrum sits at `k/N` cycles per sample (see
//! [`bin_frequencies`]).

#[cfg(feature = "alloc")]
use crate::kernel::{KernelLifecycle, Read1D};
#[cfg(feature = "alloc")]
use crate::signal::traits::{Dft1D, DftSample, Idft1D};
#[cfg(feature = "alloc")]
use nalgebra::{Complex, RealField};
#[cfg(feature = "alloc")]
use ndarray::Array1;

mod kernels;
pub use kernels::*;

/// Absolute per-sample bound for `idft(dft(x)) ~= x` at transform length `len`.
///
/// The error of the direct sums grows with the `N^2` accumulated terms; for
/// unit-scale signals `1e-9 * N` is a comfortable envelope.
pub fn round_trip_tolerance(len: usize) -> f64 {
    1e-9 * len as f64
}

/// Forward DFT: `X[n] = sum_k x[k] * exp(-2*pi*i*k*n/N)`.
///
/// Accepts real (`f32`/`f64`) or complex samples. Fails with
/// [`Error::InvalidLength`](crate::Error) for an empty signal.
///
/// ```
/// use dft_rs::signal::dft::dft;
///
/// let x = dft(&[1.0f64, 0.0, 0.0, 0.0]).unwrap();
/// assert!(x.iter().all(|b| b.re == 1.0 && b.im == 0.0));
/// ```
#[cfg(feature = "alloc")]
pub fn dft<S, I>(signal: &I) -> crate::Result<Array1<Complex<S::Real>>>
where
    S: DftSample,
    I: Read1D<S> + ?Sized,
{
    let signal = signal.read_slice()?;
    tracing::debug!(len = signal.len(), "forward dft");
    let kernel = DftKernel::try_new(DftConfig { len: signal.len() })?;
    Ok(Array1::from(kernel.run_alloc(signal)?))
}

/// Inverse DFT to a real signal: `x[k] = (1/N) * sum_n X[n] * exp(2*pi*i*k*n/N)`.
///
/// The imaginary part of each reconstructed sample is dropped. Fails with
/// [`Error::InvalidLength`](crate::Error) for an empty spectrum.
#[cfg(feature = "alloc")]
pub fn idft<F, I>(spectrum: &I) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
    I: Read1D<Complex<F>> + ?Sized,
{
    inverse_real(spectrum, |_| ImaginaryPolicy::Discard)
}

/// Inverse DFT to a real signal, rejecting imaginary residue.
///
/// Fails with [`Error::NonNegligibleImaginary`](crate::Error) when a sample's
/// imaginary part exceeds [`default_imaginary_tolerance`] for the spectrum's
/// length and precision, relative to its peak magnitude (floor 1), i.e. when
/// the spectrum is not that of a real signal.
#[cfg(feature = "alloc")]
pub fn idft_strict<F, I>(spectrum: &I) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
    I: Read1D<Complex<F>> + ?Sized,
{
    inverse_real(spectrum, |len| ImaginaryPolicy::Reject {
        tolerance: default_imaginary_tolerance::<F>(len),
    })
}

#[cfg(feature = "alloc")]
fn inverse_real<F, I, P>(spectrum: &I, policy: P) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
    I: Read1D<Complex<F>> + ?Sized,
    P: FnOnce(usize) -> ImaginaryPolicy<F>,
{
    let spectrum = spectrum.read_slice()?;
    tracing::debug!(len = spectrum.len(), "inverse dft");
    let imaginary = policy(spectrum.len());
    let kernel = IdftKernel::try_new(IdftConfig {
        len: spectrum.len(),
        imaginary,
    })?;
    Ok(Array1::from(kernel.run_alloc(spectrum)?))
}

/// Inverse DFT keeping the complex reconstruction.
#[cfg(feature = "alloc")]
pub fn idft_complex<F, I>(spectrum: &I) -> crate::Result<Array1<Complex<F>>>
where
    F: RealField + Copy,
    I: Read1D<Complex<F>> + ?Sized,
{
    let spectrum = spectrum.read_slice()?;
    tracing::debug!(len = spectrum.len(), "inverse dft (complex)");
    let kernel = IdftKernel::try_new(IdftConfig {
        len: spectrum.len(),
        imaginary: ImaginaryPolicy::Discard,
    })?;
    Ok(Array1::from(kernel.run_complex_alloc(spectrum)?))
}

/// Frequency of each bin of a length-`len` spectrum, `k/len` cycles per sample.
#[cfg(feature = "alloc")]
pub fn bin_frequencies<F>(len: usize) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
{
    crate::kernel::ensure_nonzero_len("len", len)?;
    let n = nalgebra::convert::<f64, F>(len as f64);
    Ok((0..len)
        .map(|k| nalgebra::convert::<f64, F>(k as f64) / n)
        .collect())
}

/// Split a spectrum into its real and imaginary parts.
#[cfg(feature = "alloc")]
pub fn split_parts<F>(spectrum: &[Complex<F>]) -> (Array1<F>, Array1<F>)
where
    F: RealField + Copy,
{
    (
        spectrum.iter().map(|z| z.re).collect(),
        spectrum.iter().map(|z| z.im).collect(),
    )
}
