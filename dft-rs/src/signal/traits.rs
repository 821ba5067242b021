//! Trait interfaces for the generator and transform capabilities.
//!
//! Every capability has a `run_into` form writing into a caller-provided
//! buffer and, with the `alloc` feature, a `run_alloc` form returning a fresh
//! `Vec`.

use crate::kernel::{ExecInvariantViolation, Read1D, Write1D};
use nalgebra::{Complex, RealField};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Element types accepted by the forward transform.
///
/// Real samples are lifted onto the real axis; complex samples pass through.
pub trait DftSample: Copy + Send + Sync {
    /// Real scalar of the transform.
    type Real: RealField + Copy;

    /// View this sample as a complex number.
    fn to_complex(self) -> Complex<Self::Real>;
}

macro_rules! impl_dft_sample {
    ($($t:ty),*) => {
        $(
            impl DftSample for $t {
                type Real = $t;

                #[inline]
                fn to_complex(self) -> Complex<$t> {
                    Complex::new(self, 0.0)
                }
            }

            impl DftSample for Complex<$t> {
                type Real = $t;

                #[inline]
                fn to_complex(self) -> Complex<$t> {
                    self
                }
            }
        )*
    };
}

impl_dft_sample!(f32, f64);

/// 1D sinusoid (cosine/sine) generation capability.
pub trait Sinusoid1D<T> {
    /// Generate the sinusoid into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate the sinusoid and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// 1D rectangular pulse generation capability.
pub trait BoxPulse1D<T> {
    /// Generate the pulse into a caller-provided output buffer.
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized;

    /// Generate the pulse and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation>;
}

/// 1D forward discrete Fourier transform capability.
pub trait Dft1D<S>
where
    S: DftSample,
{
    /// Transform `input` into a caller-provided spectrum buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<S> + ?Sized,
        O: Write1D<Complex<S::Real>> + ?Sized;

    /// Transform `input` and allocate the spectrum.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<S::Real>>, ExecInvariantViolation>
    where
        I: Read1D<S> + ?Sized;
}

/// 1D inverse discrete Fourier transform capability.
pub trait Idft1D<F>
where
    F: RealField + Copy,
{
    /// Reconstruct a real signal into a caller-provided buffer.
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<F> + ?Sized;

    /// Reconstruct a real signal and allocate output.
    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized;

    /// Reconstruct the complex signal, imaginary part included.
    fn run_complex_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized;

    /// Reconstruct the complex signal and allocate output.
    #[cfg(feature = "alloc")]
    fn run_complex_alloc<I>(&self, input: &I) -> Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized;
}
