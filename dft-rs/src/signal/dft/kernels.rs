//! Trait-first kernels for the direct-summation transform pair.

use crate::kernel::{
    ensure_len, ensure_nonzero_len, fill_indexed, ConfigError, ExecInvariantViolation,
    KernelLifecycle, Read1D, Write1D,
};
use crate::signal::traits::{Dft1D, DftSample, Idft1D};
use nalgebra::{Complex, RealField};
use num_traits::Zero;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Floor of the relative bound returned by [`default_imaginary_tolerance`].
pub const DEFAULT_IMAGINARY_TOLERANCE: f64 = 1e-9;

/// Relative imaginary-residue bound for a length-`len` inverse in precision `F`.
///
/// `max(DEFAULT_IMAGINARY_TOLERANCE, 16 * len * eps)` where `eps` is the
/// machine epsilon of `F`. Rounding in the direct sums grows with `len`; for
/// `f32` the epsilon term is always the larger one.
pub fn default_imaginary_tolerance<F>(len: usize) -> F
where
    F: RealField + Copy,
{
    let floor = nalgebra::convert::<f64, F>(DEFAULT_IMAGINARY_TOLERANCE);
    let rounding = <F as approx::AbsDiffEq>::default_epsilon()
        * nalgebra::convert::<f64, F>(16.0 * len as f64);
    if rounding > floor {
        rounding
    } else {
        floor
    }
}

/// Sign of the basis exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Inverse,
}

/// `exp(sign * 2*pi*i * k*n / N)`, evaluated from the closed form.
///
/// `k*n` is reduced modulo `N` in integers before it becomes an angle, which
/// is exact and keeps the angle in `[0, 2*pi)`.
fn basis<F>(len: usize, k: usize, n: usize, direction: Direction) -> Complex<F>
where
    F: RealField + Copy,
{
    let step = ((k as u128 * n as u128) % len as u128) as f64;
    let angle = F::two_pi() * nalgebra::convert::<f64, F>(step)
        / nalgebra::convert::<f64, F>(len as f64);
    match direction {
        Direction::Forward => Complex::new(angle.cos(), -angle.sin()),
        Direction::Inverse => Complex::new(angle.cos(), angle.sin()),
    }
}

/// Constructor config for [`DftKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DftConfig {
    /// Transform length `N`.
    pub len: usize,
}

/// Forward DFT of fixed length by direct summation.
///
/// `X[n] = sum_k x[k] * exp(-2*pi*i*k*n/N)`. Every bin is a full pass over
/// the input; nothing is cached between bins or calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DftKernel {
    len: usize,
}

impl DftKernel {
    /// Return the transform length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed kernel.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(super) fn bin<S>(&self, input: &[S], n: usize) -> Complex<S::Real>
    where
        S: DftSample,
    {
        let zero = Complex::new(S::Real::zero(), S::Real::zero());
        input.iter().enumerate().fold(zero, |acc, (k, x)| {
            acc + x.to_complex() * basis::<S::Real>(self.len, k, n, Direction::Forward)
        })
    }
}

impl KernelLifecycle for DftKernel {
    type Config = DftConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        ensure_nonzero_len("len", config.len)?;
        Ok(Self { len: config.len })
    }
}

impl<S> Dft1D<S> for DftKernel
where
    S: DftSample,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<S> + ?Sized,
        O: Write1D<Complex<S::Real>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        ensure_len("input", self.len, input.len())?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        ensure_len("out", self.len, out.len())?;
        fill_indexed(out, |n| self.bin(input, n));
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<Complex<S::Real>>, ExecInvariantViolation>
    where
        I: Read1D<S> + ?Sized,
    {
        let zero = Complex::new(S::Real::zero(), S::Real::zero());
        let mut out = alloc::vec![zero; self.len];
        <Self as Dft1D<S>>::run_into(self, input, out.as_mut_slice())?;
        Ok(out)
    }
}

/// What an inverse transform does with the imaginary part of its output
/// when a real signal is requested.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ImaginaryPolicy<F> {
    /// Keep the real part, drop the imaginary part unexamined.
    #[default]
    Discard,
    /// Fail if any `|imag|` exceeds `tolerance * max(1, max_n |X[n]|)`.
    Reject {
        /// Relative tolerance; finite and non-negative.
        tolerance: F,
    },
}

/// Constructor config for [`IdftKernel`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdftConfig<F> {
    /// Transform length `N`.
    pub len: usize,
    /// Handling of imaginary residue in real output.
    pub imaginary: ImaginaryPolicy<F>,
}

/// Inverse DFT of fixed length by direct summation.
///
/// `x[k] = (1/N) * sum_n X[n] * exp(+2*pi*i*k*n/N)`, the `1/N` applied to
/// each output sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdftKernel<F>
where
    F: RealField + Copy,
{
    len: usize,
    inv_len: F,
    imaginary: ImaginaryPolicy<F>,
}

impl<F> IdftKernel<F>
where
    F: RealField + Copy,
{
    /// Return the transform length.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed kernel.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the configured imaginary-part handling.
    pub fn imaginary_policy(&self) -> ImaginaryPolicy<F> {
        self.imaginary
    }

    pub(super) fn sample(&self, input: &[Complex<F>], k: usize) -> Complex<F> {
        let zero = Complex::new(F::zero(), F::zero());
        let sum = input.iter().enumerate().fold(zero, |acc, (n, x)| {
            acc + *x * basis::<F>(self.len, k, n, Direction::Inverse)
        });
        sum * self.inv_len
    }

    fn imaginary_threshold(&self, input: &[Complex<F>], tolerance: F) -> F {
        let peak = input
            .iter()
            .map(|x| x.norm_sqr().sqrt())
            .fold(F::one(), |a, b| if b > a { b } else { a });
        tolerance * peak
    }
}

impl<F> KernelLifecycle for IdftKernel<F>
where
    F: RealField + Copy,
{
    type Config = IdftConfig<F>;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        ensure_nonzero_len("len", config.len)?;
        if let ImaginaryPolicy::Reject { tolerance } = config.imaginary {
            if !tolerance.is_finite() || tolerance < F::zero() {
                return Err(ConfigError::InvalidTolerance { arg: "tolerance" });
            }
        }
        Ok(Self {
            len: config.len,
            inv_len: F::one() / nalgebra::convert::<f64, F>(config.len as f64),
            imaginary: config.imaginary,
        })
    }
}

impl<F> Idft1D<F> for IdftKernel<F>
where
    F: RealField + Copy,
{
    fn run_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<F> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        ensure_len("input", self.len, input.len())?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        ensure_len("out", self.len, out.len())?;

        match self.imaginary {
            ImaginaryPolicy::Discard => fill_indexed(out, |k| self.sample(input, k).re),
            ImaginaryPolicy::Reject { tolerance } => {
                let threshold = self.imaginary_threshold(input, tolerance);
                for (k, slot) in out.iter_mut().enumerate() {
                    let x = self.sample(input, k);
                    if x.im.abs() > threshold {
                        return Err(ExecInvariantViolation::NonNegligibleImaginary { index: k });
                    }
                    *slot = x.re;
                }
            }
        }
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc<I>(&self, input: &I) -> Result<Vec<F>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let mut out = alloc::vec![F::zero(); self.len];
        self.run_into(input, out.as_mut_slice())?;
        Ok(out)
    }

    fn run_complex_into<I, O>(&self, input: &I, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
        O: Write1D<Complex<F>> + ?Sized,
    {
        let input = input.read_slice().map_err(ExecInvariantViolation::from)?;
        ensure_len("input", self.len, input.len())?;
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        ensure_len("out", self.len, out.len())?;
        fill_indexed(out, |k| self.sample(input, k));
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_complex_alloc<I>(&self, input: &I) -> Result<Vec<Complex<F>>, ExecInvariantViolation>
    where
        I: Read1D<Complex<F>> + ?Sized,
    {
        let mut out = alloc::vec![Complex::new(F::zero(), F::zero()); self.len];
        self.run_complex_into(input, out.as_mut_slice())?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::{
        default_imaginary_tolerance, DftConfig, DftKernel, IdftConfig, IdftKernel,
        ImaginaryPolicy, DEFAULT_IMAGINARY_TOLERANCE,
    };
    use crate::kernel::{ConfigError, ExecInvariantViolation, KernelLifecycle};
    use crate::signal::traits::{Dft1D, Idft1D};
    use approx::assert_abs_diff_eq;
    use nalgebra::Complex;
    use ndarray::Array1;
    use rand::Rng;
    use rustfft::FftPlanner;

    fn dft_kernel(len: usize) -> DftKernel {
        DftKernel::try_new(DftConfig { len }).expect("kernel should initialize")
    }

    fn idft_kernel(len: usize, imaginary: ImaginaryPolicy<f64>) -> IdftKernel<f64> {
        IdftKernel::try_new(IdftConfig { len, imaginary }).expect("kernel should initialize")
    }

    #[track_caller]
    fn assert_complex_eq(a: &[Complex<f64>], b: &[Complex<f64>], epsilon: f64) {
        assert_eq!(a.len(), b.len());
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(x.re, y.re, epsilon = epsilon);
            assert_abs_diff_eq!(x.im, y.im, epsilon = epsilon);
        }
    }

    #[test]
    fn unit_impulse_transforms_to_flat_spectrum() {
        let spectrum = dft_kernel(4)
            .run_alloc(&[1.0f64, 0.0, 0.0, 0.0])
            .expect("kernel should run");
        for bin in &spectrum {
            assert_eq!(bin.re, 1.0);
            assert_eq!(bin.im, 0.0);
        }
    }

    #[test]
    fn constant_signal_concentrates_in_dc_bin() {
        let spectrum = dft_kernel(5)
            .run_alloc(&[2.0f64; 5])
            .expect("kernel should run");
        assert_abs_diff_eq!(spectrum[0].re, 10.0, epsilon = 1e-12);
        for bin in &spectrum[1..] {
            assert_abs_diff_eq!(bin.re, 0.0, epsilon = 1e-12);
            assert_abs_diff_eq!(bin.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn direct_sum_matches_rustfft_forward() {
        let mut rng = rand::rng();
        for len in [1usize, 2, 7, 16, 31] {
            let x: Vec<Complex<f64>> = (0..len)
                .map(|_| Complex::new(rng.random_range(-1.0..1.0), rng.random_range(-1.0..1.0)))
                .collect();
            let actual = dft_kernel(len).run_alloc(&x).expect("kernel should run");

            let mut expected = x.clone();
            FftPlanner::<f64>::new()
                .plan_fft_forward(len)
                .process(&mut expected);
            assert_complex_eq(&actual, &expected, 1e-9 * len as f64);
        }
    }

    #[test]
    fn direct_sum_matches_rustfft_inverse() {
        let mut rng = rand::rng();
        let len = 12;
        let spectrum: Vec<Complex<f64>> = (0..len)
            .map(|_| Complex::new(rng.random_range(-4.0..4.0), rng.random_range(-4.0..4.0)))
            .collect();
        let actual = idft_kernel(len, ImaginaryPolicy::Discard)
            .run_complex_alloc(&spectrum)
            .expect("kernel should run");

        let mut expected = spectrum.clone();
        FftPlanner::<f64>::new()
            .plan_fft_inverse(len)
            .process(&mut expected);
        let expected: Vec<Complex<f64>> = expected.iter().map(|z| *z / len as f64).collect();
        assert_complex_eq(&actual, &expected, 1e-9 * len as f64);
    }

    #[test]
    fn real_and_complex_inputs_agree() {
        let real = [0.5f64, -1.0, 2.0, 0.25, 3.0, -0.75];
        let lifted: Vec<Complex<f64>> = real.iter().map(|&r| Complex::new(r, 0.0)).collect();
        let kernel = dft_kernel(real.len());
        let from_real = kernel.run_alloc(&real).expect("kernel should run");
        let from_complex = kernel.run_alloc(&lifted).expect("kernel should run");
        assert_eq!(from_real, from_complex);
    }

    #[test]
    fn round_trip_recovers_complex_signal() {
        let x = vec![
            Complex::new(1.0, 2.0),
            Complex::new(-0.5, 0.0),
            Complex::new(0.0, -1.5),
        ];
        let spectrum = dft_kernel(3).run_alloc(&x).expect("kernel should run");
        let y = idft_kernel(3, ImaginaryPolicy::Discard)
            .run_complex_alloc(&spectrum)
            .expect("kernel should run");
        assert_complex_eq(&x, &y, 1e-12);
    }

    #[test]
    fn f32_transform_pair_round_trips() {
        let x = [1.0f32, 2.0, 3.0, 4.0];
        let spectrum = DftKernel::try_new(DftConfig { len: 4 })
            .expect("kernel should initialize")
            .run_alloc(&x)
            .expect("kernel should run");
        let y = IdftKernel::<f32>::try_new(IdftConfig {
            len: 4,
            imaginary: ImaginaryPolicy::Discard,
        })
        .expect("kernel should initialize")
        .run_alloc(&spectrum)
        .expect("kernel should run");
        for (a, b) in x.iter().zip(y.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-5);
        }
    }

    #[test]
    fn zero_length_kernels_are_rejected() {
        assert_eq!(
            DftKernel::try_new(DftConfig { len: 0 }).expect_err("zero length"),
            ConfigError::InvalidLength { arg: "len" }
        );
        assert_eq!(
            IdftKernel::<f64>::try_new(IdftConfig {
                len: 0,
                imaginary: ImaginaryPolicy::Discard,
            })
            .expect_err("zero length"),
            ConfigError::InvalidLength { arg: "len" }
        );
    }

    #[test]
    fn dft_rejects_wrong_input_and_output_lengths() {
        let kernel = dft_kernel(4);
        let mut out = vec![Complex::new(0.0f64, 0.0); 4];
        let err = kernel
            .run_into(&[1.0f64, 2.0, 3.0][..], &mut out)
            .expect_err("short input");
        assert_eq!(
            err,
            ExecInvariantViolation::DimensionMismatch {
                arg: "input",
                expected: 4,
                got: 3,
            }
        );

        let mut short = vec![Complex::new(0.0f64, 0.0); 2];
        let err = kernel
            .run_into(&[1.0f64, 2.0, 3.0, 4.0][..], &mut short)
            .expect_err("short output");
        assert_eq!(
            err,
            ExecInvariantViolation::DimensionMismatch {
                arg: "out",
                expected: 4,
                got: 2,
            }
        );
    }

    #[test]
    fn idft_rejects_wrong_output_length() {
        let kernel = idft_kernel(3, ImaginaryPolicy::Discard);
        let spectrum = vec![Complex::new(1.0, 0.0); 3];
        let mut out = Array1::<f64>::zeros(5);
        let err = kernel.run_into(&spectrum, &mut out).expect_err("long output");
        assert_eq!(
            err,
            ExecInvariantViolation::DimensionMismatch {
                arg: "out",
                expected: 3,
                got: 5,
            }
        );
    }

    #[test]
    fn reject_policy_accepts_hermitian_spectrum() {
        let x = [0.0f64, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0];
        let spectrum = dft_kernel(8).run_alloc(&x).expect("kernel should run");
        let y = idft_kernel(
            8,
            ImaginaryPolicy::Reject {
                tolerance: DEFAULT_IMAGINARY_TOLERANCE,
            },
        )
        .run_alloc(&spectrum)
        .expect("real signal reconstructs within tolerance");
        for (a, b) in x.iter().zip(y.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn reject_policy_flags_complex_signal() {
        // Single bin at n = 1 reconstructs exp(2*pi*i*k/4)/4; sample 0 is real.
        let spectrum = [
            Complex::new(0.0, 0.0),
            Complex::new(1.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
        ];
        let err = idft_kernel(
            4,
            ImaginaryPolicy::Reject {
                tolerance: DEFAULT_IMAGINARY_TOLERANCE,
            },
        )
        .run_alloc(&spectrum)
        .expect_err("imaginary residue must be flagged");
        assert_eq!(err, ExecInvariantViolation::NonNegligibleImaginary { index: 1 });

        let discarded = idft_kernel(4, ImaginaryPolicy::Discard)
            .run_alloc(&spectrum)
            .expect("discard keeps the real part");
        assert_abs_diff_eq!(discarded[0], 0.25, epsilon = 1e-15);
        assert_abs_diff_eq!(discarded[1], 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(discarded[2], -0.25, epsilon = 1e-15);
    }

    #[test]
    fn run_into_ndarray_buffer_matches_run_alloc() {
        let x = Array1::from(vec![3.0f64, -1.0, 4.0, 1.0, -5.0]);
        let kernel = dft_kernel(5);
        let mut out = Array1::from_elem(5, Complex::new(0.0f64, 0.0));
        kernel.run_into(&x, &mut out).expect("kernel should run");
        assert_eq!(out.to_vec(), kernel.run_alloc(&x).expect("kernel should run"));
    }

    #[test]
    fn default_tolerance_tracks_precision() {
        assert_eq!(default_imaginary_tolerance::<f64>(8), DEFAULT_IMAGINARY_TOLERANCE);
        let t32 = default_imaginary_tolerance::<f32>(7);
        assert_abs_diff_eq!(t32, 16.0 * 7.0 * f32::EPSILON, epsilon = 1e-12);
        assert!(f64::from(t32) > DEFAULT_IMAGINARY_TOLERANCE);
    }

    #[test]
    fn strict_f32_inverse_accepts_real_signals() {
        for len in [2usize, 7, 16, 33] {
            let x: Vec<f32> = (0..len)
                .map(|k| ((k * 7 + 3) % 11) as f32 / 5.0 - 1.0)
                .collect();
            let spectrum = DftKernel::try_new(DftConfig { len })
                .expect("kernel should initialize")
                .run_alloc(&x)
                .expect("kernel should run");
            let y = IdftKernel::<f32>::try_new(IdftConfig {
                len,
                imaginary: ImaginaryPolicy::Reject {
                    tolerance: default_imaginary_tolerance::<f32>(len),
                },
            })
            .expect("kernel should initialize")
            .run_alloc(&spectrum)
            .expect("real f32 signal reconstructs within tolerance");
            for (a, b) in x.iter().zip(y.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 5e-4);
            }
        }
    }

    #[test]
    fn strict_f32_inverse_still_flags_complex_signal() {
        let spectrum = [
            Complex::new(0.0f32, 0.0),
            Complex::new(4.0, 0.0),
            Complex::new(0.0, 0.0),
            Complex::new(0.0, 0.0),
        ];
        let err = IdftKernel::<f32>::try_new(IdftConfig {
            len: 4,
            imaginary: ImaginaryPolicy::Reject {
                tolerance: default_imaginary_tolerance::<f32>(4),
            },
        })
        .expect("kernel should initialize")
        .run_alloc(&spectrum)
        .expect_err("imaginary residue must be flagged");
        assert_eq!(err, ExecInvariantViolation::NonNegligibleImaginary { index: 1 });
    }

    #[test]
    fn reject_tolerance_must_be_finite_and_non_negative() {
        for tolerance in [-1e-9f64, f64::NAN, f64::INFINITY] {
            assert_eq!(
                IdftKernel::try_new(IdftConfig {
                    len: 4,
                    imaginary: ImaginaryPolicy::Reject { tolerance },
                })
                .expect_err("invalid tolerance"),
                ConfigError::InvalidTolerance { arg: "tolerance" }
            );
        }
        assert!(IdftKernel::try_new(IdftConfig {
            len: 4,
            imaginary: ImaginaryPolicy::Reject { tolerance: 0.0f64 },
        })
        .is_ok());
    }
}
