//! Canonical test signals: sampled cosine and sine, and rectangular pulses.

#[cfg(feature = "alloc")]
use crate::kernel::KernelLifecycle;
#[cfg(feature = "alloc")]
use crate::signal::traits::{BoxPulse1D, Sinusoid1D};
#[cfg(feature = "alloc")]
use nalgebra::RealField;
#[cfg(feature = "alloc")]
use ndarray::Array1;
#[cfg(feature = "alloc")]
use num_traits::{One, Zero};

mod kernels;
pub use kernels::*;

/// Return `N` samples of `cos(2*pi*f*n/N)`.
///
/// `f` may be negative or at least `N`; the resulting signal is the aliased
/// sinusoid, not an error. Fails with [`Error::InvalidLength`](crate::Error)
/// when `len == 0`.
///
/// ```
/// let x = dft_rs::signal::wave::cosine::<f64>(2, 4).unwrap();
/// assert_eq!(x[0], 1.0);
/// assert!((x[1] + 1.0).abs() < 1e-12);
/// ```
#[cfg(feature = "alloc")]
pub fn cosine<F>(f: i64, len: usize) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
{
    sinusoid(SinusoidKind::Cosine, f, len)
}

/// Return `N` samples of `sin(2*pi*f*n/N)`.
///
/// Same contract as [`cosine`].
#[cfg(feature = "alloc")]
pub fn sine<F>(f: i64, len: usize) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
{
    sinusoid(SinusoidKind::Sine, f, len)
}

#[cfg(feature = "alloc")]
fn sinusoid<F>(kind: SinusoidKind, frequency: i64, len: usize) -> crate::Result<Array1<F>>
where
    F: RealField + Copy,
{
    let kernel = SinusoidKernel::try_new(SinusoidConfig {
        kind,
        frequency,
        len,
    })?;
    Ok(Array1::from(kernel.run_alloc()?))
}

/// Return a rectangular pulse of `len` samples, one on
/// `[offset, offset + width)` and zero elsewhere.
///
/// A zero `offset` gives the simple box, a non-zero one the shifted box.
/// Fails with [`Error::OutOfRangeBox`](crate::Error) when the pulse does not
/// fit; nothing is truncated.
///
/// ```
/// let x = dft_rs::signal::wave::box_signal::<f64>(8, 3, 2).unwrap();
/// assert_eq!(x.to_vec(), vec![0., 0., 1., 1., 1., 0., 0., 0.]);
/// assert!(dft_rs::signal::wave::box_signal::<f64>(5, 2, 4).is_err());
/// ```
#[cfg(feature = "alloc")]
pub fn box_signal<T>(len: usize, width: usize, offset: usize) -> crate::Result<Array1<T>>
where
    T: Zero + One + Send,
{
    let kernel = BoxPulseKernel::try_new(BoxPulseConfig { len, width, offset })?;
    Ok(Array1::from(kernel.run_alloc()?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cosine_starts_at_one_for_any_frequency() {
        for f in [-7i64, -1, 0, 1, 3, 8, 100] {
            for len in [1usize, 2, 5, 16] {
                let x = cosine::<f64>(f, len).expect("valid length");
                assert_eq!(x.len(), len);
                assert_eq!(x[0], 1.0);
            }
        }
    }

    #[test]
    fn sine_starts_at_zero_for_any_frequency() {
        for f in [-7i64, -1, 0, 1, 3, 8, 100] {
            for len in [1usize, 2, 5, 16] {
                let x = sine::<f64>(f, len).expect("valid length");
                assert_eq!(x.len(), len);
                assert_eq!(x[0], 0.0);
            }
        }
    }

    #[test]
    fn quarter_period_samples() {
        let c = cosine::<f64>(1, 4).expect("valid length");
        let s = sine::<f64>(1, 4).expect("valid length");
        let expected_c = [1.0, 0.0, -1.0, 0.0];
        let expected_s = [0.0, 1.0, 0.0, -1.0];
        for (a, b) in c.iter().zip(expected_c) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-15);
        }
        for (a, b) in s.iter().zip(expected_s) {
            assert_abs_diff_eq!(*a, b, epsilon = 1e-15);
        }
    }

    #[test]
    fn zero_length_sinusoid_fails() {
        assert_eq!(
            cosine::<f64>(1, 0).expect_err("zero length"),
            Error::InvalidLength { arg: "len" }
        );
        assert_eq!(
            sine::<f64>(1, 0).expect_err("zero length"),
            Error::InvalidLength { arg: "len" }
        );
    }

    #[test]
    fn simple_and_shifted_box() {
        let simple = box_signal::<f64>(6, 2, 0).expect("fits");
        assert_eq!(simple.to_vec(), vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0]);

        let shifted = box_signal::<f64>(8, 3, 2).expect("fits");
        assert_eq!(
            shifted.to_vec(),
            vec![0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]
        );
    }

    #[test]
    fn box_overrun_is_rejected_not_truncated() {
        assert_eq!(
            box_signal::<f64>(5, 2, 4).expect_err("overrun"),
            Error::OutOfRangeBox {
                len: 5,
                width: 2,
                offset: 4,
            }
        );
    }

    #[test]
    fn zero_length_box_fails() {
        assert_eq!(
            box_signal::<f64>(0, 0, 0).expect_err("zero length"),
            Error::InvalidLength { arg: "len" }
        );
    }
}
