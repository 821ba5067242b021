//! Trait-first kernels for the canonical test signals.

use crate::kernel::{
    ensure_len, ensure_nonzero_len, fill_indexed, ConfigError, ExecInvariantViolation,
    KernelLifecycle, Write1D,
};
use crate::signal::traits::{BoxPulse1D, Sinusoid1D};
use nalgebra::RealField;
use num_traits::{One, Zero};

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

/// Which trigonometric function a [`SinusoidKernel`] samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinusoidKind {
    /// `cos(2*pi*f*n/N)`.
    Cosine,
    /// `sin(2*pi*f*n/N)`.
    Sine,
}

/// Constructor config for [`SinusoidKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinusoidConfig {
    /// Cosine or sine.
    pub kind: SinusoidKind,
    /// Integer frequency in cycles per `len` samples. Any value is accepted;
    /// frequencies outside `[0, len)` alias.
    pub frequency: i64,
    /// Number of output samples.
    pub len: usize,
}

/// Trait-first 1D sinusoid generator sampling `N` points of one period grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SinusoidKernel {
    kind: SinusoidKind,
    frequency: i64,
    len: usize,
}

impl SinusoidKernel {
    /// Return the configured function.
    pub fn kind(&self) -> SinusoidKind {
        self.kind
    }

    /// Return the configured integer frequency.
    pub fn frequency(&self) -> i64 {
        self.frequency
    }

    /// Return the configured sample count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed kernel.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(super) fn sample<F>(&self, n: usize) -> F
    where
        F: RealField + Copy,
    {
        // f*n is reduced modulo N in integers first: the angle stays in
        // [0, 2*pi) for any f, and n = 0 lands on exactly zero.
        let len = self.len as i128;
        let step = (i128::from(self.frequency) * n as i128).rem_euclid(len);
        let phase = F::two_pi() * nalgebra::convert::<f64, F>(step as f64)
            / nalgebra::convert::<f64, F>(self.len as f64);
        match self.kind {
            SinusoidKind::Cosine => phase.cos(),
            SinusoidKind::Sine => phase.sin(),
        }
    }
}

impl KernelLifecycle for SinusoidKernel {
    type Config = SinusoidConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        ensure_nonzero_len("len", config.len)?;
        Ok(Self {
            kind: config.kind,
            frequency: config.frequency,
            len: config.len,
        })
    }
}

impl<F> Sinusoid1D<F> for SinusoidKernel
where
    F: RealField + Copy,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<F> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        ensure_len("out", self.len, out.len())?;
        fill_indexed(out, |n| self.sample(n));
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc(&self) -> Result<Vec<F>, ExecInvariantViolation> {
        Ok((0..self.len).map(|n| self.sample(n)).collect())
    }
}

/// Constructor config for [`BoxPulseKernel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxPulseConfig {
    /// Number of output samples.
    pub len: usize,
    /// Number of samples set to one. Zero yields an all-zero signal.
    pub width: usize,
    /// Index of the first sample set to one.
    pub offset: usize,
}

/// Trait-first 1D rectangular pulse generator.
///
/// Samples in `[offset, offset + width)` are one, the rest zero. A pulse that
/// would run past the end of the signal is rejected at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxPulseKernel {
    len: usize,
    start: usize,
    end: usize,
}

impl BoxPulseKernel {
    /// Return the configured sample count.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false for a constructed kernel.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Return the pulse width.
    pub fn width(&self) -> usize {
        self.end - self.start
    }

    /// Return the pulse offset.
    pub fn offset(&self) -> usize {
        self.start
    }

    pub(super) fn sample<T>(&self, n: usize) -> T
    where
        T: Zero + One,
    {
        if (self.start..self.end).contains(&n) {
            T::one()
        } else {
            T::zero()
        }
    }
}

impl KernelLifecycle for BoxPulseKernel {
    type Config = BoxPulseConfig;

    fn try_new(config: Self::Config) -> Result<Self, ConfigError> {
        ensure_nonzero_len("len", config.len)?;
        match config.offset.checked_add(config.width) {
            Some(end) if end <= config.len => Ok(Self {
                len: config.len,
                start: config.offset,
                end,
            }),
            _ => Err(ConfigError::OutOfRangeBox {
                len: config.len,
                width: config.width,
                offset: config.offset,
            }),
        }
    }
}

impl<T> BoxPulse1D<T> for BoxPulseKernel
where
    T: Zero + One + Send,
{
    fn run_into<O>(&self, out: &mut O) -> Result<(), ExecInvariantViolation>
    where
        O: Write1D<T> + ?Sized,
    {
        let out = out
            .write_slice_mut()
            .map_err(ExecInvariantViolation::from)?;
        ensure_len("out", self.len, out.len())?;
        fill_indexed(out, |n| self.sample(n));
        Ok(())
    }

    #[cfg(feature = "alloc")]
    fn run_alloc(&self) -> Result<Vec<T>, ExecInvariantViolation> {
        Ok((0..self.len).map(|n| self.sample(n)).collect())
    }
}
