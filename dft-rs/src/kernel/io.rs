//! Buffer adapters for kernel inputs and outputs.
//!
//! A kernel reads its input samples through [`Read1D`] and writes its output
//! samples through [`Write1D`]. Both resolve to plain slices, so the summation
//! loops never see the container type. Contiguous `ndarray` storage binds in
//! place; a strided view fails with [`ConfigError::NonContiguous`] naming the
//! kernel argument (`"input"` or `"out"`).

use super::ConfigError;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

#[cfg(feature = "alloc")]
use ndarray::{Array1, ArrayView1, ArrayViewMut1};

/// Source of the samples a kernel consumes: a signal for the forward
/// transform, a spectrum for the inverse.
pub trait Read1D<T> {
    /// Samples in index order.
    fn read_slice(&self) -> Result<&[T], ConfigError>;
}

/// Destination for the samples a kernel produces, one slot per output index.
pub trait Write1D<T> {
    /// Output slots in index order.
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError>;
}

impl<T> Read1D<T> for [T] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self)
    }
}

impl<T> Write1D<T> for [T] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self)
    }
}

impl<T, const N: usize> Read1D<T> for [T; N] {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

impl<T, const N: usize> Write1D<T> for [T; N] {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Vec<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        Ok(self.as_slice())
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Vec<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        Ok(self.as_mut_slice())
    }
}

// Owned arrays are contiguous unless built from a reversed or strided layout.
#[cfg(feature = "alloc")]
impl<T> Read1D<T> for Array1<T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.as_slice()
            .ok_or(ConfigError::NonContiguous { arg: "input" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for Array1<T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "out" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Read1D<T> for ArrayView1<'_, T> {
    fn read_slice(&self) -> Result<&[T], ConfigError> {
        self.to_slice()
            .ok_or(ConfigError::NonContiguous { arg: "input" })
    }
}

#[cfg(feature = "alloc")]
impl<T> Write1D<T> for ArrayViewMut1<'_, T> {
    fn write_slice_mut(&mut self) -> Result<&mut [T], ConfigError> {
        self.as_slice_mut()
            .ok_or(ConfigError::NonContiguous { arg: "out" })
    }
}
