//! Direct-summation discrete Fourier transform pair with canonical test
//! signal generators.
//!
//! The forward and inverse transforms are the textbook `O(N^2)` sums; no fast
//! transform is involved. Each operation is available as a validated kernel
//! (see [`kernel::KernelLifecycle`]) and as a free function returning
//! [`ndarray::Array1`] values.
//!
//! ```
//! use dft_rs::signal::dft::{dft, idft, round_trip_tolerance};
//! use dft_rs::signal::wave::cosine;
//!
//! let x = cosine::<f64>(1, 8).unwrap();
//! let spectrum = dft(&x).unwrap();
//! let y = idft(&spectrum).unwrap();
//! for (a, b) in x.iter().zip(y.iter()) {
//!     assert!((a - b).abs() <= round_trip_tolerance(8));
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

mod error;
pub use error::Error;

/// Result alias for the free-function API.
pub type Result<T> = core::result::Result<T, Error>;

pub mod kernel;
pub mod signal;

/// Re-exported so callers can name [`Complex`](nalgebra::Complex) and
/// [`RealField`](nalgebra::RealField) without a direct dependency.
pub use nalgebra as na;
