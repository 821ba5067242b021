//! Signal generators and the discrete Fourier transform pair.

pub mod dft;
pub mod traits;
pub mod wave;
