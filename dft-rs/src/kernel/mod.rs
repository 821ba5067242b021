//! Shared kernel substrate.
//!
//! Constructor validation and 1D buffer adapters used by the generator and
//! transform kernels.

mod errors;
mod exec;
mod io;
mod lifecycle;

pub use errors::*;
pub(crate) use exec::fill_indexed;
pub use io::*;
pub use lifecycle::*;
