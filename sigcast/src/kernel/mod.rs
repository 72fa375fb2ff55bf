//! Shared trait-first kernel substrate.
//!
//! This module defines constructor validation and 1D buffer adapters used by
//! every signal kernel.

mod errors;
mod io;
mod lifecycle;

pub use errors::*;
pub use io::*;
pub use lifecycle::*;
