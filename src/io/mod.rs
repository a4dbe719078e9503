//! Input/output helpers.
//!
//! - model artifact loading from a file or URL (`artifact`)
//! - forecast CSV export (`export`)
//! - forecast JSON read/write (`forecast`)

pub mod artifact;
pub mod export;
pub mod forecast;

pub use artifact::*;
pub use export::*;
pub use forecast::*;
