//! Feature builder: commodity vocabulary + calendar/cyclical encoding.

pub mod builder;
pub mod vocabulary;

pub use builder::*;
pub use vocabulary::*;
