//! Library side of the `crosswalk` command-line compiler.

#![deny(unsafe_code)]

pub mod compile;
pub mod hash;
pub mod logging;
pub mod types;
