//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands build their
//! output as a `String` so it can be checked without a terminal, then print it.

pub mod calibrate;
pub mod check;
pub mod describe;
pub mod earnout;
pub mod linear;
pub mod price;
