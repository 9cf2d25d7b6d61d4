//! Utility functions and types used accross the library
use lexical_core::FormattedSize;
use std::io::{self, Write};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;

/// Write scalar using the shortest representation that round-trips
/// back to the same value.
pub fn scalar_write<W: Write>(mut out: W, value: Scalar) -> io::Result<()> {
    let mut buffer = [0u8; Scalar::FORMATTED_SIZE_DECIMAL];
    out.write_all(lexical_core::write(value, &mut buffer))
}
