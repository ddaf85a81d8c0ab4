//! Random primitives derived from raw bytes.
//!
//! Everything here is built on [`HardwareRng::generate`](crate::HardwareRng::generate)
//! alone: integers, unit floats, bounded ranges, choice and shuffling.
//! No rejection sampling is done anywhere.

mod integers;
mod range;
mod select;

pub use range::byte_width;
