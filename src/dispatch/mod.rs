//! Generation dispatch.
//!
//! [`HardwareRng`] validates requests, sizes output buffers and forwards
//! each call to the generator through one of four entry points: basic,
//! complexity-tiered, thread-safe and fully custom. The hex, base64, secure
//! and fast helpers are thin wrappers over custom generation.

mod output;
mod rng;

pub use output::GeneratedOutput;
pub use rng::{HardwareRng, MAX_THREAD_SAFE_COMPLEXITY, MAX_TIERED_COMPLEXITY};
