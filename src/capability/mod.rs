//! The entropy generator boundary.
//!
//! Everything below the dispatcher goes through [`EntropyGenerator`]. The
//! crate ships two implementations: [`SoftwareGenerator`], which collects
//! host entropy and does its own hashing and expansion, and
//! [`MockGenerator`], a deterministic fake for tests.

mod encoding;
mod generator;
mod mixing;
mod mock;
mod software;
mod sources;

pub use generator::EntropyGenerator;
pub use mock::{GeneratorCall, MockGenerator};
pub use software::SoftwareGenerator;
