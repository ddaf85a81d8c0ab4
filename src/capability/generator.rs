//! The generator capability contract.

use crate::config::{Config, SecurityPreset};

/// An opaque byte-generating capability.
///
/// This is the only boundary through which the crate touches an entropy
/// source. Production code binds it to a real provider
/// ([`SoftwareGenerator`](super::SoftwareGenerator)); tests bind it to
/// [`MockGenerator`](super::MockGenerator).
///
/// Buffer sizes are slice lengths. Implementations report failure through
/// their return values and never panic on a well-formed request.
pub trait EntropyGenerator: Send + Sync {
    /// Returns true if the entropy source can produce output at all.
    fn is_available(&self) -> bool;

    /// Pure probe of threading readiness. Must not change any state.
    fn is_threading_available(&self) -> bool;

    /// Prepares the generator for concurrent use.
    ///
    /// Idempotent: calls after the first, concurrent or not, observe the
    /// ready state and do nothing.
    fn init_threading(&self);

    /// Fills `buf` using the generator's internal defaults.
    fn raw_generate(&self, buf: &mut [u8]) -> bool;

    /// Fills `buf` with `complexity` rounds of mixing.
    fn tiered_generate(&self, buf: &mut [u8], complexity: i32) -> bool;

    /// Fills `buf` under the generator's own synchronization.
    fn thread_safe_generate(&self, buf: &mut [u8], complexity: i32) -> bool;

    /// Expands a preset into a full config.
    fn default_config(&self, preset: SecurityPreset) -> Config<'static>;

    /// Generates `raw_len` bytes and encodes them into `out` per
    /// `config.output_mode`.
    ///
    /// Returns the number of encoded bytes written, which may be less than
    /// `out.len()`. Zero or a negative value signals failure.
    fn custom_generate(&self, out: &mut [u8], raw_len: usize, config: &Config<'_>) -> i32;
}
