//! The generation configuration value.

use super::types::{
    EntropySource, EntropySources, ExpansionMode, HashAlgorithm, MixingMode, OutputMode,
    SecurityPreset, ThreadingMode,
};
use std::fmt;
use std::sync::Arc;

/// Caller-supplied lock and unlock callbacks for [`ThreadingMode::UserLock`].
///
/// The generator decides when, and how often, the callbacks run. Reentrancy
/// rules are the generator's, not this crate's.
#[derive(Clone)]
pub struct UserLock {
    lock: Arc<dyn Fn() + Send + Sync>,
    unlock: Arc<dyn Fn() + Send + Sync>,
}

impl UserLock {
    /// Wraps a lock/unlock pair.
    pub fn new<L, U>(lock: L, unlock: U) -> Self
    where
        L: Fn() + Send + Sync + 'static,
        U: Fn() + Send + Sync + 'static,
    {
        Self {
            lock: Arc::new(lock),
            unlock: Arc::new(unlock),
        }
    }

    /// Runs the lock callback.
    pub fn lock(&self) {
        (self.lock)()
    }

    /// Runs the unlock callback.
    pub fn unlock(&self) {
        (self.unlock)()
    }
}

impl fmt::Debug for UserLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserLock").finish_non_exhaustive()
    }
}

/// Settings for a single custom generation.
///
/// `seed` and `info` are borrowed: the bytes are never copied by this
/// crate and must outlive every call that uses the config. A `Config`
/// holds no state between calls, so one value may be reused for
/// deterministic settings or shared read-only across threads.
#[derive(Clone)]
pub struct Config<'a> {
    /// Enabled entropy sources. An empty set is legal here; the
    /// generator may then fail.
    pub sources: EntropySources,
    /// Digest used for mixing, and for counter, HKDF and HMAC expansion.
    pub hash_algorithm: HashAlgorithm,
    /// How the final digest is stretched to the requested length.
    pub expansion_mode: ExpansionMode,
    /// Whether rounds are finalized separately or hashed as one stream.
    pub mixing_mode: MixingMode,
    /// Synchronization the generator applies around collection.
    pub threading_mode: ThreadingMode,
    /// Callbacks used when `threading_mode` is [`ThreadingMode::UserLock`].
    pub user_lock: Option<UserLock>,
    /// Collection rounds; higher is slower and stronger.
    pub complexity: i32,
    /// Encoding of the returned buffer.
    pub output_mode: OutputMode,
    /// Extra seed material absorbed before collection.
    pub seed: Option<&'a [u8]>,
    /// Context string for HKDF expansion.
    pub info: Option<&'a [u8]>,
}

impl Default for Config<'_> {
    fn default() -> Self {
        Self {
            sources: EntropySources::all(),
            hash_algorithm: HashAlgorithm::default(),
            expansion_mode: ExpansionMode::default(),
            mixing_mode: MixingMode::default(),
            threading_mode: ThreadingMode::default(),
            user_lock: None,
            complexity: 1,
            output_mode: OutputMode::default(),
            seed: None,
            info: None,
        }
    }
}

impl Config<'static> {
    /// Reference expansion of a security preset.
    ///
    /// Generators are free to expand presets their own way; the bundled
    /// generators use this one.
    pub fn for_preset(preset: SecurityPreset) -> Self {
        match preset {
            SecurityPreset::Fast => Self {
                sources: EntropySources::from_sources([
                    EntropySource::Cpu,
                    EntropySource::Rdrand,
                    EntropySource::Perf,
                ]),
                mixing_mode: MixingMode::RoundBased,
                complexity: 1,
                ..Default::default()
            },
            SecurityPreset::Balanced => Self {
                complexity: 3,
                ..Default::default()
            },
            SecurityPreset::Secure => Self {
                hash_algorithm: HashAlgorithm::Sha512,
                expansion_mode: ExpansionMode::Hkdf,
                threading_mode: ThreadingMode::CriticalSection,
                complexity: 8,
                ..Default::default()
            },
        }
    }
}

impl<'a> Config<'a> {
    /// Returns a copy with a different output encoding.
    pub fn with_output_mode(&self, output_mode: OutputMode) -> Config<'a> {
        Config {
            output_mode,
            ..self.clone()
        }
    }
}

impl fmt::Debug for Config<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("sources", &self.sources)
            .field("hash_algorithm", &self.hash_algorithm)
            .field("expansion_mode", &self.expansion_mode)
            .field("mixing_mode", &self.mixing_mode)
            .field("threading_mode", &self.threading_mode)
            .field("user_lock", &self.user_lock.is_some())
            .field("complexity", &self.complexity)
            .field("output_mode", &self.output_mode)
            .field("seed_len", &self.seed.map(<[u8]>::len))
            .field("info_len", &self.info.map(<[u8]>::len))
            .finish()
    }
}
