//! Pure-Rust generator backed by portable host entropy.
//!
//! Collection runs in rounds. Every round feeds each enabled source into
//! the configured hash. In round-based mixing a round is finalized and its
//! digest seeds the next round; in continuous mixing one hasher spans all
//! rounds and is also chained with a generator-held accumulator, so
//! consecutive calls depend on each other. The final digest is stretched
//! to the requested length by the configured expansion mode.

use super::encoding::encode_into;
use super::generator::EntropyGenerator;
use super::mixing::{expand, Accumulator};
use super::sources;
use crate::config::{
    Config, EntropySources, ExpansionMode, HashAlgorithm, MixingMode, SecurityPreset,
    ThreadingMode,
};
use rand_core::{OsRng, RngCore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

/// Domain separator for the continuous accumulator update.
const CONTINUOUS_DOMAIN: &str = "hwrng 2024 continuous accumulator v1";

/// Appended to the transcript to derive the continuous chain value.
const CHAIN_LABEL: &[u8] = b"hwrng continuous chain";

/// Highest complexity honoured by basic, tiered and custom generation.
const MAX_COMPLEXITY: i32 = 10;

/// Highest complexity honoured by thread-safe generation.
const MAX_THREAD_SAFE_COMPLEXITY: i32 = 5;

/// Everything one collection pass needs.
struct Plan<'a> {
    sources: EntropySources,
    hash_algorithm: HashAlgorithm,
    expansion_mode: ExpansionMode,
    mixing_mode: MixingMode,
    rounds: i32,
    seed: Option<&'a [u8]>,
    info: Option<&'a [u8]>,
}

impl Plan<'static> {
    /// Fixed plan used by the basic, tiered and thread-safe paths.
    fn fixed(rounds: i32) -> Self {
        Self {
            sources: EntropySources::all(),
            hash_algorithm: HashAlgorithm::Sha256,
            expansion_mode: ExpansionMode::Counter,
            mixing_mode: MixingMode::RoundBased,
            rounds,
            seed: None,
            info: None,
        }
    }
}

impl<'a> From<&Config<'a>> for Plan<'a> {
    fn from(config: &Config<'a>) -> Self {
        Self {
            sources: config.sources,
            hash_algorithm: config.hash_algorithm,
            expansion_mode: config.expansion_mode,
            mixing_mode: config.mixing_mode,
            rounds: config.complexity.clamp(1, MAX_COMPLEXITY),
            seed: config.seed,
            info: config.info,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Software implementation of [`EntropyGenerator`].
///
/// Threading starts uninitialized. [`init_threading`](EntropyGenerator::init_threading)
/// flips it to ready exactly once; thread-safe generation then runs inside
/// the generator's critical section.
pub struct SoftwareGenerator {
    /// Reference point for the monotonic timing sources.
    anchor: Instant,
    threading_ready: AtomicBool,
    critical_section: Mutex<()>,
    /// Chain value for continuous mixing across calls. Locked only to copy
    /// or fold, never across collection.
    continuous_state: Mutex<[u8; 32]>,
}

impl SoftwareGenerator {
    /// Generator with threading uninitialized.
    pub fn new() -> Self {
        Self {
            anchor: Instant::now(),
            threading_ready: AtomicBool::new(false),
            critical_section: Mutex::new(()),
            continuous_state: Mutex::new([0u8; 32]),
        }
    }

    /// Runs one collection pass and fills `out`.
    fn collect_into(&self, plan: &Plan<'_>, out: &mut [u8]) -> bool {
        if out.is_empty() {
            return false;
        }
        if plan.sources.is_empty() && plan.seed.is_none() {
            tracing::debug!("No entropy sources enabled and no seed supplied");
            return false;
        }

        let mut acc = Accumulator::new(plan.hash_algorithm);
        if let Some(seed) = plan.seed {
            acc.update(seed);
        }

        let digest = match plan.mixing_mode {
            MixingMode::RoundBased => {
                let mut digest = Vec::new();
                for _ in 0..plan.rounds {
                    acc.update(&digest);
                    self.collect_round(plan.sources, &mut acc);
                    digest = acc.finalize_reset();
                }
                digest
            }
            MixingMode::Continuous => {
                let state = *lock(&self.continuous_state);
                acc.update(&state);
                for _ in 0..plan.rounds {
                    self.collect_round(plan.sources, &mut acc);
                }

                // The chain value is a sibling hash of the transcript and is
                // never part of the output.
                let mut chain = acc.clone();
                chain.update(CHAIN_LABEL);
                let chain_value = chain.finalize_reset();
                self.fold_continuous_state(&chain_value);

                acc.finalize_reset()
            }
        };

        let expanded = expand(
            plan.hash_algorithm,
            plan.expansion_mode,
            &digest,
            plan.seed,
            plan.info,
            out,
        );
        if !expanded {
            tracing::debug!(
                len = out.len(),
                mode = ?plan.expansion_mode,
                "Expansion could not produce requested length"
            );
        }
        expanded
    }

    /// Mixes `chain_value` into the accumulator held across calls.
    ///
    /// Folds into whatever the state is now, so concurrent calls that read
    /// the same starting state do not overwrite each other's contribution.
    fn fold_continuous_state(&self, chain_value: &[u8]) {
        let mut state = lock(&self.continuous_state);
        let mut hasher = blake3::Hasher::new_derive_key(CONTINUOUS_DOMAIN);
        hasher.update(&state[..]);
        hasher.update(chain_value);
        *state = *hasher.finalize().as_bytes();
    }

    fn collect_round(&self, enabled: EntropySources, acc: &mut Accumulator) {
        for source in enabled.iter() {
            sources::collect(source, acc, self.anchor);
        }
    }
}

impl Default for SoftwareGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SoftwareGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftwareGenerator")
            .field("threading_ready", &self.threading_ready.load(Ordering::Acquire))
            .finish_non_exhaustive()
    }
}

impl EntropyGenerator for SoftwareGenerator {
    fn is_available(&self) -> bool {
        let mut probe = [0u8; 1];
        OsRng.try_fill_bytes(&mut probe).is_ok()
    }

    fn is_threading_available(&self) -> bool {
        self.threading_ready.load(Ordering::Acquire)
    }

    fn init_threading(&self) {
        if self
            .threading_ready
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
        {
            tracing::debug!("Software generator switched to synchronized mode");
        }
    }

    fn raw_generate(&self, buf: &mut [u8]) -> bool {
        self.collect_into(&Plan::fixed(1), buf)
    }

    fn tiered_generate(&self, buf: &mut [u8], complexity: i32) -> bool {
        self.collect_into(&Plan::fixed(complexity.clamp(1, MAX_COMPLEXITY)), buf)
    }

    fn thread_safe_generate(&self, buf: &mut [u8], complexity: i32) -> bool {
        if !self.is_threading_available() {
            return false;
        }
        let _guard = lock(&self.critical_section);
        let plan = Plan::fixed(complexity.clamp(1, MAX_THREAD_SAFE_COMPLEXITY));
        self.collect_into(&plan, buf)
    }

    fn default_config(&self, preset: SecurityPreset) -> Config<'static> {
        Config::for_preset(preset)
    }

    fn custom_generate(&self, out: &mut [u8], raw_len: usize, config: &Config<'_>) -> i32 {
        let mut raw = vec![0u8; raw_len];
        let plan = Plan::from(config);

        let collected = match config.threading_mode {
            ThreadingMode::None => self.collect_into(&plan, &mut raw),
            ThreadingMode::CriticalSection => {
                let _guard = lock(&self.critical_section);
                self.collect_into(&plan, &mut raw)
            }
            ThreadingMode::UserLock => match &config.user_lock {
                Some(hooks) => {
                    hooks.lock();
                    let collected = self.collect_into(&plan, &mut raw);
                    hooks.unlock();
                    collected
                }
                None => self.collect_into(&plan, &mut raw),
            },
        };

        if !collected {
            return 0;
        }
        encode_into(&raw, config.output_mode, out)
    }
}
