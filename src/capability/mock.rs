//! Deterministic generator for tests.

use super::encoding::encode_into;
use super::generator::EntropyGenerator;
use crate::config::{Config, OutputMode, SecurityPreset, ThreadingMode};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// A call received by [`MockGenerator`].
///
/// Probes are not recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratorCall {
    /// `init_threading`.
    InitThreading,
    /// `raw_generate` with the buffer length.
    Raw {
        /// Buffer length.
        size: usize,
    },
    /// `tiered_generate`.
    Tiered {
        /// Buffer length.
        size: usize,
        /// Requested complexity.
        complexity: i32,
    },
    /// `thread_safe_generate`, recorded even when threading is not ready.
    ThreadSafe {
        /// Buffer length.
        size: usize,
        /// Requested complexity.
        complexity: i32,
    },
    /// `custom_generate`.
    Custom {
        /// Output buffer length.
        capacity: usize,
        /// Raw bytes requested before encoding.
        raw_len: usize,
        /// Encoding taken from the config.
        output_mode: OutputMode,
    },
    /// `default_config` for a preset.
    DefaultConfig(SecurityPreset),
}

#[derive(Debug, Default)]
struct Script {
    bytes: Vec<u8>,
    cursor: usize,
    counter: u64,
}

impl Script {
    fn fill(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            if self.bytes.is_empty() {
                // NOT random - a running counter so output is predictable
                *byte = (self.counter % 256) as u8;
                self.counter += 1;
            } else {
                *byte = self.bytes[self.cursor % self.bytes.len()];
                self.cursor += 1;
            }
        }
    }
}

/// Mock generator that returns scripted bytes and records every call.
///
/// With no script it emits a running byte counter. A script repeats once
/// exhausted.
#[derive(Debug)]
pub struct MockGenerator {
    script: Mutex<Script>,
    calls: Mutex<Vec<GeneratorCall>>,
    available: bool,
    failing: bool,
    threading_initializable: bool,
    threading_ready: AtomicBool,
    init_attempts: AtomicUsize,
    custom_return: Option<i32>,
    round_delay: Option<Duration>,
}

impl Default for MockGenerator {
    fn default() -> Self {
        Self {
            script: Mutex::new(Script::default()),
            calls: Mutex::new(Vec::new()),
            available: true,
            failing: false,
            threading_initializable: true,
            threading_ready: AtomicBool::new(false),
            init_attempts: AtomicUsize::new(0),
            custom_return: None,
            round_delay: None,
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockGenerator {
    /// Mock with a counter byte stream, available and not yet threading-ready.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes to hand out, in order, repeating when exhausted.
    pub fn with_script(self, bytes: impl Into<Vec<u8>>) -> Self {
        *lock(&self.script) = Script {
            bytes: bytes.into(),
            ..Script::default()
        };
        self
    }

    /// Reports the entropy source as unavailable.
    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// Makes every generation call report failure.
    pub fn failing(mut self) -> Self {
        self.failing = true;
        self
    }

    /// `init_threading` is accepted but never makes threading ready.
    pub fn threading_never_ready(mut self) -> Self {
        self.threading_initializable = false;
        self
    }

    /// Starts in the threading-ready state.
    pub fn threading_ready(self) -> Self {
        self.threading_ready.store(true, Ordering::SeqCst);
        self
    }

    /// Forces `custom_generate` to return this value after writing output.
    pub fn with_custom_return(mut self, value: i32) -> Self {
        self.custom_return = Some(value);
        self
    }

    /// Sleeps this long per complexity round in tiered generation.
    pub fn with_round_delay(mut self, delay: Duration) -> Self {
        self.round_delay = Some(delay);
        self
    }

    /// Every recorded call, oldest first.
    pub fn calls(&self) -> Vec<GeneratorCall> {
        lock(&self.calls).clone()
    }

    /// Number of `init_threading` calls received.
    pub fn init_attempts(&self) -> usize {
        self.init_attempts.load(Ordering::SeqCst)
    }

    fn record(&self, call: GeneratorCall) {
        lock(&self.calls).push(call);
    }

    fn fill(&self, buf: &mut [u8]) -> bool {
        if self.failing {
            return false;
        }
        lock(&self.script).fill(buf);
        true
    }
}

impl EntropyGenerator for MockGenerator {
    fn is_available(&self) -> bool {
        self.available
    }

    fn is_threading_available(&self) -> bool {
        self.threading_ready.load(Ordering::SeqCst)
    }

    fn init_threading(&self) {
        self.init_attempts.fetch_add(1, Ordering::SeqCst);
        self.record(GeneratorCall::InitThreading);
        if self.threading_initializable {
            self.threading_ready.store(true, Ordering::SeqCst);
        }
    }

    fn raw_generate(&self, buf: &mut [u8]) -> bool {
        self.record(GeneratorCall::Raw { size: buf.len() });
        self.fill(buf)
    }

    fn tiered_generate(&self, buf: &mut [u8], complexity: i32) -> bool {
        self.record(GeneratorCall::Tiered {
            size: buf.len(),
            complexity,
        });
        if let Some(delay) = self.round_delay {
            std::thread::sleep(delay * complexity.max(1) as u32);
        }
        self.fill(buf)
    }

    fn thread_safe_generate(&self, buf: &mut [u8], complexity: i32) -> bool {
        self.record(GeneratorCall::ThreadSafe {
            size: buf.len(),
            complexity,
        });
        self.is_threading_available() && self.fill(buf)
    }

    fn default_config(&self, preset: SecurityPreset) -> Config<'static> {
        self.record(GeneratorCall::DefaultConfig(preset));
        Config::for_preset(preset)
    }

    fn custom_generate(&self, out: &mut [u8], raw_len: usize, config: &Config<'_>) -> i32 {
        self.record(GeneratorCall::Custom {
            capacity: out.len(),
            raw_len,
            output_mode: config.output_mode,
        });

        let hooks = match config.threading_mode {
            ThreadingMode::UserLock => config.user_lock.as_ref(),
            _ => None,
        };
        if let Some(hooks) = hooks {
            hooks.lock();
        }

        let mut raw = vec![0u8; raw_len];
        let written = if self.fill(&mut raw) {
            encode_into(&raw, config.output_mode, out)
        } else {
            0
        };

        if let Some(hooks) = hooks {
            hooks.unlock();
        }

        self.custom_return.unwrap_or(written)
    }
}
