//! Generation entry points.

use super::output::GeneratedOutput;
use crate::capability::{EntropyGenerator, SoftwareGenerator};
use crate::config::{build_config, Config, OutputMode, Overrides, SecurityPreset};
use crate::error::RngError;
use crate::threading::{ThreadingNegotiator, ThreadingState};
use std::sync::Arc;

/// Highest complexity accepted by tiered generation.
pub const MAX_TIERED_COMPLEXITY: i32 = 10;

/// Highest complexity accepted by thread-safe generation.
pub const MAX_THREAD_SAFE_COMPLEXITY: i32 = 5;

/// Front-end over an [`EntropyGenerator`].
///
/// Cloning shares the same generator handle, and with it the threading
/// state, so clones can be handed to worker threads.
///
/// # Example
///
/// ```no_run
/// use hwrng::{HardwareRng, OutputMode, Overrides, SecurityPreset};
///
/// let rng = HardwareRng::software();
///
/// let key = rng.generate_secure(32).unwrap();
/// let token = rng.generate_hex(16).unwrap();
///
/// let seed = b"session seed".to_vec();
/// let config = rng.create_config(
///     SecurityPreset::Balanced,
///     Overrides {
///         seed: Some(&seed),
///         sources: Some(vec!["cpu", "rdrand"]),
///         ..Default::default()
///     },
/// );
/// let text = rng.generate_custom(24, &config, Some(OutputMode::Base64)).unwrap();
/// ```
pub struct HardwareRng<G: ?Sized = SoftwareGenerator> {
    generator: Arc<G>,
}

impl<G: ?Sized> Clone for HardwareRng<G> {
    fn clone(&self) -> Self {
        Self {
            generator: Arc::clone(&self.generator),
        }
    }
}

impl HardwareRng<SoftwareGenerator> {
    /// Front-end over a fresh [`SoftwareGenerator`].
    pub fn software() -> Self {
        Self::new(SoftwareGenerator::new())
    }
}

impl Default for HardwareRng<SoftwareGenerator> {
    fn default() -> Self {
        Self::software()
    }
}

impl<G: EntropyGenerator> HardwareRng<G> {
    /// Takes ownership of `generator`.
    pub fn new(generator: G) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }
}

impl<G: EntropyGenerator + ?Sized> HardwareRng<G> {
    /// Wraps a generator handle that is already shared.
    pub fn from_shared(generator: Arc<G>) -> Self {
        Self { generator }
    }

    /// The underlying generator.
    pub fn generator(&self) -> &G {
        &self.generator
    }

    fn negotiator(&self) -> ThreadingNegotiator<'_, G> {
        ThreadingNegotiator::new(&*self.generator)
    }

    /// Returns true if the entropy source can produce output.
    pub fn is_available(&self) -> bool {
        self.generator.is_available()
    }

    /// Probes threading readiness without side effects.
    pub fn is_threading_available(&self) -> bool {
        self.negotiator().is_ready()
    }

    /// Current threading state, probed without side effects.
    pub fn threading_state(&self) -> ThreadingState {
        self.negotiator().state()
    }

    /// Explicitly initializes threading.
    ///
    /// Fails with [`RngError::ThreadingUnavailable`] if the generator is
    /// still not ready afterwards.
    pub fn init_threading(&self) -> Result<(), RngError> {
        self.negotiator().initialize()
    }

    /// Builds a config from `preset` and `overrides`.
    ///
    /// See [`build_config`] for the override order.
    pub fn create_config<'a>(&self, preset: SecurityPreset, overrides: Overrides<'a>) -> Config<'a> {
        build_config(&*self.generator, preset, overrides)
    }

    /// Generates `size` bytes with the generator's defaults.
    pub fn generate(&self, size: usize) -> Result<Vec<u8>, RngError> {
        check_size(size)?;
        let mut buf = vec![0u8; size];
        if !self.generator.raw_generate(&mut buf) {
            return Err(failure("basic generation", size));
        }
        Ok(buf)
    }

    /// Generates `size` bytes with `complexity` rounds of mixing.
    ///
    /// Higher complexity is slower and stronger. Accepts 1 through 10.
    pub fn generate_tiered(&self, size: usize, complexity: i32) -> Result<Vec<u8>, RngError> {
        check_size(size)?;
        check_complexity(complexity, MAX_TIERED_COMPLEXITY)?;

        let mut buf = vec![0u8; size];
        if !self.generator.tiered_generate(&mut buf, complexity) {
            return Err(failure("tiered generation", size));
        }
        Ok(buf)
    }

    /// Generates `size` bytes under the generator's own synchronization.
    ///
    /// Accepts complexity 1 through 5. If threading is not ready, one lazy
    /// initialization is attempted before giving up with
    /// [`RngError::ThreadingUnavailable`].
    pub fn generate_threadsafe(&self, size: usize, complexity: i32) -> Result<Vec<u8>, RngError> {
        check_size(size)?;
        check_complexity(complexity, MAX_THREAD_SAFE_COMPLEXITY)?;
        self.negotiator().ensure_ready()?;

        let mut buf = vec![0u8; size];
        if !self.generator.thread_safe_generate(&mut buf, complexity) {
            return Err(failure("thread-safe generation", size));
        }
        Ok(buf)
    }

    /// Generates `size` raw bytes through `config`, encoded per
    /// `output_mode` or, when that is `None`, per `config.output_mode`.
    ///
    /// The generator may write fewer bytes than the buffer holds; the output
    /// is truncated to the length it reports.
    pub fn generate_custom(
        &self,
        size: usize,
        config: &Config<'_>,
        output_mode: Option<OutputMode>,
    ) -> Result<GeneratedOutput, RngError> {
        check_size(size)?;

        let overridden;
        let config = match output_mode {
            Some(mode) if mode != config.output_mode => {
                overridden = config.with_output_mode(mode);
                &overridden
            }
            _ => config,
        };
        let mode = config.output_mode;

        let capacity = mode.capacity_for(size);
        if capacity > i32::MAX as usize {
            return Err(RngError::InvalidParameter(format!(
                "{:?} output for {} bytes exceeds the generator's buffer limit",
                mode, size
            )));
        }
        tracing::debug!(size, capacity, ?mode, "Dispatching custom generation");

        let mut buf = vec![0u8; capacity];
        let written = self.generator.custom_generate(&mut buf, size, config);
        if written <= 0 {
            tracing::warn!(size, ?mode, returned = written, "Custom generation failed");
            return Err(RngError::GenerationFailure(format!(
                "custom generation of {} bytes returned {}",
                size, written
            )));
        }

        let written = written as usize;
        if written > capacity {
            return Err(RngError::GenerationFailure(format!(
                "generator reported {} bytes for a {} byte buffer",
                written, capacity
            )));
        }
        buf.truncate(written);
        GeneratedOutput::from_buffer(buf, mode)
    }

    /// Custom generation with an unmodified preset config.
    pub fn generate_with_preset(
        &self,
        size: usize,
        preset: SecurityPreset,
        output_mode: Option<OutputMode>,
    ) -> Result<GeneratedOutput, RngError> {
        let config = self.create_config(preset, Overrides::default());
        self.generate_custom(size, &config, output_mode)
    }

    /// `size` random bytes as lowercase hex text (`2 * size` characters).
    pub fn generate_hex(&self, size: usize) -> Result<String, RngError> {
        self.generate_with_preset(size, SecurityPreset::Balanced, Some(OutputMode::Hex))
            .map(into_text)
    }

    /// `size` random bytes as padded base64 text.
    pub fn generate_base64(&self, size: usize) -> Result<String, RngError> {
        self.generate_with_preset(size, SecurityPreset::Balanced, Some(OutputMode::Base64))
            .map(into_text)
    }

    /// Raw bytes using the secure preset.
    pub fn generate_secure(&self, size: usize) -> Result<Vec<u8>, RngError> {
        self.generate_with_preset(size, SecurityPreset::Secure, Some(OutputMode::Raw))
            .map(GeneratedOutput::into_bytes)
    }

    /// Raw bytes using the fast preset.
    pub fn generate_fast(&self, size: usize) -> Result<Vec<u8>, RngError> {
        self.generate_with_preset(size, SecurityPreset::Fast, Some(OutputMode::Raw))
            .map(GeneratedOutput::into_bytes)
    }
}

impl<G: ?Sized> std::fmt::Debug for HardwareRng<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HardwareRng").finish_non_exhaustive()
    }
}

fn into_text(output: GeneratedOutput) -> String {
    match output {
        GeneratedOutput::Text(text) => text,
        // Only reachable with a text mode forced above
        GeneratedOutput::Bytes(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
    }
}

fn check_size(size: usize) -> Result<(), RngError> {
    if size == 0 || size > i32::MAX as usize {
        return Err(RngError::InvalidParameter(format!(
            "size must be between 1 and {}, got {}",
            i32::MAX,
            size
        )));
    }
    Ok(())
}

fn check_complexity(complexity: i32, max: i32) -> Result<(), RngError> {
    if !(1..=max).contains(&complexity) {
        return Err(RngError::InvalidParameter(format!(
            "complexity must be between 1 and {}, got {}",
            max, complexity
        )));
    }
    Ok(())
}

fn failure(operation: &str, size: usize) -> RngError {
    tracing::warn!(size, "{} reported failure", operation);
    RngError::GenerationFailure(format!("{} of {} bytes failed", operation, size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{GeneratorCall, MockGenerator};
    use crate::config::ThreadingMode;
    use std::time::{Duration, Instant};

    fn mock_rng(mock: MockGenerator) -> HardwareRng<MockGenerator> {
        HardwareRng::new(mock)
    }

    #[test]
    fn test_generate_exact_size() {
        let rng = mock_rng(MockGenerator::new());
        for size in [1, 7, 32, 1000] {
            assert_eq!(rng.generate(size).unwrap().len(), size);
        }
    }

    #[test]
    fn test_generate_zero_size_rejected_before_generator() {
        let rng = mock_rng(MockGenerator::new());
        assert!(matches!(rng.generate(0), Err(RngError::InvalidParameter(_))));
        assert!(rng.generator().calls().is_empty());
    }

    #[test]
    fn test_generate_failure() {
        let rng = mock_rng(MockGenerator::new().failing());
        assert!(matches!(rng.generate(8), Err(RngError::GenerationFailure(_))));
    }

    #[test]
    fn test_tiered_complexity_bounds() {
        let rng = mock_rng(MockGenerator::new());

        for complexity in [-1, 0, 11, 100] {
            assert!(matches!(
                rng.generate_tiered(16, complexity),
                Err(RngError::InvalidParameter(_))
            ));
        }
        assert!(rng.generator().calls().is_empty());

        for complexity in 1..=10 {
            assert_eq!(rng.generate_tiered(16, complexity).unwrap().len(), 16);
        }
    }

    #[test]
    fn test_tiered_time_non_decreasing() {
        let rng = mock_rng(MockGenerator::new().with_round_delay(Duration::from_millis(2)));

        let mut previous = Duration::ZERO;
        for complexity in [1, 5, 10] {
            let start = Instant::now();
            rng.generate_tiered(8, complexity).unwrap();
            let elapsed = start.elapsed();
            assert!(elapsed >= previous, "complexity {} got faster", complexity);
            previous = elapsed;
        }
    }

    #[test]
    fn test_threadsafe_complexity_bounds() {
        let rng = mock_rng(MockGenerator::new().threading_ready());
        assert!(matches!(
            rng.generate_threadsafe(8, 6),
            Err(RngError::InvalidParameter(_))
        ));
        assert!(matches!(
            rng.generate_threadsafe(8, 0),
            Err(RngError::InvalidParameter(_))
        ));
        assert_eq!(rng.generate_threadsafe(8, 5).unwrap().len(), 8);
    }

    #[test]
    fn test_threadsafe_lazy_initialization() {
        let rng = mock_rng(MockGenerator::new());
        assert_eq!(rng.threading_state(), ThreadingState::Uninitialized);

        assert_eq!(rng.generate_threadsafe(8, 1).unwrap().len(), 8);
        assert_eq!(rng.threading_state(), ThreadingState::Ready);

        // Already ready: no further initialization
        rng.generate_threadsafe(8, 1).unwrap();
        assert_eq!(rng.generator().init_attempts(), 1);
    }

    #[test]
    fn test_threadsafe_unavailable() {
        let rng = mock_rng(MockGenerator::new().threading_never_ready());

        assert_eq!(
            rng.generate_threadsafe(8, 1),
            Err(RngError::ThreadingUnavailable)
        );
        // One lazy attempt per call, never a thread-safe generator call
        assert_eq!(rng.generator().calls(), vec![GeneratorCall::InitThreading]);

        assert_eq!(
            rng.generate_threadsafe(8, 1),
            Err(RngError::ThreadingUnavailable)
        );
        assert_eq!(rng.generator().init_attempts(), 2);
    }

    #[test]
    fn test_init_threading_explicit() {
        let rng = mock_rng(MockGenerator::new());
        assert!(!rng.is_threading_available());
        rng.init_threading().unwrap();
        assert!(rng.is_threading_available());

        let never = mock_rng(MockGenerator::new().threading_never_ready());
        assert_eq!(never.init_threading(), Err(RngError::ThreadingUnavailable));
    }

    #[test]
    fn test_custom_capacity_per_mode() {
        let rng = mock_rng(MockGenerator::new());
        let config = Config::default();

        for (mode, capacity) in [
            (OutputMode::Raw, 10),
            (OutputMode::Hex, 20),
            (OutputMode::Base64, 16),
        ] {
            let output = rng.generate_custom(10, &config, Some(mode)).unwrap();
            assert_eq!(output.len(), capacity);
        }

        let capacities: Vec<_> = rng
            .generator()
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                GeneratorCall::Custom { capacity, raw_len, .. } => Some((capacity, raw_len)),
                _ => None,
            })
            .collect();
        assert_eq!(capacities, vec![(10, 10), (20, 10), (16, 10)]);
    }

    #[test]
    fn test_custom_uses_config_output_mode() {
        let rng = mock_rng(MockGenerator::new().with_script([0xAB]));
        let config = Config {
            output_mode: OutputMode::Hex,
            ..Default::default()
        };

        let output = rng.generate_custom(3, &config, None).unwrap();
        assert_eq!(output, GeneratedOutput::Text("ababab".to_string()));
    }

    #[test]
    fn test_custom_truncates_to_reported_length() {
        let rng = mock_rng(MockGenerator::new().with_custom_return(5));
        let output = rng
            .generate_custom(10, &Config::default(), Some(OutputMode::Hex))
            .unwrap();
        assert_eq!(output.len(), 5);
    }

    #[test]
    fn test_custom_non_positive_return_is_failure() {
        for value in [0, -1] {
            let rng = mock_rng(MockGenerator::new().with_custom_return(value));
            assert!(matches!(
                rng.generate_custom(10, &Config::default(), None),
                Err(RngError::GenerationFailure(_))
            ));
        }
    }

    #[test]
    fn test_custom_overlong_return_is_failure() {
        let rng = mock_rng(MockGenerator::new().with_custom_return(11));
        assert!(matches!(
            rng.generate_custom(10, &Config::default(), Some(OutputMode::Raw)),
            Err(RngError::GenerationFailure(_))
        ));
    }

    #[test]
    fn test_custom_user_lock_passthrough() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let locked = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&locked);
        let rng = mock_rng(MockGenerator::new());
        let config = rng.create_config(
            SecurityPreset::Balanced,
            Overrides {
                threading_mode: Some(ThreadingMode::UserLock),
                user_lock: Some(crate::config::UserLock::new(
                    move || {
                        counter.fetch_add(1, Ordering::SeqCst);
                    },
                    || {},
                )),
                ..Default::default()
            },
        );

        rng.generate_custom(4, &config, None).unwrap();
        assert_eq!(locked.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_wrappers_fix_mode_and_preset() {
        let rng = mock_rng(MockGenerator::new());

        assert_eq!(rng.generate_hex(10).unwrap().len(), 20);
        assert_eq!(rng.generate_base64(10).unwrap().len(), 16);
        assert_eq!(rng.generate_secure(10).unwrap().len(), 10);
        assert_eq!(rng.generate_fast(10).unwrap().len(), 10);

        let presets: Vec<_> = rng
            .generator()
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                GeneratorCall::DefaultConfig(preset) => Some(preset),
                _ => None,
            })
            .collect();
        assert_eq!(
            presets,
            vec![
                SecurityPreset::Balanced,
                SecurityPreset::Balanced,
                SecurityPreset::Secure,
                SecurityPreset::Fast,
            ]
        );
    }

    #[test]
    fn test_hex_text_is_hex() {
        let rng = mock_rng(MockGenerator::new());
        let text = rng.generate_hex(16).unwrap();
        assert!(text.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_clones_share_threading_state() {
        let rng = mock_rng(MockGenerator::new());
        let clone = rng.clone();
        rng.init_threading().unwrap();
        assert!(clone.is_threading_available());
    }
}
