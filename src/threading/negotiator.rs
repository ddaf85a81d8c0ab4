//! Threading readiness state machine.

use crate::capability::EntropyGenerator;
use crate::error::RngError;

/// Observable threading state of a generator handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThreadingState {
    /// Thread-safe generation is not yet possible.
    Uninitialized,
    /// The generator has switched to synchronized operation.
    Ready,
}

/// Negotiates threading readiness with a generator.
///
/// The readiness flag lives in the generator handle; the negotiator holds
/// no state of its own and can be created wherever it is needed.
#[derive(Debug)]
pub struct ThreadingNegotiator<'g, G: ?Sized> {
    generator: &'g G,
}

impl<'g, G: EntropyGenerator + ?Sized> ThreadingNegotiator<'g, G> {
    /// Negotiator borrowing `generator`.
    pub fn new(generator: &'g G) -> Self {
        Self { generator }
    }

    /// Side-effect-free probe of the current state.
    pub fn state(&self) -> ThreadingState {
        if self.generator.is_threading_available() {
            ThreadingState::Ready
        } else {
            ThreadingState::Uninitialized
        }
    }

    /// Returns true once the generator is ready for concurrent use.
    pub fn is_ready(&self) -> bool {
        self.state() == ThreadingState::Ready
    }

    /// Explicitly initializes threading.
    ///
    /// Safe to call repeatedly and concurrently; the generator treats
    /// every call after the first as a no-op.
    pub fn initialize(&self) -> Result<(), RngError> {
        let before = self.state();
        self.generator.init_threading();

        match self.state() {
            ThreadingState::Ready => {
                if before == ThreadingState::Uninitialized {
                    tracing::info!("Generator threading initialized");
                }
                Ok(())
            }
            ThreadingState::Uninitialized => {
                tracing::warn!("Generator threading failed to initialize");
                Err(RngError::ThreadingUnavailable)
            }
        }
    }

    /// Makes sure threading is ready, attempting initialization at most once.
    ///
    /// Reserved for the thread-safe generation path; everything else should
    /// probe with [`is_ready`](Self::is_ready) and treat `false` as "not yet".
    pub(crate) fn ensure_ready(&self) -> Result<(), RngError> {
        if self.is_ready() {
            return Ok(());
        }
        tracing::debug!("Threading not ready, attempting lazy initialization");
        self.initialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{GeneratorCall, MockGenerator};

    #[test]
    fn test_starts_uninitialized() {
        let generator = MockGenerator::new();
        let negotiator = ThreadingNegotiator::new(&generator);

        assert_eq!(negotiator.state(), ThreadingState::Uninitialized);
        assert!(!negotiator.is_ready());
        // Probing must not initialize anything
        assert!(generator.calls().is_empty());
    }

    #[test]
    fn test_explicit_initialize() {
        let generator = MockGenerator::new();
        let negotiator = ThreadingNegotiator::new(&generator);

        negotiator.initialize().unwrap();
        assert_eq!(negotiator.state(), ThreadingState::Ready);

        // Repeat is a no-op from the caller's perspective
        negotiator.initialize().unwrap();
        assert_eq!(negotiator.state(), ThreadingState::Ready);
    }

    #[test]
    fn test_initialize_failure() {
        let generator = MockGenerator::new().threading_never_ready();
        let negotiator = ThreadingNegotiator::new(&generator);

        assert_eq!(negotiator.initialize(), Err(RngError::ThreadingUnavailable));
        assert_eq!(negotiator.state(), ThreadingState::Uninitialized);
    }

    #[test]
    fn test_ensure_ready_skips_init_when_ready() {
        let generator = MockGenerator::new().threading_ready();
        let negotiator = ThreadingNegotiator::new(&generator);

        negotiator.ensure_ready().unwrap();
        assert_eq!(generator.init_attempts(), 0);
    }

    #[test]
    fn test_ensure_ready_single_attempt() {
        let generator = MockGenerator::new().threading_never_ready();
        let negotiator = ThreadingNegotiator::new(&generator);

        assert_eq!(negotiator.ensure_ready(), Err(RngError::ThreadingUnavailable));
        assert_eq!(generator.calls(), vec![GeneratorCall::InitThreading]);
    }

    #[test]
    fn test_concurrent_initialize_is_idempotent() {
        let generator = crate::capability::SoftwareGenerator::new();

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    ThreadingNegotiator::new(&generator).initialize().unwrap();
                });
            }
        });

        assert!(ThreadingNegotiator::new(&generator).is_ready());
    }
}
