//! Hardware RNG Front-End Library
//!
//! A configurable front-end for hardware-backed entropy generators.
//! Negotiates what the generator supports, builds generation configs,
//! dispatches requests and derives typed random values from raw bytes.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! config → dispatch → capability → bytes → derived
//!              ↓
//!          threading (readiness negotiation)
//! ```
//!
//! # Design Principles
//!
//! - **Opaque generator**: all entropy comes through [`EntropyGenerator`]
//! - **Validate early**: bad arguments are rejected before the generator runs
//! - **No silent retries**: failures go straight back to the caller
//! - **No quality claims**: statistical quality is the generator's concern
//!
//! # Example
//!
//! ```no_run
//! use hwrng::{HardwareRng, Overrides, SecurityPreset, HashAlgorithm};
//!
//! let rng = HardwareRng::software();
//! assert!(rng.is_available());
//!
//! // Raw and tiered generation
//! let bytes = rng.generate(32).unwrap();
//! let strong = rng.generate_tiered(32, 7).unwrap();
//!
//! // Thread-safe generation initializes threading on first use
//! let shared = rng.generate_threadsafe(16, 2).unwrap();
//!
//! // Fully custom generation
//! let config = rng.create_config(
//!     SecurityPreset::Secure,
//!     Overrides {
//!         hash_algorithm: Some(HashAlgorithm::Sha256),
//!         ..Default::default()
//!     },
//! );
//! let output = rng.generate_custom(64, &config, None).unwrap();
//!
//! // Derived values
//! let roll = rng.generate_range(1, 7).unwrap();
//! let mut deck: Vec<u32> = (0..52).collect();
//! rng.shuffle(&mut deck).unwrap();
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod capability;
pub mod config;
pub mod derived;
pub mod dispatch;
pub mod error;
pub mod threading;

// Re-export commonly used types at crate root
pub use capability::{EntropyGenerator, MockGenerator, SoftwareGenerator};
pub use config::{
    Config, EntropySource, EntropySources, ExpansionMode, GeneratorSettings, HashAlgorithm,
    MixingMode, OutputMode, Overrides, SecurityPreset, ThreadingMode, UserLock,
};
pub use derived::byte_width;
pub use dispatch::{GeneratedOutput, HardwareRng};
pub use error::RngError;
pub use threading::{ThreadingNegotiator, ThreadingState};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
