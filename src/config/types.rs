//! Enumerations and the entropy-source set carried by [`Config`](super::Config).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hash used to accumulate entropy across collection rounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashAlgorithm {
    /// SHA-256 - widely deployed, conservative default.
    #[default]
    Sha256,
    /// SHA-512 - wider state, used by the secure preset.
    Sha512,
    /// SHA-1 - legacy, kept for compatibility only.
    Sha1,
}

impl HashAlgorithm {
    /// Digest length in bytes.
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
            Self::Sha1 => 20,
        }
    }
}

/// Strategy for stretching the final digest into the requested length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpansionMode {
    /// Hash chaining with a little-endian block counter.
    #[default]
    Counter,
    /// HKDF expand, salted with the seed and bound to `info`.
    Hkdf,
    /// HMAC chaining keyed by the digest.
    HmacChain,
    /// Extendable-output expansion.
    Xof,
}

/// Whether entropy accumulation finalizes per round or runs continuously.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MixingMode {
    /// Each round is finalized and seeds the next one.
    RoundBased,
    /// A single accumulator spans every round (and every call).
    #[default]
    Continuous,
}

/// Synchronization the generator applies around a custom generation.
///
/// The callbacks for [`ThreadingMode::UserLock`] live on the
/// [`Config`](super::Config) itself as a [`UserLock`](super::UserLock).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreadingMode {
    /// Lock-free; concurrent use is the caller's problem.
    #[default]
    None,
    /// Generator-owned critical section.
    CriticalSection,
    /// Caller-supplied lock/unlock callbacks.
    UserLock,
}

/// Named bundle of defaults expanded by the generator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecurityPreset {
    /// Fewest sources, single round.
    Fast,
    /// All sources, moderate rounds.
    #[default]
    Balanced,
    /// All sources, many rounds, wider hash, HKDF expansion.
    Secure,
}

impl FromStr for SecurityPreset {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fast" => Ok(Self::Fast),
            "balanced" => Ok(Self::Balanced),
            "secure" => Ok(Self::Secure),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// Encoding applied to the final byte sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Bytes as produced.
    #[default]
    Raw,
    /// Lowercase hexadecimal text.
    Hex,
    /// Standard padded base64 text.
    Base64,
}

impl OutputMode {
    /// Buffer capacity needed to hold `size` raw bytes in this encoding.
    ///
    /// Raw is `size`, hex is `2 * size`, base64 is `4 * ceil(size / 3)`.
    pub fn capacity_for(self, size: usize) -> usize {
        match self {
            Self::Raw => size,
            Self::Hex => size * 2,
            Self::Base64 => size.div_ceil(3) * 4,
        }
    }

    /// Returns true for the text encodings.
    pub fn is_text(self) -> bool {
        !matches!(self, Self::Raw)
    }
}

impl FromStr for OutputMode {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "raw" => Ok(Self::Raw),
            "hex" => Ok(Self::Hex),
            "base64" => Ok(Self::Base64),
            _ => Err(UnknownName(s.to_string())),
        }
    }
}

/// Name that does not match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown name: {0}")]
pub struct UnknownName(pub String);

/// A named contributor of randomness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntropySource {
    /// CPU identity and clock readings.
    Cpu,
    /// Hardware random instruction (OS RNG in software).
    Rdrand,
    /// Memory layout.
    Memory,
    /// High-resolution performance counter.
    Perf,
    /// Disk metadata.
    Disk,
    /// Audio timing jitter.
    Audio,
    /// Battery state.
    Battery,
    /// Network statistics.
    Network,
}

impl EntropySource {
    /// Every source, in collection order.
    pub const ALL: [EntropySource; 8] = [
        Self::Cpu,
        Self::Rdrand,
        Self::Memory,
        Self::Perf,
        Self::Disk,
        Self::Audio,
        Self::Battery,
        Self::Network,
    ];

    /// Lowercase name used in configuration.
    pub fn name(self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Rdrand => "rdrand",
            Self::Memory => "memory",
            Self::Perf => "perf",
            Self::Disk => "disk",
            Self::Audio => "audio",
            Self::Battery => "battery",
            Self::Network => "network",
        }
    }

    fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl fmt::Display for EntropySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EntropySource {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|source| source.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Per-source enable flags.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntropySources {
    flags: u8,
}

impl EntropySources {
    /// Every source enabled.
    pub const fn all() -> Self {
        Self { flags: 0xFF }
    }

    /// No source enabled.
    pub const fn none() -> Self {
        Self { flags: 0 }
    }

    /// Builds a set from explicit sources.
    pub fn from_sources(sources: impl IntoIterator<Item = EntropySource>) -> Self {
        let mut set = Self::none();
        for source in sources {
            set.enable(source);
        }
        set
    }

    /// Enables a source.
    pub fn enable(&mut self, source: EntropySource) {
        self.flags |= source.bit();
    }

    /// Disables a source.
    pub fn disable(&mut self, source: EntropySource) {
        self.flags &= !source.bit();
    }

    /// Clears every flag.
    pub fn clear(&mut self) {
        self.flags = 0;
    }

    /// Enables the source with the given name.
    ///
    /// Returns false, leaving the set untouched, if the name is unknown.
    pub fn enable_named(&mut self, name: &str) -> bool {
        match name.parse::<EntropySource>() {
            Ok(source) => {
                self.enable(source);
                true
            }
            Err(_) => false,
        }
    }

    /// Returns true if `source` is enabled.
    pub fn contains(&self, source: EntropySource) -> bool {
        self.flags & source.bit() != 0
    }

    /// Returns true if no source is enabled.
    pub fn is_empty(&self) -> bool {
        self.flags == 0
    }

    /// Number of enabled sources.
    pub fn len(&self) -> usize {
        self.flags.count_ones() as usize
    }

    /// Enabled sources in collection order.
    pub fn iter(&self) -> impl Iterator<Item = EntropySource> + '_ {
        EntropySource::ALL
            .into_iter()
            .filter(move |source| self.contains(*source))
    }
}

impl Default for EntropySources {
    fn default() -> Self {
        Self::all()
    }
}

impl fmt::Debug for EntropySources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
