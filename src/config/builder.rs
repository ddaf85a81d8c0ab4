//! Preset expansion and explicit overrides.

use super::model::{Config, UserLock};
use super::types::{
    EntropySources, ExpansionMode, HashAlgorithm, MixingMode, OutputMode, SecurityPreset,
    ThreadingMode,
};
use crate::capability::EntropyGenerator;

/// Explicit settings layered over a preset's defaults.
///
/// Every field left as `None` keeps the value the preset produced.
#[derive(Debug, Clone, Default)]
pub struct Overrides<'a> {
    /// Digest used for mixing and expansion.
    pub hash_algorithm: Option<HashAlgorithm>,
    /// How the final digest is stretched.
    pub expansion_mode: Option<ExpansionMode>,
    /// Output encoding.
    pub output_mode: Option<OutputMode>,
    /// Collection rounds.
    pub complexity: Option<i32>,
    /// Round-based or continuous mixing.
    pub mixing_mode: Option<MixingMode>,
    /// Synchronization used by custom generation.
    pub threading_mode: Option<ThreadingMode>,
    /// Callbacks for [`ThreadingMode::UserLock`].
    pub user_lock: Option<UserLock>,
    /// Borrowed seed material; must outlive the built config.
    pub seed: Option<&'a [u8]>,
    /// Borrowed HKDF context; must outlive the built config.
    pub info: Option<&'a [u8]>,
    /// Exact set of source names to enable. Unknown names are ignored.
    pub sources: Option<Vec<&'a str>>,
}

/// Builds a [`Config`] from the generator's preset defaults plus overrides.
///
/// Overrides are applied in a fixed order: hash algorithm, expansion mode,
/// output mode, complexity, mixing mode, threading mode. Building never
/// fails; bad combinations only surface when generation is attempted.
pub fn build_config<'a, G>(generator: &G, preset: SecurityPreset, overrides: Overrides<'a>) -> Config<'a>
where
    G: EntropyGenerator + ?Sized,
{
    let mut config: Config<'a> = generator.default_config(preset);

    if let Some(hash_algorithm) = overrides.hash_algorithm {
        config.hash_algorithm = hash_algorithm;
    }
    if let Some(expansion_mode) = overrides.expansion_mode {
        config.expansion_mode = expansion_mode;
    }
    if let Some(output_mode) = overrides.output_mode {
        config.output_mode = output_mode;
    }
    if let Some(complexity) = overrides.complexity {
        config.complexity = complexity;
    }
    if let Some(mixing_mode) = overrides.mixing_mode {
        config.mixing_mode = mixing_mode;
    }
    if let Some(threading_mode) = overrides.threading_mode {
        config.threading_mode = threading_mode;
    }
    if let Some(user_lock) = overrides.user_lock {
        config.user_lock = Some(user_lock);
    }

    if let Some(seed) = overrides.seed {
        config.seed = Some(seed);
    }
    if let Some(info) = overrides.info {
        config.info = Some(info);
    }

    if let Some(names) = overrides.sources {
        let mut sources = EntropySources::none();
        for name in names {
            if !sources.enable_named(name) {
                tracing::debug!(source = name, "Ignoring unknown entropy source");
            }
        }
        config.sources = sources;
    }

    tracing::trace!(?preset, ?config, "Built generation config");
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{GeneratorCall, MockGenerator};
    use crate::config::EntropySource;

    #[test]
    fn test_no_overrides_keeps_preset() {
        let generator = MockGenerator::new();
        let config = build_config(&generator, SecurityPreset::Secure, Overrides::default());

        let preset = Config::for_preset(SecurityPreset::Secure);
        assert_eq!(config.hash_algorithm, preset.hash_algorithm);
        assert_eq!(config.complexity, preset.complexity);
        assert_eq!(config.sources, preset.sources);
        assert!(config.seed.is_none());
        assert_eq!(
            generator.calls(),
            vec![GeneratorCall::DefaultConfig(SecurityPreset::Secure)]
        );
    }

    #[test]
    fn test_overrides_replace_fields() {
        let generator = MockGenerator::new();
        let seed = b"custom seed".to_vec();
        let info = b"context".to_vec();

        let config = build_config(
            &generator,
            SecurityPreset::Fast,
            Overrides {
                hash_algorithm: Some(HashAlgorithm::Sha1),
                expansion_mode: Some(ExpansionMode::HmacChain),
                output_mode: Some(OutputMode::Base64),
                complexity: Some(7),
                mixing_mode: Some(MixingMode::Continuous),
                threading_mode: Some(ThreadingMode::CriticalSection),
                seed: Some(&seed),
                info: Some(&info),
                ..Default::default()
            },
        );

        assert_eq!(config.hash_algorithm, HashAlgorithm::Sha1);
        assert_eq!(config.expansion_mode, ExpansionMode::HmacChain);
        assert_eq!(config.output_mode, OutputMode::Base64);
        assert_eq!(config.complexity, 7);
        assert_eq!(config.mixing_mode, MixingMode::Continuous);
        assert_eq!(config.threading_mode, ThreadingMode::CriticalSection);
        assert_eq!(config.seed, Some(&seed[..]));
        assert_eq!(config.info, Some(&info[..]));
    }

    #[test]
    fn test_sources_replace_preset_exactly() {
        let generator = MockGenerator::new();
        let config = build_config(
            &generator,
            SecurityPreset::Balanced,
            Overrides {
                sources: Some(vec!["memory", "network"]),
                ..Default::default()
            },
        );

        let enabled: Vec<_> = config.sources.iter().collect();
        assert_eq!(enabled, vec![EntropySource::Memory, EntropySource::Network]);
    }

    #[test]
    fn test_unknown_source_names_ignored() {
        let generator = MockGenerator::new();
        let config = build_config(
            &generator,
            SecurityPreset::Balanced,
            Overrides {
                sources: Some(vec!["cpu", "lava-lamp", "disk"]),
                ..Default::default()
            },
        );

        assert_eq!(config.sources.len(), 2);
        assert!(config.sources.contains(EntropySource::Cpu));
        assert!(config.sources.contains(EntropySource::Disk));
    }

    #[test]
    fn test_empty_sources_is_legal() {
        let generator = MockGenerator::new();
        let config = build_config(
            &generator,
            SecurityPreset::Balanced,
            Overrides {
                sources: Some(Vec::new()),
                ..Default::default()
            },
        );

        assert!(config.sources.is_empty());
    }

    #[test]
    fn test_user_lock_attached() {
        let generator = MockGenerator::new();
        let config = build_config(
            &generator,
            SecurityPreset::Balanced,
            Overrides {
                threading_mode: Some(ThreadingMode::UserLock),
                user_lock: Some(UserLock::new(|| {}, || {})),
                ..Default::default()
            },
        );

        assert_eq!(config.threading_mode, ThreadingMode::UserLock);
        assert!(config.user_lock.is_some());
    }
}
