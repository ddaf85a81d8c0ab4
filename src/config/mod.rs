//! Generation configuration.
//!
//! A [`Config`] selects the entropy-source mix, the hashing, expansion and
//! mixing strategy, the synchronization mode and the output encoding for a
//! custom generation. Configs start from a [`SecurityPreset`] expanded by
//! the generator and are then adjusted with [`Overrides`].

mod builder;
mod model;
mod settings;
mod types;

pub use builder::{build_config, Overrides};
pub use model::{Config, UserLock};
pub use settings::{GeneratorSettings, SettingsError};
pub use types::{
    EntropySource, EntropySources, ExpansionMode, HashAlgorithm, MixingMode, OutputMode,
    SecurityPreset, ThreadingMode, UnknownName,
};
