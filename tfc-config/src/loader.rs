//! Value overrides and environment variable handling
//!
//! The registry has no write API of its own. Whatever persists or syncs
//! values (a world config file, a server-to-client packet) hands them over as
//! an [`OverrideSource`], and [`ConfigLoader`] corrects each value against its
//! domain before swapping it into the setting's slot.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{ConfigError, ConfigResult};
use crate::registry::ConfigRegistry;
use crate::value::{Correction, Domain, Value};

/// Supplies override values by setting key
pub trait OverrideSource {
    /// `None` when the source has nothing for `key`, otherwise the value or
    /// the reason it could not be read
    fn lookup(&self, key: &str, domain: &Domain) -> Option<Result<Value, String>>;

    /// The value for `key` already corrected against `domain`
    fn resolve(&self, key: &str, domain: &Domain) -> Option<Correction> {
        self.lookup(key, domain).map(|found| match found {
            Ok(value) => domain.correct(value),
            Err(reason) => Correction::Rejected(reason),
        })
    }
}

/// In-memory overrides, e.g. decoded from a sync packet
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, Value>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: Value) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.values.insert(key.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keys that do not name any setting in `registry`
    pub fn unknown_keys<'a>(&'a self, registry: &ConfigRegistry) -> Vec<&'a str> {
        let mut unknown: Vec<&str> = self
            .values
            .keys()
            .map(String::as_str)
            .filter(|k| !registry.contains(k))
            .collect();
        unknown.sort_unstable();
        unknown
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for MapSource {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut source = MapSource::new();
        for (key, value) in iter {
            source.insert(key, value);
        }
        source
    }
}

impl OverrideSource for MapSource {
    fn lookup(&self, key: &str, _domain: &Domain) -> Option<Result<Value, String>> {
        self.values.get(key).copied().map(Ok)
    }
}

/// Overrides read from `PREFIX_SECTION_PATH_NAME` environment variables
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// `blocks.torch.torchTicks` -> `TFC_BLOCKS_TORCH_TORCHTICKS`
    pub fn var_name(&self, key: &str) -> String {
        format!("{}_{}", self.prefix, key.replace('.', "_")).to_uppercase()
    }
}

impl EnvSource {
    fn raw(&self, name: &str) -> Option<Result<String, String>> {
        match std::env::var(name) {
            Ok(raw) => Some(Ok(raw)),
            Err(std::env::VarError::NotPresent) => None,
            Err(e) => Some(Err(format!("{}: {}", name, e))),
        }
    }
}

impl OverrideSource for EnvSource {
    fn lookup(&self, key: &str, domain: &Domain) -> Option<Result<Value, String>> {
        let name = self.var_name(key);
        let raw = self.raw(&name)?;
        Some(raw.and_then(|raw| domain.parse(&raw).map_err(|e| format!("{}: {}", name, e))))
    }

    fn resolve(&self, key: &str, domain: &Domain) -> Option<Correction> {
        let name = self.var_name(key);
        let correction = match self.raw(&name)? {
            Ok(raw) => match domain.read(&raw) {
                Correction::Rejected(reason) => {
                    Correction::Rejected(format!("{}: {}", name, reason))
                }
                correction => correction,
            },
            Err(reason) => Correction::Rejected(reason),
        };
        Some(correction)
    }
}

/// A value that could not be applied
#[derive(Debug, Clone, PartialEq)]
pub struct Rejection {
    pub key: String,
    pub reason: String,
}

/// What happened to each override
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverrideReport {
    /// Applied as given
    pub applied: Vec<String>,
    /// Applied after snapping to the nearest bound
    pub clamped: Vec<String>,
    /// Ignored; the setting kept its previous value
    pub rejected: Vec<Rejection>,
}

impl OverrideReport {
    pub fn is_clean(&self) -> bool {
        self.clamped.is_empty() && self.rejected.is_empty()
    }

    pub fn changed(&self) -> usize {
        self.applied.len() + self.clamped.len()
    }

    /// Fail if any value had to be corrected or was rejected
    pub fn ensure_clean(self) -> ConfigResult<Self> {
        if self.is_clean() {
            return Ok(self);
        }
        let mut problems: Vec<String> = self
            .clamped
            .iter()
            .map(|key| format!("{} (out of range)", key))
            .collect();
        problems.extend(
            self.rejected
                .iter()
                .map(|r| format!("{} ({})", r.key, r.reason)),
        );
        Err(ConfigError::OverridesRejected(problems.join(", ")))
    }
}

/// Applies overrides to a registry's settings
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new loader with the default `TFC` prefix
    pub fn new() -> Self {
        Self {
            prefix: "TFC".to_string(),
        }
    }

    /// Create a new loader with a custom environment prefix
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn env_source(&self) -> EnvSource {
        EnvSource::new(self.prefix.clone())
    }

    /// Apply overrides from prefixed environment variables
    pub fn apply_env(&self, registry: &ConfigRegistry) -> OverrideReport {
        self.apply(registry, &self.env_source())
    }

    /// Correct every value the source supplies and swap it in
    pub fn apply(&self, registry: &ConfigRegistry, source: &dyn OverrideSource) -> OverrideReport {
        let mut report = OverrideReport::default();

        for entry in registry.entries() {
            let key = &*entry.key;
            let correction = match source.resolve(key, &entry.domain) {
                None => continue,
                Some(Correction::Clamped(value)) if entry.domain.contains(&value) => {
                    Correction::Clamped(value)
                }
                // Only values the domain contains reach a slot
                Some(Correction::Accepted(value)) | Some(Correction::Clamped(value)) => {
                    entry.domain.correct(value)
                }
                Some(rejected) => rejected,
            };

            match correction {
                Correction::Accepted(value) => {
                    entry.slot.store(value);
                    report.applied.push(key.to_string());
                }
                Correction::Clamped(corrected) => {
                    warn!(key, applied = %corrected, "Override out of range, clamped");
                    entry.slot.store(corrected);
                    report.clamped.push(key.to_string());
                }
                Correction::Rejected(reason) => {
                    warn!(key, %reason, "Ignoring invalid override");
                    report.rejected.push(Rejection {
                        key: key.to_string(),
                        reason,
                    });
                }
            }
        }

        debug!(
            applied = report.applied.len(),
            clamped = report.clamped.len(),
            rejected = report.rejected.len(),
            "Overrides applied"
        );
        report
    }

    /// Put every setting back to its declared default
    pub fn reset_to_defaults(&self, registry: &ConfigRegistry) {
        for entry in registry.entries() {
            entry.slot.store(entry.default);
        }
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{register, Declaration, RegistryBuilder, SettingSpec};

    fn sample() -> ConfigRegistry {
        register(
            RegistryBuilder::new(),
            &[
                Declaration::Push("collapses"),
                Declaration::Define(SettingSpec::boolean("enabled", true, &["e"])),
                Declaration::Define(SettingSpec::int("minRadius", 3, 1, 32, &["r"])),
                Declaration::Define(SettingSpec::double("chance", 0.1, 0.0, 1.0, &["c"])),
                Declaration::Pop,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_apply_accepts_clamps_and_rejects() {
        let registry = sample();
        let source = MapSource::new()
            .with("collapses.enabled", Value::Boolean(false))
            .with("collapses.minRadius", Value::Integer(64))
            .with("collapses.chance", Value::Boolean(true));

        let report = ConfigLoader::new().apply(&registry, &source);

        assert_eq!(report.applied, vec!["collapses.enabled".to_string()]);
        assert_eq!(report.clamped, vec!["collapses.minRadius".to_string()]);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(report.rejected[0].key, "collapses.chance");
        assert_eq!(report.changed(), 2);

        assert_eq!(registry.current("collapses.enabled"), Some(Value::Boolean(false)));
        assert_eq!(registry.current("collapses.minRadius"), Some(Value::Integer(32)));
        assert_eq!(registry.current("collapses.chance"), Some(Value::Double(0.1)));
    }

    #[test]
    fn test_reset_to_defaults() {
        let registry = sample();
        let loader = ConfigLoader::new();
        loader.apply(
            &registry,
            &MapSource::new().with("collapses.minRadius", Value::Integer(10)),
        );
        assert_eq!(registry.current("collapses.minRadius"), Some(Value::Integer(10)));

        loader.reset_to_defaults(&registry);
        assert_eq!(registry.current("collapses.minRadius"), Some(Value::Integer(3)));
    }

    #[test]
    fn test_ensure_clean() {
        let registry = sample();
        let loader = ConfigLoader::new();

        let clean = loader.apply(
            &registry,
            &MapSource::new().with("collapses.chance", Value::Double(0.2)),
        );
        assert!(clean.ensure_clean().is_ok());

        let dirty = loader.apply(
            &registry,
            &MapSource::new().with("collapses.chance", Value::Double(2.0)),
        );
        let err = dirty.ensure_clean().unwrap_err();
        assert!(err.to_string().contains("collapses.chance"));
    }

    #[test]
    fn test_unknown_keys() {
        let registry = sample();
        let source: MapSource = vec![
            ("collapses.enabled", Value::Boolean(true)),
            ("collapses.typo", Value::Boolean(true)),
        ]
        .into_iter()
        .collect();
        assert_eq!(source.unknown_keys(&registry), vec!["collapses.typo"]);
    }

    #[test]
    fn test_env_var_name() {
        let source = EnvSource::new("TFC");
        assert_eq!(
            source.var_name("blocks.pit_kiln.pitKilnTicks"),
            "TFC_BLOCKS_PIT_KILN_PITKILNTICKS"
        );
    }
}
