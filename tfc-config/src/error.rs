//! Configuration error types

use thiserror::Error;

/// Configuration result type
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration errors
///
/// Everything up to `SettingOutsideSection` is a construction-time defect in
/// the schema itself; the registry is never returned when one of them occurs.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A setting's default value lies outside its declared domain
    #[error("Default for {key} is {default}, outside of {domain}")]
    DefaultOutOfDomain {
        key: String,
        default: String,
        domain: String,
    },

    /// The domain itself is malformed (inverted range, NaN bound, no variants)
    #[error("Invalid domain for {key}: {message}")]
    InvalidDomain { key: String, message: String },

    /// Section or setting name is empty or contains a path separator
    #[error("Invalid {what} name '{name}'")]
    InvalidName { what: &'static str, name: String },

    /// Two settings resolve to the same dotted key
    #[error("Duplicate setting key: {0}")]
    DuplicateKey(String),

    /// `pop` was called with no open section
    #[error("Section pop without matching push (after {last})")]
    SectionUnderflow { last: String },

    /// Construction finished with sections still open
    #[error("Unbalanced sections, still open: {open}")]
    UnbalancedSections { open: String },

    /// A setting was declared without any documentation lines
    #[error("Setting {0} has no documentation")]
    MissingDoc(String),

    /// A setting was declared at the root, outside of any section
    #[error("Setting {0} must be declared inside a section")]
    SettingOutsideSection(String),

    /// Binding an accessor to a key that was never declared
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    /// Binding an accessor of the wrong kind
    #[error("Setting {key} is {found}, not {expected}")]
    KindMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Binding an enum accessor whose variant set differs from the declaration
    #[error("Setting {key} does not use enum variants [{expected}]")]
    EnumMismatch { key: String, expected: String },

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// Strict override application found values it could not use
    #[error("Rejected overrides: {0}")]
    OverridesRejected(String),

    /// IO error writing an export
    #[error("Failed to write export: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML serialization error
    #[error("Failed to serialize YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// JSON serialization error
    #[error("Failed to serialize JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ConfigError {
    /// Whether this error means the schema declarations themselves are broken
    pub fn is_schema_defect(&self) -> bool {
        matches!(
            self,
            ConfigError::DefaultOutOfDomain { .. }
                | ConfigError::InvalidDomain { .. }
                | ConfigError::InvalidName { .. }
                | ConfigError::DuplicateKey(_)
                | ConfigError::SectionUnderflow { .. }
                | ConfigError::UnbalancedSections { .. }
                | ConfigError::MissingDoc(_)
                | ConfigError::SettingOutsideSection(_)
        )
    }

    /// Prefix the key of a setting-level error with its section path
    pub fn in_section(self, section: &str) -> Self {
        let qualify = |key: String| format!("{}.{}", section, key);
        match self {
            ConfigError::DefaultOutOfDomain {
                key,
                default,
                domain,
            } => ConfigError::DefaultOutOfDomain {
                key: qualify(key),
                default,
                domain,
            },
            ConfigError::InvalidDomain { key, message } => ConfigError::InvalidDomain {
                key: qualify(key),
                message,
            },
            ConfigError::MissingDoc(key) => ConfigError::MissingDoc(qualify(key)),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_defect_classification() {
        assert!(ConfigError::DuplicateKey("a.b".into()).is_schema_defect());
        assert!(ConfigError::UnbalancedSections { open: "blocks".into() }.is_schema_defect());
        assert!(!ConfigError::UnknownSetting("a.b".into()).is_schema_defect());
        assert!(!ConfigError::EnvError("bad".into()).is_schema_defect());
    }

    #[test]
    fn test_in_section_qualifies_keys() {
        let err = ConfigError::MissingDoc("torchTicks".into()).in_section("blocks.torch");
        assert_eq!(err.to_string(), "Setting blocks.torch.torchTicks has no documentation");

        let err = ConfigError::DuplicateKey("a.b".into()).in_section("c");
        assert!(matches!(err, ConfigError::DuplicateKey(ref k) if k == "a.b"));
    }

    #[test]
    fn test_error_messages() {
        let err = ConfigError::DefaultOutOfDomain {
            key: "general.limit".into(),
            default: "101".into(),
            domain: "[0, 100]".into(),
        };
        assert_eq!(
            err.to_string(),
            "Default for general.limit is 101, outside of [0, 100]"
        );
    }
}
