//! Declaration validation traits and utilities

use crate::error::{ConfigError, ConfigResult};
use crate::value::{Domain, Value};

/// Trait for validatable declarations
pub trait Validatable {
    /// Validate the declaration
    fn validate(&self) -> ConfigResult<()>;

    /// Name used in error reports
    fn subject(&self) -> &str;
}

/// Validate a section or setting name.
///
/// Names become segments of a dotted key, so they may not be empty, contain
/// `.` or carry surrounding whitespace.
pub fn validate_name(name: &str, what: &'static str) -> ConfigResult<()> {
    if name.is_empty() || name.contains('.') || name.trim() != name {
        return Err(ConfigError::InvalidName {
            what,
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Validate that a domain is well formed
pub fn validate_domain(domain: &Domain, key: &str) -> ConfigResult<()> {
    let message = match domain {
        Domain::Boolean => None,
        Domain::Integer { min, max } if min > max => {
            Some(format!("min {} is greater than max {}", min, max))
        }
        Domain::Integer { .. } => None,
        Domain::Double { min, max } if !min.is_finite() || !max.is_finite() => {
            Some(format!("bounds must be finite, got [{}, {}]", min, max))
        }
        Domain::Double { min, max } if min > max => {
            Some(format!("min {} is greater than max {}", min, max))
        }
        Domain::Double { .. } => None,
        Domain::Enum { variants } if variants.is_empty() => {
            Some("enum has no variants".to_string())
        }
        Domain::Enum { variants } => variants
            .iter()
            .enumerate()
            .find(|&(i, v)| variants[..i].contains(v))
            .map(|(_, v)| format!("variant {} is listed twice", v)),
    };

    match message {
        Some(message) => Err(ConfigError::InvalidDomain {
            key: key.to_string(),
            message,
        }),
        None => Ok(()),
    }
}

/// Validate that a default has the domain's kind and lies inside it
pub fn validate_default(default: &Value, domain: &Domain, key: &str) -> ConfigResult<()> {
    if !domain.contains(default) {
        return Err(ConfigError::DefaultOutOfDomain {
            key: key.to_string(),
            default: format!("{} ({})", default, default.kind()),
            domain: format!("{} {}", domain.kind(), domain),
        });
    }
    Ok(())
}

/// Validate that a setting has at least one non-blank documentation line
pub fn validate_doc(doc: &[&str], key: &str) -> ConfigResult<()> {
    if doc.iter().all(|line| line.trim().is_empty()) {
        return Err(ConfigError::MissingDoc(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("pit_kiln", "section").is_ok());
        assert!(validate_name("torchTicks", "setting").is_ok());
        assert!(validate_name("", "section").is_err());
        assert!(validate_name("blocks.torch", "section").is_err());
        assert!(validate_name(" torch", "section").is_err());
    }

    #[test]
    fn test_validate_domain() {
        assert!(validate_domain(&Domain::int(-1, i32::MAX), "k").is_ok());
        assert!(validate_domain(&Domain::int(6, 1), "k").is_err());
        assert!(validate_domain(&Domain::double(0.0, f64::MAX), "k").is_ok());
        assert!(validate_domain(&Domain::double(0.0, f64::INFINITY), "k").is_err());
        assert!(validate_domain(&Domain::double(f64::NAN, 1.0), "k").is_err());
        assert!(validate_domain(&Domain::Enum { variants: &[] }, "k").is_err());
        assert!(validate_domain(&Domain::Enum { variants: &["A", "B", "A"] }, "k").is_err());
    }

    #[test]
    fn test_validate_default() {
        let domain = Domain::int(0, 100);
        assert!(validate_default(&Value::Integer(100), &domain, "k").is_ok());

        let err = validate_default(&Value::Integer(101), &domain, "k").unwrap_err();
        assert!(matches!(err, ConfigError::DefaultOutOfDomain { .. }));

        // Right value, wrong kind
        assert!(validate_default(&Value::Double(50.0), &domain, "k").is_err());
    }

    #[test]
    fn test_validate_doc() {
        assert!(validate_doc(&["Number of ticks"], "k").is_ok());
        assert!(validate_doc(&["", "Second line"], "k").is_ok());
        assert!(matches!(validate_doc(&[], "k"), Err(ConfigError::MissingDoc(_))));
        assert!(validate_doc(&["  "], "k").is_err());
    }
}
