//! Declaration tables and the registration routine
//!
//! A schema is a flat list of [`Declaration`]s. [`register`] walks that list
//! and drives a [`SectionBuilder`]; [`RegistryBuilder`] is the builder that
//! produces a [`ConfigRegistry`].

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::accessor::{SettingHandle, Slot};
use crate::error::{ConfigError, ConfigResult};
use crate::registry::{ConfigRegistry, Section, SettingEntry};
use crate::validation::{
    validate_default, validate_doc, validate_domain, validate_name, Validatable,
};
use crate::value::{Domain, SettingEnum, Value};

/// One setting as written in a schema table
#[derive(Debug, Clone, PartialEq)]
pub struct SettingSpec {
    pub name: &'static str,
    pub default: Value,
    pub domain: Domain,
    pub doc: &'static [&'static str],
}

impl SettingSpec {
    pub fn new(
        name: &'static str,
        default: Value,
        domain: Domain,
        doc: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            default,
            domain,
            doc,
        }
    }

    pub fn boolean(name: &'static str, default: bool, doc: &'static [&'static str]) -> Self {
        Self::new(name, Value::Boolean(default), Domain::Boolean, doc)
    }

    pub fn int(
        name: &'static str,
        default: i32,
        min: i32,
        max: i32,
        doc: &'static [&'static str],
    ) -> Self {
        Self::new(name, Value::Integer(default), Domain::int(min, max), doc)
    }

    pub fn double(
        name: &'static str,
        default: f64,
        min: f64,
        max: f64,
        doc: &'static [&'static str],
    ) -> Self {
        Self::new(name, Value::Double(default), Domain::double(min, max), doc)
    }

    pub fn enumeration<E: SettingEnum>(
        name: &'static str,
        default: E,
        doc: &'static [&'static str],
    ) -> Self {
        Self::new(name, Value::Enum(default.name()), Domain::of_enum::<E>(), doc)
    }
}

impl Validatable for SettingSpec {
    fn validate(&self) -> ConfigResult<()> {
        validate_name(self.name, "setting")?;
        validate_domain(&self.domain, self.subject())?;
        validate_default(&self.default, &self.domain, self.subject())?;
        validate_doc(self.doc, self.subject())?;
        Ok(())
    }

    fn subject(&self) -> &str {
        self.name
    }
}

/// A schema table entry
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Open a nested section
    Push(&'static str),
    /// Close the innermost open section
    Pop,
    /// Declare a setting in the innermost open section
    Define(SettingSpec),
}

/// The section-building collaborator driven by [`register`]
pub trait SectionBuilder {
    type Handle;
    type Output;

    fn push(&mut self, name: &str) -> ConfigResult<()>;

    fn pop(&mut self) -> ConfigResult<()>;

    fn define(&mut self, spec: &SettingSpec) -> ConfigResult<Self::Handle>;

    /// Check the sequence was balanced and produce the result
    fn finish(self) -> ConfigResult<Self::Output>;
}

/// Feed a declaration table to a builder, stopping at the first error
pub fn register<B: SectionBuilder>(
    mut builder: B,
    declarations: &[Declaration],
) -> ConfigResult<B::Output> {
    for declaration in declarations {
        match declaration {
            Declaration::Push(name) => builder.push(name)?,
            Declaration::Pop => builder.pop()?,
            Declaration::Define(spec) => {
                builder.define(spec)?;
            }
        }
    }
    builder.finish()
}

/// Builds a [`ConfigRegistry`], enforcing every declaration invariant
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    translation_prefix: Option<String>,
    stack: Vec<String>,
    entries: Vec<SettingEntry>,
    index: HashMap<Arc<str>, usize>,
    sections: Vec<Section>,
    section_index: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefix for generated translation keys, e.g. `tfc.config.server`
    pub fn with_translation_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.translation_prefix = Some(prefix.into());
        self
    }

    /// Dotted path of the innermost open section, empty at the root
    pub fn current_path(&self) -> String {
        self.stack.join(".")
    }

    fn translation_key(&self, name: &str) -> String {
        match &self.translation_prefix {
            Some(prefix) => format!("{}.{}", prefix, name),
            None => name.to_string(),
        }
    }
}

impl SectionBuilder for RegistryBuilder {
    type Handle = SettingHandle;
    type Output = ConfigRegistry;

    fn push(&mut self, name: &str) -> ConfigResult<()> {
        validate_name(name, "section")?;
        self.stack.push(name.to_string());

        let path = self.current_path();
        if !self.section_index.contains_key(&path) {
            self.section_index.insert(path.clone(), self.sections.len());
            self.sections.push(Section {
                name: name.to_string(),
                depth: self.stack.len(),
                path,
                settings: Vec::new(),
            });
        }
        Ok(())
    }

    fn pop(&mut self) -> ConfigResult<()> {
        if self.stack.pop().is_none() {
            let last = self
                .entries
                .last()
                .map(|e| e.key.to_string())
                .unwrap_or_else(|| "start".to_string());
            return Err(ConfigError::SectionUnderflow { last });
        }
        Ok(())
    }

    fn define(&mut self, spec: &SettingSpec) -> ConfigResult<SettingHandle> {
        let section = self.current_path();
        if section.is_empty() {
            return Err(ConfigError::SettingOutsideSection(spec.name.to_string()));
        }

        spec.validate().map_err(|e| e.in_section(&section))?;
        let key: Arc<str> = Arc::from(format!("{}.{}", section, spec.name));
        if self.index.contains_key(&key) {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }

        let slot = Arc::new(Slot::new(Arc::clone(&key), spec.domain, spec.default));
        let translation_key = self.translation_key(spec.name);
        let position = self.entries.len();
        self.entries.push(SettingEntry {
            key: Arc::clone(&key),
            name: spec.name,
            translation_key,
            section: section.clone(),
            default: spec.default,
            domain: spec.domain,
            doc: spec.doc,
            slot: Arc::clone(&slot),
        });
        self.index.insert(key, position);
        if let Some(&i) = self.section_index.get(&section) {
            self.sections[i].settings.push(position);
        }

        Ok(SettingHandle::new(slot))
    }

    fn finish(self) -> ConfigResult<ConfigRegistry> {
        if !self.stack.is_empty() {
            return Err(ConfigError::UnbalancedSections {
                open: self.stack.join("."),
            });
        }

        debug!(
            settings = self.entries.len(),
            sections = self.sections.len(),
            "Configuration registry built"
        );

        Ok(ConfigRegistry::new(self.entries, self.index, self.sections))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(declarations: &[Declaration]) -> ConfigResult<ConfigRegistry> {
        register(RegistryBuilder::new(), declarations)
    }

    #[test]
    fn test_handle_reads_default_immediately() {
        let mut builder = RegistryBuilder::new();
        builder.push("general").unwrap();
        let handle = builder
            .define(&SettingSpec::double("chance", 0.5, 0.0, 1.0, &["A chance"]))
            .unwrap();
        builder.pop().unwrap();
        let registry = builder.finish().unwrap();

        assert_eq!(handle.get(), Value::Double(0.5));
        assert_eq!(handle.key(), "general.chance");
        assert_eq!(registry.current("general.chance"), Some(Value::Double(0.5)));
    }

    #[test]
    fn test_default_outside_range_returns_no_handle() {
        let mut builder = RegistryBuilder::new();
        builder.push("general").unwrap();
        let result = builder.define(&SettingSpec::int("limit", 101, 0, 100, &["Limit"]));
        assert!(matches!(
            result,
            Err(ConfigError::DefaultOutOfDomain { ref key, .. }) if key == "general.limit"
        ));
    }

    #[test]
    fn test_duplicate_key_is_fatal() {
        let result = build(&[
            Declaration::Push("heat"),
            Declaration::Define(SettingSpec::double("itemHeatingModifier", 1.0, 0.0, 10.0, &["x"])),
            Declaration::Define(SettingSpec::int("itemHeatingModifier", 10, 1, 20, &["y"])),
            Declaration::Pop,
        ]);
        assert!(matches!(result, Err(ConfigError::DuplicateKey(ref k)) if k == "heat.itemHeatingModifier"));
    }

    #[test]
    fn test_same_name_in_different_sections_is_allowed() {
        let registry = build(&[
            Declaration::Push("a"),
            Declaration::Define(SettingSpec::boolean("enabled", true, &["a"])),
            Declaration::Pop,
            Declaration::Push("b"),
            Declaration::Define(SettingSpec::boolean("enabled", false, &["b"])),
            Declaration::Pop,
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_unbalanced_push_is_fatal() {
        let result = build(&[
            Declaration::Push("blocks"),
            Declaration::Push("torch"),
            Declaration::Define(SettingSpec::int("torchTicks", 7200, -1, i32::MAX, &["t"])),
            Declaration::Pop,
        ]);
        assert!(matches!(result, Err(ConfigError::UnbalancedSections { ref open }) if open == "blocks"));
    }

    #[test]
    fn test_extra_pop_is_fatal() {
        let result = build(&[
            Declaration::Push("general"),
            Declaration::Pop,
            Declaration::Pop,
        ]);
        assert!(matches!(result, Err(ConfigError::SectionUnderflow { .. })));
    }

    #[test]
    fn test_setting_at_root_is_rejected() {
        let result = build(&[Declaration::Define(SettingSpec::boolean("loose", true, &["x"]))]);
        assert!(matches!(result, Err(ConfigError::SettingOutsideSection(_))));
    }

    #[test]
    fn test_reentered_section_is_merged() {
        let registry = build(&[
            Declaration::Push("blocks"),
            Declaration::Push("torch"),
            Declaration::Define(SettingSpec::int("torchTicks", 7200, -1, i32::MAX, &["t"])),
            Declaration::Pop,
            Declaration::Pop,
            Declaration::Push("blocks"),
            Declaration::Push("torch"),
            Declaration::Define(SettingSpec::boolean("enabled", true, &["e"])),
            Declaration::Pop,
            Declaration::Pop,
        ])
        .unwrap();

        let paths: Vec<&str> = registry.sections().iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["blocks", "blocks.torch"]);
        assert_eq!(registry.sections()[1].settings.len(), 2);
    }

    #[test]
    fn test_malformed_domain_is_fatal() {
        let result = build(&[
            Declaration::Push("player"),
            Declaration::Define(SettingSpec::int("window", 1, 6, 1, &["w"])),
            Declaration::Pop,
        ]);
        assert!(matches!(result, Err(ConfigError::InvalidDomain { .. })));
    }

    #[test]
    fn test_translation_prefix() {
        let registry = register(
            RegistryBuilder::new().with_translation_prefix("tfc.config.server"),
            &[
                Declaration::Push("general"),
                Declaration::Define(SettingSpec::boolean("enableNetherPortals", false, &["p"])),
                Declaration::Pop,
            ],
        )
        .unwrap();
        let entry = registry.entry("general.enableNetherPortals").unwrap();
        assert_eq!(entry.translation_key, "tfc.config.server.enableNetherPortals");
    }

    #[test]
    fn test_spec_validatable() {
        assert!(SettingSpec::double("ok", 0.5, 0.0, 1.0, &["x"]).validate().is_ok());
        assert!(SettingSpec::double("bad", 2.0, 0.0, 1.0, &["x"]).validate().is_err());
        assert!(SettingSpec::boolean("a.b", true, &["x"]).validate().is_err());
        assert!(SettingSpec::boolean("quiet", true, &[]).validate().is_err());
    }

    #[test]
    fn test_undocumented_setting_is_fatal() {
        let result = build(&[
            Declaration::Push("general"),
            Declaration::Define(SettingSpec::boolean("x", true, &[])),
            Declaration::Pop,
        ]);
        assert!(matches!(result, Err(ConfigError::MissingDoc(ref k)) if k == "general.x"));
    }

    #[test]
    fn test_malformed_domain_reports_full_key() {
        let result = build(&[
            Declaration::Push("mechanics"),
            Declaration::Push("player"),
            Declaration::Define(SettingSpec::int("window", 1, 6, 1, &["w"])),
            Declaration::Pop,
            Declaration::Pop,
        ]);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidDomain { ref key, .. }) if key == "mechanics.player.window"
        ));
    }
}
