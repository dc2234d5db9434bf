//! The built, immutable configuration registry

use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;

use crate::accessor::{BooleanValue, DoubleValue, EnumValue, IntValue, SettingHandle, Slot};
use crate::error::{ConfigError, ConfigResult};
use crate::value::{Domain, Kind, SettingEnum, Value};

/// One registered setting
#[derive(Debug)]
pub struct SettingEntry {
    pub key: Arc<str>,
    pub name: &'static str,
    pub translation_key: String,
    /// Dotted path of the owning section
    pub section: String,
    pub default: Value,
    pub domain: Domain,
    pub doc: &'static [&'static str],
    pub(crate) slot: Arc<Slot>,
}

impl SettingEntry {
    pub fn kind(&self) -> Kind {
        self.domain.kind()
    }

    pub fn current(&self) -> Value {
        self.slot.load()
    }

    pub fn descriptor(&self) -> SettingDescriptor {
        SettingDescriptor {
            key: self.key.to_string(),
            section: self.section.clone(),
            name: self.name.to_string(),
            kind: self.kind(),
            default: self.default,
            domain: self.domain,
            doc: self.doc.iter().map(|line| line.to_string()).collect(),
            translation_key: self.translation_key.clone(),
        }
    }
}

/// A node in the section tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub path: String,
    /// 1 for top-level sections
    pub depth: usize,
    /// Indices of the settings declared directly in this section
    pub settings: Vec<usize>,
}

/// Everything a host needs to lay out and document one setting
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingDescriptor {
    pub key: String,
    pub section: String,
    pub name: String,
    pub kind: Kind,
    pub default: Value,
    pub domain: Domain,
    pub doc: Vec<String>,
    pub translation_key: String,
}

/// Settings grouped by section, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaDocument {
    pub sections: Vec<SectionDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionDocument {
    pub path: String,
    pub settings: Vec<SettingDescriptor>,
}

/// Schema export format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Yaml,
    Json,
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "yaml" | "yml" => Ok(ExportFormat::Yaml),
            "json" => Ok(ExportFormat::Json),
            _ => Err(format!("Invalid export format: {}", s)),
        }
    }
}

/// Immutable set of declared settings with lock-free value access.
///
/// The shape never changes after construction. Values change only through
/// [`crate::loader::ConfigLoader`].
#[derive(Debug)]
pub struct ConfigRegistry {
    entries: Vec<SettingEntry>,
    index: HashMap<Arc<str>, usize>,
    sections: Vec<Section>,
}

impl ConfigRegistry {
    pub(crate) fn new(
        entries: Vec<SettingEntry>,
        index: HashMap<Arc<str>, usize>,
        sections: Vec<Section>,
    ) -> Self {
        Self {
            entries,
            index,
            sections,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All settings in declaration order
    pub fn entries(&self) -> &[SettingEntry] {
        &self.entries
    }

    /// Sections in order of first declaration
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn entry(&self, key: &str) -> Option<&SettingEntry> {
        self.index.get(key).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| &*e.key)
    }

    /// Current value of a setting
    pub fn current(&self, key: &str) -> Option<Value> {
        self.entry(key).map(SettingEntry::current)
    }

    pub fn descriptors(&self) -> Vec<SettingDescriptor> {
        self.entries.iter().map(SettingEntry::descriptor).collect()
    }

    /// Untyped handle to any setting
    pub fn handle(&self, key: &str) -> ConfigResult<SettingHandle> {
        self.lookup(key).map(|e| SettingHandle::new(Arc::clone(&e.slot)))
    }

    pub fn boolean(&self, key: &str) -> ConfigResult<BooleanValue> {
        let entry = self.lookup_kind(key, Kind::Boolean)?;
        Ok(BooleanValue::new(Arc::clone(&entry.slot)))
    }

    pub fn int(&self, key: &str) -> ConfigResult<IntValue> {
        let entry = self.lookup_kind(key, Kind::Integer)?;
        Ok(IntValue::new(Arc::clone(&entry.slot)))
    }

    pub fn double(&self, key: &str) -> ConfigResult<DoubleValue> {
        let entry = self.lookup_kind(key, Kind::Double)?;
        Ok(DoubleValue::new(Arc::clone(&entry.slot)))
    }

    /// Bind an enum handle; the declared variants must be exactly `E::NAMES`
    pub fn enumeration<E: SettingEnum>(&self, key: &str) -> ConfigResult<EnumValue<E>> {
        let entry = self.lookup_kind(key, Kind::Enum)?;
        match entry.domain {
            Domain::Enum { variants } if variants == E::NAMES => {
                Ok(EnumValue::new(Arc::clone(&entry.slot)))
            }
            _ => Err(ConfigError::EnumMismatch {
                key: key.to_string(),
                expected: E::NAMES.join(", "),
            }),
        }
    }

    /// Settings grouped by section, skipping sections that only hold subsections
    pub fn schema(&self) -> SchemaDocument {
        let sections = self
            .sections
            .iter()
            .filter(|s| !s.settings.is_empty())
            .map(|s| SectionDocument {
                path: s.path.clone(),
                settings: s
                    .settings
                    .iter()
                    .map(|&i| self.entries[i].descriptor())
                    .collect(),
            })
            .collect();
        SchemaDocument { sections }
    }

    /// Render the schema document
    pub fn export(&self, format: ExportFormat) -> ConfigResult<String> {
        let schema = self.schema();
        Ok(match format {
            ExportFormat::Yaml => serde_yaml::to_string(&schema)?,
            ExportFormat::Json => serde_json::to_string_pretty(&schema)?,
        })
    }

    /// Render the schema document into a file
    pub fn export_to_file(&self, path: impl AsRef<Path>, format: ExportFormat) -> ConfigResult<()> {
        let rendered = self.export(format)?;
        std::fs::write(path, rendered)?;
        Ok(())
    }

    fn lookup(&self, key: &str) -> ConfigResult<&SettingEntry> {
        self.entry(key)
            .ok_or_else(|| ConfigError::UnknownSetting(key.to_string()))
    }

    fn lookup_kind(&self, key: &str, expected: Kind) -> ConfigResult<&SettingEntry> {
        let entry = self.lookup(key)?;
        if entry.kind() != expected {
            return Err(ConfigError::KindMismatch {
                key: key.to_string(),
                expected: expected.as_str(),
                found: entry.kind().as_str(),
            });
        }
        Ok(entry)
    }
}
