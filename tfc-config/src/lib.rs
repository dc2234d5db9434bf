//! Typed, validated configuration registry for TerraFirmaCraft servers
//!
//! Settings are declared as data (see [`domains::server_schema`]), registered
//! into an immutable [`ConfigRegistry`], and read through lock-free typed
//! handles. [`ServerConfig`] bundles a handle for every server setting and is
//! passed explicitly to whatever needs configuration.

pub mod accessor;
pub mod builder;
pub mod error;
pub mod loader;
pub mod registry;
pub mod validation;
pub mod value;

// Server settings, by game domain
pub mod domains;

// Re-export main types
pub use accessor::{BooleanValue, DoubleValue, EnumValue, IntValue, SettingHandle};
pub use builder::{register, Declaration, RegistryBuilder, SectionBuilder, SettingSpec};
pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, EnvSource, MapSource, OverrideReport, OverrideSource};
pub use registry::{ConfigRegistry, ExportFormat, SettingDescriptor};
pub use value::{Domain, Kind, SettingEnum, Value};

// Re-export domain configurations
pub use domains::{
    blocks::BlocksConfig, build_server_registry, general::GeneralConfig, items::ItemSize,
    items::ItemsConfig, mechanics::MechanicsConfig, server_schema, ServerConfig,
};
