//! Server configuration, split by game domain

pub mod blocks;
pub mod general;
pub mod items;
pub mod mechanics;
pub mod utils;

use std::sync::Arc;

use crate::builder::{register, Declaration, RegistryBuilder};
use crate::error::ConfigResult;
use crate::registry::ConfigRegistry;

/// The full server declaration table, in file layout order
pub fn server_schema() -> Vec<Declaration> {
    let mut declarations = general::declarations();
    declarations.extend(blocks::declarations());
    declarations.extend(items::declarations());
    declarations.extend(mechanics::declarations());
    declarations
}

/// Build a fresh registry from [`server_schema`]
pub fn build_server_registry() -> ConfigResult<ConfigRegistry> {
    register(
        RegistryBuilder::new().with_translation_prefix(utils::TRANSLATION_PREFIX),
        &server_schema(),
    )
}

/// Server configuration: synced to clients and stored per world.
///
/// Built once per world load and handed to whatever needs it. Every field is a
/// live handle, so values applied through [`crate::ConfigLoader`] are visible
/// without rebuilding.
#[derive(Debug)]
pub struct ServerConfig {
    pub general: general::GeneralConfig,
    pub blocks: blocks::BlocksConfig,
    pub items: items::ItemsConfig,
    pub mechanics: mechanics::MechanicsConfig,
    registry: Arc<ConfigRegistry>,
}

impl ServerConfig {
    /// Build the registry and bind every setting
    pub fn build() -> ConfigResult<Arc<Self>> {
        let registry = Arc::new(build_server_registry()?);
        Self::from_registry(registry).map(Arc::new)
    }

    /// Bind every setting against an already built registry
    pub fn from_registry(registry: Arc<ConfigRegistry>) -> ConfigResult<Self> {
        Ok(Self {
            general: general::GeneralConfig::bind(&registry)?,
            blocks: blocks::BlocksConfig::bind(&registry)?,
            items: items::ItemsConfig::bind(&registry)?,
            mechanics: mechanics::MechanicsConfig::bind(&registry)?,
            registry,
        })
    }

    pub fn registry(&self) -> &Arc<ConfigRegistry> {
        &self.registry
    }
}
