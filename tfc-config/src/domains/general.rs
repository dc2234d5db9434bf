//! General server settings

use crate::builder::Declaration;
use crate::domains::utils::{chance, flag};
use crate::error::ConfigResult;
use crate::registry::ConfigRegistry;
use crate::{BooleanValue, DoubleValue};

/// Settings under `general`
#[derive(Debug, Clone)]
pub struct GeneralConfig {
    pub enable_nether_portals: BooleanValue,
    pub enable_forced_tfc_game_rules: BooleanValue,
    pub enable_fire_arrow_spreading: BooleanValue,
    pub fire_starter_chance: DoubleValue,
}

impl GeneralConfig {
    pub(crate) fn bind(registry: &ConfigRegistry) -> ConfigResult<Self> {
        Ok(Self {
            enable_nether_portals: registry.boolean("general.enableNetherPortals")?,
            enable_forced_tfc_game_rules: registry.boolean("general.enableForcedTFCGameRules")?,
            enable_fire_arrow_spreading: registry.boolean("general.enableFireArrowSpreading")?,
            fire_starter_chance: registry.double("general.fireStarterChance")?,
        })
    }
}

pub(crate) fn declarations() -> Vec<Declaration> {
    vec![
        Declaration::Push("general"),
        flag("enableNetherPortals", false, &["Enable nether portal creation"]),
        flag(
            "enableForcedTFCGameRules",
            true,
            &[
                "Forces a number of game rules to specific values.",
                "  naturalRegeneration = false (Health regen is much slower and not tied to extra saturation)",
                "  doInsomnia = false (No phantoms)",
                "  doTraderSpawning = false (No wandering traders)",
                "  doPatrolSpawning = false (No pillager patrols)",
            ],
        ),
        flag(
            "enableFireArrowSpreading",
            true,
            &["Enable fire arrows and fireballs to spread fire and light blocks."],
        ),
        chance(
            "fireStarterChance",
            0.5,
            &["Base probability for a firestarter to start a fire. May change based on circumstances"],
        ),
        Declaration::Pop,
    ]
}
