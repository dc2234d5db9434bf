//! Block behaviour settings

use crate::builder::Declaration;
use crate::domains::utils::{capacity, chance, flag, int, MAX_INT};
use crate::error::ConfigResult;
use crate::registry::ConfigRegistry;
use crate::{BooleanValue, DoubleValue, IntValue};

/// Settings under `blocks.*`
#[derive(Debug, Clone)]
pub struct BlocksConfig {
    pub enable_farmland_creation: BooleanValue,
    pub enable_grass_path_creation: BooleanValue,
    pub enable_snow_slow_entities: BooleanValue,
    pub plant_growth_chance: DoubleValue,
    pub enable_leaves_slow_entities: BooleanValue,
    pub enable_mossy_rock_spreading: BooleanValue,
    pub mossy_rock_spread_rate: IntValue,
    /// `-1` disables burnout
    pub torch_ticks: IntValue,
    pub charcoal_ticks: IntValue,
    pub pit_kiln_ticks: IntValue,
    pub pit_kiln_temperature: IntValue,
    pub crucible_capacity: IntValue,
    pub crucible_pouring_rate: IntValue,
}

impl BlocksConfig {
    pub(crate) fn bind(registry: &ConfigRegistry) -> ConfigResult<Self> {
        Ok(Self {
            enable_farmland_creation: registry.boolean("blocks.farmland.enableFarmlandCreation")?,
            enable_grass_path_creation: registry
                .boolean("blocks.grassPath.enableGrassPathCreation")?,
            enable_snow_slow_entities: registry.boolean("blocks.snow.enableSnowSlowEntities")?,
            plant_growth_chance: registry.double("blocks.plants.plantGrowthChance")?,
            enable_leaves_slow_entities: registry
                .boolean("blocks.leaves.enableLeavesSlowEntities")?,
            enable_mossy_rock_spreading: registry
                .boolean("blocks.cobblestone.enableMossyRockSpreading")?,
            mossy_rock_spread_rate: registry.int("blocks.cobblestone.mossyRockSpreadRate")?,
            torch_ticks: registry.int("blocks.torch.torchTicks")?,
            charcoal_ticks: registry.int("blocks.charcoal.charcoalTicks")?,
            pit_kiln_ticks: registry.int("blocks.pit_kiln.pitKilnTicks")?,
            pit_kiln_temperature: registry.int("blocks.pit_kiln.pitKilnTemperature")?,
            crucible_capacity: registry.int("blocks.crucible.crucibleCapacity")?,
            crucible_pouring_rate: registry.int("blocks.crucible.cruciblePouringRate")?,
        })
    }
}

pub(crate) fn declarations() -> Vec<Declaration> {
    vec![
        Declaration::Push("blocks"),
        Declaration::Push("farmland"),
        flag(
            "enableFarmlandCreation",
            true,
            &["If TFC soil blocks are able to be created into farmland"],
        ),
        Declaration::Pop,
        Declaration::Push("grassPath"),
        flag(
            "enableGrassPathCreation",
            true,
            &["If TFC soil blocks are able to be created into (grass) path blocks."],
        ),
        Declaration::Pop,
        Declaration::Push("snow"),
        flag(
            "enableSnowSlowEntities",
            true,
            &["[Requires MC Restart] If snow will slow players that move on top of it similar to soul sand or honey."],
        ),
        Declaration::Pop,
        Declaration::Push("plants"),
        chance(
            "plantGrowthChance",
            0.05,
            &["Chance for a plant to grow each random tick, does not include crops. Lower = slower growth. Set to 0 to disable random plant growth."],
        ),
        Declaration::Pop,
        Declaration::Push("leaves"),
        flag(
            "enableLeavesSlowEntities",
            true,
            &["If leaves will slow entities passing through them and reduce fall damage."],
        ),
        Declaration::Pop,
        Declaration::Push("cobblestone"),
        flag(
            "enableMossyRockSpreading",
            true,
            &["If mossy rock blocks will spread their moss to nearby rock blocks (bricks and cobble; stairs, slabs and walls thereof)."],
        ),
        int(
            "mossyRockSpreadRate",
            20,
            1,
            MAX_INT,
            &["The rate at which rock blocks will accumulate moss. Higher value = slower."],
        ),
        Declaration::Pop,
        Declaration::Push("torch"),
        int(
            "torchTicks",
            7200,
            -1,
            MAX_INT,
            &["Number of ticks required for a torch to burn out (1000 = 1 in game hour = 50 seconds), default is 7.2 hours. Set to -1 to disable torch burnout."],
        ),
        Declaration::Pop,
        Declaration::Push("charcoal"),
        int(
            "charcoalTicks",
            18000,
            -1,
            MAX_INT,
            &["Number of ticks required for charcoal pit to complete. (1000 = 1 in game hour = 50 seconds), default is 18 hours."],
        ),
        Declaration::Pop,
        Declaration::Push("pit_kiln"),
        int(
            "pitKilnTicks",
            8000,
            20,
            MAX_INT,
            &["Number of ticks required for a pit kiln to burn out. (1000 = 1 in game hour = 50 seconds), default is 8 hours."],
        ),
        int(
            "pitKilnTemperature",
            1600,
            0,
            MAX_INT,
            &["The maximum temperature which a pit kiln reaches. (1200 = Yellow**, 1600 = Brilliant White, for reference)."],
        ),
        Declaration::Pop,
        Declaration::Push("crucible"),
        capacity("crucibleCapacity", 4000, &["Tank capacity of a crucible (in mB)."]),
        int(
            "cruciblePouringRate",
            4,
            1,
            MAX_INT,
            &["A modifier for how fast fluid containers empty into crucibles. Containers will empty 1 mB every (this) number of ticks."],
        ),
        Declaration::Pop,
        Declaration::Pop,
    ]
}
