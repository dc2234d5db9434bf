//! Game mechanics settings: heat, collapses and player needs

use crate::builder::Declaration;
use crate::domains::utils::{chance, double, flag, int, MAX_INT};
use crate::error::ConfigResult;
use crate::registry::ConfigRegistry;
use crate::{BooleanValue, DoubleValue, IntValue};

/// Settings under `mechanics.*`
#[derive(Debug, Clone)]
pub struct MechanicsConfig {
    pub heat: HeatConfig,
    pub collapses: CollapseConfig,
    pub player: PlayerConfig,
}

#[derive(Debug, Clone)]
pub struct HeatConfig {
    pub item_heating_modifier: DoubleValue,
    pub cool_heatables_in_level: BooleanValue,
    pub ticks_before_item_cool: IntValue,
}

#[derive(Debug, Clone)]
pub struct CollapseConfig {
    pub enable_block_collapsing: BooleanValue,
    pub enable_explosion_collapsing: BooleanValue,
    pub enable_block_landslides: BooleanValue,
    pub trigger_chance: DoubleValue,
    pub propagate_chance: DoubleValue,
    pub explosion_propagate_chance: DoubleValue,
    pub min_radius: IntValue,
    pub radius_variance: IntValue,
}

#[derive(Debug, Clone)]
pub struct PlayerConfig {
    pub peaceful_difficulty_passive_regeneration: BooleanValue,
    pub passive_exhaustion_multiplier: DoubleValue,
    pub thirst_modifier: DoubleValue,
    pub thirst_gained_from_drinking_in_the_rain: DoubleValue,
    pub natural_regeneration_modifier: DoubleValue,
    pub nutrition_rotation_hunger_window: IntValue,
    pub food_decay_stack_window: IntValue,
    pub food_decay_modifier: DoubleValue,
}

impl CollapseConfig {
    /// Inclusive bounds of a collapse radius: `[min, min + variance]`
    pub fn radius_bounds(&self) -> (i32, i32) {
        let min = self.min_radius.get();
        (min, min + self.radius_variance.get())
    }
}

impl MechanicsConfig {
    pub(crate) fn bind(registry: &ConfigRegistry) -> ConfigResult<Self> {
        Ok(Self {
            heat: HeatConfig {
                item_heating_modifier: registry.double("mechanics.heat.itemHeatingModifier")?,
                cool_heatables_in_level: registry.boolean("mechanics.heat.coolHeatablesinLevel")?,
                ticks_before_item_cool: registry.int("mechanics.heat.ticksBeforeItemCool")?,
            },
            collapses: CollapseConfig {
                enable_block_collapsing: registry
                    .boolean("mechanics.collapses.enableBlockCollapsing")?,
                enable_explosion_collapsing: registry
                    .boolean("mechanics.collapses.enableExplosionCollapsing")?,
                enable_block_landslides: registry
                    .boolean("mechanics.collapses.enableBlockLandslides")?,
                trigger_chance: registry.double("mechanics.collapses.collapseTriggerChance")?,
                propagate_chance: registry.double("mechanics.collapses.collapsePropagateChance")?,
                explosion_propagate_chance: registry
                    .double("mechanics.collapses.collapseExplosionPropagateChance")?,
                min_radius: registry.int("mechanics.collapses.collapseMinRadius")?,
                radius_variance: registry.int("mechanics.collapses.collapseRadiusVariance")?,
            },
            player: PlayerConfig {
                peaceful_difficulty_passive_regeneration: registry
                    .boolean("mechanics.player.peacefulDifficultyPassiveRegeneration")?,
                passive_exhaustion_multiplier: registry
                    .double("mechanics.player.passiveExhaustionMultiplier")?,
                thirst_modifier: registry.double("mechanics.player.thirstModifier")?,
                thirst_gained_from_drinking_in_the_rain: registry
                    .double("mechanics.player.thirstGainedFromDrinkingInTheRain")?,
                natural_regeneration_modifier: registry
                    .double("mechanics.player.naturalRegenerationModifier")?,
                nutrition_rotation_hunger_window: registry
                    .int("mechanics.player.nutritionRotationHungerWindow")?,
                food_decay_stack_window: registry.int("mechanics.player.foodDecayStackWindow")?,
                food_decay_modifier: registry.double("mechanics.player.foodDecayModifier")?,
            },
        })
    }
}

pub(crate) fn declarations() -> Vec<Declaration> {
    vec![
        Declaration::Push("mechanics"),
        Declaration::Push("heat"),
        double(
            "itemHeatingModifier",
            1.0,
            0.0,
            f64::MAX,
            &["A multiplier for how fast items heat and cool. Higher = faster."],
        ),
        flag(
            "coolHeatablesinLevel",
            true,
            &["Should heatable items cool off when in contact with blocks like water or snow?"],
        ),
        int(
            "ticksBeforeItemCool",
            10,
            1,
            MAX_INT,
            &["Ticks between each time an item loses temperature when sitting on a cold block. 20 ticks = 1 second."],
        ),
        Declaration::Pop,
        Declaration::Push("collapses"),
        flag(
            "enableBlockCollapsing",
            true,
            &["Enable rock collapsing when mining raw stone blocks"],
        ),
        flag(
            "enableExplosionCollapsing",
            true,
            &["Enable explosions causing immediate collapses."],
        ),
        flag(
            "enableBlockLandslides",
            true,
            &["Enable land slides (gravity affected blocks) when placing blocks or on block updates."],
        ),
        chance(
            "collapseTriggerChance",
            0.1,
            &["Chance for a collapse to be triggered by mining a block."],
        ),
        chance(
            "collapsePropagateChance",
            0.55,
            &["Chance for a block to fall from mining collapse. Higher = more likely."],
        ),
        chance(
            "collapseExplosionPropagateChance",
            0.3,
            &["Chance for a block to fall from an explosion triggered collapse. Higher = more likely."],
        ),
        int("collapseMinRadius", 3, 1, 32, &["Minimum radius for a collapse"]),
        int(
            "collapseRadiusVariance",
            16,
            1,
            32,
            &["Variance of the radius of a collapse. Total size is in [minRadius, minRadius + radiusVariance]"],
        ),
        Declaration::Pop,
        Declaration::Push("player"),
        flag(
            "peacefulDifficultyPassiveRegeneration",
            false,
            &["If peaceful difficulty should still have vanilla-esque passive regeneration of health, food, and hunger"],
        ),
        double(
            "passiveExhaustionMultiplier",
            1.0,
            0.0,
            100.0,
            &[
                "A multiplier for passive exhaustion accumulation.",
                "Exhaustion is the hidden stat which controls when you get hungry. In vanilla it is incremented by running and jumping for example. In TFC, exhaustion is added just by existing.",
                "1.0 = A full hunger bar's worth of exhaustion every 2.5 days. Set to zero to disable completely.",
            ],
        ),
        double(
            "thirstModifier",
            8.0,
            0.0,
            100.0,
            &[
                "A multiplier for how quickly the player gets thirsty.",
                "The player loses thirst in sync with when they lose hunger. This represents how much thirst they lose. 0 = None, 100 = the entire thirst bar.",
            ],
        ),
        double(
            "thirstGainedFromDrinkingInTheRain",
            5.0 / 24.0,
            0.0,
            100.0,
            &["How much thirst the player gains from drinking in the rain (standing outside in the rain and looking up) per tick."],
        ),
        double(
            "naturalRegenerationModifier",
            1.0,
            0.0,
            100.0,
            &[
                "A multiplier for how quickly the player regenerates health, under TFC's passive regeneration.",
                "By default, the player regenerates 0.2 HP/second, or 0.6 HP/second when above 80% hunger and thirst, where 1 HP = 1/50 of a heart.",
            ],
        ),
        int(
            "nutritionRotationHungerWindow",
            80,
            1,
            MAX_INT,
            &[
                "How much total hunger consumed is required to completely refresh the player's nutrition.",
                "Player nutrition in TFC is calculated based on nutrition of the last few foods eaten - this is how many foods are used to calculate nutrition. By default, all TFC foods restore 4 hunger.",
            ],
        ),
        int(
            "foodDecayStackWindow",
            1,
            1,
            100,
            &[
                "How many hours should different foods ignore when trying to stack together automatically?",
                "Food made with different creation dates doesn't stack by default, unless it's within a specific window. This is the number of hours that different foods will try and stack together at the loss of a little extra expiry time.",
            ],
        ),
        double(
            "foodDecayModifier",
            1.0,
            0.0,
            1000.0,
            &["A multiplier for food decay, or expiration times. Larger values will result in naturally longer expiration times."],
        ),
        Declaration::Pop,
        Declaration::Pop,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{register, RegistryBuilder};

    #[test]
    fn test_collapse_radius_bounds() {
        let registry = register(RegistryBuilder::new(), &declarations()).unwrap();
        let mechanics = MechanicsConfig::bind(&registry).unwrap();
        assert_eq!(mechanics.collapses.radius_bounds(), (3, 19));
    }

    #[test]
    fn test_heat_settings_have_distinct_keys() {
        let registry = register(RegistryBuilder::new(), &declarations()).unwrap();
        assert!(registry.contains("mechanics.heat.itemHeatingModifier"));
        assert!(registry.contains("mechanics.heat.ticksBeforeItemCool"));
        assert_eq!(registry.sections().iter().filter(|s| s.depth == 2).count(), 3);
    }
}
