//! Item settings: vessels, molds and jugs

use std::fmt;

use crate::builder::{Declaration, SettingSpec};
use crate::domains::utils::{capacity, chance};
use crate::error::ConfigResult;
use crate::registry::ConfigRegistry;
use crate::value::SettingEnum;
use crate::{DoubleValue, EnumValue, IntValue};

/// Item size classes, smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ItemSize {
    Tiny,
    VerySmall,
    Small,
    Normal,
    Large,
    VeryLarge,
    Huge,
}

impl SettingEnum for ItemSize {
    const VARIANTS: &'static [Self] = &[
        ItemSize::Tiny,
        ItemSize::VerySmall,
        ItemSize::Small,
        ItemSize::Normal,
        ItemSize::Large,
        ItemSize::VeryLarge,
        ItemSize::Huge,
    ];
    const NAMES: &'static [&'static str] = &[
        "TINY",
        "VERY_SMALL",
        "SMALL",
        "NORMAL",
        "LARGE",
        "VERY_LARGE",
        "HUGE",
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl ItemSize {
    /// Whether an item of this size fits where `limit` is the largest allowed size
    pub fn fits_within(self, limit: ItemSize) -> bool {
        self <= limit
    }
}

impl fmt::Display for ItemSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fluid capacities of every mold, in mB
#[derive(Debug, Clone)]
pub struct MoldCapacities {
    pub ingot: IntValue,
    pub pickaxe_head: IntValue,
    pub propick_head: IntValue,
    pub axe_head: IntValue,
    pub shovel_head: IntValue,
    pub hoe_head: IntValue,
    pub chisel_head: IntValue,
    pub hammer_head: IntValue,
    pub saw_blade: IntValue,
    pub javelin_head: IntValue,
    pub sword_blade: IntValue,
    pub mace_head: IntValue,
    pub knife_blade: IntValue,
    pub scythe_blade: IntValue,
}

/// Settings under `items.*`
#[derive(Debug, Clone)]
pub struct ItemsConfig {
    pub small_vessel_capacity: IntValue,
    pub small_vessel_maximum_item_size: EnumValue<ItemSize>,
    pub molds: MoldCapacities,
    pub jug_capacity: IntValue,
    pub jug_break_chance: DoubleValue,
}

impl ItemsConfig {
    pub(crate) fn bind(registry: &ConfigRegistry) -> ConfigResult<Self> {
        let mold = |name: &str| registry.int(&format!("items.molds.{}", name));

        Ok(Self {
            small_vessel_capacity: registry.int("items.small_vessel.smallVesselCapacity")?,
            small_vessel_maximum_item_size: registry
                .enumeration("items.small_vessel.smallVesselMaximumItemSize")?,
            molds: MoldCapacities {
                ingot: mold("moldIngotCapacity")?,
                pickaxe_head: mold("moldPickaxeHeadCapacity")?,
                propick_head: mold("moldPropickHeadCapacity")?,
                axe_head: mold("moldAxeHeadCapacity")?,
                shovel_head: mold("moldShovelHeadCapacity")?,
                hoe_head: mold("moldHoeHeadCapacity")?,
                chisel_head: mold("moldChiselHeadCapacity")?,
                hammer_head: mold("moldHammerHeadCapacity")?,
                saw_blade: mold("moldSawBladeCapacity")?,
                javelin_head: mold("moldJavelinHeadCapacity")?,
                sword_blade: mold("moldSwordBladeCapacity")?,
                mace_head: mold("moldMaceHeadCapacity")?,
                knife_blade: mold("moldKnifeBladeCapacity")?,
                scythe_blade: mold("moldScytheBladeCapacity")?,
            },
            jug_capacity: registry.int("items.jug.jugCapacity")?,
            jug_break_chance: registry.double("items.jug.jugBreakChance")?,
        })
    }
}

pub(crate) fn declarations() -> Vec<Declaration> {
    vec![
        Declaration::Push("items"),
        Declaration::Push("small_vessel"),
        capacity("smallVesselCapacity", 3000, &["Tank capacity of a small vessel (in mB)."]),
        Declaration::Define(SettingSpec::enumeration(
            "smallVesselMaximumItemSize",
            ItemSize::Small,
            &["The largest (inclusive) size of an item that is allowed in a small vessel."],
        )),
        Declaration::Pop,
        Declaration::Push("molds"),
        capacity("moldIngotCapacity", 100, &["Tank capacity of a Ingot mold (in mB)."]),
        capacity("moldPickaxeHeadCapacity", 100, &["Tank capacity of a Pickaxe Head mold (in mB)."]),
        capacity("moldPropickHeadCapacity", 100, &["Tank capacity of a Propick Head mold (in mB)."]),
        capacity("moldAxeHeadCapacity", 100, &["Tank capacity of a Axe Head mold (in mB)."]),
        capacity("moldShovelHeadCapacity", 100, &["Tank capacity of a Shovel Head mold (in mB)."]),
        capacity("moldHoeHeadCapacity", 100, &["Tank capacity of a Hoe Head mold (in mB)."]),
        capacity("moldChiselHeadCapacity", 100, &["Tank capacity of a Chisel Head mold (in mB)."]),
        capacity("moldHammerHeadCapacity", 100, &["Tank capacity of a Hammer Head mold (in mB)."]),
        capacity("moldSawBladeCapacity", 100, &["Tank capacity of a Saw Blade mold (in mB)."]),
        capacity("moldJavelinHeadCapacity", 100, &["Tank capacity of a Javelin Head mold (in mB)."]),
        capacity("moldSwordBladeCapacity", 200, &["Tank capacity of a Sword Blade mold (in mB)."]),
        capacity("moldMaceHeadCapacity", 200, &["Tank capacity of a Mace Head mold (in mB)."]),
        capacity("moldKnifeBladeCapacity", 100, &["Tank capacity of a Knife Blade mold (in mB)."]),
        capacity("moldScytheBladeCapacity", 100, &["Tank capacity of a Scythe Blade mold (in mB)."]),
        Declaration::Pop,
        Declaration::Push("jug"),
        capacity("jugCapacity", 100, &["Tank capacity of a ceramic jug (in mB)."]),
        chance("jugBreakChance", 0.02, &["The chance a jug will break after drinking."]),
        Declaration::Pop,
        Declaration::Pop,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_size_names_match_variants() {
        assert_eq!(ItemSize::VARIANTS.len(), ItemSize::NAMES.len());
        for (i, size) in ItemSize::VARIANTS.iter().enumerate() {
            assert_eq!(size.index(), i);
        }
        assert_eq!(ItemSize::VeryLarge.to_string(), "VERY_LARGE");
    }

    #[test]
    fn test_item_size_ordering() {
        assert!(ItemSize::Tiny.fits_within(ItemSize::Small));
        assert!(ItemSize::Small.fits_within(ItemSize::Small));
        assert!(!ItemSize::Normal.fits_within(ItemSize::Small));
        assert!(ItemSize::VeryLarge < ItemSize::Huge);
    }
}
