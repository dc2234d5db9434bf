//! Shared bounds and helpers for the server schema

use crate::builder::{Declaration, SettingSpec};

/// Prefix for every server setting's translation key
pub const TRANSLATION_PREFIX: &str = "tfc.config.server";

/// Upper bound for unbounded integer settings
pub const MAX_INT: i32 = i32::MAX;

/// Upper bound for fluid capacities, in mB
pub const MAX_ALLOY: i32 = i32::MAX;

/// Bounds shared by every probability setting
pub const CHANCE_MIN: f64 = 0.0;
pub const CHANCE_MAX: f64 = 1.0;

/// A probability in `[0, 1]`
pub fn chance(name: &'static str, default: f64, doc: &'static [&'static str]) -> Declaration {
    Declaration::Define(SettingSpec::double(name, default, CHANCE_MIN, CHANCE_MAX, doc))
}

/// A fluid capacity in `[0, MAX_ALLOY]`
pub fn capacity(name: &'static str, default: i32, doc: &'static [&'static str]) -> Declaration {
    Declaration::Define(SettingSpec::int(name, default, 0, MAX_ALLOY, doc))
}

pub fn flag(name: &'static str, default: bool, doc: &'static [&'static str]) -> Declaration {
    Declaration::Define(SettingSpec::boolean(name, default, doc))
}

pub fn int(
    name: &'static str,
    default: i32,
    min: i32,
    max: i32,
    doc: &'static [&'static str],
) -> Declaration {
    Declaration::Define(SettingSpec::int(name, default, min, max, doc))
}

pub fn double(
    name: &'static str,
    default: f64,
    min: f64,
    max: f64,
    doc: &'static [&'static str],
) -> Declaration {
    Declaration::Define(SettingSpec::double(name, default, min, max, doc))
}
