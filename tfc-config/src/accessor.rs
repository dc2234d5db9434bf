//! Typed read handles over shared value slots
//!
//! Every setting owns one [`Slot`]: a single `AtomicU64` holding the encoded
//! current value. Readers never lock; the override loader replaces the whole
//! encoding in one store, so a reader sees either the old or the new value.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::value::{Domain, SettingEnum, Value};

/// Shared storage for one setting's current value
#[derive(Debug)]
pub(crate) struct Slot {
    key: Arc<str>,
    domain: Domain,
    bits: AtomicU64,
}

impl Slot {
    /// Create a slot holding `initial`, which must already be inside `domain`
    pub(crate) fn new(key: Arc<str>, domain: Domain, initial: Value) -> Self {
        let bits = encode(&domain, &initial);
        Self {
            key,
            domain,
            bits: AtomicU64::new(bits),
        }
    }

    pub(crate) fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn domain(&self) -> &Domain {
        &self.domain
    }

    pub(crate) fn load(&self) -> Value {
        decode(&self.domain, self.bits.load(Ordering::Acquire))
    }

    /// Replace the current value; callers guarantee `value` is inside the domain
    pub(crate) fn store(&self, value: Value) {
        debug_assert!(self.domain.contains(&value), "{} outside domain", value);
        self.bits.store(encode(&self.domain, &value), Ordering::Release);
    }

    fn load_bits(&self) -> u64 {
        self.bits.load(Ordering::Acquire)
    }
}

fn encode(domain: &Domain, value: &Value) -> u64 {
    match value {
        Value::Boolean(v) => *v as u64,
        Value::Integer(v) => *v as i64 as u64,
        Value::Double(v) => v.to_bits(),
        Value::Enum(name) => domain.variant_index(name).unwrap_or(0) as u64,
    }
}

fn decode(domain: &Domain, bits: u64) -> Value {
    match domain {
        Domain::Boolean => Value::Boolean(bits != 0),
        Domain::Integer { .. } => Value::Integer(bits as i64 as i32),
        Domain::Double { .. } => Value::Double(f64::from_bits(bits)),
        Domain::Enum { variants } => Value::Enum(variants[bits as usize]),
    }
}

/// Untyped read handle, as returned when a setting is defined
#[derive(Clone)]
pub struct SettingHandle {
    slot: Arc<Slot>,
}

impl SettingHandle {
    pub(crate) fn new(slot: Arc<Slot>) -> Self {
        Self { slot }
    }

    pub fn get(&self) -> Value {
        self.slot.load()
    }

    pub fn key(&self) -> &str {
        self.slot.key()
    }

    pub fn domain(&self) -> &Domain {
        self.slot.domain()
    }
}

impl fmt::Debug for SettingHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key(), self.get())
    }
}

/// Read handle for a boolean setting
#[derive(Clone)]
pub struct BooleanValue {
    slot: Arc<Slot>,
}

/// Read handle for an integer setting
#[derive(Clone)]
pub struct IntValue {
    slot: Arc<Slot>,
}

/// Read handle for a double setting
#[derive(Clone)]
pub struct DoubleValue {
    slot: Arc<Slot>,
}

/// Read handle for an enum setting
pub struct EnumValue<E> {
    slot: Arc<Slot>,
    _marker: PhantomData<fn() -> E>,
}

impl BooleanValue {
    pub(crate) fn new(slot: Arc<Slot>) -> Self {
        Self { slot }
    }

    pub fn get(&self) -> bool {
        self.slot.load_bits() != 0
    }

    pub fn key(&self) -> &str {
        self.slot.key()
    }
}

impl IntValue {
    pub(crate) fn new(slot: Arc<Slot>) -> Self {
        Self { slot }
    }

    pub fn get(&self) -> i32 {
        self.slot.load_bits() as i64 as i32
    }

    pub fn key(&self) -> &str {
        self.slot.key()
    }

    /// Declared inclusive range
    pub fn range(&self) -> (i32, i32) {
        match self.slot.domain() {
            Domain::Integer { min, max } => (*min, *max),
            _ => unreachable!("IntValue bound to non-integer slot"),
        }
    }
}

impl DoubleValue {
    pub(crate) fn new(slot: Arc<Slot>) -> Self {
        Self { slot }
    }

    pub fn get(&self) -> f64 {
        f64::from_bits(self.slot.load_bits())
    }

    pub fn key(&self) -> &str {
        self.slot.key()
    }

    /// Declared inclusive range
    pub fn range(&self) -> (f64, f64) {
        match self.slot.domain() {
            Domain::Double { min, max } => (*min, *max),
            _ => unreachable!("DoubleValue bound to non-double slot"),
        }
    }
}

impl<E: SettingEnum> EnumValue<E> {
    pub(crate) fn new(slot: Arc<Slot>) -> Self {
        Self {
            slot,
            _marker: PhantomData,
        }
    }

    pub fn get(&self) -> E {
        // Binding checked that the slot's variants are exactly E::NAMES.
        E::from_index(self.slot.load_bits() as usize).unwrap_or(E::VARIANTS[0])
    }

    pub fn key(&self) -> &str {
        self.slot.key()
    }
}

impl<E> Clone for EnumValue<E> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
            _marker: PhantomData,
        }
    }
}

impl fmt::Debug for BooleanValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key(), self.get())
    }
}

impl fmt::Debug for IntValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.key(), self.get())
    }
}

impl fmt::Debug for DoubleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}", self.key(), self.get())
    }
}

impl<E: SettingEnum> fmt::Debug for EnumValue<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {:?}", self.key(), self.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(domain: Domain, initial: Value) -> Arc<Slot> {
        Arc::new(Slot::new(Arc::from("test.key"), domain, initial))
    }

    #[test]
    fn test_negative_integers_survive_encoding() {
        let handle = IntValue::new(slot(Domain::int(-1, i32::MAX), Value::Integer(-1)));
        assert_eq!(handle.get(), -1);
        assert_eq!(handle.range(), (-1, i32::MAX));
    }

    #[test]
    fn test_store_is_visible_through_clones() {
        let s = slot(Domain::double(0.0, 1.0), Value::Double(0.5));
        let a = DoubleValue::new(Arc::clone(&s));
        let b = a.clone();
        s.store(Value::Double(0.75));
        assert_eq!(a.get(), 0.75);
        assert_eq!(b.get(), 0.75);
        assert_eq!(s.load(), Value::Double(0.75));
    }

    #[test]
    fn test_enum_slot_round_trips_names() {
        let domain = Domain::Enum {
            variants: &["LOW", "MID", "HIGH"],
        };
        let s = slot(domain, Value::Enum("MID"));
        assert_eq!(s.load(), Value::Enum("MID"));
        s.store(Value::Enum("HIGH"));
        assert_eq!(s.load(), Value::Enum("HIGH"));
    }

    #[test]
    fn test_boolean_handle() {
        let s = slot(Domain::Boolean, Value::Boolean(true));
        let handle = BooleanValue::new(Arc::clone(&s));
        assert!(handle.get());
        s.store(Value::Boolean(false));
        assert!(!handle.get());
        assert_eq!(format!("{:?}", handle), "test.key = false");
    }
}
