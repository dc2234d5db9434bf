//! Setting kinds, domains and values

use serde::Serialize;
use std::fmt;
use std::num::IntErrorKind;

/// The four kinds of setting the registry knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Boolean,
    Integer,
    Double,
    Enum,
}

impl Kind {
    pub fn as_str(self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Double => "double",
            Kind::Enum => "enum",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of values a setting may legally hold
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Domain {
    Boolean,
    Integer { min: i32, max: i32 },
    Double { min: f64, max: f64 },
    Enum { variants: &'static [&'static str] },
}

impl Domain {
    /// Inclusive integer range
    pub const fn int(min: i32, max: i32) -> Self {
        Domain::Integer { min, max }
    }

    /// Inclusive double range
    pub const fn double(min: f64, max: f64) -> Self {
        Domain::Double { min, max }
    }

    /// All variants of a setting enum
    pub fn of_enum<E: SettingEnum>() -> Self {
        Domain::Enum { variants: E::NAMES }
    }

    pub fn kind(&self) -> Kind {
        match self {
            Domain::Boolean => Kind::Boolean,
            Domain::Integer { .. } => Kind::Integer,
            Domain::Double { .. } => Kind::Double,
            Domain::Enum { .. } => Kind::Enum,
        }
    }

    /// Whether `value` has the right kind and lies inside the domain
    pub fn contains(&self, value: &Value) -> bool {
        match (self, value) {
            (Domain::Boolean, Value::Boolean(_)) => true,
            (Domain::Integer { min, max }, Value::Integer(v)) => (*min..=*max).contains(v),
            (Domain::Double { min, max }, Value::Double(v)) => *min <= *v && *v <= *max,
            (Domain::Enum { variants }, Value::Enum(name)) => variants.contains(name),
            _ => false,
        }
    }

    /// Position of an enum variant name, matched exactly
    pub fn variant_index(&self, name: &str) -> Option<usize> {
        match self {
            Domain::Enum { variants } => variants.iter().position(|v| *v == name),
            _ => None,
        }
    }

    /// Bring a value of the right kind into range.
    ///
    /// Numbers outside the range snap to the nearest bound. Values of the wrong
    /// kind, NaN doubles and unknown enum variants cannot be corrected.
    pub fn correct(&self, value: Value) -> Correction {
        if self.contains(&value) {
            return Correction::Accepted(value);
        }
        match (self, value) {
            (Domain::Integer { min, max }, Value::Integer(v)) => {
                Correction::Clamped(Value::Integer(v.clamp(*min, *max)))
            }
            (Domain::Double { min, max }, Value::Double(v)) if !v.is_nan() => {
                Correction::Clamped(Value::Double(v.clamp(*min, *max)))
            }
            (_, value) if value.kind() != self.kind() => Correction::Rejected(format!(
                "expected {}, got {}",
                self.kind(),
                value.kind()
            )),
            (_, value) => Correction::Rejected(format!("{} is not in {}", value, self)),
        }
    }

    /// Parse a textual value and correct it against this domain.
    ///
    /// Integer text past the `i32` range is still a number, so it clamps to
    /// the nearest bound like any other out-of-range integer.
    pub fn read(&self, raw: &str) -> Correction {
        if let Domain::Integer { min, max } = *self {
            let raw = raw.trim();
            return match raw.parse::<i32>() {
                Ok(v) => self.correct(Value::Integer(v)),
                Err(e) => match e.kind() {
                    IntErrorKind::PosOverflow => Correction::Clamped(Value::Integer(max)),
                    IntErrorKind::NegOverflow => Correction::Clamped(Value::Integer(min)),
                    _ => Correction::Rejected(format!("'{}' is not an integer: {}", raw, e)),
                },
            };
        }
        match self.parse(raw) {
            Ok(value) => self.correct(value),
            Err(reason) => Correction::Rejected(reason),
        }
    }

    /// Parse a textual value according to this domain
    pub fn parse(&self, raw: &str) -> Result<Value, String> {
        let raw = raw.trim();
        match self {
            Domain::Boolean => match raw.to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Boolean(true)),
                "false" => Ok(Value::Boolean(false)),
                _ => Err(format!("'{}' is not a boolean", raw)),
            },
            Domain::Integer { .. } => raw
                .parse::<i32>()
                .map(Value::Integer)
                .map_err(|e| format!("'{}' is not an integer: {}", raw, e)),
            Domain::Double { .. } => raw
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|e| format!("'{}' is not a number: {}", raw, e)),
            Domain::Enum { variants } => variants
                .iter()
                .find(|v| v.eq_ignore_ascii_case(raw))
                .map(|v| Value::Enum(*v))
                .ok_or_else(|| {
                    format!(
                        "'{}' is not one of: {}",
                        raw,
                        variants.join(", ")
                    )
                }),
        }
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Boolean => write!(f, "{{true, false}}"),
            Domain::Integer { min, max } => write!(f, "[{}, {}]", min, max),
            Domain::Double { min, max } => write!(f, "[{:?}, {:?}]", min, max),
            Domain::Enum { variants } => write!(f, "{{{}}}", variants.join(", ")),
        }
    }
}

/// A setting value
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Boolean(bool),
    Integer(i32),
    Double(f64),
    /// Enum variant, by name
    Enum(&'static str),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Boolean(_) => Kind::Boolean,
            Value::Integer(_) => Kind::Integer,
            Value::Double(_) => Kind::Double,
            Value::Enum(_) => Kind::Enum,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(v) => write!(f, "{}", v),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Double(v) => write!(f, "{:?}", v),
            Value::Enum(v) => f.write_str(v),
        }
    }
}

/// Outcome of [`Domain::correct`]
#[derive(Debug, Clone, PartialEq)]
pub enum Correction {
    Accepted(Value),
    Clamped(Value),
    Rejected(String),
}

/// A plain Rust enum usable as a setting domain.
///
/// `VARIANTS` and `NAMES` must list the same variants in the same order, and
/// `index` must return the position of `self` in `VARIANTS`.
pub trait SettingEnum: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    const VARIANTS: &'static [Self];
    const NAMES: &'static [&'static str];

    fn index(self) -> usize;

    fn name(self) -> &'static str {
        Self::NAMES[self.index()]
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::VARIANTS.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Flavor {
        Sweet,
        Sour,
    }

    impl SettingEnum for Flavor {
        const VARIANTS: &'static [Self] = &[Flavor::Sweet, Flavor::Sour];
        const NAMES: &'static [&'static str] = &["SWEET", "SOUR"];

        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn test_contains() {
        assert!(Domain::int(0, 100).contains(&Value::Integer(100)));
        assert!(!Domain::int(0, 100).contains(&Value::Integer(101)));
        assert!(Domain::double(0.0, 1.0).contains(&Value::Double(0.5)));
        assert!(!Domain::double(0.0, 1.0).contains(&Value::Double(f64::NAN)));
        assert!(!Domain::double(0.0, 1.0).contains(&Value::Integer(1)));
        assert!(Domain::of_enum::<Flavor>().contains(&Value::Enum("SOUR")));
        assert!(!Domain::of_enum::<Flavor>().contains(&Value::Enum("BITTER")));
        assert!(Domain::Boolean.contains(&Value::Boolean(false)));
    }

    #[test]
    fn test_correct_clamps_numbers() {
        assert_eq!(
            Domain::int(1, 32).correct(Value::Integer(40)),
            Correction::Clamped(Value::Integer(32))
        );
        assert_eq!(
            Domain::double(0.0, 1.0).correct(Value::Double(-0.25)),
            Correction::Clamped(Value::Double(0.0))
        );
        assert_eq!(
            Domain::int(1, 32).correct(Value::Integer(5)),
            Correction::Accepted(Value::Integer(5))
        );
    }

    #[test]
    fn test_correct_rejects_wrong_kind() {
        assert!(matches!(
            Domain::Boolean.correct(Value::Integer(1)),
            Correction::Rejected(_)
        ));
        assert!(matches!(
            Domain::double(0.0, 1.0).correct(Value::Double(f64::NAN)),
            Correction::Rejected(_)
        ));
        assert!(matches!(
            Domain::of_enum::<Flavor>().correct(Value::Enum("BITTER")),
            Correction::Rejected(_)
        ));
    }

    #[test]
    fn test_parse() {
        assert_eq!(Domain::Boolean.parse("TRUE"), Ok(Value::Boolean(true)));
        assert_eq!(Domain::int(-1, 10).parse(" -1 "), Ok(Value::Integer(-1)));
        assert_eq!(Domain::double(0.0, 1.0).parse("0.25"), Ok(Value::Double(0.25)));
        assert_eq!(Domain::of_enum::<Flavor>().parse("sour"), Ok(Value::Enum("SOUR")));
        assert!(Domain::Boolean.parse("yes").is_err());
        assert!(Domain::int(0, 1).parse("1.5").is_err());
        assert!(Domain::of_enum::<Flavor>().parse("bitter").is_err());
    }

    #[test]
    fn test_read_clamps_integers_past_i32() {
        let domain = Domain::int(1, 32);
        assert!(matches!(domain.read("99999999999"), Correction::Clamped(Value::Integer(32))));
        assert!(matches!(domain.read("-99999999999"), Correction::Clamped(Value::Integer(1))));
        assert!(matches!(domain.read(" 7 "), Correction::Accepted(Value::Integer(7))));
        assert!(matches!(domain.read("40"), Correction::Clamped(Value::Integer(32))));
        assert!(matches!(domain.read("seven"), Correction::Rejected(_)));
        assert!(matches!(domain.read("1.5"), Correction::Rejected(_)));

        let unbounded = Domain::int(1, i32::MAX);
        assert!(matches!(
            unbounded.read("2147483648"),
            Correction::Clamped(Value::Integer(i32::MAX))
        ));
    }

    #[test]
    fn test_read_other_kinds() {
        assert!(matches!(Domain::double(0.0, 1.0).read("2.5"), Correction::Clamped(Value::Double(v)) if v == 1.0));
        assert!(matches!(Domain::Boolean.read("False"), Correction::Accepted(Value::Boolean(false))));
        assert!(matches!(Domain::of_enum::<Flavor>().read("bitter"), Correction::Rejected(_)));
    }

    #[test]
    fn test_setting_enum_names() {
        assert_eq!(Flavor::Sour.name(), "SOUR");
        assert_eq!(Flavor::from_index(0), Some(Flavor::Sweet));
        assert_eq!(Flavor::from_index(2), None);
    }

    #[test]
    fn test_domain_display() {
        assert_eq!(Domain::int(0, 100).to_string(), "[0, 100]");
        assert_eq!(Domain::double(0.0, 1.0).to_string(), "[0.0, 1.0]");
        assert_eq!(Domain::of_enum::<Flavor>().to_string(), "{SWEET, SOUR}");
    }
}
