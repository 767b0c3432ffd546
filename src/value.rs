//! Sort values extracted from records.
//!
//! Every accessor returns a [`Value`], which borrows from the record it was read
//! from. Values of different kinds may or may not be ordered against each other;
//! see [`Value::try_cmp`].

use std::cmp::Ordering;

use crate::error::{Result, SortError};

/// A value a record exposes for ordering.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'a> {
    /// Absent or null. Has no ordering, not even against itself.
    Null,
    /// Boolean, ordered as the integers `0` and `1`.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    UInt(u64),
    /// Floating point number.
    Float(f64),
    /// Borrowed string, ordered by code point.
    Str(&'a str),
    /// Sequence, ordered lexicographically.
    List(Vec<Value<'a>>),
    /// A value with no ordering, labelled with its kind.
    Opaque(&'static str),
}

/// Broad families of values. Only members of the same family can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Number,
    Text,
    Sequence,
    Unordered,
}

impl<'a> Value<'a> {
    /// Converts a JSON value into a sort value borrowing from it.
    pub fn from_json(value: &'a serde_json::Value) -> Self {
        use serde_json::Value as Json;

        match value {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(*b),
            Json::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Json::String(s) => Value::Str(s),
            Json::Array(items) => Value::List(items.iter().map(Value::from_json).collect()),
            Json::Object(_) => Value::Opaque("object"),
        }
    }

    /// Returns a short name for the kind of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) | Value::UInt(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Opaque(kind) => kind,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Extracts the string, if this is one.
    pub fn as_str(&self) -> Option<&'a str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    fn family(&self) -> Family {
        match self {
            Value::Bool(_) | Value::Int(_) | Value::UInt(_) | Value::Float(_) => Family::Number,
            Value::Str(_) => Family::Text,
            Value::List(_) => Family::Sequence,
            Value::Null | Value::Opaque(_) => Family::Unordered,
        }
    }

    /// Orders two values.
    ///
    /// Numbers (booleans included) compare numerically across variants, strings
    /// by code point and lists lexicographically. Any other pairing fails with
    /// [`SortError::Incomparable`].
    pub fn try_cmp(&self, other: &Value<'_>) -> Result<Ordering> {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
            (Value::List(a), Value::List(b)) => {
                for (x, y) in a.iter().zip(b.iter()) {
                    match x.try_cmp(y)? {
                        Ordering::Equal => continue,
                        unequal => return Ok(unequal),
                    }
                }
                Ok(a.len().cmp(&b.len()))
            }
            (a, b) if a.family() == Family::Number && b.family() == Family::Number => {
                Ok(compare_numbers(a.as_number(), b.as_number()))
            }
            (a, b) => Err(SortError::Incomparable {
                left: a.type_name(),
                right: b.type_name(),
            }),
        }
    }

    fn as_number(&self) -> Number {
        match self {
            Value::Bool(b) => Number::Int(i64::from(*b)),
            Value::Int(i) => Number::Int(*i),
            Value::UInt(u) => Number::UInt(*u),
            Value::Float(f) => Number::Float(*f),
            _ => Number::Float(f64::NAN),
        }
    }
}

#[derive(Clone, Copy)]
enum Number {
    Int(i64),
    UInt(u64),
    Float(f64),
}

fn compare_numbers(a: Number, b: Number) -> Ordering {
    match (a, b) {
        (Number::Int(a), Number::Int(b)) => a.cmp(&b),
        (Number::UInt(a), Number::UInt(b)) => a.cmp(&b),
        (Number::Int(a), Number::UInt(b)) => match u64::try_from(a) {
            Ok(a) => a.cmp(&b),
            Err(_) => Ordering::Less,
        },
        (Number::UInt(a), Number::Int(b)) => match u64::try_from(b) {
            Ok(b) => a.cmp(&b),
            Err(_) => Ordering::Greater,
        },
        (Number::Float(a), Number::Float(b)) => compare_floats(a, b),
        (Number::Float(a), Number::Int(b)) => compare_int_float(b.into(), a).reverse(),
        (Number::Float(a), Number::UInt(b)) => compare_int_float(b.into(), a).reverse(),
        (Number::Int(a), Number::Float(b)) => compare_int_float(a.into(), b),
        (Number::UInt(a), Number::Float(b)) => compare_int_float(a.into(), b),
    }
}

const TWO_POW_64: f64 = 18_446_744_073_709_551_616.0;

// Exact: casting the integer to f64 would round above 2^53 and break
// transitivity. NaN sits where `total_cmp` puts it among floats.
fn compare_int_float(int: i128, float: f64) -> Ordering {
    if float.is_nan() {
        return if float.is_sign_negative() {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }
    if float >= TWO_POW_64 {
        return Ordering::Less;
    }
    if float <= -TWO_POW_64 {
        return Ordering::Greater;
    }

    let floor = float.floor();
    match int.cmp(&(floor as i128)) {
        Ordering::Equal if float > floor => Ordering::Less,
        ordering => ordering,
    }
}

// Keeps -0.0 == 0.0 while still giving NaN a fixed place, so the order stays total.
fn compare_floats(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or_else(|| a.total_cmp(&b))
}

/// Fails if some pair of `values` can never be ordered.
///
/// A comparison sort has to compare every pair that ends up adjacent, so a
/// collection mixing families (or holding two or more unordered values) is
/// rejected up front rather than midway through a pass.
pub(crate) fn ensure_comparable(values: &[Value<'_>]) -> Result<()> {
    if values.len() < 2 {
        return Ok(());
    }
    let first = &values[0];
    for (position, value) in values.iter().enumerate() {
        if value.family() == Family::Unordered {
            let neighbour = if position == 0 { &values[1] } else { first };
            return Err(SortError::Incomparable {
                left: value.type_name(),
                right: neighbour.type_name(),
            });
        }
        if value.family() != first.family() {
            return Err(SortError::Incomparable {
                left: first.type_name(),
                right: value.type_name(),
            });
        }
    }
    Ok(())
}

/// Types that can present themselves as a [`Value`].
///
/// Field types of map- and list-like records implement this so the records
/// can hand out sort values without copying.
pub trait ToValue {
    /// Returns the sort value of `self`.
    fn to_value(&self) -> Value<'_>;
}

macro_rules! impl_to_value {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value<'_> {
                    Value::$variant(<$target>::from(*self))
                }
            }
        )*
    };
}

impl_to_value!(Int as i64: i8, i16, i32, i64);
impl_to_value!(UInt as u64: u8, u16, u32, u64);
impl_to_value!(Float as f64: f32, f64);

impl ToValue for isize {
    fn to_value(&self) -> Value<'_> {
        Value::Int(*self as i64)
    }
}

impl ToValue for usize {
    fn to_value(&self) -> Value<'_> {
        Value::UInt(*self as u64)
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value<'_> {
        (**self).to_value()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(inner) => inner.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value<'_> {
        Value::List(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value<'_> {
        self.as_slice().to_value()
    }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value<'_> {
        Value::from_json(self)
    }
}
