//! Core traits and types for multisort.
//!
//! This module defines:
//! - [`Key`]: a resolved key, either a name or a position.
//! - [`Record`]: the trait sortable records implement.
//! - [`Accessor`]: the strategy that reads a sort value out of a record.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::BuildHasher;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Getter;
use crate::error::{Result, SortError};
use crate::value::{ToValue, Value};

/// A resolved key: a field/attribute name or a numeric position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Name(String),
    Index(usize),
}

impl Key {
    /// Builds a key from the remains of a key specification.
    ///
    /// Non-empty strings of Unicode decimal digits (`"12"`, `"٣"`) become
    /// [`Key::Index`]. Anything else stays a name, including other digit-like
    /// characters such as `"²"` and digit strings too large for `usize`.
    pub fn parse(spec: &str) -> Self {
        if !spec.is_empty() && spec.chars().all(is_decimal_digit) {
            if let Some(index) = decimal_value(spec) {
                return Key::Index(index);
            }
        }
        Key::Name(spec.to_owned())
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Key::Name(name) => Some(name),
            Key::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        match self {
            Key::Index(index) => Some(*index),
            Key::Name(_) => None,
        }
    }
}

static DECIMAL_DIGIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\p{Nd}$").expect("decimal digit regex should compile"));

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}

// Unicode encodes every decimal digit in a contiguous run from 0 to 9, so a
// digit's value is its offset from the start of its run.
fn digit_value(c: char) -> Option<usize> {
    if let Some(d) = c.to_digit(10) {
        return Some(d as usize);
    }
    let mut offset = 0;
    let mut code = u32::from(c);
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    Some(offset % 10)
}

fn decimal_value(spec: &str) -> Option<usize> {
    spec.chars().try_fold(0usize, |acc, c| {
        acc.checked_mul(10)?.checked_add(digit_value(c)?)
    })
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Name(name) => f.write_str(name),
            Key::Index(index) => write!(f, "{index}"),
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

/// A value that can be sorted by multisort.
///
/// Every method has a default, so a type only implements the lookups it
/// supports: mapping-like records implement [`Record::item`], struct-like
/// records implement [`Record::attribute`], and records with a natural order
/// implement [`Record::natural_value`].
///
/// # Examples
///
/// ```
/// use multisort::{Record, Result, SortError, Value};
///
/// struct Person {
///     name: String,
///     age: u32,
/// }
///
/// impl Record for Person {
///     fn attribute(&self, name: &str) -> Result<Value<'_>> {
///         match name {
///             "name" => Ok(Value::Str(&self.name)),
///             "age" => Ok(Value::UInt(self.age.into())),
///             _ => Err(SortError::MissingAttribute {
///                 kind: "Person",
///                 name: name.to_owned(),
///             }),
///         }
///     }
/// }
/// ```
pub trait Record {
    /// Short name of this kind of record, used in error messages.
    fn kind(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Looks up an item by name or position.
    fn item(&self, key: &Key) -> Result<Value<'_>> {
        let _ = key;
        Err(SortError::NotSubscriptable { kind: self.kind() })
    }

    /// Looks up a named attribute.
    fn attribute(&self, name: &str) -> Result<Value<'_>> {
        Err(SortError::MissingAttribute {
            kind: self.kind(),
            name: name.to_owned(),
        })
    }

    /// The value used when a sort is run without keys.
    ///
    /// Defaults to an unordered value, so keyless sorts of two or more such
    /// records fail.
    fn natural_value(&self) -> Value<'_> {
        Value::Opaque(self.kind())
    }
}

impl<T: Record + ?Sized> Record for &T {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        (**self).item(key)
    }

    fn attribute(&self, name: &str) -> Result<Value<'_>> {
        (**self).attribute(name)
    }

    fn natural_value(&self) -> Value<'_> {
        (**self).natural_value()
    }
}

impl<T: Record + ?Sized> Record for Box<T> {
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        (**self).item(key)
    }

    fn attribute(&self, name: &str) -> Result<Value<'_>> {
        (**self).attribute(name)
    }

    fn natural_value(&self) -> Value<'_> {
        (**self).natural_value()
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value as Json;

    match value {
        Json::Null => "null",
        Json::Bool(_) => "bool",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

// Character `index` of `s`, borrowed.
fn char_at<'a>(s: &'a str, index: usize, key: &Key) -> Result<Value<'a>> {
    s.char_indices()
        .nth(index)
        .map(|(start, c)| Value::Str(&s[start..start + c.len_utf8()]))
        .ok_or_else(|| SortError::MissingItem { key: key.clone() })
}

impl Record for serde_json::Value {
    fn kind(&self) -> &'static str {
        json_kind(self)
    }

    /// Objects are looked up by name; an index key is looked up by its decimal
    /// form since object keys are always strings. Arrays and strings are looked
    /// up by position.
    fn item(&self, key: &Key) -> Result<Value<'_>> {
        use serde_json::Value as Json;

        let missing = || SortError::MissingItem { key: key.clone() };
        match (self, key) {
            (Json::Object(map), Key::Name(name)) => {
                map.get(name).map(Value::from_json).ok_or_else(missing)
            }
            (Json::Object(map), Key::Index(index)) => map
                .get(&index.to_string())
                .map(Value::from_json)
                .ok_or_else(missing),
            (Json::Array(items), Key::Index(index)) => {
                items.get(*index).map(Value::from_json).ok_or_else(missing)
            }
            (Json::String(s), Key::Index(index)) => char_at(s, *index, key),
            (Json::Array(_) | Json::String(_), Key::Name(_)) => Err(SortError::InvalidItemKey {
                kind: self.kind(),
                key: key.clone(),
            }),
            _ => Err(SortError::NotSubscriptable { kind: self.kind() }),
        }
    }

    fn natural_value(&self) -> Value<'_> {
        Value::from_json(self)
    }
}

impl<V: ToValue> Record for BTreeMap<String, V> {
    fn kind(&self) -> &'static str {
        "map"
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        let found = match key {
            Key::Name(name) => self.get(name),
            Key::Index(index) => self.get(&index.to_string()),
        };
        found
            .map(ToValue::to_value)
            .ok_or_else(|| SortError::MissingItem { key: key.clone() })
    }
}

impl<V: ToValue, S: BuildHasher> Record for HashMap<String, V, S> {
    fn kind(&self) -> &'static str {
        "map"
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        let found = match key {
            Key::Name(name) => self.get(name),
            Key::Index(index) => self.get(&index.to_string()),
        };
        found
            .map(ToValue::to_value)
            .ok_or_else(|| SortError::MissingItem { key: key.clone() })
    }
}

impl<V: ToValue> Record for Vec<V> {
    fn kind(&self) -> &'static str {
        "list"
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        match key {
            Key::Index(index) => self
                .get(*index)
                .map(ToValue::to_value)
                .ok_or_else(|| SortError::MissingItem { key: key.clone() }),
            Key::Name(_) => Err(SortError::InvalidItemKey {
                kind: self.kind(),
                key: key.clone(),
            }),
        }
    }

    fn natural_value(&self) -> Value<'_> {
        self.to_value()
    }
}

impl Record for str {
    fn kind(&self) -> &'static str {
        "str"
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        match key {
            Key::Index(index) => char_at(self, *index, key),
            Key::Name(_) => Err(SortError::InvalidItemKey {
                kind: self.kind(),
                key: key.clone(),
            }),
        }
    }

    fn natural_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

impl Record for String {
    fn kind(&self) -> &'static str {
        "str"
    }

    fn item(&self, key: &Key) -> Result<Value<'_>> {
        self.as_str().item(key)
    }

    fn natural_value(&self) -> Value<'_> {
        Value::Str(self)
    }
}

macro_rules! impl_scalar_record {
    ($($ty:ty),*) => {
        $(
            impl Record for $ty {
                fn kind(&self) -> &'static str {
                    stringify!($ty)
                }

                fn natural_value(&self) -> Value<'_> {
                    self.to_value()
                }
            }
        )*
    };
}

impl_scalar_record!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64, bool);

/// Reads the sort value for one key out of a record.
///
/// [`Getter`] implements this for every [`Record`]; any function or closure
/// with the signature `Fn(&R, &Key) -> Result<Value<'_>>` does too.
pub trait Accessor<R: ?Sized> {
    /// Returns the value of `key` in `record`.
    fn access<'r>(&self, record: &'r R, key: &Key) -> Result<Value<'r>>;
}

impl<R: Record + ?Sized> Accessor<R> for Getter {
    fn access<'r>(&self, record: &'r R, key: &Key) -> Result<Value<'r>> {
        match (self, key) {
            (Getter::Item, _) => record.item(key),
            (Getter::Attribute, Key::Name(name)) => record.attribute(name),
            (Getter::Attribute, Key::Index(_)) => {
                Err(SortError::InvalidAttributeName { key: key.clone() })
            }
        }
    }
}

impl<R: ?Sized, F> Accessor<R> for F
where
    F: for<'r> Fn(&'r R, &Key) -> Result<Value<'r>>,
{
    fn access<'r>(&self, record: &'r R, key: &Key) -> Result<Value<'r>> {
        self(record, key)
    }
}
