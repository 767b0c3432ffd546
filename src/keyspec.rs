//! Key specification parsing.
//!
//! A key specification is a key name with an optional direction marker:
//!
//! ```text
//! keyspec := [ "+" | "-" ] name [ " asc" | " desc" ]
//! ```
//!
//! Ascending is the default. Names made only of decimal digits (any script)
//! become [`Key::Index`] keys.
//!
//! Markers are checked in a fixed order (`+`, ` asc`, `-`, ` desc`) and each
//! check sees the string left over by the previous ones. When a token carries
//! two markers the last matching check decides the direction, so `"-age asc"`
//! and `"+age desc"` both sort descending.

use std::collections::BTreeSet;
use std::fmt;
use std::iter::{FusedIterator, Rev};
use std::slice;
use std::str::FromStr;

use crate::core::Key;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl Direction {
    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Direction::Desc)
    }

    /// Applies this direction to an ordering.
    pub fn apply(self, ordering: std::cmp::Ordering) -> std::cmp::Ordering {
        match self {
            Direction::Asc => ordering,
            Direction::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A raw key descriptor as supplied by the caller.
///
/// Whatever the variant, resolution works on the token's string form, so
/// `KeyToken::Int(-3)` means the same thing as `"-3"`.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyToken {
    /// A key specification string.
    Text(String),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// A boolean.
    Bool(bool),
}

impl fmt::Display for KeyToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyToken::Text(s) => f.write_str(s),
            KeyToken::Int(i) => write!(f, "{i}"),
            KeyToken::UInt(u) => write!(f, "{u}"),
            // Debug keeps the fractional part ("2.0"), so floats never read as digit keys.
            KeyToken::Float(x) => write!(f, "{x:?}"),
            KeyToken::Bool(true) => f.write_str("True"),
            KeyToken::Bool(false) => f.write_str("False"),
        }
    }
}

/// A leaf value or an arbitrarily nested group of them.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested<T> {
    Leaf(T),
    Group(Vec<Nested<T>>),
}

impl<T> Nested<T> {
    /// Wraps a single value.
    pub fn leaf(value: T) -> Self {
        Nested::Leaf(value)
    }

    /// Builds a group from anything convertible into nested values.
    pub fn group<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Nested<T>>,
    {
        Nested::Group(items.into_iter().map(Into::into).collect())
    }

    /// Flattens this value into its leaves, depth first.
    pub fn into_flat(self) -> Vec<T> {
        let mut out = Vec::new();
        flatten_into(self, &mut out);
        out
    }
}

impl<T> FromIterator<Nested<T>> for Nested<T> {
    fn from_iter<I: IntoIterator<Item = Nested<T>>>(iter: I) -> Self {
        Nested::Group(iter.into_iter().collect())
    }
}

/// Flattens nested values into one sequence of leaves.
///
/// Traversal is depth first, left to right. Empty groups contribute nothing.
///
/// ```
/// use multisort::{flatten, Nested};
///
/// let nested = vec![
///     Nested::leaf(1),
///     Nested::leaf(2),
///     Nested::Group(vec![Nested::leaf(3), Nested::Group(vec![Nested::leaf(4)])]),
/// ];
/// assert_eq!(flatten(nested), vec![1, 2, 3, 4]);
/// ```
pub fn flatten<T, I>(items: I) -> Vec<T>
where
    I: IntoIterator<Item = Nested<T>>,
{
    let mut out = Vec::new();
    for item in items {
        flatten_into(item, &mut out);
    }
    out
}

fn flatten_into<T>(item: Nested<T>, out: &mut Vec<T>) {
    match item {
        Nested::Leaf(value) => out.push(value),
        Nested::Group(children) => {
            for child in children {
                flatten_into(child, out);
            }
        }
    }
}

macro_rules! impl_key_token_from {
    ($variant:ident as $target:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for KeyToken {
                fn from(value: $ty) -> Self {
                    KeyToken::$variant(<$target>::from(value))
                }
            }

            impl From<$ty> for Nested<KeyToken> {
                fn from(value: $ty) -> Self {
                    Nested::Leaf(KeyToken::from(value))
                }
            }
        )*
    };
}

impl_key_token_from!(Text as String: &str, String, &String);
impl_key_token_from!(Int as i64: i8, i16, i32, i64);
impl_key_token_from!(UInt as u64: u8, u16, u32, u64);
impl_key_token_from!(Float as f64: f32, f64);
impl_key_token_from!(Bool as bool: bool);

impl From<usize> for KeyToken {
    fn from(value: usize) -> Self {
        KeyToken::UInt(value as u64)
    }
}

impl From<usize> for Nested<KeyToken> {
    fn from(value: usize) -> Self {
        Nested::Leaf(KeyToken::from(value))
    }
}

impl From<KeyToken> for Nested<KeyToken> {
    fn from(token: KeyToken) -> Self {
        Nested::Leaf(token)
    }
}

impl<U: Into<Nested<KeyToken>>> From<Vec<U>> for Nested<KeyToken> {
    fn from(items: Vec<U>) -> Self {
        Nested::group(items)
    }
}

impl<U: Into<Nested<KeyToken>>, const N: usize> From<[U; N]> for Nested<KeyToken> {
    fn from(items: [U; N]) -> Self {
        Nested::group(items)
    }
}

impl<U: Into<Nested<KeyToken>>> From<BTreeSet<U>> for Nested<KeyToken> {
    fn from(items: BTreeSet<U>) -> Self {
        Nested::group(items)
    }
}

/// A key with its direction, ready to drive one sort pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedKey {
    pub key: Key,
    pub direction: Direction,
}

impl ResolvedKey {
    pub fn new(key: impl Into<Key>, direction: Direction) -> Self {
        ResolvedKey {
            key: key.into(),
            direction,
        }
    }

    pub fn asc(key: impl Into<Key>) -> Self {
        Self::new(key, Direction::Asc)
    }

    pub fn desc(key: impl Into<Key>) -> Self {
        Self::new(key, Direction::Desc)
    }

    /// Returns `true` if this key sorts largest first.
    pub fn is_descending(&self) -> bool {
        self.direction.is_desc()
    }
}

/// Renders the key as a specification: `name` or `name desc`.
///
/// The rendering is not escaped, so it only reads back as the same key when
/// the name itself resolves to itself. `Name("12")` renders as `12`, which
/// resolves to `Index(12)`; names such as `-x` or `x asc` lose their marker
/// text on the way back.
impl fmt::Display for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Asc => write!(f, "{}", self.key),
            Direction::Desc => write!(f, "{} desc", self.key),
        }
    }
}

/// Resolves `s` exactly as [`resolve_key`] would.
impl FromStr for ResolvedKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(resolve_key(&KeyToken::from(s)))
    }
}

/// Resolves a single token into a key and direction.
///
/// ```
/// use multisort::{resolve_key, Direction, Key, KeyToken};
///
/// let resolved = resolve_key(&KeyToken::from("-age"));
/// assert_eq!(resolved.key, Key::from("age"));
/// assert_eq!(resolved.direction, Direction::Desc);
///
/// let indexed = resolve_key(&KeyToken::from("2 desc"));
/// assert_eq!(indexed.key, Key::Index(2));
/// ```
pub fn resolve_key(token: &KeyToken) -> ResolvedKey {
    let text = token.to_string();
    let mut spec = text.as_str();
    let mut direction = Direction::Asc;

    if let Some(rest) = spec.strip_prefix('+') {
        spec = rest;
        direction = Direction::Asc;
    }
    if let Some(rest) = spec.strip_suffix(" asc") {
        spec = rest;
        direction = Direction::Asc;
    }
    if let Some(rest) = spec.strip_prefix('-') {
        spec = rest;
        direction = Direction::Desc;
    }
    if let Some(rest) = spec.strip_suffix(" desc") {
        spec = rest;
        direction = Direction::Desc;
    }

    ResolvedKey {
        key: Key::parse(spec),
        direction,
    }
}

/// Lazily resolves `tokens`, last token first.
///
/// The first item is the least significant key and the last item the most
/// significant, which is the order stable sort passes must be applied in.
///
/// ```
/// use multisort::{resolve_keys, KeyToken, ResolvedKey};
///
/// let tokens: Vec<KeyToken> = vec!["age".into(), "name desc".into()];
/// let resolved: Vec<_> = resolve_keys(&tokens).collect();
///
/// assert_eq!(resolved, vec![ResolvedKey::desc("name"), ResolvedKey::asc("age")]);
/// ```
pub fn resolve_keys(tokens: &[KeyToken]) -> ResolveKeys<'_> {
    ResolveKeys {
        inner: tokens.iter().rev(),
    }
}

/// Iterator returned by [`resolve_keys`].
#[derive(Debug, Clone)]
pub struct ResolveKeys<'a> {
    inner: Rev<slice::Iter<'a, KeyToken>>,
}

impl Iterator for ResolveKeys<'_> {
    type Item = ResolvedKey;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(resolve_key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for ResolveKeys<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(resolve_key)
    }
}

impl ExactSizeIterator for ResolveKeys<'_> {}

impl FusedIterator for ResolveKeys<'_> {}
