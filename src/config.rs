//! Accessor strategy configuration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, SortError};

/// Names accepted for [`Getter`], listed in error messages.
pub const ACCEPTED_GETTERS: &str = "item, itemgetter, attribute, attr, attrgetter";

/// How sort values are read out of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Getter {
    /// Look values up by item name or position ([`Record::item`](crate::Record::item)).
    #[default]
    Item,
    /// Look values up by attribute name ([`Record::attribute`](crate::Record::attribute)).
    Attribute,
}

impl Getter {
    /// Resolves an optional getter name; an unset name gives the default.
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        name.map_or(Ok(Getter::default()), str::parse)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Getter::Item => "item",
            Getter::Attribute => "attribute",
        }
    }
}

impl fmt::Display for Getter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Getter {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "item" | "itemgetter" => Ok(Getter::Item),
            "attribute" | "attr" | "attrgetter" => Ok(Getter::Attribute),
            other => Err(SortError::InvalidGetter {
                found: other.to_owned(),
                accepted: ACCEPTED_GETTERS,
            }),
        }
    }
}

impl TryFrom<String> for Getter {
    type Error = SortError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Getter> for String {
    fn from(getter: Getter) -> Self {
        getter.as_str().to_owned()
    }
}

/// Settings for sorts that are not handed an accessor explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortConfig {
    /// The accessor strategy. Missing or `null` means [`Getter::Item`].
    #[serde(default, deserialize_with = "null_as_default")]
    pub getter: Getter,
}

impl SortConfig {
    pub fn new(getter: Getter) -> Self {
        SortConfig { getter }
    }

    /// Parses a configuration from JSON, e.g. `{"getter": "attribute"}`.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

fn null_as_default<'de, D>(deserializer: D) -> std::result::Result<Getter, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Getter>::deserialize(deserializer)?.unwrap_or_default())
}
