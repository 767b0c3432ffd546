//! # multisort
//!
//! `multisort` sorts collections of records by several keys at once, each key
//! ascending or descending, using a compact string syntax for the keys.
//!
//! ## Key Specifications
//!
//! A key is a field name, attribute name or position with an optional
//! direction marker:
//!
//! | Spec | Meaning |
//! |------|---------|
//! | `"age"`, `"+age"`, `"age asc"` | ascending by `age` |
//! | `"-age"`, `"age desc"` | descending by `age` |
//! | `"2"`, `"-2"` | by position `2` (digit-only keys become indices) |
//!
//! The leftmost key is the most significant. Keys may be nested in groups;
//! groups are flattened depth first before sorting.
//!
//! ## How It Sorts
//!
//! Keys are resolved right to left and each one drives a single **stable**
//! pass. Because every pass keeps the relative order of records it considers
//! equal, applying the least significant key first and the most significant
//! key last yields the full multi-key order, with input order as the final
//! tie-break.
//!
//! ## Usage
//!
//! ### Mapping-like records
//!
//! ```rust
//! use multisort::sort_by_item;
//! use serde_json::json;
//!
//! let people = vec![
//!     json!({"name": "Jim", "age": 35}),
//!     json!({"name": "Sarah", "age": 20}),
//!     json!({"name": "Alex", "age": 35}),
//!     json!({"name": "Wallace", "age": 20}),
//! ];
//!
//! let sorted = sort_by_item(&people, ["age", "name desc"]).unwrap();
//! let names: Vec<_> = sorted.iter().map(|p| p["name"].as_str().unwrap()).collect();
//!
//! assert_eq!(names, vec!["Wallace", "Sarah", "Jim", "Alex"]);
//! ```
//!
//! ### Struct-like records
//!
//! Implement [`Record::attribute`] and sort with [`sort_by_attribute`].
//!
//! ```rust
//! use multisort::{sort_by_attribute, Record, Result, SortError, Value};
//!
//! struct Task {
//!     title: &'static str,
//!     priority: u8,
//! }
//!
//! impl Record for Task {
//!     fn attribute(&self, name: &str) -> Result<Value<'_>> {
//!         match name {
//!             "title" => Ok(Value::Str(self.title)),
//!             "priority" => Ok(Value::UInt(self.priority.into())),
//!             _ => Err(SortError::MissingAttribute { kind: "Task", name: name.into() }),
//!         }
//!     }
//! }
//!
//! let tasks = vec![
//!     Task { title: "docs", priority: 1 },
//!     Task { title: "bug", priority: 3 },
//!     Task { title: "api", priority: 3 },
//! ];
//!
//! let sorted = sort_by_attribute(&tasks, ["-priority", "title"]).unwrap();
//! let titles: Vec<_> = sorted.iter().map(|t| t.title).collect();
//!
//! assert_eq!(titles, vec!["api", "bug", "docs"]);
//! ```
//!
//! ### Self-sorting collections
//!
//! [`SelfSortable`] lets a collection sort itself with the getter it carries.
//! [`SortableVec`] sorts in place; [`FrozenSeq`] returns a new sorted `Vec`.
//!
//! ## Performance Characteristics
//!
//! - **Time**: O(N log N) per key, O(N log N × K) for K keys.
//! - **Memory**: one index permutation plus one extracted value per record
//!   for the pass in progress.

pub mod algo;
pub mod bind;
pub mod config;
pub mod core;
pub mod error;
pub mod keyspec;
pub mod value;

pub use algo::{sort, sort_by_attribute, sort_by_item, sort_in_place, sort_indices};
pub use bind::{FrozenSeq, SelfSortable, SortableVec};
pub use config::{Getter, SortConfig};
pub use crate::core::{Accessor, Key, Record};
pub use error::{Result, SortError};
pub use keyspec::{
    flatten, resolve_key, resolve_keys, Direction, KeyToken, Nested, ResolveKeys, ResolvedKey,
};
pub use value::{ToValue, Value};

pub mod prelude {
    pub use crate::algo::{sort, sort_by_attribute, sort_by_item, sort_in_place, sort_indices};
    pub use crate::bind::{FrozenSeq, SelfSortable, SortableVec};
    pub use crate::config::{Getter, SortConfig};
    pub use crate::core::{Accessor, Key, Record};
    pub use crate::error::{Result, SortError};
    pub use crate::keyspec::{flatten, resolve_keys, KeyToken, Nested, ResolvedKey};
    pub use crate::value::Value;
}
