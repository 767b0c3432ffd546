//! Collections that sort themselves.
//!
//! [`SelfSortable`] gives a collection a `msort` method driven by the getter it
//! carries. What `msort` returns depends on whether the host can reorder its
//! own storage:
//!
//! - mutable hosts ([`SortableVec`], `&mut Vec<R>`) sort in place and hand back
//!   the same reference;
//! - immutable hosts ([`FrozenSeq`], `&[R]`) stay as they are and return a new
//!   `Vec<&R>` in sorted order.

use std::ops::{Deref, DerefMut};

use tracing::debug;

use crate::algo::{sort, sort_in_place};
use crate::config::{Getter, SortConfig};
use crate::core::Record;
use crate::error::Result;
use crate::keyspec::{KeyToken, Nested};

/// A collection that can sort itself by key specifications.
pub trait SelfSortable: Sized {
    /// What a successful sort hands back.
    type Sorted;

    /// The accessor strategy used by [`SelfSortable::msort`].
    fn getter(&self) -> Getter {
        Getter::default()
    }

    /// Sorts by `keys` using [`SelfSortable::getter`].
    fn msort<I>(self, keys: I) -> Result<Self::Sorted>
    where
        I: IntoIterator,
        I::Item: Into<Nested<KeyToken>>;
}

/// A growable list that sorts in place.
///
/// ```
/// use multisort::{SelfSortable, SortableVec};
/// use serde_json::json;
///
/// let mut rows = SortableVec::new(vec![json!({"n": 2}), json!({"n": 1})]);
/// rows.msort(["n"]).unwrap();
///
/// assert_eq!(rows[0]["n"], 1);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SortableVec<R> {
    items: Vec<R>,
    getter: Getter,
}

impl<R> SortableVec<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self::with_getter(items, Getter::default())
    }

    pub fn with_getter(items: Vec<R>, getter: Getter) -> Self {
        SortableVec { items, getter }
    }

    pub fn from_config(items: Vec<R>, config: &SortConfig) -> Self {
        Self::with_getter(items, config.getter)
    }

    pub fn set_getter(&mut self, getter: Getter) {
        self.getter = getter;
    }

    pub fn into_inner(self) -> Vec<R> {
        self.items
    }
}

impl<R> Deref for SortableVec<R> {
    type Target = Vec<R>;

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<R> DerefMut for SortableVec<R> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.items
    }
}

impl<R> From<Vec<R>> for SortableVec<R> {
    fn from(items: Vec<R>) -> Self {
        Self::new(items)
    }
}

impl<'a, R: Record> SelfSortable for &'a mut SortableVec<R> {
    type Sorted = &'a mut SortableVec<R>;

    fn getter(&self) -> Getter {
        self.getter
    }

    fn msort<I>(self, keys: I) -> Result<Self::Sorted>
    where
        I: IntoIterator,
        I::Item: Into<Nested<KeyToken>>,
    {
        let getter = self.getter;
        debug!(len = self.items.len(), %getter, "sorting in place");
        sort_in_place(&mut self.items, &getter, keys)?;
        Ok(self)
    }
}

/// A fixed sequence that never reorders itself.
///
/// ```
/// use multisort::{FrozenSeq, SelfSortable};
///
/// let frozen = FrozenSeq::new(vec![3, 1, 2]);
/// let sorted = frozen.msort(Vec::<&str>::new()).unwrap();
///
/// assert_eq!(sorted, vec![&1, &2, &3]);
/// assert_eq!(&frozen[..], &[3, 1, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FrozenSeq<R> {
    items: Box<[R]>,
    getter: Getter,
}

impl<R> FrozenSeq<R> {
    pub fn new(items: impl Into<Box<[R]>>) -> Self {
        Self::with_getter(items, Getter::default())
    }

    pub fn with_getter(items: impl Into<Box<[R]>>, getter: Getter) -> Self {
        FrozenSeq {
            items: items.into(),
            getter,
        }
    }

    pub fn from_config(items: impl Into<Box<[R]>>, config: &SortConfig) -> Self {
        Self::with_getter(items, config.getter)
    }
}

impl<R> Deref for FrozenSeq<R> {
    type Target = [R];

    fn deref(&self) -> &Self::Target {
        &self.items
    }
}

impl<'a, R: Record> SelfSortable for &'a FrozenSeq<R> {
    type Sorted = Vec<&'a R>;

    fn getter(&self) -> Getter {
        self.getter
    }

    fn msort<I>(self, keys: I) -> Result<Self::Sorted>
    where
        I: IntoIterator,
        I::Item: Into<Nested<KeyToken>>,
    {
        sort(&self.items[..], &self.getter, keys)
    }
}

impl<'a, R: Record> SelfSortable for &'a mut Vec<R> {
    type Sorted = &'a mut Vec<R>;

    fn msort<I>(self, keys: I) -> Result<Self::Sorted>
    where
        I: IntoIterator,
        I::Item: Into<Nested<KeyToken>>,
    {
        sort_in_place(self.as_mut_slice(), &Getter::Item, keys)?;
        Ok(self)
    }
}

impl<'a, R: Record> SelfSortable for &'a [R] {
    type Sorted = Vec<&'a R>;

    fn msort<I>(self, keys: I) -> Result<Self::Sorted>
    where
        I: IntoIterator,
        I::Item: Into<Nested<KeyToken>>,
    {
        sort(self, &Getter::Item, keys)
    }
}
