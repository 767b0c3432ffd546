//! Multi-pass stable sorting.
//!
//! Keys are applied one stable pass at a time, least significant first. Each
//! pass only reorders records that differ under its own key, so after the last
//! (most significant) pass ties on every key fall back to the order left by the
//! earlier passes and, ultimately, to input order.
//!
//! All passes run over a permutation of record indices. Records are never
//! moved until the permutation is final, and only by [`sort_in_place`].

use std::cmp::Ordering;

use tracing::{debug, trace};

use crate::config::Getter;
use crate::core::{Accessor, Record};
use crate::error::{Result, SortError};
use crate::keyspec::{flatten, resolve_keys, Direction, KeyToken, Nested};
use crate::value::{ensure_comparable, Value};

/// Returns the permutation that orders `records` by `keys`.
///
/// `records[indices[0]]` is the first record in sorted order. With no keys the
/// records are ordered by their [`Record::natural_value`].
///
/// # Errors
///
/// Lookup errors from `accessor` and [`SortError::Incomparable`] when two sort
/// values have no ordering.
///
/// # Examples
///
/// ```
/// use multisort::{sort_indices, Getter};
/// use serde_json::json;
///
/// let rows = vec![json!({"n": 3}), json!({"n": 1}), json!({"n": 2})];
/// let indices = sort_indices(&rows, &Getter::Item, ["-n"]).unwrap();
///
/// assert_eq!(indices, vec![0, 2, 1]);
/// ```
pub fn sort_indices<R, A, I>(records: &[R], accessor: &A, keys: I) -> Result<Vec<usize>>
where
    R: Record,
    A: Accessor<R> + ?Sized,
    I: IntoIterator,
    I::Item: Into<Nested<KeyToken>>,
{
    let tokens = flatten(keys.into_iter().map(Into::into));
    let mut indices: Vec<usize> = (0..records.len()).collect();

    debug!(records = records.len(), keys = tokens.len(), "multi-key sort");

    if tokens.is_empty() {
        let values: Vec<Value<'_>> = records.iter().map(Record::natural_value).collect();
        stable_pass(&mut indices, &values, Direction::Asc)?;
        return Ok(indices);
    }

    for resolved in resolve_keys(&tokens) {
        trace!(key = %resolved.key, direction = %resolved.direction, "sort pass");
        let values = records
            .iter()
            .map(|record| accessor.access(record, &resolved.key))
            .collect::<Result<Vec<_>>>()?;
        stable_pass(&mut indices, &values, resolved.direction)?;
    }

    Ok(indices)
}

/// Sorts `records` by `keys`, returning references in sorted order.
///
/// The input is left untouched.
///
/// # Examples
///
/// ```
/// use multisort::{sort, Getter};
/// use serde_json::json;
///
/// let people = vec![
///     json!({"name": "Jim", "age": 35}),
///     json!({"name": "Sarah", "age": 20}),
///     json!({"name": "Alex", "age": 35}),
/// ];
///
/// let sorted = sort(&people, &Getter::Item, ["age desc", "name"]).unwrap();
/// let names: Vec<_> = sorted.iter().map(|p| p["name"].as_str().unwrap()).collect();
///
/// assert_eq!(names, vec!["Alex", "Jim", "Sarah"]);
/// ```
pub fn sort<'r, R, A, I>(records: &'r [R], accessor: &A, keys: I) -> Result<Vec<&'r R>>
where
    R: Record,
    A: Accessor<R> + ?Sized,
    I: IntoIterator,
    I::Item: Into<Nested<KeyToken>>,
{
    let indices = sort_indices(records, accessor, keys)?;
    Ok(indices.into_iter().map(|index| &records[index]).collect())
}

/// Sorts `records` in place.
///
/// On error the slice is left in its original order.
pub fn sort_in_place<R, A, I>(records: &mut [R], accessor: &A, keys: I) -> Result<()>
where
    R: Record,
    A: Accessor<R> + ?Sized,
    I: IntoIterator,
    I::Item: Into<Nested<KeyToken>>,
{
    let indices = sort_indices(records, accessor, keys)?;
    apply_permutation(records, indices);
    Ok(())
}

/// Sorts mapping- or sequence-like records by item lookup.
///
/// Shorthand for [`sort`] with [`Getter::Item`].
pub fn sort_by_item<'r, R, I>(records: &'r [R], keys: I) -> Result<Vec<&'r R>>
where
    R: Record,
    I: IntoIterator,
    I::Item: Into<Nested<KeyToken>>,
{
    sort(records, &Getter::Item, keys)
}

/// Sorts struct-like records by attribute lookup.
///
/// Shorthand for [`sort`] with [`Getter::Attribute`].
pub fn sort_by_attribute<'r, R, I>(records: &'r [R], keys: I) -> Result<Vec<&'r R>>
where
    R: Record,
    I: IntoIterator,
    I::Item: Into<Nested<KeyToken>>,
{
    sort(records, &Getter::Attribute, keys)
}

/// One stable pass over `indices`, keyed by `values[index]`.
fn stable_pass(indices: &mut [usize], values: &[Value<'_>], direction: Direction) -> Result<()> {
    ensure_comparable(values)?;

    // Nested lists can still disagree element-wise; keep the first such error.
    let mut failure: Option<SortError> = None;
    indices.sort_by(|&a, &b| match values[a].try_cmp(&values[b]) {
        Ok(ordering) => direction.apply(ordering),
        Err(err) => {
            failure.get_or_insert(err);
            Ordering::Equal
        }
    });

    match failure {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

/// Reorders `data` so that position `i` holds what was at `indices[i]`.
fn apply_permutation<T>(data: &mut [T], mut indices: Vec<usize>) {
    for i in 0..data.len() {
        let mut current = i;
        while indices[current] != i {
            let next = indices[current];
            data.swap(current, next);
            indices[current] = current;
            current = next;
        }
        indices[current] = current;
    }
}
