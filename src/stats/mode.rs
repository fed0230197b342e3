//! Frequency counting shared by every "most common" statistic.
//!
//! Ties are broken by first occurrence: among values with the same count,
//! the one seen earliest in row order ranks first.

use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// A distinct value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount<T> {
    pub value: T,
    pub count: usize,
}

/// Counts each distinct value, ordered by descending count then first
/// occurrence.
pub fn frequencies<T, I>(values: I) -> Vec<ValueCount<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut slots: HashMap<T, usize> = HashMap::new();
    let mut counts: Vec<ValueCount<T>> = Vec::new();

    for value in values {
        match slots.get(&value) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                slots.insert(value.clone(), counts.len());
                counts.push(ValueCount { value, count: 1 });
            }
        }
    }

    // stable: equal counts keep first-occurrence order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Most common value, or `None` when there are no values.
pub fn mode<T, I>(values: I) -> Option<ValueCount<T>>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    frequencies(values).into_iter().next()
}
