//! Breakpoint tables: ordered `(key, value)` pairs with piecewise-constant lookup.
//!
//! Two search flavours are provided:
//!
//! - [`BreakpointTable::band`] walks consecutive pairs `(prev, next)` and
//!   returns `prev.value` when `prev.key <= key < next.key`. A key below the
//!   first breakpoint or at/after the final breakpoint matches no band.
//! - [`BreakpointTable::floor`] returns the value of the highest key that is
//!   `<= key`, including the final breakpoint.
//!
//! [`BreakpointTable::lookup`] is `band` with the value type's default
//! substituted for a miss, so a query at or beyond the last key yields the
//! default rather than the last value.

use crate::error::{CoreError, CoreResult};

/// Immutable, strictly ascending sequence of `(key, value)` breakpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakpointTable<K, V> {
    points: Vec<(K, V)>,
}

impl<K, V> BreakpointTable<K, V>
where
    K: PartialOrd + Copy,
    V: Copy,
{
    /// Build a table, rejecting empty input and keys that are not strictly
    /// ascending.
    pub fn new(points: Vec<(K, V)>) -> CoreResult<Self> {
        if points.is_empty() {
            return Err(CoreError::EmptyTable);
        }
        for (index, pair) in points.windows(2).enumerate() {
            // `!(a < b)` also rejects incomparable keys such as NaN.
            if !(pair[0].0 < pair[1].0) {
                return Err(CoreError::NotAscending { index: index + 1 });
            }
        }
        Ok(Self { points })
    }

    /// Build a table from points already known to be non-empty and strictly
    /// ascending, such as built-in constants. Nothing is checked; lookups on
    /// points that break the ordering return a value but not a meaningful one.
    pub fn from_ascending(points: Vec<(K, V)>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[(K, V)] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// False for any table built through [`BreakpointTable::new`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(K, V)> {
        self.points.iter()
    }

    /// Value of the band `[prev.key, next.key)` containing `key`, if any.
    pub fn band(&self, key: K) -> Option<V> {
        self.points
            .windows(2)
            .find(|pair| key >= pair[0].0 && key < pair[1].0)
            .map(|pair| pair[0].1)
    }

    /// Band lookup falling back to `V::default()` on a miss.
    pub fn lookup(&self, key: K) -> V
    where
        V: Default,
    {
        self.band(key).unwrap_or_default()
    }

    /// Value of the highest breakpoint whose key is `<= key`.
    ///
    /// Scanning stops at the first breakpoint above `key`.
    pub fn floor(&self, key: K) -> Option<V> {
        self.points
            .iter()
            .take_while(|(k, _)| key >= *k)
            .last()
            .map(|(_, v)| *v)
    }
}

impl<'a, K, V> IntoIterator for &'a BreakpointTable<K, V> {
    type Item = &'a (K, V);
    type IntoIter = std::slice::Iter<'a, (K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cpu_profile() -> BreakpointTable<u64, f64> {
        BreakpointTable::new(vec![(0, 30.0), (10, 32.0), (11, 34.0), (12, 35.0), (15, 40.0)])
            .unwrap()
    }

    #[test]
    fn rejects_empty_and_unordered() {
        assert_eq!(
            BreakpointTable::<i64, i64>::new(vec![]).unwrap_err(),
            CoreError::EmptyTable
        );
        assert_eq!(
            BreakpointTable::new(vec![(10, 1), (10, 2)]).unwrap_err(),
            CoreError::NotAscending { index: 1 }
        );
        assert_eq!(
            BreakpointTable::new(vec![(0.0, 1), (f64::NAN, 2)]).unwrap_err(),
            CoreError::NotAscending { index: 1 }
        );
    }

    #[test]
    fn from_ascending_matches_checked_constructor() {
        let points = vec![(0, 30.0), (10, 32.0), (11, 34.0), (12, 35.0), (15, 40.0)];
        assert_eq!(BreakpointTable::from_ascending(points), cpu_profile());
    }

    #[test]
    fn band_is_half_open() {
        let table = cpu_profile();
        assert_eq!(table.band(0), Some(30.0));
        assert_eq!(table.band(9), Some(30.0));
        assert_eq!(table.band(10), Some(32.0));
        assert_eq!(table.band(11), Some(34.0));
        assert_eq!(table.band(14), Some(35.0));
    }

    #[test]
    fn lookup_at_or_past_last_key_is_default() {
        let table = cpu_profile();
        assert_eq!(table.lookup(15), 0.0);
        assert_eq!(table.lookup(1_000), 0.0);
    }

    #[test]
    fn lookup_below_first_key_is_default() {
        let table = BreakpointTable::new(vec![(0.1, 2.0), (0.2, 5.0)]).unwrap();
        assert_eq!(table.lookup(0.05), 0.0);
        assert_eq!(table.lookup(0.1), 2.0);
    }

    #[test]
    fn single_point_table_never_matches_a_band() {
        let table = BreakpointTable::new(vec![(5, 7)]).unwrap();
        assert_eq!(table.band(5), None);
        assert_eq!(table.floor(5), Some(7));
    }

    #[test]
    fn floor_includes_last_key() {
        let table = BreakpointTable::new(vec![(20, 0), (30, 100)]).unwrap();
        assert_eq!(table.floor(19), None);
        assert_eq!(table.floor(20), Some(0));
        assert_eq!(table.floor(29), Some(0));
        assert_eq!(table.floor(30), Some(100));
        assert_eq!(table.floor(99), Some(100));
    }

    proptest! {
        #[test]
        fn lookup_yields_table_value_or_default(
            keys in proptest::collection::btree_set(-100i64..100, 1..12),
            query in -150i64..150,
        ) {
            let points: Vec<(i64, i64)> = keys.iter().map(|k| (*k, k * 3 + 1)).collect();
            let table = BreakpointTable::new(points.clone()).unwrap();
            let value = table.lookup(query);
            prop_assert!(value == 0 || points.iter().any(|(_, v)| *v == value));
            if let Some(v) = table.floor(query) {
                let (k, _) = points.iter().rev().find(|(k, _)| *k <= query).unwrap();
                prop_assert_eq!(v, k * 3 + 1);
            }
        }
    }
}
