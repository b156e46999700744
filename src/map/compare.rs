//! Strict weak orderings used by [`OrderedMap`](super::OrderedMap).

/// A strict weak ordering on keys.
///
/// Two keys are equivalent when neither is less than the other; the map
/// holds at most one key per equivalence class.
///
/// Any `Fn(&K, &K) -> bool` closure is a comparator:
///
/// ```rust
/// use strata::map::OrderedMap;
///
/// let mut map = OrderedMap::with_comparator(|left: &i32, right: &i32| left > right);
/// map.insert(1, "one");
/// map.insert(3, "three");
/// map.insert(2, "two");
///
/// let keys: Vec<i32> = map.keys().copied().collect();
/// assert_eq!(keys, vec![3, 2, 1]);
/// ```
pub trait Compare<K: ?Sized> {
    /// Returns `true` if `left` is ordered strictly before `right`.
    fn less(&self, left: &K, right: &K) -> bool;
}

/// Orders keys by their [`Ord`] implementation.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Compare<K> for NaturalOrder {
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        left < right
    }
}

impl<K: ?Sized, F> Compare<K> for F
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn less(&self, left: &K, right: &K) -> bool {
        self(left, right)
    }
}
