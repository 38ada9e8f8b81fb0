use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::hash::Hash;

/// Binary min-heap keyed by identity, with decrease-key.
///
/// Priorities are ordered by a caller-supplied comparator; ties fall back to
/// the key order so that extraction order is deterministic. A key is present
/// at most once.
///
/// - `insert`, `extract_min` and `decrease_key` run in O(log n)
/// - `contains` and `priority` run in O(1)
pub struct Heap<K, P, F>
where
    K: Clone + Eq + Hash + Ord,
    F: Fn(&P, &P) -> Ordering,
{
    /// Heap-ordered (key, priority) entries
    entries: Vec<(K, P)>,

    /// key -> position in `entries`
    positions: HashMap<K, usize>,

    compare: F,
}

impl<K, P> Heap<K, P, fn(&P, &P) -> Ordering>
where
    K: Clone + Eq + Hash + Ord,
    P: Ord,
{
    /// Creates a heap ordered by the natural order of the priorities
    pub fn natural() -> Self {
        Heap::new(<P as Ord>::cmp as fn(&P, &P) -> Ordering)
    }
}

impl<K, P, F> Heap<K, P, F>
where
    K: Clone + Eq + Hash + Ord,
    F: Fn(&P, &P) -> Ordering,
{
    /// Creates an empty heap ordered by `compare`
    pub fn new(compare: F) -> Self {
        Heap {
            entries: Vec::new(),
            positions: HashMap::new(),
            compare,
        }
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the heap
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.positions.contains_key(key)
    }

    /// Returns the current priority of a key
    pub fn priority(&self, key: &K) -> Option<&P> {
        self.positions.get(key).map(|&i| &self.entries[i].1)
    }

    /// Inserts a key.
    ///
    /// If the key is already present, its priority is lowered when the new one
    /// is smaller and left untouched otherwise. Returns true if the heap
    /// changed.
    pub fn insert(&mut self, key: K, priority: P) -> bool {
        if self.contains(&key) {
            return self.decrease_key(&key, priority);
        }
        let position = self.entries.len();
        self.positions.insert(key.clone(), position);
        self.entries.push((key, priority));
        self.sift_up(position);
        true
    }

    /// Lowers the priority of a present key.
    ///
    /// Returns false if the key is absent or `priority` is not smaller.
    pub fn decrease_key(&mut self, key: &K, priority: P) -> bool {
        let position = match self.positions.get(key) {
            Some(&position) => position,
            None => return false,
        };
        if (self.compare)(&priority, &self.entries[position].1) != Ordering::Less {
            return false;
        }
        self.entries[position].1 = priority;
        self.sift_up(position);
        true
    }

    /// Returns the minimum entry without removing it
    pub fn peek(&self) -> Option<(&K, &P)> {
        self.entries.first().map(|(k, p)| (k, p))
    }

    /// Removes and returns the minimum entry
    pub fn extract_min(&mut self) -> Option<(K, P)> {
        if self.entries.is_empty() {
            return None;
        }
        let last = self.entries.len() - 1;
        self.swap(0, last);
        let (key, priority) = self.entries.pop()?;
        self.positions.remove(&key);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        Some((key, priority))
    }

    /// Clears the heap
    pub fn clear(&mut self) {
        self.entries.clear();
        self.positions.clear();
    }

    fn less(&self, a: usize, b: usize) -> bool {
        let (ka, pa) = &self.entries[a];
        let (kb, pb) = &self.entries[b];
        (self.compare)(pa, pb).then_with(|| ka.cmp(kb)) == Ordering::Less
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.entries.swap(a, b);
        if let Some(slot) = self.positions.get_mut(&self.entries[a].0) {
            *slot = a;
        }
        if let Some(slot) = self.positions.get_mut(&self.entries[b].0) {
            *slot = b;
        }
    }

    fn sift_up(&mut self, mut position: usize) {
        while position > 0 {
            let parent = (position - 1) / 2;
            if !self.less(position, parent) {
                break;
            }
            self.swap(position, parent);
            position = parent;
        }
    }

    fn sift_down(&mut self, mut position: usize) {
        let len = self.entries.len();
        loop {
            let left = 2 * position + 1;
            let right = left + 1;
            let mut smallest = position;
            if left < len && self.less(left, smallest) {
                smallest = left;
            }
            if right < len && self.less(right, smallest) {
                smallest = right;
            }
            if smallest == position {
                break;
            }
            self.swap(position, smallest);
            position = smallest;
        }
    }
}

impl<K, P, F> Debug for Heap<K, P, F>
where
    K: Clone + Eq + Hash + Ord + Debug,
    P: Debug,
    F: Fn(&P, &P) -> Ordering,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Heap")
            .field("len", &self.entries.len())
            .field("min", &self.entries.first())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ordered_float::OrderedFloat;

    #[test]
    fn test_extracts_in_priority_order() {
        let mut heap = Heap::natural();
        heap.insert(3usize, OrderedFloat(7.0));
        heap.insert(1, OrderedFloat(2.0));
        heap.insert(2, OrderedFloat(5.0));
        heap.insert(4, OrderedFloat(1.0));

        let order: Vec<usize> = std::iter::from_fn(|| heap.extract_min().map(|(k, _)| k)).collect();
        assert_eq!(order, vec![4, 1, 2, 3]);
        assert!(heap.is_empty());
    }

    #[test]
    fn test_decrease_key() {
        let mut heap = Heap::natural();
        heap.insert("a", 10);
        heap.insert("b", 5);
        assert!(heap.decrease_key(&"a", 1));
        assert!(!heap.decrease_key(&"b", 9));
        assert!(!heap.decrease_key(&"missing", 0));
        assert_eq!(heap.priority(&"b"), Some(&5));
        assert_eq!(heap.extract_min(), Some(("a", 1)));
        assert_eq!(heap.extract_min(), Some(("b", 5)));
    }

    #[test]
    fn test_reinsert_keeps_smaller_priority() {
        let mut heap = Heap::natural();
        assert!(heap.insert(1u8, 4));
        assert!(!heap.insert(1u8, 6));
        assert!(heap.insert(1u8, 2));
        assert_eq!(heap.len(), 1);
        assert_eq!(heap.peek(), Some((&1, &2)));
    }

    #[test]
    fn test_ties_break_on_key() {
        let mut heap = Heap::natural();
        for key in [5u32, 3, 9, 1] {
            heap.insert(key, 0);
        }
        let keys: Vec<u32> = std::iter::from_fn(|| heap.extract_min().map(|(k, _)| k)).collect();
        assert_eq!(keys, vec![1, 3, 5, 9]);
    }

    #[test]
    fn test_custom_comparator() {
        // max-heap by reversing the comparator
        let mut heap = Heap::new(|a: &i32, b: &i32| b.cmp(a));
        heap.insert('x', 1);
        heap.insert('y', 3);
        heap.insert('z', 2);
        assert_eq!(heap.extract_min(), Some(('y', 3)));
        assert_eq!(heap.extract_min(), Some(('z', 2)));
    }
}
