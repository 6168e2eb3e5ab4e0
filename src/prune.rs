// =====================================================================
// File: prune.rs
//
//! Bounded-size enforcement: height-guided leaf pruning, invoked from
//! [`crate::SplayMap::insert`] whenever a configured `max_size` is
//! exceeded.
//!
//! [`SplayMap::prune`] makes one depth-first pass over the tree, removing
//! any leaf found strictly deeper than `height / 2`. This favors evicting
//! nodes that splaying has pushed toward the bottom — i.e. the ones that
//! haven't been touched recently — while leaving the shallow, hot part of
//! the tree untouched.
// =====================================================================

use log::debug;

use crate::map::SplayMap;
use crate::node::Node;

impl<K: Ord, V> SplayMap<K, V> {
    pub fn max_size(&self) -> Option<usize> {
        self.max_size
    }

    pub fn set_max_size(&mut self, max_size: Option<usize>) {
        self.max_size = max_size;
        if max_size.is_some() {
            self.enforce_max_size();
        }
    }

    /// Registers a callback invoked once per evicted `(key, value)`,
    /// immediately before the entry is detached. Replaces any previously
    /// registered callback.
    pub fn on_prune<F>(&mut self, callback: F)
    where
        F: FnMut(&K, &V) + 'static,
    {
        self.on_prune = Some(Box::new(callback));
    }

    /// Whether the most recent size-bound-triggering operation ran at
    /// least one prune cycle. Set on every `insert`; unrelated to whether
    /// that cycle actually removed anything (a cycle that finds nothing to
    /// remove below the threshold still "ran").
    pub fn was_pruned(&self) -> bool {
        self.was_pruned
    }

    /// Runs one height-guided pruning pass: threshold = `height() / 2`,
    /// depth-first left-then-right, evicting any leaf found deeper than
    /// the threshold. Returns the number of entries removed.
    pub fn prune(&mut self) -> usize {
        if self.root.is_none() {
            self.was_pruned = false;
            return 0;
        }

        let threshold = self.height() / 2;
        let mut removed = 0usize;
        prune_below(&mut self.root, 0, threshold, &mut removed, &mut self.on_prune);

        self.size -= removed;
        self.was_pruned = true;
        debug!("prune: threshold={threshold} removed={removed} size={}", self.size);
        removed
    }

    /// Called after every size-increasing insert. Repeatedly prunes until
    /// back within `max_size`, falling back to removing the single
    /// structurally deepest leaf whenever a pass removes nothing — which
    /// guarantees strictly decreasing size, and therefore termination,
    /// even on a shallow tree where no leaf clears the height/2 threshold.
    pub(crate) fn enforce_max_size(&mut self) {
        let Some(max_size) = self.max_size else {
            self.was_pruned = false;
            return;
        };

        if self.size <= max_size {
            self.was_pruned = false;
            return;
        }

        while self.size > max_size {
            let removed = self.prune();
            if removed == 0 {
                debug!("enforce_max_size: threshold pass found nothing, falling back to deepest-leaf removal");
                if !self.remove_deepest_leaf() {
                    break;
                }
                self.was_pruned = true;
            }
        }
    }

    fn remove_deepest_leaf(&mut self) -> bool {
        if self.root.is_none() {
            return false;
        }

        if self.root.as_ref().unwrap().is_leaf() {
            let node = self.root.take().unwrap();
            if let Some(cb) = self.on_prune.as_mut() {
                cb(&node.key, &node.value);
            }
            self.size -= 1;
            return true;
        }

        let path = deepest_path(self.root.as_deref().unwrap());
        let mut slot = &mut self.root;
        for dir in &path[..path.len() - 1] {
            let node = slot.as_mut().unwrap();
            slot = match dir {
                Dir::Left => &mut node.left,
                Dir::Right => &mut node.right,
            };
        }
        let node = slot.as_mut().unwrap();
        let target = match path.last().unwrap() {
            Dir::Left => &mut node.left,
            Dir::Right => &mut node.right,
        };

        match target.take() {
            Some(leaf) => {
                if let Some(cb) = self.on_prune.as_mut() {
                    cb(&leaf.key, &leaf.value);
                }
                self.size -= 1;
                true
            }
            None => false,
        }
    }
}

enum Dir {
    Left,
    Right,
}

/// Path from `node` down to one of its deepest leaves.
fn deepest_path<K, V>(node: &Node<K, V>) -> Vec<Dir> {
    if node.is_leaf() {
        return Vec::new();
    }

    let left_path = node.left.as_deref().map(deepest_path);
    let right_path = node.right.as_deref().map(deepest_path);

    match (left_path, right_path) {
        (Some(lp), Some(rp)) => {
            if lp.len() >= rp.len() {
                let mut path = vec![Dir::Left];
                path.extend(lp);
                path
            } else {
                let mut path = vec![Dir::Right];
                path.extend(rp);
                path
            }
        }
        (Some(lp), None) => {
            let mut path = vec![Dir::Left];
            path.extend(lp);
            path
        }
        (None, Some(rp)) => {
            let mut path = vec![Dir::Right];
            path.extend(rp);
            path
        }
        (None, None) => unreachable!("a non-leaf node has at least one child"),
    }
}

/// Depth-first descent pruning leaf children found past `threshold`.
fn prune_below<K, V>(
    slot: &mut Option<Box<Node<K, V>>>,
    depth: usize,
    threshold: usize,
    removed: &mut usize,
    on_prune: &mut Option<crate::map::EvictionCallback<K, V>>,
) {
    let Some(node) = slot.as_mut() else {
        return;
    };

    let left_is_leaf = node.left.as_deref().is_some_and(Node::is_leaf);
    if left_is_leaf {
        if depth > threshold {
            evict(&mut node.left, removed, on_prune);
        }
    } else {
        prune_below(&mut node.left, depth + 1, threshold, removed, on_prune);
    }

    let right_is_leaf = node.right.as_deref().is_some_and(Node::is_leaf);
    if right_is_leaf {
        if depth > threshold {
            evict(&mut node.right, removed, on_prune);
        }
    } else {
        prune_below(&mut node.right, depth + 1, threshold, removed, on_prune);
    }
}

fn evict<K, V>(
    slot: &mut Option<Box<Node<K, V>>>,
    removed: &mut usize,
    on_prune: &mut Option<crate::map::EvictionCallback<K, V>>,
) {
    if let Some(leaf) = slot.take() {
        if let Some(cb) = on_prune.as_mut() {
            cb(&leaf.key, &leaf.value);
        }
        *removed += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_logger() {
        let _ = env_logger::try_init();
    }

    #[test]
    fn prune_removes_nothing_on_a_balanced_tree_within_bound() {
        init_logger();
        let mut map: SplayMap<i32, i32> = (0..7).map(|k| (k, k)).collect();
        let before = map.size();
        let removed = map.prune();
        assert!(removed <= before);
        assert!(map.was_pruned());
    }

    #[test]
    fn bounded_size_never_exceeds_max_size_under_many_inserts() {
        init_logger();
        let mut map = SplayMap::with_max_size(50);
        for k in 0..5_000 {
            map.insert(k, k);
            assert!(map.size() <= 50, "size {} exceeded max_size", map.size());
        }
    }

    #[test]
    fn eviction_callback_fires_once_per_removed_entry() {
        use std::cell::RefCell;
        use std::rc::Rc;

        init_logger();
        let evicted = Rc::new(RefCell::new(Vec::new()));
        let evicted_clone = Rc::clone(&evicted);

        let mut map = SplayMap::with_max_size(20);
        map.on_prune(move |k: &i32, v: &i32| {
            evicted_clone.borrow_mut().push((*k, *v));
        });

        for k in 0..500 {
            map.insert(k, k * 2);
        }

        assert_eq!(map.size(), 20);
        let log = evicted.borrow();
        assert_eq!(log.len(), 500 - 20);
        for (k, v) in log.iter() {
            assert_eq!(*v, *k * 2);
        }
    }

    #[test]
    fn enforce_max_size_converges_on_a_shallow_wide_tree() {
        init_logger();
        // A single insertion sequence that keeps the tree close to
        // balanced (so the height/2 threshold pass may find nothing to
        // remove) still has to converge via the deepest-leaf fallback.
        let mut map = SplayMap::with_max_size(3);
        for k in [4, 2, 6, 1, 3, 5, 7] {
            map.insert(k, k);
            assert!(map.size() <= 3);
        }
    }
}
