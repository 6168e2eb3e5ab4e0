// =====================================================================
// File: ext.rs
//
//! The narrow convenience surface named by the external-interface spec:
//! `get_or_default`, `get_or_compute`, `contains_value`, `key_for_value`
//! (in three miss-handling modes), and `merge_into` (with and without a
//! conflict-resolution callback). Everything here is built entirely on
//! top of [`crate::SplayMap`]'s core operations — no new invariants, no
//! direct tree surgery.
//!
//! The broader Ruby-`Hash`-style surface (`values_at`, `dig`, `to_a`,
//! `to_h`, `to_s`, `zip`, `reject`, `select`, `transform_*`) is out of
//! scope and intentionally absent.
// =====================================================================

use std::fmt;

use crate::error::MapError;
use crate::map::SplayMap;
use crate::splay::splay_root;

impl<K: Ord, V> SplayMap<K, V> {
    /// `get`, splaying `key` to the root, but returning `default` instead
    /// of `None` on a miss.
    pub fn get_or_default(&mut self, key: &K, default: V) -> V
    where
        V: Clone,
    {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Read-through cache pattern: returns the existing value for `key`,
    /// or calls `compute` (with shared access to the map, so it may read
    /// other entries but not mutate any) and stores the result before
    /// returning it.
    pub fn get_or_compute<F>(&mut self, key: K, compute: F) -> &V
    where
        K: Clone,
        F: FnOnce(&SplayMap<K, V>, &K) -> V,
    {
        if !self.contains_key(&key) {
            let value = compute(self, &key);
            self.insert(key.clone(), value);
        }
        self.get(&key).expect("just inserted or already present")
    }

    /// `get`, but reporting a missing key as `MapError::KeyNotFound`
    /// instead of `None`.
    pub fn get_or_err(&mut self, key: &K) -> Result<&V, MapError<K>>
    where
        K: Clone + fmt::Debug,
    {
        if !self.contains_key(key) {
            return Err(MapError::KeyNotFound(key.clone()));
        }
        splay_root(&mut self.root, key);
        Ok(&self.root.as_ref().unwrap().value)
    }

    /// `remove`, but reporting a missing key as `MapError::KeyNotFound`
    /// instead of `None`.
    pub fn try_remove(&mut self, key: &K) -> Result<V, MapError<K>>
    where
        K: Clone + fmt::Debug,
    {
        self.remove(key)
            .ok_or_else(|| MapError::KeyNotFound(key.clone()))
    }

    /// Linear scan for any entry whose value equals `value`.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Reverse lookup, absent-on-miss: the key of the first entry (in
    /// key order) whose value equals `value`.
    pub fn key_for_value(&self, value: &V) -> Option<&K>
    where
        V: PartialEq,
    {
        self.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    /// Reverse lookup, raise-on-miss.
    pub fn try_key_for_value(&self, value: &V) -> Result<&K, MapError<K>>
    where
        V: PartialEq,
        K: fmt::Debug,
    {
        self.key_for_value(value).ok_or(MapError::ValueNotFound)
    }

    /// Reverse lookup, block-on-miss: calls `fallback` to produce a key to
    /// return by value when no entry holds `value`.
    pub fn key_for_value_or_else<F>(&self, value: &V, fallback: F) -> K
    where
        V: PartialEq,
        K: Clone,
        F: FnOnce() -> K,
    {
        match self.key_for_value(value) {
            Some(k) => k.clone(),
            None => fallback(),
        }
    }

    /// Inserts every pair from `other`, last write wins on key collision.
    pub fn merge_into<I>(&mut self, other: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in other {
            self.insert(k, v);
        }
    }

    /// Inserts every pair from `other`; on a key collision, `resolve(&key,
    /// &existing, &incoming)` decides the value that is actually stored.
    pub fn merge_into_with<I, F>(&mut self, other: I, mut resolve: F)
    where
        I: IntoIterator<Item = (K, V)>,
        F: FnMut(&K, &V, &V) -> V,
    {
        for (k, v) in other {
            let resolved = match self.get_without_splay(&k) {
                Some(existing) => resolve(&k, existing, &v),
                None => v,
            };
            self.insert(k, resolved);
        }
    }
}
