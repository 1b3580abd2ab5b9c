/*
 * Created on Sun Oct 18 2026
 *
 * This file is a part of Skytable
 * Skytable (formerly known as TerrabaseDB or Skybase) is a free and open-source
 * NoSQL database written by Sayan Nandan ("the Author") with the
 * vision to provide flexibility in data modelling without compromising
 * on performance, queryability or scalability.
 *
 * Copyright (c) 2026, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

pub mod cursor;
pub mod ser;
pub mod travel;
#[cfg(test)]
mod tests;

use {
    self::cursor::Item,
    crate::{
        config::{AllocStrategy, Config, DefConfig},
        index::Index,
        seq::{NodeHandle, OrderSeq},
        AsKey, AsKeyClone, OmResult,
    },
    core::{borrow::Borrow, fmt},
    log::debug,
    parking_lot::{RwLock, RwLockUpgradableReadGuard},
};

/*
    Both halves of the map (index + order) sit inside ONE lock and are never touched outside it. Any
    write that changes one of them fixes up the other within the same critical section, so the
    key <-> node bijection is never observable as broken.
*/

pub(crate) struct MapData<K, V, C: Config> {
    seq: OrderSeq<K, C::AllocStrategy>,
    idx: Index<K, V, C::Hasher>,
}

impl<K, V, C: Config> MapData<K, V, C> {
    fn with_capacity(cap: usize) -> Self {
        Self {
            seq: OrderSeq::with_capacity(cap),
            idx: Index::with_capacity(cap),
        }
    }
}

impl<K: AsKey, V, C: Config> MapData<K, V, C> {
    /// Returns the value for a key that was read off the order sequence
    #[inline(always)]
    pub(crate) fn value_of(&self, k: &K) -> &V {
        match self.idx.get(k) {
            Some(v) => v,
            None => unreachable!("ordered key missing from index"),
        }
    }
    fn upsert(&mut self, k: K, v: V) -> Option<V>
    where
        K: AsKeyClone,
    {
        let Self { seq, idx } = self;
        idx.insert_or_update(k, v, |k| seq.push_back(k.read_key_clone()))
    }
    fn remove<Q>(&mut self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        let (h, v) = self.idx.remove_entry(k)?;
        if let Err(e) = self.seq.remove(h) {
            panic!("index and order sequence out of sync: {e}");
        }
        Some(v)
    }
    fn clear(&mut self) {
        self.seq.clear();
        if C::AllocStrategy::RELEASE_ON_CLEAR {
            self.idx = Index::with_capacity(0);
        } else {
            self.idx.clear();
        }
    }
}

/// A thread-safe map that iterates in first-insertion order.
///
/// Every operation takes the map's single reader/writer lock: writers (`store`, `delete`, `clear`, ...)
/// exclusively, everything else shared. Storing a key that already exists replaces its value but
/// never moves it.
///
/// Shared locks are taken recursively (so a traversal's visitor can read the map it is walking), which
/// means readers don't queue up behind a waiting writer: a steady stream of readers can starve
/// `store`, `delete` and the other writers indefinitely.
pub struct OrderedMap<K, V, C: Config = DefConfig> {
    d: RwLock<MapData<K, V, C>>,
}

impl<K, V> OrderedMap<K, V> {
    pub fn new() -> Self {
        Self::init()
    }
    pub fn with_capacity(cap: usize) -> Self {
        Self::init_cap(cap)
    }
}

impl<K, V, C: Config> OrderedMap<K, V, C> {
    /// Initialize an empty map using the configuration `C`
    pub fn init() -> Self {
        Self::init_cap(0)
    }
    /// Initialize an empty map using the configuration `C`, with room for `cap` entries
    pub fn init_cap(cap: usize) -> Self {
        Self {
            d: RwLock::new(MapData::with_capacity(cap)),
        }
    }
    pub fn len(&self) -> usize {
        self.d.read_recursive().seq.len()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    #[inline(always)]
    pub(crate) fn read(&self) -> parking_lot::RwLockReadGuard<'_, MapData<K, V, C>> {
        self.d.read_recursive()
    }
}

impl<K: AsKey, V, C: Config> OrderedMap<K, V, C> {
    /// Insert or update. A new key goes to the back; an existing key keeps its place and only has its
    /// value replaced
    pub fn store(&self, k: K, v: V) -> &Self
    where
        K: AsKeyClone,
    {
        let _ = self.d.write().upsert(k, v);
        self
    }
    /// Returns a clone of the value for the key, if present
    pub fn load<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
        V: Clone,
    {
        self.d.read_recursive().idx.get(k).cloned()
    }
    /// Run `f` on the value for the key (under the read lock), if present
    pub fn load_with<Q, R>(&self, k: &Q, f: impl FnOnce(&V) -> R) -> Option<R>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.d.read_recursive().idx.get(k).map(f)
    }
    /// Returns the existing value for the key and `true` if present. Otherwise stores `v` and returns it
    /// with `false`. The check and the store are atomic with respect to every other writer
    pub fn load_or_store(&self, k: K, v: V) -> (V, bool)
    where
        K: AsKeyClone,
        V: Clone,
    {
        // only one upgradable reader at a time; plain readers can still get in until we upgrade
        let d = self.d.upgradable_read();
        if let Some(v) = d.idx.get(&k) {
            return (v.clone(), true);
        }
        let mut d = RwLockUpgradableReadGuard::upgrade(d);
        let _ = d.upsert(k, v.clone());
        (v, false)
    }
    pub fn has<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.d.read_recursive().idx.contains(k)
    }
    /// Remove the key if present. Deleting a missing key does nothing
    pub fn delete<Q>(&self, k: &Q) -> &Self
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        let _ = self.d.write().remove(k);
        self
    }
    /// Remove the key and return its value, if present
    pub fn remove<Q>(&self, k: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.d.write().remove(k)
    }
    /// Drop every entry.
    ///
    /// ## Cursors
    ///
    /// Every [`Item`] issued before the clear becomes stale; stepping from one returns
    /// [`Error::InvalidHandle`](crate::Error::InvalidHandle)
    pub fn clear(&self) -> &Self {
        let mut d = self.d.write();
        let n = d.seq.len();
        d.clear();
        debug!("cleared ordered map with {n} entries");
        self
    }
    /// Reclaim memory held by removed entries
    pub fn compact(&self) {
        let mut d = self.d.write();
        let vacant = d.seq.vacant();
        d.seq.compact();
        d.idx.shrink_to_fit();
        debug!("compacted ordered map ({vacant} vacant slots before compaction)");
    }
}

impl<K: AsKeyClone, V: Clone, C: Config> OrderedMap<K, V, C> {
    /// Returns a cursor to the first entry
    pub fn front(&self) -> Option<Item<'_, K, V, C>> {
        let d = self.d.read_recursive();
        d.seq.front().map(|h| self.item_at(&d, h))
    }
    /// Returns a cursor to the last entry
    pub fn back(&self) -> Option<Item<'_, K, V, C>> {
        let d = self.d.read_recursive();
        d.seq.back().map(|h| self.item_at(&d, h))
    }
    fn item_at(&self, d: &MapData<K, V, C>, h: NodeHandle) -> Item<'_, K, V, C> {
        let k = match d.seq.get(h) {
            Ok(k) => k,
            Err(e) => unreachable!("sequence produced a bad handle: {e}"),
        };
        Item::new(self, h, k.clone(), d.value_of(k).clone())
    }
    /// Step from `h` using `step`, re-taking the read lock
    pub(crate) fn step(
        &self,
        h: NodeHandle,
        step: impl FnOnce(&OrderSeq<K, C::AllocStrategy>, NodeHandle) -> OmResult<Option<NodeHandle>>,
    ) -> OmResult<Option<Item<'_, K, V, C>>> {
        let d = self.d.read_recursive();
        Ok(step(&d.seq, h)?.map(|h| self.item_at(&d, h)))
    }
}

impl<K, V, C: Config> Default for OrderedMap<K, V, C> {
    fn default() -> Self {
        Self::init()
    }
}

impl<K: AsKeyClone, V, C: Config> FromIterator<(K, V)> for OrderedMap<K, V, C> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let slf = Self::init();
        slf.extend_from(iter);
        slf
    }
}

impl<K: AsKeyClone, V, C: Config> Extend<(K, V)> for OrderedMap<K, V, C> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        self.extend_from(iter)
    }
}

impl<K: AsKeyClone, V, C: Config> OrderedMap<K, V, C> {
    /// Store every pair from `iter` under one write lock
    pub fn extend_from<T: IntoIterator<Item = (K, V)>>(&self, iter: T) {
        let mut d = self.d.write();
        iter.into_iter().for_each(|(k, v)| {
            let _ = d.upsert(k, v);
        });
    }
}

impl<K: AsKeyClone, V: Clone, C: Config> Clone for OrderedMap<K, V, C> {
    fn clone(&self) -> Self {
        let d = self.d.read_recursive();
        let mut new = MapData::with_capacity(d.seq.len());
        d.seq.iter().for_each(|k| {
            let _ = new.upsert(k.clone(), d.value_of(k).clone());
        });
        Self {
            d: RwLock::new(new),
        }
    }
}

impl<K: AsKey + fmt::Debug, V: fmt::Debug, C: Config> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.d.read_recursive();
        f.debug_map()
            .entries(d.seq.iter().map(|k| (k, d.value_of(k))))
            .finish()
    }
}
