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

use {
    crate::{config::AsHasher, seq::NodeHandle, AsKey},
    std::{
        borrow::Borrow,
        collections::{hash_map::Entry, HashMap as StdMap},
    },
};

#[derive(Debug, Clone)]
/// A value along with the position of its key in the order sequence
pub struct Record<V> {
    v: V,
    h: NodeHandle,
}

impl<V> Record<V> {
    pub fn value(&self) -> &V {
        &self.v
    }
    pub fn handle(&self) -> NodeHandle {
        self.h
    }
}

/// Key to `(value, node handle)` lookup. The index owns the records; the handles point into an order
/// sequence that it does not own
#[derive(Debug)]
pub struct Index<K, V, S> {
    m: StdMap<K, Record<V>, S>,
}

impl<K, V, S: AsHasher> Index<K, V, S> {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            m: StdMap::with_capacity_and_hasher(cap, S::default()),
        }
    }
    pub fn len(&self) -> usize {
        self.m.len()
    }
    pub fn is_empty(&self) -> bool {
        self.m.is_empty()
    }
    pub fn clear(&mut self) {
        self.m.clear()
    }
    pub fn shrink_to_fit(&mut self)
    where
        K: AsKey,
    {
        self.m.shrink_to_fit()
    }
}

impl<K: AsKey, V, S: AsHasher> Index<K, V, S> {
    pub fn get<Q>(&self, k: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.m.get(k).map(Record::value)
    }
    pub fn get_record<Q>(&self, k: &Q) -> Option<&Record<V>>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.m.get(k)
    }
    pub fn contains<Q>(&self, k: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.m.contains_key(k)
    }
    /// If the key is new, `mknode` is called to link it into the order sequence and the record is
    /// created. Otherwise only the value is replaced (and the old one returned); the handle, and with
    /// it the position, is left alone
    pub fn insert_or_update(
        &mut self,
        k: K,
        v: V,
        mknode: impl FnOnce(&K) -> NodeHandle,
    ) -> Option<V> {
        match self.m.entry(k) {
            Entry::Occupied(mut oe) => Some(std::mem::replace(&mut oe.get_mut().v, v)),
            Entry::Vacant(ve) => {
                let h = mknode(ve.key());
                ve.insert(Record { v, h });
                None
            }
        }
    }
    pub fn remove<Q>(&mut self, k: &Q) -> Option<NodeHandle>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.remove_entry(k).map(|(h, _)| h)
    }
    pub fn remove_entry<Q>(&mut self, k: &Q) -> Option<(NodeHandle, V)>
    where
        K: Borrow<Q>,
        Q: AsKey + ?Sized,
    {
        self.m.remove(k).map(|Record { v, h }| (h, v))
    }
}
