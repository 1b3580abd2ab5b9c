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
    super::OrderedMap,
    crate::{config::Config, seq::NodeHandle, AsKeyClone, OmResult},
    core::fmt,
    log::trace,
};

/// A cursor to one entry of an [`OrderedMap`].
///
/// The cursor holds a snapshot of the key and value as they were when it was produced, plus the
/// position of the entry. Every step (`next`/`prev`) takes the map's read lock again, so writes that
/// land between two steps are visible; there is no snapshot isolation across a walk. If the entry was
/// deleted, or the map cleared, after the cursor was produced, stepping fails with
/// [`Error::InvalidHandle`](crate::Error::InvalidHandle)
pub struct Item<'m, K, V, C: Config> {
    m: &'m OrderedMap<K, V, C>,
    h: NodeHandle,
    k: K,
    v: V,
}

impl<'m, K, V, C: Config> Item<'m, K, V, C> {
    pub(super) fn new(m: &'m OrderedMap<K, V, C>, h: NodeHandle, k: K, v: V) -> Self {
        Self { m, h, k, v }
    }
    pub fn key(&self) -> &K {
        &self.k
    }
    pub fn value(&self) -> &V {
        &self.v
    }
    pub fn handle(&self) -> NodeHandle {
        self.h
    }
    pub fn into_kv(self) -> (K, V) {
        (self.k, self.v)
    }
}

impl<'m, K: AsKeyClone, V: Clone, C: Config> Item<'m, K, V, C> {
    /// Returns the entry after this one, if any
    pub fn next(&self) -> OmResult<Option<Self>> {
        self.m
            .step(self.h, |q, h| q.next(h))
            .map_err(|e| {
                trace!("rejected stale cursor on next");
                e
            })
    }
    /// Returns the entry before this one, if any
    pub fn prev(&self) -> OmResult<Option<Self>> {
        self.m
            .step(self.h, |q, h| q.prev(h))
            .map_err(|e| {
                trace!("rejected stale cursor on prev");
                e
            })
    }
}

impl<'m, K: fmt::Debug, V: fmt::Debug, C: Config> fmt::Debug for Item<'m, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.k)
            .field("value", &self.v)
            .finish()
    }
}
