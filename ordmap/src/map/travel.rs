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
    crate::{config::Config, AsKey},
    core::ops::ControlFlow,
};

/// Direction of a traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    /// front to back
    #[default]
    Forward,
    /// back to front
    Reverse,
}

/// A filter gets the position of the entry along with the entry and returns `true` if it wants the
/// entry. Filters are chained with a logical AND: the first one to say no drops the entry and the
/// remaining filters are not run
pub type Filter<'f, K, V> = &'f dyn Fn(usize, &K, &V) -> bool;

impl<K: AsKey, V, C: Config> OrderedMap<K, V, C> {
    /// Visit the entries in the order given by `mode`.
    ///
    /// Every entry is first passed through `filters` (in order); entries that survive are handed to
    /// `visitor`, which ends the traversal by returning [`ControlFlow::Break`]. The position passed to
    /// filters and visitor counts every entry walked over in this call, including those that the
    /// filters dropped.
    ///
    /// ## Locking
    ///
    /// The read lock is held for the entire traversal, and filters and the visitor run under it. They
    /// may call the map's read operations (`load`, `has`, `len`, nested traversals, ...), but calling
    /// any writing operation (`store`, `delete`, `clear`, `load_or_store`, ...) on the same map from
    /// inside a traversal **will deadlock**. A slow visitor also holds off every writer until it is done
    pub fn travel<F>(&self, mode: TravelMode, visitor: F, filters: &[Filter<'_, K, V>])
    where
        F: FnMut(usize, &K, &V) -> ControlFlow<()>,
    {
        let d = self.read();
        match mode {
            TravelMode::Forward => walk(d.seq.iter(), |k| d.value_of(k), visitor, filters),
            TravelMode::Reverse => walk(d.seq.iter().rev(), |k| d.value_of(k), visitor, filters),
        }
    }
    /// Same as [`Self::travel`] with [`TravelMode::Forward`]
    pub fn travel_forward<F>(&self, visitor: F, filters: &[Filter<'_, K, V>])
    where
        F: FnMut(usize, &K, &V) -> ControlFlow<()>,
    {
        self.travel(TravelMode::Forward, visitor, filters)
    }
    /// Same as [`Self::travel`] with [`TravelMode::Reverse`]
    pub fn travel_reverse<F>(&self, visitor: F, filters: &[Filter<'_, K, V>])
    where
        F: FnMut(usize, &K, &V) -> ControlFlow<()>,
    {
        self.travel(TravelMode::Reverse, visitor, filters)
    }
    /// Collect (clones of) the values that pass `filters`, in the order given by `mode`
    pub fn slice(&self, mode: TravelMode, filters: &[Filter<'_, K, V>]) -> Vec<V>
    where
        V: Clone,
    {
        let mut ret = Vec::with_capacity(self.len());
        self.travel(
            mode,
            |_, _, v| {
                ret.push(v.clone());
                ControlFlow::Continue(())
            },
            filters,
        );
        ret
    }
    /// Collect (clones of) the keys whose entries pass `filters`, in the order given by `mode`
    pub fn keys(&self, mode: TravelMode, filters: &[Filter<'_, K, V>]) -> Vec<K>
    where
        K: Clone,
    {
        let mut ret = Vec::with_capacity(self.len());
        self.travel(
            mode,
            |_, k, _| {
                ret.push(k.clone());
                ControlFlow::Continue(())
            },
            filters,
        );
        ret
    }
}

fn walk<'a, K: 'a, V: 'a>(
    keys: impl Iterator<Item = &'a K>,
    value_of: impl Fn(&'a K) -> &'a V,
    mut visitor: impl FnMut(usize, &K, &V) -> ControlFlow<()>,
    filters: &[Filter<'_, K, V>],
) {
    for (pos, k) in keys.enumerate() {
        let v = value_of(k);
        if !filters.iter().all(|f| f(pos, k, v)) {
            continue;
        }
        if visitor(pos, k, v).is_break() {
            break;
        }
    }
}
