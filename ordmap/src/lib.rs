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

//! # ordmap
//!
//! A thread-safe hash map that remembers the order in which keys were first inserted. Lookups go
//! through a hash index while iteration order is held by an arena-backed doubly linked list; both
//! live behind a single reader/writer lock.
//!
//! ```
//! use ordmap::{OrderedMap, TravelMode};
//!
//! let m = OrderedMap::new();
//! m.store("a", 1).store("b", 2).store("a", 3);
//! assert_eq!(m.slice(TravelMode::Forward, &[]), vec![3, 2]);
//! ```

#![deny(unreachable_patterns)]

pub mod config;
pub mod error;
pub mod index;
pub mod map;
pub mod seq;
#[cfg(test)]
mod test_utils;

use core::hash::Hash;

// re-exports
pub use {
    error::{EncodeError, Error, OmResult},
    map::{
        cursor::Item,
        travel::{Filter, TravelMode},
        OrderedMap,
    },
    seq::NodeHandle,
};
pub type OrderedMapLib<K, V> = OrderedMap<K, V, config::LiberalConfig>;
pub type OrderedMapCns<K, V> = OrderedMap<K, V, config::ConservativeConfig>;

/// Any type implementing this trait can be used as a key inside the map
pub trait AsKey: Hash + Eq {}

impl<T: Hash + Eq + ?Sized> AsKey for T {}

/// If your T can be cloned/copied and implements [`AsKey`], then this trait will automatically be implemented
///
/// Keys are cloned exactly once, when they are first inserted: one copy is held by the index and the
/// other by the order sequence
pub trait AsKeyClone: AsKey + Clone {
    /// Read the key and return a clone
    fn read_key_clone(&self) -> Self;
}

impl<T: AsKey + Clone + ?Sized> AsKeyClone for T {
    #[inline(always)]
    fn read_key_clone(&self) -> Self {
        Clone::clone(self)
    }
}
