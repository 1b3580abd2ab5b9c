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
    core::marker::PhantomData,
    std::{collections::hash_map::RandomState, hash::BuildHasher},
};

pub trait AsHasher: BuildHasher + Default {}
impl<T> AsHasher for T where T: BuildHasher + Default {}

/// Decides what happens to the backing memory of the order sequence (and the index) when the map is
/// cleared
pub trait AllocStrategy {
    /// If set, a clear hands the arena and index allocations back to the allocator. Otherwise they
    /// are retained so that the map can be refilled without growing again
    const RELEASE_ON_CLEAR: bool;
}

/// Hold on to memory across clears
#[derive(Debug, Default)]
pub struct LiberalStrategy;

impl AllocStrategy for LiberalStrategy {
    const RELEASE_ON_CLEAR: bool = false;
}

/// Give memory back on every clear
#[derive(Debug, Default)]
pub struct ConservativeStrategy;

impl AllocStrategy for ConservativeStrategy {
    const RELEASE_ON_CLEAR: bool = true;
}

pub trait Config {
    type Hasher: AsHasher;
    type AllocStrategy: AllocStrategy;
}

#[derive(Debug, Default)]
pub struct LiberalConfig(PhantomData<LiberalStrategy>);

impl Config for LiberalConfig {
    type Hasher = RandomState;
    type AllocStrategy = LiberalStrategy;
}

#[derive(Debug, Default)]
pub struct ConservativeConfig(PhantomData<ConservativeStrategy>);

impl Config for ConservativeConfig {
    type Hasher = RandomState;
    type AllocStrategy = ConservativeStrategy;
}

pub type DefConfig = LiberalConfig;
