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

mod iter;

pub use self::iter::SeqIter;

use {
    crate::{
        config::AllocStrategy,
        error::{Error, OmResult},
    },
    core::{
        fmt,
        marker::PhantomData,
        mem,
        sync::atomic::{AtomicU64, Ordering},
    },
};

/*
    The order sequence is a doubly linked list that lives in an arena (a plain vector of slots) and is
    addressed by slot numbers instead of pointers. Vacated slots are threaded into an intrusive free
    list and recycled on the next push.

    A slot number on its own can't tell a live node from a recycled one, so every handle also carries
    the stamp of the node it was issued for and the epoch of the sequence. Epochs come from a global
    counter and are rotated on every clear, which kills all outstanding handles at once.
*/

static EPOCH: AtomicU64 = AtomicU64::new(0);

#[inline(always)]
fn next_epoch() -> u64 {
    EPOCH.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// A non-owning reference to a node in an [`OrderSeq`]. Handles are only meaningful for the sequence
/// that issued them, and only until that node is removed or the sequence is cleared
pub struct NodeHandle {
    e: u64,
    s: usize,
    st: u64,
}

impl NodeHandle {
    #[inline(always)]
    const fn new(e: u64, s: usize, st: u64) -> Self {
        Self { e, s, st }
    }
}

#[derive(Debug)]
struct SeqNode<K> {
    k: K,
    n: Option<usize>,
    p: Option<usize>,
    st: u64,
}

#[derive(Debug)]
enum Slot<K> {
    Busy(SeqNode<K>),
    /// vacant; holds the next entry of the free list
    Free(Option<usize>),
}

/// The insertion order of a map: a doubly linked chain of keys with O(1) push, unlink and neighbour
/// access
pub struct OrderSeq<K, A: AllocStrategy> {
    slots: Vec<Slot<K>>,
    h: Option<usize>,
    t: Option<usize>,
    l: usize,
    // free list head and length
    f: Option<usize>,
    fl: usize,
    e: u64,
    st: u64,
    _a: PhantomData<A>,
}

impl<K, A: AllocStrategy> OrderSeq<K, A> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            slots: Vec::with_capacity(cap),
            h: None,
            t: None,
            l: 0,
            f: None,
            fl: 0,
            e: next_epoch(),
            st: 0,
            _a: PhantomData,
        }
    }
    /// Number of linked nodes
    pub fn len(&self) -> usize {
        self.l
    }
    pub fn is_empty(&self) -> bool {
        self.l == 0
    }
    /// Number of vacated slots that are waiting to be recycled
    pub fn vacant(&self) -> usize {
        self.fl
    }
    /// Number of slots in the arena, busy or not
    pub fn arena_len(&self) -> usize {
        self.slots.len()
    }
    /// Number of slots the arena can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
    pub fn iter(&self) -> SeqIter<'_, K, A> {
        SeqIter::new(self)
    }
}

impl<K, A: AllocStrategy> OrderSeq<K, A> {
    #[inline(always)]
    fn node(&self, s: usize) -> &SeqNode<K> {
        match &self.slots[s] {
            Slot::Busy(n) => n,
            Slot::Free(_) => unreachable!("linked slot {s} is vacant"),
        }
    }
    #[inline(always)]
    fn node_mut(&mut self, s: usize) -> &mut SeqNode<K> {
        match &mut self.slots[s] {
            Slot::Busy(n) => n,
            Slot::Free(_) => unreachable!("linked slot {s} is vacant"),
        }
    }
    #[inline(always)]
    fn handle_of(&self, s: usize) -> NodeHandle {
        NodeHandle::new(self.e, s, self.node(s).st)
    }
    /// Verify that the handle is ours and still points at the node it was issued for
    fn resolve(&self, h: NodeHandle) -> OmResult<&SeqNode<K>> {
        if h.e != self.e {
            return Err(Error::InvalidHandle);
        }
        match self.slots.get(h.s) {
            Some(Slot::Busy(n)) if n.st == h.st => Ok(n),
            _ => Err(Error::InvalidHandle),
        }
    }
    /// Take a slot off the free list, or grow the arena
    fn alloc(&mut self, node: SeqNode<K>) -> usize {
        match self.f {
            Some(s) => {
                let nx = match self.slots[s] {
                    Slot::Free(nx) => nx,
                    Slot::Busy(_) => unreachable!("busy slot {s} on free list"),
                };
                self.f = nx;
                self.fl -= 1;
                self.slots[s] = Slot::Busy(node);
                s
            }
            None => {
                self.slots.push(Slot::Busy(node));
                self.slots.len() - 1
            }
        }
    }
}

impl<K, A: AllocStrategy> OrderSeq<K, A> {
    /// Append a key at the tail
    pub fn push_back(&mut self, k: K) -> NodeHandle {
        let st = self.st;
        self.st += 1;
        let s = self.alloc(SeqNode {
            k,
            n: None,
            p: self.t,
            st,
        });
        match self.t {
            Some(t) => self.node_mut(t).n = Some(s),
            None => self.h = Some(s),
        }
        self.t = Some(s);
        self.l += 1;
        NodeHandle::new(self.e, s, st)
    }
    /// Unlink the node and return its key. The slot is recycled
    pub fn remove(&mut self, h: NodeHandle) -> OmResult<K> {
        let (p, n) = {
            let node = self.resolve(h)?;
            (node.p, node.n)
        };
        match p {
            Some(p) => self.node_mut(p).n = n,
            None => self.h = n,
        }
        match n {
            Some(n) => self.node_mut(n).p = p,
            None => self.t = p,
        }
        let old = mem::replace(&mut self.slots[h.s], Slot::Free(self.f));
        self.f = Some(h.s);
        self.fl += 1;
        self.l -= 1;
        match old {
            Slot::Busy(node) => Ok(node.k),
            Slot::Free(_) => unreachable!("resolved slot {} is vacant", h.s),
        }
    }
    pub fn front(&self) -> Option<NodeHandle> {
        self.h.map(|s| self.handle_of(s))
    }
    pub fn back(&self) -> Option<NodeHandle> {
        self.t.map(|s| self.handle_of(s))
    }
    pub fn next(&self, h: NodeHandle) -> OmResult<Option<NodeHandle>> {
        Ok(self.resolve(h)?.n.map(|s| self.handle_of(s)))
    }
    pub fn prev(&self, h: NodeHandle) -> OmResult<Option<NodeHandle>> {
        Ok(self.resolve(h)?.p.map(|s| self.handle_of(s)))
    }
    /// Returns the key held by the node
    pub fn get(&self, h: NodeHandle) -> OmResult<&K> {
        self.resolve(h).map(|n| &n.k)
    }
    /// Drop every node. All handles issued so far become invalid
    pub fn clear(&mut self) {
        if A::RELEASE_ON_CLEAR {
            self.slots = Vec::new();
        } else {
            self.slots.clear();
        }
        self.h = None;
        self.t = None;
        self.l = 0;
        self.f = None;
        self.fl = 0;
        self.e = next_epoch();
        self.st = 0;
    }
    /// Trim vacant slots off the end of the arena and shrink it. Handles to live nodes stay valid
    pub fn compact(&mut self) {
        while let Some(Slot::Free(_)) = self.slots.last() {
            self.slots.pop();
        }
        // rebuild the free list from whatever vacant slots are left
        self.f = None;
        self.fl = 0;
        for s in (0..self.slots.len()).rev() {
            if let Slot::Free(nx) = &mut self.slots[s] {
                *nx = self.f;
                self.f = Some(s);
                self.fl += 1;
            }
        }
        self.slots.shrink_to_fit();
    }
}

impl<K, A: AllocStrategy> Default for OrderSeq<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, A: AllocStrategy> fmt::Debug for OrderSeq<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
