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
    super::OrderSeq,
    crate::config::AllocStrategy,
    core::{fmt, iter::FusedIterator},
};

/// An ordered iterator over the keys of an [`OrderSeq`], from either end
pub struct SeqIter<'a, K, A: AllocStrategy> {
    q: &'a OrderSeq<K, A>,
    f: Option<usize>,
    b: Option<usize>,
    r: usize,
}

impl<'a, K, A: AllocStrategy> SeqIter<'a, K, A> {
    #[inline(always)]
    pub(super) fn new(q: &'a OrderSeq<K, A>) -> Self {
        Self {
            q,
            f: q.h,
            b: q.t,
            r: q.l,
        }
    }
}

impl<'a, K, A: AllocStrategy> Clone for SeqIter<'a, K, A> {
    fn clone(&self) -> Self {
        Self {
            q: self.q,
            f: self.f,
            b: self.b,
            r: self.r,
        }
    }
}

impl<'a, K, A: AllocStrategy> Iterator for SeqIter<'a, K, A> {
    type Item = &'a K;
    fn next(&mut self) -> Option<Self::Item> {
        if self.r == 0 {
            return None;
        }
        let node = self.q.node(self.f?);
        self.f = node.n;
        self.r -= 1;
        Some(&node.k)
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.r, Some(self.r))
    }
}

impl<'a, K, A: AllocStrategy> DoubleEndedIterator for SeqIter<'a, K, A> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.r == 0 {
            return None;
        }
        let node = self.q.node(self.b?);
        self.b = node.p;
        self.r -= 1;
        Some(&node.k)
    }
}

impl<'a, K, A: AllocStrategy> ExactSizeIterator for SeqIter<'a, K, A> {
    fn len(&self) -> usize {
        self.r
    }
}

impl<'a, K, A: AllocStrategy> FusedIterator for SeqIter<'a, K, A> {}

impl<'a, K: fmt::Debug, A: AllocStrategy> fmt::Debug for SeqIter<'a, K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
