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

use core::fmt;

pub type OmResult<T> = Result<T, Error>;

/// Structural misuse of the order sequence. These are programming errors, never runtime conditions:
/// a lookup miss is reported with [`Option`] or `bool` instead
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// the handle (or cursor) was issued by another sequence, its node was removed or the sequence
    /// was cleared after it was issued
    InvalidHandle,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidHandle => write!(f, "invalid or stale node handle"),
        }
    }
}

impl std::error::Error for Error {}

#[derive(Debug)]
/// A key or value failed to encode while serializing the map. No partial output is ever returned
/// alongside this error
pub struct EncodeError {
    e: serde_json::Error,
}

impl EncodeError {
    /// Returns the underlying encoder error
    pub fn inner(&self) -> &serde_json::Error {
        &self.e
    }
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "encode error: {}", self.e)
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.e)
    }
}

impl From<serde_json::Error> for EncodeError {
    fn from(e: serde_json::Error) -> Self {
        Self { e }
    }
}
