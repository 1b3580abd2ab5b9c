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
    crate::{config::Config, error::EncodeError, AsKey, AsKeyClone},
    core::{fmt, marker::PhantomData},
    log::debug,
    serde::{
        de::{MapAccess, Visitor},
        ser::SerializeMap,
        Deserialize, Deserializer, Serialize, Serializer,
    },
};

#[inline(always)]
fn encode_into<T: Serialize + ?Sized>(buf: &mut Vec<u8>, v: &T) -> Result<(), EncodeError> {
    serde_json::to_writer(buf, v).map_err(EncodeError::from)
}

impl<K: AsKey + Serialize, V: Serialize, C: Config> OrderedMap<K, V, C> {
    /// Render the map as a JSON object in insertion order.
    ///
    /// Keys and values are each encoded on their own, so the output is exactly
    /// `{<key>:<value>,...}` with no trailing comma (`{}` for an empty map). Unlike the [`Serialize`]
    /// impl, non-string keys are written as is (an integer key `1` shows up as `1`, not `"1"`).
    ///
    /// The first key or value that fails to encode aborts the whole thing; whatever was rendered up to
    /// that point is thrown away.
    ///
    /// Encoding is plain `serde_json`: non-finite floats (`NaN`, `inf`) are written as `null` (and so
    /// won't decode back into a float), and `<`, `>` and `&` inside strings are left as is rather than
    /// escaped to `\u003c` and friends
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        let d = self.read();
        let mut buf = Vec::with_capacity(2 + d.seq.len() * 8);
        buf.push(b'{');
        for (i, k) in d.seq.iter().enumerate() {
            if i != 0 {
                buf.push(b',');
            }
            let r = encode_into(&mut buf, k).and_then(|_| {
                buf.push(b':');
                encode_into(&mut buf, d.value_of(k))
            });
            if let Err(e) = r {
                debug!("failed to encode entry {i} of ordered map: {e}");
                return Err(e);
            }
        }
        buf.push(b'}');
        Ok(buf)
    }
    /// Same as [`Self::to_json`], but returns a [`String`]
    pub fn to_json_string(&self) -> Result<String, EncodeError> {
        self.to_json().map(|buf| {
            String::from_utf8(buf).unwrap_or_else(|_| unreachable!("serde_json emitted invalid UTF-8"))
        })
    }
}

impl<K: AsKey + Serialize, V: Serialize, C: Config> Serialize for OrderedMap<K, V, C> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let d = self.read();
        let mut map = serializer.serialize_map(Some(d.seq.len()))?;
        for k in d.seq.iter() {
            map.serialize_entry(k, d.value_of(k))?;
        }
        map.end()
    }
}

struct OrderedMapVisitor<K, V, C: Config>(PhantomData<fn() -> OrderedMap<K, V, C>>);

impl<'de, K, V, C> Visitor<'de> for OrderedMapVisitor<K, V, C>
where
    K: AsKeyClone + Deserialize<'de>,
    V: Deserialize<'de>,
    C: Config,
{
    type Value = OrderedMap<K, V, C>;
    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map")
    }
    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let m = OrderedMap::init_cap(access.size_hint().unwrap_or(0));
        {
            let mut d = m.d.write();
            while let Some((k, v)) = access.next_entry()? {
                let _ = d.upsert(k, v);
            }
        }
        Ok(m)
    }
}

/// Entries are stored in the order the format yields them; a repeated key keeps its first position and
/// its last value
impl<'de, K, V, C> Deserialize<'de> for OrderedMap<K, V, C>
where
    K: AsKeyClone + Deserialize<'de>,
    V: Deserialize<'de>,
    C: Config,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}
