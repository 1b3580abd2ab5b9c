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
    rand::{
        distributions::{uniform::SampleUniform, Alphanumeric},
        Rng,
    },
    std::env,
};

/// Set up logging for tests. The filter is read from `ORDMAP_LOG` and defaults to `warn`
pub fn init_log() {
    let _ = env_logger::Builder::new()
        .parse_filters(&env::var("ORDMAP_LOG").unwrap_or_else(|_| "warn".to_owned()))
        .is_test(true)
        .try_init();
}

/// Generate a random number within the given range
pub fn random_number<T: SampleUniform + PartialOrd>(min: T, max: T, rng: &mut impl Rng) -> T {
    rng.gen_range(min..max)
}

pub fn random_string(rng: &mut impl Rng, l: usize) -> String {
    rng.sample_iter(Alphanumeric)
        .take(l)
        .map(char::from)
        .collect()
}
